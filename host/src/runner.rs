//! # Runner 模块
//!
//! 与窗口无关的主循环部分：构造管理器、逐帧驱动、帧率限制、headless 运行。

use std::sync::Arc;
use std::time::{Duration, Instant};

use gem_runtime::{
    AssetPipeline, FfmpegTool, Graphics, HeadlessGraphics, InputState, ScreenManager, ScreenState,
    default_registry,
};
use tracing::{debug, info};

use crate::config::AppConfig;

/// headless 模式的固定帧间隔
pub const HEADLESS_DT: f32 = 1.0 / 60.0;

/// 应用（界面管理器 + 帧计数）
pub struct Runner {
    manager: ScreenManager,
    frames: u64,
}

impl Runner {
    /// 按配置构造资源流水线和默认界面
    pub fn new(config: &AppConfig) -> Self {
        let tool = FfmpegTool::new(config.converter.program.clone());
        let assets = AssetPipeline::new(config.assets_root.clone(), Arc::new(tool));
        Self::with_manager(ScreenManager::new(default_registry(), assets))
    }

    pub fn with_manager(manager: ScreenManager) -> Self {
        Self { manager, frames: 0 }
    }

    /// 进入初始界面
    pub fn start(&mut self, initial: ScreenState, gfx: &mut dyn Graphics) {
        info!(screen = %initial, "进入初始界面");
        self.manager.change_state(initial, gfx);
    }

    /// 执行一帧；返回 `false` 表示应当退出
    pub fn frame(&mut self, dt: f32, input: &InputState, gfx: &mut dyn Graphics) -> bool {
        if self.manager.exit_requested() {
            return false;
        }
        self.manager.begin_frame();
        self.manager.update(dt, input, gfx);
        self.manager.draw(gfx);
        self.frames += 1;
        !self.manager.exit_requested()
    }

    /// 退出前释放当前界面的资源
    pub fn shutdown(&mut self, gfx: &mut dyn Graphics) {
        self.manager.shutdown(gfx);
        info!(frames = self.frames, "主循环结束");
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn manager(&self) -> &ScreenManager {
        &self.manager
    }
}

/// 不开窗口运行 `frames` 帧（无输入），返回实际运行的帧数
///
/// 每帧开始前清空绘制记录，结束后 `gfx` 中只保留最后一帧的绘制调用。
pub fn run_headless(runner: &mut Runner, gfx: &mut HeadlessGraphics, frames: u64) -> u64 {
    let idle = InputState::new();
    for _ in 0..frames {
        gfx.take_draw_calls();
        if !runner.frame(HEADLESS_DT, &idle, &mut *gfx) {
            break;
        }
    }
    runner.frames()
}

/// 简单的帧率限制：睡掉本帧剩余的时间
#[derive(Debug)]
pub struct FrameLimiter {
    frame_time: Option<Duration>,
    last: Instant,
}

impl FrameLimiter {
    /// `target_fps == 0` 表示不限制
    pub fn new(target_fps: u32) -> Self {
        let frame_time = (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64));
        Self {
            frame_time,
            last: Instant::now(),
        }
    }

    pub fn frame_time(&self) -> Option<Duration> {
        self.frame_time
    }

    /// 在帧末调用
    pub fn wait(&mut self) {
        if let Some(frame_time) = self.frame_time {
            let spent = self.last.elapsed();
            if spent < frame_time {
                std::thread::sleep(frame_time - spent);
            } else {
                debug!(spent_ms = spent.as_millis() as u64, "帧超时");
            }
        }
        self.last = Instant::now();
    }
}
