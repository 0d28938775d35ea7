//! # ScreenManager
//!
//! 持有当前界面，按顺序执行 unload → load，转发每帧的 update / draw。

use tracing::{debug, info, warn};

use super::{Frame, LoadContext, Screen, ScreenRegistry, ScreenState};
use crate::assets::AssetPipeline;
use crate::gfx::Graphics;
use crate::input::InputState;

/// 界面管理器
///
/// 同一时刻最多一个界面处于活动状态。切换是同步的：旧界面的 `unload`
/// 完成之后才开始新界面的 `load`，`load` 里的阻塞 I/O 会直接卡住当前帧。
pub struct ScreenManager {
    current_state: ScreenState,
    current_screen: Option<Box<dyn Screen>>,
    registry: ScreenRegistry,
    assets: AssetPipeline,
    /// 本帧发生过切换；`draw` 跳过，`begin_frame` 清除
    loading: bool,
    exit_requested: bool,
    transitions: u64,
}

impl ScreenManager {
    /// 创建管理器；此时没有任何界面被加载
    pub fn new(registry: ScreenRegistry, assets: AssetPipeline) -> Self {
        Self {
            current_state: ScreenState::default(),
            current_screen: None,
            registry,
            assets,
            loading: false,
            exit_requested: false,
            transitions: 0,
        }
    }

    /// 切换界面
    ///
    /// 1. 卸载当前界面（若有）
    /// 2. 更新当前状态
    /// 3. 通过注册表构造新界面（`Exit` 不构造，并通知宿主退出）
    /// 4. 加载新界面
    ///
    /// 允许重入同一状态，会重新执行 unload / load。
    pub fn change_state(&mut self, state: ScreenState, gfx: &mut dyn Graphics) {
        let previous = self.current_state;

        if let Some(mut screen) = self.current_screen.take() {
            debug!(screen = screen.name(), "卸载界面");
            screen.unload(gfx);
        }

        self.current_state = state;
        self.transitions += 1;
        info!(from = %previous, to = %state, "切换界面");

        if state == ScreenState::Exit {
            self.exit_requested = true;
            return;
        }

        let Some(mut screen) = self.registry.create(state) else {
            warn!(state = %state, "该状态没有注册界面");
            return;
        };

        self.loading = true;
        debug!(screen = screen.name(), "加载界面");
        let mut ctx = LoadContext {
            gfx,
            assets: &self.assets,
        };
        screen.load(&mut ctx);
        self.current_screen = Some(screen);
    }

    /// 每帧开始时调用，清除上一帧的加载标记
    pub fn begin_frame(&mut self) {
        self.loading = false;
    }

    /// 转发 update；界面请求的切换立即执行
    pub fn update(&mut self, dt: f32, input: &InputState, gfx: &mut dyn Graphics) {
        let next = match self.current_screen.as_mut() {
            Some(screen) => {
                let mut frame = Frame {
                    dt,
                    input,
                    gfx: &mut *gfx,
                };
                screen.update(&mut frame)
            }
            None => None,
        };

        if let Some(state) = next {
            self.change_state(state, gfx);
        }
    }

    /// 转发 draw；发生切换的那一帧不绘制
    pub fn draw(&self, gfx: &mut dyn Graphics) {
        if self.loading {
            return;
        }
        if let Some(screen) = &self.current_screen {
            screen.draw(gfx);
        }
    }

    /// 宿主关闭前调用，卸载当前界面
    pub fn shutdown(&mut self, gfx: &mut dyn Graphics) {
        if let Some(mut screen) = self.current_screen.take() {
            debug!(screen = screen.name(), "关闭时卸载界面");
            screen.unload(gfx);
        }
    }

    pub fn current_state(&self) -> ScreenState {
        self.current_state
    }

    /// 当前界面名
    pub fn current_screen_name(&self) -> Option<&'static str> {
        self.current_screen.as_ref().map(|s| s.name())
    }

    pub fn has_screen(&self) -> bool {
        self.current_screen.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 是否已进入 `Exit`
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// 已执行的切换次数
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn assets(&self) -> &AssetPipeline {
        &self.assets
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }
}

impl std::fmt::Debug for ScreenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenManager")
            .field("current_state", &self.current_state)
            .field("current_screen", &self.current_screen_name())
            .field("loading", &self.loading)
            .field("exit_requested", &self.exit_requested)
            .finish()
    }
}
