//! # Track 模块
//!
//! 无状态的时间轴：给定已过时间，算出当前值。
//! 界面只需累加自己的 `elapsed`，同一条 Track 可以被任意时刻采样。

use super::EasingFunction;

/// f32 值的时间轴
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub from: f32,
    pub to: f32,
    /// 开始前的等待（秒）
    pub delay: f32,
    /// 持续时间（秒）
    pub duration: f32,
    pub easing: EasingFunction,
}

impl Track {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration,
            easing: EasingFunction::Linear,
        }
    }

    /// 恒定值
    pub fn constant(value: f32) -> Self {
        Self::new(value, value, 0.0)
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 线性进度 (0.0 - 1.0)
    pub fn progress(&self, elapsed: f32) -> f32 {
        let local = elapsed - self.delay;
        if local <= 0.0 {
            0.0
        } else if self.duration <= 0.0 || local >= self.duration {
            1.0
        } else {
            local / self.duration
        }
    }

    /// 在 `elapsed` 时刻的值
    pub fn sample(&self, elapsed: f32) -> f32 {
        let t = self.easing.apply(self.progress(elapsed));
        self.from + (self.to - self.from) * t
    }

    /// 结束时刻（含延迟）
    pub fn end_time(&self) -> f32 {
        self.delay + self.duration.max(0.0)
    }

    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.end_time()
    }
}
