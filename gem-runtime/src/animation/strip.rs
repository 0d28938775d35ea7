//! # 帧序列与闪烁
//!
//! 帧切换用累加计时器与间隔阈值比较，不做浮点相等判断：
//! 帧时间累加出来的浮点数几乎不可能恰好等于某个常数。

/// 循环播放的帧序列
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStrip {
    frame_count: usize,
    /// 每帧时长（秒）
    interval: f32,
    timer: f32,
    current: usize,
}

impl FrameStrip {
    pub fn new(frame_count: usize, interval: f32) -> Self {
        Self {
            frame_count,
            interval,
            timer: 0.0,
            current: 0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.frame_count == 0 || self.interval <= 0.0 {
            return;
        }
        self.timer += dt;
        while self.timer >= self.interval {
            self.timer -= self.interval;
            self.current = (self.current + 1) % self.frame_count;
        }
    }

    /// 当前帧索引（从 0 开始）
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.current = 0;
    }
}

/// 周期性显隐（"Press ENTER" 提示）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blink {
    /// 周期（秒）
    pub period: f32,
    /// 每个周期中可见部分的占比 (0.0 - 1.0)
    pub duty: f32,
}

impl Blink {
    pub fn new(period: f32, duty: f32) -> Self {
        Self { period, duty }
    }

    pub fn is_visible(&self, elapsed: f32) -> bool {
        if self.period <= 0.0 {
            return true;
        }
        elapsed.rem_euclid(self.period) < self.period * self.duty
    }
}
