//! # 闪光
//!
//! 在 logo 上闪烁的星芒：缩放和透明度随相位做半个正弦，同时匀速旋转；
//! 每闪完一次，跳到锚定区域内的新随机位置。

use std::f32::consts::PI;

use rand::Rng;

use crate::gfx::{Rect, Vec2};

/// 闪光参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkleSpec {
    /// 一次闪烁的时长（秒）
    pub period: f32,
    /// 最大缩放
    pub max_scale: f32,
    /// 旋转速度（度/秒）
    pub spin: f32,
}

impl Default for SparkleSpec {
    fn default() -> Self {
        Self {
            period: 1.2,
            max_scale: 1.0,
            spin: 90.0,
        }
    }
}

/// 闪光状态
#[derive(Debug, Clone, PartialEq)]
pub struct Sparkle {
    spec: SparkleSpec,
    /// 出现区域
    region: Rect,
    position: Vec2,
    phase: f32,
    rotation: f32,
}

impl Sparkle {
    pub fn new(spec: SparkleSpec, region: Rect, rng: &mut impl Rng) -> Self {
        let position = random_point(region, rng);
        Self {
            spec,
            region,
            position,
            phase: 0.0,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        self.rotation = (self.rotation + self.spec.spin * dt) % 360.0;

        if self.spec.period <= 0.0 {
            return;
        }
        self.phase += dt;
        while self.phase >= self.spec.period {
            self.phase -= self.spec.period;
            self.position = random_point(self.region, rng);
        }
    }

    /// 修改出现区域（logo 移动时跟随）
    pub fn set_region(&mut self, region: Rect) {
        self.region = region;
    }

    /// 当前亮度 (0.0 - 1.0)
    pub fn intensity(&self) -> f32 {
        if self.spec.period <= 0.0 {
            return 0.0;
        }
        (PI * self.phase / self.spec.period).sin().max(0.0)
    }

    pub fn scale(&self) -> f32 {
        self.spec.max_scale * self.intensity()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// 旋转角度（度）
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn region(&self) -> Rect {
        self.region
    }
}

fn random_point(region: Rect, rng: &mut impl Rng) -> Vec2 {
    let x = if region.w > 0.0 {
        rng.gen_range(region.x..region.x + region.w)
    } else {
        region.x
    };
    let y = if region.h > 0.0 {
        rng.gen_range(region.y..region.y + region.h)
    } else {
        region.y
    };
    Vec2::new(x, y)
}
