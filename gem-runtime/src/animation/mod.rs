//! # Animation 模块
//!
//! 界面动画用到的纯计算部件，全部以 `dt`（秒）驱动，不依赖渲染后端。

mod easing;
mod sparkle;
mod starfield;
mod strip;
mod track;

pub use easing::EasingFunction;
pub use sparkle::{Sparkle, SparkleSpec};
pub use starfield::{Star, StarField, StarFieldSpec};
pub use strip::{Blink, FrameStrip};
pub use track::Track;
