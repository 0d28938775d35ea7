//! # Host 层
//!
//! 宝石消除重制版的宿主层实现，使用 macroquad 作为窗口、渲染和输入引擎。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 窗口与渲染（[`backend::MacroquadGraphics`]）
//! - 输入采集（[`input::poll_input`]）
//! - 配置加载（[`config::AppConfig`]）
//! - 驱动主循环（[`runner::Runner`]）
//!
//! Host 层不包含界面逻辑，界面、切换和资源准备都在 `gem-runtime` 中。

pub mod backend;
pub mod config;
pub mod input;
pub mod runner;

pub use backend::MacroquadGraphics;
pub use config::{AppConfig, ConfigError, ConverterConfig, DebugConfig, WindowConfig};
pub use input::poll_input;
pub use runner::{FrameLimiter, HEADLESS_DT, Runner, run_headless};
