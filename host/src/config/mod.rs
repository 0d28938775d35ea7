//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use gem_runtime::ScreenState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// 资源根目录
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,

    /// 启动时进入的界面
    #[serde(default)]
    pub initial_screen: ScreenState,

    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 外部转换工具配置
    #[serde(default)]
    pub converter: ConverterConfig,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    /// 窗口标题
    #[serde(default = "default_window_title")]
    pub title: String,

    /// 窗口宽度
    #[serde(default = "default_window_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_window_height")]
    pub height: u32,

    /// 目标帧率（0 表示不限制）
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

/// 外部转换工具配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConverterConfig {
    /// ffmpeg 可执行文件（名字或路径）
    #[serde(default = "default_converter_program")]
    pub program: String,
}

/// 调试配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebugConfig {
    /// 日志级别（trace / debug / info / warn / error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// 默认值函数
fn default_assets_root() -> PathBuf {
    PathBuf::from("res")
}

fn default_window_title() -> String {
    "Gem Remaster".to_string()
}

fn default_window_width() -> u32 {
    800
}

fn default_window_height() -> u32 {
    600
}

fn default_target_fps() -> u32 {
    60
}

fn default_converter_program() -> String {
    "ffmpeg".to_string()
}

fn default_log_level() -> String {
    if cfg!(debug_assertions) {
        "debug".to_string()
    } else {
        "info".to_string()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            initial_screen: ScreenState::default(),
            window: WindowConfig::default(),
            converter: ConverterConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
            target_fps: default_target_fps(),
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: default_converter_program(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::load_with_report(path).0
    }

    /// 加载配置文件，同时返回回退原因
    ///
    /// 配置先于日志订阅者加载（日志级别来自配置），调用方在安装订阅者后
    /// 再把回退原因补记到日志里。
    pub fn load_with_report(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        let path = path.as_ref();

        if !path.exists() {
            let e = ConfigError::NotFound(path.to_path_buf());
            warn!(error = %e, "使用默认配置");
            return (Self::default(), Some(e));
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let e = ConfigError::Io(e.to_string());
                warn!(error = %e, "使用默认配置");
                return (Self::default(), Some(e));
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => {
                info!(path = ?path, "配置文件加载成功");
                (config, None)
            }
            Err(e) => {
                let e = ConfigError::Parse(e.to_string());
                warn!(error = %e, "使用默认配置");
                (Self::default(), Some(e))
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    ///
    /// 资源目录不存在只是警告：界面会记录加载失败并跳过缺失的纹理。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::ValidationFailed(format!(
                "窗口尺寸必须大于 0: {}x{}",
                self.window.width, self.window.height
            )));
        }

        if self.window.width > 7680 || self.window.height > 4320 {
            return Err(ConfigError::ValidationFailed(format!(
                "窗口尺寸过大: {}x{}",
                self.window.width, self.window.height
            )));
        }

        if self.window.target_fps > 1000 {
            return Err(ConfigError::ValidationFailed(format!(
                "目标帧率必须在 0 - 1000 之间: {}",
                self.window.target_fps
            )));
        }

        if self.converter.program.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "必须配置 converter.program（转换工具）".to_string(),
            ));
        }

        if parse_log_level(&self.debug.log_level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "未知的日志级别: {}",
                self.debug.log_level
            )));
        }

        if !self.assets_root.exists() {
            warn!(path = ?self.assets_root, "资源目录不存在");
        }

        Ok(())
    }
}

/// 解析日志级别（大小写不敏感）
pub fn parse_log_level(level: &str) -> Option<tracing::Level> {
    level.trim().parse().ok()
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 配置文件不存在
    #[error("配置文件不存在: {0:?}")]
    NotFound(PathBuf),
    /// 解析失败
    #[error("配置文件解析失败: {0}")]
    Parse(String),
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
