//! # Resolution 模块
//!
//! 设置界面可选的窗口分辨率。只作用于当前会话，不持久化。

use std::fmt;

use crate::input::Key;

/// 窗口分辨率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    /// 640×360
    Nhd,
    /// 1280×720
    #[default]
    Hd,
    /// 1920×1080
    FullHd,
    /// 2560×1440
    Qhd,
    /// 3840×2160
    Uhd,
}

impl Resolution {
    pub const ALL: [Resolution; 5] = [
        Resolution::Nhd,
        Resolution::Hd,
        Resolution::FullHd,
        Resolution::Qhd,
        Resolution::Uhd,
    ];

    /// 像素尺寸 (宽, 高)
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Resolution::Nhd => (640, 360),
            Resolution::Hd => (1280, 720),
            Resolution::FullHd => (1920, 1080),
            Resolution::Qhd => (2560, 1440),
            Resolution::Uhd => (3840, 2160),
        }
    }

    /// 设置界面的按键映射
    ///
    /// 1-4 依次为 720p 到 4K，5 为 360p，0 恢复默认的 1280×720。
    pub fn for_key(key: Key) -> Option<Resolution> {
        match key {
            Key::Digit1 => Some(Resolution::Hd),
            Key::Digit2 => Some(Resolution::FullHd),
            Key::Digit3 => Some(Resolution::Qhd),
            Key::Digit4 => Some(Resolution::Uhd),
            Key::Digit5 => Some(Resolution::Nhd),
            Key::Digit0 => Some(Resolution::default()),
            _ => None,
        }
    }

    /// 按像素尺寸查找
    pub fn from_dimensions(width: u32, height: u32) -> Option<Resolution> {
        Self::ALL
            .into_iter()
            .find(|r| r.dimensions() == (width, height))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "{}x{}", w, h)
    }
}
