//! # Screen 模块
//!
//! 界面抽象与界面状态机。
//!
//! ## 生命周期
//!
//! ```text
//! registry.create(state) → load(ctx) → [update / draw]* → unload(gfx)
//! ```
//!
//! 界面在 `load` 中分配的所有纹理都归它自己所有，必须在 `unload` 中全部释放；
//! 纹理不会比分配它的界面实例活得更久。

mod manager;
mod registry;

pub use manager::ScreenManager;
pub use registry::{ScreenFactory, ScreenRegistry};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::AssetPipeline;
use crate::gfx::Graphics;
use crate::input::InputState;

/// 界面状态
///
/// 序列化名与 [`ScreenState::name`] 一致（`snake_case`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    /// 标题（启动画面）
    #[default]
    Title,
    MainMenu,
    Classic,
    Zen,
    Action,
    Puzzle,
    Settings,
    Credits,
    /// 终止状态：宿主关闭窗口
    Exit,
}

impl ScreenState {
    pub const ALL: [ScreenState; 9] = [
        ScreenState::Title,
        ScreenState::MainMenu,
        ScreenState::Classic,
        ScreenState::Zen,
        ScreenState::Action,
        ScreenState::Puzzle,
        ScreenState::Settings,
        ScreenState::Credits,
        ScreenState::Exit,
    ];

    /// 配置文件 / 命令行中使用的名字
    pub fn name(self) -> &'static str {
        match self {
            ScreenState::Title => "title",
            ScreenState::MainMenu => "main_menu",
            ScreenState::Classic => "classic",
            ScreenState::Zen => "zen",
            ScreenState::Action => "action",
            ScreenState::Puzzle => "puzzle",
            ScreenState::Settings => "settings",
            ScreenState::Credits => "credits",
            ScreenState::Exit => "exit",
        }
    }

    /// 对应的游戏模式（只有四个游戏状态有）
    pub fn game_mode(self) -> Option<GameMode> {
        match self {
            ScreenState::Classic => Some(GameMode::Classic),
            ScreenState::Zen => Some(GameMode::Zen),
            ScreenState::Action => Some(GameMode::Action),
            ScreenState::Puzzle => Some(GameMode::Puzzle),
            _ => None,
        }
    }
}

impl fmt::Display for ScreenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 无法识别的界面名
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知的界面: '{0}'")]
pub struct ParseScreenStateError(pub String);

impl FromStr for ScreenState {
    type Err = ParseScreenStateError;

    /// 大小写不敏感，`-` 与 `_` 等价（`main-menu` / `MainMenu` / `main_menu`）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        ScreenState::ALL
            .into_iter()
            .find(|state| state.name().replace('_', "") == normalized)
            .ok_or_else(|| ParseScreenStateError(s.to_string()))
    }
}

/// 游戏模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Classic,
    Zen,
    Action,
    Puzzle,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Zen,
        GameMode::Action,
        GameMode::Puzzle,
    ];

    /// 显示名
    pub fn title(self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Zen => "Zen",
            GameMode::Action => "Action",
            GameMode::Puzzle => "Puzzle",
        }
    }

    pub fn state(self) -> ScreenState {
        match self {
            GameMode::Classic => ScreenState::Classic,
            GameMode::Zen => ScreenState::Zen,
            GameMode::Action => ScreenState::Action,
            GameMode::Puzzle => ScreenState::Puzzle,
        }
    }
}

/// `load` 期间界面可用的资源
pub struct LoadContext<'a> {
    pub gfx: &'a mut dyn Graphics,
    pub assets: &'a AssetPipeline,
}

/// 一帧的更新上下文
pub struct Frame<'a> {
    /// 距上一帧的时间（秒）
    pub dt: f32,
    pub input: &'a InputState,
    /// 设置界面需要通过它修改窗口尺寸
    pub gfx: &'a mut dyn Graphics,
}

/// 界面
///
/// 资源加载失败不会向上传播：界面自行记录错误（`tracing::error!`），
/// 缺失的纹理不绘制，界面照常成为当前界面。
pub trait Screen {
    /// 界面名（日志用）
    fn name(&self) -> &'static str;

    /// 分配资源
    fn load(&mut self, ctx: &mut LoadContext<'_>);

    /// 释放 `load` 中分配的全部资源
    fn unload(&mut self, gfx: &mut dyn Graphics);

    /// 推进一帧；返回 `Some(state)` 请求切换界面
    fn update(&mut self, frame: &mut Frame<'_>) -> Option<ScreenState>;

    fn draw(&self, gfx: &mut dyn Graphics);
}
