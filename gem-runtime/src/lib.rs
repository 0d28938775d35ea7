//! # Gem Runtime
//!
//! 宝石消除重制版的界面运行时：界面状态机 + 资源准备流水线。
//!
//! ## 架构概述
//!
//! `gem-runtime` 不依赖任何窗口或渲染库，渲染和输入都由宿主（Host）注入：
//!
//! ```text
//! Host                              Runtime
//!   │                                  │
//!   │── begin_frame() ───────────────►│
//!   │── update(dt, &InputState, gfx) ─►│ ScreenManager ─► 当前 Screen
//!   │── draw(gfx) ───────────────────►│                     │ load()
//!   │◄── exit_requested() ─────────────│        AssetPipeline ◄┘
//!   │                                  │  (jxl → ffmpeg → png → 纹理)
//! ```
//!
//! ## 核心类型
//!
//! - [`ScreenManager`]：持有唯一的活动界面，负责有序切换
//! - [`Screen`]：界面的 load / unload / update / draw
//! - [`AssetPipeline`]：外部工具转换 + 遮罩合成 + 纹理上传
//! - [`Graphics`]：渲染层接口，[`HeadlessGraphics`] 是不开窗口的实现
//!
//! ## 使用示例
//!
//! ```ignore
//! use gem_runtime::{AssetPipeline, HeadlessGraphics, InputState, ScreenManager, ScreenState};
//!
//! let mut gfx = HeadlessGraphics::new(800, 600);
//! let mut manager = ScreenManager::new(default_registry(), AssetPipeline::with_ffmpeg("res"));
//! manager.change_state(ScreenState::Title, &mut gfx);
//!
//! while !manager.exit_requested() {
//!     manager.begin_frame();
//!     manager.update(1.0 / 60.0, &InputState::new(), &mut gfx);
//!     manager.draw(&mut gfx);
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`screen`]：界面抽象、注册表、管理器
//! - [`screens`]：具体界面
//! - [`assets`]：资源准备流水线
//! - [`animation`]：缓动、时间轴、星空、闪光、帧序列
//! - [`gfx`]：渲染抽象与 headless 后端
//! - [`input`]：按键快照
//! - [`resolution`]：可选分辨率
//! - [`error`]：错误类型定义

pub mod animation;
pub mod assets;
pub mod error;
pub mod gfx;
pub mod input;
pub mod resolution;
pub mod screen;
pub mod screens;

// 重导出核心类型
pub use assets::{AssetPipeline, AssetRequest, ConversionTool, FfmpegTool, ToolRun};
pub use error::{AssetError, AssetResult, BatchError, ScreenError};
pub use gfx::{Blit, Color, Graphics, HeadlessGraphics, PreparedTexture, Rect, TextureId, Vec2};
pub use input::{InputState, Key};
pub use resolution::Resolution;
pub use screen::{
    Frame, GameMode, LoadContext, ParseScreenStateError, Screen, ScreenManager, ScreenRegistry,
    ScreenState,
};
pub use screens::default_registry;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let mut gfx = HeadlessGraphics::new(800, 600);
        let mut manager = ScreenManager::new(default_registry(), AssetPipeline::with_ffmpeg("res"));

        manager.change_state(ScreenState::Settings, &mut gfx);
        assert_eq!(manager.current_state(), ScreenState::Settings);

        manager.begin_frame();
        manager.update(0.016, &InputState::with_pressed(&[Key::Digit2]), &mut gfx);
        assert_eq!(gfx.screen_size(), (1920.0, 1080.0));

        let _resolution = Resolution::default();
    }
}
