//! # 界面实现
//!
//! 标题（启动画面）、主菜单、游戏、设置、制作人员。

pub mod credits;
pub mod gameplay;
pub mod main_menu;
pub mod settings;
pub mod splash;
pub mod title;

pub use credits::CreditsScreen;
pub use gameplay::GameplayScreen;
pub use main_menu::MainMenuScreen;
pub use settings::SettingsScreen;
pub use splash::{LayerKind, LayerSpec, PromptSpec, SparkleLayer, SplashScreen, SplashSpec, SpriteMotion};
pub use title::{title_screen, title_spec};

use crate::screen::{GameMode, ScreenRegistry, ScreenState};

/// 注册所有界面（`Exit` 不需要界面）
pub fn default_registry() -> ScreenRegistry {
    let mut registry = ScreenRegistry::new();
    registry
        .register(ScreenState::Title, || Box::new(title_screen()))
        .register(ScreenState::MainMenu, || Box::new(MainMenuScreen::new()))
        .register(ScreenState::Settings, || Box::new(SettingsScreen::new()))
        .register(ScreenState::Credits, || Box::new(CreditsScreen::new()));

    for mode in GameMode::ALL {
        registry.register(mode.state(), move || Box::new(GameplayScreen::new(mode)));
    }
    registry
}
