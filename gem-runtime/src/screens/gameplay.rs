//! # 游戏界面
//!
//! 四种模式共用的占位界面：加载游戏背景，显示模式名。没有游戏规则。

use tracing::error;

use crate::assets::AssetRequest;
use crate::error::ScreenError;
use crate::gfx::{Blit, Color, Graphics, PreparedTexture, Rect};
use crate::input::Key;
use crate::screen::{Frame, GameMode, LoadContext, Screen, ScreenState};

pub const GAME_BACKDROP: &str = "images/backdrops/backdrop_title_A.jxl";

/// 游戏界面
#[derive(Debug)]
pub struct GameplayScreen {
    mode: GameMode,
    backdrop: Option<PreparedTexture>,
    failure: Option<ScreenError>,
}

impl GameplayScreen {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            backdrop: None,
            failure: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// 背景加载失败的原因
    pub fn failure(&self) -> Option<&ScreenError> {
        self.failure.as_ref()
    }
}

impl Screen for GameplayScreen {
    fn name(&self) -> &'static str {
        "gameplay"
    }

    fn load(&mut self, ctx: &mut LoadContext<'_>) {
        let request = AssetRequest::new(GAME_BACKDROP);
        match ctx.assets.load_texture(&request, ctx.gfx) {
            Ok(texture) => self.backdrop = Some(texture),
            Err(source) => {
                let e = ScreenError::LoadFailure {
                    screen: self.name(),
                    asset: GAME_BACKDROP.to_string(),
                    source,
                };
                error!(mode = self.mode.title(), error = %e, "游戏背景加载失败");
                self.failure = Some(e);
            }
        }
    }

    fn unload(&mut self, gfx: &mut dyn Graphics) {
        if let Some(backdrop) = self.backdrop.take() {
            gfx.unload_texture(backdrop.id);
        }
        self.failure = None;
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> Option<ScreenState> {
        if frame.input.is_pressed(Key::Backspace) || frame.input.is_pressed(Key::Escape) {
            return Some(ScreenState::MainMenu);
        }
        None
    }

    fn draw(&self, gfx: &mut dyn Graphics) {
        let (w, h) = gfx.screen_size();
        gfx.clear(Color::WHITE);
        if let Some(backdrop) = &self.backdrop {
            gfx.draw_texture(
                backdrop.id,
                &Blit::stretch(backdrop, Rect::new(0.0, 0.0, w, h)),
            );
        }
        gfx.draw_text_centered(self.mode.title(), h * 0.1, 40.0, Color::GOLD);
        gfx.draw_text_centered(
            "Press BACKSPACE to return to Main Menu",
            h * 0.95,
            20.0,
            Color::GRAY,
        );
    }
}
