//! # 主菜单

use tracing::debug;

use crate::gfx::{Blit, Color, Graphics, PreparedTexture, Rect, vertical_gradient};
use crate::input::Key;
use crate::screen::{Frame, LoadContext, Screen, ScreenState};

/// 菜单项：按键、文字、目标状态
pub const MENU_ITEMS: [(Key, &str, ScreenState); 7] = [
    (Key::Enter, "[ENTER] Classic", ScreenState::Classic),
    (Key::Z, "[Z] Zen", ScreenState::Zen),
    (Key::A, "[A] Action", ScreenState::Action),
    (Key::P, "[P] Puzzle", ScreenState::Puzzle),
    (Key::S, "[S] Settings", ScreenState::Settings),
    (Key::C, "[C] Credits", ScreenState::Credits),
    (Key::Escape, "[ESC] Quit", ScreenState::Exit),
];

/// 主菜单界面
#[derive(Debug, Default)]
pub struct MainMenuScreen {
    background: Option<PreparedTexture>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for MainMenuScreen {
    fn name(&self) -> &'static str {
        "main_menu"
    }

    fn load(&mut self, ctx: &mut LoadContext<'_>) {
        let (w, h) = ctx.gfx.screen_size();
        let image = vertical_gradient(
            w.max(1.0) as u32,
            h.max(1.0) as u32,
            Color::DARK_BLUE,
            Color::BLACK,
        );
        let id = ctx.gfx.upload_texture(&image);
        let (width, height) = image.dimensions();
        self.background = Some(PreparedTexture { id, width, height });
        debug!("主菜单加载完成");
    }

    fn unload(&mut self, gfx: &mut dyn Graphics) {
        if let Some(background) = self.background.take() {
            gfx.unload_texture(background.id);
        }
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> Option<ScreenState> {
        MENU_ITEMS
            .iter()
            .find(|(key, _, _)| frame.input.is_pressed(*key))
            .map(|(_, _, state)| *state)
    }

    fn draw(&self, gfx: &mut dyn Graphics) {
        let (w, h) = gfx.screen_size();
        gfx.clear(Color::DARK_BLUE);
        if let Some(background) = &self.background {
            gfx.draw_texture(
                background.id,
                &Blit::stretch(background, Rect::new(0.0, 0.0, w, h)),
            );
        }

        gfx.draw_text_centered("Main Menu", h * 0.25, 48.0, Color::WHITE);

        let line = 32.0;
        let top = h * 0.4;
        for (i, (_, label, _)) in MENU_ITEMS.iter().enumerate() {
            gfx.draw_text_centered(label, top + i as f32 * line, 24.0, Color::LIGHT_GRAY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::HeadlessGraphics;
    use crate::input::InputState;

    fn press(screen: &mut MainMenuScreen, key: Key) -> Option<ScreenState> {
        let mut gfx = HeadlessGraphics::new(800, 600);
        let input = InputState::with_pressed(&[key]);
        let mut frame = Frame {
            dt: 0.016,
            input: &input,
            gfx: &mut gfx,
        };
        screen.update(&mut frame)
    }

    #[test]
    fn test_menu_keys() {
        let mut screen = MainMenuScreen::new();
        assert_eq!(press(&mut screen, Key::Enter), Some(ScreenState::Classic));
        assert_eq!(press(&mut screen, Key::Z), Some(ScreenState::Zen));
        assert_eq!(press(&mut screen, Key::A), Some(ScreenState::Action));
        assert_eq!(press(&mut screen, Key::P), Some(ScreenState::Puzzle));
        assert_eq!(press(&mut screen, Key::S), Some(ScreenState::Settings));
        assert_eq!(press(&mut screen, Key::C), Some(ScreenState::Credits));
        assert_eq!(press(&mut screen, Key::Escape), Some(ScreenState::Exit));
        assert_eq!(press(&mut screen, Key::Digit1), None);
    }

    #[test]
    fn test_draws_every_item() {
        let mut gfx = HeadlessGraphics::new(800, 600);
        let screen = MainMenuScreen::new();
        screen.draw(&mut gfx);

        let text = gfx.drawn_text();
        assert_eq!(text[0], "Main Menu");
        assert_eq!(text.len(), 1 + MENU_ITEMS.len());
    }
}
