//! # 设置界面
//!
//! 数字键切换窗口分辨率，立即生效，不保存。

use tracing::info;

use crate::gfx::{Color, Graphics};
use crate::input::Key;
use crate::resolution::Resolution;
use crate::screen::{Frame, LoadContext, Screen, ScreenState};

const RESOLUTION_KEYS: [Key; 6] = [
    Key::Digit1,
    Key::Digit2,
    Key::Digit3,
    Key::Digit4,
    Key::Digit5,
    Key::Digit0,
];

/// 设置界面
#[derive(Debug, Default)]
pub struct SettingsScreen {
    /// 当前窗口尺寸
    current: (u32, u32),
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前分辨率（窗口尺寸不在列表中时为 `None`）
    pub fn resolution(&self) -> Option<Resolution> {
        Resolution::from_dimensions(self.current.0, self.current.1)
    }

    fn apply(&mut self, resolution: Resolution, gfx: &mut dyn Graphics) {
        let (w, h) = resolution.dimensions();
        gfx.set_window_size(w, h);
        self.current = (w, h);
        info!(resolution = %resolution, "分辨率已修改");
    }
}

impl Screen for SettingsScreen {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn load(&mut self, ctx: &mut LoadContext<'_>) {
        let (w, h) = ctx.gfx.screen_size();
        self.current = (w as u32, h as u32);
    }

    fn unload(&mut self, _gfx: &mut dyn Graphics) {}

    fn update(&mut self, frame: &mut Frame<'_>) -> Option<ScreenState> {
        let chosen = RESOLUTION_KEYS
            .into_iter()
            .find(|key| frame.input.is_pressed(*key))
            .and_then(Resolution::for_key);

        if let Some(resolution) = chosen {
            self.apply(resolution, frame.gfx);
            return None;
        }

        if frame.input.is_pressed(Key::Backspace) {
            return Some(ScreenState::MainMenu);
        }
        None
    }

    fn draw(&self, gfx: &mut dyn Graphics) {
        let (_, h) = gfx.screen_size();
        gfx.clear(Color::WHITE);
        gfx.draw_text_centered("Settings", h * 0.2, 40.0, Color::BLACK);

        let current = format!("Current: {}x{}", self.current.0, self.current.1);
        gfx.draw_text_centered(&current, h * 0.3, 24.0, Color::DARK_BLUE);

        let mut y = h * 0.4;
        for key in RESOLUTION_KEYS {
            if let Some(resolution) = Resolution::for_key(key) {
                let digit = key_digit(key);
                let label = if key == Key::Digit0 {
                    format!("Press {} to reset to {}", digit, resolution)
                } else {
                    format!("Press {} for {}", digit, resolution)
                };
                gfx.draw_text_centered(&label, y, 20.0, Color::GRAY);
                y += 30.0;
            }
        }
        gfx.draw_text_centered(
            "Press BACKSPACE to return to Main Menu",
            y + 30.0,
            20.0,
            Color::GRAY,
        );
    }
}

fn key_digit(key: Key) -> char {
    match key {
        Key::Digit0 => '0',
        Key::Digit1 => '1',
        Key::Digit2 => '2',
        Key::Digit3 => '3',
        Key::Digit4 => '4',
        Key::Digit5 => '5',
        _ => '?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::HeadlessGraphics;
    use crate::input::InputState;

    fn step(screen: &mut SettingsScreen, gfx: &mut HeadlessGraphics, key: Key) -> Option<ScreenState> {
        let input = InputState::with_pressed(&[key]);
        let mut frame = Frame {
            dt: 0.016,
            input: &input,
            gfx,
        };
        screen.update(&mut frame)
    }

    #[test]
    fn test_resolution_keys_resize_window() {
        let mut gfx = HeadlessGraphics::new(800, 600);
        let mut screen = SettingsScreen::new();
        assert_eq!(screen.resolution(), None);

        assert_eq!(step(&mut screen, &mut gfx, Key::Digit2), None);
        assert_eq!(gfx.screen_size(), (1920.0, 1080.0));
        assert_eq!(screen.resolution(), Some(Resolution::FullHd));

        step(&mut screen, &mut gfx, Key::Digit5);
        assert_eq!(gfx.screen_size(), (640.0, 360.0));

        step(&mut screen, &mut gfx, Key::Digit0);
        assert_eq!(gfx.screen_size(), (1280.0, 720.0));
    }

    #[test]
    fn test_backspace_returns_to_menu() {
        let mut gfx = HeadlessGraphics::new(800, 600);
        let mut screen = SettingsScreen::new();
        assert_eq!(
            step(&mut screen, &mut gfx, Key::Backspace),
            Some(ScreenState::MainMenu)
        );
        assert_eq!(gfx.screen_size(), (800.0, 600.0));
    }

    #[test]
    fn test_shows_current_resolution() {
        let mut gfx = HeadlessGraphics::new(800, 600);
        let mut screen = SettingsScreen::new();
        step(&mut screen, &mut gfx, Key::Digit3);
        gfx.take_draw_calls();

        screen.draw(&mut gfx);
        let text = gfx.drawn_text();
        assert!(text.contains(&"Current: 2560x1440"));
        assert!(text.contains(&"Press 0 to reset to 1280x720"));
    }
}
