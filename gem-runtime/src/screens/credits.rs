//! # 制作人员
//!
//! 从底部向上滚动的名单，滚完自动回到主菜单。

use crate::gfx::{Color, Graphics};
use crate::input::Key;
use crate::screen::{Frame, LoadContext, Screen, ScreenState};

pub const CREDIT_LINES: &[&str] = &[
    "Gem Remaster",
    "",
    "Programming",
    "The Remaster Team",
    "",
    "Based on",
    "Bejeweled 2",
    "",
    "Built with Rust",
    "",
    "Thanks for playing!",
];

const LINE_HEIGHT: f32 = 36.0;
const TEXT_SIZE: f32 = 26.0;

/// 制作人员界面
#[derive(Debug)]
pub struct CreditsScreen {
    lines: Vec<String>,
    /// 滚动速度（像素/秒）
    speed: f32,
    /// 第一行的基线位置
    offset: f32,
}

impl Default for CreditsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CreditsScreen {
    pub fn new() -> Self {
        Self::with_lines(CREDIT_LINES.iter().map(|s| s.to_string()).collect(), 60.0)
    }

    pub fn with_lines(lines: Vec<String>, speed: f32) -> Self {
        Self {
            lines,
            speed,
            offset: 0.0,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// 最后一行是否已越过顶部
    pub fn is_finished(&self) -> bool {
        self.offset + self.lines.len() as f32 * LINE_HEIGHT < 0.0
    }
}

impl Screen for CreditsScreen {
    fn name(&self) -> &'static str {
        "credits"
    }

    fn load(&mut self, ctx: &mut LoadContext<'_>) {
        let (_, h) = ctx.gfx.screen_size();
        self.offset = h;
    }

    fn unload(&mut self, _gfx: &mut dyn Graphics) {}

    fn update(&mut self, frame: &mut Frame<'_>) -> Option<ScreenState> {
        if frame.input.is_pressed(Key::Enter) || frame.input.is_pressed(Key::Backspace) {
            return Some(ScreenState::MainMenu);
        }

        self.offset -= self.speed * frame.dt;
        if self.is_finished() {
            return Some(ScreenState::MainMenu);
        }
        None
    }

    fn draw(&self, gfx: &mut dyn Graphics) {
        let (_, h) = gfx.screen_size();
        gfx.clear(Color::BLACK);

        for (i, line) in self.lines.iter().enumerate() {
            let y = self.offset + i as f32 * LINE_HEIGHT;
            if line.is_empty() || y < 0.0 || y > h + LINE_HEIGHT {
                continue;
            }
            gfx.draw_text_centered(line, y, TEXT_SIZE, Color::WHITE);
        }
    }
}
