//! # Input 模块
//!
//! 每帧采集 macroquad 的键盘事件，转换为 runtime 的 [`InputState`]。
//!
//! 只关心 "本帧刚按下"，不处理长按和重复。

use gem_runtime::{InputState, Key};
use macroquad::prelude::{KeyCode, is_key_pressed};

/// 按键对应的 macroquad 键码（第一个为主键）
pub fn key_codes(key: Key) -> &'static [KeyCode] {
    match key {
        Key::Enter => &[KeyCode::Enter, KeyCode::KpEnter],
        Key::Backspace => &[KeyCode::Backspace],
        Key::Escape => &[KeyCode::Escape],
        Key::Digit0 => &[KeyCode::Key0, KeyCode::Kp0],
        Key::Digit1 => &[KeyCode::Key1, KeyCode::Kp1],
        Key::Digit2 => &[KeyCode::Key2, KeyCode::Kp2],
        Key::Digit3 => &[KeyCode::Key3, KeyCode::Kp3],
        Key::Digit4 => &[KeyCode::Key4, KeyCode::Kp4],
        Key::Digit5 => &[KeyCode::Key5, KeyCode::Kp5],
        Key::A => &[KeyCode::A],
        Key::C => &[KeyCode::C],
        Key::P => &[KeyCode::P],
        Key::S => &[KeyCode::S],
        Key::Z => &[KeyCode::Z],
    }
}

/// 根据 "某个键码是否刚按下" 构造快照
pub fn collect_input(mut pressed: impl FnMut(KeyCode) -> bool) -> InputState {
    let mut input = InputState::new();
    for key in Key::ALL {
        if key_codes(key).iter().any(|code| pressed(*code)) {
            input.press(key);
        }
    }
    input
}

/// 采集本帧输入（需要在 macroquad 窗口内调用）
pub fn poll_input() -> InputState {
    collect_input(is_key_pressed)
}
