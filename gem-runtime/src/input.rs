//! # Input 模块
//!
//! Host 每帧采集的按键快照。
//!
//! Runtime 不直接读取键盘，只处理宿主传入的 [`InputState`]。

use std::collections::HashSet;

/// 界面关心的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Backspace,
    Escape,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    A,
    C,
    P,
    S,
    Z,
}

impl Key {
    /// 所有按键（宿主按此列表轮询）
    pub const ALL: [Key; 14] = [
        Key::Enter,
        Key::Backspace,
        Key::Escape,
        Key::Digit0,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Digit4,
        Key::Digit5,
        Key::A,
        Key::C,
        Key::P,
        Key::S,
        Key::Z,
    ];
}

/// 本帧按下的按键
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只按下了给定按键的快照
    pub fn with_pressed(keys: &[Key]) -> Self {
        Self {
            pressed: keys.iter().copied().collect(),
        }
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    /// 按键是否在本帧被按下
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state() {
        let mut input = InputState::new();
        assert!(input.is_empty());

        input.press(Key::Enter);
        assert!(input.is_pressed(Key::Enter));
        assert!(!input.is_pressed(Key::Escape));

        let input = InputState::with_pressed(&[Key::Digit1, Key::Backspace]);
        assert!(input.is_pressed(Key::Digit1));
        assert!(input.is_pressed(Key::Backspace));
    }
}
