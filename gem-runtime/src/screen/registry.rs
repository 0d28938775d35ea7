//! 界面注册表：状态 → 构造函数

use std::collections::HashMap;

use super::{Screen, ScreenState};

/// 界面构造函数
pub type ScreenFactory = Box<dyn Fn() -> Box<dyn Screen>>;

/// 界面注册表
///
/// 每次进入某个状态都会构造一个新的界面实例，旧实例在离开时被丢弃。
#[derive(Default)]
pub struct ScreenRegistry {
    factories: HashMap<ScreenState, ScreenFactory>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册（覆盖同状态的旧构造函数）
    pub fn register<F>(&mut self, state: ScreenState, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Screen> + 'static,
    {
        self.factories.insert(state, Box::new(factory));
        self
    }

    pub fn create(&self, state: ScreenState) -> Option<Box<dyn Screen>> {
        self.factories.get(&state).map(|factory| factory())
    }

    pub fn contains(&self, state: ScreenState) -> bool {
        self.factories.contains_key(&state)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ScreenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut states: Vec<_> = self.factories.keys().map(|s| s.name()).collect();
        states.sort_unstable();
        f.debug_struct("ScreenRegistry")
            .field("states", &states)
            .finish()
    }
}
