//! # 界面生命周期集成测试
//!
//! 测试 ScreenManager → Screen → AssetPipeline → Graphics 的完整链路。
//! headless 后端充当纹理计数夹具。

mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use common::{FakeTool, touch_title_assets};
use gem_runtime::screen::{Frame, LoadContext, Screen};
use gem_runtime::screens::{SplashScreen, title_spec};
use gem_runtime::{
    AssetPipeline, Color, Graphics, HeadlessGraphics, InputState, Key, ScreenManager,
    ScreenRegistry, ScreenState, TextureId, default_registry,
};
use image::RgbaImage;

type Log = Rc<RefCell<Vec<String>>>;

/// 记录生命周期调用的界面，`load` 时上传两张纹理
struct RecordingScreen {
    name: &'static str,
    log: Log,
    textures: Vec<TextureId>,
    next: Option<(Key, ScreenState)>,
}

impl Screen for RecordingScreen {
    fn name(&self) -> &'static str {
        self.name
    }

    fn load(&mut self, ctx: &mut LoadContext<'_>) {
        self.log.borrow_mut().push(format!("{}:load", self.name));
        for _ in 0..2 {
            self.textures.push(ctx.gfx.upload_texture(&RgbaImage::new(2, 2)));
        }
    }

    fn unload(&mut self, gfx: &mut dyn Graphics) {
        for id in self.textures.drain(..) {
            gfx.unload_texture(id);
        }
        self.log.borrow_mut().push(format!("{}:unload", self.name));
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> Option<ScreenState> {
        self.log.borrow_mut().push(format!("{}:update", self.name));
        match self.next {
            Some((key, state)) if frame.input.is_pressed(key) => Some(state),
            _ => None,
        }
    }

    fn draw(&self, gfx: &mut dyn Graphics) {
        self.log.borrow_mut().push(format!("{}:draw", self.name));
        gfx.clear(Color::BLACK);
    }
}

fn recording_registry(log: &Log) -> ScreenRegistry {
    let mut registry = ScreenRegistry::new();
    let entries = [
        (ScreenState::Title, "title", Some((Key::Enter, ScreenState::MainMenu))),
        (ScreenState::MainMenu, "main_menu", Some((Key::Escape, ScreenState::Exit))),
        (ScreenState::Settings, "settings", None),
    ];
    for (state, name, next) in entries {
        let log = log.clone();
        registry.register(state, move || {
            Box::new(RecordingScreen {
                name,
                log: log.clone(),
                textures: Vec::new(),
                next,
            })
        });
    }
    registry
}

fn recording_manager() -> (ScreenManager, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let manager = ScreenManager::new(recording_registry(&log), AssetPipeline::with_ffmpeg("res"));
    (manager, log)
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

/// 新建的管理器切到主菜单：没有 unload，load 恰好一次
#[test]
fn test_fresh_manager_loads_once() {
    let (mut manager, log) = recording_manager();
    let mut gfx = HeadlessGraphics::new(800, 600);

    manager.change_state(ScreenState::MainMenu, &mut gfx);

    assert_eq!(entries(&log), ["main_menu:load"]);
    assert_eq!(manager.current_state(), ScreenState::MainMenu);
    assert!(manager.has_screen());
}

/// 旧界面的 unload 在新界面的 load 之前完成
#[test]
fn test_unload_precedes_load() {
    let (mut manager, log) = recording_manager();
    let mut gfx = HeadlessGraphics::new(800, 600);

    manager.change_state(ScreenState::Title, &mut gfx);
    manager.change_state(ScreenState::MainMenu, &mut gfx);
    manager.change_state(ScreenState::Settings, &mut gfx);

    assert_eq!(
        entries(&log),
        [
            "title:load",
            "title:unload",
            "main_menu:load",
            "main_menu:unload",
            "settings:load",
        ]
    );
}

/// 重入同一状态会重新执行 unload / load
#[test]
fn test_reenter_same_state() {
    let (mut manager, log) = recording_manager();
    let mut gfx = HeadlessGraphics::new(800, 600);

    manager.change_state(ScreenState::Settings, &mut gfx);
    manager.change_state(ScreenState::Settings, &mut gfx);

    assert_eq!(
        entries(&log),
        ["settings:load", "settings:unload", "settings:load"]
    );
    assert_eq!(gfx.live_textures(), 2);
}

/// 纹理计数：load 之后的纹理在 unload 后全部释放，没有重复释放
#[test]
fn test_textures_released_on_transition() {
    let (mut manager, _log) = recording_manager();
    let mut gfx = HeadlessGraphics::new(800, 600);
    let before = gfx.live_textures();

    manager.change_state(ScreenState::Title, &mut gfx);
    assert_eq!(gfx.live_textures(), before + 2);

    manager.change_state(ScreenState::Exit, &mut gfx);
    assert_eq!(gfx.live_textures(), before);
    assert_eq!(gfx.invalid_unloads(), 0);
}

/// 进入 Exit：卸载当前界面，通知宿主，之后不再转发
#[test]
fn test_exit_stops_forwarding() {
    let (mut manager, log) = recording_manager();
    let mut gfx = HeadlessGraphics::new(800, 600);

    manager.change_state(ScreenState::MainMenu, &mut gfx);
    manager.begin_frame();
    manager.update(0.016, &InputState::with_pressed(&[Key::Escape]), &mut gfx);

    assert!(manager.exit_requested());
    assert!(!manager.has_screen());
    assert_eq!(manager.current_state(), ScreenState::Exit);
    assert_eq!(
        entries(&log),
        ["main_menu:load", "main_menu:update", "main_menu:unload"]
    );

    manager.begin_frame();
    manager.update(0.016, &InputState::new(), &mut gfx);
    manager.draw(&mut gfx);
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(gfx.draw_call_count(), 0);
}

/// 发生切换的那一帧不绘制
#[test]
fn test_draw_suppressed_on_transition_frame() {
    let (mut manager, log) = recording_manager();
    let mut gfx = HeadlessGraphics::new(800, 600);

    manager.change_state(ScreenState::Title, &mut gfx);
    manager.draw(&mut gfx);
    assert!(manager.is_loading());
    assert_eq!(gfx.draw_call_count(), 0);

    // 普通帧
    manager.begin_frame();
    manager.update(0.016, &InputState::new(), &mut gfx);
    manager.draw(&mut gfx);
    assert_eq!(gfx.draw_call_count(), 1);

    // 本帧 update 触发切换
    manager.begin_frame();
    manager.update(0.016, &InputState::with_pressed(&[Key::Enter]), &mut gfx);
    manager.draw(&mut gfx);
    assert_eq!(manager.current_state(), ScreenState::MainMenu);
    assert_eq!(gfx.draw_call_count(), 1);
    assert!(!entries(&log).contains(&"main_menu:draw".to_string()));

    manager.begin_frame();
    manager.draw(&mut gfx);
    assert_eq!(gfx.draw_call_count(), 2);
}

fn title_pipeline(tool: FakeTool) -> (tempfile::TempDir, AssetPipeline) {
    let dir = tempfile::tempdir().unwrap();
    touch_title_assets(dir.path());
    let assets = AssetPipeline::new(dir.path(), Arc::new(tool));
    (dir, assets)
}

/// 标题界面：全部资源可用
#[test]
fn test_title_loads_every_layer() {
    let (_dir, assets) = title_pipeline(FakeTool::new());
    let mut gfx = HeadlessGraphics::new(800, 600);

    let mut spec = title_spec();
    spec.seed = Some(42);
    let mut screen = SplashScreen::new(spec);
    screen.load(&mut LoadContext {
        gfx: &mut gfx,
        assets: &assets,
    });

    assert!(screen.failures().is_empty());
    assert_eq!(
        screen.loaded_layers(),
        ["backdrop", "stars", "logo", "flare", "sparkle"]
    );
    // 渐变 + 背景 + logo + 20 帧 flare + 闪光
    assert_eq!(screen.texture_count(), 24);
    assert_eq!(gfx.live_textures(), 24);

    screen.unload(&mut gfx);
    assert_eq!(gfx.live_textures(), 0);
    assert_eq!(gfx.invalid_unloads(), 0);
}

/// 标题界面：flare 第 7 帧转换失败，该图层整体跳过，其余照常
#[test]
fn test_title_failed_layer_is_skipped() {
    let (_dir, assets) = title_pipeline(FakeTool::new().failing_on("flare_frame_0007"));
    let mut gfx = HeadlessGraphics::new(800, 600);

    let mut screen = SplashScreen::new(title_spec());
    screen.load(&mut LoadContext {
        gfx: &mut gfx,
        assets: &assets,
    });

    assert_eq!(screen.failures().len(), 1);
    let message = screen.failures()[0].to_string();
    assert!(message.contains("flare_frame_0007"));
    assert_eq!(
        screen.loaded_layers(),
        ["backdrop", "stars", "logo", "sparkle"]
    );
    // 失败批次中已上传的 6 帧已被释放
    assert_eq!(gfx.live_textures(), 4);
    assert_eq!(gfx.uploads(), 10);

    screen.unload(&mut gfx);
    assert_eq!(gfx.live_textures(), 0);
}

/// 标题界面：logo 入场动画结束后提示文字出现
#[test]
fn test_title_prompt_appears_after_intro() {
    let (_dir, assets) = title_pipeline(FakeTool::new());
    let mut gfx = HeadlessGraphics::new(800, 600);

    let mut spec = title_spec();
    spec.seed = Some(7);
    let mut screen = SplashScreen::new(spec);
    screen.load(&mut LoadContext {
        gfx: &mut gfx,
        assets: &assets,
    });

    screen.draw(&mut gfx);
    assert!(gfx.drawn_text().is_empty());
    gfx.take_draw_calls();

    let idle = InputState::new();
    for _ in 0..96 {
        let next = screen.update(&mut Frame {
            dt: 1.0 / 60.0,
            input: &idle,
            gfx: &mut gfx,
        });
        assert_eq!(next, None);
    }
    screen.draw(&mut gfx);
    assert_eq!(gfx.drawn_text(), ["Press ENTER to Start"]);

    screen.unload(&mut gfx);
}

/// 默认注册表下走一遍：标题 → 主菜单 → Zen → 主菜单 → 设置 → 主菜单 → 退出
#[test]
fn test_default_screens_walkthrough() {
    let (_dir, assets) = title_pipeline(FakeTool::new());
    let mut gfx = HeadlessGraphics::new(800, 600);
    let mut manager = ScreenManager::new(default_registry(), assets);

    manager.change_state(ScreenState::Title, &mut gfx);
    assert_eq!(gfx.live_textures(), 24);

    let steps = [
        (Key::Enter, ScreenState::MainMenu),
        (Key::Z, ScreenState::Zen),
        (Key::Backspace, ScreenState::MainMenu),
        (Key::S, ScreenState::Settings),
        (Key::Digit5, ScreenState::Settings),
        (Key::Backspace, ScreenState::MainMenu),
        (Key::Escape, ScreenState::Exit),
    ];
    for (key, expected) in steps {
        manager.begin_frame();
        manager.update(1.0 / 60.0, &InputState::with_pressed(&[key]), &mut gfx);
        manager.draw(&mut gfx);
        assert_eq!(manager.current_state(), expected, "按下 {:?} 之后", key);
    }

    assert!(manager.exit_requested());
    assert_eq!(gfx.screen_size(), (640.0, 360.0));
    assert_eq!(gfx.live_textures(), 0);
    assert_eq!(gfx.invalid_unloads(), 0);
}

/// 制作人员滚完后自动回到主菜单
#[test]
fn test_credits_roll_returns_to_menu() {
    let mut gfx = HeadlessGraphics::new(800, 200);
    let mut manager = ScreenManager::new(default_registry(), AssetPipeline::with_ffmpeg("res"));
    manager.change_state(ScreenState::Credits, &mut gfx);

    let idle = InputState::new();
    let mut frames = 0;
    while manager.current_state() == ScreenState::Credits && frames < 10_000 {
        manager.begin_frame();
        manager.update(0.1, &idle, &mut gfx);
        manager.draw(&mut gfx);
        frames += 1;
    }

    assert_eq!(manager.current_state(), ScreenState::MainMenu);
    assert!(frames > 1);
}
