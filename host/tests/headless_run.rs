//! # Headless 运行集成测试
//!
//! 测试 配置文件 → Runner → ScreenManager 的启动链路。
//! 不打开窗口，也不需要 ffmpeg（资源目录为空时不会调用外部工具）。

use gem_host::{AppConfig, ConfigError, Runner, run_headless};
use gem_runtime::{HeadlessGraphics, ScreenState};

fn empty_assets_config() -> (tempfile::TempDir, AppConfig) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.assets_root = dir.path().join("res");
    std::fs::create_dir_all(&config.assets_root).unwrap();
    config.converter.program = "ffmpeg-not-installed".to_string();
    (dir, config)
}

/// 配置保存后再加载，内容不变
#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = AppConfig::default();
    config.initial_screen = ScreenState::Credits;
    config.window.width = 1280;
    config.window.height = 720;
    config.save(&path).unwrap();

    let (loaded, fallback) = AppConfig::load_with_report(&path);
    assert_eq!(fallback, None);
    assert_eq!(loaded, config);
}

/// 配置文件缺失或损坏时回退到默认值
#[test]
fn test_config_fallbacks() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    let (config, fallback) = AppConfig::load_with_report(&missing);
    assert_eq!(config, AppConfig::default());
    assert_eq!(fallback, Some(ConfigError::NotFound(missing)));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    let (config, fallback) = AppConfig::load_with_report(&broken);
    assert_eq!(config, AppConfig::default());
    assert!(matches!(fallback, Some(ConfigError::Parse(_))));
}

/// 标题界面资源缺失：界面照常运行，只持有生成的纹理，退出时全部释放
#[test]
fn test_headless_title_without_assets() {
    let (_dir, config) = empty_assets_config();
    let mut gfx = HeadlessGraphics::new(config.window.width, config.window.height);
    let mut runner = Runner::new(&config);

    runner.start(ScreenState::Title, &mut gfx);
    let frames = run_headless(&mut runner, &mut gfx, 30);

    assert_eq!(frames, 30);
    assert_eq!(runner.manager().current_state(), ScreenState::Title);
    // 渐变 + 闪光
    assert_eq!(gfx.live_textures(), 2);

    runner.shutdown(&mut gfx);
    assert_eq!(gfx.live_textures(), 0);
    assert_eq!(gfx.invalid_unloads(), 0);
}

/// 长时间 headless 运行时绘制记录不会累积
#[test]
fn test_headless_draw_log_stays_bounded() {
    let (_dir, config) = empty_assets_config();
    let mut gfx = HeadlessGraphics::new(800, 600);
    let mut runner = Runner::new(&config);
    runner.start(ScreenState::Title, &mut gfx);

    run_headless(&mut runner, &mut gfx, 100);
    let short_run = gfx.draw_call_count();
    run_headless(&mut runner, &mut gfx, 1000);
    let long_run = gfx.draw_call_count();

    assert_eq!(runner.frames(), 1100);
    assert!(short_run > 0);
    // 只剩最后一帧：清屏 + 渐变 + 星空 + 闪光 + 提示文字
    assert!(long_run < 100, "draw calls retained: {}", long_run);

    runner.shutdown(&mut gfx);
}

/// 从 Exit 启动：不运行任何帧
#[test]
fn test_headless_exit_immediately() {
    let (_dir, config) = empty_assets_config();
    let mut gfx = HeadlessGraphics::new(800, 600);
    let mut runner = Runner::new(&config);

    runner.start(ScreenState::Exit, &mut gfx);
    assert!(runner.manager().exit_requested());
    assert_eq!(run_headless(&mut runner, &mut gfx, 10), 0);
}

/// 制作人员在 headless 下自动滚完回到主菜单
#[test]
fn test_headless_credits_return_to_menu() {
    let (_dir, config) = empty_assets_config();
    let mut gfx = HeadlessGraphics::new(800, 120);
    let mut runner = Runner::new(&config);

    runner.start(ScreenState::Credits, &mut gfx);
    run_headless(&mut runner, &mut gfx, 60 * 20);

    assert_eq!(runner.manager().current_state(), ScreenState::MainMenu);
    assert!(runner.manager().has_screen());
}
