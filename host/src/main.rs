//! Gem Remaster - Host
//!
//! 解析命令行、加载配置、安装日志，然后打开 macroquad 窗口（或 headless 运行）。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gem_host::config::parse_log_level;
use gem_host::{AppConfig, FrameLimiter, MacroquadGraphics, Runner, poll_input, run_headless};
use gem_runtime::{HeadlessGraphics, ScreenState};
use macroquad::prelude as mq;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "gem-host")]
#[command(about = "Gem Remaster", long_about = None)]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 初始界面（覆盖配置文件），如 title / main_menu / settings
    #[arg(short, long)]
    screen: Option<ScreenState>,

    /// 不打开窗口运行
    #[arg(long)]
    headless: bool,

    /// headless 模式运行的帧数
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// 日志级别（覆盖配置文件）
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: tracing::Level) {
    if let Err(e) = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
    {
        eprintln!("日志初始化失败: {}", e);
    }
}

fn window_conf(config: &AppConfig) -> mq::Conf {
    mq::Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.width as i32,
        window_height: config.window.height as i32,
        window_resizable: true,
        ..Default::default()
    }
}

async fn run_window(config: AppConfig, initial: ScreenState) {
    let mut gfx = MacroquadGraphics::new();
    let mut runner = Runner::new(&config);
    let mut limiter = FrameLimiter::new(config.window.target_fps);

    runner.start(initial, &mut gfx);

    loop {
        let input = poll_input();
        if !runner.frame(mq::get_frame_time(), &input, &mut gfx) {
            break;
        }
        limiter.wait();
        mq::next_frame().await;
    }

    runner.shutdown(&mut gfx);
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, fallback) = AppConfig::load_with_report(&cli.config);

    let level_name = cli
        .log_level
        .as_deref()
        .unwrap_or(config.debug.log_level.as_str());
    let level = parse_log_level(level_name).unwrap_or(tracing::Level::INFO);
    init_logging(level);

    if let Some(reason) = fallback {
        warn!(error = %reason, "使用默认配置");
    }
    if let Err(e) = config.validate() {
        error!(error = %e, "配置无效");
        return ExitCode::FAILURE;
    }

    let initial = cli.screen.unwrap_or(config.initial_screen);
    info!(
        assets_root = ?config.assets_root,
        converter = %config.converter.program,
        initial = %initial,
        "启动"
    );

    if cli.headless {
        let mut gfx = HeadlessGraphics::new(config.window.width, config.window.height);
        let mut runner = Runner::new(&config);
        runner.start(initial, &mut gfx);
        let frames = run_headless(&mut runner, &mut gfx, cli.frames);
        runner.shutdown(&mut gfx);
        info!(
            frames,
            state = %runner.manager().current_state(),
            live_textures = gfx.live_textures(),
            "headless 运行结束"
        );
        return ExitCode::SUCCESS;
    }

    macroquad::Window::from_config(window_conf(&config), run_window(config, initial));
    ExitCode::SUCCESS
}
