//! # Asset Converter
//!
//! 资源转换工具 - 把资源目录下的 `.jxl` 素材预先转换为同名 `.png`，
//! 避免运行时第一次进入界面时才调用外部工具。
//!
//! ## 用法
//!
//! ```bash
//! # 在项目根目录使用 cargo 运行
//! cargo run -p asset-converter -- convert
//! cargo run -p asset-converter -- convert --input res --program ffmpeg --force
//! cargo run -p asset-converter -- check
//! cargo run -p asset-converter -- list
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gem_runtime::assets::{
    SOURCE_EXTENSION, composite_with_mask, load_mask, load_raster, raster_path_for,
};
use gem_runtime::screens::title::{TITLE_LOGO, TITLE_LOGO_MASK};
use gem_runtime::{AssetPipeline, FfmpegTool};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "converter")]
#[command(about = "资源转换工具 - 把 JXL 素材预先转换为 PNG")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 资源根目录（默认：res）
    #[arg(short, long, default_value = "res", global = true)]
    input: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// 转换所有 JXL 素材
    Convert {
        /// 外部转换工具
        #[arg(short, long, default_value = "ffmpeg")]
        program: String,

        /// 即使 PNG 比源文件新也重新转换
        #[arg(short, long)]
        force: bool,
    },

    /// 检查缺失的 PNG 和标题 logo 的遮罩尺寸
    Check,

    /// 列出所有 JXL 素材及其转换状态
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Convert { program, force } => convert_all(&cli.input, program, *force),
        Commands::Check => check(&cli.input),
        Commands::List => list(&cli.input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// 收集资源根目录下所有 JXL 文件（相对路径，已排序）
fn collect_sources(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("资源目录不存在: {:?}", root);
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let is_source = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION));
        if is_source {
            sources.push(path.strip_prefix(root)?.to_path_buf());
        }
    }
    sources.sort();
    Ok(sources)
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// PNG 存在且不比源文件旧
fn is_up_to_date(source: &Path) -> bool {
    match (modified(source), modified(&raster_path_for(source))) {
        (Some(src), Some(png)) => png >= src,
        _ => false,
    }
}

/// 还没有 PNG 的源文件（相对路径）
fn missing_rasters(root: &Path, sources: &[PathBuf]) -> Vec<PathBuf> {
    sources
        .iter()
        .filter(|rel| !raster_path_for(&root.join(rel)).is_file())
        .cloned()
        .collect()
}

fn convert_all(root: &Path, program: &str, force: bool) -> anyhow::Result<()> {
    println!("🔄 转换资源: {:?} (工具: {})", root, program);

    let sources = collect_sources(root)?;
    let pipeline = AssetPipeline::new(root, Arc::new(FfmpegTool::new(program)));

    let mut converted = 0;
    let mut skipped = 0;
    let mut failed = Vec::new();

    for rel in &sources {
        if !force && is_up_to_date(&root.join(rel)) {
            skipped += 1;
            continue;
        }
        match pipeline.convert_to_raster(rel) {
            Ok(_) => {
                converted += 1;
                println!("  + {}", rel.display());
            }
            Err(e) => {
                println!("  ! {} ({})", rel.display(), e.kind());
                failed.push((rel.clone(), e));
            }
        }
    }

    println!();
    println!("   源文件: {}", sources.len());
    println!("   已转换: {}", converted);
    println!("   已跳过: {}", skipped);

    if !failed.is_empty() {
        println!("❌ 失败 {} 个:", failed.len());
        for (rel, e) in &failed {
            println!("   - {}: {}", rel.display(), e);
        }
        anyhow::bail!("{} 个素材转换失败", failed.len());
    }

    println!("✅ 转换完成！");
    Ok(())
}

fn check(root: &Path) -> anyhow::Result<()> {
    println!("🔍 检查资源: {:?}", root);

    let sources = collect_sources(root)?;
    let mut problems = Vec::new();

    for rel in missing_rasters(root, &sources) {
        problems.push(format!("缺少 PNG: {}", rel.display()));
    }

    let logo = raster_path_for(&root.join(TITLE_LOGO));
    let mask = raster_path_for(&root.join(TITLE_LOGO_MASK));
    if logo.is_file() && mask.is_file() {
        let base = load_raster(&logo).with_context(|| format!("读取 {:?}", logo))?;
        let mask = load_mask(&mask).with_context(|| format!("读取 {:?}", mask))?;
        if let Err(e) = composite_with_mask(&base, &mask) {
            problems.push(format!("标题 logo: {}", e));
        }
    }

    if problems.is_empty() {
        println!("✅ 检查通过！共 {} 个源文件", sources.len());
        return Ok(());
    }

    println!("❌ 发现 {} 个问题:", problems.len());
    for problem in &problems {
        println!("   - {}", problem);
    }
    anyhow::bail!("资源检查未通过")
}

fn list(root: &Path) -> anyhow::Result<()> {
    println!("📋 资源列表: {:?}", root);
    println!();

    let sources = collect_sources(root)?;
    println!("{:<60} {:>10}", "源文件", "状态");
    println!("{}", "-".repeat(72));
    for rel in &sources {
        let source = root.join(rel);
        let status = if is_up_to_date(&source) {
            "ok"
        } else if raster_path_for(&source).is_file() {
            "stale"
        } else {
            "missing"
        };
        println!("{:<60} {:>10}", rel.display(), status);
    }
    println!("{}", "-".repeat(72));
    println!("共 {} 个源文件", sources.len());
    Ok(())
}
