//! 集成测试共用的夹具：不依赖 ffmpeg 的假转换工具。

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use gem_runtime::{AssetResult, ConversionTool, ToolRun};
use image::{GrayImage, Luma, Rgba, RgbaImage};

/// 假转换工具
///
/// - 文件名包含 `fail_on` 中任一片段 → 非零退出
/// - 文件名包含 `silent_on` 中任一片段 → 零退出但不写输出
/// - 文件名包含 `mask` → 写出灰度 PNG（亮度 = x * 16）
/// - 其余 → 写出 `size` 大小的不透明 RGBA PNG
pub struct FakeTool {
    pub size: (u32, u32),
    pub mask_size: (u32, u32),
    pub fail_on: Vec<String>,
    pub silent_on: Vec<String>,
    calls: Mutex<Vec<PathBuf>>,
}

impl FakeTool {
    pub fn new() -> Self {
        Self {
            size: (16, 16),
            mask_size: (16, 16),
            fail_on: Vec::new(),
            silent_on: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, fragment: &str) -> Self {
        self.fail_on.push(fragment.to_string());
        self
    }

    pub fn silent_on(mut self, fragment: &str) -> Self {
        self.silent_on.push(fragment.to_string());
        self
    }

    pub fn with_mask_size(mut self, width: u32, height: u32) -> Self {
        self.mask_size = (width, height);
        self
    }

    /// 每次调用的源文件
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

fn name_matches(path: &Path, fragments: &[String]) -> bool {
    let name = path.file_name().unwrap().to_string_lossy();
    fragments.iter().any(|f| name.contains(f.as_str()))
}

impl ConversionTool for FakeTool {
    fn program(&self) -> &str {
        "fake-ffmpeg"
    }

    fn convert(&self, source: &Path, output: &Path) -> AssetResult<ToolRun> {
        self.calls.lock().unwrap().push(source.to_path_buf());

        if name_matches(source, &self.fail_on) {
            return Ok(ToolRun {
                success: false,
                code: Some(1),
                diagnostics: vec![format!("{}: Invalid data found when processing input", source.display())],
            });
        }

        if !name_matches(source, &self.silent_on) {
            let is_mask = source.file_name().unwrap().to_string_lossy().contains("mask");
            if is_mask {
                let (w, h) = self.mask_size;
                GrayImage::from_fn(w, h, |x, _| Luma([(x * 16).min(255) as u8]))
                    .save(output)
                    .unwrap();
            } else {
                let (w, h) = self.size;
                RgbaImage::from_pixel(w, h, Rgba([200, 100, 50, 255]))
                    .save(output)
                    .unwrap();
            }
        }

        Ok(ToolRun {
            success: true,
            code: Some(0),
            diagnostics: vec!["frame=    1 fps=0.0".to_string()],
        })
    }
}

/// 在 `root` 下创建空的源文件
pub fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"\xff\x0a").unwrap();
    path
}

/// 创建标题界面需要的全部源文件
pub fn touch_title_assets(root: &Path) {
    touch(root, gem_runtime::screens::title::TITLE_BACKDROP);
    touch(root, gem_runtime::screens::title::TITLE_LOGO);
    touch(root, gem_runtime::screens::title::TITLE_LOGO_MASK);
    for n in 1..=gem_runtime::screens::title::TITLE_FLARE_FRAMES {
        touch(
            root,
            &gem_runtime::assets::frame_path(gem_runtime::screens::title::TITLE_FLARE_STEM, n),
        );
    }
}
