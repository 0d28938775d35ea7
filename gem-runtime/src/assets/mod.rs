//! # Assets 模块
//!
//! 资源准备流水线：JXL 源文件 → 外部工具转换为 PNG → （可选）遮罩合成 → 上传纹理。
//!
//! ## 路径约定
//!
//! - 请求中的路径是**逻辑路径**，相对于资源根目录（默认 `res`），如
//!   `images/backdrops/backdrop_title_A.jxl`
//! - 每个 `.jxl` 旁边会生成同名的 `.png`
//! - 帧序列按 `<stem>_frame_0001.jxl`、`<stem>_frame_0002.jxl` ... 编号
//!
//! ## 失败语义
//!
//! [`AssetPipeline::load_texture_set`] 顺序执行、遇错即停，不回滚已上传的纹理，
//! 而是通过 [`BatchError::completed`] 交还给调用方。

mod convert;
mod mask;

pub use convert::{
    ConversionTool, FfmpegTool, RASTER_EXTENSION, ToolRun, conversion_args, partial_path_for,
    raster_path_for,
};
pub use mask::{composite_with_mask, load_mask, load_raster};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use tracing::{debug, info};

use crate::error::{AssetError, AssetResult, BatchError};
use crate::gfx::{Graphics, PreparedTexture};

/// 源素材的扩展名
pub const SOURCE_EXTENSION: &str = "jxl";

/// 一个纹理请求：源文件 + 可选遮罩
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub source: PathBuf,
    pub mask: Option<PathBuf>,
}

impl AssetRequest {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            mask: None,
        }
    }

    /// 附加 alpha 遮罩
    pub fn with_mask(mut self, mask: impl Into<PathBuf>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// 编号帧序列 `<stem>_frame_0001.jxl` .. `<stem>_frame_{count:04}.jxl`
    pub fn frame_sequence(stem: &str, count: usize) -> Vec<AssetRequest> {
        (1..=count)
            .map(|n| AssetRequest::new(frame_path(stem, n)))
            .collect()
    }
}

/// 第 `n` 帧（从 1 开始）的源路径
pub fn frame_path(stem: &str, n: usize) -> String {
    format!("{}_frame_{:04}.{}", stem, n, SOURCE_EXTENSION)
}

/// 资源准备流水线
#[derive(Clone)]
pub struct AssetPipeline {
    /// 资源根目录
    root: PathBuf,
    /// 外部转换工具
    tool: Arc<dyn ConversionTool>,
}

impl std::fmt::Debug for AssetPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetPipeline")
            .field("root", &self.root)
            .field("tool", &self.tool.program())
            .finish()
    }
}

impl AssetPipeline {
    pub fn new(root: impl Into<PathBuf>, tool: Arc<dyn ConversionTool>) -> Self {
        Self {
            root: root.into(),
            tool,
        }
    }

    /// 使用默认的 `ffmpeg`
    pub fn with_ffmpeg(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Arc::new(FfmpegTool::default()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tool(&self) -> &dyn ConversionTool {
        self.tool.as_ref()
    }

    /// 逻辑路径 → 文件系统路径（绝对路径原样返回）
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// 把源文件转换为 PNG，返回 PNG 路径
    ///
    /// - 源文件不存在 → [`AssetError::AssetNotFound`]，不调用外部工具
    /// - 工具无法启动 → [`AssetError::ToolLaunch`]
    /// - 工具非零退出 → [`AssetError::ConversionFailed`]（附带诊断输出）
    /// - 工具成功但没有输出文件 → [`AssetError::ConversionIncomplete`]
    ///
    /// 工具写到旁边的临时文件，成功后才替换正式输出；任何失败都不会动已有的 PNG。
    /// 不做缓存：每次调用都会重新运行工具并覆盖旧输出。
    /// 源文件本身已经是 PNG 时直接返回。
    pub fn convert_to_raster(&self, source: &Path) -> AssetResult<PathBuf> {
        let source = self.resolve(source);
        if !source.is_file() {
            return Err(AssetError::AssetNotFound { path: source });
        }

        let output = raster_path_for(&source);
        if output == source {
            return Ok(output);
        }

        // 临时文件存在只能来自这一次运行
        let partial = partial_path_for(&output);
        remove_if_exists(&partial);

        debug!(source = ?source, output = ?output, tool = self.tool.program(), "开始转换");
        let run = self.tool.convert(&source, &partial)?;
        for line in &run.diagnostics {
            debug!(tool = self.tool.program(), "{}", line);
        }

        if !run.success {
            remove_if_exists(&partial);
            return Err(AssetError::ConversionFailed {
                path: source,
                code: run.code,
                diagnostics: run.diagnostics.join("\n"),
            });
        }

        if !partial.is_file() {
            return Err(AssetError::ConversionIncomplete {
                source_path: source,
                output,
            });
        }

        std::fs::rename(&partial, &output).map_err(|e| AssetError::Io {
            path: output.clone(),
            message: e.to_string(),
        })?;

        info!(output = ?output, "转换完成");
        Ok(output)
    }

    /// 准备一张图：转换源文件，有遮罩时合成 alpha
    pub fn prepare(&self, request: &AssetRequest) -> AssetResult<RgbaImage> {
        let raster = self.convert_to_raster(&request.source)?;
        let base = load_raster(&raster)?;

        match &request.mask {
            Some(mask) => {
                let mask_raster = self.convert_to_raster(mask)?;
                let mask = load_mask(&mask_raster)?;
                composite_with_mask(&base, &mask)
            }
            None => Ok(base),
        }
    }

    /// 准备一张图并上传为纹理
    pub fn load_texture(
        &self,
        request: &AssetRequest,
        gfx: &mut dyn Graphics,
    ) -> AssetResult<PreparedTexture> {
        let image = self.prepare(request)?;
        let (width, height) = image.dimensions();
        let id = gfx.upload_texture(&image);
        Ok(PreparedTexture { id, width, height })
    }

    /// 按顺序加载一批纹理
    ///
    /// 第一个失败的请求会终止整批，后面的请求不会被尝试。
    pub fn load_texture_set(
        &self,
        requests: &[AssetRequest],
        gfx: &mut dyn Graphics,
    ) -> Result<Vec<PreparedTexture>, BatchError> {
        let mut completed = Vec::with_capacity(requests.len());

        for (index, request) in requests.iter().enumerate() {
            match self.load_texture(request, gfx) {
                Ok(texture) => completed.push(texture),
                Err(source) => {
                    return Err(BatchError {
                        index,
                        path: request.source.clone(),
                        source,
                        completed,
                    });
                }
            }
        }

        debug!(count = completed.len(), "纹理批量加载完成");
        Ok(completed)
    }
}

fn remove_if_exists(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => debug!(path = ?path, error = %e, "无法删除临时转换输出"),
    }
}

/// 释放一组纹理并清空列表
pub fn release_textures(gfx: &mut dyn Graphics, textures: &mut Vec<PreparedTexture>) {
    for texture in textures.drain(..) {
        gfx.unload_texture(texture.id);
    }
}
