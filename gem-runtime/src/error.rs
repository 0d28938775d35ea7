//! # Error 模块
//!
//! 定义 gem-runtime 中使用的错误类型。
//!
//! - [`AssetError`]：单个资源准备失败（转换、合成、解码）
//! - [`BatchError`]：批量加载中第一个失败的请求
//! - [`ScreenError`]：界面 `load` 期间遇到的资源错误

use std::path::PathBuf;
use thiserror::Error;

use crate::gfx::PreparedTexture;

/// 资源准备错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    /// 源文件不存在（不会调用外部工具）
    #[error("资源未找到: {path:?}")]
    AssetNotFound { path: PathBuf },

    /// 外部转换工具无法启动
    #[error("无法启动转换工具 '{program}': {message}")]
    ToolLaunch { program: String, message: String },

    /// 外部转换工具以非零状态退出
    #[error("转换失败: {path:?} (退出码 {code:?})\n{diagnostics}")]
    ConversionFailed {
        path: PathBuf,
        code: Option<i32>,
        /// 工具的诊断输出（stderr）
        diagnostics: String,
    },

    /// 工具正常退出，但输出文件不存在
    #[error("转换未产出文件: {source_path:?} -> {output:?}")]
    ConversionIncomplete { source_path: PathBuf, output: PathBuf },

    /// 遮罩与底图尺寸不一致
    #[error("遮罩尺寸不匹配: 底图 {base:?}，遮罩 {mask:?}")]
    DimensionMismatch { base: (u32, u32), mask: (u32, u32) },

    /// 转换输出无法落盘
    #[error("无法写入转换输出 {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    /// 栅格文件无法解码
    #[error("无法解码图片 {path:?}: {message}")]
    Decode { path: PathBuf, message: String },
}

impl AssetError {
    /// 错误种类的短名称（用于日志字段）
    pub fn kind(&self) -> &'static str {
        match self {
            AssetError::AssetNotFound { .. } => "asset_not_found",
            AssetError::ToolLaunch { .. } => "tool_launch",
            AssetError::ConversionFailed { .. } => "conversion_failed",
            AssetError::ConversionIncomplete { .. } => "conversion_incomplete",
            AssetError::DimensionMismatch { .. } => "dimension_mismatch",
            AssetError::Io { .. } => "io",
            AssetError::Decode { .. } => "decode",
        }
    }
}

/// 批量加载错误
///
/// 批量加载是顺序且遇错即停的：`index` 之后的请求从未尝试。
/// `completed` 中是失败之前已上传的纹理，所有权交还给调用方，
/// 由调用方决定保留还是释放。
#[derive(Error, Debug)]
#[error("第 {index} 个请求失败 ({path:?}): {source}")]
pub struct BatchError {
    /// 失败请求的索引（从 0 开始）
    pub index: usize,
    /// 失败请求的源路径
    pub path: PathBuf,
    /// 具体原因
    #[source]
    pub source: AssetError,
    /// 失败前已成功上传的纹理
    pub completed: Vec<PreparedTexture>,
}

/// 界面错误
#[derive(Error, Debug)]
pub enum ScreenError {
    /// 界面 `load` 期间的资源加载失败
    #[error("界面 {screen} 加载资源 '{asset}' 失败: {source}")]
    LoadFailure {
        screen: &'static str,
        asset: String,
        #[source]
        source: AssetError,
    },
}

/// Result 类型别名
pub type AssetResult<T> = Result<T, AssetError>;
