//! # 外部转换工具
//!
//! 渲染层无法直接解码 JXL，需要先调用外部命令行工具转换为 PNG。
//! 默认实现 [`FfmpegTool`] 通过 `ffmpeg-sidecar` 启动 FFmpeg 子进程：
//!
//! ```text
//! ffmpeg -y -i <source> -frames:v 1 -update 1 <dest>
//! ```
//!
//! 调用是阻塞的：没有超时，也不能取消，工具挂起会卡住整个帧循环。

use std::path::{Path, PathBuf};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;

use crate::error::{AssetError, AssetResult};

/// 栅格输出的扩展名
pub const RASTER_EXTENSION: &str = "png";

/// 一次工具运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRun {
    /// 是否以 0 退出
    pub success: bool,
    /// 退出码（被信号终止时为 None）
    pub code: Option<i32>,
    /// 捕获的诊断输出（逐行）
    pub diagnostics: Vec<String>,
}

/// 外部转换工具
///
/// 实现者必须阻塞到子进程退出再返回。
pub trait ConversionTool: Send + Sync {
    /// 工具名（用于日志和错误信息）
    fn program(&self) -> &str;

    /// 把 `source` 转换为 `output`
    fn convert(&self, source: &Path, output: &Path) -> AssetResult<ToolRun>;
}

/// 由源路径推导栅格输出路径：同目录、同文件名，扩展名换成 `.png`
pub fn raster_path_for(source: &Path) -> PathBuf {
    source.with_extension(RASTER_EXTENSION)
}

/// 工具实际写入的临时路径：`logo.png` → `logo.partial.png`
///
/// 保留 `.png` 结尾，工具按扩展名选择输出格式。
pub fn partial_path_for(output: &Path) -> PathBuf {
    output.with_extension(format!("partial.{}", RASTER_EXTENSION))
}

/// 转换命令的参数
pub fn conversion_args(source: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        source.to_string_lossy().to_string(),
        "-frames:v".to_string(),
        "1".to_string(),
        "-update".to_string(),
        "1".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// FFmpeg 转换工具
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    program: String,
}

impl FfmpegTool {
    /// 使用指定的 ffmpeg 可执行文件
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfmpegTool {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl ConversionTool for FfmpegTool {
    fn program(&self) -> &str {
        &self.program
    }

    fn convert(&self, source: &Path, output: &Path) -> AssetResult<ToolRun> {
        let launch_error = |message: String| AssetError::ToolLaunch {
            program: self.program.clone(),
            message,
        };

        let mut command = FfmpegCommand::new_with_path(&self.program);
        command.args(conversion_args(source, output));

        let mut child = command.spawn().map_err(|e| launch_error(e.to_string()))?;

        // 读完 stderr 事件流再 wait，避免管道写满导致子进程阻塞
        let mut diagnostics = Vec::new();
        match child.iter() {
            Ok(events) => {
                for event in events {
                    match event {
                        FfmpegEvent::Log(_, line) | FfmpegEvent::Error(line) => {
                            diagnostics.push(line)
                        }
                        _ => {}
                    }
                }
            }
            Err(e) => diagnostics.push(format!("无法读取 ffmpeg 输出: {}", e)),
        }

        let status = child.wait().map_err(|e| launch_error(e.to_string()))?;

        Ok(ToolRun {
            success: status.success(),
            code: status.code(),
            diagnostics,
        })
    }
}
