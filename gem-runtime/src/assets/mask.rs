//! # 遮罩合成
//!
//! 原始素材把透明度拆成单独的灰度遮罩文件，加载时用遮罩的亮度替换底图的 alpha 通道。

use std::path::Path;

use image::{GrayImage, RgbaImage};

use crate::error::{AssetError, AssetResult};

/// 读取并解码栅格文件为 RGBA8
pub fn load_raster(path: &Path) -> AssetResult<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// 读取并解码栅格文件为灰度（亮度）图
pub fn load_mask(path: &Path) -> AssetResult<GrayImage> {
    image::open(path)
        .map(|img| img.to_luma8())
        .map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// 用遮罩亮度逐像素替换底图的 alpha 通道
///
/// 两张图尺寸必须一致，否则返回 [`AssetError::DimensionMismatch`]。
pub fn composite_with_mask(base: &RgbaImage, mask: &GrayImage) -> AssetResult<RgbaImage> {
    if base.dimensions() != mask.dimensions() {
        return Err(AssetError::DimensionMismatch {
            base: base.dimensions(),
            mask: mask.dimensions(),
        });
    }

    let mut out = base.clone();
    for (pixel, luma) in out.pixels_mut().zip(mask.pixels()) {
        pixel.0[3] = luma.0[0];
    }
    Ok(out)
}
