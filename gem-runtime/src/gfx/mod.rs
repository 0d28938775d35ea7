//! # Gfx 模块
//!
//! 渲染层抽象。Runtime 不依赖任何具体的图形库，界面只通过 [`Graphics`] 绘制。
//!
//! ```text
//! Screen ──draw──► dyn Graphics ──► macroquad 后端（host）
//!                               └─► HeadlessGraphics（测试 / --headless）
//! ```
//!
//! 纹理以 [`TextureId`] 句柄表示，由上传它的界面独占，并在该界面的
//! `unload` 中释放。

mod headless;

pub use headless::{DrawCall, HeadlessGraphics};

use image::RgbaImage;

/// RGBA 颜色（0-255）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(130, 130, 130);
    pub const LIGHT_GRAY: Color = Color::rgb(200, 200, 200);
    pub const DARK_BLUE: Color = Color::rgb(0, 82, 172);
    pub const GOLD: Color = Color::rgb(255, 203, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 以 0.0 - 1.0 的不透明度缩放 alpha
    pub fn fade(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// 以中心点和尺寸构造
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }
}

/// 纹理句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// 已上传的纹理（句柄 + 像素尺寸）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreparedTexture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

impl PreparedTexture {
    /// 完整纹理的源矩形
    pub fn full_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

/// 一次纹理绘制的参数
///
/// 对应 "DrawTexturePro"：源矩形、目标矩形、旋转原点（相对目标矩形左上角）、
/// 旋转角度（度）、着色。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blit {
    pub source: Rect,
    pub dest: Rect,
    pub origin: Vec2,
    pub rotation: f32,
    pub tint: Color,
}

impl Blit {
    /// 把整张纹理拉伸到目标矩形
    pub fn stretch(texture: &PreparedTexture, dest: Rect) -> Self {
        Self {
            source: texture.full_rect(),
            dest,
            origin: Vec2::ZERO,
            rotation: 0.0,
            tint: Color::WHITE,
        }
    }

    /// 以中心点绘制（旋转绕中心进行）
    pub fn centered(texture: &PreparedTexture, center: Vec2, scale: f32, rotation: f32) -> Self {
        let w = texture.width as f32 * scale;
        let h = texture.height as f32 * scale;
        Self {
            source: texture.full_rect(),
            dest: Rect::new(center.x, center.y, w, h),
            origin: Vec2::new(w / 2.0, h / 2.0),
            rotation,
            tint: Color::WHITE,
        }
    }

    pub fn tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

/// 渲染/窗口层接口
///
/// 由宿主实现；Runtime 中的界面只通过它分配纹理和绘制。
pub trait Graphics {
    /// 上传 RGBA 图像为纹理
    fn upload_texture(&mut self, image: &RgbaImage) -> TextureId;

    /// 释放纹理
    fn unload_texture(&mut self, texture: TextureId);

    /// 当前窗口尺寸（像素）
    fn screen_size(&self) -> (f32, f32);

    /// 修改窗口尺寸
    fn set_window_size(&mut self, width: u32, height: u32);

    /// 清屏
    fn clear(&mut self, color: Color);

    /// 绘制纹理
    fn draw_texture(&mut self, texture: TextureId, blit: &Blit);

    /// 绘制实心矩形
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// 绘制实心圆
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// 绘制文字（`y` 为基线）
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);

    /// 测量文字宽度
    fn measure_text(&self, text: &str, size: f32) -> f32;

    /// 水平居中绘制文字
    fn draw_text_centered(&mut self, text: &str, y: f32, size: f32, color: Color) {
        let (width, _) = self.screen_size();
        let x = (width - self.measure_text(text, size)) / 2.0;
        self.draw_text(text, x, y, size, color);
    }
}

/// 生成垂直渐变图像（顶部 `top`，底部 `bottom`）
pub fn vertical_gradient(width: u32, height: u32, top: Color, bottom: Color) -> RgbaImage {
    let span = height.saturating_sub(1).max(1) as f32;
    RgbaImage::from_fn(width, height, |_, y| {
        let t = y as f32 / span;
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        image::Rgba([
            lerp(top.r, bottom.r),
            lerp(top.g, bottom.g),
            lerp(top.b, bottom.b),
            lerp(top.a, bottom.a),
        ])
    })
}
