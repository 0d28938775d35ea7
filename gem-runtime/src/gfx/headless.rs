//! # Headless 后端
//!
//! 不打开窗口的 [`Graphics`] 实现：只记录纹理句柄的分配/释放和绘制调用。
//! 用于测试（纹理计数夹具）和宿主的 `--headless` 模式。

use std::collections::HashMap;

use image::RgbaImage;
use tracing::warn;

use super::{Blit, Color, Graphics, Rect, TextureId, Vec2};

/// 记录下来的绘制调用
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Texture(TextureId, Blit),
    Rect(Rect, Color),
    Circle(Vec2, f32, Color),
    Text(String),
}

/// 内存中的渲染后端
#[derive(Debug)]
pub struct HeadlessGraphics {
    width: f32,
    height: f32,
    next_id: u64,
    /// 存活的纹理（句柄 -> 尺寸）
    live: HashMap<TextureId, (u32, u32)>,
    uploads: usize,
    unloads: usize,
    /// 释放了不存在（或已释放）的句柄的次数
    invalid_unloads: usize,
    draw_calls: Vec<DrawCall>,
}

impl HeadlessGraphics {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            next_id: 1,
            live: HashMap::new(),
            uploads: 0,
            unloads: 0,
            invalid_unloads: 0,
            draw_calls: Vec::new(),
        }
    }

    /// 当前存活的纹理数量
    pub fn live_textures(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, texture: TextureId) -> bool {
        self.live.contains_key(&texture)
    }

    /// 累计上传次数
    pub fn uploads(&self) -> usize {
        self.uploads
    }

    /// 累计释放次数
    pub fn unloads(&self) -> usize {
        self.unloads
    }

    /// 重复释放 / 释放未知句柄的次数
    pub fn invalid_unloads(&self) -> usize {
        self.invalid_unloads
    }

    /// 取出并清空已记录的绘制调用
    pub fn take_draw_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draw_calls)
    }

    pub fn draw_call_count(&self) -> usize {
        self.draw_calls.len()
    }

    /// 已记录的文字（按绘制顺序）
    pub fn drawn_text(&self) -> Vec<&str> {
        self.draw_calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Graphics for HeadlessGraphics {
    fn upload_texture(&mut self, image: &RgbaImage) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.uploads += 1;
        self.live.insert(id, image.dimensions());
        id
    }

    fn unload_texture(&mut self, texture: TextureId) {
        if self.live.remove(&texture).is_some() {
            self.unloads += 1;
        } else {
            self.invalid_unloads += 1;
            warn!(texture = texture.0, "释放了不存在的纹理");
        }
    }

    fn screen_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn set_window_size(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    fn clear(&mut self, color: Color) {
        self.draw_calls.push(DrawCall::Clear(color));
    }

    fn draw_texture(&mut self, texture: TextureId, blit: &Blit) {
        if !self.live.contains_key(&texture) {
            warn!(texture = texture.0, "绘制了未上传的纹理");
        }
        self.draw_calls.push(DrawCall::Texture(texture, *blit));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.draw_calls.push(DrawCall::Rect(rect, color));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draw_calls.push(DrawCall::Circle(center, radius, color));
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _color: Color) {
        self.draw_calls.push(DrawCall::Text(text.to_string()));
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        // 等宽估算
        text.chars().count() as f32 * size * 0.5
    }
}
