//! # macroquad 后端
//!
//! [`Graphics`] 的 macroquad 实现。纹理按 [`TextureId`] 存在表里，
//! 从表中移除（drop）即释放 GPU 资源。

use std::collections::{HashMap, HashSet};

use gem_runtime::gfx::{Blit, Color, Graphics, Rect, TextureId, Vec2};
use image::RgbaImage;
use macroquad::prelude as mq;
use tracing::warn;

/// macroquad 渲染后端
pub struct MacroquadGraphics {
    textures: HashMap<TextureId, mq::Texture2D>,
    /// 尺寸超出 macroquad 上限、没有真正上传的句柄
    skipped: HashSet<TextureId>,
    next_id: u64,
}

impl MacroquadGraphics {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            skipped: HashSet::new(),
            next_id: 1,
        }
    }

    /// 当前持有的纹理数量
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }
}

impl Default for MacroquadGraphics {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn to_mq_color(color: Color) -> mq::Color {
    mq::Color::from_rgba(color.r, color.g, color.b, color.a)
}

/// macroquad 纹理尺寸是 u16，超出时返回 None
pub(crate) fn texture_extent(width: u32, height: u32) -> Option<(u16, u16)> {
    Some((u16::try_from(width).ok()?, u16::try_from(height).ok()?))
}

/// 把 "目标矩形 + 旋转原点" 换算成 macroquad 的左上角坐标与绝对旋转中心
pub(crate) fn blit_params(blit: &Blit) -> (f32, f32, mq::DrawTextureParams) {
    let x = blit.dest.x - blit.origin.x;
    let y = blit.dest.y - blit.origin.y;
    let params = mq::DrawTextureParams {
        dest_size: Some(mq::vec2(blit.dest.w, blit.dest.h)),
        source: Some(mq::Rect::new(
            blit.source.x,
            blit.source.y,
            blit.source.w,
            blit.source.h,
        )),
        rotation: blit.rotation.to_radians(),
        pivot: Some(mq::vec2(blit.dest.x, blit.dest.y)),
        ..Default::default()
    };
    (x, y, params)
}

impl Graphics for MacroquadGraphics {
    fn upload_texture(&mut self, image: &RgbaImage) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;

        let (width, height) = image.dimensions();
        let Some((w, h)) = texture_extent(width, height) else {
            warn!(width, height, "纹理尺寸超出上限，跳过上传");
            self.skipped.insert(id);
            return id;
        };

        let texture = mq::Texture2D::from_rgba8(w, h, image.as_raw());
        texture.set_filter(mq::FilterMode::Linear);
        self.textures.insert(id, texture);
        id
    }

    fn unload_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_none() && !self.skipped.remove(&texture) {
            warn!(texture = texture.0, "释放了不存在的纹理");
        }
    }

    fn screen_size(&self) -> (f32, f32) {
        (mq::screen_width(), mq::screen_height())
    }

    fn set_window_size(&mut self, width: u32, height: u32) {
        mq::request_new_screen_size(width as f32, height as f32);
    }

    fn clear(&mut self, color: Color) {
        mq::clear_background(to_mq_color(color));
    }

    fn draw_texture(&mut self, texture: TextureId, blit: &Blit) {
        let Some(tex) = self.textures.get(&texture) else {
            if !self.skipped.contains(&texture) {
                warn!(texture = texture.0, "绘制了未上传的纹理");
            }
            return;
        };
        let (x, y, params) = blit_params(blit);
        mq::draw_texture_ex(tex, x, y, to_mq_color(blit.tint), params);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        mq::draw_rectangle(rect.x, rect.y, rect.w, rect.h, to_mq_color(color));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        mq::draw_circle(center.x, center.y, radius, to_mq_color(color));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        mq::draw_text(text, x, y, size, to_mq_color(color));
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        mq::measure_text(text, None, size as u16, 1.0).width
    }
}
