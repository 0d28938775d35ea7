//! # 启动画面
//!
//! 由 [`SplashSpec`] 声明驱动的通用启动画面：渐变背景 + 按顺序叠放的图层
//! （背景图、动画精灵、帧序列、星空、闪光）+ 闪烁的提示文字。
//!
//! 每个带素材的图层是一个独立的批次。某个批次失败时，记录
//! [`ScreenError::LoadFailure`]，释放该批次已上传的纹理，该图层不绘制；
//! 其余图层照常加载。

use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info};

use crate::animation::{Blink, FrameStrip, Sparkle, SparkleSpec, StarField, StarFieldSpec, Track};
use crate::assets::{AssetRequest, release_textures};
use crate::error::{BatchError, ScreenError};
use crate::gfx::{
    Blit, Color, Graphics, PreparedTexture, Rect, Vec2, vertical_gradient,
};
use crate::input::Key;
use crate::screen::{Frame, LoadContext, Screen, ScreenState};

/// 精灵缩放的参考高度：窗口高度等于它时，缩放 1.0 即原始像素大小
pub const REFERENCE_HEIGHT: f32 = 1080.0;

/// 精灵的运动轨迹
///
/// `x` / `y` 是中心点相对窗口的比例 (0.0 - 1.0)，`rotation` 单位为度，
/// `alpha` 为 0.0 - 1.0。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteMotion {
    pub x: Track,
    pub y: Track,
    pub scale: Track,
    pub rotation: Track,
    pub alpha: Track,
}

impl SpriteMotion {
    /// 固定在某处，不透明，原始大小
    pub fn fixed(x: f32, y: f32) -> Self {
        Self {
            x: Track::constant(x),
            y: Track::constant(y),
            scale: Track::constant(1.0),
            rotation: Track::constant(0.0),
            alpha: Track::constant(1.0),
        }
    }

    /// 在 `elapsed` 时刻、给定窗口尺寸下的绘制参数
    pub fn sample(&self, elapsed: f32, screen: (f32, f32)) -> SpritePose {
        let (w, h) = screen;
        SpritePose {
            center: Vec2::new(self.x.sample(elapsed) * w, self.y.sample(elapsed) * h),
            scale: self.scale.sample(elapsed) * h / REFERENCE_HEIGHT,
            rotation: self.rotation.sample(elapsed),
            alpha: self.alpha.sample(elapsed).clamp(0.0, 1.0),
        }
    }

    /// 所有轨迹都结束的时刻
    pub fn end_time(&self) -> f32 {
        [self.x, self.y, self.scale, self.rotation, self.alpha]
            .iter()
            .map(Track::end_time)
            .fold(0.0, f32::max)
    }
}

/// 某一时刻精灵的绘制参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePose {
    pub center: Vec2,
    pub scale: f32,
    pub rotation: f32,
    pub alpha: f32,
}

/// 闪光图层参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkleLayer {
    pub spec: SparkleSpec,
    /// 出现区域（窗口比例）
    pub region: Rect,
    /// 生成的星芒纹理边长（像素）
    pub size: u32,
    /// 出现前的等待（秒）
    pub delay: f32,
}

/// 图层类型
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// 拉伸铺满窗口
    Backdrop,
    /// 按轨迹运动的单张图
    Sprite(SpriteMotion),
    /// 循环播放的帧序列
    Strip {
        interval: f32,
        motion: SpriteMotion,
    },
    /// 星空（不需要素材）
    Stars(StarFieldSpec),
    /// 闪光（纹理在加载时生成）
    Sparkle(SparkleLayer),
}

/// 图层声明
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub name: &'static str,
    /// 该图层的素材批次
    pub assets: Vec<AssetRequest>,
    pub kind: LayerKind,
}

impl LayerSpec {
    pub fn backdrop(name: &'static str, source: &str) -> Self {
        Self {
            name,
            assets: vec![AssetRequest::new(source)],
            kind: LayerKind::Backdrop,
        }
    }

    pub fn sprite(name: &'static str, request: AssetRequest, motion: SpriteMotion) -> Self {
        Self {
            name,
            assets: vec![request],
            kind: LayerKind::Sprite(motion),
        }
    }

    /// `stem` 下 `frames` 帧的序列
    pub fn strip(
        name: &'static str,
        stem: &str,
        frames: usize,
        interval: f32,
        motion: SpriteMotion,
    ) -> Self {
        Self {
            name,
            assets: AssetRequest::frame_sequence(stem, frames),
            kind: LayerKind::Strip { interval, motion },
        }
    }

    pub fn stars(name: &'static str, spec: StarFieldSpec) -> Self {
        Self {
            name,
            assets: Vec::new(),
            kind: LayerKind::Stars(spec),
        }
    }

    pub fn sparkle(name: &'static str, layer: SparkleLayer) -> Self {
        Self {
            name,
            assets: Vec::new(),
            kind: LayerKind::Sparkle(layer),
        }
    }
}

/// 闪烁提示文字
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub text: String,
    /// 基线位置（窗口高度比例）
    pub y: f32,
    pub size: f32,
    pub color: Color,
    pub blink: Blink,
    /// 出现前的等待（秒）
    pub delay: f32,
}

/// 启动画面声明
#[derive(Debug, Clone, PartialEq)]
pub struct SplashSpec {
    pub name: &'static str,
    /// 垂直渐变（上, 下）
    pub gradient: Option<(Color, Color)>,
    /// 从下到上绘制
    pub layers: Vec<LayerSpec>,
    pub prompt: Option<PromptSpec>,
    /// 按键 → 目标状态
    pub keys: Vec<(Key, ScreenState)>,
    /// 随机种子；`None` 时取系统熵
    pub seed: Option<u64>,
}

enum LayerState {
    Textured {
        textures: Vec<PreparedTexture>,
        strip: Option<FrameStrip>,
    },
    Stars(StarField),
    Sparkle {
        sparkle: Sparkle,
        texture: PreparedTexture,
    },
}

struct LoadedLayer {
    /// 在 `spec.layers` 中的位置
    index: usize,
    state: LayerState,
}

/// 启动画面
pub struct SplashScreen {
    spec: SplashSpec,
    gradient: Option<PreparedTexture>,
    layers: Vec<LoadedLayer>,
    failures: Vec<ScreenError>,
    rng: StdRng,
    elapsed: f32,
    screen: (f32, f32),
}

impl SplashScreen {
    pub fn new(spec: SplashSpec) -> Self {
        let rng = match spec.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            spec,
            gradient: None,
            layers: Vec::new(),
            failures: Vec::new(),
            rng,
            elapsed: 0.0,
            screen: (0.0, 0.0),
        }
    }

    pub fn spec(&self) -> &SplashSpec {
        &self.spec
    }

    /// 本次 `load` 中失败的批次
    pub fn failures(&self) -> &[ScreenError] {
        &self.failures
    }

    /// 成功加载的图层名
    pub fn loaded_layers(&self) -> Vec<&'static str> {
        self.layers
            .iter()
            .map(|layer| self.spec.layers[layer.index].name)
            .collect()
    }

    /// 当前持有的纹理数量
    pub fn texture_count(&self) -> usize {
        let layers: usize = self
            .layers
            .iter()
            .map(|layer| match &layer.state {
                LayerState::Textured { textures, .. } => textures.len(),
                LayerState::Stars(_) => 0,
                LayerState::Sparkle { .. } => 1,
            })
            .sum();
        layers + usize::from(self.gradient.is_some())
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn load_layer(
        &mut self,
        index: usize,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Option<LayerState>, ScreenError> {
        let layer = &self.spec.layers[index];
        let (w, h) = self.screen;

        let state = match &layer.kind {
            LayerKind::Stars(spec) => LayerState::Stars(StarField::new(spec, w, h, &mut self.rng)),
            LayerKind::Sparkle(sparkle) => {
                let image = sparkle_image(sparkle.size);
                let id = ctx.gfx.upload_texture(&image);
                LayerState::Sparkle {
                    sparkle: Sparkle::new(sparkle.spec, scale_rect(sparkle.region, self.screen), &mut self.rng),
                    texture: PreparedTexture {
                        id,
                        width: sparkle.size,
                        height: sparkle.size,
                    },
                }
            }
            LayerKind::Backdrop | LayerKind::Sprite(_) | LayerKind::Strip { .. } => {
                let textures = match ctx.assets.load_texture_set(&layer.assets, ctx.gfx) {
                    Ok(textures) => textures,
                    Err(BatchError {
                        index: failed,
                        path,
                        source,
                        mut completed,
                    }) => {
                        debug!(
                            layer = layer.name,
                            index = failed,
                            released = completed.len(),
                            "释放失败批次中已上传的纹理"
                        );
                        release_textures(ctx.gfx, &mut completed);
                        return Err(ScreenError::LoadFailure {
                            screen: self.spec.name,
                            asset: path.display().to_string(),
                            source,
                        });
                    }
                };
                if textures.is_empty() {
                    return Ok(None);
                }
                let strip = match &layer.kind {
                    LayerKind::Strip { interval, .. } => {
                        Some(FrameStrip::new(textures.len(), *interval))
                    }
                    _ => None,
                };
                LayerState::Textured { textures, strip }
            }
        };

        Ok(Some(state))
    }

    fn draw_sprite(
        gfx: &mut dyn Graphics,
        texture: &PreparedTexture,
        motion: &SpriteMotion,
        elapsed: f32,
        screen: (f32, f32),
    ) {
        let pose = motion.sample(elapsed, screen);
        if pose.alpha <= 0.0 || pose.scale <= 0.0 {
            return;
        }
        let blit = Blit::centered(texture, pose.center, pose.scale, pose.rotation)
            .tint(Color::WHITE.fade(pose.alpha));
        gfx.draw_texture(texture.id, &blit);
    }
}

impl Screen for SplashScreen {
    fn name(&self) -> &'static str {
        self.spec.name
    }

    fn load(&mut self, ctx: &mut LoadContext<'_>) {
        self.elapsed = 0.0;
        self.screen = ctx.gfx.screen_size();
        let (w, h) = self.screen;
        info!(screen = self.spec.name, width = w, height = h, "加载启动画面");

        if let Some((top, bottom)) = self.spec.gradient {
            let image = vertical_gradient(w.max(1.0) as u32, h.max(1.0) as u32, top, bottom);
            let id = ctx.gfx.upload_texture(&image);
            let (width, height) = image.dimensions();
            self.gradient = Some(PreparedTexture { id, width, height });
        }

        for index in 0..self.spec.layers.len() {
            match self.load_layer(index, ctx) {
                Ok(Some(state)) => self.layers.push(LoadedLayer { index, state }),
                Ok(None) => {}
                Err(e) => {
                    error!(
                        screen = self.spec.name,
                        layer = self.spec.layers[index].name,
                        error = %e,
                        "图层加载失败，跳过"
                    );
                    self.failures.push(e);
                }
            }
        }

        info!(
            screen = self.spec.name,
            layers = self.layers.len(),
            failed = self.failures.len(),
            textures = self.texture_count(),
            "启动画面加载完成"
        );
    }

    fn unload(&mut self, gfx: &mut dyn Graphics) {
        if let Some(gradient) = self.gradient.take() {
            gfx.unload_texture(gradient.id);
        }
        for layer in self.layers.drain(..) {
            match layer.state {
                LayerState::Textured { mut textures, .. } => release_textures(gfx, &mut textures),
                LayerState::Sparkle { texture, .. } => gfx.unload_texture(texture.id),
                LayerState::Stars(_) => {}
            }
        }
        self.failures.clear();
        debug!(screen = self.spec.name, "启动画面资源已释放");
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> Option<ScreenState> {
        self.elapsed += frame.dt;

        let screen = frame.gfx.screen_size();
        let resized = screen != self.screen;
        self.screen = screen;

        for layer in &mut self.layers {
            match &mut layer.state {
                LayerState::Textured {
                    strip: Some(strip), ..
                } => strip.update(frame.dt),
                LayerState::Textured { strip: None, .. } => {}
                LayerState::Stars(field) => {
                    if resized {
                        field.resize(screen.0, screen.1);
                    }
                    field.update(frame.dt, &mut self.rng);
                }
                LayerState::Sparkle { sparkle, .. } => {
                    if let LayerKind::Sparkle(spec) = &self.spec.layers[layer.index].kind {
                        sparkle.set_region(scale_rect(spec.region, screen));
                        if self.elapsed >= spec.delay {
                            sparkle.update(frame.dt, &mut self.rng);
                        }
                    }
                }
            }
        }

        self.spec
            .keys
            .iter()
            .find(|(key, _)| frame.input.is_pressed(*key))
            .map(|(_, state)| *state)
    }

    fn draw(&self, gfx: &mut dyn Graphics) {
        let screen = gfx.screen_size();
        let (w, h) = screen;
        let full = Rect::new(0.0, 0.0, w, h);

        gfx.clear(Color::BLACK);
        if let Some(gradient) = &self.gradient {
            gfx.draw_texture(gradient.id, &Blit::stretch(gradient, full));
        }

        for layer in &self.layers {
            let kind = &self.spec.layers[layer.index].kind;
            match (&layer.state, kind) {
                (LayerState::Textured { textures, .. }, LayerKind::Backdrop) => {
                    if let Some(texture) = textures.first() {
                        gfx.draw_texture(texture.id, &Blit::stretch(texture, full));
                    }
                }
                (LayerState::Textured { textures, .. }, LayerKind::Sprite(motion)) => {
                    if let Some(texture) = textures.first() {
                        Self::draw_sprite(gfx, texture, motion, self.elapsed, screen);
                    }
                }
                (LayerState::Textured { textures, strip }, LayerKind::Strip { motion, .. }) => {
                    let current = strip.as_ref().map_or(0, FrameStrip::current);
                    if let Some(texture) = textures.get(current) {
                        Self::draw_sprite(gfx, texture, motion, self.elapsed, screen);
                    }
                }
                (LayerState::Stars(field), _) => {
                    for star in field.stars() {
                        let alpha = (star.size / 2.0).clamp(0.3, 1.0);
                        gfx.draw_circle(
                            Vec2::new(star.x, star.y),
                            star.size,
                            Color::WHITE.fade(alpha),
                        );
                    }
                }
                (LayerState::Sparkle { sparkle, texture }, LayerKind::Sparkle(spec)) => {
                    if self.elapsed < spec.delay || sparkle.scale() <= 0.0 {
                        continue;
                    }
                    let blit = Blit::centered(
                        texture,
                        sparkle.position(),
                        sparkle.scale(),
                        sparkle.rotation(),
                    )
                    .tint(Color::WHITE.fade(sparkle.intensity()));
                    gfx.draw_texture(texture.id, &blit);
                }
                _ => {}
            }
        }

        if let Some(prompt) = &self.spec.prompt {
            let since = self.elapsed - prompt.delay;
            if since >= 0.0 && prompt.blink.is_visible(since) {
                gfx.draw_text_centered(&prompt.text, prompt.y * h, prompt.size, prompt.color);
            }
        }
    }
}

/// 窗口比例矩形 → 像素矩形
fn scale_rect(fraction: Rect, screen: (f32, f32)) -> Rect {
    Rect::new(
        fraction.x * screen.0,
        fraction.y * screen.1,
        fraction.w * screen.0,
        fraction.h * screen.1,
    )
}

/// 生成四角星芒图像（白色，alpha 表示亮度）
pub fn sparkle_image(size: u32) -> RgbaImage {
    let half = size.max(1) as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = (x as f32 + 0.5 - half) / half;
        let dy = (y as f32 + 0.5 - half) / half;
        let r = (dx * dx + dy * dy).sqrt();
        let glow = (1.0 - r).max(0.0);
        let cross = (1.0 - dx.abs().min(dy.abs()) * 6.0).max(0.0);
        let alpha = (cross * glow).max(glow.powi(4));
        Rgba([255, 255, 255, (alpha * 255.0).round() as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_motion_scales_with_height() {
        let motion = SpriteMotion::fixed(0.5, 0.25);
        let pose = motion.sample(0.0, (1920.0, 1080.0));
        assert_eq!(pose.center, Vec2::new(960.0, 270.0));
        assert_eq!(pose.scale, 1.0);

        let pose = motion.sample(0.0, (960.0, 540.0));
        assert_eq!(pose.scale, 0.5);
    }

    #[test]
    fn test_sprite_motion_end_time() {
        let mut motion = SpriteMotion::fixed(0.5, 0.5);
        motion.alpha = Track::new(0.0, 1.0, 0.5).delay(1.0);
        motion.y = Track::new(0.0, 0.3, 1.2);
        assert_eq!(motion.end_time(), 1.5);
    }

    #[test]
    fn test_sparkle_image_shape() {
        let image = sparkle_image(32);
        assert_eq!(image.dimensions(), (32, 32));
        // 中心最亮，角落透明
        assert!(image.get_pixel(16, 16).0[3] > 150);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_scale_rect() {
        let r = scale_rect(Rect::new(0.25, 0.5, 0.5, 0.25), (800.0, 600.0));
        assert_eq!(r, Rect::new(200.0, 300.0, 400.0, 150.0));
    }
}
