//! # 标题界面
//!
//! 标题界面就是一个 [`SplashScreen`]，这里只给出它的声明。

use crate::animation::{Blink, EasingFunction, SparkleSpec, StarFieldSpec, Track};
use crate::assets::AssetRequest;
use crate::gfx::{Color, Rect};
use crate::input::Key;
use crate::screen::ScreenState;

use super::splash::{LayerSpec, PromptSpec, SparkleLayer, SplashScreen, SplashSpec, SpriteMotion};

pub const TITLE_BACKDROP: &str = "images/backdrops/backdrop_title_A.jxl";
pub const TITLE_LOGO: &str = "images/title/logo.jxl";
pub const TITLE_LOGO_MASK: &str = "images/title/logo_mask.jxl";
pub const TITLE_FLARE_STEM: &str = "images/title/flare";
pub const TITLE_FLARE_FRAMES: usize = 20;

pub const GRADIENT_TOP: Color = Color::rgb(41, 65, 107);
pub const GRADIENT_BOTTOM: Color = Color::rgb(173, 199, 206);

/// logo 入场时长（秒）
const LOGO_INTRO: f32 = 1.5;

/// 标题界面声明
pub fn title_spec() -> SplashSpec {
    let logo = SpriteMotion {
        x: Track::constant(0.5),
        y: Track::new(-0.25, 0.3, LOGO_INTRO).easing(EasingFunction::EaseOutBack),
        scale: Track::new(0.4, 1.0, LOGO_INTRO).easing(EasingFunction::EaseOutCubic),
        rotation: Track::new(-12.0, 0.0, LOGO_INTRO).easing(EasingFunction::EaseOutCubic),
        alpha: Track::new(0.0, 1.0, LOGO_INTRO * 0.5).easing(EasingFunction::EaseInOutSine),
    };

    let mut flare = SpriteMotion::fixed(0.5, 0.3);
    flare.alpha = Track::new(0.0, 0.85, 0.4).delay(LOGO_INTRO);

    SplashSpec {
        name: "title",
        gradient: Some((GRADIENT_TOP, GRADIENT_BOTTOM)),
        layers: vec![
            LayerSpec::backdrop("backdrop", TITLE_BACKDROP),
            LayerSpec::stars("stars", StarFieldSpec::default()),
            LayerSpec::sprite(
                "logo",
                AssetRequest::new(TITLE_LOGO).with_mask(TITLE_LOGO_MASK),
                logo,
            ),
            LayerSpec::strip("flare", TITLE_FLARE_STEM, TITLE_FLARE_FRAMES, 0.05, flare),
            LayerSpec::sparkle(
                "sparkle",
                SparkleLayer {
                    spec: SparkleSpec::default(),
                    region: Rect::new(0.3, 0.2, 0.4, 0.2),
                    size: 64,
                    delay: LOGO_INTRO,
                },
            ),
        ],
        prompt: Some(PromptSpec {
            text: "Press ENTER to Start".to_string(),
            y: 0.8,
            size: 28.0,
            color: Color::LIGHT_GRAY,
            blink: Blink::new(1.0, 0.6),
            delay: LOGO_INTRO,
        }),
        keys: vec![
            (Key::Enter, ScreenState::MainMenu),
            (Key::Escape, ScreenState::Exit),
        ],
        seed: None,
    }
}

/// 标题界面
pub fn title_screen() -> SplashScreen {
    SplashScreen::new(title_spec())
}
