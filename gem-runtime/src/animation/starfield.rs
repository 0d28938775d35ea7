//! # 星空
//!
//! 标题界面背景里向上漂移的星星。位移只取决于 `speed * dt`，与帧率无关；
//! 越过顶部后回到底部，并重新随机横坐标。

use rand::Rng;

/// 单颗星星
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// 向上的速度（像素/秒）
    pub speed: f32,
    /// 半径（像素）
    pub size: f32,
}

impl Star {
    /// 推进 `dt` 秒，返回是否发生了回绕
    pub fn advance(&mut self, dt: f32, width: f32, height: f32, rng: &mut impl Rng) -> bool {
        self.y -= self.speed * dt;
        if self.y < 0.0 {
            self.y = height;
            self.x = random_x(width, rng);
            true
        } else {
            false
        }
    }
}

fn random_x(width: f32, rng: &mut impl Rng) -> f32 {
    if width > 0.0 {
        rng.gen_range(0.0..width)
    } else {
        0.0
    }
}

/// 星空参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarFieldSpec {
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for StarFieldSpec {
    fn default() -> Self {
        Self {
            count: 60,
            min_speed: 20.0,
            max_speed: 90.0,
            min_size: 0.5,
            max_size: 2.0,
        }
    }
}

/// 星空
#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<Star>,
    width: f32,
    height: f32,
}

impl StarField {
    /// 在 `width × height` 区域内随机撒星
    pub fn new(spec: &StarFieldSpec, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let stars = (0..spec.count)
            .map(|_| Star {
                x: random_x(width, rng),
                y: if height > 0.0 { rng.gen_range(0.0..height) } else { 0.0 },
                speed: sample_range(spec.min_speed, spec.max_speed, rng),
                size: sample_range(spec.min_size, spec.max_size, rng),
            })
            .collect();

        Self {
            stars,
            width,
            height,
        }
    }

    /// 使用给定的星星
    pub fn from_stars(stars: Vec<Star>, width: f32, height: f32) -> Self {
        Self {
            stars,
            width,
            height,
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.advance(dt, self.width, self.height, rng);
        }
    }

    /// 窗口尺寸变化时更新边界（不重新撒星）
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

fn sample_range(min: f32, max: f32, rng: &mut impl Rng) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn star(x: f32, y: f32, speed: f32) -> Star {
        Star {
            x,
            y,
            speed,
            size: 1.0,
        }
    }

    #[test]
    fn test_star_moves_by_speed_times_dt() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = star(100.0, 300.0, 40.0);

        for dt in [0.016_f32, 0.033, 0.5, 0.001] {
            let before = s.y;
            let wrapped = s.advance(dt, 800.0, 600.0, &mut rng);
            assert!(!wrapped);
            assert_eq!(s.y, before - 40.0 * dt);
            assert_eq!(s.x, 100.0);
        }
    }

    #[test]
    fn test_same_distance_regardless_of_frame_split() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut one_step = star(0.0, 500.0, 50.0);
        let mut four_steps = one_step;

        one_step.advance(1.0, 800.0, 600.0, &mut rng);
        for _ in 0..4 {
            four_steps.advance(0.25, 800.0, 600.0, &mut rng);
        }
        assert_eq!(one_step.y, 450.0);
        assert_eq!(four_steps.y, 450.0);
    }

    #[test]
    fn test_star_wraps_to_bottom_with_new_x() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = star(-1.0, 5.0, 100.0);

        let wrapped = s.advance(0.1, 800.0, 600.0, &mut rng);
        assert!(wrapped);
        assert_eq!(s.y, 600.0);
        assert!(s.x >= 0.0 && s.x < 800.0);
    }

    #[test]
    fn test_field_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = StarField::new(&StarFieldSpec::default(), 640.0, 360.0, &mut rng);
        assert_eq!(field.stars().len(), 60);

        for _ in 0..600 {
            field.update(1.0 / 60.0, &mut rng);
        }
        for s in field.stars() {
            assert!(s.x >= 0.0 && s.x < 640.0);
            assert!(s.y >= 0.0 && s.y <= 360.0);
        }
    }
}
