use nannou::prelude::*;
use rand::Rng;
use std::ops::Range;

use crate::pointer::PointerState;
use crate::surface::{accent, Bounds, Surface};

// ポインタへ寄る割合（差分の 1/20）/ Fraction of the pointer delta covered per frame
const ATTRACTION: f32 = 1.0 / 20.0;
// この距離で輝きが下限に落ちる / Distance at which the glow reaches its floor
const GLOW_FALLOFF: f32 = 150.0;
const GLOW_FLOOR: f32 = 0.3;

/// Glow intensity for a particle `distance` away from the pointer.
pub fn glow(distance: Option<f32>) -> f32 {
    match distance {
        Some(d) => (1.0 - d / GLOW_FALLOFF).clamp(GLOW_FLOOR, 1.0),
        None => GLOW_FLOOR,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point2,
    pub velocity: Vec2,
    pub size: f32,
}

impl Particle {
    pub fn new(position: Point2, velocity: Vec2, size: f32) -> Self {
        Particle {
            position,
            velocity,
            size,
        }
    }

    /// 画面内の一様な位置にランダム生成する
    /// Uniform position over `bounds`, radius from `size`, each velocity axis from `speed`.
    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds, size: Range<f32>, speed: Range<f32>) -> Self {
        let x = rng.gen_range(0.0..bounds.width);
        let y = rng.gen_range(0.0..bounds.height);
        let vx = rng.gen_range(speed.clone());
        let vy = rng.gen_range(speed);
        Particle::new(pt2(x, y), vec2(vx, vy), rng.gen_range(size))
    }

    pub fn update(&mut self, pointer: &PointerState, bounds: Bounds) {
        match pointer.position() {
            Some(target) if self.position.distance(target) < pointer.radius() => {
                self.position += (target - self.position) * ATTRACTION;
            }
            _ => self.position += self.velocity,
        }

        // 端で反射（位置は補正しない）/ Sign flip on each axis, position is not clamped.
        if self.position.x < 0.0 || self.position.x > bounds.width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > bounds.height {
            self.velocity.y = -self.velocity.y;
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, pointer: &PointerState) {
        let glow = glow(pointer.distance_to(self.position));
        surface.fill_circle(self.position, self.size, accent(glow));
    }
}
