use rand::Rng;

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::surface::{accent, Bounds, Surface};

const LINK_WEIGHT: f32 = 1.0;

/// Opacity of the edge between two particles `distance` apart.
/// Zero at or beyond `threshold`, `multiplier` at distance zero.
pub fn link_opacity(distance: f32, threshold: f32, multiplier: f32) -> f32 {
    if distance >= threshold {
        return 0.0;
    }
    (1.0 - distance / threshold) * multiplier
}

/// 粒子の集合（数は固定）/ Fixed-size set of particles plus the link settings.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    link_distance: f32,
    link_opacity: f32,
}

impl ParticleField {
    pub fn new<R: Rng>(rng: &mut R, bounds: Bounds, config: &FieldConfig) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| {
                Particle::random(
                    rng,
                    bounds,
                    config.particle_size.clone(),
                    config.particle_speed.clone(),
                )
            })
            .collect();
        ParticleField::from_particles(particles, config)
    }

    pub fn from_particles(particles: Vec<Particle>, config: &FieldConfig) -> Self {
        ParticleField {
            particles,
            link_distance: config.link_distance,
            link_opacity: config.link_opacity,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn update_and_draw<S: Surface>(&mut self, surface: &mut S, pointer: &PointerState) {
        let bounds = surface.bounds();
        for particle in &mut self.particles {
            particle.update(pointer, bounds);
            particle.draw(surface, pointer);
        }
    }

    /// 近い粒子同士を線で結ぶ / Links every unordered pair closer than the link distance.
    pub fn connect<S: Surface>(&self, surface: &mut S) {
        for (a, first) in self.particles.iter().enumerate() {
            for second in &self.particles[a + 1..] {
                let distance = first.position.distance(second.position);
                if distance < self.link_distance {
                    let alpha = link_opacity(distance, self.link_distance, self.link_opacity);
                    surface.line(first.position, second.position, LINK_WEIGHT, accent(alpha));
                }
            }
        }
    }
}
