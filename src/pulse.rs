use nannou::prelude::*;

use crate::config::FieldConfig;
use crate::surface::{accent, Surface};

const PULSE_WEIGHT: f32 = 2.0;
// 丸め誤差で 0 をわずかに上回っても消えるように / Absorbs float drift around zero opacity
const FADED: f32 = 1e-6;

/// An expanding, fading ring spawned by a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub origin: Point2,
    pub radius: f32,
    pub max_radius: f32,
    pub opacity: f32,
}

impl Pulse {
    pub fn is_faded(&self) -> bool {
        self.opacity <= FADED
    }
}

/// Active pulses in spawn order, plus the per-frame growth settings.
#[derive(Debug, Clone)]
pub struct PulseSet {
    pulses: Vec<Pulse>,
    max_radius: f32,
    initial_opacity: f32,
    growth: f32,
    decay: f32,
}

impl PulseSet {
    pub fn new(config: &FieldConfig) -> Self {
        PulseSet {
            pulses: Vec::new(),
            max_radius: config.pulse_max_radius,
            initial_opacity: config.pulse_opacity,
            growth: config.pulse_growth,
            decay: config.pulse_decay,
        }
    }

    pub fn spawn(&mut self, origin: Point2) {
        self.pulses.push(Pulse {
            origin,
            radius: 0.0,
            max_radius: self.max_radius,
            opacity: self.initial_opacity,
        });
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Draws every pulse at its current state, ages it by one frame, then
    /// drops the ones that have fully faded. Survivors keep their order.
    pub fn draw_and_age<S: Surface>(&mut self, surface: &mut S) {
        for pulse in &mut self.pulses {
            surface.stroke_circle(pulse.origin, pulse.radius, PULSE_WEIGHT, accent(pulse.opacity));
            pulse.radius += self.growth;
            pulse.opacity -= self.decay;
        }
        self.pulses.retain(|p| !p.is_faded());
    }
}
