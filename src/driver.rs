use nannou::prelude::*;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::pointer::PointerState;
use crate::pulse::PulseSet;
use crate::surface::{Bounds, Surface};

/// 外部からループを止めるためのトークン / Stops the frame loop from outside.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Whole animation state: the field, the pulses and the pointer.
///
/// Input handlers mutate it between frames; [`Animation::tick`] reads it to
/// produce one frame. Nothing here is shared, so nothing needs a lock.
#[derive(Debug, Clone)]
pub struct Animation {
    field: ParticleField,
    pulses: PulseSet,
    pointer: PointerState,
    frames: u64,
}

impl Animation {
    pub fn new<R: Rng>(rng: &mut R, bounds: Bounds, config: &FieldConfig) -> Self {
        Animation::with_field(ParticleField::new(rng, bounds, config), config)
    }

    pub fn with_field(field: ParticleField, config: &FieldConfig) -> Self {
        Animation {
            field,
            pulses: PulseSet::new(config),
            pointer: PointerState::new(config.pointer_radius),
            frames: 0,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pulses(&self) -> &PulseSet {
        &self.pulses
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pointer_moved(&mut self, position: Point2) {
        self.pointer.move_to(position);
    }

    pub fn clicked(&mut self, position: Point2) {
        log::debug!("pulse at ({:.1}, {:.1})", position.x, position.y);
        self.pulses.spawn(position);
    }

    /// One frame: clear, move and draw particles, link them, then the pulses.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) {
        surface.clear();
        self.field.update_and_draw(surface, &self.pointer);
        self.field.connect(surface);
        self.pulses.draw_and_age(surface);
        self.frames += 1;
        log::trace!(
            "frame {}: {} particles, {} pulses",
            self.frames,
            self.field.len(),
            self.pulses.len()
        );
    }

    /// ループ本体 / Runs frames until `token` is cancelled.
    ///
    /// `present` is called after every frame and stands in for the host's
    /// refresh: it shows the frame, waits for the next tick and may cancel.
    pub fn run_until_cancelled<S, F>(&mut self, surface: &mut S, token: &CancelToken, mut present: F)
    where
        S: Surface,
        F: FnMut(&Animation, &S),
    {
        while !token.is_cancelled() {
            self.tick(surface);
            present(self, surface);
        }
        log::info!("frame loop stopped after {} frames", self.frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::surface::{DisplayList, DrawCommand};

    fn single(x: f32, y: f32, vx: f32) -> Animation {
        let config = FieldConfig::default();
        let field = ParticleField::from_particles(
            vec![Particle::new(pt2(x, y), vec2(vx, 0.0), 2.0)],
            &config,
        );
        Animation::with_field(field, &config)
    }

    #[test]
    fn tick_draws_in_frame_order() {
        let config = FieldConfig::default();
        let field = ParticleField::from_particles(
            vec![
                Particle::new(pt2(100.0, 100.0), vec2(0.0, 0.0), 2.0),
                Particle::new(pt2(150.0, 100.0), vec2(0.0, 0.0), 2.0),
            ],
            &config,
        );
        let mut animation = Animation::with_field(field, &config);
        animation.clicked(pt2(400.0, 300.0));
        let mut list = DisplayList::new(Bounds::new(800.0, 600.0));

        animation.tick(&mut list);

        let kinds: Vec<&str> = list
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Clear => "clear",
                DrawCommand::FillCircle { .. } => "particle",
                DrawCommand::Line { .. } => "link",
                DrawCommand::StrokeCircle { .. } => "pulse",
            })
            .collect();
        assert_eq!(kinds, vec!["clear", "particle", "particle", "link", "pulse"]);
        assert_eq!(animation.frames(), 1);
    }

    #[test]
    fn click_pulse_lifecycle() {
        let mut animation = single(10.0, 300.0, -0.3);
        let mut list = DisplayList::new(Bounds::new(800.0, 600.0));
        animation.clicked(pt2(400.0, 300.0));
        assert_eq!(animation.pulses().len(), 1);

        for _ in 0..5 {
            animation.tick(&mut list);
        }
        let pulse = animation.pulses().pulses()[0];
        assert!((pulse.radius - 30.0).abs() < 1e-4);
        assert!((pulse.opacity - 0.7).abs() < 1e-4);

        for _ in 5..40 {
            animation.tick(&mut list);
        }
        assert!(animation.pulses().is_empty());
    }

    #[test]
    fn pointer_input_attracts_particles() {
        let mut animation = single(100.0, 100.0, 0.0);
        let mut list = DisplayList::new(Bounds::new(800.0, 600.0));
        animation.pointer_moved(pt2(140.0, 100.0));
        animation.tick(&mut list);
        let p = &animation.field().particles()[0];
        assert!((p.position.x - 102.0).abs() < 1e-5);
    }

    #[test]
    fn resize_keeps_particles_and_pulses() {
        let config = FieldConfig::default();
        let field = ParticleField::from_particles(
            vec![
                Particle::new(pt2(100.0, 100.0), vec2(0.2, 0.1), 2.0),
                Particle::new(pt2(600.0, 100.0), vec2(0.3, 0.0), 2.0),
            ],
            &config,
        );
        let mut animation = Animation::with_field(field, &config);
        let mut list = DisplayList::new(Bounds::new(800.0, 600.0));
        animation.clicked(pt2(10.0, 10.0));
        animation.tick(&mut list);

        let before = animation.field().particles().to_vec();
        let origins: Vec<_> = animation.pulses().pulses().iter().map(|p| p.origin).collect();

        list.resize(Bounds::new(400.0, 300.0));
        animation.tick(&mut list);

        let after = animation.field().particles();
        assert_eq!(after.len(), 2);
        for (old, new) in before.iter().zip(after) {
            assert_eq!(new.position, old.position + old.velocity);
        }
        assert_eq!(after[0].velocity, vec2(0.2, 0.1));
        assert_eq!(after[1].velocity.x, -0.3, "past the new width, sign flips");

        let kept: Vec<_> = animation.pulses().pulses().iter().map(|p| p.origin).collect();
        assert_eq!(kept, origins);
        assert!((animation.pulses().pulses()[0].radius - 12.0).abs() < 1e-4);
        assert_eq!(list.bounds(), Bounds::new(400.0, 300.0));
    }

    #[test]
    fn runs_until_token_cancelled() {
        let mut animation = single(10.0, 300.0, -0.3);
        let mut list = DisplayList::new(Bounds::new(800.0, 600.0));
        let token = CancelToken::new();
        let stopper = token.clone();
        let mut presented = 0;

        animation.run_until_cancelled(&mut list, &token, |animation, surface| {
            presented += 1;
            assert!(!surface.is_empty());
            if animation.frames() == 12 {
                stopper.cancel();
            }
        });

        assert_eq!(presented, 12);
        assert_eq!(animation.frames(), 12);
        assert!(token.is_cancelled());
    }

    #[test]
    fn cancelled_token_runs_no_frames() {
        let mut animation = single(10.0, 300.0, -0.3);
        let mut list = DisplayList::new(Bounds::new(800.0, 600.0));
        let token = CancelToken::new();
        token.cancel();
        animation.run_until_cancelled(&mut list, &token, |_, _| panic!("no frame expected"));
        assert_eq!(animation.frames(), 0);
    }
}
