use clap::Parser;
use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::Range;
use thiserror::Error;

// 既定のウィンドウサイズ / Default window size
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 800;

/// Command-line overrides. Everything not listed here stays at its default.
#[derive(Debug, Parser)]
#[command(name = "particle-field", version, about = "Interactive particle field animation")]
pub struct Args {
    /// Initial window width in logical pixels
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: u32,

    /// Number of particles in the field
    #[arg(long, default_value_t = 80)]
    pub particles: usize,

    /// Seed for the particle layout; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run this many frames without a window, then exit
    #[arg(long, value_name = "FRAMES")]
    pub headless_frames: Option<u64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("surface must be at least 1x1, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must lie in (0, 1], got {value}")]
    OpacityOutOfRange { name: &'static str, value: f32 },
    #[error("{name} range is empty: {start}..{end}")]
    EmptyRange {
        name: &'static str,
        start: f32,
        end: f32,
    },
}

/// Tunable constants of the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub width: u32,
    pub height: u32,
    pub particle_count: usize,
    pub seed: Option<u64>,
    pub background: Srgb<u8>,

    pub pointer_radius: f32,
    pub particle_size: Range<f32>,
    pub particle_speed: Range<f32>,

    pub link_distance: f32,
    pub link_opacity: f32,

    pub pulse_max_radius: f32,
    pub pulse_opacity: f32,
    pub pulse_growth: f32,
    pub pulse_decay: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            particle_count: 80,
            seed: None,
            background: srgb(10, 14, 20),
            pointer_radius: 120.0,
            particle_size: 1.0..3.0,
            particle_speed: -0.5..0.5,
            link_distance: 120.0,
            link_opacity: 0.25,
            pulse_max_radius: 250.0,
            pulse_opacity: 0.8,
            pulse_growth: 6.0,
            pulse_decay: 0.02,
        }
    }
}

/// Seeded when a seed is configured, otherwise from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl FieldConfig {
    pub fn from_args(args: &Args) -> Self {
        FieldConfig {
            width: args.width,
            height: args.height,
            particle_count: args.particles,
            seed: args.seed,
            ..FieldConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptySurface {
                width: self.width,
                height: self.height,
            });
        }

        let positive = [
            ("pointer radius", self.pointer_radius),
            ("link distance", self.link_distance),
            ("pulse max radius", self.pulse_max_radius),
            ("pulse growth", self.pulse_growth),
            ("pulse decay", self.pulse_decay),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        for (name, value) in [
            ("link opacity", self.link_opacity),
            ("pulse opacity", self.pulse_opacity),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::OpacityOutOfRange { name, value });
            }
        }

        for (name, range) in [
            ("particle size", &self.particle_size),
            ("particle speed", &self.particle_speed),
        ] {
            if range.is_empty() {
                return Err(ConfigError::EmptyRange {
                    name,
                    start: range.start,
                    end: range.end,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn args_override_defaults() {
        let args = Args::parse_from([
            "particle-field",
            "--width",
            "640",
            "--particles",
            "12",
            "--seed",
            "7",
        ]);
        let config = FieldConfig::from_args(&args);
        assert_eq!(config.width, 640);
        assert_eq!(config.height, WINDOW_HEIGHT);
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.link_distance, 120.0);
        assert_eq!(args.headless_frames, None);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        use rand::Rng;
        let a: u64 = make_rng(Some(3)).gen();
        let b: u64 = make_rng(Some(3)).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_empty_surface() {
        let config = FieldConfig {
            height: 0,
            ..FieldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptySurface {
                width: WINDOW_WIDTH,
                height: 0
            })
        );
    }

    #[test]
    fn rejects_pulses_that_never_fade() {
        let config = FieldConfig {
            pulse_decay: 0.0,
            ..FieldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                name: "pulse decay",
                ..
            })
        ));
    }

    #[test]
    fn rejects_opacity_above_one() {
        let config = FieldConfig {
            pulse_opacity: 1.5,
            ..FieldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OpacityOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_empty_size_range() {
        let config = FieldConfig {
            particle_size: 3.0..3.0,
            ..FieldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyRange {
                name: "particle size",
                ..
            })
        ));
    }
}
