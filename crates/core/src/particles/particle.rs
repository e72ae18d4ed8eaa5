//! Immutable per-particle seed values

use crate::core_types::{Rgb, Vec3};
use serde::{Deserialize, Serialize};

/// Which motion law drives a particle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Rising, flickering flame tongues
    Fire,
    /// Slow, expanding puffs above the flames
    Smoke,
    /// Static glints clustered at the base
    Ember,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 3] = [ParticleKind::Fire, ParticleKind::Smoke, ParticleKind::Ember];

    /// Convert from u8 for FFI compatibility
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ParticleKind::Fire),
            1 => Some(ParticleKind::Smoke),
            2 => Some(ParticleKind::Ember),
            _ => None,
        }
    }

    /// Convert to u8 for FFI compatibility
    pub fn as_u8(&self) -> u8 {
        match self {
            ParticleKind::Fire => 0,
            ParticleKind::Smoke => 1,
            ParticleKind::Ember => 2,
        }
    }
}

/// Extra seed values only flames carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlameTraits {
    /// Spin rate (rad/s); negative spins the other way
    pub rotation_speed: f32,
    /// Progress offset subtracted before ramp lookup; higher stays yellow longer
    pub color_bias: f32,
    /// Amplitude of the spiral drift as the flame rises
    pub twist_factor: f32,
    /// Flicker frequency (rad/s) for size, height wobble, and opacity
    pub flicker_frequency: f32,
}

impl Default for FlameTraits {
    fn default() -> Self {
        Self {
            rotation_speed: 0.0,
            color_bias: 0.0,
            twist_factor: 0.0,
            flicker_frequency: 10.0,
        }
    }
}

/// One particle's seed values.
///
/// Created once when a field is built and never mutated afterwards: every
/// per-frame quantity is a pure function of these values and elapsed time.
///
/// # Example
///
/// ```
/// use absolution_fx_core::{Particle, Vec3};
///
/// let p = Particle::new(Vec3::zeros()).with_speed(1.0).with_lifetime(1.0);
/// assert_eq!(p.progress(0.5), 0.5);
/// assert_eq!(p.progress(1.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub(crate) origin: Vec3,
    pub(crate) speed: f32,
    pub(crate) base_size: f32,
    pub(crate) flicker_phase: f32,
    pub(crate) wave_phase: f32,
    pub(crate) lifetime: f32,
    pub(crate) seed: f32,
    pub(crate) flame: Option<FlameTraits>,
    pub(crate) tint: Option<Rgb>,
}

impl Particle {
    /// Particle at `origin` with unit speed, size, and lifetime and zero phases.
    pub fn new(origin: Vec3) -> Self {
        Self {
            origin,
            speed: 1.0,
            base_size: 1.0,
            flicker_phase: 0.0,
            wave_phase: 0.0,
            lifetime: 1.0,
            seed: 0.0,
            flame: None,
            tint: None,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_base_size(mut self, base_size: f32) -> Self {
        self.base_size = base_size;
        self
    }

    pub fn with_phases(mut self, flicker_phase: f32, wave_phase: f32) -> Self {
        self.flicker_phase = flicker_phase;
        self.wave_phase = wave_phase;
        self
    }

    /// Non-positive lifetimes are replaced by a tiny positive value so
    /// [`progress`](Self::progress) stays defined.
    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = if lifetime > 0.0 { lifetime } else { f32::EPSILON };
        self
    }

    pub fn with_seed(mut self, seed: f32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_flame(mut self, flame: FlameTraits) -> Self {
        self.flame = Some(flame);
        self
    }

    pub fn with_tint(mut self, tint: Rgb) -> Self {
        self.tint = Some(tint);
        self
    }

    /// Normalized position in the repeating lifecycle, in `[0, 1)`.
    ///
    /// `((t · speed + flicker_phase) mod lifetime) / lifetime`, a sawtooth
    /// with period `lifetime / speed` in `t`. Depends on nothing but `t`, so
    /// any frame can be recomputed without history.
    #[inline]
    pub fn progress(&self, t: f32) -> f32 {
        let p = (t * self.speed + self.flicker_phase).rem_euclid(self.lifetime) / self.lifetime;
        // rem_euclid may round up to exactly `lifetime`
        if p.is_finite() && p < 1.0 {
            p
        } else {
            0.0
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    pub fn flicker_phase(&self) -> f32 {
        self.flicker_phase
    }

    pub fn wave_phase(&self) -> f32 {
        self.wave_phase
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn seed(&self) -> f32 {
        self.seed
    }

    pub fn flame(&self) -> Option<FlameTraits> {
        self.flame
    }

    pub fn tint(&self) -> Option<Rgb> {
        self.tint
    }
}
