//! Complaint when the head is spun too fast
//!
//! The viewer can orbit the head. Spinning it faster than
//! [`SPIN_THRESHOLD`] makes the Pope complain, at most once per
//! [`DIZZY_COOLDOWN`].

use std::f32::consts::{PI, TAU};
use std::time::Duration;

/// Azimuth speed (rad/s) above which the head gets dizzy.
pub const SPIN_THRESHOLD: f32 = 3.5;
/// Minimum spacing between complaints.
pub const DIZZY_COOLDOWN: Duration = Duration::from_secs(20);
pub const DIZZY_MESSAGE: &str = "Penitent One, the spinning... please...";

/// Tolerance (radians) for the view to count as the default front view.
const DEFAULT_VIEW_TOLERANCE: f32 = 0.1;

/// Whether the orbit camera is still looking at the head from the front.
#[must_use]
pub fn is_default_view(azimuth: f32, polar: f32) -> bool {
    azimuth.abs() < DEFAULT_VIEW_TOLERANCE
        && (polar - std::f32::consts::FRAC_PI_2).abs() < DEFAULT_VIEW_TOLERANCE
}

#[derive(Debug, Clone)]
pub struct SpinMonitor {
    threshold: f32,
    cooldown: Duration,
    last_sample: Option<(f32, Duration)>,
    last_complaint: Option<Duration>,
    speed: f32,
}

impl Default for SpinMonitor {
    fn default() -> Self {
        Self::new(SPIN_THRESHOLD, DIZZY_COOLDOWN)
    }
}

impl SpinMonitor {
    #[must_use]
    pub fn new(threshold: f32, cooldown: Duration) -> Self {
        Self {
            threshold,
            cooldown,
            last_sample: None,
            last_complaint: None,
            speed: 0.0,
        }
    }

    /// Last measured azimuth speed (rad/s)
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Feed the camera azimuth observed at `now`.
    ///
    /// Returns the complaint when the speed since the previous sample
    /// exceeds the threshold and the cooldown has passed. Samples that do
    /// not advance time are ignored.
    pub fn sample(&mut self, azimuth: f32, now: Duration) -> Option<&'static str> {
        let Some((last_azimuth, last_time)) = self.last_sample else {
            self.last_sample = Some((azimuth, now));
            return None;
        };
        if now <= last_time {
            return None;
        }

        let dt = (now - last_time).as_secs_f32();
        // Azimuth wraps at ±π behind the head
        let delta = (azimuth - last_azimuth + PI).rem_euclid(TAU) - PI;
        self.speed = delta.abs() / dt;
        self.last_sample = Some((azimuth, now));

        let cooled = self
            .last_complaint
            .is_none_or(|last| now.saturating_sub(last) > self.cooldown);
        if self.speed > self.threshold && cooled {
            self.last_complaint = Some(now);
            Some(DIZZY_MESSAGE)
        } else {
            None
        }
    }
}
