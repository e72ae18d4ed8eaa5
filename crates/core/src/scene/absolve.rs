//! Absolve flow: confirm, burn, clear
//!
//! `Idle → Confirming → Burning → Idle`. Confirming is the modal prompt;
//! confirming it mounts the fire overlay, and once the burn duration has
//! elapsed the overlay is unmounted and the caller is told to clear the
//! conversation.

use super::config::ConfigError;
use super::overlay::{DisplaySurface, FireOverlay};
use std::time::Duration;
use tracing::info;

/// Default length of the burn before messages are cleared.
pub const BURN_DURATION: Duration = Duration::from_millis(2500);

/// Prompt shown while confirming.
pub const CONFIRM_PROMPT: &str = "For these and all my sins, I am truly sorry";
/// Label of the confirm action.
pub const CONFIRM_LABEL: &str = "Amen";
/// Label of the cancel action.
pub const CANCEL_LABEL: &str = "Keep Praying";
/// Caption drawn over the flames.
pub const BURN_CAPTION: &str = "THANKS BE TO GOD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsolveState {
    Idle,
    Confirming,
    /// Burning since the given timestamp
    Burning { started: Duration },
}

/// Emitted once the burn completes; the conversation should now be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cleared;

#[derive(Debug, Clone)]
pub struct AbsolveTransition {
    state: AbsolveState,
    burn_duration: Duration,
}

impl Default for AbsolveTransition {
    fn default() -> Self {
        Self::new(BURN_DURATION)
    }
}

impl AbsolveTransition {
    #[must_use]
    pub fn new(burn_duration: Duration) -> Self {
        Self {
            state: AbsolveState::Idle,
            burn_duration,
        }
    }

    pub fn state(&self) -> AbsolveState {
        self.state
    }

    pub fn is_burning(&self) -> bool {
        matches!(self.state, AbsolveState::Burning { .. })
    }

    /// Sending and confession selection are disabled while burning.
    pub fn accepts_input(&self) -> bool {
        !self.is_burning()
    }

    /// Open the confirmation prompt. Ignored unless idle.
    pub fn request(&mut self) -> bool {
        if self.state == AbsolveState::Idle {
            self.state = AbsolveState::Confirming;
            true
        } else {
            false
        }
    }

    /// Close the prompt without burning.
    pub fn cancel(&mut self) -> bool {
        if self.state == AbsolveState::Confirming {
            self.state = AbsolveState::Idle;
            true
        } else {
            false
        }
    }

    /// Accept the prompt at `now` and mount the overlay on `surface`.
    ///
    /// Returns `Ok(false)` when no prompt was open. A mount failure leaves
    /// the prompt open.
    pub fn confirm<S: DisplaySurface + ?Sized>(
        &mut self,
        now: Duration,
        overlay: &mut FireOverlay,
        surface: &S,
    ) -> Result<bool, ConfigError> {
        if self.state != AbsolveState::Confirming {
            return Ok(false);
        }
        overlay.mount(surface)?;
        self.state = AbsolveState::Burning { started: now };
        info!("Absolution started, burning for {:?}", self.burn_duration);
        Ok(true)
    }

    /// Advance to `now`; finishes the burn once its duration has elapsed.
    pub fn update(&mut self, now: Duration, overlay: &mut FireOverlay) -> Option<Cleared> {
        let AbsolveState::Burning { started } = self.state else {
            return None;
        };
        if now.saturating_sub(started) < self.burn_duration {
            return None;
        }

        overlay.unmount();
        self.state = AbsolveState::Idle;
        info!("Absolution complete");
        Some(Cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{FireEffectScene, SceneConfig};

    struct Surface;

    impl DisplaySurface for Surface {
        fn size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn present(&mut self, _scene: &FireEffectScene) {}
    }

    fn overlay() -> FireOverlay {
        FireOverlay::new(SceneConfig {
            seed: Some(1),
            ..SceneConfig::default()
        })
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut absolve = AbsolveTransition::default();
        assert!(absolve.request());
        assert_eq!(absolve.state(), AbsolveState::Confirming);
        assert!(!absolve.request());
        assert!(absolve.cancel());
        assert_eq!(absolve.state(), AbsolveState::Idle);
    }

    #[test]
    fn test_confirm_requires_prompt() {
        let mut absolve = AbsolveTransition::default();
        let mut overlay = overlay();
        assert_eq!(absolve.confirm(Duration::ZERO, &mut overlay, &Surface), Ok(false));
        assert!(!overlay.is_mounted());
    }

    #[test]
    fn test_burn_clears_after_duration() {
        let mut absolve = AbsolveTransition::default();
        let mut overlay = overlay();

        absolve.request();
        let start = Duration::from_secs(10);
        assert_eq!(absolve.confirm(start, &mut overlay, &Surface), Ok(true));
        assert!(overlay.is_mounted());
        assert!(!absolve.accepts_input());

        assert_eq!(absolve.update(start + Duration::from_millis(2499), &mut overlay), None);
        assert!(overlay.is_mounted());

        assert_eq!(absolve.update(start + BURN_DURATION, &mut overlay), Some(Cleared));
        assert!(!overlay.is_mounted());
        assert!(absolve.accepts_input());
        assert_eq!(absolve.update(start + Duration::from_secs(5), &mut overlay), None);
    }

    #[test]
    fn test_cannot_cancel_while_burning() {
        let mut absolve = AbsolveTransition::new(Duration::from_millis(1500));
        let mut overlay = overlay();
        absolve.request();
        absolve.confirm(Duration::ZERO, &mut overlay, &Surface).unwrap();
        assert!(!absolve.cancel());
        assert!(absolve.is_burning());
    }
}
