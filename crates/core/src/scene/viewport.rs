//! Responsive viewport adaptation
//!
//! Maps the surface width to a camera zoom and a particle density tier. The
//! mapping is a pure step function of width; an optional hysteresis margin
//! keeps the current band until the width leaves it by more than the margin,
//! which stops a window dragged across a breakpoint from rebuilding fields on
//! every pixel.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Widths below this are mobile.
pub const MOBILE_BREAKPOINT: u32 = 768;
/// Widths below this are small mobile.
pub const SMALL_MOBILE_BREAKPOINT: u32 = 480;

/// Exclusive upper width of each zoom band, with the zoom used inside it.
const ZOOM_BANDS: [(u32, f32); 5] = [
    (360, 70.0),
    (SMALL_MOBILE_BREAKPOINT, 80.0),
    (640, 90.0),
    (MOBILE_BREAKPOINT, 100.0),
    (u32::MAX, 120.0),
];

/// How many particles a device class gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DensityTier {
    /// Narrower than 480 px
    SmallMobile,
    /// 480 to 767 px
    Mobile,
    /// 768 px and wider
    Desktop,
}

impl DensityTier {
    pub const ALL: [DensityTier; 3] = [Self::SmallMobile, Self::Mobile, Self::Desktop];

    #[must_use]
    pub const fn for_width(width: u32) -> Self {
        if width < SMALL_MOBILE_BREAKPOINT {
            Self::SmallMobile
        } else if width < MOBILE_BREAKPOINT {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Width band `[lower, upper)` covered by this tier
    const fn band(self) -> (u32, u32) {
        match self {
            Self::SmallMobile => (0, SMALL_MOBILE_BREAKPOINT),
            Self::Mobile => (SMALL_MOBILE_BREAKPOINT, MOBILE_BREAKPOINT),
            Self::Desktop => (MOBILE_BREAKPOINT, u32::MAX),
        }
    }
}

fn zoom_band_index(width: u32) -> usize {
    ZOOM_BANDS
        .iter()
        .position(|&(upper, _)| width < upper)
        .unwrap_or(ZOOM_BANDS.len() - 1)
}

fn zoom_band(index: usize) -> (u32, u32) {
    let lower = if index == 0 { 0 } else { ZOOM_BANDS[index - 1].0 };
    (lower, ZOOM_BANDS[index].0)
}

/// Orthographic zoom for a surface `width` px wide.
#[must_use]
pub fn zoom_for_width(width: u32) -> f32 {
    ZOOM_BANDS[zoom_band_index(width)].1
}

/// `width` lies in `[lower - margin, upper + margin)`
fn within_band((lower, upper): (u32, u32), width: u32, margin: u32) -> bool {
    width >= lower.saturating_sub(margin) && width < upper.saturating_add(margin)
}

/// Derived view of the current surface size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportProfile {
    pub width: u32,
    pub height: u32,
    pub is_mobile: bool,
    pub is_small_mobile: bool,
    pub zoom: f32,
    pub tier: DensityTier,
}

impl ViewportProfile {
    /// Profile with no hysteresis applied.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::with_bands(width, height, zoom_band_index(width), DensityTier::for_width(width))
    }

    fn with_bands(width: u32, height: u32, zoom_index: usize, tier: DensityTier) -> Self {
        Self {
            width,
            height,
            is_mobile: tier != DensityTier::Desktop,
            is_small_mobile: tier == DensityTier::SmallMobile,
            zoom: ZOOM_BANDS[zoom_index].1,
            tier,
        }
    }

    /// Aspect ratio, falling back to square for a zero height
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// What an [`ViewportAdapter::update`] changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportChange {
    pub profile: ViewportProfile,
    pub zoom_changed: bool,
    pub tier_changed: bool,
}

/// Tracks the surface size and reports zoom and tier transitions.
#[derive(Debug, Clone)]
pub struct ViewportAdapter {
    hysteresis_px: u32,
    zoom_index: usize,
    profile: ViewportProfile,
}

impl ViewportAdapter {
    #[must_use]
    pub fn new(width: u32, height: u32, hysteresis_px: u32) -> Self {
        let profile = ViewportProfile::from_size(width, height);
        Self {
            hysteresis_px,
            zoom_index: zoom_band_index(width),
            profile,
        }
    }

    #[must_use]
    pub fn profile(&self) -> ViewportProfile {
        self.profile
    }

    pub fn hysteresis_px(&self) -> u32 {
        self.hysteresis_px
    }

    /// Recompute the profile for a new surface size.
    pub fn update(&mut self, width: u32, height: u32) -> ViewportChange {
        let margin = self.hysteresis_px;
        let previous = self.profile;

        let zoom_index = if within_band(zoom_band(self.zoom_index), width, margin) {
            self.zoom_index
        } else {
            zoom_band_index(width)
        };
        let tier = if within_band(previous.tier.band(), width, margin) {
            previous.tier
        } else {
            DensityTier::for_width(width)
        };

        self.zoom_index = zoom_index;
        self.profile = ViewportProfile::with_bands(width, height, zoom_index, tier);

        let change = ViewportChange {
            profile: self.profile,
            zoom_changed: self.profile.zoom != previous.zoom,
            tier_changed: tier != previous.tier,
        };

        if change.zoom_changed || change.tier_changed {
            debug!(
                "Viewport {}x{}: zoom {} -> {}, tier {:?} -> {:?}",
                width, height, previous.zoom, self.profile.zoom, previous.tier, tier
            );
        }

        change
    }
}
