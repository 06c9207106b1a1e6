//! Animation scalars and their per-tick interpolation.

use serde::{Deserialize, Serialize};

/// Interpolation rate toward the target per ~16 ms tick.
pub const ANIM_RATE: f32 = 0.15;
/// Snap threshold: below this distance the value locks to the target.
pub const ANIM_EPSILON: f32 = 0.001;

/// The two continuous [0, 1] scalars driving geometry: `hover` expands
/// spacing and reveals the calendar, `header` reveals the top chrome and
/// the sidebar.
///
/// Each is linearly interpolated toward its 0/1 target by a fixed rate,
/// advanced from the single event-loop tick. Geometry reads the current
/// values and never advances them itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimScalars {
    pub hover: f32,
    pub header: f32,
}

impl AnimScalars {
    /// Both scalars fully expanded; the state every maximum-size
    /// computation uses.
    pub const FULL: AnimScalars = AnimScalars { hover: 1.0, header: 1.0 };

    /// Move both scalars one tick toward `target`. Returns true when either
    /// value changed, i.e. geometry must be recomputed.
    pub fn advance_toward(&mut self, target: AnimScalars) -> bool {
        let hover_moved = step(&mut self.hover, target.hover);
        let header_moved = step(&mut self.header, target.header);
        hover_moved || header_moved
    }

    /// Target for the current interaction state.
    pub fn target(engaged: bool) -> AnimScalars {
        if engaged { AnimScalars::FULL } else { AnimScalars::default() }
    }
}

fn step(value: &mut f32, target: f32) -> bool {
    if (*value - target).abs() > ANIM_EPSILON {
        *value += (target - *value) * ANIM_RATE;
        true
    } else if *value != target {
        *value = target;
        false
    } else {
        false
    }
}
