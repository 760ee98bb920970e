//! Crank gesture tracking.
//!
//! The handle is turned by dragging the pointer around its centre. Each move
//! sample contributes the signed angle travelled since the previous sample;
//! once the running total reaches the threshold the turn completes and the
//! machine dispenses.

use log::debug;

/// Angle of the pointer `(ex, ey)` around the centre `(cx, cy)`, in degrees.
pub fn pointer_angle(cx: f64, cy: f64, ex: f64, ey: f64) -> f64 {
    (ey - cy).atan2(ex - cx).to_degrees()
}

/// Map an angle delta into `(-180, 180]` so that crossing the ±180° seam
/// between two samples counts as a small step rather than a full revolution.
pub fn normalize_delta(delta: f64) -> f64 {
    180.0 - (180.0 - delta).rem_euclid(360.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrankPhase {
    /// Not enough coins yet; handle disabled.
    Idle,
    /// Price paid; handle enabled and waiting for a grab.
    Armed,
    /// Pointer is down on the handle.
    Turning,
    /// Threshold reached; capsule dispensed for this turn.
    Dispensed,
}

/// Result of feeding a pointer-move sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrankMove {
    Ignored,
    /// Handle should be drawn at `rotation` degrees.
    Rotated { rotation: f64 },
    /// Threshold crossed on this sample. Emitted at most once per turn.
    Dispense { rotation: f64 },
}

/// Result of releasing the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrankRelease {
    Ignored,
    /// Released short of the threshold; handle returns to 0°.
    SnapBack,
}

#[derive(Clone, Debug)]
pub struct Crank {
    phase: CrankPhase,
    threshold: f64,
    accumulated: f64,
    rotation: f64,
    last_angle: f64,
}

impl Crank {
    pub fn new(threshold: f64) -> Self {
        Self {
            phase: CrankPhase::Idle,
            threshold,
            accumulated: 0.0,
            rotation: 0.0,
            last_angle: 0.0,
        }
    }

    pub fn phase(&self) -> CrankPhase {
        self.phase
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.phase, CrankPhase::Armed | CrankPhase::Turning)
    }

    pub fn is_turning(&self) -> bool {
        self.phase == CrankPhase::Turning
    }

    /// Back to a disabled handle at 0° for a fresh turn.
    pub fn reset(&mut self) {
        self.phase = CrankPhase::Idle;
        self.accumulated = 0.0;
        self.rotation = 0.0;
        self.last_angle = 0.0;
    }

    /// Enable the handle. Only meaningful from `Idle`; never disables.
    pub fn arm(&mut self) {
        if self.phase == CrankPhase::Idle {
            self.phase = CrankPhase::Armed;
        }
    }

    /// Pointer down on the handle at `angle`. Returns whether a turn started.
    pub fn grab(&mut self, angle: f64) -> bool {
        if self.phase != CrankPhase::Armed {
            return false;
        }
        self.phase = CrankPhase::Turning;
        self.last_angle = angle;
        true
    }

    pub fn drag(&mut self, angle: f64) -> CrankMove {
        if self.phase != CrankPhase::Turning {
            return CrankMove::Ignored;
        }
        let delta = normalize_delta(angle - self.last_angle);
        self.last_angle = angle;
        self.accumulated += delta;
        self.rotation += delta;
        if self.accumulated >= self.threshold {
            debug!("crank reached {:.1}deg, dispensing", self.accumulated);
            self.phase = CrankPhase::Dispensed;
            return CrankMove::Dispense { rotation: self.rotation };
        }
        CrankMove::Rotated { rotation: self.rotation }
    }

    pub fn release(&mut self) -> CrankRelease {
        if self.phase != CrankPhase::Turning {
            return CrankRelease::Ignored;
        }
        debug!("crank released at {:.1}deg, snapping back", self.accumulated);
        self.phase = CrankPhase::Armed;
        self.accumulated = 0.0;
        self.rotation = 0.0;
        CrankRelease::SnapBack
    }
}
