// core/current.rs
//
// Swell state machine: one Current per simulated underwater current.
// Each step produces a 3D displacement vector that ramps up, peaks, and
// decays, with a weaker "pre-swell" phase before the main surge.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Nominal strength is rescaled by this to get the peak displacement
/// magnitude per step.
const STRENGTH_REALIGNMENT: f64 = 0.1;

/// Fraction of the phase peak a working vector is armed at. The growth
/// is a geometric progression, so the base must be nonzero.
const RAMP_SEED: f64 = 0.01;

/// Phase of the swell cycle.
///
/// The cycle runs PreMainUp → PreMainDown → MainUp → MainDown, after
/// which the current deactivates itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwellStage {
    /// Main surge gaining magnitude.
    MainUp,
    /// Main surge decaying back to rest.
    MainDown,
    /// Weak leading swell gaining magnitude.
    #[default]
    PreMainUp,
    /// Weak leading swell releasing.
    PreMainDown,
}

/// A single underwater current.
///
/// Stepped once per simulation tick via [`Current::increment_to_next_step`];
/// the returned displacement is added to affected organisms by the host
/// loop. Configuration fields are plain public properties, set before
/// [`Current::start`].
#[derive(Debug, Clone)]
pub struct Current {
    /// Nominal magnitude. Peak per-step displacement is `strength * 0.1`.
    pub strength: f64,
    /// Heading in degrees; 0 points up the screen (negative Y).
    pub direction: f64,
    /// Per-step growth ratio, strictly inside (0, 1). Rising phases
    /// divide by this, so 1.0 would never converge.
    pub acceleration: f64,
    /// Per-step decay ratio, strictly inside (0, 1).
    pub deceleration: f64,
    /// Dampens how sharply the pre-swell ramps relative to the main phase.
    pub pre_current_acceleration_factor: f64,
    /// Dampens how sharply the pre-swell releases relative to the main phase.
    pub pre_current_deceleration_factor: f64,
    /// How much weaker the pre-swell peak is than the main peak.
    pub pre_current_strength_factor: f64,
    /// Vertical drift contributed each step, scaled by the phase rate.
    pub z_adjustment_per_step: f64,
    /// Upper bound on accumulated vertical drift.
    pub maximum_z_adjustment: f64,
    /// Lower bound on accumulated vertical drift.
    pub minimum_z_adjustment: f64,
    /// Decaying axis magnitudes below this snap to zero, ending the
    /// otherwise asymptotic tail.
    pub minimum_xy_movement_before_zeroing: f64,
    entry_stage: SwellStage,
    stage: SwellStage,
    active: bool,
    relative_direction: DVec2,
    pre_current_relative_direction: DVec2,
    vector: DVec3,
    total_z_adjustment: f64,
}

impl Default for Current {
    fn default() -> Self {
        Self {
            strength: 1.0,
            direction: 0.0,
            acceleration: 0.95,
            deceleration: 0.97,
            pre_current_acceleration_factor: 2.0,
            pre_current_deceleration_factor: 2.0,
            pre_current_strength_factor: 4.0,
            z_adjustment_per_step: 0.0,
            maximum_z_adjustment: 10.0,
            minimum_z_adjustment: -10.0,
            minimum_xy_movement_before_zeroing: 0.001,
            entry_stage: SwellStage::PreMainUp,
            stage: SwellStage::PreMainUp,
            active: false,
            relative_direction: DVec2::ZERO,
            pre_current_relative_direction: DVec2::ZERO,
            vector: DVec3::ZERO,
            total_z_adjustment: 0.0,
        }
    }
}

impl Current {
    /// Create a current with the given strength, heading and vertical step.
    pub fn new(strength: f64, direction: f64, z_adjustment_per_step: f64) -> Self {
        Self {
            strength,
            direction,
            z_adjustment_per_step,
            ..Self::default()
        }
    }

    // -- Builder pattern --

    /// Stage the current enters when armed via [`Current::start`].
    pub fn with_entry_stage(mut self, stage: SwellStage) -> Self {
        self.entry_stage = stage;
        self
    }

    /// Arm the current at its configured entry stage. Re-arming while
    /// active is allowed and resets the working vectors.
    pub fn start(&mut self) {
        self.start_at(self.entry_stage);
    }

    /// Arm the current at a specific stage.
    ///
    /// Entering a decaying stage first runs a priming loop that ramps the
    /// rising side of the same axis pair to the phase peak, so the first
    /// emitted step is already at full magnitude rather than snapping.
    pub fn start_at(&mut self, stage: SwellStage) {
        debug_assert!(self.strength > 0.0, "strength must be positive");
        debug_assert!(
            self.acceleration > 0.0 && self.acceleration < 1.0,
            "acceleration must lie inside (0, 1)"
        );
        debug_assert!(
            self.deceleration > 0.0 && self.deceleration < 1.0,
            "deceleration must lie inside (0, 1)"
        );
        debug_assert!(
            self.minimum_xy_movement_before_zeroing > 0.0,
            "zeroing threshold must be positive"
        );

        let heading = heading_of(self.direction);
        self.relative_direction = heading * self.main_peak() * RAMP_SEED;
        self.pre_current_relative_direction = heading * self.pre_peak() * RAMP_SEED;

        match stage {
            SwellStage::PreMainDown => {
                let rate = self.pre_up_rate();
                let peak = self.pre_peak();
                while self.pre_current_relative_direction.length() < peak {
                    self.pre_current_relative_direction *= rate;
                }
                rescale(&mut self.pre_current_relative_direction, peak);
            }
            SwellStage::MainDown => {
                let rate = self.main_up_rate();
                let peak = self.main_peak();
                while self.relative_direction.length() < peak {
                    self.relative_direction *= rate;
                }
                rescale(&mut self.relative_direction, peak);
            }
            SwellStage::PreMainUp | SwellStage::MainUp => {}
        }

        self.stage = stage;
        self.active = true;
        let armed = match stage {
            SwellStage::PreMainUp | SwellStage::PreMainDown => self.pre_current_relative_direction,
            SwellStage::MainUp | SwellStage::MainDown => self.relative_direction,
        };
        self.vector = DVec3::new(armed.x, armed.y, 0.0);
        log::debug!(
            "current armed at {:?} (strength {}, heading {} deg)",
            stage,
            self.strength,
            self.direction
        );
    }

    /// Deactivate immediately, zeroing the displacement vector.
    pub fn stop(&mut self) {
        self.vector = DVec3::ZERO;
        self.active = false;
        log::debug!("current stopped");
    }

    /// Advance the swell by exactly one tick and return the displacement
    /// for this step. Must only be called while active; in release builds
    /// a stopped current yields a zero vector.
    pub fn increment_to_next_step(&mut self) -> DVec3 {
        debug_assert!(self.active, "stepped a current that is not active");
        if !self.active {
            return DVec3::ZERO;
        }

        let rate;
        let xy;
        match self.stage {
            SwellStage::PreMainUp => {
                rate = self.pre_up_rate();
                self.pre_current_relative_direction *= rate;
                let peak = self.pre_peak();
                if self.pre_current_relative_direction.length() >= peak {
                    rescale(&mut self.pre_current_relative_direction, peak);
                    self.advance_stage(SwellStage::PreMainDown);
                }
                xy = self.pre_current_relative_direction;
            }
            SwellStage::PreMainDown => {
                rate = self.pre_down_rate();
                self.pre_current_relative_direction *= rate;
                zero_small_axes(
                    &mut self.pre_current_relative_direction,
                    self.minimum_xy_movement_before_zeroing,
                );
                if self.pre_current_relative_direction.length() <= 0.0 {
                    self.relative_direction =
                        heading_of(self.direction) * self.main_peak() * RAMP_SEED;
                    self.advance_stage(SwellStage::MainUp);
                }
                xy = self.pre_current_relative_direction;
            }
            SwellStage::MainUp => {
                rate = self.main_up_rate();
                self.relative_direction *= rate;
                let peak = self.main_peak();
                if self.relative_direction.length() >= peak {
                    rescale(&mut self.relative_direction, peak);
                    self.advance_stage(SwellStage::MainDown);
                }
                xy = self.relative_direction;
            }
            SwellStage::MainDown => {
                rate = self.deceleration;
                self.relative_direction *= rate;
                zero_small_axes(
                    &mut self.relative_direction,
                    self.minimum_xy_movement_before_zeroing,
                );
                if self.relative_direction.length() <= 0.0 {
                    self.stop();
                    return self.vector;
                }
                xy = self.relative_direction;
            }
        }

        let z = self.budget_z(self.z_adjustment_per_step * rate);
        self.vector = DVec3::new(xy.x, xy.y, z);
        self.vector
    }

    /// The last computed displacement, without advancing.
    pub fn active_step(&self) -> DVec3 {
        self.vector
    }

    /// Current 2D magnitude as a percentage of the main-phase peak.
    /// Presentation layers use this for opacity-style effects.
    pub fn current_strength_percentage(&self) -> f64 {
        (100.0 / self.main_peak()) * self.vector.truncate().length()
    }

    /// Whether the current is armed and producing displacements.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The stage the swell is currently in.
    pub fn stage(&self) -> SwellStage {
        self.stage
    }

    /// Net vertical displacement emitted so far. Persists across re-arms;
    /// the vertical bounds cover the current's whole lifetime.
    pub fn total_z_adjustment(&self) -> f64 {
        self.total_z_adjustment
    }

    // -- Phase arithmetic --

    fn main_peak(&self) -> f64 {
        self.strength * STRENGTH_REALIGNMENT
    }

    fn pre_peak(&self) -> f64 {
        self.main_peak() / self.pre_current_strength_factor
    }

    fn main_up_rate(&self) -> f64 {
        1.0 / self.acceleration
    }

    fn pre_up_rate(&self) -> f64 {
        1.0 / (self.acceleration - (1.0 - self.acceleration) / self.pre_current_acceleration_factor)
    }

    fn pre_down_rate(&self) -> f64 {
        self.deceleration - (1.0 - self.deceleration) / self.pre_current_deceleration_factor
    }

    /// Apply the vertical budget to a tentative Z step. A step that would
    /// land the running total at or past a bound is dropped outright;
    /// vertical motion in that direction ceases until the sign flips.
    fn budget_z(&mut self, z: f64) -> f64 {
        if z > 0.0 && self.total_z_adjustment + z >= self.maximum_z_adjustment {
            return 0.0;
        }
        if z < 0.0 && self.total_z_adjustment + z <= self.minimum_z_adjustment {
            return 0.0;
        }
        self.total_z_adjustment += z;
        z
    }

    fn advance_stage(&mut self, next: SwellStage) {
        log::trace!("swell stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}

/// Unit heading for a compass-style angle in degrees, 0 pointing up the
/// screen (negative Y), 90 pointing right.
fn heading_of(direction_deg: f64) -> DVec2 {
    let radians = direction_deg.to_radians();
    DVec2::new(radians.sin(), -radians.cos())
}

fn rescale(v: &mut DVec2, length: f64) {
    let current = v.length();
    if current > 0.0 {
        *v *= length / current;
    }
}

fn zero_small_axes(v: &mut DVec2, threshold: f64) {
    if v.x.abs() < threshold {
        v.x = 0.0;
    }
    if v.y.abs() < threshold {
        v.y = 0.0;
    }
}
