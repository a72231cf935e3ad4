//! Overlap tests for circular bodies, over plain numeric bounds.
//!
//! Everything here is a pure function of its arguments: no dependency on
//! any rendering type, no state. NaN inputs propagate as NaN results in
//! the usual floating-point way instead of raising errors.

use glam::DVec2;

/// Width/height mismatch at or below this still counts as a round circle.
const ROUNDNESS_TOLERANCE: f64 = 1e-9;

/// Most positions a swept-path test samples per tick.
const MAX_PATH_SAMPLES: u32 = 10;

/// Axis-aligned bounding parameters of a circular body: left/top corner
/// plus width and height, the way a render surface hands them out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounding box of a circle given center and radius.
    pub fn from_circle(center: DVec2, radius: f64) -> Self {
        Self {
            left: center.x - radius,
            top: center.y - radius,
            width: radius * 2.0,
            height: radius * 2.0,
        }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Radius taken from the width; meaningful for round bounds.
    pub fn radius(&self) -> f64 {
        self.width / 2.0
    }

    /// Whether the bounds describe a proper circle. Rendering rounding can
    /// leave width and height a hair apart, so a tolerance applies.
    pub fn is_round(&self) -> bool {
        (self.width - self.height).abs() <= ROUNDNESS_TOLERANCE
    }

    fn overlaps_box(&self, other: &Bounds) -> bool {
        self.left <= other.left + other.width
            && other.left <= self.left + self.width
            && self.top <= other.top + other.height
            && other.top <= self.top + self.height
    }

    /// This bounds slid back toward `start` by `fraction` of the travel.
    fn toward_start(&self, start: &Bounds, fraction: f64) -> Bounds {
        Bounds {
            left: self.left + (start.left - self.left) * fraction,
            top: self.top + (start.top - self.top) * fraction,
            width: self.width,
            height: self.height,
        }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Whether two circles touch or intersect.
///
/// Degenerate non-round bounds fall back to a bounding-box overlap test;
/// downstream collision tuning depends on that approximation, so it is
/// not replaced with true ellipse math.
pub fn circles_intersect(a: &Bounds, b: &Bounds) -> bool {
    if a.is_round() && b.is_round() {
        distance(a.center(), b.center()) <= a.radius() + b.radius()
    } else {
        a.overlaps_box(b)
    }
}

/// Whether two moving circles touched at any sampled instant of the tick.
///
/// End-of-tick overlap alone misses fast bodies that pass through each
/// other within one step. The travel of each circle is resampled at up to
/// [`MAX_PATH_SAMPLES`] positions, anchored at the end position and
/// working backward toward the start; a stationary pair collapses to a
/// single end-position test.
pub fn circles_intersect_on_path(
    end_a: &Bounds,
    start_a: &Bounds,
    end_b: &Bounds,
    start_b: &Bounds,
    steps: u32,
) -> bool {
    let moved = end_a.left != start_a.left
        || end_a.top != start_a.top
        || end_b.left != start_b.left
        || end_b.top != start_b.top;
    let samples = if moved {
        steps.clamp(1, MAX_PATH_SAMPLES)
    } else {
        1
    };
    for i in 0..samples {
        let fraction = f64::from(i) / f64::from(samples);
        let a = end_a.toward_start(start_a, fraction);
        let b = end_b.toward_start(start_b, fraction);
        if circles_intersect(&a, &b) {
            return true;
        }
    }
    false
}

/// Whether one circle lies wholly inside the other, touching allowed.
pub fn circles_fully_overlap(a: &Bounds, b: &Bounds) -> bool {
    distance(a.center(), b.center()) <= (a.radius() - b.radius()).abs()
}

/// The point on the circle's rim facing its direction of travel, pushed
/// out by the velocity itself, a one-step lookahead probe. A zero
/// velocity has no facing and yields NaN.
pub fn projected_collision_point(bounds: &Bounds, vector: DVec2) -> DVec2 {
    bounds.center() + vector.normalize() * bounds.radius() + vector
}
