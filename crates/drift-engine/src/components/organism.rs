use glam::{DVec2, DVec3};

use crate::systems::collision::Bounds;

/// Unique identifier for an organism in a swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrganismId(pub u32);

/// What kind of body an organism is. The simulation treats all kinds the
/// same; spawn logic and the renderer differentiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganismKind {
    Plankton,
    Bubble,
    MainBubble,
}

/// Fat organism struct: a circular body plus cosmetic fields the
/// simulation core never interprets.
#[derive(Debug, Clone)]
pub struct Organism {
    /// Unique identifier.
    pub id: OrganismId,
    /// Body kind, for spawn logic and rendering.
    pub kind: OrganismKind,
    /// Inactive organisms are skipped by swarm-wide operations.
    pub active: bool,
    /// Center position in world space.
    pub pos: DVec2,
    /// Body radius in world units.
    pub radius: f64,
    /// Current travel per tick. X/Y move the body, Z wanders its depth.
    pub velocity: DVec3,
    /// Accumulated depth displacement.
    pub depth: f64,
    /// Packed RGBA fill, passed through to the renderer untouched.
    pub fill: u32,
    /// Packed RGBA stroke, passed through to the renderer untouched.
    pub stroke: u32,
}

impl Organism {
    /// Create an organism of the given kind at the origin.
    pub fn new(id: OrganismId, kind: OrganismKind) -> Self {
        Self {
            id,
            kind,
            active: true,
            pos: DVec2::ZERO,
            radius: 1.0,
            velocity: DVec3::ZERO,
            depth: 0.0,
            fill: 0xffff_ffff,
            stroke: 0xffff_ffff,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: DVec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_fill(mut self, fill: u32) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: u32) -> Self {
        self.stroke = stroke;
        self
    }

    /// Bounding box of the body circle, in the shape the overlap tests
    /// expect.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_circle(self.pos, self.radius)
    }

    /// Apply a displacement: X/Y move the body, Z accumulates into depth.
    pub fn drift_by(&mut self, vector: DVec3) {
        self.pos.x += vector.x;
        self.pos.y += vector.y;
        self.depth += vector.z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_wrap_the_body() {
        let organism = Organism::new(OrganismId(1), OrganismKind::Bubble)
            .with_pos(DVec2::new(10.0, 20.0))
            .with_radius(4.0);
        let bounds = organism.bounds();
        assert!((bounds.left - 6.0).abs() < 1e-12);
        assert!((bounds.top - 16.0).abs() < 1e-12);
        assert!((bounds.width - 8.0).abs() < 1e-12);
        assert!(bounds.is_round());
        assert_eq!(bounds.center(), organism.pos);
    }

    #[test]
    fn drift_splits_planar_and_depth_motion() {
        let mut organism = Organism::new(OrganismId(2), OrganismKind::Plankton);
        organism.drift_by(DVec3::new(1.0, -2.0, 0.5));
        organism.drift_by(DVec3::new(0.0, 0.0, 0.25));
        assert_eq!(organism.pos, DVec2::new(1.0, -2.0));
        assert!((organism.depth - 0.75).abs() < 1e-12);
    }

    #[test]
    fn cosmetics_pass_through() {
        let organism = Organism::new(OrganismId(3), OrganismKind::MainBubble)
            .with_fill(0x3366_99ff)
            .with_stroke(0x1122_33ff);
        assert_eq!(organism.fill, 0x3366_99ff);
        assert_eq!(organism.stroke, 0x1122_33ff);
    }
}
