use glam::DVec3;

use crate::components::organism::{Organism, OrganismId, OrganismKind};
use crate::systems::collision::circles_intersect;

/// Flat-Vec organism storage. Sized for a screenful of bodies, not
/// millions.
pub struct Swarm {
    organisms: Vec<Organism>,
}

impl Swarm {
    pub fn new() -> Self {
        Self {
            organisms: Vec::with_capacity(128),
        }
    }

    /// Create a swarm with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            organisms: Vec::with_capacity(capacity),
        }
    }

    /// Add an organism to the swarm.
    pub fn spawn(&mut self, organism: Organism) {
        self.organisms.push(organism);
    }

    /// Remove an organism by ID. Returns the removed organism if found.
    pub fn despawn(&mut self, id: OrganismId) -> Option<Organism> {
        if let Some(idx) = self.organisms.iter().position(|o| o.id == id) {
            Some(self.organisms.swap_remove(idx))
        } else {
            None
        }
    }

    /// Get a reference to an organism by ID.
    pub fn get(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.id == id)
    }

    /// Get a mutable reference to an organism by ID.
    pub fn get_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.organisms.iter_mut().find(|o| o.id == id)
    }

    /// Iterate over all organisms.
    pub fn iter(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.iter()
    }

    /// Iterate over all organisms mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Organism> {
        self.organisms.iter_mut()
    }

    /// Find the first organism of the given kind.
    pub fn find_by_kind(&self, kind: OrganismKind) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.kind == kind)
    }

    /// Find all organisms of the given kind.
    pub fn find_all_by_kind(&self, kind: OrganismKind) -> Vec<&Organism> {
        self.organisms.iter().filter(|o| o.kind == kind).collect()
    }

    /// Apply a current's displacement to every active organism.
    pub fn drift(&mut self, vector: DVec3) {
        for organism in self.organisms.iter_mut().filter(|o| o.active) {
            organism.drift_by(vector);
        }
    }

    /// Every distinct pair of active organisms whose bounding circles
    /// currently touch. Each pair is reported once, in spawn order.
    pub fn overlapping_pairs(&self) -> Vec<(OrganismId, OrganismId)> {
        let mut pairs = Vec::new();
        for i in 0..self.organisms.len() {
            for j in i + 1..self.organisms.len() {
                let (a, b) = (&self.organisms[i], &self.organisms[j]);
                if a.active && b.active && circles_intersect(&a.bounds(), &b.bounds()) {
                    pairs.push((a.id, b.id));
                }
            }
        }
        pairs
    }

    /// Number of organisms in the swarm.
    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    /// Whether the swarm is empty.
    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    /// Clear all organisms.
    pub fn clear(&mut self) {
        self.organisms.clear();
    }
}

impl Default for Swarm {
    fn default() -> Self {
        Self::new()
    }
}
