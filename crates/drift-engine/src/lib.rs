pub mod components;
pub mod core;
pub mod settings;
pub mod systems;

// Re-export key types at crate root for convenience
pub use components::organism::{Organism, OrganismId, OrganismKind};
pub use core::clock::StepClock;
pub use core::current::{Current, SwellStage};
pub use core::rng::Rng;
pub use core::swarm::Swarm;
pub use settings::profile::{CurrentProfile, ProfileError};
pub use systems::collision::{
    circles_fully_overlap, circles_intersect, circles_intersect_on_path, distance,
    projected_collision_point, Bounds,
};
pub use systems::kinematics::{generate_z_step, random_vector};
