// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{presets, Material};
pub use collision::CollisionEvent;
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};

pub use rapier2d::prelude::Vector;
