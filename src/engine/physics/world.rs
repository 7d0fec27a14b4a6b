use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionEvent, CollisionEventQueue};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Physics world that manages all physics simulation
///
/// Uses screen coordinates: y grows downward, so gravity is positive.
pub struct PhysicsWorld {
    gravity: Vector<Real>,

    integration_parameters: IntegrationParameters,

    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    broad_phase: DefaultBroadPhase,

    narrow_phase: NarrowPhase,

    impulse_joint_set: ImpulseJointSet,

    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    rigid_body_set: RigidBodySet,

    collider_set: ColliderSet,

    collision_event_queue: CollisionEventQueue,

    /// Game entity ids attached to colliders
    collider_to_entity: HashMap<ColliderHandle, u64>,
}

impl PhysicsWorld {
    /// Create a new physics world with custom gravity and a fixed timestep
    pub fn new(gravity: Vector<Real>, dt: Real) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            collider_to_entity: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        // Clear previous step's collision events
        self.collision_event_queue.clear();

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &self.collision_event_queue,
        );
    }

    /// Insert a body with a single collider and tag both with an entity id
    pub fn spawn(
        &mut self,
        body: RigidBody,
        collider: Collider,
        entity_id: u64,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body_handle = self.rigid_body_set.insert(body);
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set);

        self.collider_to_entity.insert(collider_handle, entity_id);

        (body_handle, collider_handle)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        let attached: Vec<ColliderHandle> = self
            .rigid_body_set
            .get(handle)
            .map(|body| body.colliders().to_vec())
            .unwrap_or_default();

        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );

        for collider in attached {
            self.collider_to_entity.remove(&collider);
        }
    }

    /// Remove every body and collider, leaving an empty world
    pub fn clear(&mut self) {
        let handles: Vec<RigidBodyHandle> =
            self.rigid_body_set.iter().map(|(handle, _)| handle).collect();

        for handle in handles {
            self.remove_rigid_body(handle);
        }
        self.collision_event_queue.clear();
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    #[cfg(test)]
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Entity id a collider was spawned with
    pub fn entity_for_collider(&self, handle: ColliderHandle) -> Option<u64> {
        self.collider_to_entity.get(&handle).copied()
    }

    /// Every body paired with its first attached collider
    #[cfg(test)]
    pub fn handles(&self) -> Vec<(RigidBodyHandle, ColliderHandle)> {
        self.rigid_body_set
            .iter()
            .filter_map(|(handle, body)| body.colliders().first().map(|c| (handle, *c)))
            .collect()
    }

    /// Number of live bodies
    #[cfg(test)]
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Get all collision events from the last step
    pub fn collision_events(&self) -> Vec<CollisionEvent> {
        self.collision_event_queue.events()
    }
}
