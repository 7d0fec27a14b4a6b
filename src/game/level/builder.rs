// World builder - turns a layout into static bodies and spawns them

use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::game::tuning::LevelTuning;

use super::layout::{LevelLayout, Rect};

/// Identifies a body of the level. Stable for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    /// The player always takes the first id
    pub const PLAYER: BodyId = BodyId(0);
}

/// What role a body plays in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Player,
    Ground,
    Wall,
    Obstacle,
    /// Sensor: overlap is reported, nothing is pushed
    Goal,
}

impl BodyKind {
    pub fn is_sensor(&self) -> bool {
        matches!(self, Self::Goal)
    }
}

/// A static, immovable piece of level geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBody {
    pub id: BodyId,
    pub kind: BodyKind,
    pub rect: Rect,
}

/// Fixed ordered set of static bodies for `layout`:
/// ground, left wall, right wall, obstacles in authored order, goal.
pub fn static_bodies(layout: &LevelLayout) -> Vec<StaticBody> {
    let boundary = [
        (BodyKind::Ground, layout.ground),
        (BodyKind::Wall, layout.left_wall),
        (BodyKind::Wall, layout.right_wall),
    ];
    let obstacles = layout
        .obstacles
        .iter()
        .map(|rect| (BodyKind::Obstacle, *rect));
    let goal = std::iter::once((BodyKind::Goal, layout.goal));

    boundary
        .into_iter()
        .chain(obstacles)
        .chain(goal)
        .enumerate()
        .map(|(index, (kind, rect))| StaticBody {
            id: BodyId(index as u32 + 1),
            kind,
            rect,
        })
        .collect()
}

/// Handles of the player body inside the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHandle {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

/// A built level living in a physics world
#[derive(Debug, Clone)]
pub struct SpawnedLevel {
    pub player: PlayerHandle,
    pub player_rect: Rect,
    pub bodies: Vec<StaticBody>,
}

/// Build `layout` into `physics`: all static geometry plus the player
pub fn spawn_level(
    physics: &mut PhysicsWorld,
    layout: &LevelLayout,
    tuning: &LevelTuning,
) -> SpawnedLevel {
    let bodies = static_bodies(layout);

    for body in &bodies {
        let size = body.rect.size;
        let collider = if body.kind.is_sensor() {
            presets::sensor_collider(size.x, size.y)
        } else {
            presets::static_collider(size.x, size.y, tuning.static_material)
        };
        physics.spawn(
            presets::static_body(body.rect.center.x, body.rect.center.y),
            collider,
            body.id.0 as u64,
        );
    }

    let spawn = layout.player;
    let (body, collider) = physics.spawn(
        presets::player_body(spawn.center.x, spawn.center.y, tuning.player_material),
        presets::player_collider(
            spawn.size.x,
            spawn.size.y,
            tuning.player_density,
            tuning.player_material,
        ),
        BodyId::PLAYER.0 as u64,
    );

    log::info!(
        "Level built: {} static bodies, player at ({}, {})",
        bodies.len(),
        spawn.center.x,
        spawn.center.y
    );

    SpawnedLevel {
        player: PlayerHandle { body, collider },
        player_rect: spawn,
        bodies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::Color;
    use glam::Vec2;
    use crate::engine::physics::Vector;
    use rapier2d::prelude::RigidBodyType;

    fn world() -> PhysicsWorld {
        let tuning = LevelTuning::default();
        PhysicsWorld::new(Vector::new(0.0, tuning.gravity), tuning.timestep)
    }

    #[test]
    fn test_body_order() {
        let bodies = static_bodies(&LevelLayout::level_one());
        let kinds: Vec<BodyKind> = bodies.iter().map(|b| b.kind).collect();

        assert_eq!(kinds.len(), 11);
        assert_eq!(kinds[0], BodyKind::Ground);
        assert_eq!(kinds[1], BodyKind::Wall);
        assert_eq!(kinds[2], BodyKind::Wall);
        assert!(kinds[3..10].iter().all(|k| *k == BodyKind::Obstacle));
        assert_eq!(kinds[10], BodyKind::Goal);
    }

    #[test]
    fn test_ids_unique_and_skip_player() {
        let bodies = static_bodies(&LevelLayout::level_one());
        let mut seen = std::collections::HashSet::new();
        for body in &bodies {
            assert_ne!(body.id, BodyId::PLAYER);
            assert!(seen.insert(body.id));
        }
    }

    #[test]
    fn test_deterministic() {
        let layout = LevelLayout::level_one();
        assert_eq!(static_bodies(&layout), static_bodies(&layout));
    }

    #[test]
    fn test_obstacles_match_authored_tuples() {
        let expected = [
            (800.0, 520.0, 50.0, 200.0),
            (1100.0, 480.0, 200.0, 50.0),
            (1400.0, 530.0, 100.0, 100.0),
            (1700.0, 500.0, 50.0, 50.0),
            (2000.0, 520.0, 150.0, 150.0),
            (2300.0, 480.0, 100.0, 100.0),
            (2600.0, 530.0, 50.0, 200.0),
        ];

        let mut physics = world();
        let level = spawn_level(&mut physics, &LevelLayout::level_one(), &LevelTuning::default());
        let obstacles: Vec<&StaticBody> = level
            .bodies
            .iter()
            .filter(|b| b.kind == BodyKind::Obstacle)
            .collect();

        assert_eq!(obstacles.len(), expected.len());
        for (body, (x, y, w, h)) in obstacles.iter().zip(expected) {
            assert_eq!(body.rect.center, Vec2::new(x, y));
            assert_eq!(body.rect.size, Vec2::new(w, h));
        }

        // And the physics bodies agree with the data
        let mut checked = 0;
        for (body_handle, collider_handle) in physics.handles() {
            let Some(id) = physics.entity_for_collider(collider_handle) else {
                continue;
            };
            let Some(def) = level.bodies.iter().find(|b| b.id.0 as u64 == id) else {
                continue;
            };

            let body = physics.get_rigid_body(body_handle).unwrap();
            assert_eq!(body.body_type(), RigidBodyType::Fixed);
            assert_eq!(body.translation().x, def.rect.center.x);
            assert_eq!(body.translation().y, def.rect.center.y);

            let collider = physics.get_collider(collider_handle).unwrap();
            let half = collider.shape().as_cuboid().unwrap().half_extents;
            assert_eq!(half.x * 2.0, def.rect.size.x);
            assert_eq!(half.y * 2.0, def.rect.size.y);
            assert_eq!(collider.is_sensor(), def.kind == BodyKind::Goal);
            checked += 1;
        }
        assert_eq!(checked, level.bodies.len());
    }

    #[test]
    fn test_obstacle_colours() {
        let bodies = static_bodies(&LevelLayout::level_one());
        let red: Vec<_> = bodies
            .iter()
            .filter(|b| b.kind == BodyKind::Obstacle && b.rect.color == Color::RED)
            .collect();
        assert_eq!(red.len(), 1);
        assert_eq!(red[0].rect.center, Vec2::new(1700.0, 500.0));
    }

    #[test]
    fn test_player_spawned_dynamic() {
        let mut physics = world();
        let level = spawn_level(&mut physics, &LevelLayout::level_one(), &LevelTuning::default());

        let body = physics.get_rigid_body(level.player.body).unwrap();
        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(physics.entity_for_collider(level.player.collider), Some(0));
        assert_eq!(physics.body_count(), level.bodies.len() + 1);
    }
}
