// Level geometry
//
// - `layout`: authored rectangles for a level (level one ships built in)
// - `builder`: turns a layout into an ordered set of static bodies and spawns
//   them, plus the player, into a physics world

pub mod builder;
pub mod layout;

pub use builder::{spawn_level, BodyId, BodyKind, SpawnedLevel};
pub use layout::LevelLayout;
