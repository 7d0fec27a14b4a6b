// Authored level data

use glam::Vec2;

use crate::engine::renderer::Color;

/// An axis-aligned rectangle with a display colour, centred on `center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        Self {
            center: Vec2::new(x, y),
            size: Vec2::new(width, height),
            color,
        }
    }
}

/// Everything needed to build a level: boundary box, obstacles, goal and
/// the player's spawn box
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub ground: Rect,
    pub left_wall: Rect,
    pub right_wall: Rect,
    pub obstacles: Vec<Rect>,
    pub goal: Rect,
    pub player: Rect,
}

const LEVEL_ONE_OBSTACLES: [Rect; 7] = [
    Rect::new(800.0, 520.0, 50.0, 200.0, Color::BLACK),
    Rect::new(1100.0, 480.0, 200.0, 50.0, Color::BLACK),
    Rect::new(1400.0, 530.0, 100.0, 100.0, Color::BLACK),
    Rect::new(1700.0, 500.0, 50.0, 50.0, Color::RED),
    Rect::new(2000.0, 520.0, 150.0, 150.0, Color::BLACK),
    Rect::new(2300.0, 480.0, 100.0, 100.0, Color::BLACK),
    Rect::new(2600.0, 530.0, 50.0, 200.0, Color::BLACK),
];

impl LevelLayout {
    /// The first (and only) level
    pub fn level_one() -> Self {
        Self {
            // Top surface at y = 580
            ground: Rect::new(1600.0, 590.0, 3400.0, 20.0, Color::EARTH),
            left_wall: Rect::new(0.0, 300.0, 20.0, 600.0, Color::STONE),
            right_wall: Rect::new(3200.0, 300.0, 20.0, 600.0, Color::STONE),
            obstacles: LEVEL_ONE_OBSTACLES.to_vec(),
            goal: Rect::new(3000.0, 530.0, 50.0, 100.0, Color::GOLD),
            player: Rect::new(100.0, 500.0, 20.0, 20.0, Color::RED),
        }
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::level_one()
    }
}
