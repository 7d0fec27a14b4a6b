// Side-scrolling camera and viewport

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Camera that tracks a horizontal position over a level of fixed height
///
/// World space is y-down: the top of the level is y = 0.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World x the viewport is centred on
    center_x: f32,
    /// Visible width in world units
    view_width: f32,
    /// Total level height; the vertical bounds never scroll
    level_height: f32,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(center_x: f32, view_width: f32, level_height: f32) -> Self {
        let mut camera = Self {
            center_x,
            view_width,
            level_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        let bounds = self.viewport_bounds();

        // bottom/top swapped so y grows downward on screen
        self.view_proj = Mat4::orthographic_rh(
            bounds.min.x,
            bounds.max.x,
            bounds.max.y,
            bounds.min.y,
            -100.0, // Near plane
            100.0,  // Far plane
        );
    }

    /// Snap the viewport onto `x`. No smoothing.
    pub fn look_at(&mut self, x: f32) {
        self.center_x = x;
        self.update_view_proj();
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Get the viewport bounds in world coordinates
    pub fn viewport_bounds(&self) -> Viewport {
        let half_width = self.view_width / 2.0;

        Viewport {
            min: Vec2::new(self.center_x - half_width, 0.0),
            max: Vec2::new(self.center_x + half_width, self.level_height),
        }
    }
}

/// Viewport bounds in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// Check if a rectangle intersects the viewport
    pub fn intersects_rect(&self, center: Vec2, half_size: Vec2) -> bool {
        let rect_min = center - half_size;
        let rect_max = center + half_size;

        rect_max.x >= self.min.x
            && rect_min.x <= self.max.x
            && rect_max.y >= self.min.y
            && rect_min.y <= self.max.y
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
