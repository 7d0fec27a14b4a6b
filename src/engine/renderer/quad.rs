// CPU-side batching of axis-aligned coloured rectangles

use glam::{Vec2, Vec4};

use super::camera::Viewport;
use super::vertex::Vertex;

/// Display colour tag for a level body, in sRGB as authored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub Vec4);

/// sRGB transfer function inverse for one channel
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    /// #FFD700
    pub const GOLD: Color = Color::rgb(1.0, 0.843, 0.0);
    /// #87CEEB
    pub const SKY: Color = Color::rgb(0.529, 0.808, 0.922);
    pub const EARTH: Color = Color::rgb(0.36, 0.25, 0.2);
    pub const STONE: Color = Color::rgb(0.376, 0.376, 0.376);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color(Vec4::new(r, g, b, 1.0))
    }

    /// Channel values to hand the GPU. An sRGB surface encodes on write,
    /// so it must be fed linear values.
    pub fn encoded_for(self, srgb_target: bool) -> Vec4 {
        if !srgb_target {
            return self.0;
        }
        Vec4::new(
            srgb_to_linear(self.0.x),
            srgb_to_linear(self.0.y),
            srgb_to_linear(self.0.z),
            self.0.w,
        )
    }

    pub fn to_wgpu(self, srgb_target: bool) -> wgpu::Color {
        let c = self.encoded_for(srgb_target);
        wgpu::Color {
            r: c.x as f64,
            g: c.y as f64,
            b: c.z as f64,
            a: c.w as f64,
        }
    }
}

/// One rectangle to draw, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub center: Vec2,
    pub size: Vec2,
    pub color: Color,
}

/// Vertex and index data for a frame's quads
#[derive(Debug)]
pub struct QuadBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    srgb_target: bool,
}

impl QuadBatch {
    /// `srgb_target`: whether the surface format encodes to sRGB on write
    pub fn new(srgb_target: bool) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            srgb_target,
        }
    }

    /// Rebuild the batch from `quads`, skipping anything outside `viewport`
    pub fn rebuild(&mut self, quads: &[Quad], viewport: &Viewport) {
        self.vertices.clear();
        self.indices.clear();

        for quad in quads {
            let half = quad.size / 2.0;
            if !viewport.intersects_rect(quad.center, half) {
                continue;
            }
            self.push(quad.center, half, quad.color);
        }
    }

    fn push(&mut self, center: Vec2, half: Vec2, color: Color) {
        let start = self.vertices.len() as u16;

        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ];
        let color = color.encoded_for(self.srgb_target);
        for corner in corners {
            self.vertices.push(Vertex::new(center + corner, color));
        }

        self.indices
            .extend_from_slice(&[start, start + 1, start + 2, start, start + 2, start + 3]);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn viewport() -> Viewport {
        Viewport {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(1200.0, 600.0),
        }
    }

    #[test]
    fn test_quad_produces_two_triangles() {
        let mut batch = QuadBatch::new(false);
        batch.rebuild(
            &[Quad {
                center: Vec2::new(100.0, 500.0),
                size: Vec2::new(20.0, 20.0),
                color: Color::RED,
            }],
            &viewport(),
        );

        assert_eq!(batch.vertices().len(), 4);
        assert_eq!(batch.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(batch.vertices()[0].position, [90.0, 490.0]);
        assert_eq!(batch.vertices()[2].position, [110.0, 510.0]);
    }

    #[test]
    fn test_offscreen_quads_culled() {
        let mut batch = QuadBatch::new(false);
        batch.rebuild(
            &[Quad {
                center: Vec2::new(3000.0, 530.0),
                size: Vec2::new(50.0, 100.0),
                color: Color::GOLD,
            }],
            &viewport(),
        );

        assert!(batch.is_empty());
    }

    #[test]
    fn test_color_constants() {
        assert_eq!(Color::RED.0, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Color::BLACK.0.w, 1.0);
    }

    #[test]
    fn test_srgb_target_gets_linear_channels() {
        let grey = Color::rgb(0.5, 0.5, 0.5).encoded_for(true);
        assert_relative_eq!(grey.x, 0.2140, epsilon = 1e-4);
        assert_eq!(grey.w, 1.0);

        // Linear segment near black
        assert_relative_eq!(Color::rgb(0.04, 0.0, 0.0).encoded_for(true).x, 0.04 / 12.92);

        // #87CEEB
        let sky = Color::SKY.encoded_for(true);
        assert_relative_eq!(sky.x, 0.2418, epsilon = 1e-3);
        assert_relative_eq!(sky.z, 0.8317, epsilon = 1e-3);

        // Primaries and non-sRGB targets pass through
        assert_eq!(Color::RED.encoded_for(true), Color::RED.0);
        assert_eq!(Color::SKY.encoded_for(false), Color::SKY.0);
    }

    #[test]
    fn test_batch_linearizes_for_srgb_target() {
        let quad = Quad {
            center: Vec2::new(100.0, 500.0),
            size: Vec2::new(20.0, 20.0),
            color: Color::GOLD,
        };

        let mut srgb = QuadBatch::new(true);
        srgb.rebuild(&[quad], &viewport());
        let mut plain = QuadBatch::new(false);
        plain.rebuild(&[quad], &viewport());

        let linear = Color::GOLD.encoded_for(true);
        assert_eq!(srgb.vertices()[0].color, linear.to_array());
        assert_eq!(plain.vertices()[0].color, Color::GOLD.0.to_array());
        assert!(srgb.vertices()[0].color[1] < plain.vertices()[0].color[1]);
    }
}
