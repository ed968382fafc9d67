//! CPU-side scene state: geometry, per-pass constants and the animated
//! circle the offscreen texture is composited through.

use bytemuck::Pod;
use bytemuck::Zeroable;

pub const SCREEN_CLEAR_COLOR: [f32; 4] = [0.0, 0.2, 0.4, 1.0];
pub const TEXTURE_CLEAR_COLOR: [f32; 4] = [0.2, 0.0, 0.1, 1.0];

pub const SCREEN_SCALE: f32 = 1.0;
pub const TEXTURE_SCALE: f32 = 5.0;
pub const ANGLE_STEP: f32 = 0.1;

pub const SCREEN_COLORS: [[f32; 4]; 3] = [
    [1.0, 0.0, 0.0, 1.0], // Red
    [0.0, 1.0, 0.0, 1.0], // Green
    [0.0, 0.0, 1.0, 1.0], // Blue
];

pub const TEXTURE_COLORS: [[f32; 4]; 3] = [
    [0.7, 0.6, 0.0, 1.0],
    [0.0, 0.8, 0.2, 1.0],
    [0.2, 0.0, 0.9, 1.0],
];

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// The hello-triangle geometry, stretched vertically by `aspect_ratio`.
pub fn triangle(aspect_ratio: f32, colors: [[f32; 4]; 3]) -> [Vertex; 3] {
    [
        Vertex {
            position: [0.0, 0.25 * aspect_ratio, 0.0],
            color: colors[0],
        },
        Vertex {
            position: [0.25, -0.25 * aspect_ratio, 0.0],
            color: colors[1],
        },
        Vertex {
            position: [-0.25, -0.25 * aspect_ratio, 0.0],
            color: colors[2],
        },
    ]
}

/// Mirrors `cbuffer RootConstants` in `shaders.hlsl`, one root parameter of
/// 32-bit values shared by both pipelines.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RootConstants {
    pub angle: f32,
    pub scale: f32,
    pub circle_center: [f32; 2],
    pub circle_radius: f32,
    pub viewport_size: [f32; 2],
    pub padding: f32,
}

impl RootConstants {
    pub const COUNT: u32 = (std::mem::size_of::<RootConstants>() / 4) as u32;

    pub fn triangle(angle: f32, scale: f32) -> Self {
        Self {
            angle,
            scale,
            ..Self::default()
        }
    }

    pub fn composite(shape: &AnimatedShape, viewport_size: [f32; 2]) -> Self {
        Self {
            circle_center: shape.center(),
            circle_radius: shape.radius,
            viewport_size,
            ..Self::default()
        }
    }
}

/// A circle sliding to the right, wrapping back to the left edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedShape {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
}

impl AnimatedShape {
    pub const WRAP_X: f32 = 1000.0;

    pub fn update(&mut self) {
        self.x += self.speed;
        if self.x > Self::WRAP_X {
            self.x = 0.0;
        }
    }

    pub fn center(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Default for AnimatedShape {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 200.0,
            radius: 150.0,
            speed: 2.0,
        }
    }
}

/// Everything that changes between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scene {
    pub angle: f32,
    pub shape: AnimatedShape,
}

impl Scene {
    pub fn update(&mut self) {
        self.angle += ANGLE_STEP;
        self.shape.update();
    }

    pub fn screen_constants(&self) -> RootConstants {
        RootConstants::triangle(self.angle, SCREEN_SCALE)
    }

    pub fn texture_constants(&self) -> RootConstants {
        RootConstants::triangle(self.angle, TEXTURE_SCALE)
    }
}
