//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so games don't need to
//! depend on it directly. [`Transform2d`] is the spatial state every actor
//! carries, and [`DrawRect`] is the integer pixel rectangle handed to the
//! renderer.

pub use glam::Vec2;

/// A 2D transform: position, rotation, and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2d {
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale. Never negative.
    pub scale: f32,
}

impl Transform2d {
    /// Identity transform (origin, no rotation, scale of 1).
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
    };

    /// Create a transform at the given position.
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::IDENTITY
        }
    }

    /// Return a copy with uniform scale applied. Negative values clamp to 0.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale.max(0.0);
        self
    }

    /// Return a copy with the given rotation in radians.
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Default for Transform2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A destination rectangle in screen pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl DrawRect {
    /// A rectangle of `size` whose center sits at `center`.
    ///
    /// Coordinates truncate toward zero, matching how the renderer snaps
    /// sprites to whole pixels.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let w = size.x as i32;
        let h = size.y as i32;
        Self {
            x: (center.x - (w / 2) as f32) as i32,
            y: (center.y - (h / 2) as f32) as i32,
            w,
            h,
        }
    }
}
