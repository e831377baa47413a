//! Struct and functions for working with `Vertex`s from which `Mesh`es are composed.

use crate::float_types::Real;
use nalgebra::Point3;

/// Linear RGBA color attached to a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Diagnostic tag for vertices of an inside half
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    /// Diagnostic tag for vertices of an outside half
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// A mesh vertex: a position plus an optional color attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub color: Option<Color>,
}

impl Vertex {
    /// Create an uncolored [`Vertex`].
    pub const fn new(pos: Point3<Real>) -> Self {
        Vertex { pos, color: None }
    }

    pub const fn with_color(pos: Point3<Real>, color: Color) -> Self {
        Vertex {
            pos,
            color: Some(color),
        }
    }

    /// Return the linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// The color is interpolated too when both endpoints carry one; otherwise
    /// whichever color is present is kept.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        let pos = crate::plane::lerp(&self.pos, &other.pos, t);
        let color = match (self.color, other.color) {
            (Some(a), Some(b)) => Some(a.lerp(&b, t as f32)),
            (a, b) => a.or(b),
        };
        Vertex { pos, color }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.coords.iter().all(|c| c.is_finite())
    }
}

impl From<Point3<Real>> for Vertex {
    fn from(pos: Point3<Real>) -> Self {
        Vertex::new(pos)
    }
}
