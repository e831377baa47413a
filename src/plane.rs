//! Cutting planes, point/plane side tests and edge/plane intersection.
//!
//! A [`Plane`] is stored as a point lying on it plus a unit normal. The sign of
//! [`Plane::side`] is fixed crate-wide: non-negative means *inside* (the half
//! space the normal points into), negative means *outside*.

use crate::errors::CutError;
use crate::float_types::{Real, tolerance};
use nalgebra::{Point3, Vector3};

/// A cutting plane given by a point on it and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Point3<Real>,
    normal: Vector3<Real>,
}

impl Plane {
    /// Create a plane through `point` facing `normal`.
    ///
    /// The normal is normalized so that [`Plane::side`] is a true signed distance.
    ///
    /// ## Errors
    /// [`CutError::InvalidPlane`] if the normal has ~zero length or any component is not finite.
    pub fn new(point: Point3<Real>, normal: Vector3<Real>) -> Result<Self, CutError> {
        let length = normal.norm();
        let finite = point.coords.iter().chain(normal.iter()).all(|c| c.is_finite());
        if !finite || length <= tolerance() {
            return Err(CutError::InvalidPlane { point, normal });
        }
        Ok(Plane {
            point,
            normal: normal / length,
        })
    }

    /// Plane through the origin facing `normal`.
    pub fn through_origin(normal: Vector3<Real>) -> Result<Self, CutError> {
        Self::new(Point3::origin(), normal)
    }

    /// Plane through `a`, `b`, `c`; the normal follows the right-hand rule `(b-a) × (c-a)`.
    pub fn from_points(
        a: Point3<Real>,
        b: Point3<Real>,
        c: Point3<Real>,
    ) -> Result<Self, CutError> {
        Self::new(a, (b - a).cross(&(c - a)))
    }

    pub const fn point(&self) -> Point3<Real> {
        self.point
    }

    /// Unit normal of the plane
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Same plane, facing the other way. Inside and outside swap.
    pub fn flipped(&self) -> Self {
        Plane {
            point: self.point,
            normal: -self.normal,
        }
    }

    /// Signed distance of `point` from the plane: `dot(normal, point - plane_point)`.
    #[inline]
    pub fn side(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&(point - self.point))
    }

    /// Whether `point` is classified inside, boundary inclusive.
    ///
    /// Points within [`tolerance`] below the plane still count as inside, so
    /// vertices created on the plane by a previous cut stay on the inside.
    #[inline]
    pub fn contains(&self, point: &Point3<Real>) -> bool {
        self.side(point) >= -tolerance()
    }

    /// Parameter `t` such that `start + t * (end - start)` lies on the plane.
    ///
    /// ## Errors
    /// [`CutError::ParallelEdge`] when the edge direction lies (within tolerance)
    /// in the plane, where `t` would be infinite or meaningless.
    pub fn intersect_param(
        &self,
        start: &Point3<Real>,
        end: &Point3<Real>,
    ) -> Result<Real, CutError> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);
        if denom.abs() <= tolerance() * direction.norm() || denom == 0.0 {
            return Err(CutError::ParallelEdge {
                start: *start,
                end: *end,
            });
        }

        let t = self.normal.dot(&(self.point - start)) / denom;
        if !t.is_finite() {
            return Err(CutError::ParallelEdge {
                start: *start,
                end: *end,
            });
        }
        Ok(t)
    }
}

/// Linear interpolation `a + t * (b - a)`. `t` is not clamped.
#[inline]
pub fn lerp(a: &Point3<Real>, b: &Point3<Real>, t: Real) -> Point3<Real> {
    a + (b - a) * t
}
