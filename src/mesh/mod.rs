//! `Mesh` struct: an indexed triangle list owned by value.
//!
//! Cutting never mutates a `Mesh`; every operation in this crate produces new
//! `Mesh` values with no back-references to their inputs.

use crate::errors::{CutError, MeshDefect};
use crate::float_types::{
    Real,
    parry3d::bounding_volume::Aabb,
};
use nalgebra::{Isometry3, Matrix4, Point3, Vector3};

pub mod shapes;
pub mod vertex;

pub use vertex::{Color, Vertex};

/// An ordered vertex list plus a flat triangle index list.
///
/// Every consecutive index triple names one triangle in winding order
/// (counter-clockwise seen from the front).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Returns a new empty Mesh
    pub const fn new() -> Self {
        Mesh {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Build a Mesh from vertex and index buffers.
    ///
    /// ## Errors
    /// [`CutError::MalformedMesh`] if an index is out of range or the index count
    /// is not a multiple of 3.
    pub fn from_parts(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self, CutError> {
        let mesh = Mesh { vertices, indices };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Build an uncolored Mesh from raw positions and triangles.
    pub fn from_positions(
        positions: &[Point3<Real>],
        triangles: &[[u32; 3]],
    ) -> Result<Self, CutError> {
        Self::from_parts(
            positions.iter().copied().map(Vertex::new).collect(),
            triangles.iter().flatten().copied().collect(),
        )
    }

    /// Check the mesh invariants: whole triangles, every index in range,
    /// every position finite.
    pub fn validate(&self) -> Result<(), MeshDefect> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshDefect::DanglingIndices(self.indices.len()));
        }
        let vertex_count = self.vertices.len();
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(MeshDefect::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        if let Some(position) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(MeshDefect::NonFinitePosition(position));
        }
        Ok(())
    }

    /// True when the mesh has no vertices at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Iterate over triangle corner positions.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        self.triangles().map(|[a, b, c]| {
            [
                self.vertices[a as usize].pos,
                self.vertices[b as usize].pos,
                self.vertices[c as usize].pos,
            ]
        })
    }

    pub fn positions(&self) -> Vec<Point3<Real>> {
        self.vertices.iter().map(|v| v.pos).collect()
    }

    /// Average of all vertex positions, or the origin for an empty mesh.
    ///
    /// This is the placement offset handed to the rigid body factory.
    pub fn centroid(&self) -> Point3<Real> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords);
        Point3::from(sum / self.vertices.len() as Real)
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] spanning all vertices.
    /// An empty mesh yields a trivial AABB at the origin.
    pub fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for v in &self.vertices {
            mins = mins.inf(&v.pos);
            maxs = maxs.sup(&v.pos);
        }

        if self.vertices.is_empty() {
            return Aabb::new(Point3::origin(), Point3::origin());
        }
        Aabb::new(mins, maxs)
    }

    /// Signed enclosed volume (divergence theorem over all triangles).
    ///
    /// Positive for a closed mesh wound counter-clockwise seen from outside.
    /// Only meaningful for (approximately) watertight meshes.
    pub fn volume(&self) -> Real {
        self.triangle_positions()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Total triangle area.
    pub fn surface_area(&self) -> Real {
        self.triangle_positions()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to every vertex.
    pub fn transform(&self, mat: &Matrix4<Real>) -> Mesh {
        let mut mesh = self.clone();
        for vert in &mut mesh.vertices {
            vert.pos = mat.transform_point(&vert.pos);
        }
        mesh
    }

    /// Move the mesh by a rigid transform (e.g. a rigid body's world pose).
    pub fn transform_isometry(&self, iso: &Isometry3<Real>) -> Mesh {
        let mut mesh = self.clone();
        for vert in &mut mesh.vertices {
            vert.pos = iso.transform_point(&vert.pos);
        }
        mesh
    }

    pub fn translate(&self, offset: Vector3<Real>) -> Mesh {
        let mut mesh = self.clone();
        for vert in &mut mesh.vertices {
            vert.pos += offset;
        }
        mesh
    }

    /// Paint every vertex with `color`.
    pub fn with_color(mut self, color: Color) -> Mesh {
        for vert in &mut self.vertices {
            vert.color = Some(color);
        }
        self
    }
}
