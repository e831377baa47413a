//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use meshcut::{Mesh, float_types::Real, plane::Plane};
use nalgebra::{Point3, Vector3};

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]` of a mesh's vertices.
pub fn bounding_box(mesh: &Mesh) -> [Real; 6] {
    let mut min = Point3::new(Real::MAX, Real::MAX, Real::MAX);
    let mut max = Point3::new(Real::MIN, Real::MIN, Real::MIN);
    for v in &mesh.vertices {
        min = min.inf(&v.pos);
        max = max.sup(&v.pos);
    }
    [min.x, min.y, min.z, max.x, max.y, max.z]
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A single triangle mesh from three corners.
pub fn make_triangle(points: [[Real; 3]; 3]) -> Mesh {
    let positions: Vec<Point3<Real>> = points
        .iter()
        .map(|p| Point3::new(p[0], p[1], p[2]))
        .collect();
    Mesh::from_positions(&positions, &[[0, 1, 2]]).unwrap()
}

/// Triangles of `mesh` whose corners all lie on `plane`.
pub fn triangles_on_plane(mesh: &Mesh, plane: &Plane, eps: Real) -> Vec<[Point3<Real>; 3]> {
    mesh.triangle_positions()
        .filter(|tri| tri.iter().all(|p| plane.side(p).abs() < eps))
        .collect()
}

/// Sum of `(b - a) × (c - a) / 2` over a set of triangles: the vector area.
pub fn vector_area(triangles: &[[Point3<Real>; 3]]) -> Vector3<Real> {
    triangles
        .iter()
        .map(|[a, b, c]| (b - a).cross(&(c - a)) * 0.5)
        .sum()
}

/// Positions of `mesh`, sorted lexicographically, for order-independent comparisons.
pub fn sorted_positions(mesh: &Mesh) -> Vec<[Real; 3]> {
    let mut positions: Vec<[Real; 3]> = mesh.positions().iter().map(|p| [p.x, p.y, p.z]).collect();
    positions.sort_by(|a, b| {
        a[0].total_cmp(&b[0])
            .then(a[1].total_cmp(&b[1]))
            .then(a[2].total_cmp(&b[2]))
    });
    positions
}
