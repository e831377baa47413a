//! Turning Voronoi cells into cutting planes.
//!
//! Every face of every cell becomes one [`VoronoiCellPlane`]: the plane's
//! point is the face's first corner and its normal is the face normal after
//! an outward correction against the cell centroid. The fracture pass cuts
//! with these planes flipped, keeping the cell interior.

use crate::float_types::Real;
use crate::plane::Plane;
use crate::voronoi::VoronoiDiagram;
use nalgebra::{Point3, Vector3};
use tracing::trace;

/// A cutting plane tagged with the cell it bounds. The normal faces out of the cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiCellPlane {
    pub cell_id: usize,
    pub plane: Plane,
}

/// How a face normal is forced to point away from its cell centroid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalCorrection {
    /// Flip each axis component independently whenever its sign disagrees
    /// with the same component of `face_vertex - centroid`.
    ///
    /// This is a heuristic. A normal that is already outward can still have
    /// single components flipped when a face corner sits on the "wrong" side
    /// of the centroid along that axis, which tilts the plane.
    #[default]
    PerAxis,
    /// Flip the whole normal once when `dot(normal, face_vertex - centroid) < 0`.
    Centroid,
}

impl NormalCorrection {
    pub fn apply(
        self,
        normal: Vector3<Real>,
        face_vertex: &Point3<Real>,
        centroid: &Point3<Real>,
    ) -> Vector3<Real> {
        let offset = face_vertex - centroid;
        match self {
            NormalCorrection::PerAxis => Vector3::from_fn(|axis, _| {
                let (n, d) = (normal[axis], offset[axis]);
                if (n > 0.0 && d < 0.0) || (n < 0.0 && d > 0.0) {
                    -n
                } else {
                    n
                }
            }),
            NormalCorrection::Centroid => {
                if normal.dot(&offset) < 0.0 {
                    -normal
                } else {
                    normal
                }
            },
        }
    }
}

/// One plane per face of every cell, grouped by cell in cell order, faces in face order.
pub fn cell_planes(diagram: &VoronoiDiagram, correction: NormalCorrection) -> Vec<VoronoiCellPlane> {
    let mut planes = Vec::new();
    for cell in &diagram.cells {
        let centroid = cell.centroid();
        for face in cell.faces() {
            let Some(point) = face.vertices.first() else {
                continue;
            };
            let normal = correction.apply(face.normal, point, &centroid);
            match Plane::new(*point, normal) {
                Ok(plane) => planes.push(VoronoiCellPlane {
                    cell_id: cell.id,
                    plane,
                }),
                Err(err) => trace!(cell = cell.id, %err, "skipping degenerate cell face"),
            }
        }
    }
    planes
}
