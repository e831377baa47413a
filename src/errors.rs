//! Cutting, fracturing and physics-adapter errors

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// All the ways a single plane cut can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CutError {
    /// (ParallelEdge) The edge being intersected lies (nearly) in the cutting plane.
    /// Recovered per triangle by the cutter; never aborts a whole cut.
    #[error("(ParallelEdge) Edge {start} -> {end} is parallel to the cutting plane")]
    ParallelEdge {
        start: Point3<Real>,
        end: Point3<Real>,
    },
    /// (InvalidPlane) The plane normal has ~zero length or the plane is not finite
    #[error("(InvalidPlane) Plane with point {point} and normal {normal} is degenerate")]
    InvalidPlane {
        point: Point3<Real>,
        normal: Vector3<Real>,
    },
    /// (TooManyRecovered) More triangles were assigned whole than the cut allows
    #[error("(TooManyRecovered) {recovered} triangles could not be split (limit {limit})")]
    TooManyRecovered { recovered: usize, limit: usize },
    /// (MalformedMesh) The mesh buffers are inconsistent
    #[error("(MalformedMesh) {0}")]
    MalformedMesh(#[from] MeshDefect),
}

/// What exactly is wrong with a malformed mesh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshDefect {
    /// An index references a vertex slot that does not exist
    #[error("index {index} is out of range (vertex count = {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    /// The index buffer length is not a multiple of 3
    #[error("{0} indices do not form whole triangles")]
    DanglingIndices(usize),
    /// A vertex position has a NaN or infinite coordinate
    #[error("vertex {0} has a NaN or infinite coordinate")]
    NonFinitePosition(usize),
}

/// Errors that abort a whole Voronoi fracture.
///
/// Per-cell cutting failures are not reported here: the cell's fragment is
/// dropped and the remaining cells are still processed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FractureError {
    /// (NoCells) At least one Voronoi cell is required
    #[error("(NoCells) A fracture needs at least one cell")]
    NoCells,
    /// (InvalidBounds) The bounding region is empty or not finite
    #[error("(InvalidBounds) Bounding region {mins} .. {maxs} is empty or not finite")]
    InvalidBounds {
        mins: Point3<Real>,
        maxs: Point3<Real>,
    },
    /// The input mesh could not be cut at all
    #[error(transparent)]
    Cut(#[from] CutError),
}

/// Errors raised while handing meshes to the rigid body world.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    /// (MissingBody) The rigid body handle is not present in the body set
    #[error("(MissingBody) The rigid body is not in the body set")]
    MissingBody,
    #[error(transparent)]
    Cut(#[from] CutError),
    #[error(transparent)]
    Fracture(#[from] FractureError),
}
