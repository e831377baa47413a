//! Handing cut and fractured meshes to a rapier world.
//!
//! Every spawned piece becomes a dynamic body placed at the piece's centroid,
//! with a convex-hull collider built from its vertices. Repeated cuts pile up
//! vertices; the hull keeps the collision shape small regardless.

use crate::cut::cut_with_plane;
use crate::errors::PhysicsError;
use crate::float_types::{
    Real,
    rapier3d::prelude::{
        ColliderBuilder, ColliderSet, RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
        SharedShape, TriMesh,
    },
};
use crate::fracture::{
    DEFAULT_BOUNDS_MARGIN, FractureOptions, fracture_bounds, voronoi_fracture_with,
};
use crate::mesh::Mesh;
use crate::plane::Plane;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// A mesh in its body's local frame, plus the body it drives.
#[derive(Debug, Clone)]
pub struct SpawnedFragment {
    pub mesh: Mesh,
    pub body: RigidBodyHandle,
}

impl Mesh {
    /// Convert this Mesh to a Parry `TriMesh`.
    ///
    /// Returns `None` when the mesh has no triangles or Parry rejects the buffers.
    pub fn to_trimesh(&self) -> Option<TriMesh> {
        if self.triangle_count() == 0 {
            return None;
        }
        TriMesh::new(self.positions(), self.triangles().collect()).ok()
    }

    /// Convex hull of the vertices as a rapier collision shape.
    ///
    /// Returns `None` for fewer than four vertices or a flat point set.
    pub fn to_convex_shape(&self) -> Option<SharedShape> {
        let points: Vec<Point3<Real>> = self.positions();
        if points.len() < 4 {
            return None;
        }
        SharedShape::convex_hull(&points)
    }
}

/// Recenter `mesh` on its centroid and insert a dynamic body for it at that
/// centroid, moving with `linvel`.
///
/// Returns `None` (and inserts nothing) for an empty mesh or one without a usable hull.
pub fn spawn_fragment(
    mesh: &Mesh,
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    density: Real,
    linvel: Vector3<Real>,
) -> Option<SpawnedFragment> {
    if mesh.is_empty() || mesh.validate().is_err() {
        return None;
    }
    let centroid = mesh.centroid();
    let local = mesh.translate(-centroid.coords);
    let shape = local.to_convex_shape()?;

    let body = bodies.insert(
        RigidBodyBuilder::dynamic()
            .translation(centroid.coords)
            .linvel(linvel)
            .build(),
    );
    colliders.insert_with_parent(
        ColliderBuilder::new(shape).density(density).build(),
        body,
        bodies,
    );

    Some(SpawnedFragment { mesh: local, body })
}

/// Cut a rigid body in two with a world-space `plane`.
///
/// `local_mesh` is the body's mesh in its local frame. Each non-empty half is
/// spawned as a new body inheriting the original's linear velocity. The
/// original body is left in place; removing it is up to the caller.
///
/// ## Errors
/// - [`PhysicsError::MissingBody`] if `body` is not in `bodies`
/// - [`PhysicsError::Cut`] if the cut itself fails
pub fn slice_rigid_body(
    body: RigidBodyHandle,
    local_mesh: &Mesh,
    plane: &Plane,
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    density: Real,
) -> Result<Vec<SpawnedFragment>, PhysicsError> {
    let (world_mesh, linvel) = world_state(body, local_mesh, bodies)?;
    let halves = cut_with_plane(plane, &world_mesh)?;

    let spawned: Vec<SpawnedFragment> = [halves.inside, halves.outside]
        .iter()
        .filter_map(|half| spawn_fragment(half, bodies, colliders, density, linvel))
        .collect();
    debug!(pieces = spawned.len(), "sliced rigid body");
    Ok(spawned)
}

/// Shatter a rigid body into up to `num_cells` new bodies.
///
/// The fracture region is the world-space mesh AABB grown by
/// [`DEFAULT_BOUNDS_MARGIN`]. Empty fragments spawn nothing.
///
/// ## Errors
/// - [`PhysicsError::MissingBody`] if `body` is not in `bodies`
/// - [`PhysicsError::Fracture`] if the fracture cannot start
pub fn fracture_rigid_body(
    body: RigidBodyHandle,
    local_mesh: &Mesh,
    num_cells: usize,
    options: &FractureOptions,
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    density: Real,
) -> Result<Vec<SpawnedFragment>, PhysicsError> {
    let (world_mesh, linvel) = world_state(body, local_mesh, bodies)?;
    let bounds = fracture_bounds(&world_mesh, DEFAULT_BOUNDS_MARGIN);
    let fragments = voronoi_fracture_with(&world_mesh, &bounds, num_cells, options)?;

    let spawned: Vec<SpawnedFragment> = fragments
        .iter()
        .filter_map(|fragment| spawn_fragment(&fragment.mesh, bodies, colliders, density, linvel))
        .collect();
    debug!(cells = num_cells, pieces = spawned.len(), "fractured rigid body");
    Ok(spawned)
}

/// The body's mesh moved into world space, and the body's linear velocity.
fn world_state(
    body: RigidBodyHandle,
    local_mesh: &Mesh,
    bodies: &RigidBodySet,
) -> Result<(Mesh, Vector3<Real>), PhysicsError> {
    let rigid_body = bodies.get(body).ok_or(PhysicsError::MissingBody)?;
    Ok((
        local_mesh.transform_isometry(rigid_body.position()),
        *rigid_body.linvel(),
    ))
}
