//! Per-triangle case analysis against a cutting plane.
//!
//! A triangle is classified by how many of its corners are inside:
//! 0 or 3 keep it whole, 1 or 2 split it along the two edges that cross the
//! plane. The corner on its own side ("lone" corner) keeps one triangle, the
//! opposite side receives the remaining quad as two triangles. Corners are
//! rotated so the lone corner comes first, which keeps the source winding on
//! both halves.

use crate::cut::CutBuffers;
use crate::errors::CutError;
use crate::float_types::{Real, tolerance};
use crate::mesh::Vertex;
use crate::plane::Plane;

/// A triangle together with the inside/outside state of its corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ClassifiedTriangle {
    pub indices: [u32; 3],
    pub sides: [Real; 3],
    pub inside: [bool; 3],
}

impl ClassifiedTriangle {
    pub fn inside_count(&self) -> usize {
        self.inside.iter().filter(|&&inside| inside).count()
    }

    /// Majority vote of the corners; used when the triangle cannot be split.
    pub fn mostly_inside(&self) -> bool {
        self.inside_count() >= 2
    }

    /// Whether some corner lies inside by more than the tolerance band.
    pub fn reaches_inside(&self) -> bool {
        self.sides.iter().any(|&side| side > tolerance())
    }
}

pub(crate) fn classify(
    plane: &Plane,
    indices: [u32; 3],
    vertices: &[Vertex],
) -> ClassifiedTriangle {
    let sides = indices.map(|i| plane.side(&vertices[i as usize].pos));
    ClassifiedTriangle {
        indices,
        sides,
        inside: sides.map(|side| side >= -tolerance()),
    }
}

/// Emit `triangle` into the buffers, minting intersection vertices as needed.
/// Returns whether the triangle was split.
///
/// A triangle whose inside corners all sit in the tolerance band only grazes
/// the plane and goes to the outside whole.
///
/// ## Errors
/// [`CutError::ParallelEdge`] if a crossing edge lies in the plane. The buffers
/// are left untouched in that case so the caller can assign the triangle whole.
pub(crate) fn split_triangle(
    plane: &Plane,
    triangle: &ClassifiedTriangle,
    buffers: &mut CutBuffers,
) -> Result<bool, CutError> {
    match triangle.inside_count() {
        0 => buffers.assign_whole(triangle.indices, false),
        3 => buffers.assign_whole(triangle.indices, true),
        1 => return split_at(plane, triangle, lone_corner(&triangle.inside, true), true, buffers),
        _ => return split_at(plane, triangle, lone_corner(&triangle.inside, false), false, buffers),
    }
    Ok(false)
}

/// Position of the only corner whose inside flag equals `state`.
fn lone_corner(inside: &[bool; 3], state: bool) -> usize {
    inside.iter().position(|&s| s == state).unwrap_or(0)
}

fn split_at(
    plane: &Plane,
    triangle: &ClassifiedTriangle,
    lone: usize,
    lone_inside: bool,
    buffers: &mut CutBuffers,
) -> Result<bool, CutError> {
    let indices = triangle.indices;
    let a = indices[lone];
    let b = indices[(lone + 1) % 3];
    let c = indices[(lone + 2) % 3];

    let va = buffers.master[a as usize];
    let vb = buffers.master[b as usize];
    let vc = buffers.master[c as usize];

    // both parameters first: a failure must not leave half a split behind
    let tb = plane.intersect_param(&va.pos, &vb.pos)?;
    let tc = plane.intersect_param(&va.pos, &vc.pos)?;

    if !triangle.reaches_inside() {
        buffers.assign_whole(indices, false);
        return Ok(false);
    }

    // a band corner on the same side as its edge partner puts t outside [0, 1];
    // snapping keeps every new vertex on its source edge
    let tb = tb.clamp(0.0, 1.0);
    let tc = tc.clamp(0.0, 1.0);

    let ab = buffers.push_vertex(va.interpolate(&vb, tb));
    let ac = buffers.push_vertex(va.interpolate(&vc, tc));

    let CutBuffers {
        inside,
        outside,
        boundary,
        ..
    } = buffers;
    let (lone_side, quad_side) = if lone_inside {
        (inside, outside)
    } else {
        (outside, inside)
    };

    lone_side.extend([a, ab, ac]);
    quad_side.extend([ab, b, c, ab, c, ac]);
    boundary.extend([ab, ac]);
    Ok(true)
}
