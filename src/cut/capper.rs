//! Closing the hole a cut leaves behind.
//!
//! The boundary loop is the list of intersection vertices in the order the
//! splitter discovered them. That order is only an approximation of a walk
//! around the cross-section, so the cap is a fast best-effort fan, not an exact
//! polygon triangulation. Fewer than three distinct boundary vertices leave the
//! hole open.

use crate::cut::{CapOrdering, CutBuffers, CutOptions};
use crate::float_types::{Real, tolerance};
use crate::mesh::Vertex;
use crate::plane::Plane;
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

/// Append cap triangles to both halves. Returns the number of cap triangles
/// added to *each* half.
pub(crate) fn cap(plane: &Plane, buffers: &mut CutBuffers, options: &CutOptions) -> usize {
    let mut ring = if options.merge_boundary {
        distinct_positions(&buffers.boundary, &buffers.master)
    } else {
        buffers.boundary.clone()
    };

    if ring.len() < 3 {
        return 0;
    }

    let pos = |i: &u32| buffers.master[*i as usize].pos;
    let center = Point3::from(
        ring.iter().fold(Vector3::zeros(), |acc, i| acc + pos(i).coords) / ring.len() as Real,
    );

    if options.cap_ordering == CapOrdering::Angular {
        sort_by_angle(&mut ring, &center, plane, &buffers.master);
    }

    // net fan normal must point along the plane normal
    let winding: Real = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| (pos(a) - center).cross(&(pos(b) - center)).dot(&plane.normal()))
        .sum();
    if winding < 0.0 {
        ring.reverse();
    }

    if ring.len() == 3 {
        let [v0, v1, v2] = [ring[0], ring[1], ring[2]];
        buffers.outside.extend([v0, v1, v2]);
        buffers.inside.extend([v0, v2, v1]);
        return 1;
    }

    let hub = buffers.push_vertex(Vertex::new(center));
    for (&a, &b) in ring.iter().zip(ring.iter().cycle().skip(1)) {
        buffers.outside.extend([hub, a, b]);
        buffers.inside.extend([hub, b, a]);
    }
    ring.len()
}

/// Boundary indices with coincident positions collapsed onto their first occurrence.
fn distinct_positions(boundary: &[u32], master: &[Vertex]) -> Vec<u32> {
    let scale = 1.0 / tolerance();
    let mut seen = HashSet::with_capacity(boundary.len());
    let mut ring = Vec::with_capacity(boundary.len());
    for &i in boundary {
        // off the grid distinct points would share a saturated key
        let Some(key) = grid_key(&master[i as usize].pos, scale) else {
            return boundary.to_vec();
        };
        if seen.insert(key) {
            ring.push(i);
        }
    }
    ring
}

/// Tolerance-grid cell of `p`, or `None` when it does not fit in `i64`.
fn grid_key(p: &Point3<Real>, scale: Real) -> Option<[i64; 3]> {
    const LIMIT: Real = 9.0e18;
    let mut key = [0i64; 3];
    for (slot, &c) in key.iter_mut().zip(p.coords.iter()) {
        let cell = (c * scale).round();
        if !cell.is_finite() || cell.abs() >= LIMIT {
            return None;
        }
        *slot = cell as i64;
    }
    Some(key)
}

/// Sort the ring counter-clockwise around `center`, seen from the plane normal.
fn sort_by_angle(ring: &mut [u32], center: &Point3<Real>, plane: &Plane, master: &[Vertex]) {
    let normal = plane.normal();
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = normal.cross(&helper).normalize();
    let v = normal.cross(&u);

    ring.sort_by(|&a, &b| {
        let angle = |i: u32| {
            let offset = master[i as usize].pos - center;
            offset.dot(&v).atan2(offset.dot(&u))
        };
        angle(a).total_cmp(&angle(b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::CutBuffers;

    fn square_buffers(order: &[usize]) -> CutBuffers {
        let corners = [
            Point3::new(0.0, -1.0, -1.0),
            Point3::new(0.0, 1.0, -1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, -1.0, 1.0),
        ];
        let mut buffers = CutBuffers::new(Vec::new());
        for &i in order {
            let index = buffers.push_vertex(Vertex::new(corners[i]));
            buffers.boundary.push(index);
        }
        buffers
    }

    #[test]
    fn too_few_vertices_leave_the_hole_open() {
        let plane = Plane::through_origin(Vector3::x()).unwrap();
        let mut buffers = square_buffers(&[0, 1, 1, 0]);
        assert_eq!(cap(&plane, &mut buffers, &CutOptions::default()), 0);
        assert!(buffers.inside.is_empty() && buffers.outside.is_empty());
    }

    #[test]
    fn duplicates_collapse_into_a_single_triangle() {
        let plane = Plane::through_origin(Vector3::x()).unwrap();
        let mut buffers = square_buffers(&[0, 1, 1, 2, 2, 0]);
        assert_eq!(cap(&plane, &mut buffers, &CutOptions::default()), 1);
        assert_eq!(buffers.master.len(), 6, "no hub vertex for a single triangle");
    }

    #[test]
    fn fan_faces_away_from_each_half() {
        let plane = Plane::through_origin(Vector3::x()).unwrap();
        let mut buffers = square_buffers(&[0, 2, 1, 3]);
        let options = CutOptions {
            cap_ordering: CapOrdering::Angular,
            ..CutOptions::default()
        };
        assert_eq!(cap(&plane, &mut buffers, &options), 4);

        let normal = |tri: &[u32]| {
            let p = |i: u32| buffers.master[i as usize].pos;
            (p(tri[1]) - p(tri[0])).cross(&(p(tri[2]) - p(tri[0])))
        };
        let area: Real = buffers.outside.chunks(3).map(|t| normal(t).x * 0.5).sum();
        assert!((area - 4.0).abs() < 1e-9);
        for tri in buffers.inside.chunks(3) {
            assert!(normal(tri).x < 0.0);
        }
    }

    #[test]
    fn far_away_boundary_is_capped_unmerged() {
        let plane = Plane::through_origin(Vector3::x()).unwrap();
        let mut buffers = CutBuffers::new(Vec::new());
        for p in [
            Point3::new(0.0, 2.0e14, 1.0e14),
            Point3::new(0.0, 3.0e14, 1.0e14),
            Point3::new(0.0, 2.0e14, 3.0e14),
        ] {
            let index = buffers.push_vertex(Vertex::new(p));
            buffers.boundary.push(index);
        }

        assert_eq!(distinct_positions(&buffers.boundary, &buffers.master).len(), 3);
        assert_eq!(cap(&plane, &mut buffers, &CutOptions::default()), 1);
        assert_eq!(buffers.inside.len(), 3);
    }

    #[test]
    fn grid_key_rejects_out_of_range_cells() {
        assert_eq!(grid_key(&Point3::new(1.0, -2.0, 0.0), 10.0), Some([10, -20, 0]));
        assert_eq!(grid_key(&Point3::new(1.0e20, 0.0, 0.0), 1.0), None);
        assert_eq!(grid_key(&Point3::new(Real::NAN, 0.0, 0.0), 1.0), None);
    }
}
