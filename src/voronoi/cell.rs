//! Convex polyhedral cells, built by clipping a box with half-spaces.

use crate::float_types::{Real, parry3d::bounding_volume::Aabb, tolerance};
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

/// One planar face of a convex cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFace {
    /// Corners, counter-clockwise seen from outside the cell
    pub vertices: Vec<Point3<Real>>,
    /// Outward unit normal
    pub normal: Vector3<Real>,
    /// Seed on the other side of this face; `None` for a container wall
    pub neighbor: Option<usize>,
}

/// A convex polyhedron stored face by face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvexCell {
    pub faces: Vec<CellFace>,
}

impl ConvexCell {
    /// The six walls of an axis-aligned box.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        let (lo, hi) = (aabb.mins, aabb.maxs);
        let corner = |x: bool, y: bool, z: bool| {
            Point3::new(
                if x { hi.x } else { lo.x },
                if y { hi.y } else { lo.y },
                if z { hi.z } else { lo.z },
            )
        };
        let wall = |normal: Vector3<Real>, corners: [(bool, bool, bool); 4]| CellFace {
            vertices: corners.iter().map(|&(x, y, z)| corner(x, y, z)).collect(),
            normal,
            neighbor: None,
        };

        ConvexCell {
            faces: vec![
                wall(-Vector3::x(), [(false, false, false), (false, false, true), (false, true, true), (false, true, false)]),
                wall(Vector3::x(), [(true, false, false), (true, true, false), (true, true, true), (true, false, true)]),
                wall(-Vector3::y(), [(false, false, false), (true, false, false), (true, false, true), (false, false, true)]),
                wall(Vector3::y(), [(false, true, false), (false, true, true), (true, true, true), (true, true, false)]),
                wall(-Vector3::z(), [(false, false, false), (false, true, false), (true, true, false), (true, false, false)]),
                wall(Vector3::z(), [(false, false, true), (true, false, true), (true, true, true), (false, true, true)]),
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Distinct corner positions.
    pub fn vertices(&self) -> Vec<Point3<Real>> {
        let mut seen = HashSet::new();
        let scale = 1.0 / tolerance();
        self.faces
            .iter()
            .flat_map(|face| face.vertices.iter().copied())
            .filter(|p| {
                seen.insert((
                    (p.x * scale).round() as i64,
                    (p.y * scale).round() as i64,
                    (p.z * scale).round() as i64,
                ))
            })
            .collect()
    }

    /// Largest distance from `point` to any corner.
    pub fn max_distance_from(&self, point: &Point3<Real>) -> Real {
        self.faces
            .iter()
            .flat_map(|face| face.vertices.iter())
            .map(|v| (v - point).norm())
            .fold(0.0, Real::max)
    }

    /// Enclosed volume and volume centroid.
    pub fn mass_properties(&self) -> (Real, Point3<Real>) {
        let corners = self.vertices();
        if corners.is_empty() {
            return (0.0, Point3::origin());
        }
        let reference = Point3::from(
            corners.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords)
                / corners.len() as Real,
        );

        let mut volume = 0.0;
        let mut moment = Vector3::zeros();
        for face in &self.faces {
            let v0 = face.vertices[0];
            for pair in face.vertices[1..].windows(2) {
                let (v1, v2) = (pair[0], pair[1]);
                let tet = (v0 - reference).dot(&(v1 - reference).cross(&(v2 - reference))) / 6.0;
                volume += tet;
                moment += (reference.coords + v0.coords + v1.coords + v2.coords) * (tet / 4.0);
            }
        }

        if volume.abs() <= Real::EPSILON {
            return (0.0, reference);
        }
        (volume, Point3::from(moment / volume))
    }

    pub fn centroid(&self) -> Point3<Real> {
        self.mass_properties().1
    }

    /// Keep the half-space `normal · p <= offset`, closing the cut with a new
    /// face whose outward normal is `normal`.
    ///
    /// `normal` must be unit length.
    pub fn clip(&mut self, normal: &Vector3<Real>, offset: Real, neighbor: Option<usize>) {
        let tol = tolerance();
        let distance = |p: &Point3<Real>| normal.dot(&p.coords) - offset;

        let cuts_anything = self
            .faces
            .iter()
            .flat_map(|face| face.vertices.iter())
            .any(|p| distance(p) > tol);
        if !cuts_anything {
            return;
        }

        let mut section = Vec::new();
        let mut faces = Vec::with_capacity(self.faces.len() + 1);
        for face in self.faces.drain(..) {
            let count = face.vertices.len();
            let mut kept = Vec::with_capacity(count + 1);
            for i in 0..count {
                let current = face.vertices[i];
                let next = face.vertices[(i + 1) % count];
                let (dc, dn) = (distance(&current), distance(&next));

                if dc <= tol {
                    kept.push(current);
                    if dc >= -tol {
                        section.push(current);
                    }
                }
                if (dc <= tol) != (dn <= tol) {
                    let crossing = current + (next - current) * (dc / (dc - dn));
                    kept.push(crossing);
                    section.push(crossing);
                }
            }

            dedup_ring(&mut kept, tol);
            if kept.len() >= 3 {
                faces.push(CellFace {
                    vertices: kept,
                    ..face
                });
            }
        }

        dedup_points(&mut section, tol);
        if section.len() >= 3 && !faces.is_empty() {
            order_around(&mut section, normal);
            faces.push(CellFace {
                vertices: section,
                normal: *normal,
                neighbor,
            });
        }
        self.faces = faces;
    }
}

/// Drop consecutive corners closer than `tol`, including the wrap-around pair.
fn dedup_ring(ring: &mut Vec<Point3<Real>>, tol: Real) {
    ring.dedup_by(|a, b| (*a - *b).norm() <= tol);
    while ring.len() > 1 && (ring[0] - ring[ring.len() - 1]).norm() <= tol {
        ring.pop();
    }
}

fn dedup_points(points: &mut Vec<Point3<Real>>, tol: Real) {
    let mut distinct: Vec<Point3<Real>> = Vec::with_capacity(points.len());
    for p in points.drain(..) {
        if distinct.iter().all(|q| (p - q).norm() > tol) {
            distinct.push(p);
        }
    }
    *points = distinct;
}

/// Sort coplanar points counter-clockwise around their average, seen from `normal`.
fn order_around(points: &mut [Point3<Real>], normal: &Vector3<Real>) {
    let center = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords)
        / points.len() as Real;
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = normal.cross(&helper).normalize();
    let v = normal.cross(&u);
    let angle = |p: &Point3<Real>| {
        let offset = p.coords - center;
        offset.dot(&v).atan2(offset.dot(&u))
    };
    points.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> ConvexCell {
        ConvexCell::from_aabb(&Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)))
    }

    #[test]
    fn box_walls_face_outward() {
        let cell = unit_box();
        let (volume, centroid) = cell.mass_properties();
        assert!((volume - 8.0).abs() < 1e-9);
        assert!(centroid.coords.norm() < 1e-9);
        for face in &cell.faces {
            let newell = face
                .vertices
                .iter()
                .zip(face.vertices.iter().cycle().skip(1))
                .fold(Vector3::zeros(), |acc, (a, b)| acc + a.coords.cross(&b.coords));
            assert!(newell.dot(&face.normal) > 0.0);
        }
    }

    #[test]
    fn clipping_halves_the_box() {
        let mut cell = unit_box();
        cell.clip(&Vector3::x(), 0.0, Some(3));
        assert_eq!(cell.faces.len(), 6);
        let (volume, centroid) = cell.mass_properties();
        assert!((volume - 4.0).abs() < 1e-9);
        assert!((centroid.x + 0.5).abs() < 1e-9);
        assert!(cell.faces.iter().any(|f| f.neighbor == Some(3)));
    }

    #[test]
    fn clipping_everything_empties_the_cell() {
        let mut cell = unit_box();
        cell.clip(&Vector3::x(), -2.0, None);
        assert!(cell.is_empty());
    }

    #[test]
    fn distant_plane_is_a_noop() {
        let mut cell = unit_box();
        let before = cell.clone();
        cell.clip(&Vector3::y(), 5.0, Some(1));
        assert_eq!(cell, before);
    }
}
