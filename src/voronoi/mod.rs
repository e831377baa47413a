//! Bounded 3D Voronoi diagrams.
//!
//! Each cell starts as the bounding box and is clipped by the perpendicular
//! bisector between its seed and every other seed, nearest first. Clipping
//! stops once the next seed is more than twice as far away as the cell's
//! farthest corner, since no bisector beyond that distance can reach the cell.

use crate::float_types::{Real, parry3d::bounding_volume::Aabb, tolerance};
use nalgebra::Point3;
use tracing::{debug, trace};

pub mod cell;
pub mod planes;

pub use cell::{CellFace, ConvexCell};
pub use planes::{NormalCorrection, VoronoiCellPlane, cell_planes};

/// One bounded Voronoi region.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of the generating seed
    pub id: usize,
    pub seed: Point3<Real>,
    pub polyhedron: ConvexCell,
}

impl VoronoiCell {
    pub fn faces(&self) -> &[CellFace] {
        &self.polyhedron.faces
    }

    /// Volume centroid of the region.
    pub fn centroid(&self) -> Point3<Real> {
        self.polyhedron.centroid()
    }

    pub fn volume(&self) -> Real {
        self.polyhedron.mass_properties().0
    }
}

/// Voronoi diagram of a seed set, clipped to a box.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiDiagram {
    pub bounds: Aabb,
    pub cells: Vec<VoronoiCell>,
}

impl VoronoiDiagram {
    /// Compute one cell per seed, in seed order.
    ///
    /// Seeds closer than [`tolerance`] to each other share no bisector and end
    /// up with identical, overlapping cells.
    pub fn compute(bounds: &Aabb, seeds: &[Point3<Real>]) -> Self {
        let cells: Vec<VoronoiCell> = seeds
            .iter()
            .enumerate()
            .map(|(id, seed)| VoronoiCell {
                id,
                seed: *seed,
                polyhedron: build_cell(bounds, seeds, id),
            })
            .collect();

        debug!(
            seeds = seeds.len(),
            faces = cells.iter().map(|c| c.faces().len()).sum::<usize>(),
            "computed voronoi diagram"
        );

        VoronoiDiagram {
            bounds: *bounds,
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn build_cell(bounds: &Aabb, seeds: &[Point3<Real>], id: usize) -> ConvexCell {
    let seed = seeds[id];
    let mut cell = ConvexCell::from_aabb(bounds);

    let mut others: Vec<(usize, Real)> = seeds
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != id)
        .map(|(j, other)| (j, (other - seed).norm()))
        .collect();
    others.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (j, distance) in others {
        if distance <= tolerance() {
            trace!(cell = id, other = j, "skipping bisector of coincident seeds");
            continue;
        }
        if cell.is_empty() || distance > 2.0 * cell.max_distance_from(&seed) {
            break;
        }

        let normal = (seeds[j] - seed) / distance;
        let midpoint = seed + (seeds[j] - seed) * 0.5;
        cell.clip(&normal, normal.dot(&midpoint.coords), Some(j));
    }
    cell
}
