//! Voronoi fracturing: shattering one mesh into convex fragments.
//!
//! Seeds are scattered in a bounding box, the box is partitioned into Voronoi
//! cells, and every cell is carved out of a fresh copy of the input by cutting
//! with each of its face planes in turn and keeping the part inside the cell.
//!
//! ```
//! # use meshcut::{Mesh, fracture::{fracture_bounds, voronoi_fracture, DEFAULT_BOUNDS_MARGIN}};
//! let cube = Mesh::cube(2.0);
//! let bounds = fracture_bounds(&cube, DEFAULT_BOUNDS_MARGIN);
//! let fragments = voronoi_fracture(&cube, &bounds, 4, None).unwrap();
//! assert_eq!(fragments.len(), 4);
//! ```

use crate::cut::{CutOptions, cut_with_options};
use crate::errors::{CutError, FractureError};
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::Mesh;
use crate::plane::Plane;
use crate::voronoi::{NormalCorrection, VoronoiDiagram, cell_planes};
use nalgebra::{Point3, Vector3};
use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Margin added on every side of a mesh's AABB to get the fracture region.
pub const DEFAULT_BOUNDS_MARGIN: Real = 1.0;

/// Exponent used by [`voronoi_fracture`] when an impact point is given.
pub const DEFAULT_IMPACT_FALLOFF: Real = 2.0;

/// Where the Voronoi seeds go.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SeedStrategy {
    /// Uniformly at random inside the bounding region.
    #[default]
    Uniform,
    /// Clustered around `point`: each seed sits in a random direction at
    /// distance `extent * u^falloff` (`u` uniform in `[0, 1)`, `extent` half the
    /// region diagonal), clamped into the region. Larger `falloff` packs more
    /// small fragments near the impact. Negative falloff is treated as 0.
    Impact { point: Point3<Real>, falloff: Real },
}

/// Knobs for [`voronoi_fracture_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractureOptions {
    pub seeding: SeedStrategy,
    /// Seed for the seed-point generator; equal seeds give equal fragments.
    pub rng_seed: u64,
    pub normal_correction: NormalCorrection,
    /// Options for every individual cut.
    pub cut: CutOptions,
}

impl Default for FractureOptions {
    fn default() -> Self {
        FractureOptions {
            seeding: SeedStrategy::Uniform,
            rng_seed: 0,
            normal_correction: NormalCorrection::PerAxis,
            cut: CutOptions::default(),
        }
    }
}

/// The part of the input mesh that falls inside one Voronoi cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub cell_id: usize,
    /// Seed point of the cell
    pub seed: Point3<Real>,
    /// May be empty when the cell misses the mesh entirely.
    pub mesh: Mesh,
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}

/// The mesh AABB grown by `margin` on every side.
pub fn fracture_bounds(mesh: &Mesh, margin: Real) -> Aabb {
    let aabb = mesh.bounding_box();
    let margin = Vector3::repeat(margin);
    Aabb::new(aabb.mins - margin, aabb.maxs + margin)
}

/// Scatter `count` seed points inside `bounds`.
pub fn seed_points<R: Rng + ?Sized>(
    bounds: &Aabb,
    count: usize,
    strategy: &SeedStrategy,
    rng: &mut R,
) -> Vec<Point3<Real>> {
    let mut unit = || -> Real { rng.sample(Standard) };
    let extents = bounds.maxs - bounds.mins;

    match *strategy {
        SeedStrategy::Uniform => (0..count)
            .map(|_| bounds.mins + Vector3::new(unit(), unit(), unit()).component_mul(&extents))
            .collect(),
        SeedStrategy::Impact { point, falloff } => {
            let reach = extents.norm() * 0.5;
            let falloff = falloff.max(0.0);
            (0..count)
                .map(|_| {
                    let direction = loop {
                        let candidate =
                            Vector3::new(unit(), unit(), unit()) * 2.0 - Vector3::repeat(1.0);
                        let length = candidate.norm();
                        if length > 1e-3 && length <= 1.0 {
                            break candidate / length;
                        }
                    };
                    let radius = reach * unit().powf(falloff);
                    (point + direction * radius).sup(&bounds.mins).inf(&bounds.maxs)
                })
                .collect()
        },
    }
}

/// Fracture `mesh` into `num_cells` fragments with default options.
///
/// Seeds are uniform unless `impact` is given, in which case they cluster
/// around it with [`DEFAULT_IMPACT_FALLOFF`].
///
/// ## Errors
/// See [`voronoi_fracture_with`].
pub fn voronoi_fracture(
    mesh: &Mesh,
    bounds: &Aabb,
    num_cells: usize,
    impact: Option<Point3<Real>>,
) -> Result<Vec<Fragment>, FractureError> {
    let seeding = match impact {
        Some(point) => SeedStrategy::Impact {
            point,
            falloff: DEFAULT_IMPACT_FALLOFF,
        },
        None => SeedStrategy::Uniform,
    };
    let options = FractureOptions {
        seeding,
        ..FractureOptions::default()
    };
    voronoi_fracture_with(mesh, bounds, num_cells, &options)
}

/// Fracture `mesh` into one fragment per Voronoi cell of `num_cells` seeds
/// scattered in `bounds`. Fragments come back in cell order.
///
/// A cell whose cuts fail is dropped (and logged) instead of failing the call,
/// so fewer than `num_cells` fragments can be returned. With the default
/// [`CutOptions`] a validated mesh always cuts; setting
/// `max_recovered_triangles` lets single cells fail.
///
/// ## Errors
/// - [`FractureError::NoCells`] if `num_cells` is 0
/// - [`FractureError::InvalidBounds`] if `bounds` has no volume or is not finite
/// - [`FractureError::Cut`] if `mesh` is malformed
pub fn voronoi_fracture_with(
    mesh: &Mesh,
    bounds: &Aabb,
    num_cells: usize,
    options: &FractureOptions,
) -> Result<Vec<Fragment>, FractureError> {
    if num_cells == 0 {
        return Err(FractureError::NoCells);
    }
    let (mins, maxs) = (bounds.mins, bounds.maxs);
    let valid = (0..3).all(|i| mins[i].is_finite() && maxs[i].is_finite() && maxs[i] > mins[i]);
    if !valid {
        return Err(FractureError::InvalidBounds { mins, maxs });
    }
    mesh.validate().map_err(CutError::from)?;

    let mut rng = ChaCha8Rng::seed_from_u64(options.rng_seed);
    let seeds = seed_points(bounds, num_cells, &options.seeding, &mut rng);
    let diagram = VoronoiDiagram::compute(bounds, &seeds);

    let mut planes_per_cell: Vec<Vec<Plane>> = vec![Vec::new(); diagram.len()];
    for cell_plane in cell_planes(&diagram, options.normal_correction) {
        planes_per_cell[cell_plane.cell_id].push(cell_plane.plane);
    }

    let fragments = carve_cells(mesh, &seeds, &planes_per_cell, &options.cut);

    debug!(
        cells = num_cells,
        fragments = fragments.len(),
        empty = fragments.iter().filter(|f| f.is_empty()).count(),
        "fractured mesh"
    );
    Ok(fragments)
}

/// Carve one fragment per cell, skipping cells whose cuts fail.
fn carve_cells(
    mesh: &Mesh,
    seeds: &[Point3<Real>],
    planes_per_cell: &[Vec<Plane>],
    options: &CutOptions,
) -> Vec<Fragment> {
    let carve = |(cell_id, planes): (usize, &Vec<Plane>)| match carve_cell(mesh, planes, options) {
        Ok(fragment) => Some(Fragment {
            cell_id,
            seed: seeds[cell_id],
            mesh: fragment,
        }),
        Err(err) => {
            warn!(cell = cell_id, %err, "dropping voronoi cell that failed to cut");
            None
        },
    };

    #[cfg(feature = "parallel")]
    return planes_per_cell.par_iter().enumerate().filter_map(carve).collect();

    #[cfg(not(feature = "parallel"))]
    planes_per_cell.iter().enumerate().filter_map(carve).collect()
}

/// Intersect `mesh` with the convex region bounded by `planes`, whose normals
/// face out of the region.
///
/// A region without planes is empty and yields an empty mesh.
pub fn carve_cell(mesh: &Mesh, planes: &[Plane], options: &CutOptions) -> Result<Mesh, CutError> {
    if planes.is_empty() {
        return Ok(Mesh::new());
    }
    let mut working = mesh.clone();
    for plane in planes {
        if working.is_empty() {
            break;
        }
        working = cut_with_options(&plane.flipped(), &working, options)?.inside;
    }
    Ok(working)
}
