//! Cutting a triangle mesh in two with a plane.
//!
//! [`cut_with_plane`] runs the triangle splitter over every triangle of the
//! input, caps the hole along the cut once, and compacts the shared vertex
//! list into two standalone meshes:
//! - `inside`: everything on the side the plane normal points into (boundary inclusive)
//! - `outside`: everything else
//!
//! ```
//! # use meshcut::{Mesh, cut::cut_with_plane, plane::Plane};
//! # use nalgebra::{Point3, Vector3};
//! let cube = Mesh::cube(1.0);
//! let plane = Plane::new(Point3::origin(), Vector3::x()).unwrap();
//! let halves = cut_with_plane(&plane, &cube).unwrap();
//! assert!(halves.inside.positions().iter().all(|p| p.x >= -1e-9));
//! assert!(halves.outside.positions().iter().all(|p| p.x <= 1e-9));
//! ```

use crate::errors::CutError;
use crate::float_types::Real;
use crate::mesh::{Color, Mesh, Vertex};
use crate::plane::Plane;
use nalgebra::{Point3, Vector3};
use tracing::{debug, trace};

pub(crate) mod capper;
pub(crate) mod splitter;

/// How the boundary loop is walked when fanning the cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapOrdering {
    /// Discovery order from triangle traversal. Cheap; can twist the fan on
    /// cross-sections the traversal does not walk in order.
    #[default]
    Discovery,
    /// Sorted by angle around the boundary centroid in the cutting plane.
    /// Exact for convex cross-sections.
    Angular,
}

/// Knobs for a single cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutOptions {
    pub cap_ordering: CapOrdering,
    /// Collapse boundary vertices with coincident positions before capping.
    /// Only the cap is affected; the side triangles keep their own vertices.
    pub merge_boundary: bool,
    /// Paint inside vertices [`Color::MAGENTA`] and outside vertices [`Color::CYAN`].
    pub tag_colors: bool,
    /// Fail the cut with [`CutError::TooManyRecovered`] once more than this many
    /// triangles had to be assigned whole. `None` accepts any number.
    pub max_recovered_triangles: Option<usize>,
}

impl Default for CutOptions {
    fn default() -> Self {
        CutOptions {
            cap_ordering: CapOrdering::Discovery,
            merge_boundary: true,
            tag_colors: false,
            max_recovered_triangles: None,
        }
    }
}

/// The two halves of a cut. Either may be empty (zero vertices).
#[derive(Debug, Clone, PartialEq)]
pub struct CutResult {
    pub inside: Mesh,
    pub outside: Mesh,
    /// Positions of every intersection vertex, in discovery order.
    pub boundary: Vec<Point3<Real>>,
    /// Source triangles split in three (one on the lone corner's side, two on the other).
    pub split_triangles: usize,
    /// Cap triangles appended to *each* half.
    pub cap_triangles: usize,
    /// Triangles that could not be split and were assigned whole by majority side.
    pub recovered_triangles: usize,
}

impl CutResult {
    /// True when the plane did not separate anything: one side is empty.
    pub fn is_noop(&self) -> bool {
        self.inside.is_empty() || self.outside.is_empty()
    }
}

/// Accumulators shared by the splitter and the capper during one cut.
#[derive(Debug, Clone)]
pub(crate) struct CutBuffers {
    /// Input vertices followed by every vertex minted during the cut
    pub master: Vec<Vertex>,
    pub inside: Vec<u32>,
    pub outside: Vec<u32>,
    pub boundary: Vec<u32>,
}

impl CutBuffers {
    pub fn new(master: Vec<Vertex>) -> Self {
        CutBuffers {
            master,
            inside: Vec::new(),
            outside: Vec::new(),
            boundary: Vec::new(),
        }
    }

    /// Append a vertex to the master list and return its index.
    pub fn push_vertex(&mut self, vertex: Vertex) -> u32 {
        self.master.push(vertex);
        (self.master.len() - 1) as u32
    }

    pub fn assign_whole(&mut self, triangle: [u32; 3], inside: bool) {
        if inside {
            self.inside.extend(triangle);
        } else {
            self.outside.extend(triangle);
        }
    }

    /// Build a standalone mesh from one side's indices, keeping only the
    /// referenced vertices in master-list order.
    fn compact(&self, indices: &[u32], tag: Option<Color>) -> Mesh {
        let mut used = vec![false; self.master.len()];
        for &i in indices {
            used[i as usize] = true;
        }

        let mut remap = vec![0u32; self.master.len()];
        let mut vertices = Vec::new();
        for (i, vertex) in self.master.iter().enumerate() {
            if used[i] {
                remap[i] = vertices.len() as u32;
                vertices.push(Vertex {
                    color: tag.or(vertex.color),
                    ..*vertex
                });
            }
        }

        Mesh {
            vertices,
            indices: indices.iter().map(|&i| remap[i as usize]).collect(),
        }
    }
}

/// Cut `mesh` with `plane` using the default [`CutOptions`].
///
/// ## Errors
/// [`CutError::MalformedMesh`] if the mesh references missing vertices. Edges
/// parallel to the plane never fail the cut; their triangles are assigned whole.
pub fn cut_with_plane(plane: &Plane, mesh: &Mesh) -> Result<CutResult, CutError> {
    cut_with_options(plane, mesh, &CutOptions::default())
}

/// Cut `mesh` with the plane through `point` facing `normal`.
///
/// ## Errors
/// [`CutError::InvalidPlane`] for a ~zero normal, plus everything [`cut_with_plane`] reports.
pub fn cut_with_point_normal(
    point: Point3<Real>,
    normal: Vector3<Real>,
    mesh: &Mesh,
) -> Result<CutResult, CutError> {
    cut_with_plane(&Plane::new(point, normal)?, mesh)
}

/// Cut `mesh` with `plane`.
///
/// ## Errors
/// Everything [`cut_with_plane`] reports, plus [`CutError::TooManyRecovered`]
/// when `options.max_recovered_triangles` is exceeded.
pub fn cut_with_options(
    plane: &Plane,
    mesh: &Mesh,
    options: &CutOptions,
) -> Result<CutResult, CutError> {
    mesh.validate()?;

    let mut buffers = CutBuffers::new(mesh.vertices.clone());
    let mut split_triangles = 0;
    let mut recovered_triangles = 0;

    for indices in mesh.triangles() {
        let triangle = splitter::classify(plane, indices, &buffers.master);
        match splitter::split_triangle(plane, &triangle, &mut buffers) {
            Ok(true) => split_triangles += 1,
            Ok(false) => {},
            Err(err) => {
                trace!(%err, ?indices, "assigning unsplittable triangle by majority side");
                buffers.assign_whole(indices, triangle.mostly_inside());
                recovered_triangles += 1;
            },
        }
    }

    match options.max_recovered_triangles {
        Some(limit) if recovered_triangles > limit => {
            return Err(CutError::TooManyRecovered {
                recovered: recovered_triangles,
                limit,
            });
        },
        _ => {},
    }

    let cap_triangles = capper::cap(plane, &mut buffers, options);

    let (inside_tag, outside_tag) = if options.tag_colors {
        (Some(Color::MAGENTA), Some(Color::CYAN))
    } else {
        (None, None)
    };
    let inside = buffers.compact(&buffers.inside, inside_tag);
    let outside = buffers.compact(&buffers.outside, outside_tag);

    debug!(
        triangles = mesh.triangle_count(),
        inside = inside.triangle_count(),
        outside = outside.triangle_count(),
        boundary = buffers.boundary.len(),
        split_triangles,
        cap_triangles,
        recovered_triangles,
        "cut mesh with plane"
    );

    Ok(CutResult {
        inside,
        outside,
        boundary: buffers
            .boundary
            .iter()
            .map(|&i| buffers.master[i as usize].pos)
            .collect(),
        split_triangles,
        cap_triangles,
        recovered_triangles,
    })
}

impl Mesh {
    /// Cut this mesh with `plane`. See [`cut_with_plane`].
    pub fn cut(&self, plane: &Plane) -> Result<CutResult, CutError> {
        cut_with_plane(plane, self)
    }

    /// Cut this mesh with `plane` and explicit options. See [`cut_with_options`].
    pub fn cut_with(&self, plane: &Plane, options: &CutOptions) -> Result<CutResult, CutError> {
        cut_with_options(plane, self, options)
    }
}
