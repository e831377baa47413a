//! Plane cutting and **Voronoi fracturing** of indexed triangle meshes,
//! with adapters that hand the resulting pieces to a [rapier](https://rapier.rs) world.
//!
//! - [`cut`]: split a [`Mesh`] by a [`Plane`] into a capped inside and outside half
//! - [`voronoi`]: bounded Voronoi diagrams and the cutting planes of their cells
//! - [`fracture`]: carve a mesh into one convex fragment per Voronoi cell
//! - [`physics`]: spawn cut halves and fragments as dynamic rigid bodies
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to fracture cells concurrently

#![forbid(unsafe_code)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod cut;
pub mod errors;
pub mod float_types;
pub mod fracture;
pub mod mesh;
pub mod physics;
pub mod plane;
pub mod voronoi;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use cut::{CapOrdering, CutOptions, CutResult, cut_with_plane, cut_with_point_normal};
pub use errors::{CutError, FractureError, MeshDefect, PhysicsError};
pub use fracture::{FractureOptions, Fragment, SeedStrategy, voronoi_fracture};
pub use mesh::{Color, Mesh, Vertex};
pub use plane::Plane;
