mod support;

use meshcut::{
    CapOrdering, CutError, CutOptions, FractureError, FractureOptions, Mesh, SeedStrategy,
    float_types::{Real, parry3d::bounding_volume::Aabb},
    fracture::{DEFAULT_BOUNDS_MARGIN, fracture_bounds, voronoi_fracture, voronoi_fracture_with},
    voronoi::NormalCorrection,
};
use nalgebra::{Point3, Vector3};

/// Options under which fragments are exact convex pieces of a convex mesh.
fn exact_options(rng_seed: u64) -> FractureOptions {
    FractureOptions {
        rng_seed,
        normal_correction: NormalCorrection::Centroid,
        cut: CutOptions {
            cap_ordering: CapOrdering::Angular,
            ..CutOptions::default()
        },
        ..FractureOptions::default()
    }
}

#[test]
fn one_fragment_per_cell() {
    let cube = Mesh::cube(2.0);
    let bounds = fracture_bounds(&cube, DEFAULT_BOUNDS_MARGIN);
    for cells in [1, 2, 5, 9] {
        let fragments = voronoi_fracture(&cube, &bounds, cells, None).unwrap();
        assert_eq!(fragments.len(), cells);
        for (i, fragment) in fragments.iter().enumerate() {
            assert_eq!(fragment.cell_id, i);
        }
    }
}

#[test]
fn single_cell_returns_the_whole_cube() {
    let cube = Mesh::cube(10.0);
    let bounds = fracture_bounds(&cube, DEFAULT_BOUNDS_MARGIN);
    let fragments = voronoi_fracture(&cube, &bounds, 1, None).unwrap();

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].mesh, cube);
    assert_eq!(support::sorted_positions(&fragments[0].mesh), support::sorted_positions(&cube));
}

#[test]
fn fracture_bounds_grow_the_mesh_aabb() {
    let bounds = fracture_bounds(&Mesh::cube(10.0), DEFAULT_BOUNDS_MARGIN);
    assert_eq!(bounds.mins, Point3::new(-6.0, -6.0, -6.0));
    assert_eq!(bounds.maxs, Point3::new(6.0, 6.0, 6.0));
}

#[test]
fn fragment_volumes_add_up() {
    let cube = Mesh::cube(2.0);
    let bounds = fracture_bounds(&cube, DEFAULT_BOUNDS_MARGIN);
    let fragments = voronoi_fracture_with(&cube, &bounds, 6, &exact_options(3)).unwrap();

    let total: Real = fragments.iter().map(|f| f.mesh.volume()).sum();
    assert!(support::approx_eq(total, 8.0, 1e-6), "fragment volumes sum to {total}");
    for fragment in &fragments {
        assert!(fragment.mesh.volume() >= -1e-9);
    }
}

#[test]
fn fragments_stay_inside_the_mesh_and_their_cell() {
    let sphere = Mesh::uv_sphere(1.0, 16, 8);
    let bounds = fracture_bounds(&sphere, DEFAULT_BOUNDS_MARGIN);
    let fragments = voronoi_fracture_with(&sphere, &bounds, 8, &exact_options(9)).unwrap();
    let [min_x, min_y, min_z, max_x, max_y, max_z] = support::bounding_box(&sphere);

    let eps = 1e-5;
    for fragment in &fragments {
        for v in &fragment.mesh.vertices {
            let p = v.pos;
            assert!(p.x >= min_x - eps && p.y >= min_y - eps && p.z >= min_z - eps);
            assert!(p.x <= max_x + eps && p.y <= max_y + eps && p.z <= max_z + eps);

            // nearest seed is this fragment's own seed
            let own = (p - fragment.seed).norm();
            for other in &fragments {
                assert!(own <= (p - other.seed).norm() + eps);
            }
        }
    }
}

#[test]
fn cells_missing_the_mesh_give_empty_fragments() {
    let cube = Mesh::cube(1.0);
    let bounds = Aabb::new(Point3::new(-50.0, -50.0, -50.0), Point3::new(50.0, 50.0, 50.0));
    let fragments = voronoi_fracture_with(&cube, &bounds, 20, &exact_options(1)).unwrap();

    assert_eq!(fragments.len(), 20);
    assert!(fragments.iter().any(|f| f.is_empty()));
    let total: Real = fragments.iter().map(|f| f.mesh.volume()).sum();
    assert!(support::approx_eq(total, 1.0, 1e-6));
}

#[test]
fn same_rng_seed_gives_same_fragments() {
    let sphere = Mesh::uv_sphere(1.0, 12, 6);
    let bounds = fracture_bounds(&sphere, DEFAULT_BOUNDS_MARGIN);
    let options = FractureOptions {
        rng_seed: 42,
        ..FractureOptions::default()
    };

    let a = voronoi_fracture_with(&sphere, &bounds, 5, &options).unwrap();
    let b = voronoi_fracture_with(&sphere, &bounds, 5, &options).unwrap();
    assert_eq!(a, b);

    let other = FractureOptions {
        rng_seed: 43,
        ..options
    };
    let c = voronoi_fracture_with(&sphere, &bounds, 5, &other).unwrap();
    assert_ne!(a[0].seed, c[0].seed);
}

#[test]
fn impact_point_clusters_the_seeds() {
    let cube = Mesh::cube(4.0);
    let bounds = fracture_bounds(&cube, DEFAULT_BOUNDS_MARGIN);
    let impact = Point3::new(2.0, 2.0, 2.0);

    let uniform = voronoi_fracture(&cube, &bounds, 16, None).unwrap();
    let focused = voronoi_fracture(&cube, &bounds, 16, Some(impact)).unwrap();
    assert_eq!(focused.len(), 16);

    let mean_distance = |fragments: &[meshcut::Fragment]| {
        fragments.iter().map(|f| (f.seed - impact).norm()).sum::<Real>() / fragments.len() as Real
    };
    assert!(mean_distance(&focused) < mean_distance(&uniform));
    assert!(focused.iter().all(|f| bounds.contains_local_point(&f.seed)));
}

#[test]
fn impact_strategy_with_zero_falloff_spreads_out() {
    let cube = Mesh::cube(2.0);
    let bounds = fracture_bounds(&cube, DEFAULT_BOUNDS_MARGIN);
    let options = FractureOptions {
        seeding: SeedStrategy::Impact {
            point: Point3::origin(),
            falloff: 0.0,
        },
        ..FractureOptions::default()
    };
    // u^0 == 1: every seed is pushed to the region boundary
    let fragments = voronoi_fracture_with(&cube, &bounds, 4, &options).unwrap();
    for fragment in &fragments {
        let s = fragment.seed;
        let on_wall = (0..3).any(|i| {
            support::approx_eq(s[i], bounds.mins[i], 1e-9) || support::approx_eq(s[i], bounds.maxs[i], 1e-9)
        });
        assert!(on_wall, "seed {s:?} is not on the region boundary");
    }
}

#[test]
fn zero_cells_is_an_error() {
    let cube = Mesh::cube(1.0);
    let bounds = fracture_bounds(&cube, DEFAULT_BOUNDS_MARGIN);
    assert_eq!(voronoi_fracture(&cube, &bounds, 0, None), Err(FractureError::NoCells));
}

#[test]
fn inverted_bounds_are_rejected() {
    let cube = Mesh::cube(1.0);
    let bounds = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(-1.0, 2.0, 2.0));
    assert!(matches!(
        voronoi_fracture(&cube, &bounds, 3, None),
        Err(FractureError::InvalidBounds { .. })
    ));

    let flat = fracture_bounds(&cube, 0.0);
    let flat = Aabb::new(flat.mins, Point3::new(flat.maxs.x, flat.maxs.y, flat.mins.z));
    assert!(voronoi_fracture(&cube, &flat, 3, None).is_err());
}

#[test]
fn malformed_mesh_aborts_the_fracture() {
    let mut cube = Mesh::cube(1.0);
    cube.indices[0] = 99;
    let bounds = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
    assert!(matches!(
        voronoi_fracture(&cube, &bounds, 3, None),
        Err(FractureError::Cut(CutError::MalformedMesh(_)))
    ));
}

#[test]
fn empty_mesh_gives_empty_fragments() {
    let bounds = Aabb::new(Point3::origin(), Point3::from(Vector3::repeat(1.0)));
    let fragments = voronoi_fracture(&Mesh::new(), &bounds, 3, None).unwrap();
    assert_eq!(fragments.len(), 3);
    assert!(fragments.iter().all(|f| f.is_empty()));
}
