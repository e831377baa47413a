//! Primitive meshes: boxes and UV spheres, centered at the origin.

use crate::float_types::{PI, Real, TAU};
use crate::mesh::{Mesh, Vertex};
use nalgebra::Point3;

impl Mesh {
    /// Axis-aligned box centered at the origin with 8 shared corners and 12 triangles.
    ///
    /// ```text
    ///     7-------6
    ///    /|      /|
    ///   4-------5 |
    ///   | |     | |
    ///   | 3-----|-2
    ///   |/      |/
    ///   0-------1
    /// ```
    /// Faces are wound counter-clockwise seen from outside.
    pub fn cuboid(width: Real, length: Real, height: Real) -> Mesh {
        let (x, y, z) = (width * 0.5, length * 0.5, height * 0.5);
        let vertices = [
            Point3::new(-x, -y, -z),
            Point3::new(x, -y, -z),
            Point3::new(x, y, -z),
            Point3::new(-x, y, -z),
            Point3::new(-x, -y, z),
            Point3::new(x, -y, z),
            Point3::new(x, y, z),
            Point3::new(-x, y, z),
        ]
        .into_iter()
        .map(Vertex::new)
        .collect();

        let faces: [[u32; 4]; 6] = [
            [0, 3, 2, 1], // -Z
            [4, 5, 6, 7], // +Z
            [0, 1, 5, 4], // -Y
            [3, 7, 6, 2], // +Y
            [0, 4, 7, 3], // -X
            [1, 2, 6, 5], // +X
        ];
        let indices = faces
            .iter()
            .flat_map(|&[a, b, c, d]| [a, b, c, a, c, d])
            .collect();

        Mesh { vertices, indices }
    }

    pub fn cube(size: Real) -> Mesh {
        Self::cuboid(size, size, size)
    }

    /// UV sphere around the Y axis with one shared vertex per pole.
    ///
    /// `segments` is clamped to at least 3 and `stacks` to at least 2.
    pub fn uv_sphere(radius: Real, segments: usize, stacks: usize) -> Mesh {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let mut vertices = vec![Vertex::new(Point3::new(0.0, radius, 0.0))];
        for j in 1..stacks {
            let phi = j as Real / stacks as Real * PI;
            let y = radius * phi.cos();
            let ring_radius = radius * phi.sin();
            for i in 0..segments {
                let theta = i as Real / segments as Real * TAU;
                vertices.push(Vertex::new(Point3::new(
                    ring_radius * theta.cos(),
                    y,
                    ring_radius * theta.sin(),
                )));
            }
        }
        vertices.push(Vertex::new(Point3::new(0.0, -radius, 0.0)));

        let north = 0u32;
        let south = (vertices.len() - 1) as u32;
        let ring = |j: usize, i: usize| (1 + (j - 1) * segments + i % segments) as u32;

        let mut indices = Vec::with_capacity(segments * (stacks - 1) * 6);
        for i in 0..segments {
            indices.extend([north, ring(1, i + 1), ring(1, i)]);
        }
        for j in 1..stacks - 1 {
            for i in 0..segments {
                let (v1, v2) = (ring(j, i), ring(j, i + 1));
                let (v3, v4) = (ring(j + 1, i), ring(j + 1, i + 1));
                indices.extend([v1, v4, v3, v1, v2, v4]);
            }
        }
        for i in 0..segments {
            indices.extend([ring(stacks - 1, i), ring(stacks - 1, i + 1), south]);
        }

        Mesh { vertices, indices }
    }
}
