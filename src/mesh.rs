//! Buffer-backed geometry behind the [`RenderableMesh`] capability.
//!
//! Getters hand out owned copies; callers mutate the copy and write it back
//! with the matching setter as a single unit. Nothing else is a valid
//! mutation target.

use bevy::asset::RenderAssetUsages;
use bevy::color::ColorToComponents;
use bevy::mesh::{Indices, VertexAttributeValues};
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use crate::math;

/// Geometry object the chunk builder and the scroller read from and write into.
pub trait RenderableMesh {
    /// Copy of the vertex positions.
    fn vertices(&self) -> Vec<Vec3>;
    /// Replaces all vertex positions.
    fn set_vertices(&mut self, vertices: Vec<Vec3>);
    /// Copy of the per-vertex colors.
    fn colors(&self) -> Vec<Srgba>;
    /// Replaces all per-vertex colors.
    fn set_colors(&mut self, colors: Vec<Srgba>);
    /// Copy of the triangle index list.
    fn triangles(&self) -> Vec<u32>;
    /// Replaces the triangle index list.
    fn set_triangles(&mut self, triangles: Vec<u32>);
    /// Recomputes the bounding box from the current vertices.
    ///
    /// Engine meshes keep no bounds of their own; for them the bounds live on
    /// the entity's `Aabb`, refreshed by the map systems after each upload.
    fn recalculate_bounds(&mut self);
    /// Recomputes vertex normals from the current vertices and triangles.
    fn recalculate_normals(&mut self);

    /// Number of vertices.
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Vertex at `index`, if in range.
    fn vertex(&self, index: usize) -> Option<Vec3> {
        self.vertices().get(index).copied()
    }
}

/// Axis-aligned bounding box of a vertex buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |b, &p| Self {
                min: b.min.min(p),
                max: b.max.max(p),
            },
        ))
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }
}

/// Plain in-memory mesh: the geometry a chunk owns between uploads.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffers {
    vertices: Vec<Vec3>,
    colors: Vec<Srgba>,
    triangles: Vec<u32>,
    normals: Vec<Vec3>,
    bounds: Option<Bounds>,
}

impl MeshBuffers {
    /// Bounds as of the last [`RenderableMesh::recalculate_bounds`].
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Normals as of the last [`RenderableMesh::recalculate_normals`].
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Builds an engine mesh carrying the same positions, colors, indices and normals.
    ///
    /// Stored normals are reused when they cover every vertex; otherwise the
    /// engine recomputes them.
    pub fn to_bevy_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        );
        mesh.set_vertices(self.vertices());
        mesh.set_colors(self.colors());
        mesh.set_triangles(self.triangles());
        if !self.normals.is_empty() && self.normals.len() == self.vertices.len() {
            let normals: Vec<[f32; 3]> = self.normals.iter().map(|n| n.to_array()).collect();
            mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        } else {
            mesh.recalculate_normals();
        }
        mesh
    }
}

impl RenderableMesh for MeshBuffers {
    fn vertices(&self) -> Vec<Vec3> {
        self.vertices.clone()
    }

    fn set_vertices(&mut self, vertices: Vec<Vec3>) {
        self.vertices = vertices;
    }

    fn colors(&self) -> Vec<Srgba> {
        self.colors.clone()
    }

    fn set_colors(&mut self, colors: Vec<Srgba>) {
        self.colors = colors;
    }

    fn triangles(&self) -> Vec<u32> {
        self.triangles.clone()
    }

    fn set_triangles(&mut self, triangles: Vec<u32>) {
        self.triangles = triangles;
    }

    fn recalculate_bounds(&mut self) {
        self.bounds = Bounds::from_points(&self.vertices);
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertex(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied()
    }

    fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.triangles.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (Some(&va), Some(&vb), Some(&vc)) =
                (self.vertices.get(a), self.vertices.get(b), self.vertices.get(c))
            else {
                continue;
            };
            let n = math::compute_normal(va, vb, vc);
            for i in [a, b, c] {
                normals[i] += n;
            }
        }
        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }
}

/// Engine adapter, the upload target built by [`MeshBuffers::to_bevy_mesh`].
impl RenderableMesh for Mesh {
    fn vertices(&self) -> Vec<Vec3> {
        match self.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(positions)) => {
                positions.iter().map(|&p| Vec3::from_array(p)).collect()
            }
            _ => Vec::new(),
        }
    }

    fn set_vertices(&mut self, vertices: Vec<Vec3>) {
        let positions: Vec<[f32; 3]> = vertices.into_iter().map(|v| v.to_array()).collect();
        self.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    }

    fn colors(&self) -> Vec<Srgba> {
        match self.attribute(Mesh::ATTRIBUTE_COLOR) {
            Some(VertexAttributeValues::Float32x4(colors)) => colors
                .iter()
                .map(|&c| Srgba::from(LinearRgba::from_f32_array(c)))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn set_colors(&mut self, colors: Vec<Srgba>) {
        let linear: Vec<[f32; 4]> = colors
            .into_iter()
            .map(|c| LinearRgba::from(c).to_f32_array())
            .collect();
        self.insert_attribute(Mesh::ATTRIBUTE_COLOR, linear);
    }

    fn triangles(&self) -> Vec<u32> {
        self.indices()
            .map(|indices| indices.iter().map(|i| i as u32).collect())
            .unwrap_or_default()
    }

    fn set_triangles(&mut self, triangles: Vec<u32>) {
        self.insert_indices(Indices::U32(triangles));
    }

    fn recalculate_bounds(&mut self) {}

    fn recalculate_normals(&mut self) {
        self.compute_normals();
    }
}
