use anyhow::{bail, Context, Result};
use glam::{Mat4, Vec3};
use log::{debug, info};
use std::path::Path;

use crate::types::Vertex;

/// CPU-side mesh: interleaved vertices, triangle indices, and the material
/// base color (alpha included, for blended nodes).
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
}

/// Load all mesh primitives of a glTF file into a single [`MeshData`],
/// with node transforms baked into the vertices.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    info!("loading model {}", path.display());

    let (document, buffers, _images) = gltf::import(path)
        .with_context(|| format!("failed to load glTF file {}", path.display()))?;

    let mut data = MeshData {
        vertices: Vec::new(),
        indices: Vec::new(),
        base_color: [0.8, 0.8, 0.8, 1.0],
    };
    let mut color_set = false;

    for scene in document.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut data, &mut color_set)?;
        }
    }

    if data.vertices.is_empty() {
        bail!("no mesh geometry found in {}", path.display());
    }

    debug!(
        "loaded {} vertices, {} triangles from {}",
        data.vertices.len(),
        data.indices.len() / 3,
        path.display()
    );
    Ok(data)
}

/// Recursively walk glTF nodes, accumulating transforms.
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    data: &mut MeshData,
    color_set: &mut bool,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, data, color_set)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, data, color_set)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    data: &mut MeshData,
    color_set: &mut bool,
) -> Result<()> {
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("mesh primitive has no positions")?
            .map(Vec3::from_array)
            .collect();
        if positions.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals.map(Vec3::from_array).collect(),
            None => smooth_normals(&positions, &indices),
        };

        let base = data.vertices.len() as u32;
        for (position, normal) in positions.iter().zip(normals.iter()) {
            let p = transform.transform_point3(*position);
            let n = transform
                .transform_vector3(*normal)
                .try_normalize()
                .unwrap_or(Vec3::Z);
            data.vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            });
        }
        data.indices.extend(indices.iter().map(|i| base + i));

        // First material wins; the clock models are single-material.
        if !*color_set {
            data.base_color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();
            *color_set = true;
        }
    }

    Ok(())
}

/// Area-weighted vertex normals for meshes that ship without them.
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let a = triangle[0] as usize;
        let b = triangle[1] as usize;
        let c = triangle[2] as usize;
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Z))
        .collect()
}
