//! Binary glTF (`.glb`) parsing into flattened CPU mesh parts.
//!
//! Only embedded buffers are supported; every model this site ships is a
//! single self-contained `.glb`.

use crate::material::Material;
use crate::mesh::{Aabb, CpuMesh};
use crate::scene::{MeshId, NodeId, Scene, Transform};
use glam::{Mat4, Vec3};
use gltf::mesh::util::ReadIndices;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("glTF parse failed: {0}")]
    Parse(#[from] gltf::Error),
    #[error("buffer {0} is not embedded in the binary chunk")]
    ExternalBuffer(usize),
    #[error("model has no scene")]
    NoScene,
    #[error("model contains no triangle geometry")]
    Empty,
}

/// One primitive with the accumulated transform of its node chain.
#[derive(Clone, Debug)]
pub struct ModelPart {
    pub name: String,
    pub local: Mat4,
    pub mesh: CpuMesh,
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    pub parts: Vec<ModelPart>,
}

impl Model {
    pub fn from_parts(parts: Vec<ModelPart>) -> Self {
        Self { parts }
    }

    pub fn from_glb(bytes: &[u8]) -> Result<Self, ModelError> {
        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
        for buffer in document.buffers() {
            if !matches!(buffer.source(), gltf::buffer::Source::Bin) {
                return Err(ModelError::ExternalBuffer(buffer.index()));
            }
        }
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or(ModelError::NoScene)?;

        let mut parts = Vec::new();
        for node in scene.nodes() {
            collect_node(&node, Mat4::IDENTITY, blob.as_deref(), &mut parts);
        }
        if parts.is_empty() {
            return Err(ModelError::Empty);
        }
        log::debug!("[model] parsed {} parts", parts.len());
        Ok(Self { parts })
    }

    /// Box of all parts in model space.
    pub fn bounds(&self) -> Aabb {
        self.parts
            .iter()
            .fold(Aabb::EMPTY, |acc, p| acc.union(&p.mesh.bounds.transformed(&p.local)))
    }

    /// Upload every part's geometry to the scene and build a detached template
    /// subtree. `dress` turns each part into one or more `(material, render_order)`
    /// mesh nodes sharing the same geometry.
    pub fn into_template(
        self,
        scene: &mut Scene,
        name: &str,
        mut dress: impl FnMut(&ModelPart) -> Vec<(Material, i32)>,
    ) -> NodeId {
        let root = scene.create_detached(name);
        for part in self.parts {
            let looks = dress(&part);
            let transform = Transform::from_matrix(&part.local);
            let part_name = part.name.clone();
            let mesh: MeshId = scene.add_mesh(part.mesh);
            for (material, order) in looks {
                let id = scene.spawn_mesh(root, &part_name, mesh, material);
                let node = scene.node_mut(id);
                node.transform = transform;
                node.render_order = order;
            }
        }
        root
    }
}

fn collect_node(node: &gltf::Node<'_>, parent: Mat4, blob: Option<&[u8]>, out: &mut Vec<ModelPart>) {
    let local = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            if let Some(cpu) = read_primitive(&prim, blob) {
                out.push(ModelPart {
                    name: node.name().or(mesh.name()).unwrap_or("mesh").to_string(),
                    local,
                    mesh: cpu,
                });
            }
        }
    }
    for child in node.children() {
        collect_node(&child, local, blob, out);
    }
}

fn read_primitive(prim: &gltf::Primitive<'_>, blob: Option<&[u8]>) -> Option<CpuMesh> {
    let reader = prim.reader(|b| match b.source() {
        gltf::buffer::Source::Bin => blob,
        gltf::buffer::Source::Uri(_) => None,
    });
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    if positions.is_empty() {
        return None;
    }
    let indices: Vec<u32> = match reader.read_indices() {
        Some(ReadIndices::U8(it)) => it.map(u32::from).collect(),
        Some(ReadIndices::U16(it)) => it.map(u32::from).collect(),
        Some(ReadIndices::U32(it)) => it.collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let uvs: Option<Vec<[f32; 2]>> = reader.read_tex_coords(0).map(|t| t.into_f32().collect());

    // normals are always recomputed so shells and candies shade the same way
    let mut mesh = CpuMesh::new(positions, indices);
    if let Some(uvs) = uvs {
        if uvs.len() == mesh.positions.len() {
            mesh.uvs = uvs;
        }
    }
    Some(mesh)
}

/// Diagonal length of a box, zero when empty.
#[inline]
pub fn diagonal(b: &Aabb) -> f32 {
    if b.is_valid() {
        b.size().length()
    } else {
        0.0
    }
}

/// Center of a box, origin when empty.
#[inline]
pub fn center_or_origin(b: &Aabb) -> Vec3 {
    if b.is_valid() {
        b.center()
    } else {
        Vec3::ZERO
    }
}
