use super::pipelines::SceneVertex;
use candy_core::{CpuMesh, MeshId, Scene};
use wgpu::util::DeviceExt;

pub(crate) struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

/// GPU copies of scene meshes, uploaded on first use. Scene meshes never
/// change after they are added, so a slot is filled once.
#[derive(Default)]
pub(crate) struct MeshCache {
    slots: Vec<Option<GpuMesh>>,
}

impl MeshCache {
    /// Upload `id` if this is its first use. Returns false for meshes that
    /// have nothing to draw.
    pub(crate) fn ensure(&mut self, device: &wgpu::Device, scene: &Scene, id: MeshId) -> bool {
        let i = id.index();
        if i >= self.slots.len() {
            self.slots.resize_with(i + 1, || None);
        }
        if self.slots[i].is_none() {
            self.slots[i] = upload(device, scene.mesh(id));
        }
        self.slots[i].is_some()
    }

    #[inline]
    pub(crate) fn get(&self, id: MeshId) -> Option<&GpuMesh> {
        self.slots.get(id.index()).and_then(|m| m.as_ref())
    }
}

fn upload(device: &wgpu::Device, mesh: &CpuMesh) -> Option<GpuMesh> {
    if mesh.indices.is_empty() || mesh.positions.is_empty() {
        return None;
    }
    let vertices: Vec<SceneVertex> = mesh
        .positions
        .iter()
        .enumerate()
        .map(|(i, p)| SceneVertex {
            pos: *p,
            nrm: mesh.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            uv: mesh.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
        })
        .collect();
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_vb"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh_ib"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    Some(GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
    })
}
