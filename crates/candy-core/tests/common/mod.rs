#![allow(dead_code)]

use candy_core::mesh::CpuMesh;
use candy_core::model::{Model, ModelPart};
use glam::{Mat4, Vec3};

/// Axis-aligned cube of edge `size` centred on `center`.
pub fn cube_mesh(size: f32, center: Vec3) -> CpuMesh {
    let h = size / 2.0;
    let c = center;
    let positions = vec![
        [c.x - h, c.y - h, c.z - h],
        [c.x + h, c.y - h, c.z - h],
        [c.x + h, c.y + h, c.z - h],
        [c.x - h, c.y + h, c.z - h],
        [c.x - h, c.y - h, c.z + h],
        [c.x + h, c.y - h, c.z + h],
        [c.x + h, c.y + h, c.z + h],
        [c.x - h, c.y + h, c.z + h],
    ];
    let indices = vec![
        0, 2, 1, 0, 3, 2, // -z
        4, 5, 6, 4, 6, 7, // +z
        0, 1, 5, 0, 5, 4, // -y
        3, 7, 6, 3, 6, 2, // +y
        0, 4, 7, 0, 7, 3, // -x
        1, 2, 6, 1, 6, 5, // +x
    ];
    CpuMesh::new(positions, indices)
}

pub fn cube_model(size: f32, center: Vec3) -> Model {
    Model::from_parts(vec![ModelPart {
        name: "cube".to_string(),
        local: Mat4::IDENTITY,
        mesh: cube_mesh(size, center),
    }])
}

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
