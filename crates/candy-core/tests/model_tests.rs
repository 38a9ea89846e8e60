use candy_core::model::{Model, ModelError};
use glam::Vec3;

const POSITIONS_JSON: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "name": "shell", "mesh": 0, "translation": [1.0, 0.0, 0.0] }],
  "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1 }] }],
  "buffers": [{ "byteLength": 44 BUFFER_URI }],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
  ]
}"#;

fn chunk(kind: u32, mut data: Vec<u8>, pad: u8) -> Vec<u8> {
    while data.len() % 4 != 0 {
        data.push(pad);
    }
    let mut out = Vec::new();
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&data);
    out
}

/// A single triangle in a self-contained `.glb`.
fn triangle_glb(external: bool) -> Vec<u8> {
    let json = POSITIONS_JSON.replace(
        "BUFFER_URI",
        if external { r#", "uri": "triangle.bin""# } else { "" },
    );
    let mut bin = Vec::new();
    for v in [[0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in v {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }

    let mut body = chunk(0x4E4F_534A, json.into_bytes(), b' ');
    if !external {
        body.extend(chunk(0x004E_4942, bin, 0));
    }
    let mut glb = Vec::new();
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&((12 + body.len()) as u32).to_le_bytes());
    glb.extend(body);
    glb
}

#[test]
fn embedded_triangle_parses_with_node_transform() {
    let model = Model::from_glb(&triangle_glb(false)).expect("parse");
    assert_eq!(model.parts.len(), 1);
    let part = &model.parts[0];
    assert_eq!(part.name, "shell");
    assert_eq!(part.mesh.indices, vec![0, 1, 2]);
    assert_eq!(part.mesh.normals.len(), 3);

    let b = model.bounds();
    assert!(b.min.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6));
    assert!(b.max.abs_diff_eq(Vec3::new(2.0, 1.0, 0.0), 1e-6));
}

#[test]
fn garbage_bytes_are_a_parse_error() {
    let err = Model::from_glb(b"definitely not a model").unwrap_err();
    assert!(matches!(err, ModelError::Parse(_)));
}

#[test]
fn external_buffers_are_rejected() {
    let err = Model::from_glb(&triangle_glb(true)).unwrap_err();
    assert!(matches!(err, ModelError::ExternalBuffer(0)));
}
