pub mod bubbles;
pub mod camera;
pub mod carousel;
pub mod constants;
pub mod detail;
pub mod ease;
pub mod emotion;
pub mod framing;
pub mod hint;
pub mod home;
pub mod interact;
pub mod material;
pub mod mesh;
pub mod model;
pub mod pass;
pub mod scene;
pub mod shop;
pub mod staging;
pub mod trail;
pub mod volume;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static RIBBON_WGSL: &str = include_str!("../shaders/ribbon.wgsl");

pub use camera::Camera;
pub use carousel::{shortest_delta, Carousel};
pub use emotion::Emotion;
pub use framing::{frame_to_viewport, Framing, FramingConfig};
pub use hint::{FlagStore, HintScheduler, MemoryStore, HINT_SEEN_KEY};
pub use material::{Material, MaterialBlock, ShaderKind, Side};
pub use mesh::{Aabb, CpuMesh, StripMesh};
pub use model::{Model, ModelError};
pub use pass::FramePlan;
pub use scene::{DrawItem, MeshId, NodeId, Scene, Transform};
pub use trail::Trail;
pub use volume::VolumeState;
