//! Order-independent assembly of candy entities.
//!
//! Each entity needs its own candy model plus clones of two shared templates
//! (wrapper shell and deco). Loads finish in any order; an attach step only
//! runs once both of its halves are present. Entities whose candy arrived
//! before a template sit in a waiting queue that the template drains.

use crate::constants::{
    CANDY_RENDER_ORDER, CANDY_ROOT_SCALE, DECO_LOCAL_EULER, DECO_LOCAL_POSITION,
    WRAPPER_BACK_OPACITY, WRAPPER_BACK_RENDER_ORDER, WRAPPER_DIAGONAL_RATIO,
    WRAPPER_FRONT_OPACITY, WRAPPER_FRONT_RENDER_ORDER,
};
use crate::material::{Material, Side, WrapperParams};
use crate::model::{center_or_origin, diagonal, Model};
use crate::scene::{NodeId, Scene, Transform};
use glam::{EulerRot, Quat, Vec3};

/// Build the shared wrapper template: every mesh becomes a back-face shell and
/// a front-face shell over the same geometry.
pub fn wrapper_template(model: Model, scene: &mut Scene) -> NodeId {
    model.into_template(scene, "wrapper", |_| {
        vec![
            (
                Material::Wrapper(WrapperParams::new(WRAPPER_BACK_OPACITY, Side::Back)),
                WRAPPER_BACK_RENDER_ORDER,
            ),
            (
                Material::Wrapper(WrapperParams::new(WRAPPER_FRONT_OPACITY, Side::Front)),
                WRAPPER_FRONT_RENDER_ORDER,
            ),
        ]
    })
}

/// Build one entity's candy subtree with its own material, scaled for the scene.
pub fn candy_subtree(model: Model, scene: &mut Scene, material: Material) -> NodeId {
    let root = model.into_template(scene, "candy", |_| vec![(material, CANDY_RENDER_ORDER)]);
    scene.node_mut(root).transform.scale = Vec3::splat(CANDY_ROOT_SCALE);
    root
}

/// Deco templates keep their authored materials as a plain tint.
pub fn deco_template(model: Model, scene: &mut Scene, material: Material) -> NodeId {
    model.into_template(scene, "deco", |_| vec![(material, CANDY_RENDER_ORDER)])
}

#[derive(Clone, Copy, Debug, Default)]
struct Slots {
    root: Option<NodeId>,
    candy: Option<NodeId>,
    wrapper: Option<NodeId>,
    deco: Option<NodeId>,
}

/// What an arrival caused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Attached {
    pub wrappers: usize,
    pub decos: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Staging {
    entities: Vec<Slots>,
    wrapper_template: Option<NodeId>,
    deco_template: Option<NodeId>,
    waiting_wrapper: Vec<usize>,
    waiting_deco: Vec<usize>,
}

impl Staging {
    /// `roots` are the eagerly created entity nodes, indexed by ordinal.
    pub fn new(roots: &[NodeId]) -> Self {
        Self {
            entities: roots
                .iter()
                .map(|r| Slots {
                    root: Some(*r),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn root(&self, i: usize) -> Option<NodeId> {
        self.entities.get(i).and_then(|s| s.root)
    }

    pub fn candy(&self, i: usize) -> Option<NodeId> {
        self.entities.get(i).and_then(|s| s.candy)
    }

    pub fn wrapper(&self, i: usize) -> Option<NodeId> {
        self.entities.get(i).and_then(|s| s.wrapper)
    }

    pub fn deco(&self, i: usize) -> Option<NodeId> {
        self.entities.get(i).and_then(|s| s.deco)
    }

    /// Entities still waiting for the wrapper or deco template.
    pub fn waiting(&self) -> (&[usize], &[usize]) {
        (&self.waiting_wrapper, &self.waiting_deco)
    }

    /// Both inner and wrapper halves are present.
    pub fn is_complete(&self, i: usize) -> bool {
        self.candy(i).is_some() && self.wrapper(i).is_some()
    }

    pub fn wrapper_roots(&self) -> Vec<NodeId> {
        self.entities.iter().filter_map(|s| s.wrapper).collect()
    }

    /// An entity's own candy arrived. A second arrival for the same entity is
    /// ignored.
    pub fn candy_loaded(&mut self, scene: &mut Scene, i: usize, candy: NodeId) -> Attached {
        let Some(slot) = self.entities.get_mut(i) else {
            log::warn!("[staging] candy for unknown entity {}", i);
            return Attached::default();
        };
        let Some(root) = slot.root else {
            return Attached::default();
        };
        if slot.candy.is_some() {
            return Attached::default();
        }
        scene.attach(root, candy);
        slot.candy = Some(candy);
        self.try_attach(scene, i)
    }

    pub fn wrapper_template_loaded(&mut self, scene: &mut Scene, template: NodeId) -> Attached {
        self.wrapper_template = Some(template);
        let waiting = std::mem::take(&mut self.waiting_wrapper);
        let mut out = Attached::default();
        for i in waiting {
            out.wrappers += self.try_attach(scene, i).wrappers;
        }
        out
    }

    pub fn deco_template_loaded(&mut self, scene: &mut Scene, template: NodeId) -> Attached {
        self.deco_template = Some(template);
        let waiting = std::mem::take(&mut self.waiting_deco);
        let mut out = Attached::default();
        for i in waiting {
            out.decos += self.try_attach(scene, i).decos;
        }
        out
    }

    fn try_attach(&mut self, scene: &mut Scene, i: usize) -> Attached {
        let mut out = Attached::default();
        let slot = self.entities[i];
        let (Some(root), Some(candy)) = (slot.root, slot.candy) else {
            return out;
        };

        if slot.wrapper.is_none() {
            match self.wrapper_template {
                Some(template) => {
                    let wrapper = scene.clone_subtree(template);
                    scene.attach(root, wrapper);
                    align_wrapper(scene, candy, wrapper);
                    self.entities[i].wrapper = Some(wrapper);
                    out.wrappers += 1;
                }
                None => queue(&mut self.waiting_wrapper, i),
            }
        }

        if slot.deco.is_none() {
            match self.deco_template {
                Some(template) => {
                    let deco = scene.clone_subtree(template);
                    scene.attach(candy, deco);
                    scene.node_mut(deco).transform = deco_transform();
                    self.entities[i].deco = Some(deco);
                    out.decos += 1;
                }
                None => queue(&mut self.waiting_deco, i),
            }
        }
        out
    }
}

fn queue(list: &mut Vec<usize>, i: usize) {
    if !list.contains(&i) {
        list.push(i);
    }
}

/// Local pose of the deco under the candy root.
pub fn deco_transform() -> Transform {
    Transform {
        translation: DECO_LOCAL_POSITION,
        rotation: Quat::from_euler(
            EulerRot::XYZ,
            DECO_LOCAL_EULER.x,
            DECO_LOCAL_EULER.y,
            DECO_LOCAL_EULER.z,
        ),
        scale: Vec3::ONE,
    }
}

/// Scale the wrapper so its box diagonal is a fixed multiple of the candy's,
/// then move it so the two box centers coincide. Empty boxes skip the scale.
pub fn align_wrapper(scene: &mut Scene, candy: NodeId, wrapper: NodeId) {
    let candy_box = scene.bounds(candy);
    let candy_diag = diagonal(&candy_box);
    let wrapper_diag = diagonal(&scene.bounds(wrapper));
    if candy_diag > 0.0 && wrapper_diag > 0.0 {
        let k = candy_diag * WRAPPER_DIAGONAL_RATIO / wrapper_diag;
        scene.node_mut(wrapper).transform.scale *= k;
    }

    let wrapper_center = center_or_origin(&scene.bounds(wrapper));
    let world_delta = center_or_origin(&candy_box) - wrapper_center;
    let parent_inv = match scene.node(wrapper).parent() {
        Some(p) => scene.world_matrix(p).inverse(),
        None => glam::Mat4::IDENTITY,
    };
    let local_delta = parent_inv.transform_vector3(world_delta);
    if local_delta.is_finite() {
        scene.node_mut(wrapper).transform.translation += local_delta;
    }
}
