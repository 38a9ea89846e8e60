//! Draw lists for the two-pass refraction frame.

use crate::scene::{DrawItem, NodeId, Scene};

/// One frame's worth of draw lists. `offscreen` is the scene with every
/// refractive subtree hidden; its color target is what refractive materials
/// sample in the on-screen pass.
#[derive(Clone, Debug, Default)]
pub struct FramePlan {
    pub offscreen: Option<Vec<DrawItem>>,
    pub onscreen: Vec<DrawItem>,
}

impl FramePlan {
    #[inline]
    pub fn is_two_pass(&self) -> bool {
        self.offscreen.is_some()
    }
}

/// Build the frame. With no refractive subtrees, or before the scene is
/// `ready`, the frame degenerates to a single direct pass.
pub fn plan_frame(scene: &mut Scene, refractive: &[NodeId], ready: bool) -> FramePlan {
    if !ready || refractive.is_empty() {
        return FramePlan {
            offscreen: None,
            onscreen: scene.draw_list(),
        };
    }
    let previous: Vec<bool> = refractive.iter().map(|id| scene.node(*id).visible).collect();
    for id in refractive {
        scene.set_visible(*id, false);
    }
    let offscreen = scene.draw_list();
    for (id, was) in refractive.iter().zip(previous) {
        scene.set_visible(*id, was);
    }
    FramePlan {
        offscreen: Some(offscreen),
        onscreen: scene.draw_list(),
    }
}
