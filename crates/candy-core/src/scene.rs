//! Arena scene graph: nodes own a local transform, an optional mesh with a
//! typed material, and an optional identifying tag used by picking.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Detached
//! subtrees (not under the root) act as templates that can be cloned.

use crate::material::Material;
use crate::mesh::{Aabb, CpuMesh};
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(u32);

impl MeshId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn from_matrix(m: &Mat4) -> Self {
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }
}

/// What a picked subtree identifies.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    /// Ordinal of an enumerated entity.
    Entity(usize),
    /// Navigation target of a bubble, with its ordinal.
    Link { index: usize, url: String },
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub render_order: i32,
    pub mesh: Option<MeshId>,
    pub material: Option<Material>,
    pub tag: Option<Tag>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::IDENTITY,
            visible: true,
            render_order: 0,
            mesh: None,
            material: None,
            tag: None,
            parent: None,
            children: SmallVec::new(),
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Result of a ray cast against mesh nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// One mesh to draw this frame.
#[derive(Clone, Copy, Debug)]
pub struct DrawItem {
    pub node: NodeId,
    pub mesh: MeshId,
    pub world: Mat4,
    pub material: Material,
    pub render_order: i32,
}

pub struct Scene {
    nodes: Vec<Node>,
    meshes: Vec<CpuMesh>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("root")],
            meshes: Vec::new(),
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn add_mesh(&mut self, mesh: CpuMesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId((self.meshes.len() - 1) as u32)
    }

    #[inline]
    pub fn mesh(&self, id: MeshId) -> &CpuMesh {
        &self.meshes[id.index()]
    }

    #[inline]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// A new node with no parent (a template or not-yet-placed subtree).
    pub fn create_detached(&mut self, name: &str) -> NodeId {
        self.nodes.push(Node::new(name));
        NodeId((self.nodes.len() - 1) as u32)
    }

    /// A new node attached under `parent`.
    pub fn spawn(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.create_detached(name);
        self.attach(parent, id);
        id
    }

    /// A new mesh node attached under `parent`.
    pub fn spawn_mesh(&mut self, parent: NodeId, name: &str, mesh: MeshId, material: Material) -> NodeId {
        let id = self.spawn(parent, name);
        let n = self.node_mut(id);
        n.mesh = Some(mesh);
        n.material = Some(material);
        id
    }

    /// Re-parent `child` under `parent`, detaching it from any previous parent.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.is_ancestor(child, parent) {
            log::warn!("[scene] refusing to attach {:?} under its own descendant", child);
            return;
        }
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    pub fn detach(&mut self, child: NodeId) {
        if let Some(p) = self.nodes[child.index()].parent.take() {
            self.nodes[p.index()].children.retain(|c| *c != child);
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// True when `a` is a strict ancestor of `b`.
    pub fn is_ancestor(&self, a: NodeId, b: NodeId) -> bool {
        let mut cur = self.nodes[b.index()].parent;
        while let Some(p) = cur {
            if p == a {
                return true;
            }
            cur = self.nodes[p.index()].parent;
        }
        false
    }

    /// Whether the node is reachable from the scene root.
    pub fn is_in_scene(&self, id: NodeId) -> bool {
        id == self.root || self.is_ancestor(self.root, id)
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = self.nodes[id.index()].transform.matrix();
        let mut cur = self.nodes[id.index()].parent;
        while let Some(p) = cur {
            m = self.nodes[p.index()].transform.matrix() * m;
            cur = self.nodes[p.index()].parent;
        }
        m
    }

    #[inline]
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).w_axis.truncate()
    }

    /// Pre-order list of `id` and all of its descendants.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n.index()].children.iter().rev().copied());
        }
        out
    }

    /// Apply `f` to every material in the subtree.
    pub fn for_each_material_mut(&mut self, id: NodeId, mut f: impl FnMut(&mut Material)) {
        for n in self.descendants(id) {
            if let Some(m) = self.nodes[n.index()].material.as_mut() {
                f(m);
            }
        }
    }

    /// World-space box of every mesh in the subtree, visible or not.
    pub fn bounds(&self, id: NodeId) -> Aabb {
        let mut b = Aabb::EMPTY;
        self.accumulate_bounds(id, &self.parent_world(id), &mut b);
        b
    }

    fn parent_world(&self, id: NodeId) -> Mat4 {
        match self.nodes[id.index()].parent {
            Some(p) => self.world_matrix(p),
            None => Mat4::IDENTITY,
        }
    }

    fn accumulate_bounds(&self, id: NodeId, parent_world: &Mat4, out: &mut Aabb) {
        let node = &self.nodes[id.index()];
        let world = *parent_world * node.transform.matrix();
        if let Some(mesh) = node.mesh {
            *out = out.union(&self.meshes[mesh.index()].bounds.transformed(&world));
        }
        for c in node.children.iter() {
            self.accumulate_bounds(*c, &world, out);
        }
    }

    /// Deep-copy a subtree. The copy is detached; meshes are shared by id and
    /// materials are copied by value.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let src = self.nodes[id.index()].clone();
        let copy = self.create_detached(&src.name);
        {
            let n = self.node_mut(copy);
            n.transform = src.transform;
            n.visible = src.visible;
            n.render_order = src.render_order;
            n.mesh = src.mesh;
            n.material = src.material;
            n.tag = src.tag.clone();
        }
        for child in src.children.iter() {
            let c = self.clone_subtree(*child);
            self.attach(copy, c);
        }
        copy
    }

    /// Walk up from `id` to the nearest node carrying a tag.
    pub fn tagged_ancestor(&self, id: NodeId) -> Option<(NodeId, &Tag)> {
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = &self.nodes[n.index()];
            if let Some(tag) = node.tag.as_ref() {
                return Some((n, tag));
            }
            cur = node.parent;
        }
        None
    }

    /// Nearest visible mesh hit among the subtrees of `roots`.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, roots: &[NodeId]) -> Option<Hit> {
        let dir = dir.try_normalize()?;
        let mut best: Option<Hit> = None;
        for root in roots {
            self.raycast_node(*root, &self.parent_world(*root), origin, dir, &mut best);
        }
        best
    }

    fn raycast_node(&self, id: NodeId, parent_world: &Mat4, origin: Vec3, dir: Vec3, best: &mut Option<Hit>) {
        let node = &self.nodes[id.index()];
        if !node.visible {
            return;
        }
        let world = *parent_world * node.transform.matrix();
        if let Some(mesh) = node.mesh {
            let inv = world.inverse();
            if inv.is_finite() {
                let lo = inv.transform_point3(origin);
                let ld = inv.transform_vector3(dir);
                // an affine map preserves the ray parameter, so `t` is a world distance
                if let Some(t) = self.meshes[mesh.index()].ray_hit(lo, ld) {
                    if best.map_or(true, |b| t < b.distance) {
                        *best = Some(Hit {
                            node: id,
                            distance: t,
                            point: origin + dir * t,
                        });
                    }
                }
            }
        }
        for c in node.children.iter() {
            self.raycast_node(*c, &world, origin, dir, best);
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.nodes[id.index()].visible = visible;
    }

    /// Visible mesh nodes reachable from the root, stably sorted by render order.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut out = Vec::new();
        self.collect_draws(self.root, &Mat4::IDENTITY, &mut out);
        out.sort_by_key(|d| d.render_order);
        out
    }

    fn collect_draws(&self, id: NodeId, parent_world: &Mat4, out: &mut Vec<DrawItem>) {
        let node = &self.nodes[id.index()];
        if !node.visible {
            return;
        }
        let world = *parent_world * node.transform.matrix();
        if let (Some(mesh), Some(material)) = (node.mesh, node.material) {
            out.push(DrawItem {
                node: id,
                mesh,
                world,
                material,
                render_order: node.render_order,
            });
        }
        for c in node.children.iter() {
            self.collect_draws(*c, &world, out);
        }
    }
}
