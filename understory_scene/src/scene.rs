// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, local updates, world transform resolution.

use alloc::{vec, vec::Vec};
use kurbo::{Affine, Rect};

use crate::types::{LocalNode, NodeId};

/// A forest of nodes with local transforms.
///
/// Changes to local transforms and structure do **not** update world
/// transforms immediately. Affected subtrees are marked stale and their world
/// transforms are recomputed either for every node on [`Scene::commit`], or
/// for a single node (and the ancestors it depends on) on
/// [`Scene::resolve_world_transform`].
///
/// Nodes without a parent are roots. A root resolves as if it were attached to
/// an identity parent, so a detached node can always be measured without
/// touching its attachment.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Affine, Rect, Vec2};
/// use understory_scene::{LocalNode, Scene};
///
/// let mut scene = Scene::new();
/// let parent = scene.insert(
///     None,
///     LocalNode {
///         local_transform: Affine::translate(Vec2::new(10.0, 0.0)),
///         ..LocalNode::default()
///     },
/// );
/// let child = scene.insert(
///     Some(parent),
///     LocalNode {
///         local_bounds: Rect::new(0.0, 0.0, 4.0, 4.0),
///         ..LocalNode::default()
///     },
/// );
///
/// // World transforms are resolved lazily.
/// let world = scene.resolve_world_transform(child).unwrap();
/// assert_eq!(world.translation(), Vec2::new(10.0, 0.0));
/// ```
#[derive(Clone, Default)]
pub struct Scene {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let stale = self
            .nodes
            .iter()
            .filter(|n| n.as_ref().is_some_and(|n| n.stale))
            .count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("nodes_stale", &stale)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    world_transform: Affine,
    /// World transform must be recomputed before it is trusted.
    stale: bool,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            world_transform: Affine::IDENTITY,
            stale: true,
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new node as a child of `parent` (or as a root if `None`).
    ///
    /// Its world transform is stale until the next [`Scene::commit`] or
    /// [`Scene::resolve_world_transform`].
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node and its subtree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes[current.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(current.idx());
            }
        }
    }

    /// Reparent `id` under `new_parent`, or detach it when `None`.
    ///
    /// The local transform is kept as is, so the node's world placement
    /// follows its new parent.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        self.mark_subtree_stale(id);
    }

    /// Update local transform.
    pub fn set_local_transform(&mut self, id: NodeId, tf: Affine) {
        if let Some(n) = self.node_opt_mut(id)
            && n.local.local_transform != tf
        {
            n.local.local_transform = tf;
            self.mark_subtree_stale(id);
        }
    }

    /// Update local bounds.
    pub fn set_local_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_bounds = bounds;
        }
    }

    /// Returns the local geometry of a live node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Returns the local transform of a live node.
    pub fn local_transform(&self, id: NodeId) -> Option<Affine> {
        self.node_opt(id).map(|n| n.local.local_transform)
    }

    /// Returns the local bounds of a live node.
    pub fn local_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.local.local_bounds)
    }

    /// Return the world transform of a live node as last resolved.
    ///
    /// This does not resolve stale nodes; use [`Scene::is_stale`] to check, or
    /// [`Scene::resolve_world_transform`] to get an up-to-date value.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        self.node_opt(id).map(|n| n.world_transform)
    }

    /// Return the last resolved world transform of the parent of `id`.
    ///
    /// Roots report [`Affine::IDENTITY`].
    pub fn parent_world_transform(&self, id: NodeId) -> Option<Affine> {
        let node = self.node_opt(id)?;
        Some(match node.parent {
            Some(p) => self.node(p).world_transform,
            None => Affine::IDENTITY,
        })
    }

    /// Whether the world transform of a live node is out of date.
    pub fn is_stale(&self, id: NodeId) -> Option<bool> {
        self.node_opt(id).map(|n| n.stale)
    }

    /// Resolve the world transform of `id`, recomputing it and any stale
    /// ancestors first.
    ///
    /// Roots resolve against an identity parent. Attachment is never changed.
    /// Returns `None` for stale identifiers.
    pub fn resolve_world_transform(&mut self, id: NodeId) -> Option<Affine> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.resolve(id))
    }

    /// Recompute world transforms for every stale node.
    ///
    /// Returns the number of nodes whose world transform was recomputed.
    pub fn commit(&mut self) -> usize {
        let roots: Vec<NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Some(n) if n.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "NodeId uses 32-bit indices."
                    )]
                    Some(NodeId::new(i as u32, n.generation))
                }
                _ => None,
            })
            .collect();

        let mut updated = 0;
        // Walk depth-first, propagating world transforms toward the leaves.
        let mut stack: Vec<(NodeId, Affine)> = Vec::new();
        for root in roots {
            stack.push((root, Affine::IDENTITY));
            while let Some((id, parent_tf)) = stack.pop() {
                let node = self.node_mut(id);
                if node.stale {
                    node.world_transform = parent_tf * node.local.local_transform;
                    node.stale = false;
                    updated += 1;
                }
                for &child in node.children.iter().rev() {
                    stack.push((child, node.world_transform));
                }
            }
        }
        updated
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[][..], |n| n.children.as_slice())
    }

    // --- internals ---

    fn resolve(&mut self, id: NodeId) -> Affine {
        let node = self.node(id);
        if !node.stale {
            return node.world_transform;
        }
        let parent = node.parent;
        let parent_tf = match parent {
            Some(p) => self.resolve(p),
            None => Affine::IDENTITY,
        };
        let node = self.node_mut(id);
        node.world_transform = parent_tf * node.local.local_transform;
        node.stale = false;
        node.world_transform
    }

    fn mark_subtree_stale(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node_mut(current);
            node.stale = true;
            stack.extend_from_slice(&node.children);
        }
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
