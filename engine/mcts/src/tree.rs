//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! The parent link is a plain back-index, so discarding a subtree is a
//! matter of dropping arena slots: `reroot` compacts the arena down to the
//! subtree under the new root.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use reverse_hex::{Cell, Color};

use crate::node::{MctsNode, NodeId};
use crate::rollout::Rollout;

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after construction or reroot)
    root: NodeId,
}

impl Default for MctsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MctsTree {
    /// Create a tree holding a single unvisited root.
    pub fn new() -> Self {
        Self {
            nodes: vec![MctsNode::new_root()],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add one child per move to `parent`, all at once.
    pub fn expand(&mut self, parent: NodeId, moves: &[Cell]) {
        for &mv in moves {
            let child = self.allocate(MctsNode::new_child(parent, mv));
            self.get_mut(parent).children.push((mv, child));
        }
    }

    /// Select the child of `node_id` with the highest value, breaking ties
    /// uniformly at random. Returns None for an unexpanded node.
    pub fn select_child(
        &self,
        node_id: NodeId,
        explore: f64,
        crit: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<(Cell, NodeId)> {
        let children = &self.get(node_id).children;
        let values: Vec<f64> = children
            .iter()
            .map(|(_, id)| self.get(*id).value(explore, crit))
            .collect();

        let best = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<(Cell, NodeId)> = children
            .iter()
            .zip(&values)
            .filter(|(_, &v)| v == best)
            .map(|(child, _)| *child)
            .collect();

        pick(&tied, rng)
    }

    /// Most visited child of the root, ties broken uniformly at random.
    pub fn best_child(&self, rng: &mut ChaCha20Rng) -> Option<(Cell, NodeId)> {
        let children = &self.get(self.root).children;
        let most = children
            .iter()
            .map(|(_, id)| self.get(*id).visits)
            .max()?;
        let tied: Vec<(Cell, NodeId)> = children
            .iter()
            .filter(|(_, id)| self.get(*id).visits == most)
            .copied()
            .collect();

        pick(&tied, rng)
    }

    /// Backpropagate a rollout from `leaf` to the root.
    ///
    /// `turn` is the side to move at `leaf`. The reward at each node is from
    /// the point of view of the player who moved into it, so it flips sign
    /// at every level. At each node the children whose move the side to
    /// move ended up owning in the rollout receive RAVE credit.
    pub fn backpropagate(&mut self, leaf_id: NodeId, turn: Color, rollout: &Rollout) {
        let black: HashSet<Cell> = rollout.black.iter().copied().collect();
        let white: HashSet<Cell> = rollout.white.iter().copied().collect();

        let mut current_id = leaf_id;
        let mut turn = turn;
        let mut reward: f64 = if rollout.winner == turn { -1.0 } else { 1.0 };

        while current_id.is_some() {
            let owned = match turn {
                Color::White => &white,
                Color::Black => &black,
            };
            let credited: Vec<NodeId> = self
                .get(current_id)
                .children
                .iter()
                .filter(|(mv, _)| owned.contains(mv))
                .map(|(_, id)| *id)
                .collect();
            for child_id in credited {
                let child = self.get_mut(child_id);
                child.rave_reward -= reward;
                child.rave_visits += 1;
            }

            let node = self.get_mut(current_id);
            node.visits += 1;
            node.reward += reward;

            turn = turn.opponent();
            reward = -reward;
            current_id = node.parent;
        }
    }

    /// Make `new_root` the root, discarding everything outside its subtree.
    ///
    /// The arena is rebuilt in breadth-first order so the new root is
    /// `NodeId(0)`; statistics and shape of the kept subtree are unchanged.
    pub fn reroot(&mut self, new_root: NodeId) {
        let mut old = std::mem::take(&mut self.nodes);
        let mut kept: Vec<MctsNode> = Vec::new();
        let mut queue = VecDeque::from([(new_root, NodeId::NONE)]);

        while let Some((old_id, parent)) = queue.pop_front() {
            let mut node = std::mem::replace(&mut old[old_id.0 as usize], MctsNode::new_root());
            let id = NodeId(kept.len() as u32);
            node.parent = parent;

            // Children land right after every node already queued, in order
            let first_child = kept.len() + queue.len() + 1;
            for (i, (_, child)) in node.children.iter_mut().enumerate() {
                queue.push_back((*child, id));
                *child = NodeId((first_child + i) as u32);
            }
            kept.push(node);
        }

        self.nodes = kept;
        self.root = NodeId(0);
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for (_, child) in &self.get(id).children {
                stack.push((*child, depth + 1));
            }
        }
        max_depth
    }
}

fn pick<T: Copy>(items: &[T], rng: &mut ChaCha20Rng) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[rng.gen_range(0..items.len())])
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
