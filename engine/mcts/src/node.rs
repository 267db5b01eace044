//! MCTS tree node representation.
//!
//! Each node represents the position reached by playing `action` from the
//! parent. Nodes carry direct visit statistics plus RAVE (all-moves-as-first)
//! statistics credited from any rollout in which the move was played.

use reverse_hex::Cell;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from the parent (None for the initial root)
    pub action: Option<Cell>,

    /// Number of times this node has been visited (N)
    pub visits: u32,

    /// Sum of rewards for the player who moved into this node (Q)
    pub reward: f64,

    /// Number of rollouts that credited this move through RAVE
    pub rave_visits: u32,

    /// Sum of RAVE rewards for the player who moved into this node
    pub rave_reward: f64,

    /// Children: Vec of (move, NodeId) pairs.
    /// Empty until node is expanded.
    pub children: Vec<(Cell, NodeId)>,
}

impl MctsNode {
    /// Create a new root node.
    pub fn new_root() -> Self {
        Self::new(NodeId::NONE, None)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: Cell) -> Self {
        Self::new(parent, Some(action))
    }

    fn new(parent: NodeId, action: Option<Cell>) -> Self {
        Self {
            parent,
            action,
            visits: 0,
            reward: 0.0,
            rave_visits: 0,
            rave_reward: 0.0,
            children: Vec::new(),
        }
    }

    /// Selection value blending direct and RAVE statistics.
    ///
    /// An unvisited node is worth +inf while exploring (so every child is
    /// tried once) and 0 otherwise. Once visited,
    /// `alpha = max(0, (crit - N) / crit)` weights the RAVE average against
    /// the direct average; RAVE dominates early and fades out by `N = crit`.
    /// A node with no RAVE credit contributes nothing through that term.
    pub fn value(&self, explore: f64, crit: f64) -> f64 {
        if self.visits == 0 {
            return if explore == 0.0 { 0.0 } else { f64::INFINITY };
        }

        let n = self.visits as f64;
        let alpha = ((crit - n) / crit).max(0.0);
        let direct = self.reward * (1.0 - alpha) / n;
        let rave = if self.rave_visits == 0 {
            0.0
        } else {
            self.rave_reward * alpha / self.rave_visits as f64
        };
        direct + rave
    }

    /// Mean reward Q / N, or 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f64
        }
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Child reached by playing `action`, if it exists.
    pub fn child(&self, action: Cell) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(mv, _)| *mv == action)
            .map(|(_, id)| *id)
    }
}
