//! Branching undo history.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. The root
//! (node 0) carries no action; every other node holds the action that moved
//! the document from its parent's state to its own. `current` always names
//! the state the buffer is in.

use super::action::Action;
use crate::text::Buffer;

/// Index of a node in the undo arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct UndoNode {
    action: Option<Action>,
    parent: Option<NodeId>,
    branches: Vec<NodeId>,
    active_branch: Option<usize>,
    /// Set on the last node of a group: the number of actions in the group
    group_size: usize,
    /// Set on the first node of a group: the number of actions in the group
    opens_group: usize,
}

impl UndoNode {
    fn new(action: Option<Action>, parent: Option<NodeId>) -> Self {
        Self {
            action,
            parent,
            branches: Vec::new(),
            active_branch: None,
            group_size: 0,
            opens_group: 0,
        }
    }
}

/// What a redo call ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedoOutcome {
    /// No branch to descend into
    Nothing,
    /// All `n` actions of the step were replayed
    Replayed(usize),
    /// A group replay met a fork (or the end of the chain) with actions left
    Interrupted { replayed: usize, remaining: usize },
}

/// Result of advancing a [`GroupReplay`] by one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    /// Descend into this node and replay its action
    Next(NodeId),
    /// The group has been fully replayed
    Complete,
    /// The chain forks or ends before the group is exhausted
    Blocked,
}

/// Explicit state of a grouped redo: where the walk stands and how many
/// group actions still need replaying after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupReplay {
    remaining: usize,
    position: NodeId,
}

impl GroupReplay {
    pub fn new(position: NodeId, remaining: usize) -> Self {
        Self {
            remaining,
            position,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn position(&self) -> NodeId {
        self.position
    }

    /// Advance through a single-child link. A fork means the user edited
    /// after undoing, so the walk stops there.
    pub fn step(&mut self, history: &UndoManager) -> ReplayStep {
        if self.remaining == 0 {
            return ReplayStep::Complete;
        }
        match history.node(self.position).branches.as_slice() {
            [only] => {
                self.position = *only;
                self.remaining -= 1;
                ReplayStep::Next(*only)
            }
            _ => ReplayStep::Blocked,
        }
    }
}

/// Tree-shaped undo/redo history over a [`Buffer`].
///
/// Unlike a linear stack, recording a new action after an undo keeps the
/// undone path as a sibling branch that can be selected with [`branch`].
///
/// [`branch`]: UndoManager::branch
#[derive(Debug, Clone)]
pub struct UndoManager {
    nodes: Vec<UndoNode>,
    current: NodeId,
    group_depth: usize,
    group_action_count: usize,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoManager {
    pub fn new() -> Self {
        Self {
            nodes: vec![UndoNode::new(None, None)],
            current: NodeId::ROOT,
            group_depth: 0,
            group_action_count: 0,
        }
    }

    fn node(&self, id: NodeId) -> &UndoNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut UndoNode {
        &mut self.nodes[id.0]
    }

    /// The node whose state the buffer is in
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Total nodes in the tree, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The action recorded on `id` (`None` for the root)
    pub fn action(&self, id: NodeId) -> Option<&Action> {
        self.nodes.get(id.0).and_then(|node| node.action.as_ref())
    }

    /// Record an action as a new child of the current node and move to it
    pub fn add_action(&mut self, action: Action) {
        let id = NodeId(self.nodes.len());
        self.nodes.push(UndoNode::new(Some(action), Some(self.current)));

        let parent = self.node_mut(self.current);
        parent.branches.push(id);
        parent.active_branch = Some(parent.branches.len() - 1);
        self.current = id;

        if self.group_depth > 0 {
            self.group_action_count += 1;
        }
    }

    /// Start a group of actions that undo/redo as one step. Groups nest;
    /// only the outermost one counts.
    pub fn begin_group(&mut self) {
        if self.group_depth == 0 {
            self.group_action_count = 0;
        }
        self.group_depth += 1;
    }

    /// Close a group. The outermost close stamps the group's last node with
    /// its size and its first node as the group opener.
    pub fn end_group(&mut self) {
        if self.group_depth == 0 {
            return;
        }
        self.group_depth -= 1;
        if self.group_depth > 0 || self.group_action_count == 0 {
            return;
        }

        let size = std::mem::take(&mut self.group_action_count);
        let last = self.current;
        self.node_mut(last).group_size = size;

        let mut first = last;
        for _ in 1..size {
            match self.node(first).parent {
                Some(parent) if parent != NodeId::ROOT => first = parent,
                _ => break,
            }
        }
        self.node_mut(first).opens_group = size;
        tracing::trace!(size, "closed undo group");
    }

    pub fn in_group(&self) -> bool {
        self.group_depth > 0
    }

    pub fn can_undo(&self) -> bool {
        self.current != NodeId::ROOT
    }

    pub fn can_redo(&self) -> bool {
        self.active_child(self.current).is_some()
    }

    fn active_child(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        node.active_branch.and_then(|i| node.branches.get(i).copied())
    }

    /// Undo the last action, or the whole group it closes.
    /// Returns false when already at the root.
    pub fn undo(&mut self, buf: &mut Buffer) -> bool {
        if self.current == NodeId::ROOT {
            return false;
        }

        let steps = self.node(self.current).group_size.max(1);
        let mut undone = 0;
        for _ in 0..steps {
            let node = self.node(self.current);
            let Some(parent) = node.parent else {
                break;
            };
            if let Some(action) = &node.action {
                action.revert(buf);
            }
            self.current = parent;
            undone += 1;
        }

        tracing::debug!(undone, current = self.current.0, "undo");
        true
    }

    /// Redo along the active branch. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self, buf: &mut Buffer) -> bool {
        self.redo_detailed(buf) != RedoOutcome::Nothing
    }

    /// Redo along the active branch, replaying a whole group when the next
    /// node opens one.
    pub fn redo_detailed(&mut self, buf: &mut Buffer) -> RedoOutcome {
        let Some(first) = self.active_child(self.current) else {
            return RedoOutcome::Nothing;
        };
        self.replay(first, buf);

        let group = self.node(first).opens_group;
        if group <= 1 {
            tracing::debug!(current = self.current.0, "redo");
            return RedoOutcome::Replayed(1);
        }

        let mut walk = GroupReplay::new(first, group - 1);
        let mut replayed = 1;
        loop {
            match walk.step(self) {
                ReplayStep::Next(id) => {
                    self.replay(id, buf);
                    replayed += 1;
                }
                ReplayStep::Complete => {
                    tracing::debug!(replayed, current = self.current.0, "redo group");
                    return RedoOutcome::Replayed(replayed);
                }
                ReplayStep::Blocked => {
                    tracing::warn!(
                        replayed,
                        remaining = walk.remaining(),
                        "group redo stopped at a fork"
                    );
                    return RedoOutcome::Interrupted {
                        replayed,
                        remaining: walk.remaining(),
                    };
                }
            }
        }
    }

    fn replay(&mut self, id: NodeId, buf: &mut Buffer) {
        if let Some(action) = &self.node(id).action {
            action.apply(buf);
        }
        self.current = id;
    }

    /// Select which branch the next redo follows. Out-of-range is a no-op.
    pub fn branch(&mut self, index: usize) {
        let node = self.node_mut(self.current);
        if index < node.branches.len() {
            node.active_branch = Some(index);
        }
    }

    /// Number of branches below the current node
    pub fn branch_count(&self) -> usize {
        self.node(self.current).branches.len()
    }

    /// Active branch index at the current node (`None` when it has no
    /// children)
    pub fn current_branch(&self) -> Option<usize> {
        self.node(self.current).active_branch
    }
}
