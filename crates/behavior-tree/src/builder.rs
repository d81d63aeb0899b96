//! Fluent, stack-based construction of behavior trees.
//!
//! Instead of nesting `Box::new(Sequence::new(.., vec![...]))` by hand, the
//! [`Builder`] keeps track of the currently open composite or decorator and
//! attaches new nodes to it:
//!
//! ```rust
//! use behavior_tree::{Builder, Status};
//!
//! let mut tree = Builder::new()
//!     .selector("root")
//!         .condition("seesEnemy", |bb| bb.get("seesEnemy", false))
//!         .sequence("chase")
//!             .action("moveTo", |_| Status::Running)
//!         .end()
//!     .end()
//!     .build();
//!
//! assert_eq!(tree.execute(), Status::Running);
//! ```
//!
//! Nodes live in an arena while the tree is being described; the open scopes
//! are a stack of arena indices. [`Builder::build`] assembles the owned node
//! graph in one pass. Misuse (an unmatched `end()`, scopes left open, nodes
//! with nowhere to go) is logged and absorbed rather than reported as an error.

use crate::{
    Action, AlwaysSucceed, Behavior, Blackboard, Condition, Inverter, Parallel, Repeat, Selector,
    Sequence, Status, Tree, TreeConfig, UntilFailure, UntilSuccess,
};

struct Slot {
    node: Box<dyn Behavior>,
    children: Vec<usize>,
}

/// Assembles a [`Tree`] through chained calls.
#[derive(Default)]
pub struct Builder {
    slots: Vec<Slot>,
    root: Option<usize>,
    stack: Vec<usize>,
    current: Option<usize>,
    blackboard: Option<Blackboard>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `blackboard` instead of an empty one for the built tree.
    pub fn blackboard(mut self, blackboard: Blackboard) -> Self {
        self.blackboard = Some(blackboard);
        self
    }

    /// Opens a [`Sequence`] scope.
    pub fn sequence(self, name: impl Into<String>) -> Self {
        self.open(Box::new(Sequence::new(name, Vec::new())))
    }

    /// Opens a [`Selector`] scope.
    pub fn selector(self, name: impl Into<String>) -> Self {
        self.open(Box::new(Selector::new(name, Vec::new())))
    }

    /// Opens a [`Parallel`] scope. A non-positive `success_policy` requires
    /// every child to succeed.
    pub fn parallel(self, name: impl Into<String>, success_policy: i32, failure_policy: i32) -> Self {
        self.open(Box::new(Parallel::new(
            name,
            success_policy,
            failure_policy,
            Vec::new(),
        )))
    }

    /// Opens an [`Inverter`] scope.
    pub fn inverter(self, name: impl Into<String>) -> Self {
        self.open(Box::new(Inverter::new(name, None)))
    }

    /// Opens an [`AlwaysSucceed`] scope.
    pub fn always_succeed(self, name: impl Into<String>) -> Self {
        self.open(Box::new(AlwaysSucceed::new(name, None)))
    }

    /// Opens a [`Repeat`] scope that completes after `count` child cycles.
    pub fn repeat(self, name: impl Into<String>, count: u32) -> Self {
        self.open(Box::new(Repeat::times(name, count, None)))
    }

    /// Opens a [`Repeat`] scope that never completes.
    pub fn repeat_forever(self, name: impl Into<String>) -> Self {
        self.open(Box::new(Repeat::forever(name, None)))
    }

    /// Opens an [`UntilSuccess`] scope.
    pub fn until_success(self, name: impl Into<String>) -> Self {
        self.open(Box::new(UntilSuccess::new(name, None)))
    }

    /// Opens an [`UntilFailure`] scope.
    pub fn until_failure(self, name: impl Into<String>) -> Self {
        self.open(Box::new(UntilFailure::new(name, None)))
    }

    /// Adds a [`Condition`] leaf to the open scope.
    pub fn condition<F>(self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Blackboard) -> bool + Send + Sync + 'static,
    {
        self.leaf(Box::new(Condition::new(name, predicate)))
    }

    /// Adds an [`Action`] leaf to the open scope.
    pub fn action<F>(self, name: impl Into<String>, task: F) -> Self
    where
        F: FnMut(&mut Blackboard) -> Status + Send + Sync + 'static,
    {
        self.leaf(Box::new(Action::new(name, task)))
    }

    /// Adds a prebuilt node (e.g., a shared subtree) without opening a scope.
    pub fn subtree(self, node: Box<dyn Behavior>) -> Self {
        self.leaf(node)
    }

    /// Closes the most recently opened scope.
    pub fn end(mut self) -> Self {
        if self.current.is_none() && self.stack.is_empty() {
            tracing::warn!("end() called with no open scope; ignoring");
        }
        self.current = self.stack.pop();
        self
    }

    /// Number of scopes still open.
    pub fn depth(&self) -> usize {
        self.stack.len() + usize::from(self.current.is_some())
    }

    /// Assembles the tree with default configuration.
    pub fn build(self) -> Tree {
        self.build_with(TreeConfig::default())
    }

    /// Assembles the tree, applying `config`.
    ///
    /// Scopes still open are closed implicitly.
    pub fn build_with(self, config: TreeConfig) -> Tree {
        let open = self.depth();
        if open > 0 {
            tracing::warn!(
                "[{}] {} scope(s) still open at build(); closing them",
                config.name,
                open
            );
        }

        let root = self.root;
        let blackboard = self.blackboard.unwrap_or_default();

        let (mut nodes, links): (Vec<Option<Box<dyn Behavior>>>, Vec<Vec<usize>>) = self
            .slots
            .into_iter()
            .map(|slot| (Some(slot.node), slot.children))
            .unzip();

        // Children are always created after their parent, so walking the
        // arena backwards attaches complete subtrees.
        for (id, children) in links.iter().enumerate().rev() {
            for &child_id in children {
                let Some(child) = nodes[child_id].take() else {
                    continue;
                };
                if let Some(parent) = nodes[id].as_mut() {
                    parent.attach(child);
                }
            }
        }

        let root = root.and_then(|id| nodes[id].take());
        Tree::with_config(root, blackboard, config)
    }

    fn open(self, node: Box<dyn Behavior>) -> Self {
        self.insert(node, true)
    }

    fn leaf(self, node: Box<dyn Behavior>) -> Self {
        self.insert(node, false)
    }

    fn insert(mut self, node: Box<dyn Behavior>, opens_scope: bool) -> Self {
        let id = self.slots.len();
        match (self.root, self.current) {
            (None, _) => self.root = Some(id),
            (Some(_), Some(parent)) => self.slots[parent].children.push(id),
            (Some(_), None) => {
                tracing::warn!("no open scope for node `{}`; discarding it", node.name());
                return self;
            }
        }

        self.slots.push(Slot {
            node,
            children: Vec::new(),
        });

        if opens_scope
            && let Some(previous) = self.current.replace(id)
        {
            self.stack.push(previous);
        }
        self
    }
}
