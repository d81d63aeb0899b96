//! Tree: the execution entry point.
//!
//! A [`Tree`] owns a root node and the [`Blackboard`] its nodes share. The
//! hosting game loop (or an [`Agent`](crate::Agent)) calls
//! [`Tree::execute`] once per tick.

use std::fmt::Write as _;

use crate::{Behavior, Blackboard, Status, TreeConfig};

/// A root node plus the blackboard shared by all of its nodes.
pub struct Tree {
    name: String,
    root: Option<Box<dyn Behavior>>,
    blackboard: Blackboard,
    enabled: bool,
    debug: bool,
    status: Status,
}

impl Tree {
    /// Creates an enabled tree over an empty blackboard.
    pub fn new(root: Option<Box<dyn Behavior>>) -> Self {
        Self::with_config(root, Blackboard::new(), TreeConfig::default())
    }

    /// Creates an enabled tree over a caller-supplied blackboard.
    pub fn with_blackboard(root: Option<Box<dyn Behavior>>, blackboard: Blackboard) -> Self {
        Self::with_config(root, blackboard, TreeConfig::default())
    }

    /// Creates a tree with the flags from `config`.
    pub fn with_config(
        root: Option<Box<dyn Behavior>>,
        blackboard: Blackboard,
        config: TreeConfig,
    ) -> Self {
        let mut tree = Self {
            name: config.name,
            root,
            blackboard,
            enabled: config.enabled,
            debug: false,
            status: Status::Invalid,
        };
        tree.set_debug(config.debug);
        tree
    }

    /// Evaluates the tree once.
    ///
    /// A disabled or rootless tree returns `Failure` without touching any
    /// state.
    pub fn execute(&mut self) -> Status {
        if !self.enabled {
            return Status::Failure;
        }
        let Some(root) = self.root.as_mut() else {
            return Status::Failure;
        };

        let status = root.evaluate(&mut self.blackboard);
        self.status = status;
        if self.debug {
            tracing::debug!("[{}] execute -> {}", self.name, status);
        }
        status
    }

    /// Rewinds every cursor and counter to its freshly built state.
    ///
    /// The blackboard is left untouched so cross-run facts survive.
    pub fn reset(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.reset();
        }
        self.status = Status::Invalid;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outcome of the most recent `execute()` since the last reset.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Toggles debug output for the tree and every node in it.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
        if let Some(root) = self.root.as_mut() {
            root.set_debug(debug);
        }
    }

    pub fn root(&self) -> Option<&dyn Behavior> {
        self.root.as_deref()
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    /// Renders an indented outline of the tree with each node's last status.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root.as_deref() {
            describe_node(root, 0, &mut out);
        }
        out
    }
}

fn describe_node(node: &dyn Behavior, depth: usize, out: &mut String) {
    let _ = writeln!(
        out,
        "{:indent$}{} ({}) {}",
        "",
        node.name(),
        node.kind(),
        node.status(),
        indent = depth * 2
    );
    for child in node.children() {
        describe_node(child.as_ref(), depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Condition, Sequence};

    fn counting_root() -> Box<dyn Behavior> {
        Box::new(Sequence::new(
            "root",
            vec![
                Box::new(Action::new("count", |bb| {
                    let n = bb.get("count", 0_u32);
                    bb.set("count", n + 1);
                    Status::Success
                })),
                Box::new(Action::new("wait", |_| Status::Running)),
            ],
        ))
    }

    #[test]
    fn rootless_tree_fails() {
        let mut tree = Tree::new(None);
        assert_eq!(tree.execute(), Status::Failure);
        tree.reset();
        assert_eq!(tree.describe(), "");
    }

    #[test]
    fn disabled_tree_fails_without_side_effects() {
        let mut tree = Tree::new(Some(counting_root()));
        tree.set_enabled(false);

        assert_eq!(tree.execute(), Status::Failure);
        assert!(!tree.blackboard().has("count"));
        assert_eq!(tree.status(), Status::Invalid);

        tree.set_enabled(true);
        assert_eq!(tree.execute(), Status::Running);
        assert_eq!(tree.blackboard().get("count", 0_u32), 1);
    }

    #[test]
    fn reset_keeps_blackboard() {
        let mut tree = Tree::new(Some(counting_root()));
        tree.blackboard_mut().set("lastKnownTarget", (4_i32, 2_i32));

        assert_eq!(tree.execute(), Status::Running);
        // Resumes at "wait" without counting again
        assert_eq!(tree.execute(), Status::Running);
        assert_eq!(tree.blackboard().get("count", 0_u32), 1);

        tree.reset();
        assert_eq!(tree.status(), Status::Invalid);
        assert_eq!(tree.blackboard().get("lastKnownTarget", (0, 0)), (4, 2));

        // Fresh run starts at the first child again
        assert_eq!(tree.execute(), Status::Running);
        assert_eq!(tree.blackboard().get("count", 0_u32), 2);
    }

    #[test]
    fn with_blackboard_keeps_supplied_facts() {
        let mut bb = Blackboard::new();
        bb.set("ready", true);
        let root: Box<dyn Behavior> =
            Box::new(Condition::new("ready", |bb| bb.get("ready", false)));

        let mut tree = Tree::with_blackboard(Some(root), bb);
        assert!(tree.is_enabled());
        assert_eq!(tree.execute(), Status::Success);

        tree.blackboard_mut().set("ready", false);
        assert_eq!(tree.execute(), Status::Failure);
    }

    #[test]
    fn set_debug_reaches_every_node() {
        let mut tree = Tree::new(Some(counting_root()));
        tree.set_debug(true);

        let root = tree.root().expect("root");
        assert!(root.state().debug());
        assert!(root.children().iter().all(|c| c.state().debug()));
    }

    #[test]
    fn describe_lists_nodes_with_status() {
        let root: Box<dyn Behavior> = Box::new(Sequence::new(
            "root",
            vec![Box::new(Condition::new("ready", |_| true))],
        ));
        let mut tree = Tree::new(Some(root));
        tree.execute();

        assert_eq!(
            tree.describe(),
            "root (composite) success\n  ready (leaf) success\n"
        );
    }
}
