//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. Every node carries a
//! [`NodeState`] (name, last status, debug flag) and exposes its children
//! through a uniform accessor, so recursive operations such as reset or
//! debug propagation never need to inspect concrete node types.

use std::fmt;

use crate::{Blackboard, Status};

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// Orchestrates an ordered list of children.
    Composite,
    /// Wraps at most one child.
    Decorator,
    /// Terminal node wrapping caller-supplied logic.
    Leaf,
}

/// Identity and bookkeeping shared by every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeState {
    name: String,
    status: Status,
    debug: bool,
}

impl NodeState {
    /// Creates the state of a not-yet-evaluated node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Invalid,
            debug: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Emits `[name] message` at DEBUG level when this node's debug flag is set.
    pub fn log(&self, message: fmt::Arguments<'_>) {
        if self.debug {
            tracing::debug!("[{}] {}", self.name, message);
        }
    }
}

/// A behavior tree node that can be evaluated against a blackboard.
pub trait Behavior: Send + Sync {
    /// Name, last status and debug flag of this node.
    fn state(&self) -> &NodeState;

    /// Mutable access to this node's [`NodeState`].
    fn state_mut(&mut self) -> &mut NodeState;

    /// Structural role of this node.
    fn kind(&self) -> NodeKind;

    /// Node-specific evaluation.
    ///
    /// Callers should go through [`Behavior::evaluate`], which also records
    /// the resulting status.
    ///
    /// # Arguments
    ///
    /// * `bb` - The tree's blackboard. Nodes may read and modify it, and may
    ///   update their own persisted cursor or counter.
    fn tick(&mut self, bb: &mut Blackboard) -> Status;

    /// Clears type-specific persisted state (cursors, counters).
    ///
    /// Children are handled by [`Behavior::reset`].
    fn reset_state(&mut self) {}

    /// Direct children: empty for leaves, at most one for decorators.
    fn children(&self) -> &[Box<dyn Behavior>] {
        &[]
    }

    /// Mutable access to the direct children.
    fn children_mut(&mut self) -> &mut [Box<dyn Behavior>] {
        &mut []
    }

    /// Attaches `child` below this node. Leaves have nowhere to put it.
    fn attach(&mut self, child: Box<dyn Behavior>) {
        tracing::warn!(
            "[{}] leaf node cannot take child `{}`; discarding it",
            self.name(),
            child.name()
        );
    }

    /// Name given at construction.
    fn name(&self) -> &str {
        self.state().name()
    }

    /// Outcome of the last evaluation, `Invalid` after a reset.
    fn status(&self) -> Status {
        self.state().status()
    }

    /// Evaluates this node once and records the outcome.
    fn evaluate(&mut self, bb: &mut Blackboard) -> Status {
        let status = self.tick(bb);
        let state = self.state_mut();
        state.status = status;
        state.log(format_args!("-> {status}"));
        status
    }

    /// Returns this node and all descendants to their freshly built state.
    ///
    /// Idempotent; the blackboard is never touched.
    fn reset(&mut self) {
        self.reset_state();
        self.state_mut().status = Status::Invalid;
        for child in self.children_mut() {
            child.reset();
        }
    }

    /// Sets the debug flag on this node and all descendants.
    fn set_debug(&mut self, debug: bool) {
        self.state_mut().debug = debug;
        for child in self.children_mut() {
            child.set_debug(debug);
        }
    }
}
