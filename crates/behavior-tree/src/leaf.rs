//! Leaf behavior nodes.
//!
//! Leaves wrap logic supplied by the integrating game code: [`Condition`]
//! checks a predicate, [`Action`] performs work that may span several ticks.

use crate::{Behavior, Blackboard, NodeKind, NodeState, Status};

type Predicate = Box<dyn Fn(&Blackboard) -> bool + Send + Sync>;
type Task = Box<dyn FnMut(&mut Blackboard) -> Status + Send + Sync>;

/// Maps a boolean predicate over the blackboard to `Success` / `Failure`.
///
/// Never returns `Running` and keeps no state between ticks.
pub struct Condition {
    state: NodeState,
    predicate: Predicate,
}

impl Condition {
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Blackboard) -> bool + Send + Sync + 'static,
    {
        Self {
            state: NodeState::new(name),
            predicate: Box::new(predicate),
        }
    }
}

impl Behavior for Condition {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Leaf
    }

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        if (self.predicate)(bb) {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

/// Runs a closure and returns its status verbatim.
///
/// Multi-tick work is expressed by returning `Running` until done.
pub struct Action {
    state: NodeState,
    task: Task,
}

impl Action {
    pub fn new<F>(name: impl Into<String>, task: F) -> Self
    where
        F: FnMut(&mut Blackboard) -> Status + Send + Sync + 'static,
    {
        Self {
            state: NodeState::new(name),
            task: Box::new(task),
        }
    }
}

impl Behavior for Action {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Leaf
    }

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        (self.task)(bb)
    }
}
