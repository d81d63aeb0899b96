//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or
//! execution. A decorator without a child always returns `Failure`.
//!
//! - [`Inverter`] (NOT logic)
//! - [`AlwaysSucceed`] (failure suppression)
//! - [`Repeat`] (run the child N times, or forever)
//! - [`UntilSuccess`] / [`UntilFailure`] (retry until an outcome)

use crate::{Behavior, Blackboard, NodeKind, NodeState, Status};

/// Shared plumbing for single-child nodes.
macro_rules! decorator_plumbing {
    () => {
        fn state(&self) -> &NodeState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut NodeState {
            &mut self.state
        }

        fn kind(&self) -> NodeKind {
            NodeKind::Decorator
        }

        fn children(&self) -> &[Box<dyn Behavior>] {
            self.child.as_slice()
        }

        fn children_mut(&mut self) -> &mut [Box<dyn Behavior>] {
            self.child.as_mut_slice()
        }

        fn attach(&mut self, child: Box<dyn Behavior>) {
            if let Some(previous) = self.child.replace(child) {
                tracing::warn!(
                    "[{}] decorator already had child `{}`; replacing it",
                    self.state.name(),
                    previous.name()
                );
            }
        }
    };
}

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - `Running` passes through unchanged
pub struct Inverter {
    state: NodeState,
    child: Option<Box<dyn Behavior>>,
}

impl Inverter {
    pub fn new(name: impl Into<String>, child: Option<Box<dyn Behavior>>) -> Self {
        Self {
            state: NodeState::new(name),
            child,
        }
    }
}

impl Behavior for Inverter {
    decorator_plumbing!();

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        match self.child.as_mut() {
            Some(child) => child.evaluate(bb).invert(),
            None => Status::Failure,
        }
    }
}

/// Returns `Success` once its child completes, regardless of the outcome.
///
/// Useful for optional behaviors that shouldn't cause a sequence to fail.
/// `Running` passes through unchanged.
pub struct AlwaysSucceed {
    state: NodeState,
    child: Option<Box<dyn Behavior>>,
}

impl AlwaysSucceed {
    pub fn new(name: impl Into<String>, child: Option<Box<dyn Behavior>>) -> Self {
        Self {
            state: NodeState::new(name),
            child,
        }
    }
}

impl Behavior for AlwaysSucceed {
    decorator_plumbing!();

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        match self.child.as_mut().map(|child| child.evaluate(bb)) {
            Some(Status::Running) => Status::Running,
            Some(_) => Status::Success,
            None => Status::Failure,
        }
    }
}

/// Runs its child for a fixed number of completed cycles, or forever.
///
/// # Semantics
///
/// The child is evaluated once per tick:
/// - `Running` passes through
/// - On completion (either outcome) the cycle counter advances and the child
///   is reset for its next cycle; the repeat itself reports `Running`
/// - After the final cycle the counter resets and the repeat returns `Success`
///
/// `Repeat::times(3)` therefore needs exactly three ticks over a child that
/// completes immediately. A count of zero behaves like one.
pub struct Repeat {
    state: NodeState,
    child: Option<Box<dyn Behavior>>,
    count: Option<u32>,
    completed: u32,
}

impl Repeat {
    /// Creates a repeat that finishes after `count` completed child cycles.
    pub fn times(name: impl Into<String>, count: u32, child: Option<Box<dyn Behavior>>) -> Self {
        Self::with_count(name, Some(count), child)
    }

    /// Creates a repeat that never finishes on its own.
    pub fn forever(name: impl Into<String>, child: Option<Box<dyn Behavior>>) -> Self {
        Self::with_count(name, None, child)
    }

    fn with_count(
        name: impl Into<String>,
        count: Option<u32>,
        child: Option<Box<dyn Behavior>>,
    ) -> Self {
        Self {
            state: NodeState::new(name),
            child,
            count,
            completed: 0,
        }
    }

    /// Completed child cycles in the current run.
    pub fn completed(&self) -> u32 {
        self.completed
    }
}

impl Behavior for Repeat {
    decorator_plumbing!();

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        let Some(child) = self.child.as_mut() else {
            return Status::Failure;
        };

        if child.evaluate(bb) == Status::Running {
            return Status::Running;
        }
        child.reset();

        let Some(count) = self.count else {
            return Status::Running;
        };

        self.completed += 1;
        self.state
            .log(format_args!("cycle {}/{}", self.completed, count));

        if self.completed >= count {
            self.completed = 0;
            Status::Success
        } else {
            Status::Running
        }
    }

    fn reset_state(&mut self) {
        self.completed = 0;
    }
}

/// Retries its child until it succeeds.
///
/// `Failure` resets the child and reports `Running` so the next tick retries.
pub struct UntilSuccess {
    state: NodeState,
    child: Option<Box<dyn Behavior>>,
}

impl UntilSuccess {
    pub fn new(name: impl Into<String>, child: Option<Box<dyn Behavior>>) -> Self {
        Self {
            state: NodeState::new(name),
            child,
        }
    }
}

impl Behavior for UntilSuccess {
    decorator_plumbing!();

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        retry_until(self.child.as_mut(), bb, Status::Success)
    }
}

/// Retries its child until it fails.
///
/// `Success` resets the child and reports `Running` so the next tick retries.
pub struct UntilFailure {
    state: NodeState,
    child: Option<Box<dyn Behavior>>,
}

impl UntilFailure {
    pub fn new(name: impl Into<String>, child: Option<Box<dyn Behavior>>) -> Self {
        Self {
            state: NodeState::new(name),
            child,
        }
    }
}

impl Behavior for UntilFailure {
    decorator_plumbing!();

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        retry_until(self.child.as_mut(), bb, Status::Failure)
    }
}

fn retry_until(
    child: Option<&mut Box<dyn Behavior>>,
    bb: &mut Blackboard,
    target: Status,
) -> Status {
    let Some(child) = child else {
        return Status::Failure;
    };

    match child.evaluate(bb) {
        status if status == target => target,
        Status::Running => Status::Running,
        _ => {
            child.reset();
            Status::Running
        }
    }
}
