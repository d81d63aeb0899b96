//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! [`Sequence`] (AND logic) and [`Selector`] (OR logic) persist a cursor so a
//! `Running` child is resumed on the next tick without re-running the
//! siblings that already completed. [`Parallel`] evaluates every child on
//! every tick and aggregates the results through thresholds.

use crate::{Behavior, Blackboard, NodeKind, NodeState, Status};

/// Executes child behaviors in order until one fails.
///
/// # Semantics
///
/// Evaluation starts at the persisted cursor:
/// - If a child returns `Failure`, the cursor resets and the sequence returns `Failure`
/// - If a child returns `Running`, the cursor stays on it and the sequence returns `Running`
/// - If a child returns `Success`, the next child is evaluated within the same tick
/// - If all children return `Success`, the cursor resets and the sequence returns `Success`
///
/// An empty sequence succeeds.
pub struct Sequence {
    state: NodeState,
    children: Vec<Box<dyn Behavior>>,
    cursor: usize,
}

impl Sequence {
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Behavior>>) -> Self {
        Self {
            state: NodeState::new(name),
            children,
            cursor: 0,
        }
    }

    /// Index of the child the next tick resumes at.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Behavior for Sequence {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Composite
    }

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        if self.cursor > 0 {
            self.state
                .log(format_args!("resuming at child {}", self.cursor));
        }

        while let Some(child) = self.children.get_mut(self.cursor) {
            match child.evaluate(bb) {
                Status::Success => self.cursor += 1,
                Status::Running => return Status::Running,
                // Failure (and a misbehaving Invalid) aborts the run
                _ => {
                    self.cursor = 0;
                    return Status::Failure;
                }
            }
        }

        self.cursor = 0;
        Status::Success
    }

    fn reset_state(&mut self) {
        self.cursor = 0;
    }

    fn children(&self) -> &[Box<dyn Behavior>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Behavior>] {
        &mut self.children
    }

    fn attach(&mut self, child: Box<dyn Behavior>) {
        self.children.push(child);
    }
}

/// Executes child behaviors in order until one succeeds.
///
/// # Semantics
///
/// The dual of [`Sequence`]:
/// - `Success` resets the cursor and short-circuits with `Success`
/// - `Running` keeps the cursor on the child and returns `Running`
/// - `Failure` advances to the next child within the same tick
/// - If all children fail, the cursor resets and the selector returns `Failure`
///
/// An empty selector fails.
pub struct Selector {
    state: NodeState,
    children: Vec<Box<dyn Behavior>>,
    cursor: usize,
}

impl Selector {
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Behavior>>) -> Self {
        Self {
            state: NodeState::new(name),
            children,
            cursor: 0,
        }
    }

    /// Index of the child the next tick resumes at.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Behavior for Selector {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Composite
    }

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        if self.cursor > 0 {
            self.state
                .log(format_args!("resuming at child {}", self.cursor));
        }

        while let Some(child) = self.children.get_mut(self.cursor) {
            match child.evaluate(bb) {
                Status::Success => {
                    self.cursor = 0;
                    return Status::Success;
                }
                Status::Running => return Status::Running,
                _ => self.cursor += 1,
            }
        }

        self.cursor = 0;
        Status::Failure
    }

    fn reset_state(&mut self) {
        self.cursor = 0;
    }

    fn children(&self) -> &[Box<dyn Behavior>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Behavior>] {
        &mut self.children
    }

    fn attach(&mut self, child: Box<dyn Behavior>) {
        self.children.push(child);
    }
}

/// Evaluates every child on every tick and aggregates the outcomes.
///
/// # Semantics
///
/// After all children have been evaluated once:
/// 1. `failures >= failure_policy` returns `Failure`
/// 2. `successes >= threshold` returns `Success`, where the threshold is
///    `success_policy` when positive and otherwise the current number of
///    children (recomputed on every tick)
/// 3. Any child still `Running` returns `Running`
/// 4. Otherwise `Failure`
///
/// "Parallel" means same-tick evaluation; nothing runs concurrently.
pub struct Parallel {
    state: NodeState,
    children: Vec<Box<dyn Behavior>>,
    success_policy: i32,
    failure_policy: i32,
}

impl Parallel {
    pub fn new(
        name: impl Into<String>,
        success_policy: i32,
        failure_policy: i32,
        children: Vec<Box<dyn Behavior>>,
    ) -> Self {
        Self {
            state: NodeState::new(name),
            children,
            success_policy,
            failure_policy,
        }
    }

    fn success_threshold(&self) -> usize {
        match usize::try_from(self.success_policy) {
            Ok(policy) if policy > 0 => policy,
            _ => self.children.len(),
        }
    }
}

impl Behavior for Parallel {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Composite
    }

    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        let (mut successes, mut failures, mut running) = (0_usize, 0_usize, 0_usize);
        for child in &mut self.children {
            match child.evaluate(bb) {
                Status::Success => successes += 1,
                Status::Failure => failures += 1,
                Status::Running => running += 1,
                Status::Invalid => {}
            }
        }

        self.state.log(format_args!(
            "{successes} succeeded, {failures} failed, {running} running"
        ));

        if failures as i64 >= i64::from(self.failure_policy) {
            Status::Failure
        } else if successes >= self.success_threshold() {
            Status::Success
        } else if running > 0 {
            Status::Running
        } else {
            Status::Failure
        }
    }

    fn children(&self) -> &[Box<dyn Behavior>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Behavior>] {
        &mut self.children
    }

    fn attach(&mut self, child: Box<dyn Behavior>) {
        self.children.push(child);
    }
}
