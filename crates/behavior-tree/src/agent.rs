//! Per-tick driver for a behavior tree.
//!
//! The tree itself never decides when it runs. An [`Agent`] is the thin
//! wrapper the hosting loop calls once per tick; it counts ticks and can
//! restart the tree after each completed run.

use crate::{Status, Tree};

/// Drives one [`Tree`] once per tick on behalf of the hosting loop.
pub struct Agent {
    tree: Tree,
    ticks: u64,
    reset_on_completion: bool,
}

impl Agent {
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            ticks: 0,
            reset_on_completion: false,
        }
    }

    /// When set, the tree is reset after every `Success` or `Failure` so the
    /// next tick starts a fresh run.
    pub fn with_reset_on_completion(mut self, reset: bool) -> Self {
        self.reset_on_completion = reset;
        self
    }

    /// Executes the tree once.
    pub fn tick(&mut self) -> Status {
        self.ticks += 1;
        let status = self.tree.execute();
        tracing::trace!("[{}] tick {} -> {}", self.tree.name(), self.ticks, status);

        if self.reset_on_completion && status.is_completed() {
            self.tree.reset();
        }
        status
    }

    /// Abandons any in-progress `Running` branch.
    pub fn abort(&mut self) {
        tracing::debug!("[{}] aborted after {} ticks", self.tree.name(), self.ticks);
        self.tree.reset();
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Builder;

    fn two_step_tree() -> Tree {
        Builder::new()
            .sequence("root")
            .action("step", |bb| {
                let n = bb.get("steps", 0_u32) + 1;
                bb.set("steps", n);
                if n % 2 == 1 { Status::Running } else { Status::Success }
            })
            .action("after", |bb| {
                let n = bb.get("after", 0_u32) + 1;
                bb.set("after", n);
                Status::Success
            })
            .end()
            .build()
    }

    #[test]
    fn counts_ticks() {
        let mut agent = Agent::new(two_step_tree());
        assert_eq!(agent.tick(), Status::Running);
        assert_eq!(agent.tick(), Status::Success);
        assert_eq!(agent.ticks(), 2);
        assert_eq!(agent.tree().blackboard().get("after", 0_u32), 1);
    }

    #[test]
    fn reset_on_completion_clears_status() {
        let mut agent = Agent::new(two_step_tree()).with_reset_on_completion(true);
        agent.tick();
        assert_eq!(agent.tick(), Status::Success);
        assert_eq!(agent.tree().status(), Status::Invalid);
    }

    #[test]
    fn abort_restarts_running_branch() {
        let mut tree = Builder::new()
            .sequence("root")
            .action("first", |bb| {
                let n = bb.get("first", 0_u32) + 1;
                bb.set("first", n);
                Status::Success
            })
            .action("wait", |_| Status::Running)
            .end()
            .build();
        tree.blackboard_mut().set("target", 7_u8);

        let mut agent = Agent::new(tree);
        agent.tick();
        agent.tick();
        assert_eq!(agent.tree().blackboard().get("first", 0_u32), 1);

        agent.abort();
        agent.tick();
        assert_eq!(agent.tree().blackboard().get("first", 0_u32), 2);
        assert_eq!(agent.into_tree().blackboard().get("target", 0_u8), 7);
    }
}
