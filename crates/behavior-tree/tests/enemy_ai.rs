//! End-to-end scenarios driving built trees tick by tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use behavior_tree::{Agent, Builder, Status, Tree, TreeConfig};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Selector("root") -> [Condition("seesEnemy"), Sequence("chase") -> Action("moveTo")]
fn sentry_tree(move_calls: Arc<AtomicUsize>) -> Tree {
    Builder::new()
        .selector("root")
        .condition("seesEnemy", |bb| bb.get("seesEnemy", false))
        .sequence("chase")
        .action("moveTo", move |bb| {
            move_calls.fetch_add(1, Ordering::SeqCst);
            bb.set("moving", true);
            Status::Running
        })
        .end()
        .end()
        .build_with(TreeConfig {
            name: "sentry".into(),
            enabled: true,
            debug: true,
        })
}

#[test]
fn condition_failure_falls_through_to_chase() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut tree = sentry_tree(calls.clone());
    tree.blackboard_mut().set("seesEnemy", false);

    assert_eq!(tree.execute(), Status::Running);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(tree.blackboard().get("moving", false));
}

#[test]
fn condition_success_short_circuits_chase() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut tree = sentry_tree(calls.clone());
    tree.blackboard_mut().set("seesEnemy", true);

    assert_eq!(tree.execute(), Status::Success);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let chase = &tree.root().expect("root").children()[1];
    assert_eq!(chase.name(), "chase");
    assert_eq!(chase.status(), Status::Invalid);
}

#[test]
fn running_chase_is_resumed_not_restarted() {
    init_tracing();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut tree = sentry_tree(calls.clone());

    assert_eq!(tree.execute(), Status::Running);
    // The selector resumes inside `chase`, skipping the condition even
    // though it would now succeed
    tree.blackboard_mut().set("seesEnemy", true);
    assert_eq!(tree.execute(), Status::Running);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // Reset abandons the running branch; the condition is checked again
    tree.reset();
    assert_eq!(tree.execute(), Status::Success);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(tree.blackboard().get("moving", false));
}

#[test]
fn patrol_repeats_waypoints_until_enemy_seen() {
    init_tracing();
    let tree = Builder::new()
        .selector("root")
        .sequence("engage")
        .condition("seesEnemy", |bb| bb.get("seesEnemy", false))
        .action("attack", |bb| {
            let hits = bb.get("hits", 0_u32);
            bb.set("hits", hits + 1);
            Status::Success
        })
        .end()
        .repeat("patrol", 3)
        .action("nextWaypoint", |bb| {
            let waypoint = bb.get("waypoint", 0_u32);
            bb.set("waypoint", (waypoint + 1) % 4);
            Status::Success
        })
        .end()
        .end()
        .build();

    let mut agent = Agent::new(tree).with_reset_on_completion(true);

    assert_eq!(agent.tick(), Status::Running);
    assert_eq!(agent.tick(), Status::Running);
    assert_eq!(agent.tick(), Status::Success);
    assert_eq!(agent.tree().blackboard().get("waypoint", 0_u32), 3);

    agent.tree_mut().blackboard_mut().set("seesEnemy", true);
    assert_eq!(agent.tick(), Status::Success);
    assert_eq!(agent.tree().blackboard().get("hits", 0_u32), 1);
    assert_eq!(agent.tree().blackboard().get("waypoint", 0_u32), 3);
    assert_eq!(agent.ticks(), 4);
}

#[test]
fn parallel_guard_aborts_on_first_failure() {
    init_tracing();
    let mut tree = Builder::new()
        .parallel("guarded", 2, 1)
        .action("channel", |_| Status::Running)
        .condition("alive", |bb| bb.get("hp", 0_i32) > 0)
        .action("done", |_| Status::Success)
        .end()
        .build();

    tree.blackboard_mut().set("hp", 5_i32);
    assert_eq!(tree.execute(), Status::Success);

    tree.blackboard_mut().set("hp", 0_i32);
    assert_eq!(tree.execute(), Status::Failure);
}

#[test]
fn retry_until_target_reached() {
    init_tracing();
    let mut tree = Builder::new()
        .until_success("retry")
        .sequence("attempt")
        .action("roll", |bb| {
            let tries = bb.get("tries", 0_u32) + 1;
            bb.set("tries", tries);
            Status::Success
        })
        .condition("lucky", |bb| bb.get("tries", 0_u32) >= 3)
        .end()
        .end()
        .build();

    assert_eq!(tree.execute(), Status::Running);
    assert_eq!(tree.execute(), Status::Running);
    assert_eq!(tree.execute(), Status::Success);
    assert_eq!(tree.blackboard().get("tries", 0_u32), 3);
}

#[test]
fn inverter_over_conditions() {
    let mut negated_true = Builder::new()
        .inverter("not")
        .condition("yes", |_| true)
        .end()
        .build();
    let mut negated_false = Builder::new()
        .inverter("not")
        .condition("no", |_| false)
        .end()
        .build();

    assert_eq!(negated_true.execute(), Status::Failure);
    assert_eq!(negated_false.execute(), Status::Success);
}

#[test]
fn reset_matches_freshly_built_tree() {
    fn build() -> Tree {
        Builder::new()
            .sequence("root")
            .action("a", |_| Status::Success)
            .repeat("twice", 2)
            .action("b", |_| Status::Success)
            .end()
            .end()
            .build()
    }

    let fresh = build();
    let mut used = build();
    used.blackboard_mut().set("memory", "kept");
    assert_eq!(used.execute(), Status::Running);

    used.reset();
    assert_eq!(used.describe(), fresh.describe());
    assert_eq!(used.blackboard().get("memory", ""), "kept");

    // Resetting twice is harmless
    used.reset();
    assert_eq!(used.execute(), Status::Running);
    assert_eq!(used.execute(), Status::Success);
}
