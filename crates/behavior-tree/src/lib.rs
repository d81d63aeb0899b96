//! Tick-driven behavior tree engine.
//!
//! This library composes hierarchical decision logic that is re-evaluated
//! once per simulation tick without blocking.
//!
//! - **Running state**: Long actions report `Running`; composites persist a
//!   cursor so the next tick resumes exactly where the last one stopped
//! - **Shared blackboard**: Every node of a tree reads and writes one
//!   type-erased key/value store
//! - **External scheduling**: The hosting loop (or an [`Agent`]) decides when
//!   a tick happens; nodes never block
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure, Running or Invalid
//! - Leaf nodes: [`Condition`], [`Action`]
//! - Composite nodes: [`Sequence`], [`Selector`], [`Parallel`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`], [`Repeat`],
//!   [`UntilSuccess`], [`UntilFailure`]
//! - [`Tree`]: Root node plus [`Blackboard`]; the execution entry point
//! - [`Builder`]: Fluent assembler producing a [`Tree`]

pub mod agent;
pub mod behavior;
pub mod blackboard;
pub mod builder;
pub mod composite;
pub mod config;
pub mod decorator;
pub mod error;
pub mod leaf;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use agent::Agent;
pub use behavior::{Behavior, NodeKind, NodeState};
pub use blackboard::Blackboard;
pub use builder::Builder;
pub use composite::{Parallel, Selector, Sequence};
pub use config::TreeConfig;
pub use decorator::{AlwaysSucceed, Inverter, Repeat, UntilFailure, UntilSuccess};
pub use error::BlackboardError;
pub use leaf::{Action, Condition};
pub use status::Status;
pub use tree::Tree;
