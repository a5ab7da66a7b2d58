//! Errors reported by diagram construction and the sweep algorithms.

use thiserror::Error;

use crate::reference::Ptr;
use crate::types::{Label, Uid};

/// Errors emitted by this crate.
///
/// Every error aborts the whole operation: no algorithm returns partial output.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// A child is not strictly below its parent.
    #[error("node {uid} at {label} has a child at {child_label}, which is not below it")]
    LevelOrder { uid: Uid, label: Label, child_label: Label },
    /// A child slot names a node that is absent, or caches the wrong label.
    #[error("node {uid} points to {target}, which is not a node of the diagram")]
    DanglingChild { uid: Uid, target: Ptr },
    /// A node carries a sink identity or the sink label.
    #[error("node {uid} at {label} uses an identity reserved for sinks")]
    ReservedIdentity { uid: Uid, label: Label },
    /// Two nodes share one identity.
    #[error("duplicate node identity {uid}")]
    DuplicateUid { uid: Uid },
    /// A node cannot be reached from the root.
    #[error("node {uid} is not reachable from the root")]
    UnreachableNode { uid: Uid },
    /// The root is missing or is not the unique top-most node.
    #[error("root {root} is not the top-most node of the diagram")]
    BadRoot { root: Ptr },
    /// The same label appears twice in an assignment list.
    #[error("label {label} is assigned more than once")]
    DuplicateAssignment { label: Label },
    /// The operator is undefined on a pair of sinks.
    #[error("operator is undefined for ({left}, {right})")]
    PartialOperator { left: bool, right: bool },
    /// Evaluation reached a label not covered by the assignment.
    #[error("assignment of length {len} does not cover {label}")]
    MissingAssignment { label: Label, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
