//! # sweep-bdd: I/O-efficient Binary Decision Diagrams
//!
//! **`sweep-bdd`** manipulates Ordered Binary Decision Diagrams (OBDDs) with
//! algorithms that never follow a pointer. Every diagram is a plain array of
//! nodes sorted by level, and every algorithm is a sequential *sweep* over
//! such arrays, driven by priority queues of pending requests. This is the
//! access pattern that keeps diagrams far larger than main memory workable.
//!
//! ## What is a BDD?
//!
//! A Binary Decision Diagram represents a boolean function as a directed
//! acyclic graph. Each internal node tests one variable and has a `low` child
//! (variable false) and a `high` child (variable true); the two sinks are the
//! constants. Variables are tested in a fixed order along every path. After
//! reduction, every boolean function has exactly one diagram.
//!
//! ## Design
//!
//! - **No shared manager**: a [`Diagram`] is an immutable value. Algorithms
//!   read their inputs and produce fresh outputs, so diagrams can be shared
//!   freely.
//! - **Pointer-free nodes**: children are [`Ptr`] values carrying the target's
//!   [`Uid`] and a cached copy of its [`Label`], so the level of a child is
//!   known without visiting it.
//! - **Validated at construction**: [`Diagram::from_nodes`] rejects malformed
//!   input, and every algorithm relies on that.
//! - **Explicit reduction**: [`apply`] and [`substitute`] return unreduced
//!   diagrams; [`reduce`] brings them to canonical form. The convenience
//!   methods ([`Diagram::and`], [`Diagram::restrict`], ...) reduce for you.
//!
//! ## Basic Usage
//!
//! ```rust
//! use sweep_bdd::{apply, eval, reduce, substitute, BoolOp, Diagram, Label};
//!
//! // 1. Create variables (0-indexed; label 0 is the top level)
//! let x0 = Diagram::var(Label::new(0));
//! let x1 = Diagram::var(Label::new(1));
//!
//! // 2. f = x0 AND (NOT x1)
//! let f = reduce(&apply(&x0, &x1, BoolOp::DIFF).unwrap());
//! assert!(f.is_reduced());
//!
//! // 3. Evaluate (x0=true, x1=false) -> true
//! assert_eq!(eval(&f, &[true, false]), Ok(true));
//!
//! // 4. Fix x0 = true, leaving NOT x1
//! let g = reduce(&substitute(&f, &[(Label::new(0), true)]).unwrap());
//! assert_eq!(g, Diagram::nvar(Label::new(1)));
//! ```
//!
//! ## Core Components
//!
//! - **[`diagram`]**, **[`node`]**, **[`reference`]**, **[`types`]**: the data model.
//! - **[`seq`]** and **[`queue`]**: the sorted-sequence and priority-queue
//!   interfaces every sweep is written against.
//! - **[`eval`]**, **[`substitute`]**, **[`reduce`]**, **[`apply`]**: the core
//!   algorithms, with [`ite`] as the three-input product.
//! - **[`sat`]**, **[`quantify`]**, **[`negate`]**, **[`builder`]**, **[`dot`]**:
//!   counting, quantification, construction and export built on top.

pub mod apply;
pub mod builder;
pub mod diagram;
pub mod dot;
pub mod error;
pub mod eval;
pub mod ite;
pub mod negate;
pub mod node;
pub mod op;
mod product;
pub mod quantify;
pub mod queue;
pub mod reduce;
pub mod reference;
pub mod sat;
pub mod seq;
pub mod substitute;
pub mod types;

pub use apply::{apply, apply_with_config, ApplyConfig};
pub use builder::Builder;
pub use diagram::Diagram;
pub use error::{Error, Result};
pub use eval::{eval, eval_sparse};
pub use ite::ite;
pub use negate::negate;
pub use node::{Branch, Node};
pub use op::{BoolOp, Operator};
pub use quantify::{exists, forall};
pub use reduce::reduce;
pub use reference::Ptr;
pub use sat::{max_sat, one_sat, path_count, sat_count};
pub use substitute::substitute;
pub use types::{Label, Uid};
