//! Branch-and-Bound search over a MILP's continuous relaxation (§4.8-4.9).
//!
//! [`arena::Arena`] is the shared, pre-sized tableau storage; [`node::Node`]
//! is a cheap cursor/replay descriptor into it; [`stack::Stack`] is the
//! depth-first frontier; [`driver`] ties them together into the search loop.

pub mod arena;
pub mod driver;
pub mod node;
pub mod stack;
