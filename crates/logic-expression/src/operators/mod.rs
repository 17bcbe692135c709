//! Operation implementations, grouped by category.
//!
//! Each function receives the already normalized operands of its operation and
//! reduces sub-expressions through [`crate::evaluate::reduce`], so the active
//! tracer sees every node.

pub(crate) mod branching;
pub(crate) mod logical;
pub(crate) mod scope;
pub(crate) mod string;
