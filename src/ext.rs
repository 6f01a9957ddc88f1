//! Public extension contracts for downstream crates that bring their own HTTP stack.
//!
//! The crate intentionally exposes the header-attachment seam as a trait so services with
//! an established HTTP client can still mint and carry fresh authorization headers without
//! adopting the bundled transport.

pub mod attach;

pub use attach::*;
