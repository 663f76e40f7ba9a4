//! Route handlers, grouped by resource.

pub mod tasks;
pub mod xml;
