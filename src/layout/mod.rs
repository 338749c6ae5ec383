//! Container stack and rectangle allocation.
//!
//! [`LayoutContext`] owns the stack of open rows and columns; the allocation
//! math for a single container lives in the private `core` module.

mod context;
mod core;

pub use context::{LayoutContext, Scope};
pub use core::{Align, Container, Direction, FILL};
