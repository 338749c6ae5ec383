//! Plan builder: how a container divides its main axis among children.
//!
//! Callers build a [`Plan`] up front and attach it when opening a row or
//! column; each rectangle request then consumes the next [`SizeToken`].

mod core;

pub use core::{PLAN_MAX, Plan, PlanTotals, SizeToken};
