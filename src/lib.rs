//! Immediate-mode row/column layout.
//!
//! Each frame the caller opens rows and columns on a [`LayoutContext`], asks
//! for one rectangle per widget, and closes the containers again. Nothing is
//! retained between frames except the defaults in [`LayoutConfig`] and the
//! last produced rectangle.
//!
//! ```
//! use cursor_layout::{FILL, LayoutContext, Plan, Rect};
//!
//! let mut ctx = LayoutContext::new();
//! ctx.config_mut().set_default_padding_all(0.0);
//! ctx.config_mut().set_default_gap(0.0);
//!
//! let plan = Plan::from_raw(&[-1.0, 100.0, -1.0])?;
//! let mut row = ctx.row(Rect::new(0.0, 0.0, 300.0, 50.0), Some(&plan))?;
//! assert_eq!(row.rect(FILL, FILL), Rect::new(0.0, 0.0, 100.0, 50.0));
//! assert_eq!(row.rect(FILL, FILL), Rect::new(100.0, 0.0, 100.0, 50.0));
//! assert_eq!(row.rect(FILL, FILL), Rect::new(200.0, 0.0, 100.0, 50.0));
//! # Ok::<(), cursor_layout::LayoutError>(())
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod plan;

pub use config::{LayoutConfig, MAX_DEPTH_LIMIT, MAX_STACK};
pub use error::{LayoutError, Result};
pub use geometry::{Padding, Rect};
pub use layout::{Align, Container, Direction, FILL, LayoutContext, Scope};
pub use logging::{
    FileSink, LogEvent, LogLevel, LogSink, Logger, LoggingError, LoggingResult, MemorySink,
};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use plan::{PLAN_MAX, Plan, PlanTotals, SizeToken};
