use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::config::{LayoutConfig, MAX_STACK};
use crate::error::{LayoutError, Result};
use crate::geometry::{Padding, Rect};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::{LayoutMetrics, MetricSnapshot};
use crate::plan::Plan;

use super::core::{Align, Container, Direction};

const LOG_TARGET: &str = "cursor_layout::layout";
const METRICS_TARGET: &str = "cursor_layout::metrics";

/// Caller-owned state for immediate-mode layout passes.
///
/// Holds the container stack, the layout defaults and the last produced
/// rectangle. Create one per window (or per thread) and reuse it every frame;
/// the stack allocation is kept between frames.
#[derive(Debug)]
pub struct LayoutContext {
    config: LayoutConfig,
    stack: Vec<Container>,
    last_rect: Rect,
    // Containers below this depth belong to an open `Scope`.
    scope_floor: usize,
    logger: Option<Logger>,
    metrics: LayoutMetrics,
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutContext {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            stack: Vec::with_capacity(config.max_depth.min(MAX_STACK)),
            config,
            last_rect: Rect::ZERO,
            scope_floor: 0,
            logger: None,
            metrics: LayoutMetrics::new(),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Defaults changed here apply to containers opened afterwards.
    pub fn config_mut(&mut self) -> &mut LayoutConfig {
        &mut self.config
    }

    /// Number of open containers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Innermost open container.
    pub fn current(&self) -> Option<&Container> {
        self.stack.last()
    }

    pub fn metrics(&self) -> MetricSnapshot {
        self.metrics.snapshot()
    }

    pub fn begin_row(&mut self, bounds: Rect, plan: Option<&Plan>) -> Result<()> {
        self.begin_row_ex(bounds, self.config.padding, self.config.gap, plan)
    }

    pub fn begin_column(&mut self, bounds: Rect, plan: Option<&Plan>) -> Result<()> {
        self.begin_column_ex(bounds, self.config.padding, self.config.gap, plan)
    }

    pub fn begin_row_ex(
        &mut self,
        bounds: Rect,
        padding: Padding,
        gap: f32,
        plan: Option<&Plan>,
    ) -> Result<()> {
        self.push(Container::new(bounds, Direction::Row, padding, gap, plan))
    }

    pub fn begin_column_ex(
        &mut self,
        bounds: Rect,
        padding: Padding,
        gap: f32,
        plan: Option<&Plan>,
    ) -> Result<()> {
        self.push(Container::new(bounds, Direction::Column, padding, gap, plan))
    }

    fn push(&mut self, container: Container) -> Result<()> {
        let depth = self.stack.len();
        if depth >= self.config.max_depth {
            self.metrics.record_dropped_container();
            self.log(
                LogLevel::Warn,
                "stack_overflow",
                [
                    json_kv("depth", depth),
                    json_kv("direction", format!("{:?}", container.direction())),
                ],
            );
            return Err(LayoutError::StackOverflow { depth });
        }
        self.stack.push(container);
        self.metrics.record_container(self.stack.len());
        Ok(())
    }

    /// Close the innermost container. Does nothing on an empty stack.
    /// Close the innermost container. Inside a [`Scope`] this never closes the
    /// scope's own container or anything below it.
    pub fn end(&mut self) -> Option<Container> {
        if self.scope_floor > 0 && self.stack.len() <= self.scope_floor {
            self.log_message(LogLevel::Debug, "end_past_scope");
            return None;
        }
        let popped = self.stack.pop();
        if popped.is_none() {
            self.log_message(LogLevel::Debug, "end_without_container");
        }
        popped
    }

    /// Open a row that closes itself when the returned scope is dropped.
    pub fn row(&mut self, bounds: Rect, plan: Option<&Plan>) -> Result<Scope<'_>> {
        self.begin_row(bounds, plan)?;
        Ok(Scope::new(self))
    }

    /// Open a column that closes itself when the returned scope is dropped.
    pub fn column(&mut self, bounds: Rect, plan: Option<&Plan>) -> Result<Scope<'_>> {
        self.begin_column(bounds, plan)?;
        Ok(Scope::new(self))
    }

    pub fn row_ex(
        &mut self,
        bounds: Rect,
        padding: Padding,
        gap: f32,
        plan: Option<&Plan>,
    ) -> Result<Scope<'_>> {
        self.begin_row_ex(bounds, padding, gap, plan)?;
        Ok(Scope::new(self))
    }

    pub fn column_ex(
        &mut self,
        bounds: Rect,
        padding: Padding,
        gap: f32,
        plan: Option<&Plan>,
    ) -> Result<Scope<'_>> {
        self.begin_column_ex(bounds, padding, gap, plan)?;
        Ok(Scope::new(self))
    }

    /// Next rectangle in the current container, aligned with the default alignment.
    ///
    /// A negative `main` takes all remaining space; a negative `cross` fills the
    /// cross axis. Planned containers ignore `main` until the plan runs out.
    pub fn rect(&mut self, main: f32, cross: f32) -> Rect {
        self.rect_ex(main, cross, Padding::ZERO, self.config.align)
    }

    pub fn rect_aligned(&mut self, main: f32, cross: f32, align: Align) -> Rect {
        self.rect_ex(main, cross, Padding::ZERO, align)
    }

    /// Next rectangle with explicit alignment and an extra inset applied after
    /// alignment. Returns a zero rect when no container is open.
    pub fn rect_ex(&mut self, main: f32, cross: f32, inset: Padding, align: Align) -> Rect {
        let Some(container) = self.stack.last_mut() else {
            self.last_rect = Rect::ZERO;
            self.metrics.record_orphan_request();
            self.log(
                LogLevel::Debug,
                "rect_without_container",
                [json_kv("main", main), json_kv("cross", cross)],
            );
            return self.last_rect;
        };

        let (rect, planned) = container.next_rect(main, cross);
        let mut rect = container.align(rect, align);
        if !inset.is_zero() {
            rect = rect.shrink(inset);
        }

        self.metrics.record_rect(planned);
        self.last_rect = rect;
        rect
    }

    /// The rectangle produced by the most recent request.
    pub fn last_rect(&self) -> Rect {
        self.last_rect
    }

    /// Next rectangle plus a padding with a distinct top inset, for panels
    /// whose header needs more room than the other sides.
    pub fn panel(
        &mut self,
        main: f32,
        cross: f32,
        pad_top: f32,
        pad_other: f32,
    ) -> (Rect, Padding) {
        let rect = self.rect(main, cross);
        (rect, Padding::new(pad_other, pad_top, pad_other, pad_other))
    }

    /// Drop any containers left open by an unbalanced pass. The last rect is kept.
    /// Inside a [`Scope`] only containers opened within it are dropped.
    pub fn reset(&mut self) {
        if self.stack.len() > self.scope_floor {
            self.log(
                LogLevel::Warn,
                "unbalanced_containers",
                [json_kv("open", self.stack.len() - self.scope_floor)],
            );
            self.stack.truncate(self.scope_floor);
        }
    }

    /// Send the current metrics snapshot to the logger, if any.
    pub fn emit_metrics(&self) {
        if let Some(logger) = self.logger.as_ref() {
            let _ = logger.log_event(self.metrics.snapshot().to_log_event(METRICS_TARGET));
        }
    }

    fn log_message(&self, level: LogLevel, message: &str) {
        if let Some(logger) = self.logger.as_ref() {
            let _ = logger.log(level, LOG_TARGET, message);
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

/// An open container that is closed when the scope is dropped.
///
/// Dereferences to the [`LayoutContext`], so rectangles and nested scopes are
/// requested through it directly.
#[derive(Debug)]
pub struct Scope<'a> {
    ctx: &'a mut LayoutContext,
    depth: usize,
    prev_floor: usize,
}

impl<'a> Scope<'a> {
    fn new(ctx: &'a mut LayoutContext) -> Self {
        let depth = ctx.depth();
        let prev_floor = std::mem::replace(&mut ctx.scope_floor, depth);
        Self {
            ctx,
            depth,
            prev_floor,
        }
    }

    /// The container this scope owns.
    pub fn container(&self) -> Option<&Container> {
        self.ctx.stack.get(self.depth - 1)
    }
}

impl Deref for Scope<'_> {
    type Target = LayoutContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        // Also closes anything opened inside the scope and left unbalanced.
        self.ctx.stack.truncate(self.depth - 1);
        self.ctx.scope_floor = self.prev_floor;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::MAX_STACK;
    use crate::layout::FILL;
    use crate::logging::MemorySink;

    fn bare_context() -> LayoutContext {
        let mut ctx = LayoutContext::new();
        ctx.config_mut().set_default_padding_all(0.0);
        ctx.config_mut().set_default_gap(0.0);
        ctx
    }

    #[test]
    fn fill_plan_splits_row_evenly() {
        let mut ctx = bare_context();
        let plan = Plan::from_raw(&[-1.0, 100.0, -1.0]).unwrap();
        ctx.begin_row(Rect::new(0.0, 0.0, 300.0, 50.0), Some(&plan))
            .unwrap();

        assert_eq!(ctx.rect(FILL, FILL), Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(ctx.rect(FILL, FILL), Rect::new(100.0, 0.0, 100.0, 50.0));
        assert_eq!(ctx.rect(FILL, FILL), Rect::new(200.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn weight_plan_splits_proportionally() {
        let mut ctx = bare_context();
        let plan = Plan::from_raw(&[1.0, 3.0]).unwrap();
        ctx.begin_row(Rect::new(0.0, 0.0, 400.0, 50.0), Some(&plan))
            .unwrap();
        assert_eq!(ctx.rect(FILL, FILL).width, 100.0);
        assert_eq!(ctx.rect(FILL, FILL).width, 300.0);
    }

    #[test]
    fn explicit_parameters_beat_defaults() {
        let mut ctx = LayoutContext::new();
        ctx.begin_column_ex(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Padding::all(2.0),
            3.0,
            None,
        )
        .unwrap();
        let container = ctx.current().unwrap();
        assert_eq!(container.padding(), Padding::all(2.0));
        assert_eq!(container.gap(), 3.0);
    }

    #[test]
    fn defaults_are_read_at_begin() {
        let mut ctx = LayoutContext::new();
        ctx.begin_row(Rect::new(0.0, 0.0, 100.0, 100.0), None).unwrap();
        ctx.config_mut().set_default_padding_all(0.0);
        assert_eq!(ctx.current().unwrap().padding(), Padding::all(10.0));
        ctx.begin_row(Rect::new(0.0, 0.0, 100.0, 100.0), None).unwrap();
        assert_eq!(ctx.current().unwrap().padding(), Padding::ZERO);
    }

    #[test]
    fn plan_snapshot_is_independent_of_caller() {
        let mut ctx = bare_context();
        let mut plan = Plan::from_raw(&[-1.0]).unwrap();
        ctx.begin_row(Rect::new(0.0, 0.0, 200.0, 20.0), Some(&plan))
            .unwrap();
        plan.push(50.0).unwrap();
        plan.set_gap(30.0);

        let container = ctx.current().unwrap();
        assert_eq!(container.plan().map(Plan::len), Some(1));
        assert_eq!(container.gap(), 0.0);
        assert_eq!(ctx.rect(FILL, FILL).width, 200.0);
    }

    #[test]
    fn overflow_is_reported_and_leaves_stack_intact() {
        let sink = Arc::new(MemorySink::new());
        let mut ctx = bare_context().with_logger(Logger::from_arc(sink.clone()));
        for i in 0..MAX_STACK {
            ctx.begin_column(Rect::new(0.0, 0.0, 100.0, 100.0 + i as f32), None)
                .unwrap();
        }
        let before = *ctx.current().unwrap();

        let err = ctx
            .begin_row(Rect::new(500.0, 500.0, 10.0, 10.0), None)
            .unwrap_err();
        assert!(matches!(err, LayoutError::StackOverflow { depth: MAX_STACK }));
        assert_eq!(ctx.depth(), MAX_STACK);
        assert_eq!(*ctx.current().unwrap(), before);

        // Requests keep landing in the deepest surviving container.
        let rect = ctx.rect(10.0, FILL);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.width, 100.0);

        assert_eq!(ctx.metrics().dropped_containers, 1);
        assert!(sink.messages().contains(&"stack_overflow".to_string()));
    }

    #[test]
    fn end_inside_scope_keeps_scope_container() {
        let sink = Arc::new(MemorySink::new());
        let mut ctx = bare_context().with_logger(Logger::from_arc(sink.clone()));
        ctx.begin_column(Rect::new(0.0, 0.0, 200.0, 200.0), None)
            .unwrap();
        {
            let mut row = ctx.row(Rect::new(0.0, 0.0, 200.0, 20.0), None).unwrap();
            assert!(row.end().is_none());
            assert!(row.end().is_none());
            assert_eq!(row.depth(), 2);

            row.begin_row(Rect::new(0.0, 0.0, 50.0, 20.0), None).unwrap();
            assert!(row.end().is_some());
            row.begin_row(Rect::new(0.0, 0.0, 50.0, 20.0), None).unwrap();
            row.reset();
            assert_eq!(row.depth(), 2);
        }
        assert_eq!(ctx.depth(), 1);
        assert!(ctx.end().is_some());
        assert_eq!(ctx.depth(), 0);
        assert!(sink.messages().contains(&"end_past_scope".to_string()));
    }

    #[test]
    fn unbounded_depth_config_does_not_preallocate() {
        let config = LayoutConfig {
            max_depth: usize::MAX,
            ..LayoutConfig::default()
        };
        let mut ctx = LayoutContext::with_config(config);
        for _ in 0..MAX_STACK + 4 {
            ctx.begin_row(Rect::new(0.0, 0.0, 100.0, 20.0), None).unwrap();
        }
        assert_eq!(ctx.depth(), MAX_STACK + 4);
    }

    #[test]
    fn end_on_empty_stack_is_noop() {
        let mut ctx = LayoutContext::new();
        assert!(ctx.end().is_none());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn rect_without_container_clears_cache() {
        let mut ctx = bare_context();
        ctx.begin_row(Rect::new(0.0, 0.0, 100.0, 20.0), None).unwrap();
        ctx.rect(40.0, FILL);
        ctx.end();
        assert_ne!(ctx.last_rect(), Rect::ZERO);

        assert_eq!(ctx.rect(40.0, FILL), Rect::ZERO);
        assert_eq!(ctx.last_rect(), Rect::ZERO);
        assert_eq!(ctx.metrics().orphan_requests, 1);
    }

    #[test]
    fn last_rect_matches_previous_request() {
        let mut ctx = LayoutContext::new();
        ctx.begin_row(Rect::new(0.0, 0.0, 300.0, 60.0), None).unwrap();
        let produced =
            ctx.rect_ex(50.0, 20.0, Padding::new(1.0, 2.0, 3.0, 4.0), Align::Bottom);
        assert_eq!(ctx.last_rect(), produced);
        assert_eq!(ctx.last_rect(), produced);
        assert_eq!(ctx.current().unwrap().placed(), 1);
    }

    #[test]
    fn default_alignment_centers_in_rows() {
        let mut ctx = bare_context();
        ctx.begin_row(Rect::new(0.0, 0.0, 100.0, 40.0), None).unwrap();
        assert_eq!(ctx.rect(10.0, 20.0).y, 10.0);
        assert_eq!(ctx.rect_aligned(10.0, 20.0, Align::Top).y, 0.0);
        assert_eq!(ctx.rect_aligned(10.0, 20.0, Align::Bottom).y, 20.0);
    }

    #[test]
    fn columns_ignore_alignment() {
        let mut ctx = bare_context();
        ctx.begin_column(Rect::new(0.0, 0.0, 100.0, 40.0), None).unwrap();
        let rect = ctx.rect_aligned(10.0, 20.0, Align::Bottom);
        assert_eq!(rect, Rect::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn inset_shrinks_after_alignment() {
        let mut ctx = bare_context();
        ctx.begin_row(Rect::new(0.0, 0.0, 100.0, 40.0), None).unwrap();
        let rect =
            ctx.rect_ex(50.0, 20.0, Padding::new(5.0, 2.0, 5.0, 2.0), Align::Center);
        assert_eq!(rect, Rect::new(5.0, 12.0, 40.0, 16.0));

        let tiny = ctx.rect_ex(4.0, FILL, Padding::all(10.0), Align::None);
        assert_eq!(tiny.width, 0.0);
        assert_eq!(tiny.height, 20.0);
    }

    #[test]
    fn panel_returns_split_padding() {
        let mut ctx = bare_context();
        ctx.begin_column(Rect::new(0.0, 0.0, 200.0, 200.0), None).unwrap();
        let (rect, padding) = ctx.panel(80.0, FILL, 24.0, 6.0);
        assert_eq!(rect, Rect::new(0.0, 0.0, 200.0, 80.0));
        assert_eq!(padding, Padding::new(6.0, 24.0, 6.0, 6.0));
        assert_eq!(ctx.last_rect(), rect);
    }

    #[test]
    fn scope_pops_on_drop() {
        let mut ctx = bare_context();
        {
            let mut row = ctx.row(Rect::new(0.0, 0.0, 200.0, 50.0), None).unwrap();
            let cell = row.rect(100.0, FILL);
            {
                let mut column = row.column(cell, None).unwrap();
                assert_eq!(column.depth(), 2);
                assert_eq!(column.rect(FILL, FILL), Rect::new(0.0, 0.0, 100.0, 50.0));
                // Left open on purpose; dropping the column scope closes it too.
                column.begin_row(cell, None).unwrap();
                assert_eq!(column.depth(), 3);
            }
            assert_eq!(row.depth(), 1);
            assert_eq!(row.container().unwrap().placed(), 1);
        }
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn reset_clears_unbalanced_stack_but_keeps_last_rect() {
        let sink = Arc::new(MemorySink::new());
        let mut ctx = bare_context().with_logger(Logger::from_arc(sink.clone()));
        ctx.begin_row(Rect::new(0.0, 0.0, 100.0, 20.0), None).unwrap();
        let rect = ctx.rect(30.0, FILL);
        ctx.reset();
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.last_rect(), rect);
        assert_eq!(sink.messages(), vec!["unbalanced_containers".to_string()]);

        ctx.emit_metrics();
        let events = sink.events();
        let metrics = events.last().unwrap();
        assert_eq!(metrics.message, "layout_metrics");
        assert_eq!(metrics.target, METRICS_TARGET);
    }
}
