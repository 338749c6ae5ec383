use serde::{Deserialize, Serialize};

use crate::geometry::{Padding, Rect};
use crate::plan::{Plan, PlanTotals, SizeToken};

/// Sentinel for "fill": as a main size it takes the remaining space, as a
/// cross size it takes the container's full cross extent.
pub const FILL: f32 = -1.0;

/// Layout direction for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Row,
    Column,
}

/// Cross-axis placement of an element shorter than its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Top,
    Center,
    Bottom,
    /// Leave the element where allocation put it.
    None,
}

/// One open row or column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    outer: Rect,
    inner: Rect,
    direction: Direction,
    gap: f32,
    padding: Padding,
    cursor: f32,
    remaining: f32,
    placed: usize,
    plan: Plan,
    plan_index: usize,
    totals: PlanTotals,
}

impl Container {
    /// Build a container. A plan's own gap and padding take precedence over
    /// the values passed here.
    pub fn new(
        bounds: Rect,
        direction: Direction,
        padding: Padding,
        gap: f32,
        plan: Option<&Plan>,
    ) -> Self {
        let plan = plan.copied().unwrap_or_default();
        let padding = plan.padding().unwrap_or(padding);
        let gap = plan.gap().unwrap_or(gap);
        let inner = bounds.shrink(padding);

        let (cursor, remaining) = match direction {
            Direction::Row => (inner.x, inner.width),
            Direction::Column => (inner.y, inner.height),
        };

        let totals = if plan.is_empty() {
            PlanTotals::default()
        } else {
            plan.totals(gap)
        };

        Self {
            outer: bounds,
            inner,
            direction,
            gap,
            padding,
            cursor,
            remaining,
            placed: 0,
            plan,
            plan_index: 0,
            totals,
        }
    }

    pub fn outer(&self) -> Rect {
        self.outer
    }

    pub fn inner(&self) -> Rect {
        self.inner
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Position along the main axis where the next element starts.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Main-axis space left.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Attached plan snapshot. `None` when no plan was given, or when the plan
    /// had neither tokens nor gap/padding overrides.
    pub fn plan(&self) -> Option<&Plan> {
        let attached =
            !self.plan.is_empty() || self.plan.gap().is_some() || self.plan.padding().is_some();
        attached.then_some(&self.plan)
    }

    pub fn plan_index(&self) -> usize {
        self.plan_index
    }

    pub fn totals(&self) -> PlanTotals {
        self.totals
    }

    pub fn is_row(&self) -> bool {
        self.direction == Direction::Row
    }

    /// Inner extent along the main axis.
    pub fn main_extent(&self) -> f32 {
        match self.direction {
            Direction::Row => self.inner.width,
            Direction::Column => self.inner.height,
        }
    }

    /// Inner extent along the cross axis.
    pub fn cross_extent(&self) -> f32 {
        match self.direction {
            Direction::Row => self.inner.height,
            Direction::Column => self.inner.width,
        }
    }

    fn has_plan(&self) -> bool {
        !self.plan.is_empty()
    }

    fn next_token(&mut self) -> Option<SizeToken> {
        let token = self.plan.get(self.plan_index)?;
        self.plan_index += 1;
        Some(token)
    }

    /// Size the next element and allocate it. Returns the rect and whether a
    /// plan token decided its main size.
    pub(crate) fn next_rect(&mut self, main: f32, cross: f32) -> (Rect, bool) {
        match self.next_token() {
            Some(token) => {
                let main = self.totals.resolve(token, self.main_extent());
                (self.take(main, cross), true)
            }
            None => {
                let main = if main < 0.0 { self.remaining } else { main };
                (self.take(main, cross), false)
            }
        }
    }

    /// Allocate `main` x `cross` at the cursor.
    ///
    /// Planned containers already reserved their gaps in the flex math, so the
    /// gap only moves the cursor there; ad-hoc containers also pay it from
    /// `remaining`.
    pub(crate) fn take(&mut self, main: f32, cross: f32) -> Rect {
        if self.placed > 0 && self.gap > 0.0 {
            self.cursor += self.gap;
            if !self.has_plan() {
                self.remaining -= self.gap;
            }
        }

        // NaN requests get no space.
        let main = if main.is_nan() {
            0.0
        } else {
            main.min(self.remaining).max(0.0)
        };

        let cross_fill = self.cross_extent();
        let cross = if cross < 0.0 {
            cross_fill
        } else {
            cross.min(cross_fill)
        };

        let rect = match self.direction {
            Direction::Row => Rect::new(self.cursor, self.inner.y, main, cross),
            Direction::Column => Rect::new(self.inner.x, self.cursor, cross, main),
        };

        self.cursor += main;
        self.remaining -= main;
        self.placed += 1;
        rect
    }

    /// Shift an element within a row's cross axis. Columns leave it untouched.
    pub(crate) fn align(&self, mut rect: Rect, align: Align) -> Rect {
        if self.direction != Direction::Row {
            return rect;
        }
        let free = self.inner.height - rect.height;
        if free <= 0.0 {
            return rect;
        }
        match align {
            Align::Top | Align::None => {}
            Align::Center => rect.y += free / 2.0,
            Align::Bottom => rect.y += free,
        }
        rect
    }
}
