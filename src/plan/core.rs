use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::Padding;

/// Maximum number of tokens a plan can hold.
pub const PLAN_MAX: usize = 32;

/// Raw values at or above this threshold are read as fixed pixel sizes.
const RAW_FIXED_THRESHOLD: f32 = 20.0;

/// Main-axis sizing rule for one child of a planned container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeToken {
    /// Fixed size in pixels.
    Fixed(f32),
    /// Proportional share of the space left after fixed tokens and gaps.
    Weight(f32),
    /// Same as `Weight(1.0)`.
    Fill,
}

impl SizeToken {
    /// Decode the compact float encoding used by hand-written plans.
    ///
    /// `>= 20` is a pixel size, `-1` is fill, `(0, 20)` is a flex weight.
    /// Everything else (zero, other negatives, NaN) resolves to a zero-sized slot.
    pub fn from_raw(value: f32) -> Self {
        if value >= RAW_FIXED_THRESHOLD {
            SizeToken::Fixed(value)
        } else if value == -1.0 {
            SizeToken::Fill
        } else if value > 0.0 && value < RAW_FIXED_THRESHOLD {
            SizeToken::Weight(value)
        } else {
            SizeToken::Fixed(0.0)
        }
    }

    /// Flex weight this token contributes, or `None` for fixed tokens.
    pub fn flex_weight(&self) -> Option<f32> {
        match *self {
            SizeToken::Fixed(_) => None,
            SizeToken::Fill => Some(1.0),
            SizeToken::Weight(w) if w > 0.0 => Some(w),
            SizeToken::Weight(_) => Some(0.0),
        }
    }

    fn fixed_px(&self) -> f32 {
        match *self {
            SizeToken::Fixed(px) if px > 0.0 => px,
            _ => 0.0,
        }
    }
}

impl From<f32> for SizeToken {
    fn from(value: f32) -> Self {
        SizeToken::from_raw(value)
    }
}

/// Aggregates a container precomputes from its plan when it opens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanTotals {
    /// Sum of fixed pixel tokens.
    pub fixed: f32,
    /// Sum of flex weights (fill counts as 1).
    pub weight: f32,
    /// Gap space reserved between the plan's `len - 1` slots.
    pub gap_total: f32,
}

impl PlanTotals {
    /// Main-axis space left for weighted and fill tokens.
    pub fn flex_space(&self, main_extent: f32) -> f32 {
        (main_extent - self.fixed - self.gap_total).max(0.0)
    }

    /// Resolve the main-axis size of one token against `main_extent`.
    pub fn resolve(&self, token: SizeToken, main_extent: f32) -> f32 {
        let Some(weight) = token.flex_weight() else {
            return token.fixed_px();
        };
        let available = self.flex_space(main_extent);
        if self.weight > 0.0 {
            weight / self.weight * available
        } else if token == SizeToken::Fill {
            available
        } else {
            0.0
        }
    }
}

/// Pre-declared division of a container's main axis.
///
/// A plan is a fixed-size value; attaching it to a container copies it, so later
/// edits to the caller's plan never reach an open container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "PlanSpec", try_from = "PlanSpec")]
pub struct Plan {
    tokens: [SizeToken; PLAN_MAX],
    len: usize,
    gap: Option<f32>,
    padding: Option<Padding>,
}

impl Plan {
    pub const fn new() -> Self {
        Self {
            tokens: [SizeToken::Fill; PLAN_MAX],
            len: 0,
            gap: None,
            padding: None,
        }
    }

    /// Build a plan from a token slice. Slices longer than [`PLAN_MAX`] are rejected.
    pub fn from_tokens(tokens: &[SizeToken]) -> Result<Self> {
        if tokens.len() > PLAN_MAX {
            return Err(LayoutError::PlanCapacity {
                requested: tokens.len(),
                capacity: PLAN_MAX,
            });
        }
        let mut plan = Self::new();
        plan.tokens[..tokens.len()].copy_from_slice(tokens);
        plan.len = tokens.len();
        Ok(plan)
    }

    /// Build a plan from the compact float encoding (see [`SizeToken::from_raw`]).
    pub fn from_raw(values: &[f32]) -> Result<Self> {
        if values.len() > PLAN_MAX {
            return Err(LayoutError::PlanCapacity {
                requested: values.len(),
                capacity: PLAN_MAX,
            });
        }
        let mut plan = Self::new();
        for (slot, value) in plan.tokens.iter_mut().zip(values) {
            *slot = SizeToken::from_raw(*value);
        }
        plan.len = values.len();
        Ok(plan)
    }

    /// Append one token. A full plan drops the token and reports it.
    pub fn push(&mut self, token: impl Into<SizeToken>) -> Result<()> {
        if self.is_full() {
            return Err(LayoutError::PlanCapacity {
                requested: self.len + 1,
                capacity: PLAN_MAX,
            });
        }
        self.tokens[self.len] = token.into();
        self.len += 1;
        Ok(())
    }

    /// Append `count` copies of a token, keeping as many as fit.
    pub fn push_repeat(&mut self, token: impl Into<SizeToken>, count: usize) -> Result<()> {
        let token = token.into();
        let requested = self.len.saturating_add(count);
        let fits = count.min(PLAN_MAX - self.len);
        self.tokens[self.len..self.len + fits].fill(token);
        self.len += fits;
        if fits < count {
            return Err(LayoutError::PlanCapacity {
                requested,
                capacity: PLAN_MAX,
            });
        }
        Ok(())
    }

    pub fn set_gap(&mut self, gap: f32) {
        self.gap = Some(gap);
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = Some(padding);
    }

    pub fn set_padding_all(&mut self, value: f32) {
        self.padding = Some(Padding::all(value));
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.set_gap(gap);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.set_padding(padding);
        self
    }

    pub fn with_padding_all(mut self, value: f32) -> Self {
        self.set_padding_all(value);
        self
    }

    pub fn tokens(&self) -> &[SizeToken] {
        &self.tokens[..self.len]
    }

    pub fn get(&self, index: usize) -> Option<SizeToken> {
        self.tokens().get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == PLAN_MAX
    }

    /// Explicit gap override, if one was set.
    pub fn gap(&self) -> Option<f32> {
        self.gap
    }

    /// Explicit padding override, if one was set.
    pub fn padding(&self) -> Option<Padding> {
        self.padding
    }

    /// Precompute fixed, weight and gap totals for a container using `gap`.
    pub fn totals(&self, gap: f32) -> PlanTotals {
        let mut totals = PlanTotals::default();
        for token in self.tokens() {
            match token.flex_weight() {
                Some(weight) => totals.weight += weight,
                None => totals.fixed += token.fixed_px(),
            }
        }
        if self.len > 1 {
            totals.gap_total = (self.len - 1) as f32 * gap;
        }
        totals
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Plan {
    fn eq(&self, other: &Self) -> bool {
        self.tokens() == other.tokens() && self.gap == other.gap && self.padding == other.padding
    }
}

/// Serialized form of a [`Plan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlanSpec {
    tokens: Vec<SizeToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gap: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    padding: Option<Padding>,
}

impl From<Plan> for PlanSpec {
    fn from(plan: Plan) -> Self {
        Self {
            tokens: plan.tokens().to_vec(),
            gap: plan.gap,
            padding: plan.padding,
        }
    }
}

impl TryFrom<PlanSpec> for Plan {
    type Error = LayoutError;

    fn try_from(spec: PlanSpec) -> Result<Self> {
        let mut plan = Plan::from_tokens(&spec.tokens)?;
        plan.gap = spec.gap;
        plan.padding = spec.padding;
        Ok(plan)
    }
}
