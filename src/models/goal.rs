use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub(crate) const DEFAULT_GOAL_ICON: &str = "🎯";

/// A savings target. Progress is derived on read, never cached.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Goal {
    pub id: Option<i64>,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    /// Optional deadline, milliseconds since the Unix epoch.
    pub deadline: Option<i64>,
    pub icon: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Goal {
    pub(crate) fn new(name: String, target_amount: Decimal, deadline: Option<i64>) -> Self {
        Self {
            id: None,
            name,
            target_amount,
            current_amount: Decimal::ZERO,
            deadline,
            icon: DEFAULT_GOAL_ICON.to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Fraction of the target reached, clamped to [0, 1].
    /// A non-positive target yields 0 rather than a division error.
    pub(crate) fn progress(&self) -> f64 {
        if self.target_amount <= Decimal::ZERO {
            return 0.0;
        }
        let ratio = (self.current_amount / self.target_amount)
            .to_f64()
            .unwrap_or(0.0);
        ratio.clamp(0.0, 1.0)
    }

    /// A goal is active while its target has not been reached.
    pub(crate) fn is_active(&self) -> bool {
        self.current_amount < self.target_amount
    }
}
