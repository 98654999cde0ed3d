use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "income" => Self::Income,
            _ => Self::Expense,
        }
    }

    pub(crate) fn all() -> &'static [TxnKind] {
        &[Self::Income, Self::Expense]
    }
}

impl std::fmt::Display for TxnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense event. `amount` is always positive; the
/// direction comes from `kind`. `category_id` is a soft reference: the
/// category may have been deleted since.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub id: Option<i64>,
    pub amount: Decimal,
    pub description: String,
    pub category_id: i64,
    pub kind: TxnKind,
    /// Milliseconds since the Unix epoch.
    pub date: i64,
    pub note: Option<String>,
}

impl Transaction {
    pub(crate) fn new(
        amount: Decimal,
        description: String,
        category_id: i64,
        kind: TxnKind,
        date: i64,
    ) -> Self {
        Self {
            id: None,
            amount,
            description,
            category_id,
            kind,
            date,
            note: None,
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TxnKind::Expense
    }

    /// Signed amount: positive for income, negative for expense.
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.kind {
            TxnKind::Income => self.amount,
            TxnKind::Expense => -self.amount,
        }
    }
}
