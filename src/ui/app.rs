use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{Category, Goal, Transaction};
use crate::repo::Repos;
use crate::store::{Live, Store};
use crate::views::{MonthKey, Views};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Home,
    Transactions,
    Statistics,
    Goals,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Home,
            Self::Transactions,
            Self::Statistics,
            Self::Goals,
            Self::Categories,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Statistics => write!(f, "Statistics"),
            Self::Goals => write!(f, "Goals"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
    DeleteGoal { id: i64, name: String },
    DeleteCategory { id: i64, name: String },
    /// Delete every transaction and every goal.
    Reset,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Live subscriptions, registered once for the app lifetime
    views: Views,
    live_transactions: Live<Vec<Transaction>>,
    live_categories: Live<Vec<Category>>,
    live_goals: Live<Vec<Goal>>,
    live_active_goals: Live<Vec<Goal>>,

    // Latest snapshots, pulled once per frame by `refresh`
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) categories: Vec<Category>,
    pub(crate) goals: Vec<Goal>,
    pub(crate) active_goals: Vec<Goal>,
    pub(crate) balance: Decimal,
    pub(crate) total_income: Decimal,
    pub(crate) total_expense: Decimal,
    pub(crate) expenses_by_category: Vec<(String, Decimal)>,
    pub(crate) monthly_expenses: Vec<(MonthKey, Decimal)>,

    // List cursors
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) goal_index: usize,
    pub(crate) goal_scroll: usize,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(store: &Store, repos: &Repos) -> Result<Self> {
        let views = Views::new(store)?;
        let live_transactions = repos.transactions.watch_all()?;
        let live_categories = repos.categories.watch_all()?;
        let live_goals = repos.goals.watch_all()?;
        let live_active_goals = repos.goals.watch_active()?;

        let mut app = Self {
            running: true,
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            views,
            live_transactions,
            live_categories,
            live_goals,
            live_active_goals,

            transactions: Vec::new(),
            categories: Vec::new(),
            goals: Vec::new(),
            active_goals: Vec::new(),
            balance: Decimal::ZERO,
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            expenses_by_category: Vec::new(),
            monthly_expenses: Vec::new(),

            transaction_index: 0,
            transaction_scroll: 0,
            goal_index: 0,
            goal_scroll: 0,
            category_index: 0,
            category_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };
        app.refresh();
        Ok(app)
    }

    /// Pull the latest value of every live subscription into the render
    /// snapshots and keep list cursors in bounds. Called once per frame;
    /// the subscriptions themselves update on the store worker.
    pub(crate) fn refresh(&mut self) {
        self.transactions = self.live_transactions.latest();
        self.categories = self.live_categories.latest();
        self.goals = self.live_goals.latest();
        self.active_goals = self.live_active_goals.latest();
        self.balance = self.views.balance.latest();
        self.total_income = self.views.total_income.latest();
        self.total_expense = self.views.total_expense.latest();
        self.expenses_by_category = self.views.expenses_by_category.latest();
        self.monthly_expenses = self.views.monthly_expenses.latest();

        clamp_cursor(
            &mut self.transaction_index,
            &mut self.transaction_scroll,
            self.transactions.len(),
        );
        clamp_cursor(&mut self.goal_index, &mut self.goal_scroll, self.goals.len());
        clamp_cursor(
            &mut self.category_index,
            &mut self.category_scroll,
            self.categories.len(),
        );
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn selected_goal(&self) -> Option<&Goal> {
        self.goals.get(self.goal_index)
    }

    pub(crate) fn selected_category(&self) -> Option<&Category> {
        self.categories.get(self.category_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn clamp_cursor(index: &mut usize, scroll: &mut usize, len: usize) {
    if len == 0 {
        *index = 0;
        *scroll = 0;
    } else if *index >= len {
        *index = len - 1;
        if *scroll > *index {
            *scroll = *index;
        }
    }
}
