use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::Category;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_date, format_signed, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(8),    // Recent transactions + active goals
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_recent_transactions(f, columns[0], app);
    render_active_goals(f, columns[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let income_count = app.transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = app.transactions.iter().filter(|t| t.is_expense()).count();

    render_card(
        f,
        cards[0],
        "Balance",
        app.balance,
        if app.balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );
    render_card(
        f,
        cards[1],
        "Income",
        app.total_income,
        theme::GREEN,
        Some(format!("{income_count} txns")),
    );
    render_card(
        f,
        cards[2],
        "Expenses",
        app.total_expense,
        theme::RED,
        Some(format!("{expense_count} txns")),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_recent_transactions(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Recent Transactions ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.transactions.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No transactions yet. Add one with :add or try :sample",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .transactions
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|txn| {
            let icon = Category::find_by_id(&app.categories, txn.category_id)
                .map(|c| c.icon.as_str())
                .unwrap_or("❓");
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{icon} "), theme::normal_style()),
                Span::styled(
                    format!("{:<28}", truncate(&txn.description, 26)),
                    theme::normal_style(),
                ),
                Span::styled(format!("{:<12}", format_date(txn.date)), theme::dim_style()),
                Span::styled(format_signed(txn.signed_amount()), amount_style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_active_goals(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Active Goals ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.active_goals.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No active goals. Add one with :goal",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .active_goals
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|goal| {
            let ratio = goal.progress();
            let color = theme::progress_color(ratio);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", goal.icon), theme::normal_style()),
                Span::styled(
                    format!("{:<18}", truncate(&goal.name, 16)),
                    theme::normal_style(),
                ),
                Span::styled(
                    format!("{:>4.0}% ", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "{}/{}",
                        format_amount(goal.current_amount),
                        format_amount(goal.target_amount)
                    ),
                    theme::dim_style(),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
