use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::models::TxnKind;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["", "Name", "Kind", "Color", "In use"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .categories
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, cat)| {
            let in_use = app
                .transactions
                .iter()
                .filter(|t| Some(t.category_id) == cat.id)
                .count();

            let kind_style = match cat.kind {
                TxnKind::Income => theme::income_style(),
                TxnKind::Expense => theme::expense_style(),
            };

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(cat.icon.clone()),
                Cell::from(truncate(&cat.name, 20)),
                Cell::from(Span::styled(cat.kind.to_string(), kind_style)),
                Cell::from(cat.color.clone()),
                Cell::from(if in_use > 0 {
                    format!("{in_use} txns")
                } else {
                    String::new()
                }),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Categories ({}) ", app.categories.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
