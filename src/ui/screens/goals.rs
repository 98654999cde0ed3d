use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_date, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.goals.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No savings goals yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :goal <target amount> <name>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Goals (0) ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .goals
        .iter()
        .enumerate()
        .skip(app.goal_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, goal)| {
            let ratio = goal.progress();
            let color = theme::progress_color(ratio);
            let reached = !goal.is_active();

            let style = if i == app.goal_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let deadline = goal
                .deadline
                .map(|d| format!("by {}", format_date(d)))
                .unwrap_or_else(|| "no deadline".to_string());

            let bar = progress_bar(ratio, 24);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", goal.icon), style),
                Span::styled(format!("{:<20}", truncate(&goal.name, 18)), style),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {:>4.0}% ", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "{:>24} ",
                        format!(
                            "{}/{}",
                            format_amount(goal.current_amount),
                            format_amount(goal.target_amount)
                        )
                    ),
                    style,
                ),
                Span::styled(
                    if reached {
                        "✔ reached".to_string()
                    } else {
                        deadline
                    },
                    theme::dim_style(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Goals ({}, {} active) ",
                    app.goals.len(),
                    app.active_goals.len()
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
