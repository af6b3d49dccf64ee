//! Summary widget rendering
//!
//! Lays out the snapshot as a handful of styled lines: heading, income and
//! expenses, savings rate, transactions to review, a stale-balance warning
//! when the oldest linked-account balance is more than a day old, and the
//! mood message. Unknown metrics render as `?`.

use chrono::Local;
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{Metric, Mood, Summary};

/// Color for the savings-rate value: red when negative, gray when unknown
fn savings_color(savings: &Metric<String>) -> Color {
    match savings {
        Metric::Known(value) if value.starts_with('-') => Color::Red,
        Metric::Known(_) => Color::Green,
        Metric::Unknown => Color::Gray,
    }
}

/// Renders the summary view
pub fn render(frame: &mut Frame, app: &App) {
    let Some(summary) = app.summary.as_ref() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    let heading = format!(
        "\u{1F4B0} Lunch Money - {} \u{1F4B0}",
        Local::now().format("%B")
    );
    lines.push(Line::from(heading).alignment(Alignment::Center));
    lines.push(Line::default());

    lines.push(Line::from(vec![
        Span::raw("\u{1F4B5} Income: "),
        Span::styled(summary.income.to_string(), Style::default().fg(Color::Green)),
        Span::raw("  \u{1F6CD} Expenses: "),
        Span::styled(summary.spent.to_string(), Style::default().fg(Color::Red)),
    ]));

    lines.push(Line::from(vec![
        Span::raw("\u{1F3E6} MTD savings rate: "),
        Span::styled(
            summary.savings.to_string(),
            Style::default().fg(savings_color(&summary.savings)),
        ),
    ]));

    lines.push(Line::from(format!(
        "\u{23F3} Transactions to review: {}",
        summary.pending_transactions
    )));

    if stale_balance_warning(summary) {
        lines.push(Line::from("\u{1F552} Oldest Balance Updates:"));
        lines.push(Line::from(format!(
            "   - Plaid: {}",
            summary.plaid_oldest_update
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Mood::classify(summary).message()));

    if let Some(refreshed) = app.last_refresh {
        lines.push(Line::from(Span::styled(
            format!(
                "updated {}  \u{00B7}  r refresh  \u{00B7}  q quit",
                refreshed.format("%H:%M")
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Lunch Money "),
    );
    frame.render_widget(widget, frame.area());
}

/// Whether the stale-balance block should be shown (over 24h old)
fn stale_balance_warning(summary: &Summary) -> bool {
    matches!(summary.hours_since_plaid_update, Metric::Known(hours) if hours > 24)
}
