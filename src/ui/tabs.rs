use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};

/// Accent per tab, matching the game tiles on the home screen.
fn tab_accent(tab: Tab) -> Color {
    match tab {
        Tab::Home => Color::Rgb(255, 220, 80),
        Tab::Pong => Color::Rgb(80, 220, 220),
        Tab::Invaders => Color::Rgb(80, 255, 80),
    }
}

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all().iter().map(|t| Line::from(t.title())).collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
                .border_type(BorderType::Rounded)
                .title(" 🕹 Coin-Op ")
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(200, 120, 255))
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::Rgb(120, 120, 140)))
        .highlight_style(
            Style::default()
                .fg(tab_accent(app.current_tab))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
