use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::scores::HighScores;

const BANNER: &str = r#"
 ╔══════════════════════════════════════════════════════════════╗
 ║   ██████╗  ██████╗ ██╗███╗   ██╗         ██████╗ ██████╗     ║
 ║  ██╔════╝ ██╔═══██╗██║████╗  ██║        ██╔═══██╗██╔══██╗    ║
 ║  ██║      ██║   ██║██║██╔██╗ ██║ █████╗ ██║   ██║██████╔╝    ║
 ║  ██║      ██║   ██║██║██║╚██╗██║ ╚════╝ ██║   ██║██╔═══╝     ║
 ║  ╚██████╗ ╚██████╔╝██║██║ ╚████║        ╚██████╔╝██║         ║
 ║   ╚═════╝  ╚═════╝ ╚═╝╚═╝  ╚═══╝         ╚═════╝ ╚═╝         ║
 ╚══════════════════════════════════════════════════════════════╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

const GAME_TILES: [GameTile; 2] = [
    GameTile {
        key: "1",
        icon: "🏓",
        name: "Pong",
        desc: "Endless rally\nagainst the CPU!",
        color: Color::Rgb(80, 220, 220),
        border_color: Color::Rgb(40, 110, 110),
    },
    GameTile {
        key: "2",
        icon: "👾",
        name: "Invaders",
        desc: "Defend Earth\nfrom aliens!",
        color: Color::Rgb(80, 255, 80),
        border_color: Color::Rgb(40, 140, 40),
    },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, selected: bool) {
    let border_color = if selected {
        Color::Rgb(255, 220, 80)
    } else {
        tile.border_color
    };
    let border_type = if selected {
        BorderType::Double
    } else {
        BorderType::Rounded
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    // Key + Icon + Name line
    let name_color = if selected {
        Color::Rgb(255, 255, 255)
    } else {
        tile.color
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("[{}] ", tile.key),
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(
            tile.name,
            Style::default().fg(name_color).add_modifier(Modifier::BOLD),
        ),
    ]));

    // Description lines
    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(vec![Span::styled(
            desc_line,
            Style::default().fg(if selected {
                Color::Rgb(180, 180, 200)
            } else {
                Color::Rgb(120, 120, 140)
            }),
        )]));
    }

    // Selected indicator
    if selected {
        lines.push(Line::from(vec![Span::styled(
            "▶ Enter to play",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )]));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn game_controls(game_idx: usize) -> Vec<Line<'static>> {
    match game_idx {
        0 => vec![
            // Pong
            Line::from(""),
            Line::from(vec![Span::styled(
                "  🏓 Pong",
                Style::default()
                    .fg(Color::Rgb(80, 220, 220))
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(
                "  Keep the rally alive!",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("    Mouse            ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Track paddle", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
            Line::from(vec![
                Span::styled("    ↑ / ↓            ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Nudge paddle", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
            Line::from(vec![
                Span::styled("    P                ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Pause", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
            Line::from(vec![
                Span::styled("    R                ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Restart", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
        ],
        1 => vec![
            // Space Invaders
            Line::from(""),
            Line::from(vec![Span::styled(
                "  \u{1f47e} Space Invaders",
                Style::default()
                    .fg(Color::Rgb(80, 255, 80))
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(
                "  Defend Earth from the wave!",
                Style::default().fg(Color::Rgb(100, 100, 120)),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("    S / Enter        ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Start game", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
            Line::from(vec![
                Span::styled("    \u{2190} / \u{2192}            ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Move cannon", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
            Line::from(vec![
                Span::styled("    Space / \u{2191}        ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Shoot", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
            Line::from(vec![
                Span::styled("    Mouse            ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Aim, click to fire", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
            Line::from(vec![
                Span::styled("    P                ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Pause", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
            Line::from(vec![
                Span::styled("    R                ", Style::default().fg(Color::Rgb(80, 200, 255))),
                Span::styled("Reset", Style::default().fg(Color::Rgb(140, 140, 140))),
            ]),
        ],
        _ => vec![],
    }
}

pub fn render_home(
    frame: &mut Frame,
    area: Rect,
    selected_game: usize,
    show_high_scores: bool,
    high_scores: &HighScores,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(8),  // Game tiles
            Constraint::Min(10),    // Controls area
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    // Banner
    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    // Subtitle
    let subtitle = Paragraph::new(Line::from(vec![Span::styled(
        "  ⚡ Two Quarters, Two Classics ⚡  ",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    // Games section title block
    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games - ←→ Select, Enter to Play ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    // Two tiles, centered
    let tile_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ])
        .split(games_inner);

    render_game_tile(frame, tile_cols[1], &GAME_TILES[0], selected_game == 0);
    render_game_tile(frame, tile_cols[2], &GAME_TILES[1], selected_game == 1);

    // Controls area: navigation left, game controls right
    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    // Navigation Control (left)
    let controls = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  🔧 Navigation",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    Tab / Shift+Tab  ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Switch tabs", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    1-2              ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Launch game", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    ← / →            ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Select game", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    Enter            ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Play selected", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    Esc              ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Return to Home", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    q / Ctrl+C       ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Quit", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  🎮 Common",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    R                ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Restart game", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
        Line::from(vec![
            Span::styled("    P                ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled("Pause / Unpause", Style::default().fg(Color::Rgb(140, 140, 140))),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation Control ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(200, 120, 255))
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    // Game Control (right) - shows controls for the selected game
    let game_ctrl_lines = game_controls(selected_game);
    let game_ctrl = Paragraph::new(game_ctrl_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .title(format!(" 🎮 {} Control ", GAME_TILES[selected_game].name))
            .title_style(
                Style::default()
                    .fg(GAME_TILES[selected_game].color)
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    // Footer
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled("v0.2.0", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled(
            "H",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" High Scores", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);

    // High scores overlay
    if show_high_scores {
        render_high_scores_overlay(frame, area, high_scores);
    }
}

fn render_high_scores_overlay(frame: &mut Frame, area: Rect, high_scores: &HighScores) {
    // Center overlay
    let overlay_w = 40u16.min(area.width.saturating_sub(4));
    let overlay_h = 12u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    // Clear background
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 200, 80)))
        .title(" 🏆 High Scores ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let medal_colors = [
        Color::Rgb(255, 215, 0),   // Gold
        Color::Rgb(192, 192, 192), // Silver
        Color::Rgb(205, 127, 50),  // Bronze
    ];

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  \u{1f47e} ", Style::default()),
        Span::styled(
            "Space Invaders",
            Style::default()
                .fg(Color::Rgb(80, 255, 80))
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    let scores = high_scores.top_scores();
    let has_any = scores.iter().any(|e| e.score > 0);
    if has_any {
        for rank in 0..3 {
            if scores[rank].score > 0 {
                let medal = match rank {
                    0 => "🥇",
                    1 => "🥈",
                    _ => "🥉",
                };
                let name_display = if scores[rank].name.is_empty() {
                    "???".to_string()
                } else {
                    format!("{:<9}", scores[rank].name)
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("    {} ", medal), Style::default()),
                    Span::styled(
                        format!("{} ", name_display),
                        Style::default().fg(Color::Rgb(200, 200, 220)),
                    ),
                    Span::styled(
                        format!("{}", scores[rank].score),
                        Style::default()
                            .fg(medal_colors[rank])
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
        }
    } else {
        lines.push(Line::from(vec![Span::styled(
            "    No scores yet",
            Style::default().fg(Color::Rgb(60, 60, 80)),
        )]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled(
            "H",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to close", Style::default().fg(Color::Rgb(80, 80, 100))),
    ]));

    let p = Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}
