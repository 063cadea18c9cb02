use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::Game;
use crate::raster::Raster;

pub const FIELD_W: f32 = 800.0;
pub const FIELD_H: f32 = 400.0;

pub const PADDLE_W: f32 = 15.0;
pub const PADDLE_H: f32 = 100.0;
pub const PADDLE_MARGIN: f32 = 10.0;
pub const BALL_RADIUS: f32 = 10.0;
pub const BALL_SPEED: f32 = 5.0;

// Keyboard nudge per press; the mouse gives continuous control.
const PADDLE_STEP: f32 = 20.0;
const AI_SPEED: f32 = 5.0;
const AI_DEADBAND: f32 = 10.0;
const SPIN_MAX: f32 = std::f32::consts::FRAC_PI_4;

const PLAYER_COLOR: Color = Color::Rgb(0, 255, 255);
const AI_COLOR: Color = Color::Rgb(255, 0, 255);
const BALL_COLOR: Color = Color::Rgb(255, 255, 255);
const NET_COLOR: Color = Color::Rgb(90, 90, 90);

#[derive(Clone, Copy, Debug)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    fn initial() -> Self {
        Ball {
            x: FIELD_W / 2.0,
            y: FIELD_H / 2.0,
            speed: BALL_SPEED,
            vx: BALL_SPEED,
            vy: 4.0,
        }
    }
}

/// Endless rally against a follow-the-ball opponent. Nothing is scored;
/// a ball out either side just recenters and serves again.
pub struct Pong {
    pub player_y: f32,
    pub ai_y: f32,
    pub ball: Ball,
    pub paused: bool,
    view: Option<Rect>,
}

impl Pong {
    pub fn new() -> Self {
        Pong {
            player_y: (FIELD_H - PADDLE_H) / 2.0,
            ai_y: (FIELD_H - PADDLE_H) / 2.0,
            ball: Ball::initial(),
            paused: false,
            view: None,
        }
    }

    /// One simulation frame: ball, walls, paddles, serve, then the
    /// opponent's follow move.
    pub fn step(&mut self, rng: &mut impl Rng) {
        if self.paused {
            return;
        }
        self.ball.x += self.ball.vx;
        self.ball.y += self.ball.vy;

        // Top and bottom walls mirror the vertical velocity.
        if self.ball.y - BALL_RADIUS < 0.0 || self.ball.y + BALL_RADIUS > FIELD_H {
            self.ball.vy = -self.ball.vy;
        }

        if self.ball.x - BALL_RADIUS < PADDLE_MARGIN + PADDLE_W
            && self.ball.y > self.player_y
            && self.ball.y < self.player_y + PADDLE_H
        {
            let paddle_y = self.player_y;
            self.reflect(paddle_y, 1.0);
        }
        if self.ball.x + BALL_RADIUS > FIELD_W - PADDLE_W - PADDLE_MARGIN
            && self.ball.y > self.ai_y
            && self.ball.y < self.ai_y + PADDLE_H
        {
            let paddle_y = self.ai_y;
            self.reflect(paddle_y, -1.0);
        }

        if self.ball.x - BALL_RADIUS < 0.0 || self.ball.x + BALL_RADIUS > FIELD_W {
            self.serve(rng);
        }

        // Follow controller for the right paddle: chase the ball unless
        // it is already within the deadband.
        let center = self.ai_y + PADDLE_H / 2.0;
        if center < self.ball.y - AI_DEADBAND {
            self.ai_y += AI_SPEED;
        } else if center > self.ball.y + AI_DEADBAND {
            self.ai_y -= AI_SPEED;
        }
        self.ai_y = self.ai_y.clamp(0.0, FIELD_H - PADDLE_H);
    }

    /// Paddle contact re-aims the ball instead of mirroring it: the
    /// contact offset from the paddle center, normalized to [-1, 1],
    /// maps to an exit angle up to 45 degrees at full speed. `dir` is
    /// +1 off the left paddle, -1 off the right.
    fn reflect(&mut self, paddle_y: f32, dir: f32) {
        let offset = (self.ball.y - (paddle_y + PADDLE_H / 2.0)) / (PADDLE_H / 2.0);
        let angle = offset * SPIN_MAX;
        self.ball.vx = dir * self.ball.speed * angle.cos();
        self.ball.vy = self.ball.speed * angle.sin();
    }

    /// Recenters the ball with a fresh randomized serve: full speed on x
    /// toward a coin-flip side, anything up to full speed on y.
    fn serve(&mut self, rng: &mut impl Rng) {
        self.ball.x = FIELD_W / 2.0;
        self.ball.y = FIELD_H / 2.0;
        self.ball.vx = if rng.gen_bool(0.5) {
            self.ball.speed
        } else {
            -self.ball.speed
        };
        self.ball.vy = (rng.gen::<f32>() * 2.0 - 1.0) * self.ball.speed;
    }

    pub fn move_player(&mut self, dy: f32) {
        self.player_y = (self.player_y + dy).clamp(0.0, FIELD_H - PADDLE_H);
    }

    /// Centers the paddle on a y given in field units.
    pub fn track_pointer(&mut self, fy: f32) {
        self.player_y = (fy - PADDLE_H / 2.0).clamp(0.0, FIELD_H - PADDLE_H);
    }

    fn field_y(&self, row: u16) -> Option<f32> {
        let view = self.view?;
        if view.height == 0 || row < view.y || row >= view.y + view.height {
            return None;
        }
        Some((row - view.y) as f32 / view.height as f32 * FIELD_H)
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let bg = Color::Rgb(0, 0, 5);
        let mut raster = Raster::new(width, height, bg);
        let sx = raster.width() as f32 / FIELD_W;
        let sy = raster.height() as f32 / FIELD_H;

        let on = (10.0 * sy).max(1.0) as i32;
        let off = (15.0 * sy).max(1.0) as i32;
        raster.dashed_vline((FIELD_W / 2.0 * sx) as i32, on, off, NET_COLOR);

        let pw = (PADDLE_W * sx).max(1.0) as i32;
        let ph = (PADDLE_H * sy).max(1.0) as i32;
        raster.fill_rect(
            (PADDLE_MARGIN * sx) as i32,
            (self.player_y * sy) as i32,
            pw,
            ph,
            PLAYER_COLOR,
        );
        raster.fill_rect(
            ((FIELD_W - PADDLE_W - PADDLE_MARGIN) * sx) as i32,
            (self.ai_y * sy) as i32,
            pw,
            ph,
            AI_COLOR,
        );

        let r = (BALL_RADIUS * sx.min(sy)).max(1.0) as i32;
        raster.fill_circle(
            (self.ball.x * sx) as i32,
            (self.ball.y * sy) as i32,
            r,
            BALL_COLOR,
        );

        raster.into_lines()
    }

    fn render_pause_overlay(&self, frame: &mut Frame, area: Rect) {
        let w = 28u16.min(area.width);
        let h = 5u16.min(area.height);
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(w)) / 2,
            area.y + (area.height.saturating_sub(h)) / 2,
            w,
            h,
        );
        frame.render_widget(Clear, popup);

        let lines = vec![
            Line::from(Span::styled(
                "GAME PAUSED",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("P resumes", Style::default().fg(Color::Gray))),
        ];
        let popup_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Rgb(0, 255, 255)));
        frame.render_widget(
            Paragraph::new(lines)
                .block(popup_block)
                .alignment(Alignment::Center),
            popup,
        );
    }
}

impl Game for Pong {
    fn update(&mut self) {
        self.step(&mut rand::thread_rng());
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => self.paused = !self.paused,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            _ => {
                if self.paused {
                    return;
                }
                match key.code {
                    KeyCode::Up => self.move_player(-PADDLE_STEP),
                    KeyCode::Down => self.move_player(PADDLE_STEP),
                    _ => {}
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.paused {
            return;
        }
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(fy) = self.field_y(mouse.row) {
                    self.track_pointer(fy);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {}
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(0, 200, 200)))
            .title(" Pong ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(100, 255, 255))
                    .add_modifier(Modifier::BOLD),
            );

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(inner);

        let status = Line::from(vec![
            Span::styled(" \u{1f3d3} ", Style::default()),
            Span::styled(
                "You ",
                Style::default().fg(PLAYER_COLOR).add_modifier(Modifier::BOLD),
            ),
            Span::styled("vs ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "CPU ",
                Style::default().fg(AI_COLOR).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled("Endless rally ", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        self.view = Some(chunks[1]);
        let fw = chunks[1].width as usize;
        let fh = chunks[1].height as usize;
        if fw > 0 && fh > 0 {
            let lines = self.render_field(fw, fh);
            frame.render_widget(Paragraph::new(lines), chunks[1]);
        }

        let bottom = if self.paused {
            Line::from(Span::styled(
                " PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(" \u{2191}\u{2193} Move ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Mouse Track ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("R Reset ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Esc Menu", Style::default().fg(Color::DarkGray)),
            ])
        };
        frame.render_widget(Paragraph::new(bottom), chunks[2]);

        if self.paused {
            self.render_pause_overlay(frame, chunks[1]);
        }
    }

    fn reset(&mut self) {
        let view = self.view;
        *self = Pong::new();
        self.view = view;
    }

    fn get_score(&self) -> u32 {
        0
    }

    fn is_game_over(&self) -> bool {
        false
    }
}
