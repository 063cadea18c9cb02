use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::Game;
use crate::raster::Raster;

pub const FIELD_W: f32 = 600.0;
pub const FIELD_H: f32 = 400.0;

pub const PLAYER_W: f32 = 50.0;
pub const PLAYER_H: f32 = 30.0;
const PLAYER_SPEED: f32 = 5.0;
const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

pub const ALIEN_W: f32 = 40.0;
pub const ALIEN_H: f32 = 30.0;
const ALIEN_SPEED: f32 = 0.5;
const ALIEN_DROP: f32 = 15.0;
const EDGE_MARGIN: f32 = 10.0;
const ALIEN_ROWS: usize = 5;
const ALIEN_COLS: usize = 8;
const FORMATION_X: f32 = 80.0;
const FORMATION_Y: f32 = 50.0;
const COL_SPACING: f32 = 60.0;
const ROW_SPACING: f32 = 40.0;

pub const BULLET_W: f32 = 3.0;
pub const BULLET_H: f32 = 15.0;
pub const PLAYER_SHOT_SPEED: f32 = 8.0;
pub const ALIEN_SHOT_SPEED: f32 = 5.0;

const KILL_POINTS: u32 = 10;
const START_LIVES: u32 = 3;

/// Aliens hold fire for the opening five seconds of a session (at 60 FPS).
const FIRE_GATE_FRAMES: u64 = 300;
const FIRE_BASE_CHANCE: f32 = 0.0005;
const FIRE_MAX_CHANCE: f32 = 0.002;

const PLAYER_COLOR: Color = Color::Rgb(0, 255, 0);
const ALIEN_COLOR: Color = Color::Rgb(255, 0, 255);
const PLAYER_SHOT_COLOR: Color = Color::Rgb(0, 255, 255);
const ALIEN_SHOT_COLOR: Color = Color::Rgb(255, 0, 0);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

impl Player {
    fn spawn() -> Self {
        Player {
            x: FIELD_W / 2.0 - PLAYER_W / 2.0,
            y: FIELD_H - PLAYER_H - PLAYER_BOTTOM_MARGIN,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub dir: f32,
}

/// One projectile from either side. The sign of `dy` encodes the owner:
/// player shots travel up (negative), alien shots travel down (positive).
#[derive(Clone, Copy, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub dy: f32,
}

impl Bullet {
    pub fn from_player(player: &Player) -> Self {
        Bullet {
            x: player.x + PLAYER_W / 2.0 - BULLET_W / 2.0,
            y: player.y,
            dy: -PLAYER_SHOT_SPEED,
        }
    }

    pub fn from_alien(alien: &Alien) -> Self {
        Bullet {
            x: alien.x + ALIEN_W / 2.0 - BULLET_W / 2.0,
            y: alien.y + ALIEN_H,
            dy: ALIEN_SHOT_SPEED,
        }
    }

    pub fn is_player_shot(&self) -> bool {
        self.dy < 0.0
    }

    pub fn is_off_screen(&self) -> bool {
        self.y < 0.0 || self.y > FIELD_H
    }
}

/// Per-frame chance of any single alien firing. Zero until the grace
/// period ends, then ramps linearly with session age up to a hard cap.
pub fn alien_fire_chance(timer: u64) -> f32 {
    if timer < FIRE_GATE_FRAMES {
        return 0.0;
    }
    (FIRE_BASE_CHANCE + timer as f32 / 6000.0 * 0.001).min(FIRE_MAX_CHANCE)
}

fn overlaps(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

pub struct Invaders {
    pub phase: Phase,
    pub player: Player,
    pub aliens: Vec<Alien>,
    pub bullets: Vec<Bullet>,
    pub score: u32,
    pub lives: u32,
    /// Simulation frames elapsed this session; gates alien fire.
    pub timer: u64,
    high_score: u32,
    // Field area drawn last frame, for pointer-to-field translation.
    view: Option<Rect>,
}

impl Invaders {
    pub fn new() -> Self {
        let mut g = Self {
            phase: Phase::Idle,
            player: Player::spawn(),
            aliens: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            lives: START_LIVES,
            timer: 0,
            high_score: 0,
            view: None,
        };
        g.init_session();
        g
    }

    /// Fresh formation, score, lives and timer. Phase and the session
    /// high score are left alone.
    fn init_session(&mut self) {
        self.player = Player::spawn();
        self.score = 0;
        self.lives = START_LIVES;
        self.timer = 0;
        self.bullets.clear();
        self.aliens.clear();
        for row in 0..ALIEN_ROWS {
            for col in 0..ALIEN_COLS {
                self.aliens.push(Alien {
                    x: FORMATION_X + col as f32 * COL_SPACING,
                    y: FORMATION_Y + row as f32 * ROW_SPACING,
                    dir: 1.0,
                });
            }
        }
    }

    /// From idle or a finished session, starts a fresh run; from pause it
    /// resumes in place.
    pub fn start(&mut self) {
        match self.phase {
            Phase::Idle | Phase::Won | Phase::Lost => {
                self.init_session();
                self.phase = Phase::Running;
            }
            Phase::Paused => self.phase = Phase::Running,
            Phase::Running => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.phase = Phase::Paused,
            Phase::Paused => self.phase = Phase::Running,
            _ => {}
        }
    }

    pub fn reset_session(&mut self) {
        self.init_session();
        self.phase = Phase::Idle;
    }

    fn finish(&mut self, outcome: Phase) {
        self.phase = outcome;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    // ── Simulation ─────────────────────────────────────────────────────

    /// One simulation frame. A no-op in every phase but `Running`, so a
    /// finished or paused session keeps drawing without mutating.
    pub fn step(&mut self, rng: &mut impl Rng) {
        if self.phase != Phase::Running {
            return;
        }
        self.timer += 1;

        // Victory is observed at the top of the pass, one frame after the
        // last alien went down.
        if self.aliens.is_empty() {
            self.finish(Phase::Won);
            return;
        }

        // March the formation, then give the whole group one edge scan:
        // any member crossing a margin drops every member a notch and
        // flips every direction.
        for a in &mut self.aliens {
            a.x += ALIEN_SPEED * a.dir;
        }
        if self
            .aliens
            .iter()
            .any(|a| a.x <= EDGE_MARGIN || a.x + ALIEN_W >= FIELD_W - EDGE_MARGIN)
        {
            for a in &mut self.aliens {
                a.y += ALIEN_DROP;
                a.dir = -a.dir;
            }
        }

        self.alien_fire(rng);

        // The formation reaching the cannon row ends the session.
        if self.aliens.iter().any(|a| a.y + ALIEN_H >= self.player.y) {
            self.finish(Phase::Lost);
            return;
        }

        self.advance_bullets();
    }

    fn alien_fire(&mut self, rng: &mut impl Rng) {
        let chance = alien_fire_chance(self.timer);
        if chance <= 0.0 {
            return;
        }
        for a in &self.aliens {
            if rng.gen::<f32>() < chance {
                self.bullets.push(Bullet::from_alien(a));
            }
        }
    }

    /// Single pass over the shared bullet list: move, prune off-screen,
    /// then resolve hits. Walks from the end so in-place removal never
    /// skips an element. Losing the last life abandons the rest of the
    /// pass outright.
    fn advance_bullets(&mut self) {
        let mut i = self.bullets.len();
        while i > 0 {
            i -= 1;
            self.bullets[i].y += self.bullets[i].dy;
            if self.bullets[i].is_off_screen() {
                self.bullets.remove(i);
                continue;
            }
            let b = self.bullets[i];
            if b.is_player_shot() {
                let hit = self.aliens.iter().rposition(|a| {
                    overlaps(b.x, b.y, BULLET_W, BULLET_H, a.x, a.y, ALIEN_W, ALIEN_H)
                });
                if let Some(j) = hit {
                    self.aliens.remove(j);
                    self.bullets.remove(i);
                    self.score += KILL_POINTS;
                }
            } else if overlaps(
                b.x,
                b.y,
                BULLET_W,
                BULLET_H,
                self.player.x,
                self.player.y,
                PLAYER_W,
                PLAYER_H,
            ) {
                self.bullets.remove(i);
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    self.finish(Phase::Lost);
                    return;
                }
            }
        }
    }

    // ── Input ──────────────────────────────────────────────────────────

    fn move_player(&mut self, dx: f32) {
        self.player.x = (self.player.x + dx).clamp(0.0, FIELD_W - PLAYER_W);
    }

    /// Centers the cannon on an x given in field units.
    pub fn aim_at(&mut self, fx: f32) {
        self.player.x = (fx - PLAYER_W / 2.0).clamp(0.0, FIELD_W - PLAYER_W);
    }

    /// Every press or click spawns one shot; nothing caps the count but
    /// off-screen pruning.
    pub fn shoot(&mut self) {
        self.bullets.push(Bullet::from_player(&self.player));
    }

    fn field_x(&self, column: u16) -> Option<f32> {
        let view = self.view?;
        if view.width == 0 || column < view.x || column >= view.x + view.width {
            return None;
        }
        Some((column - view.x) as f32 / view.width as f32 * FIELD_W)
    }

    // ── Rendering ──────────────────────────────────────────────────────

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let bg = Color::Rgb(0, 0, 5);
        let mut raster = Raster::new(width, height, bg);
        let sx = raster.width() as f32 / FIELD_W;
        let sy = raster.height() as f32 / FIELD_H;

        for a in &self.aliens {
            let x = (a.x * sx) as i32;
            let y = (a.y * sy) as i32;
            let w = (ALIEN_W * sx).max(1.0) as i32;
            let h = (ALIEN_H * sy).max(1.0) as i32;
            raster.fill_rect(x, y, w, h, ALIEN_COLOR);
            // Two punched-out eyes give the block its face.
            let ew = (5.0 * sx).max(1.0) as i32;
            let eh = (5.0 * sy).max(1.0) as i32;
            let ey = y + (10.0 * sy) as i32;
            raster.erase_rect(x + (10.0 * sx) as i32, ey, ew, eh);
            raster.erase_rect(x + ((ALIEN_W - 15.0) * sx) as i32, ey, ew, eh);
        }

        for b in &self.bullets {
            let color = if b.is_player_shot() {
                PLAYER_SHOT_COLOR
            } else {
                ALIEN_SHOT_COLOR
            };
            raster.fill_rect(
                (b.x * sx) as i32,
                (b.y * sy) as i32,
                (BULLET_W * sx).max(1.0) as i32,
                (BULLET_H * sy).max(1.0) as i32,
                color,
            );
        }

        // Cannon, apex up.
        let px = (self.player.x * sx) as i32;
        let py = (self.player.y * sy) as i32;
        let pw = (PLAYER_W * sx).max(1.0) as i32;
        let ph = (PLAYER_H * sy).max(1.0) as i32;
        raster.fill_triangle(
            (px + pw / 2, py),
            (px, py + ph),
            (px + pw, py + ph),
            PLAYER_COLOR,
        );

        raster.into_lines()
    }

    fn render_overlay(&self, frame: &mut Frame, area: Rect) {
        let (title, style, hint) = match self.phase {
            Phase::Paused => (
                "GAME PAUSED",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                "P resumes",
            ),
            Phase::Won => (
                "YOU WON!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                "Press S for a new game",
            ),
            Phase::Lost => (
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                "Press S to play again",
            ),
            _ => return,
        };

        let w = 32u16.min(area.width);
        let h = 7u16.min(area.height);
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(w)) / 2,
            area.y + (area.height.saturating_sub(h)) / 2,
            w,
            h,
        );
        frame.render_widget(Clear, popup);

        let mut lines = vec![
            Line::from(Span::styled(title, style)),
            Line::from(""),
        ];
        if matches!(self.phase, Phase::Won | Phase::Lost) {
            lines.push(Line::from(Span::styled(
                format!("Final Score: {}", self.score),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::Gray),
        )));

        let popup_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Rgb(255, 0, 255)));
        frame.render_widget(
            Paragraph::new(lines)
                .block(popup_block)
                .alignment(Alignment::Center),
            popup,
        );
    }
}

impl Game for Invaders {
    fn update(&mut self) {
        self.step(&mut rand::thread_rng());
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => self.start(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.toggle_pause(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset_session(),
            _ => {
                if self.phase != Phase::Running {
                    return;
                }
                match key.code {
                    KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                        self.move_player(-PLAYER_SPEED)
                    }
                    KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                        self.move_player(PLAYER_SPEED)
                    }
                    KeyCode::Char(' ') | KeyCode::Up => self.shoot(),
                    _ => {}
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.phase != Phase::Running {
            return;
        }
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(fx) = self.field_x(mouse.column) {
                    self.aim_at(fx);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.field_x(mouse.column).is_some() {
                    self.shoot();
                }
            }
            // Right clicks are swallowed so terminals with context menus
            // stay quiet during play.
            MouseEventKind::Down(MouseButton::Right) => {}
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
            .title(" Space Invaders ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(100, 255, 100))
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

        let lives_str = "\u{2666} ".repeat(self.lives as usize);
        let status = Line::from(vec![
            Span::styled(" \u{1f47e} ", Style::default()),
            Span::styled(
                format!("Score: {} ", self.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Lives: {}", lives_str),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("High: {} ", self.high_score),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Aliens: {} ", self.aliens.len()),
                Style::default().fg(Color::Rgb(255, 80, 255)),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        self.view = Some(chunks[1]);
        let fw = chunks[1].width as usize;
        let fh = chunks[1].height as usize;
        if fw > 0 && fh > 0 {
            let lines = self.render_field(fw, fh);
            frame.render_widget(Paragraph::new(lines), chunks[1]);
        }

        let bottom = match self.phase {
            Phase::Idle => Line::from(vec![
                Span::styled(" Press ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    "S",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::DarkGray)),
            ]),
            Phase::Running => Line::from(vec![
                Span::styled(" \u{2190}\u{2192} Move ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled(
                    "Space Shoot ",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Mouse Aim+Fire ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("R Reset ", Style::default().fg(Color::DarkGray)),
                Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Esc Menu", Style::default().fg(Color::DarkGray)),
            ]),
            Phase::Paused => Line::from(Span::styled(
                " PAUSED - Press P to resume ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Phase::Won | Phase::Lost => Line::from(vec![
                Span::styled(
                    " Press S to play again, ",
                    Style::default().fg(Color::Gray),
                ),
                Span::styled("Esc for menu", Style::default().fg(Color::Gray)),
            ]),
        };
        frame.render_widget(Paragraph::new(bottom), chunks[2]);

        if matches!(self.phase, Phase::Paused | Phase::Won | Phase::Lost) {
            self.render_overlay(frame, chunks[1]);
        }
    }

    fn reset(&mut self) {
        self.reset_session();
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::Won | Phase::Lost)
    }
}
