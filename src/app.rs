use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::games::invaders::Invaders;
use crate::games::pong::Pong;
use crate::games::Game;
use crate::scores::HighScores;

const MAX_NAME_LEN: usize = 9;

#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    Home,
    Pong,
    Invaders,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Pong, Tab::Invaders]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Pong => " Pong ",
            Tab::Invaders => " Invaders ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Pong => 1,
            Tab::Invaders => 2,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize, // 0-1 for home screen game selection
    pub pong: Pong,
    pub invaders: Invaders,
    pub high_scores: HighScores,
    pub show_high_scores: bool,
    // Name entry state
    pub entering_name: bool,
    pub name_buffer: String,
    pub name_score: u32,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Home,
            selected_game: 0,
            pong: Pong::new(),
            invaders: Invaders::new(),
            high_scores: HighScores::load(),
            show_high_scores: false,
            entering_name: false,
            name_buffer: String::new(),
            name_score: 0,
        }
    }

    pub fn on_tick(&mut self) {
        // Don't update games while entering a name
        if self.entering_name {
            return;
        }

        match self.current_tab {
            Tab::Home => {}
            Tab::Pong => self.pong.update(),
            Tab::Invaders => self.invaders.update(),
        }
        self.check_submit_score();
    }

    /// Pong is free play; only a finished invaders run can post a score.
    fn check_submit_score(&mut self) {
        let game_over = self.invaders.is_game_over();
        let score = self.invaders.get_score();
        if game_over && score > 0 && !self.high_scores.was_submitted() {
            if self.high_scores.qualifies(score) {
                // Prompt for name entry
                self.entering_name = true;
                self.name_buffer.clear();
                self.name_score = score;
            }
            self.high_scores.mark_submitted();
        }
        if !game_over && self.high_scores.was_submitted() {
            self.high_scores.clear_submitted();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // If entering a name, intercept all input
        if self.entering_name {
            self.handle_name_input(key);
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if matches!(self.current_tab, Tab::Home) {
                    self.should_quit = true;
                    return;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc => {
                if !matches!(self.current_tab, Tab::Home) {
                    self.current_tab = Tab::Home;
                    return;
                }
            }
            _ => {}
        }

        // Home screen shortcuts and navigation
        if matches!(self.current_tab, Tab::Home) && key.modifiers.is_empty() {
            match key.code {
                KeyCode::Char('1') => {
                    self.current_tab = Tab::Pong;
                    return;
                }
                KeyCode::Char('2') => {
                    self.current_tab = Tab::Invaders;
                    return;
                }
                KeyCode::Char('h') | KeyCode::Char('H') => {
                    self.show_high_scores = !self.show_high_scores;
                    return;
                }
                // Arrow keys hop between the two tiles
                KeyCode::Right | KeyCode::Left => {
                    self.selected_game = 1 - self.selected_game;
                    return;
                }
                // Enter launches the selected game
                KeyCode::Enter => {
                    self.current_tab = match self.selected_game {
                        0 => Tab::Pong,
                        _ => Tab::Invaders,
                    };
                    return;
                }
                _ => {}
            }
        }

        // Forward to active game
        match self.current_tab {
            Tab::Home => {}
            Tab::Pong => self.pong.handle_input(key),
            Tab::Invaders => self.invaders.handle_input(key),
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.entering_name {
            return;
        }
        match self.current_tab {
            Tab::Home => {}
            Tab::Pong => self.pong.handle_mouse(mouse),
            Tab::Invaders => self.invaders.handle_mouse(mouse),
        }
    }

    fn handle_name_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                // Submit the score with the entered name
                let name = if self.name_buffer.is_empty() {
                    "???".to_string()
                } else {
                    self.name_buffer.clone()
                };
                self.high_scores.submit(&name, self.name_score);
                self.entering_name = false;
                self.name_buffer.clear();
            }
            KeyCode::Backspace => {
                self.name_buffer.pop();
            }
            KeyCode::Esc => {
                // Cancel still submits, under the default name
                self.high_scores.submit("???", self.name_score);
                self.entering_name = false;
                self.name_buffer.clear();
            }
            KeyCode::Char(c) => {
                // Only allow printable ASCII characters, up to MAX_NAME_LEN
                if self.name_buffer.chars().count() < MAX_NAME_LEN && c.is_ascii_graphic() {
                    self.name_buffer.push(c.to_ascii_uppercase());
                }
            }
            _ => {}
        }
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + 1) % tabs.len()];
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + tabs.len() - 1) % tabs.len()];
    }
}
