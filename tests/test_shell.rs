use coinop::app::{App, Tab};
use coinop::games::invaders::Phase;
use coinop::scores::HighScores;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tempfile::tempdir;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        app.on_key(key(KeyCode::Char(c)));
    }
}

// ── tab navigation ────────────────────────────────────────────────────────────

#[test]
fn tab_cycles_through_all_screens() {
    let mut app = App::new();
    assert!(matches!(app.current_tab, Tab::Home));
    app.on_key(key(KeyCode::Tab));
    assert!(matches!(app.current_tab, Tab::Pong));
    app.on_key(key(KeyCode::Tab));
    assert!(matches!(app.current_tab, Tab::Invaders));
    app.on_key(key(KeyCode::Tab));
    assert!(matches!(app.current_tab, Tab::Home));
    app.on_key(key(KeyCode::BackTab));
    assert!(matches!(app.current_tab, Tab::Invaders));
}

#[test]
fn digit_shortcuts_launch_games() {
    let mut app = App::new();
    app.on_key(key(KeyCode::Char('1')));
    assert!(matches!(app.current_tab, Tab::Pong));
    app.on_key(key(KeyCode::Esc));
    assert!(matches!(app.current_tab, Tab::Home));
    app.on_key(key(KeyCode::Char('2')));
    assert!(matches!(app.current_tab, Tab::Invaders));
}

#[test]
fn arrows_select_and_enter_launches() {
    let mut app = App::new();
    assert_eq!(app.selected_game, 0);
    app.on_key(key(KeyCode::Right));
    assert_eq!(app.selected_game, 1);
    app.on_key(key(KeyCode::Enter));
    assert!(matches!(app.current_tab, Tab::Invaders));
}

#[test]
fn q_quits_only_from_home() {
    let mut app = App::new();
    app.on_key(key(KeyCode::Char('2')));
    app.on_key(key(KeyCode::Char('q')));
    assert!(!app.should_quit); // in-game q is the game's business
    app.on_key(key(KeyCode::Esc));
    app.on_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn ctrl_c_always_quits() {
    let mut app = App::new();
    app.on_key(key(KeyCode::Char('1')));
    app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}

#[test]
fn h_toggles_the_score_overlay() {
    let mut app = App::new();
    assert!(!app.show_high_scores);
    app.on_key(key(KeyCode::Char('h')));
    assert!(app.show_high_scores);
    app.on_key(key(KeyCode::Char('h')));
    assert!(!app.show_high_scores);
}

#[test]
fn mouse_without_a_rendered_field_is_harmless() {
    let mut app = App::new();
    let before = app.pong.player_y;
    app.on_mouse(MouseEvent {
        kind: MouseEventKind::Moved,
        column: 20,
        row: 10,
        modifiers: KeyModifiers::NONE,
    });
    app.on_key(key(KeyCode::Char('1')));
    app.on_mouse(MouseEvent {
        kind: MouseEventKind::Moved,
        column: 20,
        row: 10,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(app.pong.player_y, before);
}

// ── high score flow ───────────────────────────────────────────────────────────

#[test]
fn qualifying_run_prompts_for_a_name() {
    let dir = tempdir().unwrap();
    let mut app = App::new();
    app.high_scores = HighScores::load_from(dir.path().join("coinop.scores"));

    app.invaders.phase = Phase::Lost;
    app.invaders.score = 70;
    app.on_tick();
    assert!(app.entering_name);
    assert_eq!(app.name_score, 70);

    type_str(&mut app, "ab");
    assert_eq!(app.name_buffer, "AB"); // uppercased as typed
    app.on_key(key(KeyCode::Backspace));
    assert_eq!(app.name_buffer, "A");
    app.on_key(key(KeyCode::Enter));

    assert!(!app.entering_name);
    let top = app.high_scores.top_scores();
    assert_eq!(top[0].name, "A");
    assert_eq!(top[0].score, 70);
}

#[test]
fn name_entry_caps_at_nine_characters() {
    let dir = tempdir().unwrap();
    let mut app = App::new();
    app.high_scores = HighScores::load_from(dir.path().join("coinop.scores"));
    app.invaders.phase = Phase::Lost;
    app.invaders.score = 30;
    app.on_tick();

    type_str(&mut app, "abcdefghijkl");
    assert_eq!(app.name_buffer.chars().count(), 9);
}

#[test]
fn escaping_the_prompt_still_records_the_run() {
    let dir = tempdir().unwrap();
    let mut app = App::new();
    app.high_scores = HighScores::load_from(dir.path().join("coinop.scores"));
    app.invaders.phase = Phase::Won;
    app.invaders.score = 400;
    app.on_tick();
    assert!(app.entering_name);

    app.on_key(key(KeyCode::Esc));
    assert!(!app.entering_name);
    assert_eq!(app.high_scores.top_scores()[0].name, "???");
    assert_eq!(app.high_scores.top_scores()[0].score, 400);
}

#[test]
fn finished_run_is_submitted_only_once() {
    let dir = tempdir().unwrap();
    let mut app = App::new();
    app.high_scores = HighScores::load_from(dir.path().join("coinop.scores"));
    app.invaders.phase = Phase::Lost;
    app.invaders.score = 70;
    app.on_tick();
    app.on_key(key(KeyCode::Enter)); // empty buffer falls back to ???

    app.on_tick();
    assert!(!app.entering_name); // no second prompt for the same run
    assert_eq!(app.high_scores.top_scores()[1].score, 0);
}

#[test]
fn non_qualifying_run_skips_the_prompt() {
    let dir = tempdir().unwrap();
    let mut app = App::new();
    let mut hs = HighScores::load_from(dir.path().join("coinop.scores"));
    hs.submit("AAA", 300);
    hs.submit("BBB", 200);
    hs.submit("CCC", 100);
    app.high_scores = hs;

    app.invaders.phase = Phase::Lost;
    app.invaders.score = 50;
    app.on_tick();
    assert!(!app.entering_name);
    assert!(app.high_scores.was_submitted()); // run is spent regardless
}

#[test]
fn leaving_game_over_rearms_submission() {
    let dir = tempdir().unwrap();
    let mut app = App::new();
    app.high_scores = HighScores::load_from(dir.path().join("coinop.scores"));
    app.invaders.phase = Phase::Lost;
    app.invaders.score = 70;
    app.on_tick();
    app.on_key(key(KeyCode::Enter));
    assert!(app.high_scores.was_submitted());

    app.invaders.reset_session();
    app.on_tick();
    assert!(!app.high_scores.was_submitted());
}

#[test]
fn game_updates_are_suspended_during_name_entry() {
    let dir = tempdir().unwrap();
    let mut app = App::new();
    app.high_scores = HighScores::load_from(dir.path().join("coinop.scores"));
    app.current_tab = Tab::Pong;
    app.invaders.phase = Phase::Lost;
    app.invaders.score = 70;
    app.on_tick();
    assert!(app.entering_name);

    let ball_x = app.pong.ball.x;
    app.on_tick();
    assert_eq!(app.pong.ball.x, ball_x); // frozen behind the overlay
}
