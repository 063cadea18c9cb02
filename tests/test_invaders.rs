use coinop::games::invaders::*;
use coinop::games::Game;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn running_game() -> Invaders {
    let mut g = Invaders::new();
    g.start();
    g
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

/// Rng whose every draw is zero, so any nonzero fire chance triggers and
/// every alien shoots.
struct AlwaysFire;

impl RngCore for AlwaysFire {
    fn next_u32(&mut self) -> u32 {
        0
    }
    fn next_u64(&mut self) -> u64 {
        0
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        dest.fill(0);
        Ok(())
    }
}

// ── session lifecycle ─────────────────────────────────────────────────────────

#[test]
fn new_game_is_idle_with_full_formation() {
    let g = Invaders::new();
    assert_eq!(g.phase, Phase::Idle);
    assert_eq!(g.aliens.len(), 40); // 5 rows x 8 cols
    assert_eq!(g.lives, 3);
    assert_eq!(g.score, 0);
    assert!(g.bullets.is_empty());
    assert_eq!(g.player.x, 275.0); // centered
    assert_eq!(g.player.y, 350.0); // 20 above the bottom margin
}

#[test]
fn start_from_idle_runs() {
    let mut g = Invaders::new();
    g.start();
    assert_eq!(g.phase, Phase::Running);
}

#[test]
fn start_after_loss_reinitializes() {
    let mut g = running_game();
    g.score = 120;
    g.lives = 1;
    g.phase = Phase::Lost;
    g.aliens.truncate(3);
    g.start();
    assert_eq!(g.phase, Phase::Running);
    assert_eq!(g.score, 0);
    assert_eq!(g.lives, 3);
    assert_eq!(g.aliens.len(), 40);
}

#[test]
fn pause_toggles_and_freezes() {
    let mut g = running_game();
    g.toggle_pause();
    assert_eq!(g.phase, Phase::Paused);

    let before_x = g.aliens[0].x;
    g.step(&mut seeded_rng());
    assert_eq!(g.timer, 0); // frozen
    assert_eq!(g.aliens[0].x, before_x);

    g.toggle_pause();
    assert_eq!(g.phase, Phase::Running);
}

#[test]
fn pause_has_no_effect_when_idle() {
    let mut g = Invaders::new();
    g.toggle_pause();
    assert_eq!(g.phase, Phase::Idle);
}

#[test]
fn reset_returns_to_idle() {
    let mut g = running_game();
    g.score = 50;
    g.shoot();
    g.reset_session();
    assert_eq!(g.phase, Phase::Idle);
    assert_eq!(g.score, 0);
    assert_eq!(g.aliens.len(), 40);
    assert!(g.bullets.is_empty());
}

#[test]
fn step_is_noop_before_start() {
    let mut g = Invaders::new();
    let before_x = g.aliens[0].x;
    g.step(&mut seeded_rng());
    assert_eq!(g.timer, 0);
    assert_eq!(g.aliens[0].x, before_x);
}

// ── formation movement ────────────────────────────────────────────────────────

#[test]
fn formation_grid_layout() {
    let g = Invaders::new();
    assert_eq!(g.aliens[0].x, 80.0);
    assert_eq!(g.aliens[0].y, 50.0);
    assert_eq!(g.aliens[7].x, 500.0); // 80 + 7 * 60
    assert_eq!(g.aliens[39].y, 210.0); // 50 + 4 * 40
    assert!(g.aliens.iter().all(|a| a.dir == 1.0));
}

#[test]
fn formation_marches_half_unit_per_frame() {
    let mut g = running_game();
    g.step(&mut seeded_rng());
    assert_eq!(g.aliens[0].x, 80.5);
    assert_eq!(g.aliens[0].y, 50.0); // no drop away from the edges
}

#[test]
fn left_edge_drops_and_reverses_whole_group() {
    let mut g = running_game();
    g.aliens = vec![
        Alien { x: 0.0, y: 50.0, dir: -1.0 },
        Alien { x: 300.0, y: 50.0, dir: -1.0 },
    ];
    g.step(&mut seeded_rng());
    // Movement lands first, then the edge scan flips everyone.
    assert_eq!(g.aliens[0].x, -0.5);
    assert_eq!(g.aliens[1].x, 299.5);
    for a in &g.aliens {
        assert_eq!(a.y, 65.0); // 50 + 15 drop
        assert_eq!(a.dir, 1.0);
    }
}

#[test]
fn right_edge_drops_and_reverses_whole_group() {
    let mut g = running_game();
    g.aliens = vec![
        Alien { x: 549.5, y: 50.0, dir: 1.0 },
        Alien { x: 200.0, y: 50.0, dir: 1.0 },
    ];
    g.step(&mut seeded_rng());
    // 550 + 40 hits the right margin at 590.
    for a in &g.aliens {
        assert_eq!(a.y, 65.0);
        assert_eq!(a.dir, -1.0);
    }
}

#[test]
fn formation_reaching_cannon_row_loses() {
    let mut g = running_game();
    g.aliens = vec![Alien { x: 300.0, y: 320.0, dir: 1.0 }];
    g.bullets.push(Bullet { x: 0.0, y: 200.0, dy: -8.0 });
    g.step(&mut seeded_rng());
    assert_eq!(g.phase, Phase::Lost);
    // The loss preempts the bullet pass.
    assert_eq!(g.bullets[0].y, 200.0);
}

// ── player control ────────────────────────────────────────────────────────────

#[test]
fn player_clamps_at_both_walls() {
    let mut g = running_game();
    for _ in 0..200 {
        g.handle_input(key(KeyCode::Left));
    }
    assert_eq!(g.player.x, 0.0);
    for _ in 0..300 {
        g.handle_input(key(KeyCode::Right));
    }
    assert_eq!(g.player.x, FIELD_W - PLAYER_W);
}

#[test]
fn aim_at_centers_and_clamps() {
    let mut g = running_game();
    g.aim_at(300.0);
    assert_eq!(g.player.x, 275.0); // 300 - half the cannon
    g.aim_at(-50.0);
    assert_eq!(g.player.x, 0.0);
    g.aim_at(700.0);
    assert_eq!(g.player.x, FIELD_W - PLAYER_W);
}

#[test]
fn letter_keys_alias_the_arrows() {
    let mut g = running_game();
    let x0 = g.player.x;
    g.handle_input(key(KeyCode::Char('a')));
    assert_eq!(g.player.x, x0 - 5.0);
    g.handle_input(key(KeyCode::Char('d')));
    g.handle_input(key(KeyCode::Char('D')));
    assert_eq!(g.player.x, x0 + 5.0);
}

#[test]
fn movement_and_fire_ignored_unless_running() {
    let mut g = Invaders::new();
    let start_x = g.player.x;
    g.handle_input(key(KeyCode::Left));
    g.handle_input(key(KeyCode::Char(' ')));
    assert_eq!(g.player.x, start_x);
    assert!(g.bullets.is_empty());
}

#[test]
fn shooting_is_uncapped() {
    let mut g = running_game();
    for _ in 0..10 {
        g.handle_input(key(KeyCode::Char(' ')));
    }
    assert_eq!(g.bullets.len(), 10);
    assert!(g.bullets.iter().all(|b| b.is_player_shot()));
    // Shots leave the cannon's center top.
    assert!(approx(g.bullets[0].x, 298.5));
    assert_eq!(g.bullets[0].y, g.player.y);
}

// ── bullet pass ───────────────────────────────────────────────────────────────

#[test]
fn bullets_move_and_offscreen_ones_are_pruned() {
    let mut g = running_game();
    g.bullets = vec![
        Bullet { x: 0.0, y: 5.0, dy: -8.0 },   // exits the top
        Bullet { x: 0.0, y: 398.0, dy: 5.0 },  // exits the bottom
        Bullet { x: 0.0, y: 200.0, dy: -8.0 }, // stays in flight
    ];
    g.step(&mut seeded_rng());
    assert_eq!(g.bullets.len(), 1);
    assert_eq!(g.bullets[0].y, 192.0);
}

#[test]
fn kill_removes_alien_and_bullet_and_scores() {
    let mut g = running_game();
    g.aliens = vec![Alien { x: 100.0, y: 100.0, dir: 1.0 }];
    g.bullets = vec![Bullet { x: 100.0, y: 100.0, dy: -8.0 }];
    g.step(&mut seeded_rng());
    assert!(g.aliens.is_empty());
    assert!(g.bullets.is_empty());
    assert_eq!(g.score, 10);
    // The win is only observed on the next pass.
    assert_eq!(g.phase, Phase::Running);
    g.step(&mut seeded_rng());
    assert_eq!(g.phase, Phase::Won);
}

#[test]
fn won_session_stops_simulating() {
    let mut g = running_game();
    g.aliens.clear();
    g.step(&mut seeded_rng());
    assert_eq!(g.phase, Phase::Won);
    let timer = g.timer;
    g.step(&mut seeded_rng());
    assert_eq!(g.timer, timer);
}

#[test]
fn one_bullet_kills_one_alien() {
    let mut g = running_game();
    // Both aliens overlap the shot; the later-listed one absorbs it.
    g.aliens = vec![
        Alien { x: 100.0, y: 100.0, dir: 1.0 },
        Alien { x: 102.0, y: 100.0, dir: 1.0 },
    ];
    g.bullets = vec![Bullet { x: 101.0, y: 100.0, dy: -8.0 }];
    g.step(&mut seeded_rng());
    assert_eq!(g.aliens.len(), 1);
    assert!(approx(g.aliens[0].x, 100.5));
    assert_eq!(g.score, 10);
}

#[test]
fn alien_shot_costs_a_life() {
    let mut g = running_game();
    g.bullets = vec![Bullet { x: 280.0, y: 340.0, dy: 5.0 }];
    g.step(&mut seeded_rng());
    assert_eq!(g.lives, 2);
    assert!(g.bullets.is_empty());
    assert_eq!(g.phase, Phase::Running);
}

#[test]
fn last_life_halts_the_frame_midpass() {
    let mut g = running_game();
    g.lives = 1;
    g.aliens = vec![Alien { x: 100.0, y: 100.0, dir: 1.0 }];
    g.bullets = vec![
        // Would kill the alien, but sits earlier in the list than the
        // fatal shot and the pass walks backward.
        Bullet { x: 100.0, y: 130.0, dy: -8.0 },
        Bullet { x: 280.0, y: 340.0, dy: 5.0 },
    ];
    g.step(&mut seeded_rng());
    assert_eq!(g.phase, Phase::Lost);
    assert_eq!(g.lives, 0);
    assert_eq!(g.aliens.len(), 1); // never reached
    assert_eq!(g.bullets.len(), 1);
    assert_eq!(g.bullets[0].y, 130.0); // never moved
    assert_eq!(g.score, 0);

    // The sim is halted for good; later frames change nothing.
    let player_x = g.player.x;
    g.step(&mut seeded_rng());
    assert_eq!(g.phase, Phase::Lost);
    assert_eq!(g.bullets.len(), 1);
    assert_eq!(g.player.x, player_x);
}

// ── alien fire ────────────────────────────────────────────────────────────────

#[test]
fn fire_chance_curve() {
    assert_eq!(alien_fire_chance(0), 0.0);
    assert_eq!(alien_fire_chance(299), 0.0);
    assert!(approx(alien_fire_chance(300), 0.00055));
    assert!(approx(alien_fire_chance(6000), 0.0015));
    assert!(approx(alien_fire_chance(9000), 0.002)); // capped
    assert!(approx(alien_fire_chance(1_000_000), 0.002));
}

#[test]
fn aliens_hold_fire_during_grace_period() {
    let mut g = running_game();
    g.aliens = vec![Alien { x: 100.0, y: 100.0, dir: 1.0 }];
    g.timer = 100;
    g.step(&mut AlwaysFire);
    assert!(g.bullets.is_empty());
}

#[test]
fn aliens_fire_downward_after_grace_period() {
    let mut g = running_game();
    g.aliens = vec![Alien { x: 100.0, y: 100.0, dir: 1.0 }];
    g.timer = 299; // crosses the gate on this step
    g.step(&mut AlwaysFire);
    assert_eq!(g.bullets.len(), 1);
    let b = g.bullets[0];
    assert!(!b.is_player_shot());
    assert_eq!(b.dy, ALIEN_SHOT_SPEED);
    // Spawned under the alien's post-march center.
    assert!(approx(b.x, 100.5 + ALIEN_W / 2.0 - BULLET_W / 2.0));
    assert!(approx(b.y, 100.0 + ALIEN_H + ALIEN_SHOT_SPEED)); // already advanced once
}

// ── trait surface ─────────────────────────────────────────────────────────────

#[test]
fn game_over_reporting() {
    let mut g = running_game();
    assert!(!g.is_game_over());
    g.phase = Phase::Paused;
    assert!(!g.is_game_over());
    g.phase = Phase::Won;
    assert!(g.is_game_over());
    g.phase = Phase::Lost;
    assert!(g.is_game_over());
    g.score = 70;
    assert_eq!(g.get_score(), 70);
}

#[test]
fn keyboard_drives_the_lifecycle() {
    let mut g = Invaders::new();
    g.handle_input(key(KeyCode::Char('s')));
    assert_eq!(g.phase, Phase::Running);
    g.handle_input(key(KeyCode::Char('p')));
    assert_eq!(g.phase, Phase::Paused);
    g.handle_input(key(KeyCode::Char('s'))); // start also resumes
    assert_eq!(g.phase, Phase::Running);
    g.handle_input(key(KeyCode::Char('r')));
    assert_eq!(g.phase, Phase::Idle);
    g.handle_input(key(KeyCode::Enter));
    assert_eq!(g.phase, Phase::Running);
}

#[test]
fn same_seed_same_run() {
    let mut a = running_game();
    let mut b = running_game();
    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);
    for _ in 0..600 {
        a.step(&mut rng_a);
        b.step(&mut rng_b);
    }
    assert_eq!(a.phase, b.phase);
    assert_eq!(a.score, b.score);
    assert_eq!(a.lives, b.lives);
    assert_eq!(a.aliens.len(), b.aliens.len());
    assert_eq!(a.bullets.len(), b.bullets.len());
    for (x, y) in a.aliens.iter().zip(b.aliens.iter()) {
        assert_eq!(x.x, y.x);
        assert_eq!(x.y, y.y);
    }
}
