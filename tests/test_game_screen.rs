mod common;

use invaders::config::GameConfig;
use invaders::entities::{Bullet, Entity};
use invaders::render::Sprite;
use invaders::screens::{GameContext, GameScreen, Screen, ScreenId, Transition};
use invaders::snapshot::HudSnapshot;

use common::{context, RecordingCanvas, DT};

fn started(cfg: GameConfig) -> (GameScreen, GameContext) {
    let (mut ctx, _audio) = context(cfg);
    let mut screen = GameScreen::new(Some(42));
    screen.enter(&mut ctx).unwrap();
    (screen, ctx)
}

/// Run `n` steps and collect every switch requested.
fn run(screen: &mut GameScreen, ctx: &mut GameContext, n: usize) -> Vec<ScreenId> {
    let mut switches = Vec::new();
    for _ in 0..n {
        if let Transition::Switch(id) = screen.update(DT, ctx).unwrap() {
            switches.push(id);
        }
    }
    switches
}

fn count(switches: &[ScreenId], id: ScreenId) -> usize {
    switches.iter().filter(|&&s| s == id).count()
}

// ── Session start ─────────────────────────────────────────────────────────────

#[test]
fn enter_starts_a_fresh_session() {
    let (mut ctx, _audio) = context(GameConfig::default());
    ctx.score.add_score(50);

    let mut screen = GameScreen::new(Some(1));
    screen.enter(&mut ctx).unwrap();

    let field = screen.battlefield();
    assert_eq!(field.enemies.len(), 40);
    assert!(field.player_active());
    assert!(field.bullets.player.is_empty());
    assert!(field.ufo.is_none() && field.boss.is_none());
    assert_eq!(ctx.score.score(), 0);
    assert_eq!(ctx.score.high_score(), 50);
    assert!(!screen.collision_enabled());
}

#[test]
fn collision_enables_after_one_second() {
    let (mut screen, mut ctx) = started(GameConfig::default());
    run(&mut screen, &mut ctx, 59);
    assert!(!screen.collision_enabled());
    run(&mut screen, &mut ctx, 2);
    assert!(screen.collision_enabled());
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn simultaneous_game_over_conditions_fire_once() {
    let (mut screen, mut ctx) = started(GameConfig::default());
    assert!(run(&mut screen, &mut ctx, 130).is_empty());

    // Breached and touching the player in the same tick.
    let (px, py) = screen.battlefield().player.as_ref().unwrap().position();
    let enemy = &mut screen.battlefield_mut().enemies[0];
    enemy.x = px;
    enemy.y = py;

    let switches = run(&mut screen, &mut ctx, 120);
    assert_eq!(count(&switches, ScreenId::GameOver), 1);
    assert_eq!(switches.len(), 1);
    assert!(screen.is_game_over());
    assert!(!screen.battlefield().player_active());
}

#[test]
fn game_over_waits_for_the_grace_period() {
    let (mut screen, mut ctx) = started(GameConfig::default());
    let (px, py) = screen.battlefield().player.as_ref().unwrap().position();
    let enemy = &mut screen.battlefield_mut().enemies[0];
    enemy.x = px;
    enemy.y = py;

    run(&mut screen, &mut ctx, 100);
    assert!(!screen.is_game_over());
    assert_eq!(screen.pending_transition(), None);

    let switches = run(&mut screen, &mut ctx, 120);
    assert!(screen.is_game_over());
    assert_eq!(switches, vec![ScreenId::GameOver]);
}

#[test]
fn shots_in_flight_do_not_score_after_game_over() {
    let cfg = GameConfig::default();
    let (mut screen, mut ctx) = started(cfg.clone());
    run(&mut screen, &mut ctx, 130);

    let (px, py) = screen.battlefield().player.as_ref().unwrap().position();
    let enemy = &mut screen.battlefield_mut().enemies[0];
    enemy.x = px;
    enemy.y = py;
    run(&mut screen, &mut ctx, 1);
    assert!(screen.is_game_over());

    let score = ctx.score.score();
    let field = screen.battlefield_mut();
    let enemies = field.enemies.len();
    let (ex, ey) = field.enemies[1].position();
    field.bullets.player.push(Bullet::normal(ex, ey, &cfg.bullet));

    assert!(run(&mut screen, &mut ctx, 1).is_empty());
    assert_eq!(ctx.score.score(), score);
    assert_eq!(screen.battlefield().enemies.len(), enemies);

    // The switch still arrives on schedule.
    let switches = run(&mut screen, &mut ctx, 60);
    assert_eq!(switches, vec![ScreenId::GameOver]);
    assert_eq!(ctx.score.score(), score);
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_arrives_after_the_swarm_is_gone() {
    let (mut screen, mut ctx) = started(GameConfig::default());
    screen.battlefield_mut().enemies.clear();

    run(&mut screen, &mut ctx, 1);
    assert!(screen.boss_warning());
    let mut hud = HudSnapshot::default();
    screen.snapshot(&mut hud);
    assert!(hud.boss_warning);

    let mut canvas = RecordingCanvas::default();
    screen.render(&mut canvas, &ctx).unwrap();
    assert!(canvas.has_text("WARNING"));

    // Spawn delay is 3.5 s.
    run(&mut screen, &mut ctx, 200);
    assert!(screen.battlefield().boss.is_none());
    run(&mut screen, &mut ctx, 20);
    let boss = screen.battlefield().boss.as_ref().expect("boss spawned");
    assert!(boss.is_entering());
    assert!(!screen.boss_warning());
}

#[test]
fn boss_defeat_scores_once_and_clears_once() {
    let mut cfg = GameConfig::default();
    cfg.boss.health = 1;
    let (mut screen, mut ctx) = started(cfg.clone());

    let field = screen.battlefield_mut();
    field.enemies.clear();
    field.spawn_boss(&cfg);
    let boss = field.boss.as_mut().unwrap();
    boss.finish_entry();
    let (bx, by) = boss.position();
    field.bullets.player.push(Bullet::normal(bx, by, &cfg.bullet));

    let switches = run(&mut screen, &mut ctx, 1);
    assert!(switches.is_empty());
    assert!(screen.battlefield().boss.is_none());
    assert!(screen.is_cleared());
    assert_eq!(ctx.score.score(), cfg.score.boss_kill);

    // Requested within one second of the kill.
    let switches = run(&mut screen, &mut ctx, 60);
    assert_eq!(switches, vec![ScreenId::GameClear]);
    assert_eq!(ctx.score.score(), cfg.score.boss_kill);

    // No second boss and no second request.
    let switches = run(&mut screen, &mut ctx, 300);
    assert!(switches.is_empty());
    assert!(screen.battlefield().boss.is_none());
    assert!(!screen.boss_warning());
}

#[test]
fn ufo_waits_while_the_boss_is_up() {
    let (mut screen, mut ctx) = started(GameConfig::default());
    let field = screen.battlefield_mut();
    field.enemies.clear();
    field.spawn_boss(&ctx.config);

    let timer = screen.ufo_spawner().timer();
    run(&mut screen, &mut ctx, 120);
    assert_eq!(screen.ufo_spawner().timer(), timer);
    assert!(screen.battlefield().ufo.is_none());
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn render_draws_every_entity() {
    let (mut screen, mut ctx) = started(GameConfig::default());
    run(&mut screen, &mut ctx, 1);

    let mut canvas = RecordingCanvas::default();
    screen.render(&mut canvas, &ctx).unwrap();
    assert_eq!(canvas.sprite_count(Sprite::Enemy), 40);
    assert_eq!(canvas.sprite_count(Sprite::Player), 1);
    assert!(!canvas.has_text("WARNING"));

    let mut hud = HudSnapshot::default();
    screen.snapshot(&mut hud);
    assert_eq!(hud.enemies_left, 40);
    assert_eq!(hud.special_uses, 5);
    assert_eq!(hud.boss_health, None);
}
