mod common;

use invaders::audio::SoundCue;
use invaders::battlefield::Battlefield;
use invaders::collision::CollisionSystem;
use invaders::config::GameConfig;
use invaders::entities::{Bullet, Damageable, Enemy, Entity, Player, Ufo, Edge};

use common::context;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn field_with_enemies(cfg: &GameConfig, positions: &[(f32, f32)]) -> Battlefield {
    let mut field = Battlefield::new();
    for &(x, y) in positions {
        let id = field.ids.next_id();
        field.enemies.push(Enemy::new(id, x, y, cfg));
    }
    field
}

// ── Player bullets ────────────────────────────────────────────────────────────

#[test]
fn penetrating_bullet_damages_each_target_once() {
    let mut cfg = GameConfig::default();
    cfg.enemy.health = 5;
    let (mut ctx, _audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    let mut field = field_with_enemies(&cfg, &[(100.0, 300.0)]);
    field.bullets.player.push(Bullet::special(100.0, 310.0, &cfg.bullet));

    // Three consecutive ticks with the bullet still overlapping the enemy.
    for _ in 0..3 {
        collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());
        for bullet in &mut field.bullets.player {
            bullet.y -= 2.0;
        }
    }

    assert_eq!(field.enemies.len(), 1);
    assert_eq!(field.enemies[0].health(), 5 - cfg.bullet.special_damage);
    assert_eq!(field.bullets.player.len(), 1);
    assert_eq!(field.bullets.player[0].hit_count(), 1);
    assert_eq!(ctx.score.score(), 0);
}

#[test]
fn penetrating_bullet_damages_two_overlapped_targets_once_each() {
    let mut cfg = GameConfig::default();
    cfg.enemy.health = 5;
    let (mut ctx, _audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    // Both enemies sit inside the 48 px special bullet for all three ticks.
    let mut field = field_with_enemies(&cfg, &[(92.0, 300.0), (108.0, 300.0)]);
    field.bullets.player.push(Bullet::special(100.0, 310.0, &cfg.bullet));

    for _ in 0..3 {
        collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());
        for bullet in &mut field.bullets.player {
            bullet.y -= 2.0;
        }
    }

    assert_eq!(field.enemies.len(), 2);
    for enemy in &field.enemies {
        assert_eq!(enemy.health(), 5 - cfg.bullet.special_damage);
    }
    assert_eq!(field.bullets.player.len(), 1);
    assert_eq!(field.bullets.player[0].hit_count(), 2);
    assert_eq!(ctx.score.score(), 0);
}

#[test]
fn penetrating_bullet_passes_through_a_column() {
    let cfg = GameConfig::default();
    let (mut ctx, audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    // Special bullet is 48 px tall: two enemies stacked 30 px apart.
    let mut field = field_with_enemies(&cfg, &[(100.0, 300.0), (100.0, 330.0)]);
    field.bullets.player.push(Bullet::special(100.0, 315.0, &cfg.bullet));

    let report = collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());

    assert_eq!(report.enemies_destroyed, 2);
    assert!(field.enemies.is_empty());
    assert_eq!(field.bullets.player.len(), 1);
    assert_eq!(ctx.score.score(), 2 * cfg.score.enemy_kill);
    assert_eq!(audio.volumes(SoundCue::Explosion), vec![0.3, 0.3]);
}

#[test]
fn normal_bullet_hits_exactly_one_target() {
    let cfg = GameConfig::default();
    let (mut ctx, audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    let mut field = field_with_enemies(&cfg, &[(100.0, 300.0), (104.0, 300.0)]);
    let second = field.enemies[1].id();
    field.bullets.player.push(Bullet::normal(102.0, 300.0, &cfg.bullet));

    let report = collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());

    assert_eq!(report.enemies_destroyed, 1);
    assert_eq!(field.enemies.len(), 1);
    assert_eq!(field.enemies[0].id(), second, "first enemy in order takes the hit");
    assert!(field.bullets.player.is_empty(), "spent bullet removed in the same pass");
    assert_eq!(ctx.score.score(), cfg.score.enemy_kill);
    assert_eq!(audio.count(SoundCue::Explosion), 1);
}

#[test]
fn ufo_kill_scores_bonus_points() {
    let cfg = GameConfig::default();
    let (mut ctx, audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    let mut field = Battlefield::new();
    let mut ufo = Ufo::new(field.ids.next_id(), Edge::Left, &cfg);
    ufo.x = 150.0;
    let (x, y) = ufo.position();
    field.ufo = Some(ufo);
    field.bullets.player.push(Bullet::normal(x, y, &cfg.bullet));

    let report = collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());

    assert!(report.ufo_destroyed);
    assert!(field.ufo.is_none());
    assert_eq!(ctx.score.score(), cfg.score.ufo_kill);
    assert_eq!(audio.volumes(SoundCue::Explosion), vec![0.4]);
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn entering_boss_cannot_be_hit() {
    let cfg = GameConfig::default();
    let (mut ctx, _audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    let mut field = Battlefield::new();
    field.spawn_boss(&cfg);
    let boss = field.boss.as_mut().unwrap();
    boss.y = 50.0;
    assert!(boss.is_entering());
    field.bullets.player.push(Bullet::normal(boss.x, boss.y, &cfg.bullet));

    collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());

    let boss = field.boss.as_ref().unwrap();
    assert_eq!(boss.health(), cfg.boss.health);
    assert_eq!(field.bullets.player.len(), 1);
}

#[test]
fn boss_damage_and_defeat_cues() {
    let mut cfg = GameConfig::default();
    cfg.boss.health = 2;
    let (mut ctx, audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    let mut field = Battlefield::new();
    field.spawn_boss(&cfg);
    let boss = field.boss.as_mut().unwrap();
    boss.finish_entry();
    let (x, y) = boss.position();

    field.bullets.player.push(Bullet::normal(x, y, &cfg.bullet));
    let report = collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());
    assert!(!report.boss_defeated);
    assert_eq!(audio.count(SoundCue::BossDamage), 1);
    assert_eq!(field.boss.as_ref().unwrap().health(), 1);

    field.bullets.player.push(Bullet::normal(x, y, &cfg.bullet));
    let report = collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());
    assert!(report.boss_defeated);
    assert!(field.boss.is_none());
    assert_eq!(ctx.score.score(), cfg.score.boss_kill);
    assert_eq!(audio.count(SoundCue::BossDestroyed), 1);
    assert_eq!(audio.volumes(SoundCue::Explosion), vec![0.5]);
}

// ── Player ────────────────────────────────────────────────────────────────────

fn field_with_player(cfg: &GameConfig) -> Battlefield {
    let mut field = Battlefield::new();
    let id = field.ids.next_id();
    field.player = Some(Player::new(id, 180.0, 590.0, cfg));
    field
}

#[test]
fn breach_and_overlap_report_a_single_game_over() {
    let cfg = GameConfig::default();
    let (mut ctx, _audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    let mut field = field_with_player(&cfg);
    // Below the breach line and on top of the player at once.
    let id = field.ids.next_id();
    field.enemies.push(Enemy::new(id, 180.0, 590.0, &cfg));

    let report = collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());
    assert!(report.game_over);
}

#[test]
fn swarm_checks_wait_for_collision_enable() {
    let cfg = GameConfig::default();
    let (mut ctx, _audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    let mut field = field_with_player(&cfg);
    let id = field.ids.next_id();
    field.enemies.push(Enemy::new(id, 180.0, 590.0, &cfg));

    let report = collision.check_all(&mut field, false, &mut ctx.score, ctx.audio.as_mut());
    assert!(!report.game_over);
}

#[test]
fn shrunk_boxes_forgive_grazing_contact() {
    let cfg = GameConfig::default();
    let (mut ctx, _audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    // Player box spans x 148..212; enemy box 206..254 overlaps by 6 px,
    // which the 0.8 shrink removes.
    let mut field = field_with_player(&cfg);
    let id = field.ids.next_id();
    field.enemies.push(Enemy::new(id, 230.0, 520.0, &cfg));

    let report = collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());
    assert!(!report.game_over);
}

#[test]
fn enemy_bullet_kills_the_player() {
    let cfg = GameConfig::default();
    let (mut ctx, _audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    let mut field = field_with_player(&cfg);
    field.bullets.enemy.push(Bullet::enemy(180.0, 590.0, &cfg.bullet));

    let report = collision.check_all(&mut field, false, &mut ctx.score, ctx.audio.as_mut());
    assert!(report.game_over);
    assert!(!field.player_active());
    assert!(field.bullets.enemy.is_empty());
}

#[test]
fn god_mode_ignores_every_player_hazard() {
    let mut cfg = GameConfig::default();
    cfg.debug.god_mode = true;
    let (mut ctx, _audio) = context(cfg.clone());
    let collision = CollisionSystem::new(&cfg);

    let mut field = field_with_player(&cfg);
    let id = field.ids.next_id();
    field.enemies.push(Enemy::new(id, 180.0, 590.0, &cfg));
    field.bullets.enemy.push(Bullet::enemy(180.0, 590.0, &cfg.bullet));

    let report = collision.check_all(&mut field, true, &mut ctx.score, ctx.audio.as_mut());
    assert!(!report.game_over);
    assert!(field.player_active());
}
