//! Collision resolution for one simulation step.
//!
//! This is the single place where bullets meet targets and the swarm meets
//! the player. It applies damage, scores kills, asks for sound cues and
//! drops dead entities from their collections. Screen transitions are only
//! *reported*; the game screen decides whether to act on them.

use tracing::{debug, info};

use crate::audio::{Audio, SoundCue};
use crate::battlefield::Battlefield;
use crate::config::GameConfig;
use crate::entities::{overlaps, shrink, Bullet, Damageable, Entity};
use crate::score::ScoreManager;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_destroyed: u32,
    pub ufo_destroyed: bool,
    pub boss_defeated: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct CollisionSystem {
    /// Enemies whose bottom edge passes this y have breached the defence.
    breach_line: f32,
    adjustment: f32,
    enemy_bullets_hit_player: bool,
    god_mode: bool,
}

impl CollisionSystem {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            breach_line: cfg.canvas.height * cfg.collision.game_over_threshold,
            adjustment: cfg.collision.adjustment_factor,
            enemy_bullets_hit_player: cfg.collision.enemy_bullets_hit_player,
            god_mode: cfg.debug.god_mode,
        }
    }

    /// Resolve every interaction for this step. `collision_enabled` gates
    /// the player-vs-swarm checks only.
    pub fn check_all(
        &self,
        field: &mut Battlefield,
        collision_enabled: bool,
        score: &mut ScoreManager,
        audio: &mut dyn Audio,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();

        self.check_player_bullets(field, score, audio, &mut report);

        if !self.god_mode {
            if self.enemy_bullets_hit_player {
                self.check_enemy_bullets(field, &mut report);
            }
            if collision_enabled && !report.game_over {
                self.check_player_enemy(field, &mut report);
            }
        }

        report
    }

    fn check_player_bullets(
        &self,
        field: &mut Battlefield,
        score: &mut ScoreManager,
        audio: &mut dyn Audio,
        report: &mut CollisionReport,
    ) {
        let Battlefield {
            enemies,
            bullets,
            ufo,
            boss,
            ..
        } = field;

        for bullet in bullets.player.iter_mut() {
            if !bullet.is_active() {
                continue;
            }

            for enemy in enemies.iter_mut() {
                if !enemy.is_active() || !overlaps(bullet.bounds(), enemy.bounds()) {
                    continue;
                }
                if strike(bullet, enemy) == Some(true) {
                    enemy.deactivate();
                    score.add_score(enemy.points());
                    audio.play(SoundCue::Explosion, 0.3);
                    report.enemies_destroyed += 1;
                }
                if !bullet.is_active() {
                    break;
                }
            }

            if let Some(target) = ufo.as_mut() {
                if bullet.is_active()
                    && target.is_active()
                    && overlaps(bullet.bounds(), target.bounds())
                    && strike(bullet, target) == Some(true)
                {
                    target.deactivate();
                    score.add_score(target.points());
                    audio.play(SoundCue::Explosion, 0.4);
                    report.ufo_destroyed = true;
                    info!("ufo destroyed");
                }
            }

            if let Some(target) = boss.as_mut() {
                if bullet.is_active()
                    && target.is_active()
                    && !target.is_entering()
                    && overlaps(bullet.bounds(), target.bounds())
                {
                    match strike(bullet, target) {
                        Some(true) => {
                            target.deactivate();
                            score.add_score(target.points());
                            audio.play(SoundCue::BossDestroyed, 1.0);
                            audio.play(SoundCue::Explosion, 0.5);
                            report.boss_defeated = true;
                            info!("boss defeated");
                        }
                        Some(false) => {
                            audio.play(SoundCue::BossDamage, 1.0);
                            debug!(health = target.health(), "boss hit");
                        }
                        None => {}
                    }
                }
            }
        }

        bullets.player.retain(Bullet::is_active);
        enemies.retain(|e| e.is_active());
        if ufo.as_ref().is_some_and(|u| !u.is_active()) {
            *ufo = None;
        }
        if boss.as_ref().is_some_and(|b| !b.is_active()) {
            *boss = None;
        }
    }

    fn check_enemy_bullets(&self, field: &mut Battlefield, report: &mut CollisionReport) {
        let Battlefield {
            player, bullets, ..
        } = field;
        let Some(player) = player.as_mut().filter(|p| p.is_active()) else {
            return;
        };

        for bullet in bullets.enemy.iter_mut() {
            if !bullet.is_active() || !overlaps(bullet.bounds(), player.bounds()) {
                continue;
            }
            bullet.deactivate();
            if player.take_damage(1) {
                player.deactivate();
                report.game_over = true;
                info!("player destroyed by enemy fire");
                break;
            }
        }
        bullets.enemy.retain(Bullet::is_active);
    }

    fn check_player_enemy(&self, field: &Battlefield, report: &mut CollisionReport) {
        let Some(player) = field.player.as_ref().filter(|p| p.is_active()) else {
            return;
        };
        let player_box = shrink(player.bounds(), self.adjustment);

        for enemy in field.enemies.iter().filter(|e| e.is_active()) {
            if enemy.bottom() > self.breach_line {
                info!(y = enemy.y, "enemy breached the defence line");
                report.game_over = true;
                return;
            }
            if overlaps(player_box, shrink(enemy.bounds(), self.adjustment)) {
                info!("player collided with an enemy");
                report.game_over = true;
                return;
            }
        }
    }
}

/// Apply `bullet` to `target`. `None` means the target was skipped because
/// this penetrating bullet already hit it; otherwise whether it died.
/// Non-penetrating bullets are spent by the hit.
fn strike(bullet: &mut Bullet, target: &mut dyn Damageable) -> Option<bool> {
    if bullet.is_penetrating() {
        if !bullet.record_hit(target.id()) {
            return None;
        }
    } else {
        bullet.deactivate();
    }
    Some(target.take_damage(bullet.damage))
}
