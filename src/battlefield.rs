//! Entity collections of one game session.
//!
//! The game screen owns exactly one `Battlefield`; the collision system and
//! the formation system borrow its collections during a tick.

use crate::config::GameConfig;
use crate::entities::{Boss, Bullet, BulletSpawner, Enemy, Entity, IdAllocator, Player, Ufo};

/// Live projectiles, split by side.
#[derive(Debug, Default)]
pub struct Projectiles {
    pub player: Vec<Bullet>,
    pub enemy: Vec<Bullet>,
}

impl Projectiles {
    pub fn update(&mut self, dt: f32, field_width: f32, field_height: f32) {
        for bullet in self.player.iter_mut().chain(self.enemy.iter_mut()) {
            bullet.update(dt, field_width, field_height);
        }
        self.retain_active();
    }

    pub fn retain_active(&mut self) {
        self.player.retain(Bullet::is_active);
        self.enemy.retain(Bullet::is_active);
    }

    pub fn clear(&mut self) {
        self.player.clear();
        self.enemy.clear();
    }
}

impl BulletSpawner for Projectiles {
    fn add_bullet(&mut self, bullet: Bullet) {
        self.player.push(bullet);
    }

    fn add_enemy_bullet(&mut self, bullet: Bullet) {
        self.enemy.push(bullet);
    }
}

#[derive(Debug, Default)]
pub struct Battlefield {
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub bullets: Projectiles,
    pub ufo: Option<Ufo>,
    pub boss: Option<Boss>,
    pub ids: IdAllocator,
}

impl Battlefield {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session: player at the bottom centre and a full enemy grid.
    pub fn populate(&mut self, cfg: &GameConfig) {
        let mut ids = IdAllocator::default();
        let player = Player::new(
            ids.next_id(),
            cfg.canvas.width / 2.0,
            cfg.canvas.height - cfg.player.bottom_offset,
            cfg,
        );

        let e = &cfg.enemy;
        let spacing = if e.cols > 1 {
            (cfg.canvas.width - e.margin_x * 2.0) / (e.cols - 1) as f32
        } else {
            0.0
        };
        let mut enemies = Vec::with_capacity(e.rows * e.cols);
        for row in 0..e.rows {
            for col in 0..e.cols {
                let x = e.margin_x + col as f32 * spacing;
                let y = e.top + row as f32 * e.row_spacing;
                enemies.push(Enemy::new(ids.next_id(), x, y, cfg));
            }
        }

        *self = Self {
            player: Some(player),
            enemies,
            bullets: Projectiles::default(),
            ufo: None,
            boss: None,
            ids,
        };
    }

    pub fn spawn_boss(&mut self, cfg: &GameConfig) {
        self.boss = Some(Boss::new(self.ids.next_id(), cfg));
    }

    pub fn player_active(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.is_active())
    }
}
