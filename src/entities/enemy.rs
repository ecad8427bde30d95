use crate::config::GameConfig;
use crate::render::{Canvas, Rect, Sprite};

use super::{apply_damage, Animation, Bullet, BulletSpawner, Damageable, Entity, EntityId};

/// One member of the formation. Position is driven by the formation system;
/// the enemy itself only keeps its own timers.
#[derive(Debug, Clone)]
pub struct Enemy {
    id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    health: i32,
    points: u32,
    active: bool,
    can_shoot: bool,
    shoot_cooldown: f32,
    shoot_timer: f32,
    animation: Animation,
}

impl Enemy {
    pub fn new(id: EntityId, x: f32, y: f32, cfg: &GameConfig) -> Self {
        let e = &cfg.enemy;
        Self {
            id,
            x,
            y,
            width: e.width,
            height: e.height,
            health: e.health,
            points: cfg.score.enemy_kill,
            active: true,
            can_shoot: true,
            shoot_cooldown: e.shoot_cooldown,
            shoot_timer: 0.0,
            animation: Animation::new(e.animation_frames, e.animation_speed),
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn can_shoot(&self) -> bool {
        self.can_shoot
    }

    pub fn frame(&self) -> u8 {
        self.animation.frame
    }

    /// Shoot cooldown and animation; runs every tick regardless of whether
    /// the formation moved.
    pub fn tick_timers(&mut self, dt: f32) {
        if !self.can_shoot {
            self.shoot_timer += dt;
            if self.shoot_timer >= self.shoot_cooldown {
                self.can_shoot = true;
                self.shoot_timer = 0.0;
            }
        }
        self.animation.advance(dt);
    }

    /// Drop a bullet straight down if the cooldown allows.
    pub fn shoot(&mut self, cfg: &GameConfig, spawner: &mut dyn BulletSpawner) -> bool {
        if !self.can_shoot {
            return false;
        }
        spawner.add_enemy_bullet(Bullet::enemy(self.x, self.bottom(), &cfg.bullet));
        self.can_shoot = false;
        self.shoot_timer = 0.0;
        true
    }
}

impl Entity for Enemy {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(
            Sprite::Enemy,
            Rect::centered(self.x, self.y, self.width, self.height),
            self.animation.frame,
        );
    }
}

impl Damageable for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn take_damage(&mut self, amount: i32) -> bool {
        apply_damage(&mut self.health, amount)
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battlefield::Projectiles;
    use crate::entities::BulletKind;

    #[test]
    fn shooting_waits_for_the_cooldown() {
        let cfg = GameConfig::default();
        let mut enemy = Enemy::new(EntityId(1), 100.0, 100.0, &cfg);
        let mut shots = Projectiles::default();

        assert!(enemy.shoot(&cfg, &mut shots));
        assert!(!enemy.shoot(&cfg, &mut shots));

        // Default cooldown is 2 s.
        for _ in 0..4 {
            enemy.tick_timers(0.5);
        }
        assert!(enemy.shoot(&cfg, &mut shots));
        assert_eq!(shots.enemy.len(), 2);
        assert_eq!(shots.enemy[0].kind, BulletKind::Enemy);
        assert_eq!(shots.enemy[0].y, enemy.bottom());
    }
}
