use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;

use crate::config::BulletConfig;
use crate::render::{Canvas, Rect, Sprite};

use super::{Entity, EntityId};

/// Straight up, in canvas coordinates (y grows downward).
pub const UP: f32 = -FRAC_PI_2;
/// Straight down.
pub const DOWN: f32 = FRAC_PI_2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletKind {
    /// Player shuriken.
    Normal,
    /// Charged player shot: heavier and passes through targets.
    Special,
    /// Formation enemy shot.
    Enemy,
    /// Boss rock.
    Rock,
}

impl BulletKind {
    pub fn is_player(self) -> bool {
        matches!(self, BulletKind::Normal | BulletKind::Special)
    }

    fn sprite(self) -> Sprite {
        match self {
            BulletKind::Normal => Sprite::Shuriken,
            BulletKind::Special => Sprite::SpecialShuriken,
            BulletKind::Enemy => Sprite::EnemyBullet,
            BulletKind::Rock => Sprite::Rock,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub kind: BulletKind,
    pub x: f32,
    pub y: f32,
    /// Radians; 0 points right, `UP` points up.
    pub angle: f32,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub damage: i32,
    active: bool,
    /// Targets already damaged; only consulted for penetrating bullets.
    hits: HashSet<EntityId>,
    rotation: f32,
    rotation_speed: f32,
}

impl Bullet {
    fn new(kind: BulletKind, x: f32, y: f32, angle: f32, speed: f32, size: (f32, f32)) -> Self {
        Self {
            kind,
            x,
            y,
            angle,
            speed,
            width: size.0,
            height: size.1,
            damage: 1,
            active: true,
            hits: HashSet::new(),
            rotation: 0.0,
            rotation_speed: 10.0,
        }
    }

    pub fn normal(x: f32, y: f32, cfg: &BulletConfig) -> Self {
        Self::new(
            BulletKind::Normal,
            x,
            y,
            UP,
            cfg.player_speed,
            (cfg.player_size, cfg.player_size),
        )
    }

    pub fn special(x: f32, y: f32, cfg: &BulletConfig) -> Self {
        let mut b = Self::new(
            BulletKind::Special,
            x,
            y,
            UP,
            cfg.special_speed,
            (cfg.special_size, cfg.special_size),
        );
        b.damage = cfg.special_damage;
        b.rotation_speed = 15.0;
        b
    }

    pub fn enemy(x: f32, y: f32, cfg: &BulletConfig) -> Self {
        Self::new(
            BulletKind::Enemy,
            x,
            y,
            DOWN,
            cfg.enemy_speed,
            (cfg.enemy_width, cfg.enemy_height),
        )
    }

    pub fn rock(x: f32, y: f32, angle: f32, cfg: &BulletConfig) -> Self {
        Self::new(
            BulletKind::Rock,
            x,
            y,
            angle,
            cfg.rock_speed,
            (cfg.rock_size, cfg.rock_size),
        )
    }

    pub fn is_penetrating(&self) -> bool {
        self.kind == BulletKind::Special
    }

    pub fn has_hit(&self, target: EntityId) -> bool {
        self.hits.contains(&target)
    }

    /// Remember `target`; false when it was already recorded.
    pub fn record_hit(&mut self, target: EntityId) -> bool {
        self.hits.insert(target)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Move along the heading; leave play once fully outside the field.
    pub fn update(&mut self, dt: f32, field_width: f32, field_height: f32) {
        self.x += self.angle.cos() * self.speed * dt;
        self.y += self.angle.sin() * self.speed * dt;
        self.rotation += self.rotation_speed * dt;

        if self.x < -self.width
            || self.x > field_width + self.width
            || self.y < -self.height
            || self.y > field_height + self.height
        {
            self.active = false;
        }
    }
}

impl Entity for Bullet {
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
        // Two spin frames are enough for a shuriken.
        let frame = ((self.rotation / FRAC_PI_2) as i32).rem_euclid(2) as u8;
        canvas.draw_sprite(
            self.kind.sprite(),
            Rect::centered(self.x, self.y, self.width, self.height),
            frame,
        );
    }
}
