use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::render::{Canvas, Rect, Sprite};

use super::{apply_damage, Animation, Damageable, Entity, EntityId, IdAllocator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// Bonus saucer crossing the top of the screen.
#[derive(Debug, Clone)]
pub struct Ufo {
    id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    speed: f32,
    /// +1 flying right, -1 flying left.
    direction: f32,
    health: i32,
    points: u32,
    active: bool,
    animation: Animation,
}

impl Ufo {
    /// A UFO just outside `from`, heading for the opposite edge.
    pub fn new(id: EntityId, from: Edge, cfg: &GameConfig) -> Self {
        let u = &cfg.ufo;
        let (x, direction) = match from {
            Edge::Left => (-u.width / 2.0, 1.0),
            Edge::Right => (cfg.canvas.width + u.width / 2.0, -1.0),
        };
        Self {
            id,
            x,
            y: cfg.canvas.height * u.altitude,
            width: u.width,
            height: u.height,
            speed: u.speed,
            direction,
            health: 1,
            points: cfg.score.ufo_kill,
            active: true,
            animation: Animation::new(2, 0.2),
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn update(&mut self, dt: f32, field_width: f32) {
        self.x += self.direction * self.speed * dt;
        if (self.direction > 0.0 && self.x > field_width + self.width)
            || (self.direction < 0.0 && self.x < -self.width)
        {
            self.active = false;
        }
        self.animation.advance(dt);
    }
}

impl Entity for Ufo {
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
            Sprite::Ufo,
            Rect::centered(self.x, self.y, self.width, self.height),
            self.animation.frame,
        );
    }
}

impl Damageable for Ufo {
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

// ── Spawning ──────────────────────────────────────────────────────────────────

/// UFO spawn clock. Owned by the game session, so a fresh session starts
/// with a fresh timer.
#[derive(Debug, Default, Clone)]
pub struct UfoSpawner {
    timer: f32,
}

impl UfoSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    /// Count `dt` towards the next UFO while none is flying. Returns the new
    /// UFO when the interval is reached.
    pub fn check_spawn(
        &mut self,
        cfg: &GameConfig,
        dt: f32,
        current: Option<&Ufo>,
        ids: &mut IdAllocator,
        rng: &mut impl Rng,
    ) -> Option<Ufo> {
        if current.is_some_and(|u| u.is_active()) {
            return None;
        }

        self.timer += dt;
        if self.timer < cfg.ufo.spawn_interval {
            return None;
        }
        self.timer = 0.0;

        let edge = if rng.gen_bool(0.5) { Edge::Left } else { Edge::Right };
        debug!(?edge, "ufo spawned");
        Some(Ufo::new(ids.next_id(), edge, cfg))
    }
}
