//! Lock-step swarm movement.
//!
//! The whole formation moves as one body on a shared timer: one discrete
//! horizontal jump per interval, or, when the leading enemy has reached the
//! edge margin, a direction flip plus a single drop with no sideways motion.

use tracing::debug;

use crate::config::FormationConfig;
use crate::entities::Enemy;

/// What a discrete formation move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationMove {
    Shift,
    Descend,
}

#[derive(Debug, Clone)]
pub struct FormationSystem {
    direction: f32,
    move_timer: f32,
}

impl Default for FormationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FormationSystem {
    pub fn new() -> Self {
        Self {
            direction: 1.0,
            move_timer: 0.0,
        }
    }

    /// +1 marching right, -1 marching left.
    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn move_timer(&self) -> f32 {
        self.move_timer
    }

    pub fn reset(&mut self) {
        self.direction = 1.0;
        self.move_timer = 0.0;
    }

    /// Seconds between moves for a swarm of `live` enemies.
    pub fn move_interval(cfg: &FormationConfig, live: usize) -> f32 {
        let multiplier =
            (1.0 - live as f32 / cfg.population_norm).max(cfg.min_speed_multiplier);
        cfg.move_interval * multiplier
    }

    /// Advance the shared timer and every enemy's own timers. Returns the
    /// move made this tick, if any.
    pub fn update(
        &mut self,
        dt: f32,
        enemies: &mut [Enemy],
        cfg: &FormationConfig,
        field_width: f32,
    ) -> Option<FormationMove> {
        if enemies.is_empty() {
            return None;
        }

        let interval = Self::move_interval(cfg, enemies.len());
        self.move_timer += dt;

        let mut made = None;
        if self.move_timer >= interval {
            self.move_timer = 0.0;
            made = Some(self.execute_move(enemies, cfg, field_width));
        }

        for enemy in enemies.iter_mut() {
            enemy.tick_timers(dt);
        }
        made
    }

    fn execute_move(
        &mut self,
        enemies: &mut [Enemy],
        cfg: &FormationConfig,
        field_width: f32,
    ) -> FormationMove {
        let (leftmost, rightmost) = enemies
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), e| {
                (lo.min(e.x), hi.max(e.x))
            });

        let at_edge = (self.direction > 0.0 && rightmost >= field_width - cfg.edge_margin)
            || (self.direction < 0.0 && leftmost <= cfg.edge_margin);

        if at_edge {
            self.direction = -self.direction;
            for enemy in enemies.iter_mut() {
                enemy.y += cfg.drop_distance;
            }
            debug!(direction = self.direction, "formation reversed");
            FormationMove::Descend
        } else {
            let step = self.direction * cfg.step_speed;
            for enemy in enemies.iter_mut() {
                enemy.x += step;
            }
            FormationMove::Shift
        }
    }
}
