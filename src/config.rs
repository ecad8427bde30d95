//! Runtime game configuration.
//!
//! [`GameConfig::default()`] carries the tuned values the game ships with.
//! A TOML file may override any subset of them; every section is
//! `#[serde(default)]`, so missing keys keep their defaults.
//!
//! ```toml
//! [formation]
//! move_interval = 0.6
//!
//! [enemy]
//! fire_enabled = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub score: ScoreConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub formation: FormationConfig,
    pub ufo: UfoConfig,
    pub boss: BossConfig,
    pub bullet: BulletConfig,
    pub audio: AudioConfig,
    pub collision: CollisionConfig,
    pub timing: TimingConfig,
    pub debug: DebugConfig,
}

impl GameConfig {
    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> GameResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GameError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents).map_err(|e| match e {
            GameError::Config { message, .. } => GameError::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml(contents: &str) -> GameResult<Self> {
        toml::from_str(contents).map_err(|e| GameError::Config {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }
}

// ── Playfield ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 640.0,
        }
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub enemy_kill: u32,
    pub ufo_kill: u32,
    pub boss_kill: u32,
    /// Key under which the high score is persisted.
    pub store_key: String,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            enemy_kill: 10,
            ufo_kill: 100,
            boss_kill: 300,
            store_key: "invaders_highscore".to_string(),
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels per second.
    pub speed: f32,
    pub health: i32,
    /// Seconds between normal shots.
    pub shoot_cooldown: f32,
    /// Cooldown applied to normal shots right after a special shot.
    pub post_special_cooldown: f32,
    /// How long the longer cooldown stays in force after a special shot.
    pub post_special_window: f32,
    /// Milliseconds the fire key must be held to arm the special shot.
    pub charge_time_ms: u64,
    pub max_special_uses: u32,
    /// Distance from the bottom edge at which the player spawns.
    pub bottom_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 96.0,
            speed: 200.0,
            health: 1,
            shoot_cooldown: 0.3,
            post_special_cooldown: 0.8,
            post_special_window: 1.5,
            charge_time_ms: 3000,
            max_special_uses: 5,
            bottom_offset: 50.0,
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub rows: usize,
    pub cols: usize,
    pub margin_x: f32,
    pub top: f32,
    pub row_spacing: f32,
    pub shoot_cooldown: f32,
    /// Per-tick chance that a ready enemy fires.
    pub shoot_probability: f64,
    /// Formation enemies fire only when this is set.
    pub fire_enabled: bool,
    pub animation_speed: f32,
    pub animation_frames: u8,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 48.0,
            height: 48.0,
            health: 1,
            rows: 5,
            cols: 8,
            margin_x: 70.0,
            top: 120.0,
            row_spacing: 50.0,
            shoot_cooldown: 2.0,
            shoot_probability: 0.001,
            fire_enabled: false,
            animation_speed: 0.5,
            animation_frames: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// Seconds between discrete formation moves at full population.
    pub move_interval: f32,
    /// Horizontal jump per move.
    pub step_speed: f32,
    pub drop_distance: f32,
    pub edge_margin: f32,
    pub min_speed_multiplier: f32,
    pub population_norm: f32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            move_interval: 1.0,
            step_speed: 15.0,
            drop_distance: 20.0,
            edge_margin: 30.0,
            min_speed_multiplier: 0.2,
            population_norm: 50.0,
        }
    }
}

// ── UFO / boss ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UfoConfig {
    /// Seconds without an active UFO before the next one appears.
    pub spawn_interval: f32,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    /// Fraction of the canvas height the UFO flies at.
    pub altitude: f32,
}

impl Default for UfoConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 10.0,
            speed: 100.0,
            width: 64.0,
            height: 32.0,
            altitude: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub speed: f32,
    pub entry_speed: f32,
    /// Resting altitude as a fraction of the canvas height.
    pub rest_altitude: f32,
    /// Delay between the last enemy falling and the boss appearing.
    pub spawn_delay: f32,
    pub single_cooldown: f32,
    pub spread_cooldown: f32,
    /// Initial timer of the spread pattern, staggering it against `single`.
    pub spread_offset: f32,
    /// Angular offset of the outer spread shots, in radians.
    pub spread_angle: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            width: 128.0,
            height: 128.0,
            health: 30,
            speed: 50.0,
            entry_speed: 50.0,
            rest_altitude: 0.2,
            spawn_delay: 3.5,
            single_cooldown: 1.5,
            spread_cooldown: 4.0,
            spread_offset: 2.0,
            spread_angle: 0.3,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub player_speed: f32,
    pub player_size: f32,
    pub special_speed: f32,
    pub special_size: f32,
    pub special_damage: i32,
    pub enemy_speed: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub rock_speed: f32,
    pub rock_size: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            player_speed: 400.0,
            player_size: 12.0,
            special_speed: 800.0,
            special_size: 48.0,
            special_damage: 3,
            enemy_speed: 200.0,
            enemy_width: 4.0,
            enemy_height: 8.0,
            rock_speed: 150.0,
            rock_size: 16.0,
        }
    }
}

// ── Audio / collision / timing / debug ────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub master_volume: f32,
    pub sfx_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            master_volume: 0.5,
            sfx_volume: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Fraction of the canvas height an enemy must not cross.
    pub game_over_threshold: f32,
    /// Player/enemy boxes are scaled by this before the overlap test.
    pub adjustment_factor: f32,
    /// Seconds after entering the game before player/enemy checks start.
    pub grace_period: f32,
    pub enemy_bullets_hit_player: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            game_over_threshold: 0.9,
            adjustment_factor: 0.8,
            grace_period: 1.0,
            enemy_bullets_hit_player: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Game over requests are ignored before this much game time.
    pub game_over_grace: f32,
    /// Delay between game over / boss defeat and the screen switch.
    pub transition_delay: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            game_over_grace: 2.0,
            transition_delay: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Player ignores every game-over trigger.
    pub god_mode: bool,
}
