//! Sound cue requests.
//!
//! The simulation only *asks* for sounds. Playback is the host's business;
//! every call is fire-and-forget and must never fail or block the caller.

use std::fmt;

use tracing::debug;

use crate::config::AudioConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shoot,
    Explosion,
    SpecialCharge,
    SpecialShoot,
    BossDamage,
    BossDestroyed,
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Explosion => "explosion",
            SoundCue::SpecialCharge => "specialCharge",
            SoundCue::SpecialShoot => "specialShoot",
            SoundCue::BossDamage => "bossDamage",
            SoundCue::BossDestroyed => "bossDestroyed",
        };
        f.write_str(name)
    }
}

pub trait Audio {
    fn play(&mut self, cue: SoundCue, volume: f32);
    fn stop(&mut self, cue: SoundCue);
    /// Returns the new muted state.
    fn toggle_mute(&mut self) -> bool;
}

/// Default backend: no output device, cues go to the log.
#[derive(Debug)]
pub struct LoggedAudio {
    enabled: bool,
    muted: bool,
    master_volume: f32,
    sfx_volume: f32,
}

impl LoggedAudio {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            enabled: config.enabled,
            muted: false,
            master_volume: config.master_volume.clamp(0.0, 1.0),
            sfx_volume: config.sfx_volume.clamp(0.0, 1.0),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl Audio for LoggedAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        if !self.enabled || self.muted {
            return;
        }
        let gain = volume.clamp(0.0, 1.0) * self.sfx_volume * self.master_volume;
        debug!(%cue, gain, "play");
    }

    fn stop(&mut self, cue: SoundCue) {
        if self.enabled {
            debug!(%cue, "stop");
        }
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        debug!(muted = self.muted, "audio mute toggled");
        self.muted
    }
}
