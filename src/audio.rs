//! Audio cues
//!
//! The engine only decides *which* cue to play; actual playback belongs to
//! the host. `AudioManager` keeps the music/mute state and logs every cue so
//! headless runs can follow along.

use crate::settings::Settings;
use crate::sim::RoundEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player collected the coin
    Coin,
    /// Ball bounced off a pin
    Pin,
    /// Level cleared
    Win,
    /// Game over
    Lose,
}

impl SoundEffect {
    /// Cue for a round event, if it has one
    pub fn for_event(event: &RoundEvent) -> Option<Self> {
        match event {
            RoundEvent::CoinCollected { .. } => Some(SoundEffect::Coin),
            RoundEvent::PegHit { .. } => Some(SoundEffect::Pin),
            RoundEvent::LevelWon { .. } => Some(SoundEffect::Win),
            RoundEvent::GameOver { .. } => Some(SoundEffect::Lose),
            _ => None,
        }
    }

    /// Asset name the host plays
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::Coin => "coin",
            SoundEffect::Pin => "pin",
            SoundEffect::Win => "win",
            SoundEffect::Lose => "lose",
        }
    }
}

/// Background music and effect playback
pub trait SoundService {
    /// Sound is switched on
    fn is_enabled(&self) -> bool;

    /// Flip sound on/off, returning the new state
    fn toggle(&mut self) -> bool;

    /// Start (or resume) background music
    fn play(&mut self);

    /// Pause background music
    fn pause(&mut self);

    fn play_effect(&mut self, effect: SoundEffect);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    enabled: bool,
    music_playing: bool,
    /// Effects actually played (muted cues are not counted)
    effects_played: u64,
    last_effect: Option<SoundEffect>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AudioManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            music_playing: false,
            effects_played: 0,
            last_effect: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.sound_on)
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn effects_played(&self) -> u64 {
        self.effects_played
    }

    pub fn last_effect(&self) -> Option<SoundEffect> {
        self.last_effect
    }

    /// Play the cues for a batch of round events
    pub fn handle_events(&mut self, events: &[RoundEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play_effect(effect);
        }
    }
}

impl SoundService for AudioManager {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if self.enabled {
            self.play();
        } else {
            self.pause();
        }
        log::info!("Sound {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }

    fn play(&mut self) {
        if self.enabled && !self.music_playing {
            self.music_playing = true;
            log::debug!("Music started");
        }
    }

    fn pause(&mut self) {
        if self.music_playing {
            self.music_playing = false;
            log::debug!("Music paused");
        }
    }

    fn play_effect(&mut self, effect: SoundEffect) {
        if !self.enabled {
            return;
        }
        self.effects_played += 1;
        self.last_effect = Some(effect);
        log::debug!("Play {}", effect.asset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Competitor;

    #[test]
    fn test_event_cues() {
        assert_eq!(
            SoundEffect::for_event(&RoundEvent::PegHit {
                by: Competitor::Bot
            }),
            Some(SoundEffect::Pin)
        );
        assert_eq!(
            SoundEffect::for_event(&RoundEvent::GameOver { level: 2 }),
            Some(SoundEffect::Lose)
        );
        assert_eq!(SoundEffect::for_event(&RoundEvent::RoundAborted), None);
    }

    #[test]
    fn test_muted_effects_are_dropped() {
        let mut audio = AudioManager::new(false);
        audio.play_effect(SoundEffect::Coin);
        assert_eq!(audio.effects_played(), 0);
        assert_eq!(audio.last_effect(), None);
    }

    #[test]
    fn test_effects_resume_after_toggle_on() {
        let mut audio = AudioManager::new(true);
        audio.toggle();
        audio.play_effect(SoundEffect::Pin);
        assert_eq!(audio.effects_played(), 0);
        audio.toggle();
        audio.play_effect(SoundEffect::Pin);
        assert_eq!(audio.effects_played(), 1);
        assert_eq!(audio.last_effect(), Some(SoundEffect::Pin));
    }

    #[test]
    fn test_toggle_controls_music() {
        let mut audio = AudioManager::new(true);
        audio.play();
        assert!(audio.is_music_playing());
        assert!(!audio.toggle());
        assert!(!audio.is_music_playing());
        assert!(audio.toggle());
        assert!(audio.is_music_playing());
    }

    #[test]
    fn test_play_ignored_while_disabled() {
        let mut audio = AudioManager::new(false);
        audio.play();
        assert!(!audio.is_music_playing());
    }

    #[test]
    fn test_handle_events_plays_in_order() {
        let mut audio = AudioManager::default();
        audio.handle_events(&[
            RoundEvent::CoinCollected {
                collected: 1,
                required: 1,
            },
            RoundEvent::RoundAborted,
            RoundEvent::LevelWon {
                level: 1,
                coins: 1,
                next_level: 2,
            },
        ]);
        assert_eq!(audio.effects_played(), 2);
        assert_eq!(audio.last_effect(), Some(SoundEffect::Win));
    }
}
