use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_DIFFICULTY: f32 = 1.0;
pub const MAX_DIFFICULTY: f32 = 4.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("squad size must be at least one player")]
    EmptySquad,
    #[error("match duration must be positive and last at least one tick, got {0} seconds")]
    InvalidDuration(f32),
    #[error("tick rate must be positive, got {0}")]
    InvalidTickRate(u32),
    #[error("invalid pitch geometry {width}x{height}")]
    InvalidPitch { width: f32, height: f32 },
    #[error("goal mouth {goal_height} does not fit a pitch of height {pitch_height}")]
    InvalidGoalMouth { goal_height: f32, pitch_height: f32 },
    #[error("difficulty must be within 1..=4, got {0}")]
    InvalidDifficulty(f32),
    #[error("radius must be positive, got {0}")]
    InvalidRadius(f32),
}

/// Pitch rectangle in world units. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub goal_height: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        PitchConfig {
            x: 60.0,
            y: 40.0,
            width: 840.0,
            height: 460.0,
            goal_height: 120.0,
        }
    }
}

/// Progression modifiers injected by the host. Every field is a plain
/// additive rating, zero meaning "no bonus".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub speed: f32,
    pub stamina: f32,
    pub shot_power: f32,
    pub passing: f32,
    pub strength: f32,
    pub technique: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub pitch: PitchConfig,
    pub duration_secs: f32,
    pub tick_rate: u32,
    pub squad_size: usize,
    pub difficulty: f32,
    pub goal_pause_ticks: u32,
    pub player_radius: f32,
    pub ball_radius: f32,
    pub seed: Option<u64>,
    pub user_stats: PlayerStats,
    pub nation_bonus: PlayerStats,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            pitch: PitchConfig::default(),
            duration_secs: 60.0,
            tick_rate: 60,
            squad_size: 5,
            difficulty: 1.0,
            goal_pause_ticks: 90,
            player_radius: 14.0,
            ball_radius: 6.0,
            seed: None,
            user_stats: PlayerStats::default(),
            nation_bonus: PlayerStats::default(),
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.squad_size == 0 {
            return Err(ConfigError::EmptySquad);
        }

        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate));
        }

        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 || self.duration_ticks() == 0 {
            return Err(ConfigError::InvalidDuration(self.duration_secs));
        }

        for radius in [self.player_radius, self.ball_radius] {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ConfigError::InvalidRadius(radius));
            }
        }

        let pitch = &self.pitch;
        let coordinates_finite = [pitch.x, pitch.y, pitch.width, pitch.height]
            .iter()
            .all(|v| v.is_finite());

        // agents are clamped inside the pitch inset by their radius
        if !coordinates_finite
            || pitch.width <= self.player_radius * 2.0
            || pitch.height <= self.player_radius * 2.0
        {
            return Err(ConfigError::InvalidPitch {
                width: pitch.width,
                height: pitch.height,
            });
        }

        if !pitch.goal_height.is_finite()
            || pitch.goal_height <= 0.0
            || pitch.goal_height > pitch.height
        {
            return Err(ConfigError::InvalidGoalMouth {
                goal_height: pitch.goal_height,
                pitch_height: pitch.height,
            });
        }

        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(ConfigError::InvalidDifficulty(self.difficulty));
        }

        Ok(())
    }

    /// Match length expressed in simulation ticks.
    pub fn duration_ticks(&self) -> u32 {
        (self.duration_secs * self.tick_rate as f32).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.duration_ticks(), 3600);
    }

    #[test]
    fn test_zero_squad_rejected() {
        let config = MatchConfig {
            squad_size: 0,
            ..MatchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySquad));
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        for duration in [0.0, -5.0, f32::NAN, 0.001] {
            let config = MatchConfig {
                duration_secs: duration,
                ..MatchConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidDuration(_))
            ));
        }
    }

    #[test]
    fn test_malformed_pitch_rejected() {
        let config = MatchConfig {
            pitch: PitchConfig {
                width: 20.0,
                ..PitchConfig::default()
            },
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPitch { .. })
        ));

        let config = MatchConfig {
            pitch: PitchConfig {
                goal_height: 500.0,
                ..PitchConfig::default()
            },
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGoalMouth { .. })
        ));
    }

    #[test]
    fn test_difficulty_range() {
        for difficulty in [1.0, 2.5, 4.0] {
            let config = MatchConfig {
                difficulty,
                ..MatchConfig::default()
            };
            assert_eq!(config.validate(), Ok(()));
        }

        let config = MatchConfig {
            difficulty: 4.5,
            ..MatchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidDifficulty(4.5)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MatchConfig =
            serde_json::from_str(r#"{ "difficulty": 2.0, "pitch": { "width": 600.0 } }"#).unwrap();

        assert_eq!(config.difficulty, 2.0);
        assert_eq!(config.pitch.width, 600.0);
        assert_eq!(config.pitch.height, 460.0);
        assert_eq!(config.squad_size, 5);
    }

    #[test]
    fn test_pitch_serializes_only_used_geometry() {
        let value = serde_json::to_value(PitchConfig::default()).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();

        assert_eq!(keys, vec!["goal_height", "height", "width", "x", "y"]);
    }
}
