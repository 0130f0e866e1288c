//! Configuration surface of the game.
//!
//! Everything tunable lives in [`GameConfig`]; `Default` yields the reference
//! board (30 second round, six holes bound to `Q W E / A S D`).

use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Key that toggles start / pause / resume. Never bindable to a slot.
pub const TOGGLE_KEY: char = ' ';

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GameConfig {
    /// Total countdown length in seconds.
    pub duration: f64,
    pub slot_count: usize,
    /// Real-time granularity of the tick source; each tick removes this much
    /// from the countdown.
    pub tick_interval_ms: u32,
    /// Pause between a hit and the next mole appearing.
    pub reactivation_delay_ms: u32,
    /// Lifetime of a "+1" / "-1" indicator.
    pub indicator_duration_ms: u32,
    /// Key -> 1-based slot id. Matched case-insensitively.
    pub key_map: BTreeMap<char, usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let key_map = ['Q', 'W', 'E', 'A', 'S', 'D']
            .into_iter()
            .zip(1..)
            .collect();
        Self {
            duration: 30.0,
            slot_count: 6,
            tick_interval_ms: 10,
            reactivation_delay_ms: 100,
            indicator_duration_ms: 1000,
            key_map,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration.is_finite() || self.duration_ms() == 0 {
            return Err(ConfigError::InvalidDuration(self.duration));
        }
        if self.slot_count == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if i32::try_from(self.tick_interval_ms).is_err() {
            return Err(ConfigError::TickIntervalTooLong(self.tick_interval_ms));
        }
        for (&key, &slot) in &self.key_map {
            if key == TOGGLE_KEY {
                return Err(ConfigError::ReservedKey(key));
            }
            if slot == 0 || slot > self.slot_count {
                return Err(ConfigError::KeyOutOfRange {
                    key,
                    slot,
                    slot_count: self.slot_count,
                });
            }
        }
        Ok(())
    }

    /// Countdown length rounded to whole milliseconds. Negative lengths give 0.
    pub fn duration_ms(&self) -> u64 {
        (self.duration * 1000.0).round() as u64
    }

    /// Parse and validate a JSON config. Missing fields take their defaults;
    /// key map entries are normalized to uppercase.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.key_map = config
            .key_map
            .into_iter()
            .map(|(k, slot)| (k.to_ascii_uppercase(), slot))
            .collect();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_reference_board() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.duration_ms(), 30_000);
        assert_eq!(cfg.slot_count, 6);
        assert_eq!(cfg.key_map.get(&'Q'), Some(&1));
        assert_eq!(cfg.key_map.get(&'D'), Some(&6));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = GameConfig::default();
        cfg.duration = -1.0;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidDuration(-1.0)));

        // Rounds to 0ms: the round would be over before it starts.
        let mut cfg = GameConfig::default();
        cfg.duration = 0.0004;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidDuration(0.0004)));
        cfg.duration = 0.001;
        assert!(cfg.validate().is_ok());

        let mut cfg = GameConfig::default();
        cfg.slot_count = 4;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::KeyOutOfRange {
                key: 'D',
                slot: 6,
                slot_count: 4
            })
        );

        let mut cfg = GameConfig::default();
        cfg.key_map.insert(TOGGLE_KEY, 1);
        assert_eq!(cfg.validate(), Err(ConfigError::ReservedKey(' ')));

        let mut cfg = GameConfig::default();
        cfg.tick_interval_ms = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTickInterval));
        cfg.tick_interval_ms = u32::MAX;
        assert_eq!(cfg.validate(), Err(ConfigError::TickIntervalTooLong(u32::MAX)));
        cfg.tick_interval_ms = i32::MAX as u32;
        assert!(cfg.validate().is_ok());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_overrides_and_normalizes_keys() {
        let cfg = GameConfig::from_json(r#"{"duration": 10.5, "slotCount": 2, "keyMap": {"j": 1, "K": 2}}"#)
            .unwrap();
        assert_eq!(cfg.duration_ms(), 10_500);
        assert_eq!(cfg.slot_count, 2);
        assert_eq!(cfg.key_map.get(&'J'), Some(&1));
        assert_eq!(cfg.tick_interval_ms, 10);

        assert!(matches!(
            GameConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"slotCount": 0}"#),
            Err(ConfigError::NoSlots)
        ));
    }
}
