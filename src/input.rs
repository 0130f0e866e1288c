//! Raw input to engine commands.

use std::collections::BTreeMap;

use crate::config::{GameConfig, TOGGLE_KEY};
use crate::engine::{Command, GamePhase};

/// Input as the presentation layer sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press, named the way `KeyboardEvent.key` names it
    /// (`"q"`, `"Q"`, `" "`, `"Escape"`).
    Key(String),
    /// The player clicked or tapped a rendered hole.
    SelectSlot(usize),
    /// Start / pause / resume control.
    Toggle,
    /// End control; only honoured while paused.
    Cancel,
}

#[derive(Clone, Debug)]
pub struct InputRouter {
    key_map: BTreeMap<char, usize>,
    slot_count: usize,
}

impl InputRouter {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            key_map: config
                .key_map
                .iter()
                .map(|(&key, &slot)| (key.to_ascii_uppercase(), slot))
                .collect(),
            slot_count: config.slot_count,
        }
    }

    /// Translate `event` given the current phase. `None` means the input is
    /// dropped here and never reaches the engine.
    pub fn route(&self, phase: GamePhase, event: &InputEvent) -> Option<Command> {
        match event {
            InputEvent::Toggle => Some(toggle(phase)),
            InputEvent::Cancel => (phase == GamePhase::Paused).then_some(Command::End),
            InputEvent::SelectSlot(slot) => self.attempt(phase, *slot),
            InputEvent::Key(key) => {
                if key.eq_ignore_ascii_case("escape") {
                    return self.route(phase, &InputEvent::Cancel);
                }
                let mut chars = key.chars();
                let c = match (chars.next(), chars.next()) {
                    (Some(c), None) => c.to_ascii_uppercase(),
                    _ => return None,
                };
                if c == TOGGLE_KEY {
                    return self.route(phase, &InputEvent::Toggle);
                }
                let slot = *self.key_map.get(&c)?;
                self.attempt(phase, slot)
            }
        }
    }

    pub fn slot_for_key(&self, key: char) -> Option<usize> {
        self.key_map.get(&key.to_ascii_uppercase()).copied()
    }

    fn attempt(&self, phase: GamePhase, slot: usize) -> Option<Command> {
        if phase != GamePhase::Running || slot == 0 || slot > self.slot_count {
            return None;
        }
        Some(Command::Attempt(slot))
    }
}

fn toggle(phase: GamePhase) -> Command {
    match phase {
        GamePhase::Idle | GamePhase::Ended => Command::Start,
        GamePhase::Running => Command::Pause,
        GamePhase::Paused => Command::Resume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> InputEvent {
        InputEvent::Key(k.to_string())
    }

    #[test]
    fn toggle_follows_phase() {
        let router = InputRouter::new(&GameConfig::default());
        assert_eq!(router.route(GamePhase::Idle, &InputEvent::Toggle), Some(Command::Start));
        assert_eq!(router.route(GamePhase::Ended, &key(" ")), Some(Command::Start));
        assert_eq!(router.route(GamePhase::Running, &key(" ")), Some(Command::Pause));
        assert_eq!(router.route(GamePhase::Paused, &InputEvent::Toggle), Some(Command::Resume));
    }

    #[test]
    fn cancel_only_while_paused() {
        let router = InputRouter::new(&GameConfig::default());
        assert_eq!(router.route(GamePhase::Paused, &key("Escape")), Some(Command::End));
        assert_eq!(router.route(GamePhase::Paused, &InputEvent::Cancel), Some(Command::End));
        assert_eq!(router.route(GamePhase::Running, &key("Escape")), None);
        assert_eq!(router.route(GamePhase::Idle, &InputEvent::Cancel), None);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let router = InputRouter::new(&GameConfig::default());
        assert_eq!(router.route(GamePhase::Running, &key("q")), Some(Command::Attempt(1)));
        assert_eq!(router.route(GamePhase::Running, &key("E")), Some(Command::Attempt(3)));
        assert_eq!(router.route(GamePhase::Running, &key("d")), Some(Command::Attempt(6)));
        assert_eq!(router.slot_for_key('s'), Some(5));
    }

    #[test]
    fn lowercase_bindings_match_either_case() {
        let mut config = GameConfig::default();
        config.slot_count = 2;
        config.key_map = [('j', 1), ('K', 2)].into_iter().collect();
        assert!(config.validate().is_ok());

        let router = InputRouter::new(&config);
        assert_eq!(router.route(GamePhase::Running, &key("j")), Some(Command::Attempt(1)));
        assert_eq!(router.route(GamePhase::Running, &key("J")), Some(Command::Attempt(1)));
        assert_eq!(router.route(GamePhase::Running, &key("k")), Some(Command::Attempt(2)));
        assert_eq!(router.slot_for_key('j'), Some(1));
    }

    #[test]
    fn drops_attempts_outside_running_and_unmapped_input() {
        let router = InputRouter::new(&GameConfig::default());
        for phase in [GamePhase::Idle, GamePhase::Paused, GamePhase::Ended] {
            assert_eq!(router.route(phase, &key("q")), None);
            assert_eq!(router.route(phase, &InputEvent::SelectSlot(1)), None);
        }
        assert_eq!(router.route(GamePhase::Running, &key("z")), None);
        assert_eq!(router.route(GamePhase::Running, &key("Shift")), None);
        assert_eq!(router.route(GamePhase::Running, &key("")), None);
        assert_eq!(router.route(GamePhase::Running, &InputEvent::SelectSlot(0)), None);
        assert_eq!(router.route(GamePhase::Running, &InputEvent::SelectSlot(7)), None);
        assert_eq!(
            router.route(GamePhase::Running, &InputEvent::SelectSlot(4)),
            Some(Command::Attempt(4))
        );
    }
}
