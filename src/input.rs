//! Key code to game action mapping
//!
//! Hosts feed raw key codes in; the simulation only ever sees [`Action`]s.
//! One code may map to several actions (space both fires and starts a game);
//! the active phase picks out the ones it understands.

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
    Hyperspace,
    /// Coin-up / begin a session
    Start,
}

/// Well-known key codes for the default layout
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const LEFT_ARROW: u32 = 37;
    pub const UP_ARROW: u32 = 38;
    pub const RIGHT_ARROW: u32 = 39;
    pub const RIGHT_CTRL: u32 = 17;
}

/// Rebindable key map
#[derive(Debug, Clone)]
pub struct InputMap {
    bindings: Vec<(u32, Action)>,
}

impl Default for InputMap {
    /// Classic arcade layout: arrows steer, space fires/starts, ctrl jumps
    fn default() -> Self {
        let mut map = Self { bindings: Vec::new() };
        map.bind(keys::LEFT_ARROW, Action::TurnLeft);
        map.bind(keys::RIGHT_ARROW, Action::TurnRight);
        map.bind(keys::UP_ARROW, Action::Thrust);
        map.bind(keys::SPACE, Action::Fire);
        map.bind(keys::SPACE, Action::Start);
        map.bind(keys::RIGHT_CTRL, Action::Hyperspace);
        map
    }
}

impl InputMap {
    /// Add a binding; existing bindings for the code are kept
    pub fn bind(&mut self, code: u32, action: Action) {
        if !self.bindings.contains(&(code, action)) {
            self.bindings.push((code, action));
        }
    }

    /// Remove every binding for a code
    pub fn unbind(&mut self, code: u32) {
        self.bindings.retain(|(c, _)| *c != code);
    }

    /// All actions bound to a code, in binding order
    pub fn actions(&self, code: u32) -> impl Iterator<Item = Action> + '_ {
        self.bindings
            .iter()
            .filter(move |(c, _)| *c == code)
            .map(|(_, a)| *a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_fires_and_starts() {
        let map = InputMap::default();
        let actions: Vec<Action> = map.actions(keys::SPACE).collect();
        assert!(actions.contains(&Action::Fire));
        assert!(actions.contains(&Action::Start));
    }

    #[test]
    fn test_unknown_code_maps_to_nothing() {
        let map = InputMap::default();
        assert_eq!(map.actions(999).count(), 0);
    }

    #[test]
    fn test_rebinding() {
        let mut map = InputMap::default();
        map.unbind(keys::RIGHT_CTRL);
        assert_eq!(map.actions(keys::RIGHT_CTRL).count(), 0);
        map.bind(65, Action::Hyperspace);
        // Duplicate bind is a no-op
        map.bind(65, Action::Hyperspace);
        let actions: Vec<Action> = map.actions(65).collect();
        assert_eq!(actions, vec![Action::Hyperspace]);
    }
}
