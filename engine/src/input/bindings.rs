//! Input Bindings Module
//!
//! Maps physical keys to logical game inputs. An action may have several keys
//! (arrows and WASD both move); a key drives at most one action.

use std::collections::HashMap;

use super::KeyCode;

/// Logical inputs the player controller reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameInputType {
    /// default: A, ArrowLeft
    MoveLeft,
    /// default: D, ArrowRight
    MoveRight,
    /// default: W, ArrowUp
    MoveUp,
    /// default: S, ArrowDown
    MoveDown,
    /// default: Space, C, J
    Jump,
    /// default: Z, L
    WallGrab,
    /// default: X, K
    Dash,
}

impl GameInputType {
    pub const COUNT: usize = 7;

    pub const ALL: [GameInputType; Self::COUNT] = [
        GameInputType::MoveLeft,
        GameInputType::MoveRight,
        GameInputType::MoveUp,
        GameInputType::MoveDown,
        GameInputType::Jump,
        GameInputType::WallGrab,
        GameInputType::Dash,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Key to action mapping with reverse lookup.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, GameInputType>,
    action_to_keys: HashMap<GameInputType, Vec<KeyCode>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Bindings with the default layout (see [`GameInputType`] variants).
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::A, GameInputType::MoveLeft);
        bindings.bind(KeyCode::ArrowLeft, GameInputType::MoveLeft);
        bindings.bind(KeyCode::D, GameInputType::MoveRight);
        bindings.bind(KeyCode::ArrowRight, GameInputType::MoveRight);
        bindings.bind(KeyCode::W, GameInputType::MoveUp);
        bindings.bind(KeyCode::ArrowUp, GameInputType::MoveUp);
        bindings.bind(KeyCode::S, GameInputType::MoveDown);
        bindings.bind(KeyCode::ArrowDown, GameInputType::MoveDown);
        bindings.bind(KeyCode::Space, GameInputType::Jump);
        bindings.bind(KeyCode::C, GameInputType::Jump);
        bindings.bind(KeyCode::J, GameInputType::Jump);
        bindings.bind(KeyCode::Z, GameInputType::WallGrab);
        bindings.bind(KeyCode::L, GameInputType::WallGrab);
        bindings.bind(KeyCode::X, GameInputType::Dash);
        bindings.bind(KeyCode::K, GameInputType::Dash);

        bindings
    }

    /// Bindings with nothing bound.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_keys: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, in addition to the action's existing keys.
    ///
    /// If the key already drove another action, that binding is removed.
    pub fn bind(&mut self, key: KeyCode, action: GameInputType) {
        self.unbind_key(key);
        self.key_to_action.insert(key, action);
        self.action_to_keys.entry(action).or_default().push(key);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        let Some(old_action) = self.key_to_action.remove(&key) else {
            return;
        };
        if let Some(keys) = self.action_to_keys.get_mut(&old_action) {
            keys.retain(|&k| k != key);
        }
    }

    /// Remove every key bound to `action`.
    pub fn unbind_action(&mut self, action: GameInputType) {
        if let Some(keys) = self.action_to_keys.remove(&action) {
            for key in keys {
                self.key_to_action.remove(&key);
            }
        }
    }

    pub fn get_action(&self, key: KeyCode) -> Option<GameInputType> {
        self.key_to_action.get(&key).copied()
    }

    /// Keys bound to `action`, in binding order.
    pub fn keys_for(&self, action: GameInputType) -> &[KeyCode] {
        self.action_to_keys
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
