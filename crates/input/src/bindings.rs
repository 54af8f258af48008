//! Default key bindings: WASD and arrow keys move, space toggles auto-rotate.

use crate::action::{Action, Direction, MoveKey};

/// Map a key name to the movement key it names, if any.
///
/// Accepts DOM-style names case-insensitively (`"w"`, `"ArrowUp"`).
pub fn move_key_for(key: &str) -> Option<MoveKey> {
    let key = match key.to_ascii_lowercase().as_str() {
        "w" => MoveKey::W,
        "a" => MoveKey::A,
        "s" => MoveKey::S,
        "d" => MoveKey::D,
        "arrowup" => MoveKey::ArrowUp,
        "arrowdown" => MoveKey::ArrowDown,
        "arrowleft" => MoveKey::ArrowLeft,
        "arrowright" => MoveKey::ArrowRight,
        _ => return None,
    };
    Some(key)
}

/// Map a key name to the direction it moves the camera, if any.
pub fn direction_for_key(key: &str) -> Option<Direction> {
    move_key_for(key).map(MoveKey::direction)
}

/// Translate a key transition into an action.
///
/// Space toggles auto-rotate on press only; releases of unbound keys are `Noop`.
pub fn action_for_key(key: &str, pressed: bool) -> Action {
    if let Some(key) = move_key_for(key) {
        return Action::Move { key, pressed };
    }
    match key {
        " " | "space" | "Space" if pressed => Action::ToggleAutoRotate,
        _ => Action::Noop,
    }
}
