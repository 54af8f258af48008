use winit::keyboard::KeyCode;

/// DOM-style key name for the physical keys the engine binds.
pub fn key_name(key: KeyCode) -> Option<&'static str> {
    let name = match key {
        KeyCode::KeyW => "w",
        KeyCode::KeyA => "a",
        KeyCode::KeyS => "s",
        KeyCode::KeyD => "d",
        KeyCode::ArrowUp => "ArrowUp",
        KeyCode::ArrowDown => "ArrowDown",
        KeyCode::ArrowLeft => "ArrowLeft",
        KeyCode::ArrowRight => "ArrowRight",
        KeyCode::Space => " ",
        _ => return None,
    };
    Some(name)
}
