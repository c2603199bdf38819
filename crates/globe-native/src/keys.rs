use globe_core::{Axis, BackFaceTarget, Command, Param};
use winit::keyboard::KeyCode;

/// What a key press asks the front-end to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    Command(Command),
    Help,
}

pub const KEY_HELP: &[(&str, &str)] = &[
    ("X / Y / Z", "rotate about the globe axis (Shift: reverse)"),
    ("Up / Down", "contact angle (Shift: its step)"),
    ("Right / Left", "intersection angle (Shift: its step)"),
    ("] / [", "arc-length scale (Shift: its step)"),
    (". / ,", "rotation step"),
    ("R", "reset orientation and camera"),
    ("Backspace", "reset everything"),
    ("Space", "random front-facing rotation"),
    ("T", "toggle theme"),
    ("E / M", "show equator / meridian back faces"),
    ("G", "gizmo follows globe or camera"),
    ("H", "print this help"),
];

#[inline]
fn nudge(shift: bool, value: Param, step: Param, sign: f32) -> Command {
    Command::Nudge(if shift { step } else { value }, sign)
}

/// Map a physical key plus the Shift state to an action.
pub fn action_for_key(code: KeyCode, shift: bool) -> Option<KeyAction> {
    let sign = if shift { -1.0 } else { 1.0 };
    let command = match code {
        KeyCode::KeyX => Command::RotateBy { axis: Axis::X, sign },
        KeyCode::KeyY => Command::RotateBy { axis: Axis::Y, sign },
        KeyCode::KeyZ => Command::RotateBy { axis: Axis::Z, sign },
        KeyCode::ArrowUp => nudge(shift, Param::ContactAngle, Param::ContactStep, 1.0),
        KeyCode::ArrowDown => nudge(shift, Param::ContactAngle, Param::ContactStep, -1.0),
        KeyCode::ArrowRight => nudge(shift, Param::IntersectionAngle, Param::IntersectionStep, 1.0),
        KeyCode::ArrowLeft => nudge(shift, Param::IntersectionAngle, Param::IntersectionStep, -1.0),
        KeyCode::BracketRight => nudge(shift, Param::ArcLengthScale, Param::ArcLengthStep, 1.0),
        KeyCode::BracketLeft => nudge(shift, Param::ArcLengthScale, Param::ArcLengthStep, -1.0),
        KeyCode::Period => Command::Nudge(Param::RotationStep, 1.0),
        KeyCode::Comma => Command::Nudge(Param::RotationStep, -1.0),
        KeyCode::KeyR => Command::ResetOrientation,
        KeyCode::Backspace => Command::ResetAll,
        KeyCode::Space => Command::RandomFrontRotation,
        KeyCode::KeyT => Command::ToggleTheme,
        KeyCode::KeyE => Command::ToggleBackFaces(BackFaceTarget::Equator),
        KeyCode::KeyM => Command::ToggleBackFaces(BackFaceTarget::Meridians),
        KeyCode::KeyG => Command::ToggleGizmoMode,
        KeyCode::KeyH => return Some(KeyAction::Help),
        _ => return None,
    };
    Some(KeyAction::Command(command))
}

pub fn log_help() {
    log::info!("[keys] controls:");
    for (keys, what) in KEY_HELP {
        log::info!("[keys]   {keys:<14} {what}");
    }
}
