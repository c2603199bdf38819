// Host-side tests for the key bindings.
// The native crate is a binary, so the module is included directly.

#![allow(dead_code)]
mod keys {
    include!("../src/keys.rs");
}

use globe_core::{Axis, BackFaceTarget, Command, Param};
use keys::{action_for_key, KeyAction, KEY_HELP};
use winit::keyboard::KeyCode;

fn command(code: KeyCode, shift: bool) -> Command {
    match action_for_key(code, shift) {
        Some(KeyAction::Command(c)) => c,
        other => panic!("{code:?} mapped to {other:?}"),
    }
}

#[test]
fn axis_keys_rotate_and_shift_reverses() {
    assert_eq!(
        command(KeyCode::KeyX, false),
        Command::RotateBy { axis: Axis::X, sign: 1.0 }
    );
    assert_eq!(
        command(KeyCode::KeyZ, true),
        Command::RotateBy { axis: Axis::Z, sign: -1.0 }
    );
}

#[test]
fn shift_switches_values_to_their_steps() {
    assert_eq!(
        command(KeyCode::ArrowUp, false),
        Command::Nudge(Param::ContactAngle, 1.0)
    );
    assert_eq!(
        command(KeyCode::ArrowUp, true),
        Command::Nudge(Param::ContactStep, 1.0)
    );
    assert_eq!(
        command(KeyCode::ArrowLeft, false),
        Command::Nudge(Param::IntersectionAngle, -1.0)
    );
    assert_eq!(
        command(KeyCode::BracketLeft, true),
        Command::Nudge(Param::ArcLengthStep, -1.0)
    );
}

#[test]
fn toggles_and_resets() {
    assert_eq!(command(KeyCode::KeyR, false), Command::ResetOrientation);
    assert_eq!(command(KeyCode::Backspace, false), Command::ResetAll);
    assert_eq!(command(KeyCode::Space, false), Command::RandomFrontRotation);
    assert_eq!(
        command(KeyCode::KeyM, false),
        Command::ToggleBackFaces(BackFaceTarget::Meridians)
    );
    assert_eq!(command(KeyCode::KeyG, true), Command::ToggleGizmoMode);
}

#[test]
fn help_and_unbound_keys() {
    assert_eq!(action_for_key(KeyCode::KeyH, false), Some(KeyAction::Help));
    assert_eq!(action_for_key(KeyCode::KeyQ, false), None);
    assert_eq!(action_for_key(KeyCode::F5, true), None);
    assert!(!KEY_HELP.is_empty());
}
