//! Keyboard bindings for the scene's discrete actions.

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{movement::Movement, theme::Theme};

/// Everything the user can ask the scene to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    TurnAround,
    MoveForward,
    MoveBackward,
    SelectTheme(Theme),
    TogglePresentation,
    PrevSlide,
    NextSlide,
    ToggleHelp,
    /// Leave help mode and jump the camera straight behind the avatar.
    SetPlayerPov,
    Restart,
    Finish,
}

impl Action {
    pub fn from_key(key: KeyCode) -> Option<Action> {
        let action = match key {
            KeyCode::ArrowLeft | KeyCode::KeyA => Action::TurnLeft,
            KeyCode::ArrowRight | KeyCode::KeyD => Action::TurnRight,
            KeyCode::ArrowUp | KeyCode::KeyW => Action::MoveForward,
            KeyCode::ArrowDown | KeyCode::KeyS => Action::MoveBackward,
            KeyCode::KeyQ => Action::TurnAround,
            KeyCode::Digit1 => Action::SelectTheme(Theme::WalkingToClass),
            KeyCode::Digit2 => Action::SelectTheme(Theme::NavigateHall),
            KeyCode::Digit3 => Action::SelectTheme(Theme::Observatory),
            KeyCode::Digit4 => Action::SelectTheme(Theme::Classic),
            KeyCode::KeyP => Action::TogglePresentation,
            KeyCode::BracketLeft => Action::PrevSlide,
            KeyCode::BracketRight => Action::NextSlide,
            KeyCode::KeyH => Action::ToggleHelp,
            KeyCode::KeyV => Action::SetPlayerPov,
            KeyCode::KeyR => Action::Restart,
            KeyCode::KeyF => Action::Finish,
            _ => return None,
        };
        Some(action)
    }

    /// Maps a key press to an action.
    ///
    /// Releases are ignored. Held keys repeat only movement actions; a held
    /// toggle fires once.
    pub fn from_window_event(event: &WindowEvent) -> Option<Action> {
        let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state: ElementState::Pressed,
                    repeat,
                    ..
                },
            ..
        } = event
        else {
            return None;
        };
        Self::from_key_press(*code, *repeat)
    }

    /// Action for a key press; OS repeats (`repeat`) only re-arm movement.
    pub fn from_key_press(code: KeyCode, repeat: bool) -> Option<Action> {
        let action = Self::from_key(code)?;
        if repeat && action.movement().is_none() {
            return None;
        }
        Some(action)
    }

    /// The movement intent this action arms, if it is one.
    pub fn movement(self) -> Option<Movement> {
        match self {
            Action::TurnLeft => Some(Movement::TurnLeft),
            Action::TurnRight => Some(Movement::TurnRight),
            Action::TurnAround => Some(Movement::TurnAround),
            Action::MoveForward => Some(Movement::Advance),
            Action::MoveBackward => Some(Movement::Retreat),
            _ => None,
        }
    }
}
