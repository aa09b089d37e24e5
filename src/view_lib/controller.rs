// src/view_lib/controller.rs

use glam::Vec2;
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::PhysicalKey,
};
use crate::config::ViewConfig;
use crate::view_lib::command::Command;
use crate::view_lib::session::Session;

/// Turns raw window events into session calls. Tracks the cursor, which
/// winit only reports on motion.
pub struct InputController {
    cursor: Vec2,
    view_config: ViewConfig,
}

impl InputController {
    pub fn new(view_config: ViewConfig) -> Self {
        Self { cursor: Vec2::ZERO, view_config }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, session: &mut Session) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.state != ElementState::Pressed || key_event.repeat {
                    return false;
                }
                match key_command(key_event.physical_key) {
                    Some(command) => {
                        session.dispatch(command);
                        true
                    }
                    None => false,
                }
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                match state {
                    ElementState::Pressed => session.pointer_pressed(self.cursor),
                    ElementState::Released => session.pointer_released(),
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                session.pointer_moved(self.cursor);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                session.pointer_released();
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = wheel_notches(*delta, &self.view_config);
                if notches != 0.0 {
                    session.wheel(notches, self.cursor);
                }
                true
            }
            WindowEvent::Focused(false) => {
                session.pointer_released();
                false
            }
            _ => false,
        }
    }
}

pub fn key_command(key: PhysicalKey) -> Option<Command> {
    match key {
        PhysicalKey::Code(code) => Command::from_key(code),
        PhysicalKey::Unidentified(_) => None,
    }
}

/// Wheel motion in notches; positive zooms in.
pub fn wheel_notches(delta: MouseScrollDelta, config: &ViewConfig) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => p.y as f32 / config.pixels_per_wheel_notch.max(1.0),
    }
}
