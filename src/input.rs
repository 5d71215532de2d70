/*
 * Input Module
 *
 * This module handles user input events for the flocking simulation.
 *
 * Features:
 * - Pointer position and pressed state, snapshotted once per tick
 * - Space toggles the debug overlay, F the frame-rate graph, R respawns
 * - Window resizes are forwarded to the flock
 * - Raw events are forwarded to egui, and clicks on the UI never reach the flock
 */

use log::{debug, warn};
use nannou::prelude::*;

use crate::app::Model;
use crate::params::SimulationParams;
use crate::renderer::from_screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleDebug,
    ToggleFrameGraph,
    Respawn,
}

pub fn key_action(key: Key) -> Option<KeyAction> {
    match key {
        Key::Space => Some(KeyAction::ToggleDebug),
        Key::F => Some(KeyAction::ToggleFrameGraph),
        Key::R => Some(KeyAction::Respawn),
        _ => None,
    }
}

// Flip a display toggle. Returns true when the population must be respawned.
pub fn apply_key_action(params: &mut SimulationParams, action: KeyAction) -> bool {
    match action {
        KeyAction::ToggleDebug => {
            params.show_debug = !params.show_debug;
            debug!("debug overlay {}", if params.show_debug { "on" } else { "off" });
            false
        }
        KeyAction::ToggleFrameGraph => {
            params.show_frame_graph = !params.show_frame_graph;
            debug!("frame graph {}", if params.show_frame_graph { "on" } else { "off" });
            false
        }
        KeyAction::Respawn => true,
    }
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if let Some(action) = key_action(key) {
        if apply_key_action(&mut model.params, action) {
            model.flock.respawn(&model.params, &mut rand::thread_rng());
        }
    }
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.pointer.position = from_screen(pos, model.flock.size());
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.pointer.pressed = true;
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.pointer.pressed = false;
    }
}

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    if let Err(err) = model.flock.resize(size.x, size.y, &model.params) {
        warn!("ignoring resize: {}", err);
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
