/*
 * Application Module
 *
 * This module defines the main application model and the per-frame update.
 * The host calls `update` once per animation frame; each call runs at most one
 * flock tick against a pointer snapshot, then refreshes the debug metrics.
 */

use log::{info, warn};
use nannou::prelude::*;
use nannou_egui::Egui;

use crate::debug::DebugInfo;
use crate::flock::{Flock, PointerState};
use crate::input::{key_pressed, mouse_moved, mouse_pressed, mouse_released, raw_window_event, resized};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::ui;

// Share of the primary monitor's width used by the window
const WINDOW_WIDTH_FRACTION: f32 = 0.8;
const FALLBACK_WINDOW_WIDTH: f32 = 800.0;

// Main model for the application
pub struct Model {
    pub flock: Flock,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub pointer: PointerState,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = SimulationParams::default();

    let window_width = app
        .primary_monitor()
        .map(|monitor| monitor.size().width as f32 * WINDOW_WIDTH_FRACTION)
        .unwrap_or(FALLBACK_WINDOW_WIDTH);

    let window_id = app
        .new_window()
        .title("Quadtree Flocking")
        .size(window_width as u32, params.canvas_height as u32)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the simulation window");

    let window = app.window(window_id).expect("simulation window vanished after creation");
    let egui = Egui::from_window(&window);
    let rect = window.rect();

    info!(
        "starting flock: {} boids, vision {}, capacity {}, rebuild every {} ticks",
        params.num_boids, params.vision_radius, params.quadtree_capacity, params.rebuild_interval
    );
    let flock = Flock::new(&params, rect.w(), rect.h(), &mut rand::thread_rng())
        .expect("default simulation parameters are valid");

    Model {
        flock,
        params,
        egui,
        debug_info: DebugInfo::default(),
        pointer: PointerState::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.record_frame(app.fps(), update.since_last);

    let actions = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if let Err(err) = model.params.validate() {
        warn!("skipping tick, parameters are invalid: {}", err);
        return;
    }

    if actions.reset_boids || actions.changes.num_boids_changed {
        model.flock.respawn(&model.params, &mut rand::thread_rng());
    } else if actions.changes.capacity_changed {
        model.flock.rebuild_index(model.params.quadtree_capacity);
    }

    if !model.params.pause_simulation {
        // Pointer input is read once, before any boid moves
        let pointer = model.pointer;
        model.flock.tick(&model.params, pointer);
    }

    model.debug_info.record_flock(&model.flock.stats());
}
