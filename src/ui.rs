/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};

// What the flock has to do after this frame's UI pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiActions {
    pub reset_boids: bool,
    pub changes: ParamChanges,
}

pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> UiActions {
    let mut reset_boids = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Flock Controls")
        .default_pos([10.0, 10.0])
        .default_open(false)
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, SimulationParams::get_num_boids_range()).text("Number of Boids"));
                if ui.button("Reset Boids").clicked() {
                    reset_boids = true;
                }
                ui.add(egui::Slider::new(&mut params.vision_radius, SimulationParams::get_vision_radius_range()).text("Vision Radius"));
                ui.add(egui::Slider::new(&mut params.turn_rate, SimulationParams::get_turn_rate_range()).text("Turn Rate"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::get_flock_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, SimulationParams::get_flock_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.separation_weight, SimulationParams::get_flock_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.edge_weight, SimulationParams::get_edge_weight_range()).text("Edge Weight"));
            });

            ui.collapsing("Quadtree", |ui| {
                ui.add(egui::Slider::new(&mut params.quadtree_capacity, SimulationParams::get_capacity_range()).text("Leaf Capacity"));
                ui.add(egui::Slider::new(&mut params.rebuild_interval, SimulationParams::get_rebuild_interval_range()).text("Rebuild Every (ticks)"));
                ui.label(format!("Leaves: {}", debug_info.quadtree_leaves));
                ui.label(format!("Depth: {}", debug_info.quadtree_depth));
                ui.label(format!("Rebuilds: {}", debug_info.rebuilds));
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Avg neighbors: {:.2}", debug_info.average_neighbors));

            ui.checkbox(&mut params.show_debug, "Debug Overlay (Space)");
            ui.checkbox(&mut params.show_frame_graph, "Frame Graph (F)");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    UiActions {
        reset_boids,
        changes: params.detect_changes(),
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    boids_len: usize,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Boids: {}", boids_len),
        format!("Avg neighbors: {:.2}", debug_info.average_neighbors),
        format!("Leaves: {} (depth {})", debug_info.quadtree_leaves, debug_info.quadtree_depth),
        format!("Tick: {}", debug_info.ticks),
    ];

    let panel_height = line_height * debug_texts.len() as f32 + margin;
    draw.rect()
        .x_y(window_rect.right() - panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(text)
            .x_y(text_x + 80.0, y)
            .w(panel_width)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
