/*
 * Renderer Module
 *
 * This module handles the rendering of the flocking simulation.
 * The flock lives in canvas coordinates (origin top-left, y down) while nannou
 * draws around the window centre with y up, so everything passes through
 * `to_screen` on its way out.
 *
 * Normal mode fades the previous frame to leave short trails. Debug mode
 * clears the frame and shows the quadtree partition, vision circles,
 * neighbor links, velocities and the edge-avoidance vector.
 */

use log::error;
use nannou::prelude::*;

use crate::app::Model;
use crate::boid::limit;
use crate::bound::Bound;
use crate::debug::FrameRateHistory;
use crate::flock::Flock;
use crate::params::SimulationParams;
use crate::ui;

// Alpha of the black wash drawn over the previous frame in normal mode
const TRAIL_FADE: f32 = 10.0 / 255.0;
const EDGE_VECTOR_MAX: f32 = 10.0;
const VELOCITY_LINE_SCALE: f32 = 10.0;

const GRAPH_MARGIN: f32 = 10.0;
const GRAPH_HEIGHT: f32 = 60.0;

// Canvas coordinates to nannou window coordinates
#[inline]
pub fn to_screen(point: Vec2, viewport: Vec2) -> Point2 {
    pt2(point.x - viewport.x / 2.0, viewport.y / 2.0 - point.y)
}

// Nannou window coordinates to canvas coordinates
#[inline]
pub fn from_screen(point: Point2, viewport: Vec2) -> Vec2 {
    vec2(point.x + viewport.x / 2.0, viewport.y / 2.0 - point.y)
}

// Centre and size of a canvas rectangle in window coordinates
fn screen_rect(bound: Bound, viewport: Vec2) -> (Point2, Vec2) {
    let center = to_screen(bound.midpoint(), viewport);
    (center, vec2(bound.w, bound.h))
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let viewport = model.flock.size();

    if model.params.show_debug || frame.nth() == 0 {
        draw.background().color(BLACK);
    } else {
        draw.rect()
            .xy(pt2(0.0, 0.0))
            .wh(viewport)
            .color(rgba(0.0, 0.0, 0.0, TRAIL_FADE));
    }

    if model.params.show_debug {
        draw_partition(&draw, &model.flock, viewport);
        draw_debug_boids(&draw, &model.flock, &model.params, viewport);
        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect(), model.flock.boids().len());
    } else {
        for boid in model.flock.boids() {
            boid.draw(&draw, viewport, model.params.vision_radius);
        }
    }

    if model.params.show_frame_graph {
        draw_frame_graph(&draw, &model.debug_info.frame_history, model.debug_info.fps, viewport);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!("failed to draw frame: {:?}", err);
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!("failed to draw ui: {:?}", err);
    }
}

// Outline every quadtree leaf
fn draw_partition(draw: &Draw, flock: &Flock, viewport: Vec2) {
    flock.index().for_each_leaf_bound(&mut |bound: Bound| {
        let (center, size) = screen_rect(bound, viewport);
        draw.rect()
            .xy(center)
            .wh(size)
            .no_fill()
            .stroke_weight(1.0)
            .stroke(rgba(1.0, 1.0, 1.0, 150.0 / 255.0));
    });
}

fn draw_debug_boids(draw: &Draw, flock: &Flock, params: &SimulationParams, viewport: Vec2) {
    let boids = flock.boids();

    for (i, boid) in boids.iter().enumerate() {
        let pos = to_screen(boid.position, viewport);

        draw.ellipse()
            .xy(pos)
            .radius(params.vision_radius / 2.0)
            .no_fill()
            .stroke(rgba(1.0, 1.0, 1.0, 30.0 / 255.0))
            .stroke_weight(1.0);

        for j in flock.neighbors_of(i, params) {
            draw.line()
                .start(pos)
                .end(to_screen(boids[j].position, viewport))
                .weight(1.0)
                .color(rgba(0.0, 1.0, 0.0, 20.0 / 255.0));
        }

        let edge = limit(flock.edge_force(boid.position, params), EDGE_VECTOR_MAX);
        draw.line()
            .start(pos)
            .end(to_screen(boid.position + edge, viewport))
            .weight(1.0)
            .color(BLUE);
    }

    for boid in boids {
        let pos = to_screen(boid.position, viewport);
        draw.ellipse().xy(pos).radius(1.5).color(WHITE);
        draw.line()
            .start(pos)
            .end(to_screen(boid.position + boid.velocity * VELOCITY_LINE_SCALE, viewport))
            .weight(1.0)
            .color(rgba(1.0, 0.0, 0.0, 150.0 / 255.0));
    }
}

// Map a history sample into the graph panel, in canvas coordinates
fn graph_point(index: usize, samples: usize, fps: f32, max_fps: f32, panel: Bound) -> Vec2 {
    let t = if samples > 1 {
        index as f32 / (samples - 1) as f32
    } else {
        0.0
    };
    vec2(panel.x + t * panel.w, panel.bottom() - (fps / max_fps).clamp(0.0, 1.0) * panel.h)
}

fn draw_frame_graph(draw: &Draw, history: &FrameRateHistory, fps: f32, viewport: Vec2) {
    let panel = Bound::new(
        GRAPH_MARGIN,
        viewport.y - GRAPH_HEIGHT - GRAPH_MARGIN,
        (viewport.x - 2.0 * GRAPH_MARGIN).max(0.0),
        GRAPH_HEIGHT,
    );
    let (center, size) = screen_rect(panel, viewport);
    draw.rect()
        .xy(center)
        .wh(size)
        .color(rgba(0.0, 0.0, 0.0, 150.0 / 255.0));

    let label = format!("FPS: {:.2}, Average: {:.2}", fps, history.average());
    let label_pos = to_screen(vec2(panel.x + 5.0, panel.y + 8.0), viewport);
    draw.text(&label)
        .x_y(label_pos.x + 150.0, label_pos.y)
        .w(300.0)
        .left_justify()
        .color(WHITE)
        .font_size(12);

    if history.len() < 2 {
        return;
    }
    let max_fps = history.max();
    let samples = history.len();
    let points = history
        .iter()
        .enumerate()
        .map(|(i, sample)| to_screen(graph_point(i, samples, sample, max_fps, panel), viewport));
    draw.polyline().weight(1.0).points(points).color(WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_corners_map_to_window_corners() {
        let viewport = vec2(800.0, 400.0);
        assert_eq!(to_screen(vec2(0.0, 0.0), viewport), pt2(-400.0, 200.0));
        assert_eq!(to_screen(vec2(800.0, 400.0), viewport), pt2(400.0, -200.0));
        assert_eq!(to_screen(vec2(400.0, 200.0), viewport), pt2(0.0, 0.0));
    }

    #[test]
    fn from_screen_inverts_to_screen() {
        let viewport = vec2(640.0, 400.0);
        let point = vec2(123.0, 321.0);
        assert_eq!(from_screen(to_screen(point, viewport), viewport), point);
    }

    #[test]
    fn graph_points_span_the_panel() {
        let panel = Bound::new(10.0, 330.0, 780.0, 60.0);
        assert_eq!(graph_point(0, 5, 60.0, 60.0, panel), vec2(10.0, 330.0));
        assert_eq!(graph_point(4, 5, 0.0, 60.0, panel), vec2(790.0, 390.0));
        assert_eq!(graph_point(2, 5, 30.0, 60.0, panel), vec2(400.0, 360.0));
    }
}
