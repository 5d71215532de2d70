/*
 * Quadtree Flocking Simulation
 *
 * Boids steer by cohesion, alignment, separation and a soft push away from
 * the canvas edges. Neighbor lookups go through a quadtree that is rebuilt on
 * a fixed tick interval. Pressing the left mouse button scatters boids in a
 * ring around the pointer.
 *
 * Set RUST_LOG (e.g. RUST_LOG=flocking=debug) to change the log level.
 */

use flocking::app::{model, update};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(model).update(update).run();
}
