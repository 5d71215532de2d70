/*
 * Quadtree Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the flocking simulation.
 * The spatial index (bound, quadtree) and the flock engine (boid, flock, params)
 * have no windowing dependencies beyond nannou's vector types; the remaining
 * modules wire them into a nannou application.
 */

// Re-export key components for easier access
pub use app::Model;
pub use boid::Boid;
pub use bound::Bound;
pub use debug::{DebugInfo, FrameRateHistory};
pub use error::ParamsError;
pub use flock::{Flock, FlockStats, PointerState, Steering};
pub use params::SimulationParams;
pub use quadtree::{Entry, QuadTree};

// Define modules
pub mod app;
pub mod boid;
pub mod bound;
pub mod debug;
pub mod error;
pub mod flock;
pub mod input;
pub mod params;
pub mod quadtree;
pub mod renderer;
pub mod ui;

// Constants
pub const BOID_SIZE: f32 = 5.0;
