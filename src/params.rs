/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the flocking simulation. Most of them can be
 * tuned live through the UI. It also provides validation and the change
 * detection the UI uses to decide whether the population or the quadtree
 * must be rebuilt.
 */

use std::ops::RangeInclusive;

use crate::error::ParamsError;

// Parameters for the simulation that can be adjusted via UI
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub vision_radius: f32,

    // Steering weights
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
    pub edge_weight: f32,

    // Shape of the individual forces
    pub separation_exponent: f32,
    pub min_separation_distance: f32,
    pub edge_strength: f32,

    // Motion
    pub turn_rate: f32,
    pub cruise_speed: f32,
    pub speed_damping: f32,
    pub max_speed: f32,

    // Pointer annulus, expressed in multiples of the vision radius
    pub pointer_inner_factor: f32,
    pub pointer_outer_factor: f32,
    pub pointer_boost: f32,

    // Spatial index
    pub quadtree_capacity: usize,
    pub rebuild_interval: u64,

    pub canvas_height: f32,
    pub show_debug: bool,
    pub show_frame_graph: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// The values whose change needs more than a parameter swap
#[derive(Debug, Clone, Copy, PartialEq)]
struct ParamSnapshot {
    num_boids: usize,
    quadtree_capacity: usize,
}

// What a UI edit requires from the flock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub num_boids_changed: bool,
    pub capacity_changed: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 500,
            vision_radius: 25.0,
            cohesion_weight: 5.0,
            alignment_weight: 1.0,
            separation_weight: 2.0,
            edge_weight: 100.0,
            separation_exponent: 0.3,
            min_separation_distance: 1.0,
            edge_strength: 100.0,
            turn_rate: 0.03,
            cruise_speed: 1.0,
            speed_damping: 0.8,
            max_speed: 80.0,
            pointer_inner_factor: 2.0,
            pointer_outer_factor: 4.0,
            pointer_boost: 2.0,
            quadtree_capacity: 10,
            rebuild_interval: 30,
            canvas_height: 400.0,
            show_debug: false,
            show_frame_graph: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("vision_radius", self.vision_radius),
            ("min_separation_distance", self.min_separation_distance),
            ("cruise_speed", self.cruise_speed),
            ("speed_damping", self.speed_damping),
            ("max_speed", self.max_speed),
            ("canvas_height", self.canvas_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ParamsError::NotFinite { field });
            }
            if value <= 0.0 {
                return Err(ParamsError::NonPositive { field });
            }
        }

        let finite = [
            ("cohesion_weight", self.cohesion_weight),
            ("alignment_weight", self.alignment_weight),
            ("separation_weight", self.separation_weight),
            ("edge_weight", self.edge_weight),
            ("separation_exponent", self.separation_exponent),
            ("edge_strength", self.edge_strength),
            ("turn_rate", self.turn_rate),
            ("pointer_inner_factor", self.pointer_inner_factor),
            ("pointer_outer_factor", self.pointer_outer_factor),
            ("pointer_boost", self.pointer_boost),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ParamsError::NotFinite { field });
        }

        if self.quadtree_capacity == 0 {
            return Err(ParamsError::ZeroCapacity);
        }
        if self.rebuild_interval == 0 {
            return Err(ParamsError::ZeroRebuildInterval);
        }
        Ok(())
    }

    // Radii of the pointer annulus
    pub fn pointer_annulus(&self) -> (f32, f32) {
        (
            self.vision_radius * self.pointer_inner_factor,
            self.vision_radius * self.pointer_outer_factor,
        )
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            num_boids: self.num_boids,
            quadtree_capacity: self.quadtree_capacity,
        });
    }

    // Compare against the last snapshot. Without one, nothing has changed.
    pub fn detect_changes(&self) -> ParamChanges {
        match &self.previous_values {
            Some(prev) => ParamChanges {
                num_boids_changed: self.num_boids != prev.num_boids,
                capacity_changed: self.quadtree_capacity != prev.quadtree_capacity,
            },
            None => ParamChanges::default(),
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> RangeInclusive<usize> {
        1..=3000
    }

    pub fn get_vision_radius_range() -> RangeInclusive<f32> {
        5.0..=100.0
    }

    pub fn get_flock_weight_range() -> RangeInclusive<f32> {
        0.0..=20.0
    }

    pub fn get_edge_weight_range() -> RangeInclusive<f32> {
        0.0..=500.0
    }

    pub fn get_turn_rate_range() -> RangeInclusive<f32> {
        0.005..=0.2
    }

    pub fn get_capacity_range() -> RangeInclusive<usize> {
        1..=50
    }

    pub fn get_rebuild_interval_range() -> RangeInclusive<u64> {
        1..=120
    }
}
