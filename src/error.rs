/*
 * Error Module
 *
 * Physics never fails at runtime: out-of-range input is clamped or ignored.
 * The only errors surface when a flock is built from unusable parameters.
 */

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("quadtree capacity must be at least 1")]
    ZeroCapacity,

    #[error("rebuild interval must be at least one tick")]
    ZeroRebuildInterval,

    #[error("viewport {width}x{height} has no area")]
    EmptyViewport { width: f32, height: f32 },
}
