/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and flock statistics displayed in the UI and the overlays.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - A rolling frame-rate history for the frame graph
 * - Average neighbor count
 * - Quadtree shape (leaf count and depth) and rebuild count
 */

use std::collections::VecDeque;
use std::time::Duration;

use crate::flock::FlockStats;

pub const FRAME_HISTORY_SIZE: usize = 100;

// The frame graph is never scaled below this rate
pub const FRAME_GRAPH_FLOOR: f32 = 60.0;

// Rolling window of frame-rate samples, oldest first
#[derive(Debug, Clone)]
pub struct FrameRateHistory {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl Default for FrameRateHistory {
    fn default() -> Self {
        Self::with_capacity(FRAME_HISTORY_SIZE)
    }
}

impl FrameRateHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, fps: f32) {
        if !fps.is_finite() {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(fps);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    pub fn average(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    // Upper end of the graph scale
    pub fn max(&self) -> f32 {
        self.samples.iter().copied().fold(FRAME_GRAPH_FLOOR, f32::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }
}

// Debug information to display
#[derive(Debug, Clone)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub frame_history: FrameRateHistory,
    pub ticks: u64,
    pub rebuilds: u64,
    pub average_neighbors: f32,
    pub quadtree_leaves: usize,
    pub quadtree_depth: usize,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            frame_history: FrameRateHistory::default(),
            ticks: 0,
            rebuilds: 0,
            average_neighbors: 0.0,
            quadtree_leaves: 1,
            quadtree_depth: 1,
        }
    }
}

impl DebugInfo {
    // Record one frame's timing
    pub fn record_frame(&mut self, fps: f32, frame_time: Duration) {
        self.fps = fps;
        self.frame_time = frame_time;
        self.frame_history.push(fps);
    }

    pub fn record_flock(&mut self, stats: &FlockStats) {
        self.ticks = stats.ticks;
        self.rebuilds = stats.rebuilds;
        self.average_neighbors = stats.average_neighbors;
        self.quadtree_leaves = stats.leaves;
        self.quadtree_depth = stats.depth;
    }
}
