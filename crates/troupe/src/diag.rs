//! Frame diagnostics.
//!
//! Enabled by the `diagnostics` feature. The world counts what happened in
//! each frame; [`StatsLog`] writes a JSON snapshot of those counters to the
//! log at debug level about once per second.
//!
//! ```text
//! [DEBUG troupe::diag] frame 120: {"actors_updated":4,"actors_spawned":1,...}
//! ```

use serde::Serialize;

/// What the world did during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Actor updates run (input and update passes combined).
    pub actors_updated: u32,
    pub actors_spawned: u32,
    pub actors_destroyed: u32,
    /// Sprites visited by the render pass.
    pub sprites_drawn: usize,
    pub live_actors: usize,
    pub sprites: usize,
    pub textures: usize,
}

/// Rate-limited debug logging of [`FrameStats`].
pub(crate) struct StatsLog {
    interval: f64,
    since_report: f64,
}

impl StatsLog {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval: interval_secs,
            since_report: 0.0,
        }
    }

    /// Account for one frame. Returns `true` when a snapshot was written.
    pub fn record(&mut self, frame: u64, dt: f32, stats: &FrameStats) -> bool {
        self.since_report += f64::from(dt);
        if self.since_report < self.interval {
            return false;
        }
        self.since_report = 0.0;
        match serde_json::to_string(stats) {
            Ok(json) => log::debug!("frame {frame}: {json}"),
            Err(e) => log::warn!("Failed to serialize frame stats: {e}"),
        }
        true
    }
}
