use crate::domain::model::RenderNode;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PassStats {
    pub nodes_rendered: usize,
    pub nodes_failed: usize,
    pub elapsed_time: Duration,
}

/// Per-pass composition stats. Disabled monitors cost nothing and log nothing.
#[derive(Debug)]
pub struct PassMonitor {
    start_time: Instant,
    enabled: bool,
}

impl PassMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn stats_for(&self, tree: &RenderNode) -> Option<PassStats> {
        if !self.enabled {
            return None;
        }
        let failed = tree.collect_failures().len();
        Some(PassStats {
            nodes_rendered: tree.node_count() - failed,
            nodes_failed: failed,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, tree: &RenderNode) {
        if let Some(stats) = self.stats_for(tree) {
            tracing::info!(
                "📊 Pass complete - Rendered: {}, Failed: {}, Time: {:?}",
                stats.nodes_rendered,
                stats.nodes_failed,
                stats.elapsed_time
            );
        }
    }
}

impl Default for PassMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
