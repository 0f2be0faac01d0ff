//! Tile progress reporting shared across worker threads

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Mosaics: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Counts finished tiles on a single progress bar
///
/// The bar is internally synchronized, so one manager can be shared by
/// reference between all workers.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a hidden progress bar; call [`Self::initialize`] to show it
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Show the bar for `tile_count` tiles
    pub fn initialize(&mut self, tile_count: usize) {
        let bar = ProgressBar::new(tile_count as u64);
        bar.set_style(TILE_STYLE.clone());
        self.bar = bar;
    }

    /// Record one finished tile
    pub fn tile_completed(&self) {
        self.bar.inc(1);
    }

    /// Number of tiles recorded so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with a summary message
    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}
