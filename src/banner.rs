//! Auto-dismissing instruction banner.
//!
//! The hide timer runs independently of the controller: if the boundary is
//! removed before it fires, the banner still hides on schedule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Shown after a place boundary is created
pub const RESIZE_HINT: &str = "Resize the selected area to refine your search location";

/// Shown when drawing starts
pub const DRAW_HINT: &str = "Draw on the map to define your search area, then apply or cancel";

#[derive(Debug, Clone, Default)]
pub struct InstructionBanner {
    visible: Arc<AtomicBool>,
}

impl InstructionBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
    }

    /// Hide the banner; hiding an already hidden banner does nothing
    pub fn hide(&self) {
        if self.visible.swap(false, Ordering::SeqCst) {
            debug!("Instruction banner hidden");
        }
    }

    /// Show the banner and hide it after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show_for(&self, delay: Duration) -> JoinHandle<()> {
        self.show();
        let banner = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            banner.hide();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hide_is_idempotent() {
        let banner = InstructionBanner::new();
        banner.show();
        banner.hide();
        banner.hide();
        assert!(!banner.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hides_after_delay() {
        let banner = InstructionBanner::new();
        let timer = banner.show_for(Duration::from_secs(5));
        assert!(banner.is_visible());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(banner.is_visible());

        timer.await.unwrap();
        assert!(!banner.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_survives_early_hide() {
        let banner = InstructionBanner::new();
        let timer = banner.show_for(Duration::from_secs(5));

        // e.g. the boundary was removed before the delay elapsed
        banner.hide();
        assert!(!banner.is_visible());

        timer.await.unwrap();
        assert!(!banner.is_visible());
    }
}
