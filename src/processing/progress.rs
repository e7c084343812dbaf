//! # Progress Reporting
//!
//! Long embed/extract passes report how many bits they have processed
//! through an explicit callback, invoked every `interval` bits. The same
//! cadence is used to poll an optional cancellation flag, so a caller on
//! another thread can stop a pass by setting an [`AtomicBool`].
//!
//! ```rust,ignore
//! let cancel = AtomicBool::new(false);
//! let mut progress = Progress::new(1000)
//!     .on_progress(|done, total| println!("{done}/{total}"))
//!     .with_cancel_flag(&cancel);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::common::error::{Result, StegoError};

/// Callback cadence used by the binaries unless configured otherwise.
pub const DEFAULT_INTERVAL_BITS: usize = 1000;

/// Progress callback plus optional cancellation flag for one pass.
pub struct Progress<'a> {
    interval: usize,
    callback: Option<Box<dyn FnMut(usize, usize) + 'a>>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Progress<'a> {
    /// No callback, no cancellation.
    pub fn silent() -> Self {
        Self::new(DEFAULT_INTERVAL_BITS)
    }

    /// Report every `interval` bits. An interval of 0 is treated as 1.
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            callback: None,
            cancel: None,
        }
    }

    /// Register `callback(done, total)`.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, usize) + 'a,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Called once per processed bit. Only acts on interval boundaries.
    pub fn tick(&mut self, done: usize, total: usize) -> Result<()> {
        if done % self.interval != 0 {
            return Ok(());
        }
        if self.cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
            return Err(StegoError::Cancelled);
        }
        if let Some(callback) = self.callback.as_mut() {
            callback(done, total);
        }
        Ok(())
    }

    /// Report completion.
    pub fn finish(&mut self, total: usize) {
        if let Some(callback) = self.callback.as_mut() {
            callback(total, total);
        }
    }
}

impl Default for Progress<'_> {
    fn default() -> Self {
        Self::silent()
    }
}

impl fmt::Debug for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress")
            .field("interval", &self.interval)
            .field("has_callback", &self.callback.is_some())
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}
