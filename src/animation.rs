//! Sprite animation player.
//!
//! Runs on the presentation task. Holds a one-entry frame cache keyed by
//! `(species, shiny)` and a single pending-advance deadline, so at most one
//! advance is ever scheduled and re-triggering the same key never restarts
//! the sequence.

use crate::constants::{COMMON_FRAME_DELAY_MS, SHINY_FRAME_DELAY_MS};
use crate::sprites::{Frame, FrameSource};
use std::time::{Duration, Instant};

/// Cache key for the currently loaded frame sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimKey {
    pub species: String,
    pub rarity: String,
    pub is_shiny: bool,
}

pub struct AnimationPlayer<S: FrameSource> {
    source: S,
    loaded: Option<AnimKey>,
    frames: Vec<Frame>,
    index: usize,
    next_advance: Option<Instant>,
    /// Last key that failed to resolve, kept so the error is reported once.
    failed_key: Option<AnimKey>,
}

impl<S: FrameSource> AnimationPlayer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            loaded: None,
            frames: Vec::new(),
            index: 0,
            next_advance: None,
            failed_key: None,
        }
    }

    fn frame_delay(is_shiny: bool) -> Duration {
        // Shiny variants animate at half speed; a pacing choice carried over
        // from the original.
        if is_shiny {
            Duration::from_millis(SHINY_FRAME_DELAY_MS)
        } else {
            Duration::from_millis(COMMON_FRAME_DELAY_MS)
        }
    }

    /// Points the player at a new encounter.
    ///
    /// The same key as currently loaded is a no-op: the running sequence
    /// keeps its index and cadence. A new key cancels the pending advance,
    /// reloads frames and restarts from index 0. On a load failure the
    /// previous frames stay on screen and the error message is returned
    /// once per failing key.
    pub fn show(&mut self, key: AnimKey, now: Instant) -> Option<String> {
        if self.loaded.as_ref() == Some(&key) {
            return None;
        }

        match self.source.load(&key.species, &key.rarity, key.is_shiny) {
            Ok(frames) => {
                self.next_advance = None;
                self.frames = frames;
                self.index = 0;
                self.failed_key = None;
                if self.frames.is_empty() {
                    // Nothing to render and nothing to schedule.
                    self.loaded = Some(key);
                } else {
                    self.next_advance = Some(now + Self::frame_delay(key.is_shiny));
                    self.loaded = Some(key);
                }
                None
            }
            Err(e) => {
                if self.failed_key.as_ref() == Some(&key) {
                    return None;
                }
                self.failed_key = Some(key);
                Some(e.to_string())
            }
        }
    }

    /// Advances the frame index if the scheduled deadline has passed.
    pub fn poll(&mut self, now: Instant) {
        let Some(deadline) = self.next_advance else {
            return;
        };
        if now < deadline || self.frames.is_empty() {
            return;
        }

        self.index = (self.index + 1) % self.frames.len();
        let is_shiny = self.loaded.as_ref().map(|k| k.is_shiny).unwrap_or(false);
        self.next_advance = Some(now + Self::frame_delay(is_shiny));
    }

    /// The frame to render right now, if any sequence is loaded.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.index % self.frames.len().max(1))
    }

    pub fn frame_index(&self) -> usize {
        self.index
    }

    /// Drops the pending advance; used on shutdown.
    pub fn cancel(&mut self) {
        self.next_advance = None;
    }

    #[cfg(test)]
    fn has_pending_advance(&self) -> bool {
        self.next_advance.is_some()
    }
}
