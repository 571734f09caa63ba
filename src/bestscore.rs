//! Local best-time persistence
//!
//! The single best (lowest) winning time lives in LocalStorage as a small
//! JSON blob. Corrupt or missing entries are treated as "no record yet".

use serde::{Deserialize, Serialize};

/// The best completed round on this browser
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestScore {
    /// Winning time in seconds (lower is better)
    pub time_secs: f32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flock_sort_best_score";

    /// Whether a new time beats this record
    pub fn is_beaten_by(&self, time_secs: f32) -> bool {
        time_secs < self.time_secs
    }

    /// Load the stored record, if any (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        let json = storage.get_item(Self::STORAGE_KEY).ok()??;
        match serde_json::from_str(&json) {
            Ok(score) => Some(score),
            Err(err) => {
                log::warn!("Discarding corrupt best score: {err}");
                None
            }
        }
    }

    /// Persist this record (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved: {:.2}s", self.time_secs);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Option<Self> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Record a winning time if it beats the stored best.
/// Returns `true` when a new record was set.
pub fn record_time(time_secs: f32, timestamp: f64) -> bool {
    let current = BestScore::load();
    let is_record = current.is_none_or(|best| best.is_beaten_by(time_secs));

    if is_record {
        BestScore {
            time_secs,
            timestamp,
        }
        .save();
    }

    is_record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_time_beats_record() {
        let best = BestScore {
            time_secs: 12.5,
            timestamp: 0.0,
        };
        assert!(best.is_beaten_by(10.0));
        assert!(!best.is_beaten_by(12.5));
        assert!(!best.is_beaten_by(20.0));
    }

    #[test]
    fn test_json_shape_is_stable() {
        let best = BestScore {
            time_secs: 7.25,
            timestamp: 1_700_000_000_000.0,
        };
        let json = serde_json::to_string(&best).unwrap();
        let back: BestScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, best);
    }

    #[test]
    fn test_record_with_no_prior_best() {
        // Native load() is always None, so any time is a record
        assert!(record_time(42.0, 0.0));
    }
}
