//! Deterministic rotation of a gallery's image selection.
//!
//! A gallery can show a different subset of its category every hour or every
//! day without storing anything: the order is a pure function of the
//! candidate list, the rotation stream and the current time bucket.
//!
//! ## Seeding
//!
//! ```text
//! bucket  = now (UTC) truncated to the hour  → "2026-10-15-09"
//!                         or to the day      → "2026-10-15"
//! key     = "{bucket}|{group_key}"
//! seed    = crc32(key)
//! order   = Fisher–Yates over the candidates with StdRng::seed_from_u64(seed)
//! ```
//!
//! The generator is constructed per call, so concurrent galleries never
//! share or disturb each other's random state. `group_key` separates
//! independent streams (the CLI uses `"{category}|{mode}"`).

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How often the shuffle order changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPeriod {
    /// No shuffle; input order is kept.
    #[default]
    None,
    Hourly,
    Daily,
}

impl RotationPeriod {
    /// Parse a user-supplied cycle name. Unknown names mean no rotation.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "hourly" => RotationPeriod::Hourly,
            "daily" => RotationPeriod::Daily,
            _ => RotationPeriod::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RotationPeriod::None => "none",
            RotationPeriod::Hourly => "hourly",
            RotationPeriod::Daily => "daily",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    pub period: RotationPeriod,
    pub group_key: String,
    /// Maximum number of images returned. Always at least 1.
    pub cap: usize,
}

impl RotationConfig {
    pub fn new(period: RotationPeriod, group_key: impl Into<String>, cap: usize) -> Self {
        Self {
            period,
            group_key: group_key.into(),
            cap: cap.max(1),
        }
    }
}

/// Calendar string of the bucket `now` falls into, or `None` without rotation.
pub fn bucket_label(period: RotationPeriod, now: DateTime<Utc>) -> Option<String> {
    match period {
        RotationPeriod::None => None,
        RotationPeriod::Hourly => Some(now.format("%Y-%m-%d-%H").to_string()),
        RotationPeriod::Daily => Some(now.format("%Y-%m-%d").to_string()),
    }
}

/// Seed for the shuffle in the bucket containing `now`.
pub fn bucket_seed(cfg: &RotationConfig, now: DateTime<Utc>) -> Option<u32> {
    bucket_label(cfg.period, now).map(|bucket| {
        let key = format!("{bucket}|{}", cfg.group_key);
        crc32fast::hash(key.as_bytes())
    })
}

/// Select up to `cfg.cap` candidates, shuffled stably for the current bucket.
///
/// Never fails: an empty candidate list yields an empty selection.
pub fn select<T: Clone>(candidates: &[T], cfg: &RotationConfig, now: DateTime<Utc>) -> Vec<T> {
    let cap = cfg.cap.max(1);
    let mut selected = candidates.to_vec();

    if let Some(seed) = bucket_seed(cfg, now) {
        log::debug!(
            "rotating {} candidates for '{}' with seed {seed:#010x}",
            selected.len(),
            cfg.group_key
        );
        shuffle(&mut selected, seed);
    }

    selected.truncate(cap);
    selected
}

/// Fisher–Yates in index order: position `i` swaps with a uniform pick from `0..=i`.
fn shuffle<T>(items: &mut [T], seed: u32) {
    let mut rng = StdRng::seed_from_u64(u64::from(seed));
    for i in 1..items.len() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
