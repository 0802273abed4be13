// Training metrics domain models
use serde::Deserialize;

/// Complete-to-date training series, index-aligned by episode.
///
/// The telemetry source re-sends the whole history on every update, so a
/// snapshot replaces whatever came before it; there is no delta handling.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrainingSnapshot {
    #[serde(default)]
    pub episodes: Vec<i64>,
    #[serde(default)]
    pub rewards: Vec<f64>,
    #[serde(default)]
    pub losses: Vec<f64>,
    #[serde(default)]
    pub efficiency: Vec<f64>,
    #[serde(default)]
    pub success_rates: Vec<f64>,
}

impl TrainingSnapshot {
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty() && self.rewards.is_empty()
    }

    /// Tail window of the last `n` episode-aligned points.
    ///
    /// A series that is entirely empty stays empty in the window; a series
    /// that is merely shorter than the episode axis reads 0.0 for the
    /// missing positions rather than borrowing a stale value.
    pub fn window(&self, n: usize) -> SeriesWindow {
        let start = self.episodes.len().saturating_sub(n);
        let range = start..self.episodes.len();

        SeriesWindow {
            episodes: self.episodes[range.clone()].to_vec(),
            rewards: aligned_tail(&self.rewards, range.clone()),
            losses: aligned_tail(&self.losses, range.clone()),
            efficiency: aligned_tail(&self.efficiency, range.clone()),
            success_rates: aligned_tail(&self.success_rates, range),
        }
    }
}

fn aligned_tail(series: &[f64], range: std::ops::Range<usize>) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }
    range
        .map(|i| series.get(i).copied().unwrap_or(0.0))
        .collect()
}

/// Read-only windowed view over a [`TrainingSnapshot`], recomputed on every
/// read and never mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesWindow {
    pub episodes: Vec<i64>,
    pub rewards: Vec<f64>,
    pub losses: Vec<f64>,
    pub efficiency: Vec<f64>,
    pub success_rates: Vec<f64>,
}

impl SeriesWindow {
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}
