// Chart projector - Maps buffer state onto the two chart models
use crate::application::series_buffer::SeriesBuffer;
use crate::domain::chart::{AxisSide, AxisSpec, ChartKind, ChartModel, Dataset};

/// Points kept in the rolling line view.
const ROLLING_WINDOW: usize = 50;

/// Round to two decimal places, the same rule for every rendered value.
/// Applying it twice yields the same result, so re-projection is stable.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Owns both chart models for the whole session. Projections replace labels
/// and dataset values only; the models themselves are never reconstructed,
/// which keeps renderer-side identity (and animations) intact.
pub struct ChartProjector {
    snapshot: ChartModel,
    rolling: ChartModel,
}

impl ChartProjector {
    pub fn new() -> Self {
        let mut snapshot = ChartModel::new(
            "training-snapshot",
            "Latest training metrics",
            ChartKind::Bar,
            AxisSpec::unbounded("Training metrics"),
            AxisSpec::bounded("Success rate (%)", 0.0, 100.0),
            2,
            vec![
                Dataset::new("metrics", "Training metrics", AxisSide::Primary),
                Dataset::new("success_rate", "Success rate (%)", AxisSide::Secondary),
            ],
        );
        snapshot.labels = ["reward", "loss", "efficiency", "success_rate"]
            .into_iter()
            .map(String::from)
            .collect();

        let rolling = ChartModel::new(
            "training-rolling",
            "Training progress",
            ChartKind::Line,
            AxisSpec::unbounded("Reward / loss"),
            AxisSpec::bounded("Success rate (%)", 0.0, 100.0),
            2,
            vec![
                Dataset::new("rewards", "Reward", AxisSide::Primary),
                Dataset::new("losses", "Loss", AxisSide::Primary),
                Dataset::new("success_rates", "Success rate (%)", AxisSide::Secondary),
            ],
        );

        Self { snapshot, rolling }
    }

    pub fn snapshot(&self) -> &ChartModel {
        &self.snapshot
    }

    pub fn rolling(&self) -> &ChartModel {
        &self.rolling
    }

    /// Recompute both views from the buffer. Deterministic: projecting the
    /// same buffer twice produces identical output.
    pub fn project(&mut self, buffer: &SeriesBuffer) {
        self.project_snapshot(buffer);
        self.project_rolling(buffer);
    }

    fn project_snapshot(&mut self, buffer: &SeriesBuffer) {
        let latest = buffer.latest();
        if latest.rewards.is_empty() {
            // Nothing to show; clear rather than keep stale values around.
            for dataset in &mut self.snapshot.datasets {
                dataset.data.clear();
            }
            return;
        }

        let idx = latest.rewards.len() - 1;
        let metrics = vec![
            round2(value_at(&latest.rewards, idx)),
            round2(value_at(&latest.losses, idx)),
            round2(value_at(&latest.efficiency, idx)),
        ];
        let success = vec![round2(value_at(&latest.success_rates, idx))];

        if let Some(dataset) = self.snapshot.dataset_mut("metrics") {
            dataset.data = metrics;
        }
        if let Some(dataset) = self.snapshot.dataset_mut("success_rate") {
            dataset.data = success;
        }
    }

    fn project_rolling(&mut self, buffer: &SeriesBuffer) {
        let window = buffer.windowed(ROLLING_WINDOW);

        self.rolling.labels = window.episodes.iter().map(i64::to_string).collect();
        if let Some(dataset) = self.rolling.dataset_mut("rewards") {
            dataset.data = rounded(&window.rewards);
        }
        if let Some(dataset) = self.rolling.dataset_mut("losses") {
            dataset.data = rounded(&window.losses);
        }
        if let Some(dataset) = self.rolling.dataset_mut("success_rates") {
            dataset.data = rounded(&window.success_rates);
        }
    }
}

impl Default for ChartProjector {
    fn default() -> Self {
        Self::new()
    }
}

fn value_at(series: &[f64], idx: usize) -> f64 {
    series.get(idx).copied().unwrap_or(0.0)
}

fn rounded(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| round2(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::training::TrainingSnapshot;

    fn buffer_with(snapshot: TrainingSnapshot) -> SeriesBuffer {
        let mut buffer = SeriesBuffer::new();
        buffer.ingest(snapshot);
        buffer
    }

    #[test]
    fn test_round2_is_idempotent() {
        for x in [1.005, 0.333, 88.2, 92.456, -3.14159, 0.0, 1e6 + 0.555] {
            let once = round2(x);
            assert_eq!(round2(once), once, "round2 unstable for {x}");
        }
    }

    #[test]
    fn test_snapshot_view_splits_axes_and_rounds() {
        let mut projector = ChartProjector::new();
        let buffer = buffer_with(TrainingSnapshot {
            episodes: vec![1],
            rewards: vec![1.005],
            losses: vec![0.333],
            efficiency: vec![88.2],
            success_rates: vec![92.456],
            ..TrainingSnapshot::default()
        });

        projector.project(&buffer);

        let snapshot = projector.snapshot();
        assert_eq!(snapshot.dataset("metrics").unwrap().data, vec![1.0, 0.33, 88.2]);
        assert_eq!(snapshot.dataset("success_rate").unwrap().data, vec![92.46]);
        assert_eq!(snapshot.secondary_axis.max, Some(100.0));
    }

    #[test]
    fn test_snapshot_view_uses_latest_point() {
        let mut projector = ChartProjector::new();
        let buffer = buffer_with(TrainingSnapshot {
            episodes: vec![1, 2],
            rewards: vec![0.5, 2.0],
            losses: vec![0.4, 0.1],
            efficiency: vec![70.0, 75.5],
            success_rates: vec![50.0, 60.0],
        });

        projector.project(&buffer);
        assert_eq!(
            projector.snapshot().dataset("metrics").unwrap().data,
            vec![2.0, 0.1, 75.5]
        );
    }

    #[test]
    fn test_missing_series_value_projects_as_zero() {
        let mut projector = ChartProjector::new();
        let buffer = buffer_with(TrainingSnapshot {
            episodes: vec![1, 2],
            rewards: vec![0.5, 2.0],
            losses: vec![0.4],
            ..TrainingSnapshot::default()
        });

        projector.project(&buffer);
        assert_eq!(
            projector.snapshot().dataset("metrics").unwrap().data,
            vec![2.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_rolling_view_windows_and_rounds() {
        let mut projector = ChartProjector::new();
        let buffer = buffer_with(TrainingSnapshot {
            episodes: (1..=60).collect(),
            rewards: (1..=60).map(|i| f64::from(i) + 0.005).collect(),
            losses: (1..=60).map(|i| f64::from(i) / 3.0).collect(),
            efficiency: vec![0.0; 60],
            success_rates: (1..=60).map(|i| f64::from(i) + 0.456).collect(),
        });

        projector.project(&buffer);

        let rolling = projector.rolling();
        assert_eq!(rolling.labels.len(), 50);
        assert_eq!(rolling.labels.first().map(String::as_str), Some("11"));
        assert_eq!(rolling.labels.last().map(String::as_str), Some("60"));

        let rewards = &rolling.dataset("rewards").unwrap().data;
        assert_eq!(rewards.len(), 50);
        assert_eq!(rewards[0], 11.0);
        assert_eq!(rewards[49], 60.0);
        assert_eq!(rolling.dataset("losses").unwrap().data[0], round2(11.0 / 3.0));
        assert_eq!(rolling.dataset("success_rates").unwrap().data[49], 60.46);
    }

    #[test]
    fn test_reprojection_is_stable() {
        let mut projector = ChartProjector::new();
        let buffer = buffer_with(TrainingSnapshot {
            episodes: vec![1, 2, 3],
            rewards: vec![1.005, 2.675, 3.0],
            losses: vec![0.1, 0.2, 0.3],
            efficiency: vec![80.0, 81.0, 82.0],
            success_rates: vec![10.0, 20.0, 30.0],
        });

        projector.project(&buffer);
        let first = projector.rolling().dataset("rewards").unwrap().data.clone();
        projector.project(&buffer);
        assert_eq!(projector.rolling().dataset("rewards").unwrap().data, first);
    }

    #[test]
    fn test_empty_buffer_clears_datasets() {
        let mut projector = ChartProjector::new();
        let mut buffer = buffer_with(TrainingSnapshot {
            episodes: vec![1],
            rewards: vec![1.0],
            losses: vec![0.5],
            efficiency: vec![90.0],
            success_rates: vec![75.0],
        });
        projector.project(&buffer);
        assert!(!projector.snapshot().dataset("metrics").unwrap().data.is_empty());

        buffer.ingest(TrainingSnapshot::default());
        projector.project(&buffer);

        assert!(projector.snapshot().dataset("metrics").unwrap().data.is_empty());
        assert!(projector.snapshot().dataset("success_rate").unwrap().data.is_empty());
        assert!(projector.rolling().dataset("rewards").unwrap().data.is_empty());
        assert!(projector.rolling().labels.is_empty());
    }

    #[test]
    fn test_chart_models_keep_their_identity() {
        let mut projector = ChartProjector::new();
        let snapshot_id = projector.snapshot().id.clone();
        let dataset_ids: Vec<String> = projector
            .rolling()
            .datasets
            .iter()
            .map(|d| d.id.clone())
            .collect();

        let buffer = buffer_with(TrainingSnapshot {
            episodes: vec![1],
            rewards: vec![1.0],
            ..TrainingSnapshot::default()
        });
        projector.project(&buffer);

        assert_eq!(projector.snapshot().id, snapshot_id);
        let after: Vec<String> = projector
            .rolling()
            .datasets
            .iter()
            .map(|d| d.id.clone())
            .collect();
        assert_eq!(after, dataset_ids);
    }
}
