// Renderable chart descriptions
//
// These are handed to the rendering sink as-is. A chart model is built once
// per session and keeps its identity; projections replace labels and dataset
// values only, so the renderer can update in place instead of rebuilding.

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// Which vertical axis a dataset is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Primary,
    Secondary,
}

#[derive(Debug, Clone)]
pub struct AxisSpec {
    pub title: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AxisSpec {
    pub fn unbounded(title: &str) -> Self {
        Self {
            title: title.to_string(),
            min: None,
            max: None,
        }
    }

    pub fn bounded(title: &str, min: f64, max: f64) -> Self {
        Self {
            title: title.to_string(),
            min: Some(min),
            max: Some(max),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: String,
    pub label: String,
    pub axis: AxisSide,
    pub data: Vec<f64>,
}

impl Dataset {
    pub fn new(id: &str, label: &str, axis: AxisSide) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            axis,
            data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartModel {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub primary_axis: AxisSpec,
    pub secondary_axis: AxisSpec,
    pub fraction_digits: i32,
    pub datasets: Vec<Dataset>,
}

impl ChartModel {
    pub fn new(
        id: &str,
        title: &str,
        kind: ChartKind,
        primary_axis: AxisSpec,
        secondary_axis: AxisSpec,
        fraction_digits: i32,
        datasets: Vec<Dataset>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            labels: Vec::new(),
            primary_axis,
            secondary_axis,
            fraction_digits,
            datasets,
        }
    }

    pub fn dataset(&self, id: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    pub fn dataset_mut(&mut self, id: &str) -> Option<&mut Dataset> {
        self.datasets.iter_mut().find(|d| d.id == id)
    }
}
