// Equipment state domain models and the partial-update merge
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Discrete status of one processing chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChamberStatus {
    Idle,
    Loading,
    Processing,
    Unloading,
    Cleaning,
    // Transitional states of the chamber doors and loadlocks.
    DoorOpening,
    DoorClosing,
    Pumping,
    Venting,
    Fault,
}

impl fmt::Display for ChamberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChamberStatus::Idle => "idle",
            ChamberStatus::Loading => "loading",
            ChamberStatus::Processing => "processing",
            ChamberStatus::Unloading => "unloading",
            ChamberStatus::Cleaning => "cleaning",
            ChamberStatus::DoorOpening => "door_opening",
            ChamberStatus::DoorClosing => "door_closing",
            ChamberStatus::Pumping => "pumping",
            ChamberStatus::Venting => "venting",
            ChamberStatus::Fault => "fault",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChamberState {
    pub status: ChamberStatus,
}

/// Sparse equipment-state payload. Every field is independently optional;
/// absence means "unchanged", never "cleared".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhysicsUpdate {
    #[serde(default)]
    pub pm_chambers: Option<HashMap<String, ChamberState>>,
    #[serde(default)]
    pub active_wafers: Option<u32>,
    #[serde(default)]
    pub processing_chambers: Option<u32>,
    #[serde(default)]
    pub throughput: Option<f64>,
}

/// Persistent UI-facing equipment state, built up by merging sparse updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhysicsState {
    pub chambers: HashMap<String, ChamberState>,
    pub active_wafers: Option<u32>,
    pub processing_chambers: Option<u32>,
    pub throughput: Option<f64>,
}

impl PhysicsState {
    /// Right-biased merge: present scalar fields overwrite, absent ones
    /// retain their prior value; chamber ids merge key-by-key, so an update
    /// touching only "pm1" leaves every other chamber untouched.
    pub fn apply(&mut self, update: &PhysicsUpdate) {
        if let Some(chambers) = &update.pm_chambers {
            for (id, state) in chambers {
                self.chambers.insert(id.clone(), *state);
            }
        }
        if let Some(active) = update.active_wafers {
            self.active_wafers = Some(active);
        }
        if let Some(processing) = update.processing_chambers {
            self.processing_chambers = Some(processing);
        }
        if let Some(throughput) = update.throughput {
            self.throughput = Some(throughput);
        }
    }
}
