//! Factory preset bank.
//!
//! Presets are baked into the binary from `presets.json` and keyed by the
//! stable integer control IDs, so stored values survive any renaming of the
//! user-facing parameters. A malformed bank degrades to empty instead of
//! failing the plugin.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dsp::controls::{ControlId, ExciterControls};

/// One stored preset: control values keyed by stable control ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPreset {
    #[serde(default)]
    pub description: String,
    pub values: HashMap<u32, f64>,
}

#[derive(Debug, Default)]
pub struct PresetBank {
    presets: HashMap<String, StoredPreset>,
}

impl PresetBank {
    /// Load the baked-in factory bank. Parsing problems yield an empty bank.
    pub fn factory() -> Self {
        Self::from_json(include_str!("../presets.json"))
    }

    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<HashMap<String, StoredPreset>>(raw) {
            Ok(presets) => Self { presets },
            Err(_) => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Preset names, sorted for stable display order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, name: &str) -> Option<&StoredPreset> {
        self.presets.get(name)
    }

    /// Write a preset's values into a control snapshot through the keyed
    /// update path. Unknown control IDs in the stored data are skipped.
    /// Returns false if the preset does not exist.
    pub fn apply(&self, name: &str, controls: &mut ExciterControls) -> bool {
        let Some(preset) = self.presets.get(name) else {
            return false;
        };
        for (&id, &value) in &preset.values {
            if let Some(control) = ControlId::from_id(id) {
                controls.set(control, value);
            }
        }
        true
    }
}
