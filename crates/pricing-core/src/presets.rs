use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::roi::RoiInput;
use crate::tri_pillar::TriPillarInput;
use crate::PricingResult;

/// String key-value persistence for calculator presets.
///
/// Values are JSON strings and writes are last-write-wins, matching the
/// browser localStorage contract the presets originally lived behind.
pub trait PresetStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
    fn keys(&self) -> Vec<String>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl PresetStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// A saved calculator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorPreset {
    Roi(RoiInput),
    TriPillar(TriPillarInput),
}

/// Serialize `preset` and store it under `name`, replacing any previous
/// value.
pub fn save_preset(
    store: &mut dyn PresetStore,
    name: &str,
    preset: &CalculatorPreset,
) -> PricingResult<()> {
    let value = serde_json::to_string(preset)?;
    store.put(name, value);
    Ok(())
}

/// Load and deserialize the preset stored under `name`.
pub fn load_preset(store: &dyn PresetStore, name: &str) -> PricingResult<CalculatorPreset> {
    let raw = store
        .get(name)
        .ok_or_else(|| PricingError::PresetNotFound(name.to_string()))?;
    Ok(serde_json::from_str(&raw)?)
}
