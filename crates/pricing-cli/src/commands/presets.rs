use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use serde_json::Value;

use pricing_core::presets::{load_preset, save_preset, CalculatorPreset, PresetStore};
use pricing_core::roi::RoiInput;
use pricing_core::tri_pillar::TriPillarInput;

use crate::input;

const DEFAULT_PRESET_FILE: &str = ".roical-presets.json";

/// Which calculator a preset belongs to
#[derive(Debug, Clone, ValueEnum)]
pub enum CalculatorKind {
    Roi,
    TriPillar,
}

#[derive(Subcommand)]
pub enum PresetCommand {
    /// Save a calculator input under a name
    Save {
        /// Preset name
        name: String,

        /// Path to a JSON/YAML calculator input
        #[arg(long)]
        input: String,

        /// Which calculator the input belongs to
        #[arg(long, value_enum, default_value = "roi")]
        calculator: CalculatorKind,

        /// Preset file
        #[arg(long, default_value = DEFAULT_PRESET_FILE)]
        file: String,
    },
    /// Print a saved preset
    Load {
        /// Preset name
        name: String,

        /// Preset file
        #[arg(long, default_value = DEFAULT_PRESET_FILE)]
        file: String,
    },
    /// List saved preset names
    List {
        /// Preset file
        #[arg(long, default_value = DEFAULT_PRESET_FILE)]
        file: String,
    },
    /// Delete a saved preset
    Delete {
        /// Preset name
        name: String,

        /// Preset file
        #[arg(long, default_value = DEFAULT_PRESET_FILE)]
        file: String,
    },
}

/// JSON-object file backing the core preset store. The whole map is read on
/// open and rewritten on flush; fine for a handful of presets, and it keeps
/// the on-disk format a plain string-to-string object.
struct FilePresetStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FilePresetStore {
    fn open(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let entries = match fs::read_to_string(path) {
            Ok(contents) if !contents.trim().is_empty() => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse preset file '{}': {}", path, e))?,
            // Missing or empty file starts an empty store
            _ => BTreeMap::new(),
        };
        Ok(Self {
            path: PathBuf::from(path),
            entries,
        })
    }

    fn flush(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents)
            .map_err(|e| format!("Failed to write '{}': {}", self.path.display(), e))?;
        Ok(())
    }
}

impl PresetStore for FilePresetStore {
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
        self.entries.keys().cloned().collect()
    }
}

pub fn run_preset(command: PresetCommand) -> Result<Value, Box<dyn std::error::Error>> {
    match command {
        PresetCommand::Save {
            name,
            input: input_path,
            calculator,
            file,
        } => {
            let preset = match calculator {
                CalculatorKind::Roi => {
                    let parsed: RoiInput = input::file::read_input(&input_path)?;
                    CalculatorPreset::Roi(parsed)
                }
                CalculatorKind::TriPillar => {
                    let parsed: TriPillarInput = input::file::read_input(&input_path)?;
                    CalculatorPreset::TriPillar(parsed)
                }
            };

            let mut store = FilePresetStore::open(&file)?;
            save_preset(&mut store, &name, &preset)?;
            store.flush()?;
            Ok(serde_json::json!({ "saved": name, "file": file }))
        }
        PresetCommand::Load { name, file } => {
            let store = FilePresetStore::open(&file)?;
            let preset = load_preset(&store, &name)?;
            Ok(serde_json::to_value(preset)?)
        }
        PresetCommand::List { file } => {
            let store = FilePresetStore::open(&file)?;
            Ok(serde_json::json!({ "presets": store.keys() }))
        }
        PresetCommand::Delete { name, file } => {
            let mut store = FilePresetStore::open(&file)?;
            if store.get(&name).is_none() {
                return Err(format!("No preset named '{}'", name).into());
            }
            store.remove(&name);
            store.flush()?;
            Ok(serde_json::json!({ "deleted": name }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::presets::MemoryStore;
    use pricing_core::roi::RoiAssumptions;
    use rust_decimal_macros::dec;

    fn sample_preset() -> CalculatorPreset {
        CalculatorPreset::Roi(RoiInput {
            ticket_value: dec!(120),
            monthly_sales_count: dec!(400),
            dispute_rate_pct: dec!(2),
            deflection_rate_pct: dec!(40),
            plan_monthly_price: dec!(49),
            assumptions: RoiAssumptions::default(),
        })
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets.json");
        let path = path.to_str().unwrap();

        let mut store = FilePresetStore::open(path).unwrap();
        save_preset(&mut store, "small-shop", &sample_preset()).unwrap();
        store.flush().unwrap();

        let reopened = FilePresetStore::open(path).unwrap();
        assert_eq!(reopened.keys(), vec!["small-shop".to_string()]);
        let loaded = load_preset(&reopened, "small-shop").unwrap();
        match loaded {
            CalculatorPreset::Roi(input) => assert_eq!(input.ticket_value, dec!(120)),
            other => panic!("Expected Roi preset, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let store = FilePresetStore::open(path.to_str().unwrap()).unwrap();
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_file_and_memory_store_agree() {
        // Both implement the same port; behavior must match
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets.json");
        let mut file_store = FilePresetStore::open(path.to_str().unwrap()).unwrap();
        let mut mem_store = MemoryStore::default();

        save_preset(&mut file_store, "a", &sample_preset()).unwrap();
        save_preset(&mut mem_store, "a", &sample_preset()).unwrap();
        assert_eq!(file_store.keys(), mem_store.keys());
    }
}
