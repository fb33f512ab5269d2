use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::planner::constants::*;

/// Runtime-configurable reconciliation knobs.
///
/// Every field defaults to the matching constant in `planner::constants`,
/// so a config file only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub calorie_tolerance: f64,
    pub protein_tolerance_g: f64,
    pub protein_tolerance_pct: f64,
    pub fat_tolerance_g: f64,
    pub fat_tolerance_pct: f64,
    pub carbs_tolerance_g: f64,
    pub carbs_tolerance_pct: f64,

    pub min_quantity_ratio: f64,
    pub max_quantity_ratio: f64,
    pub min_adjustable_quantity: f64,
    pub dense_topping_quantity: f64,
    pub dense_topping_kcal_per_unit: f64,

    pub completeness_critical: f64,
    pub completeness_good: f64,
    pub full_iterations: usize,
    pub reduced_iterations: usize,
    pub full_calorie_step: f64,
    pub reduced_calorie_step: f64,
    pub protein_calorie_cap: f64,
    pub fat_calorie_cap: f64,
    pub carbs_calorie_cap: f64,
    pub macro_unlock_window: f64,
    pub macro_relock_window: f64,

    pub prescale_trigger: f64,
    pub prescale_max: f64,
    pub rounding_step: f64,
    pub final_passes: usize,
    pub final_pass_min_progress: f64,

    pub anomaly_calorie_threshold: f64,
    pub anomaly_protein_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            calorie_tolerance: CALORIE_TOLERANCE,
            protein_tolerance_g: PROTEIN_TOLERANCE_G,
            protein_tolerance_pct: PROTEIN_TOLERANCE_PCT,
            fat_tolerance_g: FAT_TOLERANCE_G,
            fat_tolerance_pct: FAT_TOLERANCE_PCT,
            carbs_tolerance_g: CARBS_TOLERANCE_G,
            carbs_tolerance_pct: CARBS_TOLERANCE_PCT,
            min_quantity_ratio: MIN_QUANTITY_RATIO,
            max_quantity_ratio: MAX_QUANTITY_RATIO,
            min_adjustable_quantity: MIN_ADJUSTABLE_QUANTITY,
            dense_topping_quantity: DENSE_TOPPING_QUANTITY,
            dense_topping_kcal_per_unit: DENSE_TOPPING_KCAL_PER_UNIT,
            completeness_critical: COMPLETENESS_CRITICAL,
            completeness_good: COMPLETENESS_GOOD,
            full_iterations: FULL_ITERATIONS,
            reduced_iterations: REDUCED_ITERATIONS,
            full_calorie_step: FULL_CALORIE_STEP,
            reduced_calorie_step: REDUCED_CALORIE_STEP,
            protein_calorie_cap: PROTEIN_CALORIE_CAP,
            fat_calorie_cap: FAT_CALORIE_CAP,
            carbs_calorie_cap: CARBS_CALORIE_CAP,
            macro_unlock_window: MACRO_UNLOCK_WINDOW,
            macro_relock_window: MACRO_RELOCK_WINDOW,
            prescale_trigger: PRESCALE_TRIGGER,
            prescale_max: PRESCALE_MAX,
            rounding_step: ROUNDING_STEP,
            final_passes: FINAL_PASSES,
            final_pass_min_progress: FINAL_PASS_MIN_PROGRESS,
            anomaly_calorie_threshold: ANOMALY_CALORIE_THRESHOLD,
            anomaly_protein_pct: ANOMALY_PROTEIN_PCT,
        }
    }
}

impl EngineConfig {
    /// Basic validation: positive steps and an ordered realism window.
    pub fn is_valid(&self) -> bool {
        self.rounding_step > 0.0
            && self.min_quantity_ratio > 0.0
            && self.min_quantity_ratio <= 1.0
            && self.max_quantity_ratio >= 1.0
            && self.completeness_critical <= self.completeness_good
            && self.prescale_max >= 1.0
            && self.calorie_tolerance >= 0.0
    }

    /// Format the main knobs as a compact string for logging.
    pub fn display(&self) -> String {
        format!(
            "tol={:.0} bound=[{:.2},{:.2}] iters={}/{} steps={:.0}/{:.0} prescale={:.2}x..{:.2}x passes={}",
            self.calorie_tolerance,
            self.min_quantity_ratio,
            self.max_quantity_ratio,
            self.full_iterations,
            self.reduced_iterations,
            self.full_calorie_step,
            self.reduced_calorie_step,
            self.prescale_trigger,
            self.prescale_max,
            self.final_passes
        )
    }
}

/// Load an engine config from a JSON file. Missing fields keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let content = fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Save an engine config as pretty JSON.
pub fn save_config<P: AsRef<Path>>(path: P, config: &EngineConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{"calorie_tolerance": 50, "full_iterations": 12}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.calorie_tolerance, 50.0);
        assert_eq!(config.full_iterations, 12);
        assert_eq!(config.max_quantity_ratio, MAX_QUANTITY_RATIO);
        assert_eq!(config.final_passes, FINAL_PASSES);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let config = EngineConfig {
            prescale_max: 3.0,
            ..Default::default()
        };

        let file = NamedTempFile::new().unwrap();
        save_config(file.path(), &config).unwrap();

        let reloaded = load_config(file.path()).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_is_valid() {
        assert!(EngineConfig::default().is_valid());

        let inverted = EngineConfig {
            min_quantity_ratio: 1.5,
            ..Default::default()
        };
        assert!(!inverted.is_valid());
    }
}
