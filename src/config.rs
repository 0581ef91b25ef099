use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::dynamics::state::AlphaLaw;
use crate::error::SimError;
use crate::sim::{IntegrationConfig, IntegrationMethod};
use crate::vehicle::{InitialConditions, VehicleParameters};

// ---------------------------------------------------------------------------
// TOML scenario file
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse scenario file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] SimError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationSection {
    pub method: IntegrationMethod,
    pub alpha_law: AlphaLaw,
    pub dt: f64,
    /// Defaults to the vehicle burn duration.
    pub duration: Option<f64>,
}

impl Default for IntegrationSection {
    fn default() -> Self {
        Self {
            method: IntegrationMethod::Rk4,
            alpha_law: AlphaLaw::ThetaMinusThetaC,
            dt: 0.1,
            duration: None,
        }
    }
}

/// Every field defaults to the reference booster, so an empty file is a
/// valid scenario.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub vehicle: VehicleParameters,
    pub initial: InitialConditions,
    pub integration: IntegrationSection,
}

impl ScenarioConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ScenarioConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn integration_config(&self) -> IntegrationConfig {
        let i = &self.integration;
        IntegrationConfig::new(
            i.method,
            i.alpha_law,
            i.dt,
            i.duration.unwrap_or(self.vehicle.burn_duration),
        )
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.vehicle.validate()?;
        self.initial.validate()?;
        self.integration_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_reference_booster() {
        let c = ScenarioConfig::from_toml_str("").unwrap();
        assert_eq!(c, ScenarioConfig::default());
        let ic = c.integration_config();
        assert_eq!(ic.duration, 30.0);
        assert_eq!(ic.method, IntegrationMethod::Rk4);
    }

    #[test]
    fn parses_sections() {
        let c = ScenarioConfig::from_toml_str(
            r#"
            [vehicle]
            mass_flow = 15.0
            initial_mass = 900.0

            [initial]
            flight_path_angle = 70.0
            pitch_angle = 72.0

            [integration]
            method = "modified-euler"
            alpha_law = "zero"
            dt = 0.01
            duration = 12.5
            "#,
        )
        .unwrap();
        assert_eq!(c.vehicle.mass_flow, 15.0);
        assert_eq!(c.vehicle.exhaust_velocity, 2_800.0);
        assert_eq!(c.initial.pitch_angle, 72.0);
        let ic = c.integration_config();
        assert_eq!(ic.method, IntegrationMethod::ModifiedEuler);
        assert_eq!(ic.alpha_law, AlphaLaw::Zero);
        assert_eq!(ic.duration, 12.5);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = ScenarioConfig::from_toml_str("[integration]\ndt = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(SimError::InvalidConfiguration(_))));
        let err = ScenarioConfig::from_toml_str("[vehicle]\nmass_flow = -2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn shipped_scenario_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/reference_booster.toml");
        assert_eq!(ScenarioConfig::load(path).unwrap(), ScenarioConfig::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ScenarioConfig::from_toml_str("[vehicle]\nthrust = 5.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
