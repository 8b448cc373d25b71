//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//! Reading the file is left to the caller; the engine only parses text.

use serde::{Deserialize, Serialize};

use crate::boundary_types::BoundaryConfig;
use crate::error::ChartError;
use crate::solar_term_types::SolarTermConfig;
use crate::timeline::TimelineConfig;

/// Top-level configuration for [`crate::BaziEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Shift the recorded clock to local mean solar time when coordinates are given.
    pub solar_time_correction: bool,
    /// Count births from 23:00 as the next day.
    pub zi_hour_next_day: bool,
    pub include_answer_cards: bool,
    pub solar_terms: SolarTermConfig,
    pub boundary: BoundaryConfig,
    pub timeline: TimelineConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solar_time_correction: true,
            zi_hour_next_day: false,
            include_answer_cards: true,
            solar_terms: SolarTermConfig::default(),
            boundary: BoundaryConfig::default(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ChartError> {
        let config: Self =
            toml::from_str(text).map_err(|e| ChartError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ChartError> {
        toml::to_string(self).map_err(|e| ChartError::ConfigParse(e.to_string()))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ChartError> {
        self.solar_terms
            .validate()
            .map_err(ChartError::InvalidConfig)?;
        self.boundary.validate().map_err(ChartError::InvalidConfig)?;
        self.timeline.validate().map_err(ChartError::InvalidConfig)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar_term_types::TermModel;

    #[test]
    fn empty_document_is_default() {
        let c = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(c, EngineConfig::default());
    }

    #[test]
    fn partial_sections() {
        let c = EngineConfig::from_toml_str(
            r#"
            zi_hour_next_day = true

            [solar_terms]
            model = "linear_day_offset"
            min_year = 1900

            [boundary]
            window_days = 2.5
            "#,
        )
        .unwrap();
        assert!(c.zi_hour_next_day);
        assert_eq!(c.solar_terms.model, TermModel::LinearDayOffset);
        assert_eq!(c.solar_terms.min_year, 1900);
        assert_eq!(c.solar_terms.max_year, 2200);
        assert!((c.boundary.window_days - 2.5).abs() < 1e-12);
        assert_eq!(c.timeline, TimelineConfig::default());
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let err = EngineConfig::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(matches!(err, ChartError::ConfigParse(_)));
    }

    #[test]
    fn invalid_values_rejected() {
        let err = EngineConfig::from_toml_str("[boundary]\nconfidence_cap = 2.0").unwrap_err();
        assert!(matches!(err, ChartError::InvalidConfig(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let c = EngineConfig::default();
        let text = c.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), c);
    }
}
