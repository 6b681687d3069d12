//! Engine configuration.
//!
//! [`EngineConfig`] bundles the tunable coefficients with the built-in
//! domain tables and pre-compiles the model-matching regexes once.

pub mod defaults;

use regex::Regex;

use crate::error::{FleetError, Result};
use crate::model::Part;

/// Configuration for all analytics passes.
///
/// Construct via [`EngineConfig::default`] for the built-in tables, or
/// adjust the public coefficient fields before handing it to the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Labour cost as a fraction of the part cost
    pub work_cost_coefficient: f64,
    /// Reserve surcharge applied to forecast budgets
    pub forecast_reserve: f64,
    /// Monthly spend threshold for the cost warning (UAH)
    pub monthly_spend_threshold: f64,
    /// Fallback monthly mileage when history is too thin (km)
    pub default_monthly_mileage: f64,

    spark_plug_models: Regex,
    dpf_exceptions: Vec<Regex>,
}

impl EngineConfig {
    /// Build a config with custom model-matching patterns.
    ///
    /// Fails with [`FleetError::Config`] when a pattern does not compile.
    pub fn with_patterns(spark_plug_models: &str, dpf_exceptions: &[&str]) -> Result<Self> {
        let spark = Regex::new(&format!("(?i){spark_plug_models}"))
            .map_err(|e| FleetError::Config(format!("spark plug pattern: {e}")))?;
        let dpf = dpf_exceptions
            .iter()
            .map(|p| {
                Regex::new(&format!("(?i){p}"))
                    .map_err(|e| FleetError::Config(format!("DPF exception pattern '{p}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            work_cost_coefficient: defaults::WORK_COST_COEFFICIENT,
            forecast_reserve: defaults::FORECAST_RESERVE,
            monthly_spend_threshold: defaults::MONTHLY_SPEND_THRESHOLD,
            default_monthly_mileage: defaults::DEFAULT_MONTHLY_MILEAGE,
            spark_plug_models: spark,
            dpf_exceptions: dpf,
        })
    }

    /// Map a record's search text to the first matching canonical part.
    #[must_use]
    pub fn part_for_text(&self, text: &str) -> Option<Part> {
        let text = text.to_lowercase();
        for (part, keywords) in defaults::PART_KEYWORDS {
            if keywords.iter().any(|kw| text.contains(kw)) {
                return Some(*part);
            }
        }
        None
    }

    /// Whether a record's search text describes a car wash visit.
    #[must_use]
    pub fn is_wash_text(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        defaults::WASH_KEYWORDS.iter().any(|kw| text.contains(kw))
    }

    /// Whether a (lowercased) model string has a chain-driven engine.
    #[must_use]
    pub fn is_chain_drive(&self, model_lower: &str) -> bool {
        defaults::CHAIN_DRIVE_MODELS
            .iter()
            .any(|m| model_lower.contains(m))
    }

    /// Whether a vehicle is exempt from DPF regeneration recommendations.
    #[must_use]
    pub fn is_dpf_exception(&self, model: &str, year: Option<i32>) -> bool {
        if year.is_some_and(|y| y < defaults::DPF_MIN_YEAR) {
            return true;
        }
        self.dpf_exceptions.iter().any(|re| re.is_match(model))
    }

    /// Whether a model carries the spark-plug recommendation (petrol brands).
    #[must_use]
    pub fn has_spark_plugs(&self, model: &str) -> bool {
        self.spark_plug_models.is_match(model)
    }

    /// Cost and reliability multipliers for a (lowercased) model string.
    /// Unknown brands get neutral coefficients.
    #[must_use]
    pub fn brand_coefficients(&self, model_lower: &str) -> (f64, f64) {
        defaults::BRAND_COEFFICIENTS
            .iter()
            .find(|(brand, _, _)| model_lower.contains(brand))
            .map_or((1.0, 1.0), |(_, cost, reliability)| (*cost, *reliability))
    }

    /// Brand label used for forecast grouping, derived from the model.
    #[must_use]
    pub fn brand_label(&self, model: &str) -> String {
        let lower = model.to_lowercase();
        if lower.contains("sprinter") {
            return "Mercedes Sprinter".to_string();
        }
        if lower.contains("crafter") {
            return "Volkswagen Crafter".to_string();
        }
        if lower.contains(" lt") {
            return "VW LT".to_string();
        }
        if lower.contains("301") {
            return "Peugeot 301".to_string();
        }
        if lower.contains("tipo") {
            return "Fiat Tipo".to_string();
        }
        model
            .split_whitespace()
            .next()
            .map_or_else(|| "Інші".to_string(), ToString::to_string)
    }

    /// Base part price before brand coefficients.
    #[must_use]
    pub fn base_part_cost(&self, part: Part) -> f64 {
        defaults::BASE_PART_COSTS
            .iter()
            .find(|(p, _)| *p == part)
            .map_or(defaults::DEFAULT_PART_COST, |(_, cost)| *cost)
    }

    /// Recommended manufacturers string for a part, if any.
    #[must_use]
    pub fn manufacturers(&self, part: Part) -> Option<&'static str> {
        defaults::RECOMMENDED_MANUFACTURERS
            .iter()
            .find(|(p, _)| *p == part)
            .map(|(_, m)| *m)
    }

    /// Check hand-tuned coefficients before running the engine.
    ///
    /// Fails with [`FleetError::Validation`] on values the analytics
    /// passes cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.work_cost_coefficient.is_finite() || self.work_cost_coefficient < 0.0 {
            return Err(FleetError::Validation(format!(
                "work_cost_coefficient must be a non-negative number, got {}",
                self.work_cost_coefficient
            )));
        }
        if !self.forecast_reserve.is_finite() || self.forecast_reserve < 0.0 {
            return Err(FleetError::Validation(format!(
                "forecast_reserve must be a non-negative number, got {}",
                self.forecast_reserve
            )));
        }
        if !self.default_monthly_mileage.is_finite() || self.default_monthly_mileage <= 0.0 {
            return Err(FleetError::Validation(format!(
                "default_monthly_mileage must be positive, got {}",
                self.default_monthly_mileage
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        // Built-in patterns are known-good, so this cannot fail.
        Self::with_patterns(defaults::SPARK_PLUG_MODELS, defaults::DPF_EXCEPTION_MODELS)
            .unwrap_or_else(|e| panic!("built-in config patterns failed to compile: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_for_text_specific_before_generic() {
        let config = EngineConfig::default();
        // "грм" wins over the generic oil keywords
        assert_eq!(
            config.part_for_text("Заміна ременя ГРМ та масла"),
            Some(Part::TimingBelt)
        );
        assert_eq!(config.part_for_text("Заміна масла"), Some(Part::OilService));
        assert_eq!(config.part_for_text("Ремонт дверей"), None);
    }

    #[test]
    fn test_chain_drive_models() {
        let config = EngineConfig::default();
        assert!(config.is_chain_drive("mercedes-benz sprinter 313"));
        assert!(config.is_chain_drive("hyundai accent"));
        assert!(!config.is_chain_drive("peugeot 301"));
    }

    #[test]
    fn test_dpf_exceptions() {
        let config = EngineConfig::default();
        assert!(config.is_dpf_exception("Fiat Tipo", Some(2018)));
        assert!(config.is_dpf_exception("VW Crafter", Some(2008)));
        assert!(!config.is_dpf_exception("VW Crafter", Some(2016)));
    }

    #[test]
    fn test_brand_coefficients() {
        let config = EngineConfig::default();
        assert_eq!(config.brand_coefficients("mercedes-benz sprinter"), (1.2, 1.0));
        assert_eq!(config.brand_coefficients("vw crafter"), (1.15, 0.95));
        assert_eq!(config.brand_coefficients("volkswagen lt 35"), (1.0, 0.90));
        assert_eq!(config.brand_coefficients("renault master"), (1.0, 1.0));
    }

    #[test]
    fn test_spark_plug_models() {
        let config = EngineConfig::default();
        assert!(config.has_spark_plugs("Peugeot 301"));
        assert!(config.has_spark_plugs("HYUNDAI Accent"));
        assert!(!config.has_spark_plugs("Mercedes-Benz Sprinter"));
    }

    #[test]
    fn test_wash_text() {
        let config = EngineConfig::default();
        assert!(config.is_wash_text("Мийка кузова"));
        assert!(!config.is_wash_text("Заміна масла"));
    }

    #[test]
    fn test_base_costs() {
        let config = EngineConfig::default();
        assert_eq!(config.base_part_cost(Part::Clutch), 8000.0);
        assert_eq!(config.base_part_cost(Part::SparkPlugs), 2000.0);
    }

    #[test]
    fn test_recommended_manufacturers() {
        let config = EngineConfig::default();
        assert_eq!(config.manufacturers(Part::AccessoryBelt), Some("CONTINENTAL, INA"));
        assert_eq!(config.manufacturers(Part::WaterPump), Some("INA, CONTINENTAL, Pierburg"));
        assert_eq!(config.manufacturers(Part::StrutMount), Some("MEYLE, LEMFÖRDER"));
        assert_eq!(config.manufacturers(Part::ComputerDiagnostic), None);
    }

    #[test]
    fn test_validate_rejects_bad_coefficients() {
        let mut config = EngineConfig::default();
        assert!(config.validate().is_ok());

        config.forecast_reserve = -0.1;
        assert!(matches!(config.validate(), Err(FleetError::Validation(_))));

        config.forecast_reserve = 0.15;
        config.default_monthly_mileage = 0.0;
        assert!(config.validate().is_err());
    }
}
