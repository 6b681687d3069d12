//! Regulation matcher with pre-compiled model patterns.
//!
//! Regulations are loaded once; every model pattern is compiled to a
//! case-insensitive regex up front so per-vehicle matching is a scan
//! over compiled rules. Selection when several rows match: the lowest
//! priority number wins, with source order breaking ties. Pinning a row
//! to a license plate narrows which vehicles it applies to; it grants
//! no extra rank.

use regex::Regex;
use tracing::{debug, warn};

use crate::model::{Part, Regulation, Vehicle};

/// One regulation with its compiled model pattern.
struct CompiledRule {
    regulation: Regulation,
    /// `None` for wildcard rows, which match every model
    pattern: Option<Regex>,
}

/// Matches regulations to vehicles.
pub struct RegulationMatcher {
    rules: Vec<CompiledRule>,
}

impl RegulationMatcher {
    /// Compile a regulation set.
    ///
    /// Rows whose model pattern fails to compile are skipped with a
    /// warning rather than failing the whole set; one bad spreadsheet
    /// row must not take down the dashboard.
    #[must_use]
    pub fn new(regulations: Vec<Regulation>) -> Self {
        let rules = regulations
            .into_iter()
            .filter_map(|regulation| {
                let pattern = if regulation.is_wildcard() {
                    None
                } else {
                    match Regex::new(&format!("(?i){}", regulation.model_pattern.trim())) {
                        Ok(re) => Some(re),
                        Err(error) => {
                            warn!(
                                pattern = %regulation.model_pattern,
                                part = %regulation.part,
                                %error,
                                "skipping regulation with invalid model pattern"
                            );
                            return None;
                        }
                    }
                };
                Some(CompiledRule { regulation, pattern })
            })
            .collect();
        Self { rules }
    }

    /// Number of usable (compiled) rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All regulations applicable to a vehicle for one part, best first.
    fn candidates<'a>(&'a self, vehicle: &Vehicle, part: Part) -> Vec<&'a Regulation> {
        let model = &vehicle.identity.model;
        let plate = &vehicle.identity.license_plate;

        let mut matched: Vec<&Regulation> = self
            .rules
            .iter()
            .filter(|rule| rule.regulation.part == part)
            .filter(|rule| {
                // Plate pinning is an exact, case-sensitive match; the
                // aggregator has already normalized vehicle plates.
                if let Some(required_plate) = &rule.regulation.license_plate {
                    if required_plate != plate {
                        return false;
                    }
                }
                if !rule.regulation.year_matches(vehicle.identity.year) {
                    return false;
                }
                match &rule.pattern {
                    None => true,
                    Some(re) => re.is_match(model),
                }
            })
            .map(|rule| &rule.regulation)
            .collect();

        // Stable sort, so source order breaks priority ties.
        matched.sort_by_key(|r| r.priority);
        if matched.len() > 1 {
            debug!(
                %plate,
                %part,
                candidates = matched.len(),
                "multiple regulations match, picking lowest priority"
            );
        }
        matched
    }

    /// The single best regulation for a vehicle and part, if any matches.
    #[must_use]
    pub fn best_match(&self, vehicle: &Vehicle, part: Part) -> Option<&Regulation> {
        self.candidates(vehicle, part).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PeriodType, ServiceInterval, VehicleIdentity};
    use indexmap::IndexMap;

    fn vehicle(model: &str, plate: &str, year: Option<i32>) -> Vehicle {
        Vehicle {
            identity: VehicleIdentity {
                license_plate: plate.to_string(),
                model: model.to_string(),
                year,
                city: String::new(),
                photo_grade: String::new(),
            },
            current_mileage: 0.0,
            parts: IndexMap::new(),
            history: Vec::new(),
        }
    }

    fn regulation(pattern: &str, priority: u8, normal: f64) -> Regulation {
        Regulation {
            part: Part::OilService,
            model_pattern: pattern.to_string(),
            license_plate: None,
            year_from: None,
            year_to: None,
            period_type: PeriodType::Mileage,
            normal: Some(ServiceInterval::Every(normal)),
            warning: None,
            critical: None,
            priority,
        }
    }

    #[test]
    fn test_wildcard_matches_any_model() {
        let matcher = RegulationMatcher::new(vec![regulation("*", 2, 15000.0)]);
        let v = vehicle("Renault Master", "AA1111BB", None);
        assert!(matcher.best_match(&v, Part::OilService).is_some());
    }

    #[test]
    fn test_lower_priority_wins() {
        let matcher = RegulationMatcher::new(vec![
            regulation("*", 2, 15000.0),
            regulation("sprinter", 1, 10000.0),
        ]);
        let v = vehicle("Mercedes-Benz Sprinter 313", "AA1111BB", None);
        let best = matcher.best_match(&v, Part::OilService).unwrap();
        assert_eq!(best.normal, Some(ServiceInterval::Every(10000.0)));
    }

    #[test]
    fn test_source_order_breaks_priority_ties() {
        let matcher = RegulationMatcher::new(vec![
            regulation("sprinter", 2, 11000.0),
            regulation("*", 2, 15000.0),
        ]);
        let v = vehicle("Mercedes-Benz Sprinter", "AA1111BB", None);
        let best = matcher.best_match(&v, Part::OilService).unwrap();
        assert_eq!(best.normal, Some(ServiceInterval::Every(11000.0)));
    }

    #[test]
    fn test_plate_pinning_grants_no_rank() {
        // The pinned row applies to this vehicle but still loses on priority.
        let mut pinned = regulation("*", 3, 9000.0);
        pinned.license_plate = Some("AA1111BB".to_string());
        let matcher = RegulationMatcher::new(vec![regulation("*", 1, 15000.0), pinned]);
        let v = vehicle("Peugeot 301", "AA1111BB", None);
        let best = matcher.best_match(&v, Part::OilService).unwrap();
        assert_eq!(best.normal, Some(ServiceInterval::Every(15000.0)));
    }

    #[test]
    fn test_plate_match_is_case_sensitive() {
        let mut pinned = regulation("*", 1, 9000.0);
        pinned.license_plate = Some("aa1111bb".to_string());
        let matcher = RegulationMatcher::new(vec![pinned]);
        let v = vehicle("Peugeot 301", "AA1111BB", None);
        assert!(matcher.best_match(&v, Part::OilService).is_none());
    }

    #[test]
    fn test_plate_pinned_ignored_for_other_vehicle() {
        let mut pinned = regulation("*", 1, 9000.0);
        pinned.license_plate = Some("AA1111BB".to_string());
        let matcher = RegulationMatcher::new(vec![pinned]);
        let v = vehicle("Peugeot 301", "CC2222DD", None);
        assert!(matcher.best_match(&v, Part::OilService).is_none());
    }

    #[test]
    fn test_year_range_filters() {
        let mut ranged = regulation("*", 1, 9000.0);
        ranged.year_from = Some(2015);
        ranged.year_to = Some(2020);
        let matcher = RegulationMatcher::new(vec![ranged]);
        assert!(matcher
            .best_match(&vehicle("Fiat Tipo", "AA1111BB", Some(2018)), Part::OilService)
            .is_some());
        assert!(matcher
            .best_match(&vehicle("Fiat Tipo", "AA1111BB", Some(2012)), Part::OilService)
            .is_none());
        assert!(matcher
            .best_match(&vehicle("Fiat Tipo", "AA1111BB", None), Part::OilService)
            .is_none());
    }

    #[test]
    fn test_invalid_pattern_skipped() {
        let matcher = RegulationMatcher::new(vec![
            regulation("[unclosed", 1, 9000.0),
            regulation("*", 2, 15000.0),
        ]);
        assert_eq!(matcher.len(), 1);
        let v = vehicle("Fiat Tipo", "AA1111BB", None);
        let best = matcher.best_match(&v, Part::OilService).unwrap();
        assert_eq!(best.normal, Some(ServiceInterval::Every(15000.0)));
    }

    #[test]
    fn test_case_insensitive_model_match() {
        let matcher = RegulationMatcher::new(vec![regulation("SPRINTER", 1, 10000.0)]);
        let v = vehicle("mercedes-benz sprinter", "AA1111BB", None);
        assert!(matcher.best_match(&v, Part::OilService).is_some());
    }
}
