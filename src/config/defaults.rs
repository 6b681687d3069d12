//! Built-in domain tables.
//!
//! Keyword lists, brand coefficients and base costs mirror the workshop's
//! operating data. They live here as constants so the rest of the engine
//! stays table-driven.

use crate::model::Part;

/// Keywords that map free-text work descriptions to canonical parts.
/// Order matters: the first part whose keyword list matches wins,
/// so more specific entries come before generic ones.
pub const PART_KEYWORDS: &[(Part, &[&str])] = &[
    (Part::TimingBelt, &["грм", "ремінь грм", "ремень грм"]),
    (
        Part::AccessoryBelt,
        &["обвідний", "обводной", "поліклиновий", "поликлиновый"],
    ),
    (Part::WaterPump, &["помпа", "водяний насос", "водяной насос"]),
    (
        Part::SuspensionDiagnostic,
        &["діагностика ходової", "диагностика ходовой"],
    ),
    (
        Part::WheelAlignment,
        &["розвал", "сходження", "развал", "схождение"],
    ),
    (
        Part::CaliperService,
        &["супорт", "суппорт", "направляюч", "направляющ"],
    ),
    (
        Part::ComputerDiagnostic,
        &["комп'ютерна діагностика", "компютерна діагностика", "компьютерная диагностика"],
    ),
    (
        Part::DpfRegeneration,
        &["сажов", "прожиг", "dpf", "fap"],
    ),
    (
        Part::FrontBrakeDiscs,
        &["диски передні", "диски передние", "гальмівні диски передні"],
    ),
    (
        Part::RearBrakeDiscs,
        &["диски задні", "диски задние", "гальмівні диски задні"],
    ),
    (
        Part::FrontBrakePads,
        &["колодки передні", "колодки передние"],
    ),
    (Part::RearBrakePads, &["колодки задні", "колодки задние"]),
    (
        Part::HandbrakePads,
        &["колодки ручн", "ручного гальма", "ручника"],
    ),
    (
        Part::FrontShockAbsorbers,
        &["амортизатори передні", "амортизаторы передние"],
    ),
    (
        Part::RearShockAbsorbers,
        &["амортизатори задні", "амортизаторы задние"],
    ),
    (
        Part::StrutMount,
        &["опора аморт", "опорний підшипник", "опорный подшипник"],
    ),
    (Part::BallJoint, &["шарова", "шаровая"]),
    (Part::TieRodEnd, &["накінечник", "наконечник"]),
    (Part::TieRod, &["рульова тяга", "рулевая тяга", "тяга рульов", "тяга рулев"]),
    (Part::Clutch, &["зчеплення", "сцепление"]),
    (Part::Starter, &["стартер"]),
    (Part::Alternator, &["генератор"]),
    (Part::Battery, &["акумулятор", "аккумулятор", "акб"]),
    (Part::SparkPlugs, &["свічк", "свеч"]),
    // Oil last: "масл"/"то" are the most generic keywords
    (Part::OilService, &["масл", "фільтр", "фильтр", "то "]),
];

/// Keywords that mark a service record as a car wash visit.
pub const WASH_KEYWORDS: &[&str] = &["мийка", "мойка", "автомойка", "автомийка"];

/// Models with a chain-driven timing system. Matched as substrings of
/// the lowercased model string.
pub const CHAIN_DRIVE_MODELS: &[&str] = &[
    "mercedes-benz sprinter",
    "iveco daily 65c15",
    "isuzu nqr 71r",
    "hyundai accent",
];

/// Models exempt from DPF regeneration recommendations (regex fragments
/// applied case-insensitively to the model string).
pub const DPF_EXCEPTION_MODELS: &[&str] = &["fiat tipo", "peugeot 301", "hyundai accent"];

/// Vehicles produced before this year never get DPF recommendations.
pub const DPF_MIN_YEAR: i32 = 2010;

/// Petrol models that carry a spark-plug recommendation (regex applied
/// case-insensitively to the model string).
pub const SPARK_PLUG_MODELS: &str = "peugeot|hyundai|fiat";

/// Brand cost and reliability coefficients for the forecast engine:
/// (model substring, parts cost multiplier, reliability multiplier).
pub const BRAND_COEFFICIENTS: &[(&str, f64, f64)] = &[
    ("sprinter", 1.2, 1.0),
    ("crafter", 1.15, 0.95),
    // Leading space keeps "lt" from matching inside other brand names
    (" lt", 1.0, 0.90),
    ("301", 1.1, 1.0),
    ("tipo", 1.1, 1.0),
];

/// Base part prices in UAH, before brand coefficients.
pub const BASE_PART_COSTS: &[(Part, f64)] = &[
    (Part::OilService, 2000.0),
    (Part::TimingBelt, 5000.0),
    (Part::WaterPump, 3000.0),
    (Part::AccessoryBelt, 2500.0),
    (Part::FrontBrakeDiscs, 4000.0),
    (Part::RearBrakeDiscs, 3500.0),
    (Part::FrontBrakePads, 1500.0),
    (Part::RearBrakePads, 1200.0),
    (Part::HandbrakePads, 800.0),
    (Part::FrontShockAbsorbers, 3000.0),
    (Part::RearShockAbsorbers, 2800.0),
    (Part::StrutMount, 1500.0),
    (Part::BallJoint, 2000.0),
    (Part::TieRod, 1200.0),
    (Part::TieRodEnd, 800.0),
    (Part::Clutch, 8000.0),
    (Part::Starter, 4000.0),
    (Part::Alternator, 5000.0),
    (Part::Battery, 3000.0),
];

/// Fallback price for parts missing from [`BASE_PART_COSTS`].
pub const DEFAULT_PART_COST: f64 = 2000.0;

/// Labour cost as a fraction of the part cost.
pub const WORK_COST_COEFFICIENT: f64 = 0.25;

/// Budget reserve surcharge applied to forecast totals.
pub const FORECAST_RESERVE: f64 = 0.15;

/// Monthly spend above this (UAH) triggers a cost warning.
pub const MONTHLY_SPEND_THRESHOLD: f64 = 5000.0;

/// Assumed monthly mileage when history is too thin to compute one.
pub const DEFAULT_MONTHLY_MILEAGE: f64 = 1000.0;

/// Working days per month used to scale daily mileage.
pub const WORKING_DAYS_PER_MONTH: f64 = 26.0;

/// Recommended manufacturers per part, shown in the maintenance schedule.
pub const RECOMMENDED_MANUFACTURERS: &[(Part, &str)] = &[
    (Part::OilService, "MANN, KNECHT, MAHLE"),
    (Part::TimingBelt, "CONTINENTAL"),
    (Part::AccessoryBelt, "CONTINENTAL, INA"),
    (Part::WaterPump, "INA, CONTINENTAL, Pierburg"),
    (Part::FrontBrakeDiscs, "BREMBO, TRW, ROADHOUSE"),
    (Part::RearBrakeDiscs, "BREMBO, TRW, ROADHOUSE"),
    (Part::FrontBrakePads, "BREMBO, TRW, ROADHOUSE"),
    (Part::RearBrakePads, "BREMBO, TRW, ROADHOUSE"),
    (Part::HandbrakePads, "BREMBO, TRW, ROADHOUSE"),
    (Part::FrontShockAbsorbers, "SACHS, BILSTEIN"),
    (Part::RearShockAbsorbers, "SACHS, BILSTEIN"),
    (Part::StrutMount, "MEYLE, LEMFÖRDER"),
    (Part::BallJoint, "MEYLE, LEMFÖRDER"),
    (Part::TieRod, "MEYLE, LEMFÖRDER"),
    (Part::TieRodEnd, "MEYLE, LEMFÖRDER"),
    (Part::SparkPlugs, "NGK, BOSCH, DENSO"),
];
