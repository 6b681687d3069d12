//! Canonical part identity.
//!
//! The source spreadsheets key everything by Ukrainian display strings
//! (several with decorative emoji suffixes). Internally every table is
//! keyed by this enum instead, with a single canonical-name <->
//! display-name mapping at the ingestion boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FleetError, IngestErrorKind};

/// A tracked maintenance-relevant component or service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Part {
    /// ТО: engine oil plus filters
    OilService,
    /// Timing belt with tensioner rollers
    TimingBelt,
    /// Accessory (serpentine) belt with rollers
    AccessoryBelt,
    /// Coolant pump
    WaterPump,
    /// Suspension diagnostic (inspection work)
    SuspensionDiagnostic,
    /// Wheel alignment
    WheelAlignment,
    /// Caliper guide pin service
    CaliperService,
    /// Electronic/computer diagnostic
    ComputerDiagnostic,
    /// Diesel particulate filter regeneration
    DpfRegeneration,
    FrontBrakeDiscs,
    RearBrakeDiscs,
    FrontBrakePads,
    RearBrakePads,
    HandbrakePads,
    FrontShockAbsorbers,
    RearShockAbsorbers,
    StrutMount,
    BallJoint,
    TieRod,
    TieRodEnd,
    Clutch,
    Starter,
    Alternator,
    Battery,
    SparkPlugs,
}

impl Part {
    /// All parts in canonical display order.
    pub const ALL: [Part; 25] = [
        Part::OilService,
        Part::TimingBelt,
        Part::AccessoryBelt,
        Part::WaterPump,
        Part::SuspensionDiagnostic,
        Part::WheelAlignment,
        Part::CaliperService,
        Part::ComputerDiagnostic,
        Part::DpfRegeneration,
        Part::FrontBrakeDiscs,
        Part::RearBrakeDiscs,
        Part::FrontBrakePads,
        Part::RearBrakePads,
        Part::HandbrakePads,
        Part::FrontShockAbsorbers,
        Part::RearShockAbsorbers,
        Part::StrutMount,
        Part::BallJoint,
        Part::TieRod,
        Part::TieRodEnd,
        Part::Clutch,
        Part::Starter,
        Part::Alternator,
        Part::Battery,
        Part::SparkPlugs,
    ];

    /// Display name as it appears in the source spreadsheets.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::OilService => "ТО (масло+фільтри) 🛢️",
            Self::TimingBelt => "ГРМ (ролики+ремінь) ⚙️",
            Self::AccessoryBelt => "Обвідний ремінь+ролики 🔧",
            Self::WaterPump => "Помпа 💧",
            Self::SuspensionDiagnostic => "Діагностика ходової 🔍",
            Self::WheelAlignment => "Розвал-сходження 📐",
            Self::CaliperService => "Профілактика направляючих супортів 🛠️",
            Self::ComputerDiagnostic => "Компютерна діагностика 💻",
            Self::DpfRegeneration => "Прожиг сажового фільтру 🔥",
            Self::FrontBrakeDiscs => "Гальмівні диски передні💿",
            Self::RearBrakeDiscs => "Гальмівні диски задні💿",
            Self::FrontBrakePads => "Гальмівні колодки передні🛑",
            Self::RearBrakePads => "Гальмівні колодки задні🛑",
            Self::HandbrakePads => "Гальмівні колодки ручного гальма🛑",
            Self::FrontShockAbsorbers => "Амортизатори передні🔧",
            Self::RearShockAbsorbers => "Амортизатори задні🔧",
            Self::StrutMount => "Опора амортизаторів 🛠️",
            Self::BallJoint => "Шарова опора ⚪",
            Self::TieRod => "Рульова тяга 🔗",
            Self::TieRodEnd => "Рульовий накінечник 🔩",
            Self::Clutch => "Зчеплення ⚙️",
            Self::Starter => "Стартер 🔋",
            Self::Alternator => "Генератор ⚡",
            Self::Battery => "Акумулятор 🔋",
            Self::SparkPlugs => "Свічки запалювання 🔥",
        }
    }

    /// Resolve a spreadsheet display name (with alias spellings) back to
    /// the canonical part.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.trim();
        // Apostrophe spelling used by some regulation rows
        if name == "Комп'ютерна діагностика 💻" {
            return Some(Self::ComputerDiagnostic);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.display_name() == name)
    }

    /// Brake-system group, consolidated into a single recommendation.
    #[must_use]
    pub const fn is_brake_group(&self) -> bool {
        matches!(
            self,
            Self::FrontBrakeDiscs
                | Self::RearBrakeDiscs
                | Self::FrontBrakePads
                | Self::RearBrakePads
                | Self::HandbrakePads
        )
    }

    /// Suspension group, consolidated behind the suspension diagnostic.
    #[must_use]
    pub const fn is_suspension_group(&self) -> bool {
        matches!(
            self,
            Self::FrontShockAbsorbers
                | Self::RearShockAbsorbers
                | Self::StrutMount
                | Self::BallJoint
                | Self::TieRod
                | Self::TieRodEnd
        )
    }

    /// Scheduled works (as opposed to replaceable parts).
    #[must_use]
    pub const fn is_work(&self) -> bool {
        matches!(
            self,
            Self::OilService
                | Self::SuspensionDiagnostic
                | Self::WheelAlignment
                | Self::CaliperService
                | Self::ComputerDiagnostic
                | Self::DpfRegeneration
        )
    }

    /// Parts whose next-due point is expressed in odometer kilometres.
    #[must_use]
    pub const fn is_mileage_scheduled(&self) -> bool {
        matches!(
            self,
            Self::OilService | Self::TimingBelt | Self::AccessoryBelt | Self::WaterPump
        )
    }

    /// Works whose next-due point is expressed as a calendar interval.
    #[must_use]
    pub const fn is_date_scheduled(&self) -> bool {
        matches!(
            self,
            Self::SuspensionDiagnostic
                | Self::WheelAlignment
                | Self::CaliperService
                | Self::ComputerDiagnostic
        )
    }

    /// Electrical units excluded from the maintenance schedule view.
    #[must_use]
    pub const fn is_schedule_excluded(&self) -> bool {
        matches!(self, Self::Starter | Self::Alternator | Self::Battery)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Part {
    type Err = FleetError;

    /// Strict form of [`Part::from_display_name`] for ingestion paths
    /// that must surface unknown spreadsheet columns.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display_name(s).ok_or_else(|| {
            FleetError::ingest(
                "part column",
                IngestErrorKind::UnknownPart(s.trim().to_string()),
            )
        })
    }
}
