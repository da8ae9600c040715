//! Enumeration types used throughout the avoidance core.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which COLREGS rule currently governs a contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterMode {
    #[default]
    None,
    /// Rule 14.
    HeadOn,
    /// Rule 13, ownship is the overtaking vessel.
    Overtaking,
    /// Rule 16.
    GiveWay,
    /// Rule 17, crossing.
    StandOn,
    /// Rule 17, ownship is being overtaken.
    StandOnOvertaken,
    /// No rule applies but the contact is within range.
    CpaOnly,
    /// Terminal. The encounter has ended.
    Complete,
}

impl EncounterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncounterMode::None => "none",
            EncounterMode::HeadOn => "headon",
            EncounterMode::Overtaking => "overtaking",
            EncounterMode::GiveWay => "giveway",
            EncounterMode::StandOn => "standon",
            EncounterMode::StandOnOvertaken => "standon_ot",
            EncounterMode::CpaOnly => "cpa",
            EncounterMode::Complete => "complete",
        }
    }

    /// Whether ownship is in one of the stand-on roles.
    pub fn is_stand_on(&self) -> bool {
        matches!(
            self,
            EncounterMode::StandOn | EncounterMode::StandOnOvertaken
        )
    }

    /// Whether `submode` is a legal pairing for this mode.
    pub fn allows(&self, submode: Submode) -> bool {
        use Submode as S;
        match self {
            EncounterMode::Overtaking => matches!(submode, S::Port | S::Starboard | S::None),
            EncounterMode::GiveWay => {
                matches!(submode, S::Bow | S::Stern | S::Neither | S::None)
            }
            EncounterMode::StandOn => matches!(
                submode,
                S::Bow
                    | S::Stern
                    | S::Unsure
                    | S::UnsureBow
                    | S::UnsureStern
                    | S::Neither
                    | S::InExtremis
                    | S::None
            ),
            EncounterMode::StandOnOvertaken => matches!(
                submode,
                S::Port | S::Starboard | S::Unsure | S::InExtremis | S::None
            ),
            _ => submode == S::None,
        }
    }
}

impl fmt::Display for EncounterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncounterMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(EncounterMode::None),
            "headon" => Ok(EncounterMode::HeadOn),
            "overtaking" => Ok(EncounterMode::Overtaking),
            "giveway" => Ok(EncounterMode::GiveWay),
            "standon" => Ok(EncounterMode::StandOn),
            "standon_ot" => Ok(EncounterMode::StandOnOvertaken),
            "cpa" => Ok(EncounterMode::CpaOnly),
            "complete" => Ok(EncounterMode::Complete),
            other => Err(ConfigError::invalid("avoid_mode", other)),
        }
    }
}

/// Refinement of the active mode: passing side, crossing side, or certainty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Submode {
    #[default]
    None,
    Port,
    Starboard,
    Bow,
    Stern,
    Unsure,
    UnsureBow,
    UnsureStern,
    /// Ownship has crossed to the contact's port side.
    Neither,
    /// Stand-on vessel that may now maneuver.
    InExtremis,
}

impl Submode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Submode::None => "none",
            Submode::Port => "port",
            Submode::Starboard => "starboard",
            Submode::Bow => "bow",
            Submode::Stern => "stern",
            Submode::Unsure => "unsure",
            Submode::UnsureBow => "unsure_bow",
            Submode::UnsureStern => "unsure_stern",
            Submode::Neither => "neither",
            Submode::InExtremis => "inextremis",
        }
    }
}

impl fmt::Display for Submode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Submode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Submode::None),
            "port" => Ok(Submode::Port),
            "starboard" | "star" => Ok(Submode::Starboard),
            "bow" => Ok(Submode::Bow),
            "stern" => Ok(Submode::Stern),
            "unsure" => Ok(Submode::Unsure),
            "unsure_bow" => Ok(Submode::UnsureBow),
            "unsure_stern" => Ok(Submode::UnsureStern),
            "neither" => Ok(Submode::Neither),
            "inextremis" => Ok(Submode::InExtremis),
            other => Err(ConfigError::invalid("avoid_submode", other)),
        }
    }
}

/// Side of the contact ownship passes on (rule 13).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassingSide {
    #[default]
    Port,
    Starboard,
}

impl FromStr for PassingSide {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "port" => Ok(PassingSide::Port),
            "starboard" | "star" => Ok(PassingSide::Starboard),
            other => Err(ConfigError::invalid("passing_side", other)),
        }
    }
}

/// Where ownship crosses the contact's track when giving way (rule 16).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingSide {
    Bow,
    #[default]
    Stern,
}

impl FromStr for CrossingSide {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bow" => Ok(CrossingSide::Bow),
            "stern" => Ok(CrossingSide::Stern),
            other => Err(ConfigError::invalid("passing_side", other)),
        }
    }
}

/// Shape of the relevance ramp between the inner and outer distances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PwtGrade {
    #[default]
    Linear,
    Quadratic,
    Quasi,
}

impl PwtGrade {
    /// Apply the grade to a fraction in [0, 1].
    pub fn apply(&self, pct: f64) -> f64 {
        match self {
            PwtGrade::Linear => pct,
            PwtGrade::Quadratic => pct * pct,
            PwtGrade::Quasi => pct.powf(1.5),
        }
    }
}

impl FromStr for PwtGrade {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(PwtGrade::Linear),
            "quadratic" => Ok(PwtGrade::Quadratic),
            "quasi" => Ok(PwtGrade::Quasi),
            other => Err(ConfigError::invalid("pwt_grade", other)),
        }
    }
}

/// Origin of a kinematic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Ownship,
    Contact,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Ownship => f.write_str("ownship"),
            DataSource::Contact => f.write_str("contact"),
        }
    }
}
