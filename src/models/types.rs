//! Common domain type definitions
//!
//! Coded source fields mapped to total enumerations: every input value maps
//! to a variant, with an explicit unknown/other variant for unmapped codes.

use std::fmt;

use serde::{Serialize, Serializer};

/// Patient gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    /// Missing or unmapped code
    Unknown,
}

impl Gender {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<i64> for Gender {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Male,
            2 => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl From<Option<i64>> for Gender {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Unknown, Self::from)
    }
}

/// Patient race, simplified to four labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Race {
    White,
    Black,
    Asian,
    /// Codes 4 and 5 both collapse here
    Other,
    /// Missing or unmapped code
    Unknown,
}

impl Race {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Asian => "Asian",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<i64> for Race {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::White,
            2 => Self::Black,
            3 => Self::Asian,
            4 | 5 => Self::Other,
            _ => Self::Unknown,
        }
    }
}

impl From<Option<i64>> for Race {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Unknown, Self::from)
    }
}

/// Potential fraud determination attached to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FraudFlag {
    // Declared in code order so grouped tables list "No" before "Yes"
    No,
    Yes,
    /// Missing or unrecognised source flag
    Unknown,
}

impl FraudFlag {
    /// Parse the source flag; `None` for anything that is not a yes/no value
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "1" | "true" => Some(Self::Yes),
            "no" | "n" | "0" | "false" => Some(Self::No),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_fraud(self) -> bool {
        self == Self::Yes
    }

    /// Source code, `Yes` or `No`
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "Unknown",
        }
    }

    /// Human-readable label shown on charts
    #[must_use]
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Yes => "Potential Fraud",
            Self::No => "No Fraud",
            Self::Unknown => "Unknown",
        }
    }
}

/// Type of claim
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimType {
    Inpatient,
    Outpatient,
    /// Any other claim type, kept verbatim
    Other(String),
}

impl ClaimType {
    /// Label used when the source value is missing
    pub const UNKNOWN_LABEL: &'static str = "Unknown";

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Inpatient => "Inpatient",
            Self::Outpatient => "Outpatient",
            Self::Other(label) => label,
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::Other(Self::UNKNOWN_LABEL.to_string())
    }
}

impl From<&str> for ClaimType {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "inpatient" => Self::Inpatient,
            "outpatient" => Self::Outpatient,
            "" => Self::unknown(),
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

macro_rules! impl_label_traits {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.label())
                }
            }
        )+
    };
}

impl_label_traits!(Gender, Race, FraudFlag, ClaimType);
