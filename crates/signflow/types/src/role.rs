//! Signer roles and their display metadata

use crate::DocumentError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A party that may be required to sign a document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignerRole {
    /// The student doing the internship
    Student,
    /// The academic tutor following the student
    Tutor,
    /// The industrial supervisor at the host company
    Supervisor,
    /// An administrator of the internship office
    Admin,
}

impl SignerRole {
    /// Every role, in canonical order
    pub const ALL: [SignerRole; 4] = [
        SignerRole::Student,
        SignerRole::Tutor,
        SignerRole::Supervisor,
        SignerRole::Admin,
    ];

    /// Wire name, as used in JSON and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Tutor => "tutor",
            Self::Supervisor => "supervisor",
            Self::Admin => "admin",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Tutor => "Tutor",
            Self::Supervisor => "Industrial supervisor",
            Self::Admin => "Administrator",
        }
    }

    pub fn badge_color(&self) -> BadgeColor {
        match self {
            Self::Student => BadgeColor::Blue,
            Self::Tutor => BadgeColor::Green,
            Self::Supervisor => BadgeColor::Purple,
            Self::Admin => BadgeColor::Red,
        }
    }
}

impl std::fmt::Display for SignerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignerRole {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "tutor" => Ok(Self::Tutor),
            "supervisor" => Ok(Self::Supervisor),
            "admin" => Ok(Self::Admin),
            _ => Err(DocumentError::UnknownRole(s.to_string())),
        }
    }
}

/// Badge colors used to render roles and statuses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Gray,
    Blue,
    Green,
    Yellow,
    Purple,
    Red,
}

impl BadgeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Red => "red",
        }
    }
}
