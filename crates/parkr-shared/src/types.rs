use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SharedError;

/// Account role. Parkers book space, Parkees list it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Parker,
    Parkee,
    Admin,
    Team,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parker => "PARKER",
            Self::Parkee => "PARKEE",
            Self::Admin => "ADMIN",
            Self::Team => "TEAM",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PARKER" => Ok(Self::Parker),
            "PARKEE" => Ok(Self::Parkee),
            "ADMIN" => Ok(Self::Admin),
            "TEAM" => Ok(Self::Team),
            _ => Err(SharedError::UnknownRole(s.to_string())),
        }
    }
}

/// Booking lifecycle state. Transitions are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    #[serde(rename = "Escrow_Authorized")]
    EscrowAuthorized,
    Active,
    Completed,
    Cancelled,
    Refunded,
    Disputed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::EscrowAuthorized => "Escrow_Authorized",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
            Self::Disputed => "Disputed",
        }
    }

    /// Finished bookings, shown in a parker's history.
    pub fn is_history(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "escrow_authorized" => Ok(Self::EscrowAuthorized),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            "disputed" => Ok(Self::Disputed),
            _ => Err(SharedError::UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "EN_GB")]
    EnGb,
    #[serde(rename = "FR")]
    Fr,
    #[serde(rename = "ES")]
    Es,
    #[serde(rename = "DE")]
    De,
}

impl FromStr for Language {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "EN_GB" | "EN" => Ok(Self::EnGb),
            "FR" => Ok(Self::Fr),
            "ES" => Ok(Self::Es),
            "DE" => Ok(Self::De),
            _ => Err(SharedError::UnknownLanguage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PropertyCategory {
    #[default]
    #[serde(rename = "Residential Driveway")]
    ResidentialDriveway,
    #[serde(rename = "Private Gated Estate")]
    PrivateGatedEstate,
    #[serde(rename = "Commercial Multi-Storey")]
    CommercialMultiStorey,
    #[serde(rename = "Shared Residential Courtyard")]
    SharedResidentialCourtyard,
    #[serde(rename = "Allocated On-Street")]
    AllocatedOnStreet,
    #[serde(rename = "Underground Garage")]
    UndergroundGarage,
}
