use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BreakdownError;

/// Warehouse size tiers and their billed credit rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WarehouseSize {
    #[serde(rename = "X-Small")]
    XSmall,
    #[serde(rename = "Small")]
    Small,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "Large")]
    Large,
    #[serde(rename = "X-Large")]
    XLarge,
    #[serde(rename = "2X-Large")]
    X2Large,
    #[serde(rename = "3X-Large")]
    X3Large,
    #[serde(rename = "4X-Large")]
    X4Large,
    #[serde(rename = "5X-Large")]
    X5Large,
    #[serde(rename = "6X-Large")]
    X6Large,
}

impl WarehouseSize {
    pub const ALL: [WarehouseSize; 10] = [
        Self::XSmall,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::XLarge,
        Self::X2Large,
        Self::X3Large,
        Self::X4Large,
        Self::X5Large,
        Self::X6Large,
    ];

    pub fn credits_per_hour(self) -> u32 {
        match self {
            Self::XSmall => 1,
            Self::Small => 2,
            Self::Medium => 4,
            Self::Large => 8,
            Self::XLarge => 16,
            Self::X2Large => 32,
            Self::X3Large => 64,
            Self::X4Large => 128,
            Self::X5Large => 256,
            Self::X6Large => 512,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::XSmall => "X-Small",
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::XLarge => "X-Large",
            Self::X2Large => "2X-Large",
            Self::X3Large => "3X-Large",
            Self::X4Large => "4X-Large",
            Self::X5Large => "5X-Large",
            Self::X6Large => "6X-Large",
        }
    }
}

impl fmt::Display for WarehouseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WarehouseSize {
    type Err = BreakdownError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.label() == value)
            .ok_or_else(|| BreakdownError::UnknownWarehouseSize(value.to_string()))
    }
}
