use serde::{Deserialize, Serialize};

use crate::utils::constants::{OSF_THRESHOLD_HIGH, OSF_THRESHOLD_LOW, OSF_THRESHOLD_MEDIUM};

/// Product quality class of the machine cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "L")]
    Low,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "H")]
    High,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [ProductType::Low, ProductType::Medium, ProductType::High];

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "L" => Some(ProductType::Low),
            "M" => Some(ProductType::Medium),
            "H" => Some(ProductType::High),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ProductType::Low => "L",
            ProductType::Medium => "M",
            ProductType::High => "H",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::Low => "Low",
            ProductType::Medium => "Medium",
            ProductType::High => "High",
        }
    }

    /// Overstrain (tool wear x torque) above which an OSF condition is raised.
    pub fn overstrain_threshold(&self) -> f64 {
        match self {
            ProductType::Low => OSF_THRESHOLD_LOW,
            ProductType::Medium => OSF_THRESHOLD_MEDIUM,
            ProductType::High => OSF_THRESHOLD_HIGH,
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
