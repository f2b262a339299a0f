use core::str::FromStr;

use serde::{Deserialize, Serialize};

use sockwarehouse_core::DomainError;

/// How a stock total query compares the stored cotton part with the probe value.
///
/// Parsed once at the boundary from `moreThan` / `lessThan` / `equal`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CottonComparison {
    #[serde(rename = "moreThan")]
    GreaterThan,
    #[serde(rename = "lessThan")]
    LessThan,
    #[serde(rename = "equal")]
    Equal,
}

impl CottonComparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            CottonComparison::GreaterThan => "moreThan",
            CottonComparison::LessThan => "lessThan",
            CottonComparison::Equal => "equal",
        }
    }

    /// Whether a stored cotton part satisfies this comparison against `probe`.
    pub fn matches(&self, stored: i32, probe: i32) -> bool {
        match self {
            CottonComparison::GreaterThan => stored > probe,
            CottonComparison::LessThan => stored < probe,
            CottonComparison::Equal => stored == probe,
        }
    }
}

impl core::fmt::Display for CottonComparison {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CottonComparison {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moreThan" => Ok(CottonComparison::GreaterThan),
            "lessThan" => Ok(CottonComparison::LessThan),
            "equal" => Ok(CottonComparison::Equal),
            other => Err(DomainError::invalid_operation(format!(
                "'{other}' (expected one of: moreThan, lessThan, equal)"
            ))),
        }
    }
}
