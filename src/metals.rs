//! Metals

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Unknown metal name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown metal: {0}")]
pub struct UnknownMetal(pub String);

/// A precious metal with a quoted market rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Metal {
    /// Gold
    #[default]
    Gold,

    /// Silver
    Silver,
}

impl Metal {
    /// All quoted metals.
    pub const ALL: [Metal; 2] = [Metal::Gold, Metal::Silver];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metal {
    type Err = UnknownMetal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gold" | "xau" => Ok(Metal::Gold),
            "silver" | "xag" => Ok(Metal::Silver),
            _ => Err(UnknownMetal(s.to_string())),
        }
    }
}

impl TryFrom<String> for Metal {
    type Error = UnknownMetal;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_case_insensitively() -> TestResult {
        assert_eq!("Gold".parse::<Metal>()?, Metal::Gold);
        assert_eq!(" SILVER ".parse::<Metal>()?, Metal::Silver);
        assert_eq!("xau".parse::<Metal>()?, Metal::Gold);

        Ok(())
    }

    #[test]
    fn rejects_unknown_metal() {
        assert_eq!(
            "platinum".parse::<Metal>(),
            Err(UnknownMetal("platinum".to_string()))
        );
    }

    #[test]
    fn deserializes_from_string() -> TestResult {
        let metal: Metal = serde_json::from_str(r#""silver""#)?;

        assert_eq!(metal, Metal::Silver);

        Ok(())
    }

    #[test]
    fn displays_name() {
        assert_eq!(Metal::Gold.to_string(), "Gold");
    }
}
