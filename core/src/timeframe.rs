use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ServiceError;

/// Horizon the WOOP wish should be reached in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Timeframe {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "4w")]
    FourWeeks,
    #[serde(rename = "3-12m")]
    Months,
    #[default]
    #[serde(rename = "none")]
    None,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Self::Day, Self::FourWeeks, Self::Months, Self::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::FourWeeks => "4w",
            Self::Months => "3-12m",
            Self::None => "none",
        }
    }

    /// Plain-language wording used inside the prompt.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Day => "the next 24 hours",
            Self::FourWeeks => "the next 4 weeks",
            Self::Months => "the next 3 to 12 months",
            Self::None => "no fixed deadline",
        }
    }

    /// Canonicalize optional caller input. Absent or blank input is `none`.
    pub fn normalize(input: Option<&str>) -> Result<Self, ServiceError> {
        match input {
            Some(raw) if !raw.trim().is_empty() => raw.parse(),
            _ => Ok(Self::None),
        }
    }
}

impl FromStr for Timeframe {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                '\u{2013}' | '\u{2014}' => '-',
                other => other,
            })
            .collect();

        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str() == canonical)
            .ok_or_else(|| {
                ServiceError::InvalidTimeframe(format!(
                    "timeframe must be one of: 24h, 4w, 3-12m, none (received \"{}\").",
                    s.trim()
                ))
            })
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
