use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Identifies a tabulador by the share of household income it caps the
/// family's contribution at, e.g. `14` for the 14% schedule.
///
/// Parses from `"14"`, `"14%"` or `"14_percent"`; displays as `"14"`, which
/// is also the value the assignment form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TabuladorId(u8);

impl TabuladorId {
    /// Creates an identifier for a cap percentage in `0..=100`.
    pub fn new(cap_percent: u8) -> Result<Self, InvalidInput> {
        if cap_percent > 100 {
            return Err(InvalidInput::UnparseableTabulador(cap_percent.to_string()));
        }
        Ok(Self(cap_percent))
    }

    pub fn cap_percent(&self) -> u8 {
        self.0
    }

    /// Label shown next to the choice on the assignment form.
    pub fn label(&self) -> String {
        format!("Asignar {}%", self.0)
    }
}

impl fmt::Display for TabuladorId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TabuladorId {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix("_percent")
            .or_else(|| trimmed.strip_suffix('%'))
            .unwrap_or(trimmed);

        digits
            .parse::<u8>()
            .ok()
            .and_then(|cap| Self::new(cap).ok())
            .ok_or_else(|| InvalidInput::UnparseableTabulador(s.to_string()))
    }
}

impl TryFrom<String> for TabuladorId {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TabuladorId> for String {
    fn from(id: TabuladorId) -> Self {
        id.to_string()
    }
}
