//! Shipping countries supported at checkout.

use serde::{Deserialize, Serialize};

/// Shipping destination country.
///
/// The wire format matches the checkout form values ("Pakistan", "USA", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Country {
    #[default]
    Pakistan,
    India,
    #[serde(rename = "USA")]
    Usa,
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "UAE")]
    Uae,
}

impl Country {
    /// The form value for this country.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pakistan => "Pakistan",
            Self::India => "India",
            Self::Usa => "USA",
            Self::Uk => "UK",
            Self::Uae => "UAE",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pakistan" => Ok(Self::Pakistan),
            "India" => Ok(Self::India),
            "USA" => Ok(Self::Usa),
            "UK" => Ok(Self::Uk),
            "UAE" => Ok(Self::Uae),
            _ => Err(format!("unsupported country: {s}")),
        }
    }
}
