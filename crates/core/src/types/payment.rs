//! Payment method selection for checkout.

use serde::{Deserialize, Serialize};

/// Payment method chosen at checkout.
///
/// Payment processing itself is out of scope; the selection is recorded
/// verbatim on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    /// Credit/debit card.
    Card,
    /// JazzCash mobile wallet.
    Jazzcash,
    /// EasyPaisa mobile wallet.
    Easypaisa,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cod => write!(f, "cod"),
            Self::Card => write!(f, "card"),
            Self::Jazzcash => write!(f, "jazzcash"),
            Self::Easypaisa => write!(f, "easypaisa"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cod" => Ok(Self::Cod),
            "card" => Ok(Self::Card),
            "jazzcash" => Ok(Self::Jazzcash),
            "easypaisa" => Ok(Self::Easypaisa),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cod() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cod);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Jazzcash).unwrap(),
            "\"jazzcash\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"easypaisa\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Easypaisa);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }
}
