//! Newtype identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate string-backed ID newtypes.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Product code as printed on the shelf or encoded in the barcode.
    ProductCode
);
define_id!(
    /// Order number assigned at checkout.
    OrderNumber
);

/// Prefix assigned to Argentina in the EAN-13 numbering system.
pub const BARCODE_PREFIX: &str = "779";

impl ProductCode {
    /// Whether this code is an Argentine EAN-13 barcode (`779` + 10 digits).
    pub fn is_barcode(&self) -> bool {
        self.0.len() == 13
            && self.0.starts_with(BARCODE_PREFIX)
            && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl OrderNumber {
    /// Build an order number from the checkout timestamp.
    pub fn from_timestamp(at: chrono::DateTime<chrono::Utc>) -> Self {
        Self(at.format("PED-%Y%m%d-%H%M%S").to_string())
    }
}

/// Position-independent identifier of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LineId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_barcode_detection() {
        assert!(ProductCode::new("7790360966841").is_barcode());
        assert!(!ProductCode::new("7800360966841").is_barcode());
        assert!(!ProductCode::new("779036096684").is_barcode());
        assert!(!ProductCode::new("779036096684a").is_barcode());
        assert!(!ProductCode::new("leche").is_barcode());
    }

    #[test]
    fn test_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductCode::new("A1")).unwrap();
        assert_eq!(json, "\"A1\"");
        let line: LineId = serde_json::from_str("7").unwrap();
        assert_eq!(line, LineId(7));
    }

    #[test]
    fn test_order_number_from_timestamp() {
        let at = chrono::Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(OrderNumber::from_timestamp(at).as_str(), "PED-20260304-050607");
    }
}
