//! Shipping details and the delivery date rule.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Minimum days between today and the delivery date.
pub const MIN_DELIVERY_DAYS: i64 = 5;

/// Who receives the order, where and when.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingInfo {
    #[serde(rename = "nombreCliente")]
    pub customer_name: String,
    #[serde(rename = "domicilioCliente")]
    pub address: String,
    #[serde(rename = "emailCliente")]
    pub email: String,
    #[serde(rename = "fechaEntrega")]
    pub delivery_date: NaiveDate,
}

impl ShippingInfo {
    pub fn new(
        customer_name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        delivery_date: NaiveDate,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            address: address.into(),
            email: email.into(),
            delivery_date,
        }
    }

    /// Check the delivery date is at least `min_days` after `today`.
    pub fn validate_delivery_date(&self, today: NaiveDate, min_days: i64) -> Result<(), CommerceError> {
        validate_delivery_date(self.delivery_date, today, min_days)
    }

    /// Whether every field is filled in.
    pub fn is_complete(&self) -> bool {
        !self.customer_name.trim().is_empty()
            && !self.address.trim().is_empty()
            && !self.email.trim().is_empty()
    }
}

/// First date an order placed on `today` can be delivered.
pub fn earliest_delivery_date(today: NaiveDate, min_days: i64) -> NaiveDate {
    today
        .checked_add_signed(Duration::days(min_days))
        .unwrap_or(NaiveDate::MAX)
}

/// Reject delivery dates earlier than `today + min_days`.
pub fn validate_delivery_date(
    date: NaiveDate,
    today: NaiveDate,
    min_days: i64,
) -> Result<(), CommerceError> {
    let earliest = earliest_delivery_date(today, min_days);
    if date < earliest {
        return Err(CommerceError::InvalidDeliveryDate {
            date,
            earliest,
            min_days,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_exactly_five_days_is_accepted() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 23).unwrap();
        assert!(validate_delivery_date(date, today(), MIN_DELIVERY_DAYS).is_ok());
    }

    #[test]
    fn test_four_days_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 22).unwrap();
        match validate_delivery_date(date, today(), MIN_DELIVERY_DAYS) {
            Err(CommerceError::InvalidDeliveryDate { earliest, .. }) => {
                assert_eq!(earliest, NaiveDate::from_ymd_opt(2026, 10, 23).unwrap());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_past_date_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(validate_delivery_date(date, today(), MIN_DELIVERY_DAYS).is_err());
    }

    #[test]
    fn test_wire_shape_and_completeness() {
        let info = ShippingInfo::new(
            "Ana",
            "Av. Siempreviva 742",
            "ana@example.com",
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
        );
        assert!(info.is_complete());

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["nombreCliente"], "Ana");
        assert_eq!(value["fechaEntrega"], "2026-11-01");

        let blank = ShippingInfo::new(" ", "x", "y", info.delivery_date);
        assert!(!blank.is_complete());
    }
}
