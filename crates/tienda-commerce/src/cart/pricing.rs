//! Cart totals.

use crate::cart::CartLine;
use crate::error::CommerceError;
use crate::money::{self, Currency, Money};
use serde::{Deserialize, Serialize};

/// Net / IVA / gross breakdown of a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of net price times quantity.
    #[serde(with = "money::decimal")]
    pub net: Money,
    /// Tax portion: total minus net.
    #[serde(with = "money::decimal")]
    pub iva: Money,
    /// Sum of line totals.
    #[serde(with = "money::decimal")]
    pub total: Money,
}

impl CartTotals {
    /// Zero totals in `currency`.
    pub fn zero(currency: Currency) -> Self {
        Self {
            net: Money::zero(currency),
            iva: Money::zero(currency),
            total: Money::zero(currency),
        }
    }

    /// Accumulate totals over `lines` in one pass.
    pub fn from_lines(lines: &[CartLine], currency: Currency) -> Result<Self, CommerceError> {
        let mut net = Money::zero(currency);
        let mut total = Money::zero(currency);

        for line in lines {
            let line_net = line.net_total()?;
            net = net.try_add(&line_net).ok_or_else(|| mismatch(currency, line_net))?;
            total = total
                .try_add(&line.total)
                .ok_or_else(|| mismatch(currency, line.total))?;
        }

        let iva = total.try_subtract(&net).ok_or(CommerceError::Overflow)?;
        Ok(Self { net, iva, total })
    }

    /// Each figure rounded to whole units, as shown on the register.
    pub fn rounded(&self) -> Self {
        Self {
            net: self.net.round_to_unit(),
            iva: self.iva.round_to_unit(),
            total: self.total.round_to_unit(),
        }
    }
}

fn mismatch(expected: Currency, got: Money) -> CommerceError {
    if expected == got.currency {
        CommerceError::Overflow
    } else {
        CommerceError::CurrencyMismatch {
            expected: expected.code().to_string(),
            got: got.currency.code().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::ids::LineId;
    use crate::money::TaxRate;
    use chrono::NaiveDate;

    fn line(id: u32, net_cents: i64, quantity: i64) -> CartLine {
        let product = Product::from_net_price(
            format!("P{}", id),
            "Producto",
            Money::new(net_cents, Currency::ARS),
            TaxRate::IVA,
            100,
            NaiveDate::from_ymd_opt(2036, 1, 1).unwrap(),
        );
        CartLine::new(LineId(id), product, quantity).unwrap()
    }

    #[test]
    fn test_totals_split() {
        // 100.00 net x2 -> 242.00 ; 50.00 net x1 -> 60.50 -> 61.00
        let lines = vec![line(1, 10_000, 2), line(2, 5_000, 1)];
        let totals = CartTotals::from_lines(&lines, Currency::ARS).unwrap();

        assert_eq!(totals.net.amount_cents, 25_000);
        assert_eq!(totals.total.amount_cents, 30_300);
        assert_eq!(totals.iva.amount_cents, 5_300);
    }

    #[test]
    fn test_rounded_totals() {
        let lines = vec![line(1, 999, 3)];
        let totals = CartTotals::from_lines(&lines, Currency::ARS).unwrap();
        // net 29.97, total 36.00, iva 6.03
        assert_eq!(totals.net.amount_cents, 2_997);
        let rounded = totals.rounded();
        assert_eq!(rounded.net.amount_cents, 3_000);
        assert_eq!(rounded.iva.amount_cents, 600);
        assert_eq!(rounded.total.amount_cents, 3_600);
    }

    #[test]
    fn test_empty_lines_are_zero() {
        let totals = CartTotals::from_lines(&[], Currency::ARS).unwrap();
        assert_eq!(totals, CartTotals::zero(Currency::ARS));
    }

    #[test]
    fn test_currency_mismatch() {
        let lines = vec![line(1, 1_000, 1)];
        let err = CartTotals::from_lines(&lines, Currency::USD).unwrap_err();
        assert!(matches!(err, CommerceError::CurrencyMismatch { .. }));
    }
}
