//! Money and tax rate types.
//!
//! Amounts are integer minor units (cents). Rounding happens at well-defined
//! points: when a rate is applied, when a decimal is parsed and when a line
//! total is taken to whole units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Argentine peso.
    #[default]
    ARS,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "ARS").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ARS => "ARS",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::ARS | Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "ARS" => Some(Currency::ARS),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency, stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the cent.
    ///
    /// ```
    /// use tienda_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(1210.5, Currency::ARS);
    /// assert_eq!(price.amount_cents, 121050);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$1210.50").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "1210.50").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Subtract another Money value, returning None on currency mismatch or overflow.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// The same amount tagged with `currency`.
    pub fn in_currency(&self, currency: Currency) -> Money {
        Money::new(self.amount_cents, currency)
    }

    /// Round to whole currency units, half away from zero.
    pub fn round_to_unit(&self) -> Money {
        Money::new(div_round(self.amount_cents as i128, 100) as i64 * 100, self.currency)
    }

    /// Add a tax rate on top of this amount (net to gross).
    pub fn with_tax(&self, rate: TaxRate) -> Money {
        let scaled = self.amount_cents as i128 * (BASIS + rate.basis_points as i128);
        Money::new(div_round(scaled, BASIS) as i64, self.currency)
    }

    /// Take a tax rate off this amount (gross to net).
    pub fn without_tax(&self, rate: TaxRate) -> Money {
        let scaled = self.amount_cents as i128 * BASIS;
        Money::new(
            div_round(scaled, BASIS + rate.basis_points as i128) as i64,
            self.currency,
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

const BASIS: i128 = 10_000;

/// Integer division rounding half away from zero.
fn div_round(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

/// A tax rate in basis points (2100 = 21%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRate {
    pub basis_points: u32,
}

impl TaxRate {
    /// Argentine IVA general rate.
    pub const IVA: TaxRate = TaxRate { basis_points: 2100 };

    pub fn new(basis_points: u32) -> Self {
        Self { basis_points }
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::IVA
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.basis_points % 100 == 0 {
            write!(f, "{}%", self.basis_points / 100)
        } else {
            write!(f, "{:.2}%", self.basis_points as f64 / 100.0)
        }
    }
}

/// Serde adapter storing Money as a plain decimal number.
///
/// The persisted cart keeps prices as JSON numbers. Values load in the
/// default currency; whoever knows the real one re-stamps them with
/// [`Money::in_currency`].
pub mod decimal {
    use super::{Currency, Money};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}
