//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog documents store money as plain numbers in the currency's standard
//! unit (pesos, not centavos). [`Price`] pairs such an amount with its
//! currency so totals can be formatted the way the storefront shows them:
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use sweet_creations_core::Price;
//!
//! let price = Price::cop(Decimal::from(12_500));
//! assert_eq!(price.display(), "$ 12.500");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum fraction digits shown when formatting.
const MAX_FRACTION_DIGITS: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., pesos, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Colombian pesos.
    #[must_use]
    pub const fn cop(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::COP)
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display using `es-CO` conventions (e.g., `$ 12.500`).
    ///
    /// Thousands are grouped with `.`, decimals use `,` and trailing zero
    /// decimals are omitted.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.amount.round_dp(MAX_FRACTION_DIGITS).normalize();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let text = rounded.abs().to_string();
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let mut out = format!("{sign}{} {}", self.currency_code.symbol(), group_thousands(whole));
        if !fraction.is_empty() {
            out.push(',');
            out.push_str(fraction);
        }
        out
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert `.` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    COP,
}

impl CurrencyCode {
    /// Currency symbol used as display prefix.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::COP => "$",
        }
    }
}
