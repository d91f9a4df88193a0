//! XLM amounts.
//!
//! Amounts are kept as integer stroops (the smallest Stellar unit) so totals and
//! fees never pick up floating-point drift. Formatting to a fixed number of
//! decimals happens only at the display edge.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Number of stroops in one lumen.
pub const STROOPS_PER_XLM: u128 = 10_000_000;

/// Decimal places carried by a stroop amount.
const STROOP_DECIMALS: u32 = 7;

/// Non-negative amount of Stellar Lumens, stored in stroops.
///
/// Held as `u128` so any `u64` quantity of any catalog price, summed over a
/// whole cart, is exact. Arithmetic only saturates at `u128::MAX` stroops,
/// which needs a unit price above `u64::MAX` stroops to reach.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Xlm(u128);

impl ValueObject for Xlm {}

impl Xlm {
    pub const ZERO: Xlm = Xlm(0);

    /// Whole lumens (catalog prices are declared this way).
    pub const fn from_xlm(whole: u64) -> Self {
        Self(whole as u128 * STROOPS_PER_XLM)
    }

    pub const fn from_stroops(stroops: u128) -> Self {
        Self(stroops)
    }

    pub const fn stroops(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_add(self, other: Xlm) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// `self × quantity`. Exact for unit amounts up to `u64::MAX` stroops.
    pub const fn saturating_mul(self, quantity: u64) -> Self {
        Self(self.0.saturating_mul(quantity as u128))
    }

    /// Fixed-decimal rendering, rounding half up (`toFixed` semantics for
    /// non-negative amounts).
    ///
    /// Precision beyond seven decimals is padded with zeros.
    pub fn format_fixed(&self, decimals: u32) -> String {
        let kept = decimals.min(STROOP_DECIMALS);
        let divisor = 10u128.pow(STROOP_DECIMALS - kept);
        let stroops = self.0;

        let mut scaled = stroops / divisor;
        if (stroops % divisor) * 2 >= divisor {
            scaled += 1;
        }

        let unit = 10u128.pow(kept);
        let whole = scaled / unit;
        if decimals == 0 {
            return whole.to_string();
        }

        let frac = scaled % unit;
        let padding = (decimals - kept) as usize;
        format!(
            "{whole}.{frac:0width$}{zeros}",
            width = kept as usize,
            zeros = "0".repeat(padding)
        )
    }
}

impl core::fmt::Display for Xlm {
    /// Shortest exact decimal form: `100`, `0.00001`, `12.5`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let whole = self.0 / STROOPS_PER_XLM;
        let frac = self.0 % STROOPS_PER_XLM;
        if frac == 0 {
            return write!(f, "{whole}");
        }

        let digits = format!("{frac:07}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl Add for Xlm {
    type Output = Xlm;

    fn add(self, rhs: Xlm) -> Xlm {
        self.saturating_add(rhs)
    }
}

impl Sum for Xlm {
    fn sum<I: Iterator<Item = Xlm>>(iter: I) -> Xlm {
        iter.fold(Xlm::ZERO, Xlm::saturating_add)
    }
}

impl<'a> Sum<&'a Xlm> for Xlm {
    fn sum<I: Iterator<Item = &'a Xlm>>(iter: I) -> Xlm {
        iter.copied().sum()
    }
}
