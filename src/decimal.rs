use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::{MortgageError, Result};

/// minor unit of the single supported currency (centavos)
pub const MINOR_UNIT_SCALE: u32 = 2;

/// rounding applied when a monetary result carries more precision than the minor unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundingMode {
    /// fail if rounding would change the value
    Unnecessary,
    /// away from zero
    Up,
    /// towards zero
    Down,
    /// towards positive infinity
    #[default]
    Ceiling,
    /// towards negative infinity
    Floor,
    HalfUp,
    HalfDown,
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> Option<RoundingStrategy> {
        match self {
            RoundingMode::Unnecessary => None,
            RoundingMode::Up => Some(RoundingStrategy::AwayFromZero),
            RoundingMode::Down => Some(RoundingStrategy::ToZero),
            RoundingMode::Ceiling => Some(RoundingStrategy::ToPositiveInfinity),
            RoundingMode::Floor => Some(RoundingStrategy::ToNegativeInfinity),
            RoundingMode::HalfUp => Some(RoundingStrategy::MidpointAwayFromZero),
            RoundingMode::HalfDown => Some(RoundingStrategy::MidpointTowardZero),
            RoundingMode::HalfEven => Some(RoundingStrategy::MidpointNearestEven),
        }
    }

    /// round a raw decimal to `dp` places
    pub fn apply(self, value: Decimal, dp: u32) -> Result<Decimal> {
        match self.strategy() {
            Some(strategy) => Ok(value.round_dp_with_strategy(dp, strategy)),
            None => {
                let rounded = value.round_dp(dp);
                if rounded != value {
                    return Err(MortgageError::RoundingNecessary { value, scale: dp });
                }
                Ok(rounded)
            }
        }
    }
}

/// monetary amount in the minor-unit precision of the currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal, failing if it carries sub-centavo precision
    pub fn of(d: Decimal) -> Result<Self> {
        Self::of_rounded(d, RoundingMode::Unnecessary)
    }

    /// create from decimal with explicit rounding
    pub fn of_rounded(d: Decimal, mode: RoundingMode) -> Result<Self> {
        Ok(Money(mode.apply(d, MINOR_UNIT_SCALE)?))
    }

    /// create from decimal, rounding half-up to the minor unit
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self> {
        let d = Decimal::from_str(s.trim()).map_err(|_| MortgageError::InvalidAmount {
            input: s.to_string(),
        })?;
        Self::of(d)
    }

    /// create from whole currency units
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor units (centavos)
    pub fn from_minor(amount: i64) -> Self {
        Money(Decimal::new(amount, MINOR_UNIT_SCALE))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// multiply by a factor and round back to the minor unit
    pub fn multiplied_by(&self, factor: Decimal, mode: RoundingMode) -> Result<Self> {
        let product = self
            .0
            .checked_mul(factor)
            .ok_or_else(|| MortgageError::CalculationError {
                message: format!("overflow multiplying {} by {}", self.0, factor),
            })?;
        Self::of_rounded(product, mode)
    }

    /// divide by a divisor and round back to the minor unit
    pub fn divided_by(&self, divisor: Decimal, mode: RoundingMode) -> Result<Self> {
        if divisor.is_zero() {
            return Err(MortgageError::DivisionByZero {
                context: format!("dividing {} by zero", self.0),
            });
        }
        Self::of_rounded(self.0 / divisor, mode)
    }

    /// round to an arbitrary number of places (e.g. whole units)
    pub fn to_scale(&self, dp: u32, mode: RoundingMode) -> Result<Self> {
        Ok(Money(mode.apply(self.0, dp)?))
    }

    /// unrounded ratio of this amount to another (e.g. fee / contract price)
    pub fn ratio(&self, denominator: Money) -> Result<Decimal> {
        if denominator.is_zero() {
            return Err(MortgageError::DivisionByZero {
                context: format!("ratio of {} to a zero amount", self.0),
            });
        }
        Ok((self.0 / denominator.0).normalize())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.round_dp(MINOR_UNIT_SCALE))
    }
}

impl FromStr for Money {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self> {
        Money::from_str_exact(s)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// rate type for interest rates, percentages, and multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);
    pub const ONE: Rate = Rate(Decimal::ONE);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// create from basis points (e.g., 850 for 8.5%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::from(10000))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// monthly rate from annual rate
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(12))
    }

    /// complement, e.g. percent balance payment from percent down payment
    pub fn complement(&self) -> Rate {
        Rate(Decimal::ONE - self.0)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}
