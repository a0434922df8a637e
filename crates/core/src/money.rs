//! Money: unit prices in the smallest currency unit.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Unit price in cents. Single-currency; always positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub fn from_cents(cents: u64) -> DomainResult<Self> {
        if cents == 0 {
            return Err(DomainError::validation("price must be positive"));
        }
        Ok(Self(cents))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Total price of `qty` units, in cents.
    pub fn total(&self, qty: u64) -> DomainResult<u64> {
        self.0
            .checked_mul(qty)
            .ok_or_else(|| DomainError::validation("total price overflows"))
    }
}

impl ValueObject for Price {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_price() {
        let err = Price::from_cents(0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn totals_multiply_per_unit() {
        let price = Price::from_cents(1299).unwrap();
        assert_eq!(price.total(3).unwrap(), 3897);
    }

    #[test]
    fn total_overflow_is_a_validation_error() {
        let price = Price::from_cents(u64::MAX).unwrap();
        let err = price.total(2).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
