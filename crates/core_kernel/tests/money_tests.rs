//! Unit tests for the Money module public surface
//!
//! Covers display formatting, serialization, and rounding behavior; the
//! arithmetic invariants live next to the implementation.

use core_kernel::{Currency, Money};
use rust_decimal_macros::dec;

mod display_tests {
    use super::*;

    #[test]
    fn test_two_decimal_currency_formatting() {
        let m = Money::new(dec!(1234.5), Currency::USD);
        assert_eq!(m.to_string(), "$ 1234.50");
    }

    #[test]
    fn test_zero_decimal_currency_formatting() {
        let m = Money::new(dec!(150000), Currency::IDR);
        assert_eq!(m.to_string(), "Rp 150000");
    }

    #[test]
    fn test_currency_display_is_iso_code() {
        assert_eq!(Currency::SGD.to_string(), "SGD");
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_money_round_trips_through_json() {
        let original = Money::new(dec!(99.99), Currency::EUR);
        let json = serde_json::to_string(&original).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::IDR).unwrap();
        assert_eq!(json, "\"IDR\"");
    }
}

mod rounding_tests {
    use super::*;

    #[test]
    fn test_amounts_round_to_four_places() {
        let m = Money::new(dec!(10.123456), Currency::USD);
        assert_eq!(m.amount(), dec!(10.1235));
    }

    #[test]
    fn test_round_to_currency_respects_decimal_places() {
        let usd = Money::new(dec!(10.1251), Currency::USD).round_to_currency();
        assert_eq!(usd.amount(), dec!(10.13));

        let idr = Money::new(dec!(10.7), Currency::IDR).round_to_currency();
        assert_eq!(idr.amount(), dec!(11));
    }

    #[test]
    fn test_round_to_currency_midpoint_goes_to_even() {
        let idr = Money::new(dec!(10.5), Currency::IDR).round_to_currency();
        assert_eq!(idr.amount(), dec!(10));
    }

    #[test]
    fn test_bankers_rounding_goes_to_even() {
        let m = Money::new(dec!(2.125), Currency::USD).round_bankers(2);
        assert_eq!(m.amount(), dec!(2.12));

        let m = Money::new(dec!(2.135), Currency::USD).round_bankers(2);
        assert_eq!(m.amount(), dec!(2.14));
    }
}
