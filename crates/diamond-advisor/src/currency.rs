//! Currency Conversion
//!
//! Fixed-rate conversion of a USD valuation into parallel currencies.
//! The rates are a point-in-time snapshot (March 2025) and are stale by
//! design: refreshing them is a manual code change, never a runtime
//! fetch. No rounding happens here; display precision (2 decimals for
//! USD/INR/AED, 0 for JPY) is a presentation concern.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 1 USD in Indian Rupees (snapshot, March 2025)
pub const USD_TO_INR: Decimal = dec!(83.5);

/// 1 USD in Japanese Yen (snapshot, March 2025)
pub const USD_TO_JPY: Decimal = dec!(149.8);

/// 1 USD in UAE Dirhams (snapshot, March 2025)
pub const USD_TO_AED: Decimal = dec!(3.67);

/// A valuation expressed in all supported currencies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyQuote {
    pub usd: Decimal,
    pub inr: Decimal,
    pub jpy: Decimal,
    pub aed: Decimal,
}

/// Convert a USD amount into the full quote. Pure fixed-rate
/// multiplication, exact in decimal arithmetic.
pub fn convert(usd: Decimal) -> CurrencyQuote {
    CurrencyQuote {
        usd,
        inr: usd * USD_TO_INR,
        jpy: usd * USD_TO_JPY,
        aed: usd * USD_TO_AED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_reference_amount() {
        let quote = convert(dec!(100));
        assert_eq!(quote.usd, dec!(100));
        assert_eq!(quote.inr, dec!(8350));
        assert_eq!(quote.jpy, dec!(14980));
        assert_eq!(quote.aed, dec!(367));
    }

    #[test]
    fn test_convert_zero() {
        let quote = convert(Decimal::ZERO);
        assert_eq!(quote.inr, Decimal::ZERO);
        assert_eq!(quote.jpy, Decimal::ZERO);
        assert_eq!(quote.aed, Decimal::ZERO);
    }

    #[test]
    fn test_convert_is_exact() {
        // 149.8 is not representable in binary floating point; decimal
        // arithmetic keeps the quote exact.
        let quote = convert(dec!(1234.56));
        assert_eq!(quote.jpy, dec!(1234.56) * dec!(149.8));
        assert_eq!(quote.jpy, dec!(184937.088));
    }
}
