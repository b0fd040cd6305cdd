//! Module-level decimal constants.

use rust_decimal::Decimal;

/// Sentinel meaning "disabled" for `price_ceiling`, `price_floor`, and
/// `order_refresh_tolerance_pct`.
pub const DISABLED: Decimal = Decimal::new(-1, 0);

/// Returns true if `value` is the disabled sentinel (`-1`).
pub fn is_disabled(value: Decimal) -> bool {
    value == DISABLED
}
