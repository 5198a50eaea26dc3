use rust_decimal::Decimal;

/// USD-equivalent value of a trade: `price_per_unit × agreed_fx × units`.
///
/// Computed in exact decimal arithmetic, so the same inputs always give the
/// same amount and sums of amounts carry no binary rounding error. Zero or
/// negative unit counts yield zero or negative amounts.
///
/// Returns `None` when the exact product does not fit a [`Decimal`]: either
/// its magnitude overflows, or it needs more than 28 fractional digits and
/// would otherwise be rounded.
///
/// # Examples
///
/// ```
/// use settlement_engine::core::valuation::usd_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(usd_amount(dec!(100), dec!(19.001), 2), Some(dec!(3800.2)));
/// assert_eq!(usd_amount(dec!(100000000000), dec!(1), i64::MAX), None);
/// ```
pub fn usd_amount(price_per_unit: Decimal, agreed_fx: Decimal, units: i64) -> Option<Decimal> {
    let price = price_per_unit.normalize();
    let fx = agreed_fx.normalize();
    let scale = price.scale() + fx.scale();
    if scale > Decimal::MAX_SCALE {
        return None;
    }

    let amount = price.checked_mul(fx)?.checked_mul(Decimal::from(units))?;
    // A product that outgrows 96 bits is rescaled, dropping digits.
    kept_precision(amount, scale)
}

/// `a + b`, or `None` if the exact sum overflows or would be rounded.
pub fn exact_sum(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;
    kept_precision(sum, a.scale().max(b.scale()))
}

fn kept_precision(value: Decimal, scale: u32) -> Option<Decimal> {
    (value.is_zero() || value.scale() >= scale).then_some(value)
}
