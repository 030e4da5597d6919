//! Order pricing.
//!
//! Amounts are integer minor units. The delivery fee is 10% of the subtotal,
//! rounded half-up to the nearest minor unit.

use thiserror::Error;

/// Money amounts of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of unit price times quantity.
    pub subtotal: u64,
    /// See [`delivery_fee`].
    pub delivery_fee: u64,
    /// Subtotal plus delivery fee.
    pub total_amount: u64,
}

/// An amount did not fit in `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("order amount overflow")]
pub struct AmountOverflow;

/// 10% of `subtotal`, rounded half-up.
#[must_use]
pub const fn delivery_fee(subtotal: u64) -> u64 {
    let fee = subtotal / 10;

    if subtotal % 10 >= 5 { fee + 1 } else { fee }
}

/// Totals for `(unit_price, quantity)` pairs.
///
/// # Errors
///
/// Returns [`AmountOverflow`] if any intermediate amount exceeds `u64`.
pub fn order_totals<I>(lines: I) -> Result<OrderTotals, AmountOverflow>
where
    I: IntoIterator<Item = (u64, u32)>,
{
    let subtotal = lines
        .into_iter()
        .try_fold(0_u64, |subtotal, (unit_price, quantity)| {
            unit_price
                .checked_mul(u64::from(quantity))
                .and_then(|line_total| subtotal.checked_add(line_total))
        })
        .ok_or(AmountOverflow)?;

    let delivery_fee = delivery_fee(subtotal);

    Ok(OrderTotals {
        subtotal,
        delivery_fee,
        total_amount: subtotal.checked_add(delivery_fee).ok_or(AmountOverflow)?,
    })
}
