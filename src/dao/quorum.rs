//! Vote threshold calculation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Affirmative votes needed to pass a proposal: `ceil(quorum * member_count)`.
///
/// Computed in decimal arithmetic so that e.g. 0.51 of 4 members is exactly
/// 2.04 and rounds up to 3.
pub fn votes_required(member_count: usize, quorum: Decimal) -> u64 {
    let product = quorum * Decimal::from(member_count as u64);
    product.ceil().to_u64().unwrap_or(u64::MAX)
}
