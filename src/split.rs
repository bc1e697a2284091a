//! Cent-exact bill splitting.
//!
//! All arithmetic happens on integer cents so that the shares of a bill
//! always sum to its total, whatever the rule. Proportional rules use
//! largest-remainder allocation: everyone gets the floor of their raw slice,
//! then leftover cents go to the largest fractional parts, one each.

use crate::db::models::bills::ShareAllocation;
use crate::types::MemberId;

/// Convert a currency amount to integer cents, rounding to the nearest cent.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Split `total_cents` evenly across members, in order. Leftover cents after
/// floor division go to the earliest members, one each.
pub fn split_equal(total_cents: i64, member_ids: &[MemberId]) -> Vec<ShareAllocation> {
    if member_ids.is_empty() {
        return Vec::new();
    }

    let count = member_ids.len() as i64;
    let base = total_cents / count;
    let mut remainder = total_cents - base * count;

    member_ids
        .iter()
        .map(|&member_id| {
            let extra = if remainder > 0 { 1 } else { 0 };
            remainder -= extra;
            ShareAllocation {
                member_id,
                amount_cents: base + extra,
            }
        })
        .collect()
}

/// Split `total_cents` proportionally to each member's value (a percent or a
/// weight). Members with a non-positive value get no share. Returns an empty
/// allocation if no value is positive.
pub fn split_proportional(total_cents: i64, entries: &[(MemberId, f64)]) -> Vec<ShareAllocation> {
    let positive: Vec<_> = entries.iter().copied().filter(|&(_, v)| v > 0.0).collect();
    if positive.is_empty() {
        return Vec::new();
    }

    let sum: f64 = positive.iter().map(|&(_, v)| v).sum();
    if sum <= 0.0 {
        return Vec::new();
    }

    struct Slice {
        member_id: MemberId,
        base: i64,
        frac: f64,
    }

    let mut slices: Vec<Slice> = positive
        .iter()
        .map(|&(member_id, value)| {
            let raw = (total_cents as f64) * value / sum;
            let base = raw.floor() as i64;
            Slice {
                member_id,
                base,
                frac: raw - base as f64,
            }
        })
        .collect();

    let mut remainder = total_cents - slices.iter().map(|s| s.base).sum::<i64>();

    // Hand out remaining cents to the largest fractional parts. The sort is
    // stable, so equal fractions resolve in member order.
    let mut order: Vec<usize> = (0..slices.len()).collect();
    order.sort_by(|&a, &b| slices[b].frac.partial_cmp(&slices[a].frac).unwrap_or(std::cmp::Ordering::Equal));

    for &i in &order {
        if remainder <= 0 {
            break;
        }
        slices[i].base += 1;
        remainder -= 1;
    }

    // Numeric oddities could in principle leave a negative remainder; take
    // cents back from the tail until balanced.
    for &i in order.iter().rev() {
        if remainder >= 0 {
            break;
        }
        if slices[i].base > 0 {
            slices[i].base -= 1;
            remainder += 1;
        }
    }

    let mut allocations: Vec<ShareAllocation> = slices
        .into_iter()
        .map(|s| ShareAllocation {
            member_id: s.member_id,
            amount_cents: s.base,
        })
        .collect();

    // Final guarantee: the allocation sum matches the total exactly; any
    // residue lands on the first member deterministically.
    let allocated: i64 = allocations.iter().map(|a| a.amount_cents).sum();
    if allocated != total_cents {
        allocations[0].amount_cents += total_cents - allocated;
    }

    allocations
}
