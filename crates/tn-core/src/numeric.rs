//! Distances and the checks applied to them before they enter a graph.

use crate::{TnError, TnResult};

/// Distance and cost type, in kilometres.
pub type Real = f64;

/// Cost of a destination that cannot be reached.
pub const UNREACHABLE: Real = Real::INFINITY;

/// Relative slack used when comparing summed route costs.
pub const COST_EPSILON: Real = 1e-9;

/// Whether two accumulated costs agree up to summation order.
///
/// Costs built from the same weights in a different order can differ in the
/// last bits, so the comparison scales with the larger magnitude. Two
/// unreachable costs match.
pub fn costs_match(a: Real, b: Real) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= COST_EPSILON * scale
}

/// Accept a connection weight: finite and not below zero.
pub fn ensure_weight(value: Real, what: &'static str) -> TnResult<Real> {
    if !value.is_finite() {
        return Err(TnError::NonFinite { what, value });
    }
    if value < 0.0 {
        return Err(TnError::Negative { what, value });
    }
    Ok(value)
}
