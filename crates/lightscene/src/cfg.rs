//! Numeric defaults shared across modules (internal).
//!
//! Policy
//! - Fixed constants, same as the tolerance policy for geometry elsewhere:
//!   tune here, not at call sites.

/// Graph coordinates are rounded to this many decimals when keyed.
pub const KEY_DECIMALS: i32 = 2;
/// `10^KEY_DECIMALS`; keys store coordinates as integer multiples of `1/KEY_SCALE`.
pub const KEY_SCALE: f64 = 100.0;
/// Largest keyable coordinate magnitude; hundredths stay exact in `f64` below it.
pub const MAX_KEY_COORD: f64 = 1e13;
/// A coordinate counts as "already rounded" when it is this close to its rounding.
pub(crate) const ROUNDING_EPS: f64 = 1e-8;
/// Below this length a ray or edge direction is treated as degenerate.
pub(crate) const LENGTH_EPS: f64 = 1e-12;
