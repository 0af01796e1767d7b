//! Aviation unit conversions.  Everything inside the workspace is SI; these
//! exist because configuration defaults are conventionally quoted in knots
//! and feet.

/// Metres per second in one knot.
pub const KTS: f64 = 0.514_444;

/// Metres in one foot.
pub const FT: f64 = 0.3048;

#[inline]
pub fn kts_to_mps(kts: f64) -> f64 {
    kts * KTS
}

#[inline]
pub fn ft_to_m(ft: f64) -> f64 {
    ft * FT
}
