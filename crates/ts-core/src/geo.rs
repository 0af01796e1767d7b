//! Geographic coordinate type and flat-earth bearing/distance math.
//!
//! All route synthesis and spawn-separation checks use the equirectangular
//! ("quick and dirty") approximation below rather than haversine.  At city
//! scale (a few km) the error is well under 0.1 %, and the same formula is
//! used by the simulation engine for its own distance checks, so spawn
//! separation and in-sim conflict detection agree.
//!
//! The approximation degrades near the poles and over long distances; there
//! is no polar correction.

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in double precision.
///
/// `f64` rather than `f32`: bearing differences between closely spaced
/// polyline points (a few metres apart) lose too much precision in single
/// precision to classify turns reliably.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `(bearing_deg, distance_m)` from `self` to `other`.
    #[inline]
    pub fn bearing_and_distance(self, other: GeoPoint) -> (f64, f64) {
        bearing_and_distance(self.lat, self.lon, other.lat, other.lon)
    }

    /// Flat-earth distance in metres.  Symmetric and non-negative.
    #[inline]
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        self.bearing_and_distance(other).1
    }

    /// Initial bearing in degrees `[0, 360)` from `self` towards `other`.
    /// Returns 0 for identical points.
    #[inline]
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        self.bearing_and_distance(other).0
    }

    /// Point `dist_m` away along `bearing_deg`, inverting the same flat-earth
    /// approximation, so `self.bearing_deg(self.moved(b, d))` returns `b`
    /// (for `d > 0`).
    pub fn moved(self, bearing_deg: f64, dist_m: f64) -> GeoPoint {
        let b = bearing_deg.to_radians();
        let d_lat = (dist_m * b.cos() / EARTH_RADIUS_M).to_degrees();
        let mean_lat = (self.lat + d_lat * 0.5).to_radians();
        let d_lon = (dist_m * b.sin() / (EARTH_RADIUS_M * mean_lat.cos())).to_degrees();
        let lon = self.lon + d_lon;
        let lon = if (-180.0..=180.0).contains(&lon) { lon } else { wrap_180(lon) };
        GeoPoint::new(self.lat + d_lat, lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Bearing (degrees, `[0, 360)`) and distance (metres) from A to B.
///
/// The longitude delta is normalised into `(-180, 180]` first so that pairs
/// straddling the antimeridian behave.  Identical points yield a bearing of
/// 0°; NaN inputs propagate.
pub fn bearing_and_distance(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> (f64, f64) {
    let d_lat = (lat_b - lat_a).to_radians();
    let d_lon = normalize_lon_delta(lon_b - lon_a).to_radians();
    let cos_mean_lat = ((lat_a + lat_b) * 0.5).to_radians().cos();

    let east = d_lon * cos_mean_lat;
    let distance = EARTH_RADIUS_M * (d_lat * d_lat + east * east).sqrt();

    if distance == 0.0 {
        return (0.0, 0.0);
    }

    let mut bearing = east.atan2(d_lat).to_degrees().rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0.
    if bearing >= 360.0 {
        bearing -= 360.0;
    }
    (bearing, distance)
}

/// Signed angle in `[-180, 180)`.
#[inline]
pub fn wrap_180(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Absolute change between two bearings, reduced into `[0, 180]`.
#[inline]
pub fn turn_angle(bearing_in: f64, bearing_out: f64) -> f64 {
    let angle = (bearing_out - bearing_in).abs() % 360.0;
    if angle > 180.0 { 360.0 - angle } else { angle }
}

#[inline]
fn normalize_lon_delta(d_lon: f64) -> f64 {
    let wrapped = wrap_180(d_lon);
    if wrapped == -180.0 { 180.0 } else { wrapped }
}
