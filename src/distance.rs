//! Great circle distance model
use crate::constants::EARTH_RADIUS_M;

/// Great circle distance between two geodetic points, in meters,
/// using the haversine formula on a spherical Earth.
/// Coordinates are expressed in decimal degrees.
pub fn haversine_m(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let (lat1, lat2) = (lat1_deg.to_radians(), lat2_deg.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (lon2_deg - lon1_deg).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // clamp: rounding may push a slightly above 1 for antipodal points
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_M * c
}
