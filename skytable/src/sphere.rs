//! Great-circle geometry for source lists.
//!
//! Positions are equatorial coordinates in degrees. Separations use the
//! haversine form, which stays accurate at the arcsecond separations
//! typical of catalogue cross-matching.

use nalgebra::Vector3;

use crate::column::MaskedColumn;

/// One cross-match pair: indices into the two input lists plus the
/// separation between them in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedPair {
    /// Index into the first position list.
    pub first: usize,
    /// Index into the second position list.
    pub second: usize,
    /// Great-circle separation in degrees.
    pub separation: f64,
}

/// Unit vector for an (RA, Dec) direction in degrees.
pub fn unit_vector(ra_deg: f64, dec_deg: f64) -> Vector3<f64> {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();
    Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
}

/// Great-circle separation between two directions, in degrees.
pub fn angular_separation(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    let d_ra = (ra2 - ra1).to_radians();
    let d_dec = (dec2 - dec1).to_radians();
    let (phi1, phi2) = (dec1.to_radians(), dec2.to_radians());

    let a = (d_dec / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_ra / 2.0).sin().powi(2);
    (2.0 * a.sqrt().min(1.0).asin()).to_degrees()
}

/// Centre and radius of the field covering a set of positions.
///
/// Returns `(ra0, dec0, sr0)` where the centre is the normalized mean unit
/// vector and `sr0` is the largest separation from the centre to any input
/// position. Returns `None` for an empty input.
pub fn field_center(ra: &[f64], dec: &[f64]) -> Option<(f64, f64, f64)> {
    assert_eq!(ra.len(), dec.len(), "coordinate slices must match");
    if ra.is_empty() {
        return None;
    }

    let sum: Vector3<f64> = ra
        .iter()
        .zip(dec.iter())
        .map(|(&r, &d)| unit_vector(r, d))
        .sum();
    let center = sum.normalize();

    let dec0 = center.z.asin().to_degrees();
    let ra0 = center.y.atan2(center.x).to_degrees().rem_euclid(360.0);

    let sr0 = ra
        .iter()
        .zip(dec.iter())
        .map(|(&r, &d)| angular_separation(ra0, dec0, r, d))
        .fold(0.0_f64, f64::max);

    Some((ra0, dec0, sr0))
}

/// Nearest-neighbour cross-match between two position lists.
///
/// For every position in the second list, finds the closest position in the
/// first list within `sr_deg` degrees. Rows with a masked coordinate on
/// either side are skipped. Every matched row of the second list therefore
/// carries exactly its nearest counterpart from the first.
pub fn spherical_match(
    ra1: &MaskedColumn<f64>,
    dec1: &MaskedColumn<f64>,
    ra2: &MaskedColumn<f64>,
    dec2: &MaskedColumn<f64>,
    sr_deg: f64,
) -> Vec<MatchedPair> {
    let mut pairs = Vec::new();

    for j in 0..ra2.len() {
        let (Some(&r2), Some(&d2)) = (ra2.get(j), dec2.get(j)) else {
            continue;
        };

        let mut best: Option<(usize, f64)> = None;
        for i in 0..ra1.len() {
            let (Some(&r1), Some(&d1)) = (ra1.get(i), dec1.get(i)) else {
                continue;
            };
            let sep = angular_separation(r1, d1, r2, d2);
            if sep <= sr_deg && best.map(|(_, s)| sep < s).unwrap_or(true) {
                best = Some((i, sep));
            }
        }

        if let Some((i, sep)) = best {
            pairs.push(MatchedPair {
                first: i,
                second: j,
                separation: sep,
            });
        }
    }

    pairs
}
