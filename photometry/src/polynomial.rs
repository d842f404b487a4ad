//! Polynomial evaluation and magnitude-error helpers.

use skytable::MaskedColumn;

/// Factor converting a relative flux error into a magnitude error,
/// `2.5 / ln(10)`.
pub const MAG_ERR_SCALE: f64 = 2.5 / std::f64::consts::LN_10;

/// Evaluate a polynomial with coefficients ordered from the highest power
/// down to the constant term.
///
/// `polyval(&[a, b, c], x)` is `a*x^2 + b*x + c`, evaluated with Horner's
/// scheme. The coefficient order matches how the fits were published, so
/// fitted constants are used verbatim.
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Evaluate a polynomial over a masked column; masked rows stay masked.
pub fn polyval_column(coeffs: &[f64], x: &MaskedColumn<f64>) -> MaskedColumn<f64> {
    x.map(|v| polyval(coeffs, v))
}

/// Magnitude error from a flux and its error: `2.5/ln(10) * σ_F/F`.
pub fn mag_err_from_flux(flux: f64, flux_err: f64) -> f64 {
    MAG_ERR_SCALE * flux_err / flux
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_polyval_highest_order_first() {
        // 2x^2 + 3x + 4 at x = 10
        assert_relative_eq!(polyval(&[2.0, 3.0, 4.0], 10.0), 234.0);
    }

    #[rstest]
    #[case(&[], 5.0, 0.0)]
    #[case(&[7.0], 5.0, 7.0)]
    #[case(&[1.0, 0.0], 3.0, 3.0)]
    fn test_polyval_degenerate(#[case] coeffs: &[f64], #[case] x: f64, #[case] expected: f64) {
        assert_relative_eq!(polyval(coeffs, x), expected);
    }

    #[test]
    fn test_polyval_matches_direct_evaluation() {
        let p = [0.0035015, -0.046799, 1.16405, -0.047344];
        let x: f64 = 4.2;
        let direct = 0.0035015 * x.powi(3) - 0.046799 * x.powi(2) + 1.16405 * x - 0.047344;
        assert_relative_eq!(polyval(&p, x), direct, max_relative = 1e-14);
    }

    #[test]
    fn test_polyval_column_keeps_mask() {
        let x = MaskedColumn::from_parts(vec![1.0, 2.0], vec![false, true]);
        let y = polyval_column(&[1.0, 1.0], &x);
        assert_relative_eq!(*y.get(0).unwrap(), 2.0);
        assert!(y.is_masked(1));
    }

    #[test]
    fn test_mag_err_from_flux() {
        // sigma_F/F = 0.01 corresponds to ~0.0109 mag
        let err = mag_err_from_flux(100.0, 1.0);
        assert_relative_eq!(err, 2.5 / 10f64.ln() * 0.01, max_relative = 1e-14);
        assert_relative_eq!(err, 0.010857362047581296, max_relative = 1e-12);
    }
}
