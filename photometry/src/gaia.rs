//! Gaia DR2 colour transformations.
//!
//! Derives Johnson-Cousins BVRI from Gaia G, BP-RP colour and the BP/RP
//! flux excess factor, using cubic fits against the Stetson standard star
//! sample. The G magnitude is first corrected for the known DR2 photometry
//! systematics, which differ between three brightness regimes. Pan-STARRS
//! g/r and SDSS gri are derived on top.

use skytable::{Column, MaskedColumn, Table};

use crate::polynomial::{polyval, polyval_column};
use crate::PhotometryError;

// Cubic colour terms in BP-RP, fitted on Stetson standards.
const P_B: [f64; 4] = [
    -0.05927724559795761,
    0.4224326324292696,
    0.626219707920836,
    -0.011211539139725953,
];
const P_V: [f64; 4] = [
    0.0017624722901609662,
    0.15671377090187089,
    0.03123927839356175,
    0.041448557506784556,
];
const P_R: [f64; 4] = [
    0.02045449129406191,
    0.054005149296716175,
    -0.3135475489352255,
    0.020545083667168156,
];
const P_I: [f64; 4] = [
    0.005092289380850884,
    0.07027022935721515,
    -0.7025553064161775,
    -0.02747532184796779,
];

// Corrections in the excess-factor residual C*.
const P_CB: [f64; 4] = [876.4047401692277, 5.114021693079334, -2.7332873314449326, 0.0];
const P_CV: [f64; 4] = [98.03049528983964, 20.582521666713028, 0.8690079603974803, 0.0];
const P_CR: [f64; 4] = [347.42190542330945, 39.42482430363565, 0.8626828845232541, 0.0];
const P_CI: [f64; 4] = [79.4028706486939, 9.176899238787003, -0.7826315256072135, 0.0];

// Expected BP/RP excess factor as a function of BP-RP colour; C* is the
// residual of the catalogued excess factor against this baseline.
const P_EXCESS: [f64; 4] = [-0.00445024, 0.0570293, -0.02810592, 1.20477819];

// G-band systematics correction for the bright regime (2 < G < 6).
const P_G_BRIGHT: [f64; 4] = [0.0035015, -0.046799, 1.16405, -0.047344];

/// DR2 G-band systematics correction, applied per brightness regime.
///
/// Three disjoint regimes (2 < G < 6, 6 < G < 16, G > 16) get different
/// corrections; magnitudes outside them are returned unchanged.
pub fn corrected_g(g: f64) -> f64 {
    if g > 2.0 && g < 6.0 {
        polyval(&P_G_BRIGHT, g)
    } else if g > 6.0 && g < 16.0 {
        g - 0.0032 * (g - 6.0)
    } else if g > 16.0 {
        g - 0.032
    } else {
        g
    }
}

/// Derive Johnson-Cousins BVRI, Pan-STARRS g/r and SDSS gri from Gaia DR2.
///
/// Needs `Gmag`, `BPmag`, `RPmag` and the flux excess factor `E_BR_RP_`.
/// Adds `B`, `V`, `R`, `I`, `gmag`, `rmag` (Pan-STARRS system) and
/// `g_SDSS`, `r_SDSS`, `i_SDSS`.
pub fn gaia_dr2_bvri(cat: &mut Table) -> Result<(), PhotometryError> {
    let g = cat.float("Gmag")?.map(corrected_g);
    let bp_rp = cat.float("BPmag")?.sub(cat.float("RPmag")?);
    let cstar = cat
        .float("E_BR_RP_")?
        .zip_map(&bp_rp, |e, c| e - polyval(&P_EXCESS, c));

    let b_mag = g.add(&polyval_column(&P_B, &bp_rp)).add(&polyval_column(&P_CB, &cstar));
    let v_mag = g.add(&polyval_column(&P_V, &bp_rp)).add(&polyval_column(&P_CV, &cstar));
    let r_mag = g.add(&polyval_column(&P_R, &bp_rp)).add(&polyval_column(&P_CR, &cstar));
    let i_mag = g.add(&polyval_column(&P_I, &bp_rp)).add(&polyval_column(&P_CI, &cstar));

    // Pan-STARRS g and r from the derived Johnson magnitudes.
    // TODO: residual colour and magnitude trends remain uncorrected here.
    let bv = b_mag.sub(&v_mag);
    let ps_g = b_mag.zip_map(&bv, |b, c| b - 0.108 - 0.485 * c - 0.032 * c * c);
    let ps_r = v_mag.zip_map(&bv, |v, c| v + 0.082 - 0.462 * c + 0.041 * c * c);

    // SDSS gri from the ESA DR2 photometric relationships.
    let g_sdss = g.zip_map(&bp_rp, |g, c| {
        g - (0.13518 - 0.46245 * c - 0.25171 * c * c + 0.021349 * c * c * c)
    });
    let r_sdss = g.zip_map(&bp_rp, |g, c| {
        g - (-0.12879 + 0.24662 * c - 0.027464 * c * c - 0.049465 * c * c * c)
    });
    let i_sdss = g.zip_map(&bp_rp, |g, c| g - (-0.29676 + 0.64728 * c - 0.10141 * c * c));

    cat.add_column("B", Column::Float(b_mag))?;
    cat.add_column("V", Column::Float(v_mag))?;
    cat.add_column("R", Column::Float(r_mag))?;
    cat.add_column("I", Column::Float(i_mag))?;
    cat.add_column("gmag", Column::Float(ps_g))?;
    cat.add_column("rmag", Column::Float(ps_r))?;
    cat.add_column("g_SDSS", Column::Float(g_sdss))?;
    cat.add_column("r_SDSS", Column::Float(r_sdss))?;
    cat.add_column("i_SDSS", Column::Float(i_sdss))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn gaia_table(g: f64, bp: f64, rp: f64, excess: f64) -> Table {
        let mut cat = Table::new();
        for (name, v) in [
            ("Gmag", g),
            ("BPmag", bp),
            ("RPmag", rp),
            ("E_BR_RP_", excess),
        ] {
            cat.add_column(name, Column::Float(MaskedColumn::from_values(vec![v])))
                .unwrap();
        }
        cat
    }

    #[rstest]
    #[case(4.0, polyval(&P_G_BRIGHT, 4.0))] // bright cubic regime
    #[case(10.0, 10.0 - 0.0032 * 4.0)] // linear regime
    #[case(18.0, 18.0 - 0.032)] // faint offset
    #[case(1.5, 1.5)] // outside every regime, untouched
    #[case(6.0, 6.0)] // regime boundaries are open intervals
    #[case(16.0, 16.0)]
    fn test_corrected_g(#[case] g: f64, #[case] expected: f64) {
        assert_relative_eq!(corrected_g(g), expected, max_relative = 1e-14);
    }

    #[test]
    fn test_johnson_bands() {
        let (g, bp, rp, excess) = (12.0, 12.4, 11.5, 1.25);
        let mut cat = gaia_table(g, bp, rp, excess);
        gaia_dr2_bvri(&mut cat).unwrap();

        let gc = corrected_g(g);
        let c = bp - rp;
        let cstar = excess - polyval(&P_EXCESS, c);

        assert_relative_eq!(
            *cat.float("B").unwrap().get(0).unwrap(),
            gc + polyval(&P_B, c) + polyval(&P_CB, cstar),
            max_relative = 1e-13
        );
        assert_relative_eq!(
            *cat.float("I").unwrap().get(0).unwrap(),
            gc + polyval(&P_I, c) + polyval(&P_CI, cstar),
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_pan_starrs_from_johnson() {
        let mut cat = gaia_table(12.0, 12.4, 11.5, 1.25);
        gaia_dr2_bvri(&mut cat).unwrap();

        let b = *cat.float("B").unwrap().get(0).unwrap();
        let v = *cat.float("V").unwrap().get(0).unwrap();
        let bv = b - v;
        assert_relative_eq!(
            *cat.float("gmag").unwrap().get(0).unwrap(),
            b - 0.108 - 0.485 * bv - 0.032 * bv * bv,
            max_relative = 1e-13
        );
        assert_relative_eq!(
            *cat.float("rmag").unwrap().get(0).unwrap(),
            v + 0.082 - 0.462 * bv + 0.041 * bv * bv,
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_sdss_bands() {
        let (g, bp, rp, excess) = (14.0, 14.6, 13.4, 1.35);
        let mut cat = gaia_table(g, bp, rp, excess);
        gaia_dr2_bvri(&mut cat).unwrap();

        let gc = corrected_g(g);
        let c = bp - rp;
        assert_relative_eq!(
            *cat.float("g_SDSS").unwrap().get(0).unwrap(),
            gc - (0.13518 - 0.46245 * c - 0.25171 * c * c + 0.021349 * c * c * c),
            max_relative = 1e-13
        );
        assert_relative_eq!(
            *cat.float("i_SDSS").unwrap().get(0).unwrap(),
            gc - (-0.29676 + 0.64728 * c - 0.10141 * c * c),
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_missing_excess_factor_is_error() {
        let mut cat = Table::new();
        for name in ["Gmag", "BPmag", "RPmag"] {
            cat.add_column(name, Column::Float(MaskedColumn::from_values(vec![12.0])))
                .unwrap();
        }
        assert!(gaia_dr2_bvri(&mut cat).is_err());
    }

    #[test]
    fn test_masked_colour_masks_outputs() {
        let mut cat = gaia_table(12.0, 12.4, 11.5, 1.25);
        let mut bp = cat.float("BPmag").unwrap().clone();
        bp.set_masked(0);
        cat.add_column("BPmag", Column::Float(bp)).unwrap();

        gaia_dr2_bvri(&mut cat).unwrap();
        assert!(cat.float("B").unwrap().is_masked(0));
        assert!(cat.float("g_SDSS").unwrap().is_masked(0));
    }
}
