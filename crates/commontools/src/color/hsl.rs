//! HSL ↔ RGB conversion.
//!
//! HSL components are fractions in `0.0..=1.0` (hue is a fraction of a full
//! turn). RGB channels are scaled by 255 and rounded to nearest, ties to even,
//! so `hsl_to_rgb(rgb_to_hsl(c))` reproduces every 8-bit color exactly.

use super::{Hsl, Rgb};

/// Convert HSL to RGB, rejecting components outside `0.0..=1.0` (or NaN).
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> crate::error::Result<Rgb> {
    if !Hsl::new(h, s, l).is_in_range() {
        return Err(crate::CommonToolsError::InvalidColorComponentRange { h, s, l });
    }
    Ok(convert(h, s, l))
}

/// Convert HSL to RGB without range validation.
///
/// Hue wraps around (`1.25` is the same as `0.25`) and a non-finite hue is
/// treated as 0; saturation and luminance are clamped into `0.0..=1.0`.
pub fn hsl_to_rgb_unchecked(h: f64, s: f64, l: f64) -> Rgb {
    let h = if h.is_finite() { h.rem_euclid(1.0) } else { 0.0 };
    convert(h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0))
}

fn convert(h: f64, s: f64, l: f64) -> Rgb {
    let v = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    if v <= 0.0 {
        return gray(l);
    }

    let m = l + l - v;
    let sv = (v - m) / v;
    let h = h * 6.0;
    let sector = h.floor();
    debug_assert!((0.0..=6.0).contains(&sector), "hue sector {sector} out of range");
    let fract = h - sector;
    let vsf = v * sv * fract;
    let mid1 = m + vsf;
    let mid2 = v - vsf;

    // h == 1.0 lands in sector 6, a full turn back to sector 0
    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, mid1, m),
        1 => (mid2, v, m),
        2 => (m, v, mid1),
        3 => (m, mid2, v),
        4 => (mid1, m, v),
        _ => (v, m, mid2),
    };

    Rgb {
        r: to_channel(r),
        g: to_channel(g),
        b: to_channel(b),
    }
}

fn gray(l: f64) -> Rgb {
    let c = to_channel(l);
    Rgb { r: c, g: c, b: c }
}

/// Scale a `0.0..=1.0` fraction to a `u8` channel. The cast saturates.
fn to_channel(x: f64) -> u8 {
    (x * 255.0).round_ties_even() as u8
}

/// Convert RGB to HSL. Every component of the result lies in `0.0..=1.0`.
///
/// When several channels share the maximum, red takes precedence over
/// green, and green over blue.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if l <= 0.0 {
        return Hsl::new(0.0, 0.0, l);
    }

    let delta = max - min;
    if delta <= 0.0 {
        return Hsl::new(0.0, 0.0, l);
    }

    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;

    let h = if r == max {
        if g == min { 5.0 + bc } else { 1.0 - gc }
    } else if g == max {
        if b == min { 1.0 + rc } else { 3.0 - bc }
    } else if r == min {
        3.0 + gc
    } else {
        5.0 - rc
    };

    Hsl::new(h / 6.0, s, l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommonToolsError;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected} ± {tol}, got {actual}"
        );
    }

    // ── hsl_to_rgb ──

    #[test]
    fn pure_red() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5).unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn primaries_and_secondaries() {
        let cases = [
            (1.0 / 6.0, Rgb::new(255, 255, 0)),
            (2.0 / 6.0, Rgb::new(0, 255, 0)),
            (3.0 / 6.0, Rgb::new(0, 255, 255)),
            (4.0 / 6.0, Rgb::new(0, 0, 255)),
            (5.0 / 6.0, Rgb::new(255, 0, 255)),
        ];
        for (h, expected) in cases {
            assert_eq!(hsl_to_rgb(h, 1.0, 0.5).unwrap(), expected, "h={h}");
        }
    }

    #[test]
    fn hue_one_is_a_full_turn() {
        assert_eq!(
            hsl_to_rgb(1.0, 1.0, 0.5).unwrap(),
            hsl_to_rgb(0.0, 1.0, 0.5).unwrap()
        );
    }

    #[test]
    fn achromatic_when_saturation_zero() {
        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.5).unwrap(), Rgb::new(128, 128, 128));
        assert_eq!(hsl_to_rgb(0.9, 0.0, 1.0).unwrap(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn black_when_luminance_zero() {
        assert_eq!(hsl_to_rgb(0.5, 1.0, 0.0).unwrap(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn white_when_luminance_one() {
        assert_eq!(hsl_to_rgb(0.5, 1.0, 1.0).unwrap(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn rounds_instead_of_truncating() {
        // 0.5 * 255 = 127.5 → ties to even → 128
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5).unwrap().r, 128);
        // 0.999 * 255 = 254.745 → 255, truncation would give 254
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.999).unwrap().r, 255);
    }

    #[test]
    fn saturation_out_of_range() {
        let err = hsl_to_rgb(0.0, 2.0, 0.5).unwrap_err();
        assert!(matches!(
            err,
            CommonToolsError::InvalidColorComponentRange { s, .. } if s == 2.0
        ));
    }

    #[test]
    fn negative_and_nan_components_rejected() {
        assert!(hsl_to_rgb(-0.1, 0.5, 0.5).is_err());
        assert!(hsl_to_rgb(0.5, 0.5, 1.5).is_err());
        assert!(hsl_to_rgb(f64::NAN, 0.5, 0.5).is_err());
    }

    // ── hsl_to_rgb_unchecked ──

    #[test]
    fn unchecked_matches_checked_in_range() {
        for &(h, s, l) in &[(0.0, 1.0, 0.5), (0.751, 0.654, 0.502), (0.3, 0.2, 0.8)] {
            assert_eq!(hsl_to_rgb_unchecked(h, s, l), hsl_to_rgb(h, s, l).unwrap());
        }
    }

    #[test]
    fn unchecked_wraps_hue() {
        assert_eq!(
            hsl_to_rgb_unchecked(1.0 + 4.0 / 6.0, 1.0, 0.5),
            Rgb::new(0, 0, 255)
        );
        assert_eq!(
            hsl_to_rgb_unchecked(-2.0 / 6.0, 1.0, 0.5),
            Rgb::new(0, 0, 255)
        );
    }

    #[test]
    fn unchecked_clamps_saturation_and_luminance() {
        assert_eq!(hsl_to_rgb_unchecked(0.0, 2.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb_unchecked(0.0, 1.0, 7.0), Rgb::new(255, 255, 255));
        assert_eq!(hsl_to_rgb_unchecked(0.0, 1.0, -1.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn unchecked_non_finite_hue_is_red_axis() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(hsl_to_rgb_unchecked(f64::NAN, 1.0, 0.5), red);
        assert_eq!(hsl_to_rgb_unchecked(f64::INFINITY, 1.0, 0.5), red);
        assert_eq!(hsl_to_rgb_unchecked(f64::NEG_INFINITY, 1.0, 0.5), red);
    }

    // ── rgb_to_hsl ──

    #[test]
    fn purple_components() {
        let hsl = rgb_to_hsl(Rgb::new(129, 45, 211));
        assert_close(hsl.h, 0.7510, 1e-4);
        assert_close(hsl.s, 0.654, 1e-3);
        assert_close(hsl.l, 0.502, 1e-3);
    }

    #[test]
    fn black_is_all_zero() {
        assert_eq!(rgb_to_hsl(Rgb::new(0, 0, 0)), Hsl::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn grays_have_no_hue_or_saturation() {
        let hsl = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert_close(hsl.l, 128.0 / 255.0, 1e-12);
        assert_eq!(rgb_to_hsl(Rgb::new(255, 255, 255)), Hsl::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn red_wins_max_tie_with_green() {
        // Yellow: red and green both max, red branch gives 1 - gc = 1 → h = 1/6
        let hsl = rgb_to_hsl(Rgb::new(255, 255, 0));
        assert_close(hsl.h, 1.0 / 6.0, 1e-12);
    }

    #[test]
    fn red_wins_max_tie_with_blue() {
        // Magenta: red branch with g == min gives 5 + bc = 5 → h = 5/6
        let hsl = rgb_to_hsl(Rgb::new(255, 0, 255));
        assert_close(hsl.h, 5.0 / 6.0, 1e-12);
    }

    #[test]
    fn green_wins_max_tie_with_blue() {
        // Cyan: green branch with b == max gives 3 - bc = 3 → h = 1/2
        let hsl = rgb_to_hsl(Rgb::new(0, 255, 255));
        assert_close(hsl.h, 0.5, 1e-12);
    }

    #[test]
    fn pure_red_hue_wraps_to_one() {
        // Red branch with g == min gives 5 + bc = 6 → h = 1.0 (a full turn)
        let hsl = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert_close(hsl.h, 1.0, 1e-12);
        assert_eq!(hsl_to_rgb(hsl.h, hsl.s, hsl.l).unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn light_colors_use_upper_saturation_formula() {
        let hsl = rgb_to_hsl(Rgb::new(255, 200, 200));
        assert!(hsl.l > 0.5);
        assert_close(hsl.s, 1.0, 1e-12);
    }

    // ── round trip ──

    #[test]
    fn roundtrip_purple() {
        let c = Rgb::new(129, 45, 211);
        let hsl = rgb_to_hsl(c);
        assert_eq!(hsl_to_rgb(hsl.h, hsl.s, hsl.l).unwrap(), c);
    }

    #[test]
    fn roundtrip_sampled_cube() {
        for r in (0..=255u16).step_by(5) {
            for g in (0..=255u16).step_by(7) {
                for b in (0..=255u16).step_by(3) {
                    let c = Rgb::new(r as u8, g as u8, b as u8);
                    let hsl = rgb_to_hsl(c);
                    assert!(hsl.is_in_range(), "{c:?} → {hsl:?}");
                    assert_eq!(hsl_to_rgb(hsl.h, hsl.s, hsl.l).unwrap(), c);
                }
            }
        }
    }
}
