// ABOUTME: Color parsing and perceptual distance for value-based color matching
// ABOUTME: Hex and rgb()/rgba() parsing, sRGB to CIE-Lab (D65) and CIE76 delta E

use once_cell::sync::Lazy;
use regex::Regex;

/// sRGB color with channels in 0-255 and alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// CIE-Lab color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_lab(self) -> Lab {
        to_lab(self)
    }
}

impl Lab {
    pub fn delta_e(&self, other: &Lab) -> f64 {
        delta_e(self, other)
    }
}

// D65 reference white
const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

const EPSILON: f64 = 0.008856;
const KAPPA: f64 = 903.3;

static RGB_FUNCTIONAL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"^\s*rgba?\(\s*([\d.]+)\s*,\s*([\d.]+)\s*,\s*([\d.]+)\s*(?:,\s*([\d.]+)\s*)?\)\s*$",
    )
    .ok()
});

/// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`; the leading `#` is optional.
pub fn parse_hex(text: &str) -> Option<Rgba> {
    let digits = text.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| -> Option<f64> {
        u8::from_str_radix(&digits[range], 16).ok().map(f64::from)
    };

    match digits.len() {
        3 => {
            let nibble = |i: usize| -> Option<f64> {
                let n = u8::from_str_radix(&digits[i..i + 1], 16).ok()?;
                Some(f64::from(n * 17))
            };
            Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, 1.0))
        }
        6 => Some(Rgba::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0)),
        8 => Some(Rgba::new(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)? / 255.0,
        )),
        _ => None,
    }
}

/// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)`.
pub fn parse_rgb_functional(text: &str) -> Option<Rgba> {
    let pattern = RGB_FUNCTIONAL.as_ref()?;
    let captures = pattern.captures(text)?;
    let number = |i: usize| -> Option<f64> { captures.get(i)?.as_str().parse().ok() };

    let alpha = match captures.get(4) {
        Some(a) => a.as_str().parse().ok()?,
        None => 1.0,
    };

    Some(Rgba::new(number(1)?, number(2)?, number(3)?, alpha))
}

/// Hex when the text starts with `#`, functional notation otherwise
pub fn parse_color(text: &str) -> Option<Rgba> {
    let text = text.trim();
    if text.starts_with('#') {
        parse_hex(text)
    } else {
        parse_rgb_functional(text)
    }
}

fn srgb_to_linear(channel: f64) -> f64 {
    let c = channel / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

/// Convert sRGB to CIE-Lab under D65. Alpha is ignored.
pub fn to_lab(color: Rgba) -> Lab {
    let r = srgb_to_linear(color.r);
    let g = srgb_to_linear(color.g);
    let b = srgb_to_linear(color.b);

    let x = (0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / WHITE_X;
    let y = (0.2126729 * r + 0.7151522 * g + 0.0721750 * b) / WHITE_Y;
    let z = (0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / WHITE_Z;

    let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// CIE76 color difference. Below 3 is generally imperceptible.
pub fn delta_e(first: &Lab, second: &Lab) -> f64 {
    ((first.l - second.l).powi(2) + (first.a - second.a).powi(2) + (first.b - second.b).powi(2))
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_lengths() {
        assert_eq!(parse_hex("#fff"), Some(Rgba::new(255.0, 255.0, 255.0, 1.0)));
        assert_eq!(parse_hex("9333EA"), Some(Rgba::new(147.0, 51.0, 234.0, 1.0)));

        let with_alpha = parse_hex("#9333EA80").unwrap();
        assert_eq!(with_alpha.r, 147.0);
        assert!((with_alpha.a - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
        assert_eq!(parse_hex("#+f+f+f"), None);
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn test_parse_rgb_functional() {
        assert_eq!(
            parse_rgb_functional("rgba(147, 51, 234, 1)"),
            Some(Rgba::new(147.0, 51.0, 234.0, 1.0))
        );
        assert_eq!(
            parse_rgb_functional("rgb(147,51,234)"),
            Some(Rgba::new(147.0, 51.0, 234.0, 1.0))
        );
        assert_eq!(
            parse_rgb_functional("rgba( 0 , 0 , 0 , 0.5 )").map(|c| c.a),
            Some(0.5)
        );
        assert_eq!(parse_rgb_functional("rgb(1, 2)"), None);
        assert_eq!(parse_rgb_functional("rgb(1.2.3, 2, 3)"), None);
        assert_eq!(parse_rgb_functional("hsl(10, 20%, 30%)"), None);
    }

    #[test]
    fn test_parse_color_dispatch() {
        assert_eq!(parse_color("#9333EA"), parse_color("rgb(147, 51, 234)"));
        assert_eq!(parse_color("not a color"), None);
    }

    #[test]
    fn test_identical_colors_have_zero_distance() {
        for color in [
            Rgba::new(0.0, 0.0, 0.0, 1.0),
            Rgba::new(255.0, 255.0, 255.0, 1.0),
            Rgba::new(147.0, 51.0, 234.0, 1.0),
            Rgba::new(12.0, 200.0, 99.0, 0.3),
        ] {
            let lab = to_lab(color);
            assert_eq!(delta_e(&lab, &lab), 0.0);
        }
    }

    #[test]
    fn test_near_duplicate_colors_are_close() {
        let base = to_lab(Rgba::new(147.0, 51.0, 234.0, 1.0));
        let nudged = to_lab(Rgba::new(148.0, 52.0, 233.0, 1.0));
        let distance = base.delta_e(&nudged);
        assert!(distance > 0.0 && distance < 3.0, "{distance}");
    }

    #[test]
    fn test_unrelated_hues_are_far_apart() {
        let red = Rgba::new(255.0, 0.0, 0.0, 1.0).to_lab();
        let blue = Rgba::new(0.0, 0.0, 255.0, 1.0).to_lab();
        assert!(red.delta_e(&blue) > 50.0);
    }

    #[test]
    fn test_white_maps_to_lightness_100() {
        let white = to_lab(Rgba::new(255.0, 255.0, 255.0, 1.0));
        assert!((white.l - 100.0).abs() < 0.01);
        assert!(white.a.abs() < 0.01);
        assert!(white.b.abs() < 0.01);
    }
}
