//! Contrast color computation for hotspot markers.
//!
//! Authors pick arbitrary accent colors for markers; the marker foreground
//! must stay legible against them. [`contrast_color_bw`] is essentially what
//! CSS `color-contrast()` would do, limited to black/white candidates: it
//! computes the WCAG contrast ratio of the input against pure white and pure
//! black and returns the winner, re-encoded in the same color family as the
//! input. Pure and side-effect free; it runs on every marker render and on
//! theme changes.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Raised when an input string matches none of the recognized grammars.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("unknown color format: {0}")]
    UnknownFormat(String),
}

/// The three recognized CSS color families. Alpha-bearing variants are
/// tracked so the output can keep the family's alpha convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFamily {
    Hex { alpha: bool },
    Rgb { alpha: bool },
    Hsl { alpha: bool },
}

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .unwrap_or_else(|e| panic!("hex color pattern: {e}"))
});

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3}\s*,\s*){2}\d{1,3}(\s*,\s*(0|1|0?\.\d+))?\s*\)$")
        .unwrap_or_else(|e| panic!("rgb color pattern: {e}"))
});

static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^hsla?\(\s*\d{1,3}\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%(\s*,\s*(0|1|0?\.\d+))?\s*\)$")
        .unwrap_or_else(|e| panic!("hsl color pattern: {e}"))
});

/// Determine the color family of `input`, or fail with `UnknownFormat`.
///
/// Detection is a literal pattern match against each family's grammar, not
/// a general color parse: anything outside the three grammars is rejected
/// even if some color library could make sense of it.
pub fn determine_family(input: &str) -> Result<ColorFamily, ColorError> {
    let trimmed = input.trim();

    if HEX_RE.is_match(trimmed) {
        let digits = trimmed.len() - 1;
        return Ok(ColorFamily::Hex { alpha: digits == 4 || digits == 8 });
    }
    if RGB_RE.is_match(trimmed) {
        return Ok(ColorFamily::Rgb { alpha: component_count(trimmed) == 4 });
    }
    if HSL_RE.is_match(trimmed) {
        return Ok(ColorFamily::Hsl { alpha: component_count(trimmed) == 4 });
    }

    Err(ColorError::UnknownFormat(input.to_string()))
}

/// Return black or white, whichever contrasts more with `input`, encoded in
/// `input`'s own family. Equal ratios resolve to white.
pub fn contrast_color_bw(input: &str) -> Result<String, ColorError> {
    let family = determine_family(input)?;
    let [r, g, b] = parse_rgb8(input.trim(), family);
    let choice = pick_bw(relative_luminance(r, g, b));
    Ok(encode(choice, family))
}

// ─── Luminance & choice ──────────────────────────────────────────────────────

/// The two candidate foregrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bw {
    Black,
    White,
}

/// WCAG relative luminance of an sRGB color given as 8-bit channels.
fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Pick the candidate with the higher contrast ratio against the given
/// luminance. Ties go to white.
fn pick_bw(luminance: f64) -> Bw {
    let against_white = 1.05 / (luminance + 0.05);
    let against_black = (luminance + 0.05) / 0.05;

    if against_white >= against_black {
        Bw::White
    } else {
        Bw::Black
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Number of comma-separated components inside a functional notation.
fn component_count(input: &str) -> usize {
    input
        .find('(')
        .map(|open| input[open + 1..].trim_end_matches(')').split(',').count())
        .unwrap_or(0)
}

/// Extract 8-bit RGB channels from a string already validated against
/// `family`'s grammar. Alpha is ignored; only the opaque channels matter
/// for luminance.
fn parse_rgb8(input: &str, family: ColorFamily) -> [u8; 3] {
    match family {
        ColorFamily::Hex { .. } => parse_hex(&input[1..]),
        ColorFamily::Rgb { .. } => {
            let nums = functional_components(input);
            [
                nums.first().copied().unwrap_or(0.0).clamp(0.0, 255.0) as u8,
                nums.get(1).copied().unwrap_or(0.0).clamp(0.0, 255.0) as u8,
                nums.get(2).copied().unwrap_or(0.0).clamp(0.0, 255.0) as u8,
            ]
        }
        ColorFamily::Hsl { .. } => {
            let nums = functional_components(input);
            let h = nums.first().copied().unwrap_or(0.0) % 360.0;
            let s = (nums.get(1).copied().unwrap_or(0.0) / 100.0).clamp(0.0, 1.0);
            let l = (nums.get(2).copied().unwrap_or(0.0) / 100.0).clamp(0.0, 1.0);
            hsl_to_rgb8(h, s, l)
        }
    }
}

fn parse_hex(hex: &str) -> [u8; 3] {
    let channel = |lo: usize, hi: usize| u8::from_str_radix(&hex[lo..hi], 16).unwrap_or(0);
    let nibble = |at: usize| channel(at, at + 1) * 17;

    match hex.len() {
        3 | 4 => [nibble(0), nibble(1), nibble(2)],
        _ => [channel(0, 2), channel(2, 4), channel(4, 6)],
    }
}

/// Numeric components of a functional notation, `%` signs stripped.
fn functional_components(input: &str) -> Vec<f64> {
    input
        .find('(')
        .map(|open| &input[open + 1..])
        .unwrap_or("")
        .trim_end_matches(')')
        .split(',')
        .filter_map(|part| part.trim().trim_end_matches('%').parse::<f64>().ok())
        .collect()
}

fn hsl_to_rgb8(h: f64, s: f64, l: f64) -> [u8; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [
        ((r + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((g + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((b + m) * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

// ─── Encoding ────────────────────────────────────────────────────────────────

/// Encode the chosen black/white in the input's family. Alpha-bearing
/// families get an explicit opaque alpha; the original alpha value is not
/// carried over.
fn encode(choice: Bw, family: ColorFamily) -> String {
    match (family, choice) {
        (ColorFamily::Hex { alpha: false }, Bw::White) => "#ffffff".to_string(),
        (ColorFamily::Hex { alpha: false }, Bw::Black) => "#000000".to_string(),
        (ColorFamily::Hex { alpha: true }, Bw::White) => "#ffffffff".to_string(),
        (ColorFamily::Hex { alpha: true }, Bw::Black) => "#000000ff".to_string(),
        (ColorFamily::Rgb { alpha: false }, Bw::White) => "rgb(255, 255, 255)".to_string(),
        (ColorFamily::Rgb { alpha: false }, Bw::Black) => "rgb(0, 0, 0)".to_string(),
        (ColorFamily::Rgb { alpha: true }, Bw::White) => "rgba(255, 255, 255, 1)".to_string(),
        (ColorFamily::Rgb { alpha: true }, Bw::Black) => "rgba(0, 0, 0, 1)".to_string(),
        (ColorFamily::Hsl { alpha: false }, Bw::White) => "hsl(0, 0%, 100%)".to_string(),
        (ColorFamily::Hsl { alpha: false }, Bw::Black) => "hsl(0, 0%, 0%)".to_string(),
        (ColorFamily::Hsl { alpha: true }, Bw::White) => "hsla(0, 0%, 100%, 1)".to_string(),
        (ColorFamily::Hsl { alpha: true }, Bw::Black) => "hsla(0, 0%, 0%, 1)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_yields_white_in_hex() {
        assert_eq!(contrast_color_bw("#000000").unwrap(), "#ffffff");
        assert_eq!(contrast_color_bw("#000").unwrap(), "#ffffff");
    }

    #[test]
    fn white_yields_black_in_hex() {
        assert_eq!(contrast_color_bw("#ffffff").unwrap(), "#000000");
        assert_eq!(contrast_color_bw("#FFF").unwrap(), "#000000");
    }

    #[test]
    fn mid_gray_prefers_black() {
        // Relative luminance of #808080 is ~0.216, above the ~0.179
        // break-even point, so black wins.
        assert_eq!(contrast_color_bw("#808080").unwrap(), "#000000");
    }

    #[test]
    fn family_is_preserved() {
        assert_eq!(contrast_color_bw("rgb(0, 0, 0)").unwrap(), "rgb(255, 255, 255)");
        assert_eq!(contrast_color_bw("rgba(0, 0, 0, 0.5)").unwrap(), "rgba(255, 255, 255, 1)");
        assert_eq!(contrast_color_bw("hsl(240, 100%, 20%)").unwrap(), "hsl(0, 0%, 100%)");
        assert_eq!(contrast_color_bw("hsla(60, 100%, 90%, 0.3)").unwrap(), "hsla(0, 0%, 0%, 1)");
        assert_eq!(contrast_color_bw("#1a2bff").unwrap(), "#ffffff");
        assert_eq!(contrast_color_bw("#1a2bff80").unwrap(), "#ffffffff");
    }

    #[test]
    fn unknown_formats_are_rejected() {
        for bad in ["not-a-color", "cmyk(0,0,0,0)", "#12345", "rgb(1,2)", "", "red"] {
            assert_eq!(
                determine_family(bad),
                Err(ColorError::UnknownFormat(bad.to_string())),
                "{bad:?} should not match any family"
            );
        }
    }

    #[test]
    fn family_detection() {
        assert_eq!(determine_family("#abc").unwrap(), ColorFamily::Hex { alpha: false });
        assert_eq!(determine_family("#abcd").unwrap(), ColorFamily::Hex { alpha: true });
        assert_eq!(determine_family("rgb(1, 2, 3)").unwrap(), ColorFamily::Rgb { alpha: false });
        assert_eq!(
            determine_family("rgba(1, 2, 3, 0.4)").unwrap(),
            ColorFamily::Rgb { alpha: true }
        );
        assert_eq!(
            determine_family("hsl(120, 50%, 50%)").unwrap(),
            ColorFamily::Hsl { alpha: false }
        );
    }

    #[test]
    fn exact_tie_resolves_to_white() {
        // The break-even luminance satisfies (L + 0.05)^2 = 1.05 * 0.05.
        // No 8-bit sRGB triple lands on it exactly, so exercise the chooser
        // directly.
        let break_even = (1.05_f64 * 0.05).sqrt() - 0.05;
        assert_eq!(pick_bw(break_even), Bw::White);
        assert_eq!(pick_bw(break_even - 1e-6), Bw::White);
        assert_eq!(pick_bw(break_even + 1e-6), Bw::Black);
    }

    #[test]
    fn output_is_always_pure_black_or_white() {
        for input in ["#123456", "#e2b007", "rgb(200, 10, 10)", "hsl(10, 80%, 40%)"] {
            let out = contrast_color_bw(input).unwrap();
            assert!(
                ["#ffffff", "#000000", "rgb(255, 255, 255)", "rgb(0, 0, 0)",
                 "hsl(0, 0%, 100%)", "hsl(0, 0%, 0%)"]
                    .contains(&out.as_str()),
                "unexpected encoding {out:?}"
            );
        }
    }
}
