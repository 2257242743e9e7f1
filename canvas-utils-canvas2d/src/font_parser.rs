//! CSS font shorthand parsing.
//!
//! Handles the subset of the `font` shorthand that canvas callers use, e.g.
//! `12px "Montserrat"`, `bold 14px sans-serif` or
//! `italic 700 16px/20px 'Montserrat Black', serif`.

use crate::error::{Canvas2dError, Canvas2dResult};
use cosmic_text::{Style, Weight};

/// Default font, matching the canvas `font` attribute default.
pub const DEFAULT_FONT: &str = "10px sans-serif";

/// Parsed font specification from a CSS font string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFont {
    pub style: Style,
    pub weight: Weight,
    /// Font size in pixels.
    pub size_px: f32,
    /// Font families in order of preference.
    pub families: Vec<String>,
}

impl Default for ParsedFont {
    fn default() -> Self {
        Self {
            style: Style::Normal,
            weight: Weight::NORMAL,
            size_px: 10.0,
            families: vec!["sans-serif".to_string()],
        }
    }
}

/// Parse a CSS font string into components.
///
/// Format: `[style] [variant] [weight] size[/line-height] family[, family]*`
pub fn parse_font(font_str: &str) -> Canvas2dResult<ParsedFont> {
    let font_str = font_str.trim();
    if font_str.is_empty() {
        return Err(Canvas2dError::FontParseError("empty font string".into()));
    }

    let mut result = ParsedFont::default();
    let mut rest = font_str;

    // Leading keywords, in any order, until the first token that starts with a digit
    // and is not a bare numeric weight.
    loop {
        rest = rest.trim_start();
        let (token, after) = split_token(rest);
        if token.is_empty() {
            break;
        }
        match token {
            "normal" | "small-caps" => {}
            "italic" => result.style = Style::Italic,
            "oblique" => result.style = Style::Oblique,
            "bold" => result.weight = Weight::BOLD,
            "bolder" => result.weight = Weight::EXTRA_BOLD,
            "lighter" => result.weight = Weight::LIGHT,
            _ => match numeric_weight(token) {
                Some(weight) => result.weight = weight,
                None => break,
            },
        }
        rest = after;
    }

    let (size_token, after) = split_token(rest);
    let size_token = size_token.split('/').next().unwrap_or_default();
    result.size_px = parse_font_size(size_token)?;

    let families = parse_font_families(after);
    if !families.is_empty() {
        result.families = families;
    }

    Ok(result)
}

/// Split off the first whitespace-delimited token.
fn split_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], &s[idx..]),
        None => (s, ""),
    }
}

/// A bare multiple of 100 between 100 and 900.
fn numeric_weight(token: &str) -> Option<Weight> {
    let weight: u16 = token.parse().ok()?;
    ((100..=900).contains(&weight) && weight % 100 == 0).then_some(Weight(weight))
}

fn parse_font_size(token: &str) -> Canvas2dResult<f32> {
    let num_end = token
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(token.len());
    let (number, unit) = token.split_at(num_end);

    let size: f32 = number
        .parse()
        .map_err(|_| Canvas2dError::FontParseError(format!("Expected font size, got: {token}")))?;

    let multiplier = match unit {
        "" | "px" => 1.0,
        "pt" => 4.0 / 3.0,
        "em" | "rem" => 16.0,
        "%" => 0.16,
        other => {
            return Err(Canvas2dError::FontParseError(format!(
                "Unsupported font size unit: {other}"
            )))
        }
    };

    let size_px = size * multiplier;
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(Canvas2dError::FontParseError(format!(
            "Font size must be positive, got: {token}"
        )));
    }
    Ok(size_px)
}

/// Parse a comma separated family list, stripping quotes.
fn parse_font_families(s: &str) -> Vec<String> {
    s.split(',')
        .map(|family| {
            family
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim()
                .to_string()
        })
        .filter(|family| !family.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_family() {
        let font = parse_font("12px \"Montserrat\"").unwrap();
        assert_eq!(font.size_px, 12.0);
        assert_eq!(font.families, vec!["Montserrat"]);
        assert_eq!(font.weight, Weight::NORMAL);
        assert_eq!(font.style, Style::Normal);
    }

    #[test]
    fn test_bold_italic() {
        let font = parse_font("italic bold 20px 'Montserrat Black'").unwrap();
        assert_eq!(font.size_px, 20.0);
        assert_eq!(font.weight, Weight::BOLD);
        assert_eq!(font.style, Style::Italic);
        assert_eq!(font.families, vec!["Montserrat Black"]);
    }

    #[test]
    fn test_numeric_weight_and_points() {
        let font = parse_font("600 12pt Helvetica").unwrap();
        assert_eq!(font.weight, Weight(600));
        assert!((font.size_px - 16.0).abs() < 0.01);
    }

    #[test]
    fn test_multiple_families_and_line_height() {
        let font = parse_font("16px/20px Arial, Helvetica, sans-serif").unwrap();
        assert_eq!(font.size_px, 16.0);
        assert_eq!(font.families, vec!["Arial", "Helvetica", "sans-serif"]);
    }

    #[test]
    fn test_missing_family_keeps_default() {
        let font = parse_font("14px").unwrap();
        assert_eq!(font.families, vec!["sans-serif"]);
    }

    #[test]
    fn test_invalid_fonts() {
        assert!(parse_font("").is_err());
        assert!(parse_font("bold Arial").is_err());
        assert!(parse_font("12furlongs Arial").is_err());
    }

    #[test]
    fn test_zero_size_rejected() {
        for font in ["0px \"Montserrat\"", "0.0px Arial", "0pt serif", "0 Arial"] {
            assert!(
                matches!(parse_font(font), Err(Canvas2dError::FontParseError(_))),
                "{font}"
            );
        }
    }
}
