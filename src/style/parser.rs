//! Style specification parser
//!
//! The specification is a whitespace-separated list of tokens, one per
//! nesting level, outermost level first:
//!
//!     {1} {a:02} III.{i} -
//!
//! A token either contains exactly one brace group or none at all:
//!
//!     prefix{SYMBOL}suffix
//!     prefix{SYMBOL:FORMAT}suffix
//!     literal
//!
//! `SYMBOL` selects the numbering system (`0 1 i I a A`); a token with no
//! group is a pure literal level. `FORMAT` is leading-zero digit-count
//! notation (`02` pads to two digits) and only the numeric styles consume
//! it. Parsing is purely syntactic: the parser never looks at document
//! content.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConfigurationError;
use crate::style::{IndexStyle, StyleDescriptor};

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^{}]*)\{([^{}]*)\}([^{}]*)$").unwrap());

static FORMAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(0?)([1-9][0-9]*)$").unwrap());

/// Parse a style specification into per-level descriptors.
///
/// Returns one descriptor per token, in level order. Malformed tokens fail
/// with a [`ConfigurationError`] naming the token and its 1-based position.
pub fn parse_index_styles(spec: &str) -> Result<Vec<StyleDescriptor>, ConfigurationError> {
    spec.split_whitespace()
        .enumerate()
        .map(|(index, token)| parse_token(token, index + 1))
        .collect()
}

fn parse_token(token: &str, position: usize) -> Result<StyleDescriptor, ConfigurationError> {
    if !token.contains('{') && !token.contains('}') {
        // A pure literal level: no counter, the token itself is the prefix.
        return Ok(StyleDescriptor {
            prefix: token.to_string(),
            ..StyleDescriptor::default()
        });
    }

    let captures =
        TOKEN_RE
            .captures(token)
            .ok_or_else(|| ConfigurationError::MalformedToken {
                token: token.to_string(),
                position,
            })?;

    let group = &captures[2];
    let (symbol, format) = match group.split_once(':') {
        Some((symbol, format)) => (symbol, Some(format)),
        None => (group, None),
    };

    let style = match symbol {
        "0" => IndexStyle::Numeric0,
        "1" => IndexStyle::Numeric1,
        "i" => IndexStyle::RomanLower,
        "I" => IndexStyle::RomanUpper,
        "a" => IndexStyle::AlphaLower,
        "A" => IndexStyle::AlphaUpper,
        "" => {
            return Err(ConfigurationError::MalformedToken {
                token: token.to_string(),
                position,
            })
        }
        other => {
            return Err(ConfigurationError::UnknownStyleSymbol {
                symbol: other.to_string(),
                token: token.to_string(),
                position,
            })
        }
    };

    let padding = match format {
        Some(hint) => parse_padding(hint).ok_or_else(|| ConfigurationError::MalformedToken {
            token: token.to_string(),
            position,
        })?,
        None => 0,
    };

    Ok(StyleDescriptor {
        prefix: captures[1].to_string(),
        suffix: captures[3].to_string(),
        style,
        format: format.map(str::to_string),
        padding,
    })
}

/// Decode a leading-zero digit-count hint (`02` -> 2, `10` -> 10).
fn parse_padding(hint: &str) -> Option<usize> {
    let captures = FORMAT_RE.captures(hint)?;
    captures[2].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_descriptor_per_token() {
        let styles = parse_index_styles("{1} {1} {1}").unwrap();
        assert_eq!(styles.len(), 3);
        for descriptor in &styles {
            assert_eq!(descriptor.style, IndexStyle::Numeric1);
            assert_eq!(descriptor.padding, 0);
        }
    }

    #[test]
    fn parses_all_style_symbols() {
        let styles = parse_index_styles("{0} {1} {i} {I} {a} {A}").unwrap();
        let expected = [
            IndexStyle::Numeric0,
            IndexStyle::Numeric1,
            IndexStyle::RomanLower,
            IndexStyle::RomanUpper,
            IndexStyle::AlphaLower,
            IndexStyle::AlphaUpper,
        ];
        let parsed: Vec<_> = styles.iter().map(|d| d.style).collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn captures_prefix_and_suffix_around_the_group() {
        let styles = parse_index_styles("Ch.{1}: [{a}]").unwrap();
        assert_eq!(styles[0].prefix, "Ch.");
        assert_eq!(styles[0].suffix, ":");
        assert_eq!(styles[1].prefix, "[");
        assert_eq!(styles[1].suffix, "]");
    }

    #[test]
    fn token_without_group_is_a_literal_level() {
        let styles = parse_index_styles("{1} -").unwrap();
        assert_eq!(styles[1].style, IndexStyle::None);
        assert_eq!(styles[1].prefix, "-");
        assert!(styles[1].format.is_none());
    }

    #[test]
    fn format_hint_sets_padding() {
        let styles = parse_index_styles("{1:02} {0:3}").unwrap();
        assert_eq!(styles[0].padding, 2);
        assert_eq!(styles[0].format.as_deref(), Some("02"));
        assert_eq!(styles[1].padding, 3);
    }

    #[test]
    fn empty_specification_yields_no_levels() {
        assert_eq!(parse_index_styles("").unwrap(), vec![]);
        assert_eq!(parse_index_styles("   ").unwrap(), vec![]);
    }

    #[test]
    fn unknown_symbol_is_reported_with_its_position() {
        let err = parse_index_styles("{1} {x}").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownStyleSymbol {
                symbol: "x".to_string(),
                token: "{x}".to_string(),
                position: 2,
            }
        );
    }

    #[test]
    fn unbalanced_braces_are_malformed() {
        for bad in ["{1", "1}", "{{1}}", "{1}{a}", "{}"] {
            let err = parse_index_styles(bad).unwrap_err();
            assert!(
                matches!(err, ConfigurationError::MalformedToken { position: 1, .. }),
                "expected malformed token for {:?}, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn bad_format_hints_are_malformed() {
        for bad in ["{1:}", "{1:x}", "{1:0}", "{1:2x}"] {
            let err = parse_index_styles(bad).unwrap_err();
            assert!(
                matches!(err, ConfigurationError::MalformedToken { .. }),
                "expected malformed token for {:?}, got {:?}",
                bad,
                err
            );
        }
    }
}
