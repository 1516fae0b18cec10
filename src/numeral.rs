//! Numeral rendering for index fragments
//!
//! Pure conversion functions from counter values to their textual form,
//! plus [`format_level`], which runs one counter through a level's
//! [`StyleDescriptor`]. This module is the only place numeral-system math
//! occurs; nothing here knows about documents or headings.

use crate::style::{IndexStyle, StyleDescriptor};

/// Subtractive value table, largest weight first.
const ROMAN_VALUES: [(u32, &str); 13] = [
    (1000, "m"),
    (900, "cm"),
    (500, "d"),
    (400, "cd"),
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

/// Render a decimal value, left-padded with `0` to at least `padding`
/// digits. A sign counts toward the width, matching `padStart` semantics.
pub fn decimal(value: i64, padding: usize) -> String {
    format!("{:0width$}", value, width = padding)
}

/// Render a positive integer as a classical subtractive roman numeral.
///
/// Unbounded above: thousands repeat (`4000` -> `"mmmm"`). Zero and
/// negative values are outside the numeral system; callers guard.
pub fn roman(value: u32, upper: bool) -> String {
    debug_assert!(value >= 1, "roman numerals are defined for positive integers");
    let mut remaining = value;
    let mut numeral = String::new();
    for (weight, glyphs) in ROMAN_VALUES {
        while remaining >= weight {
            numeral.push_str(glyphs);
            remaining -= weight;
        }
    }
    if upper {
        numeral.to_uppercase()
    } else {
        numeral
    }
}

/// Render a zero-based value as a bijective base-26 alphabetic numeral:
/// 0 -> "a", 25 -> "z", 26 -> "aa", 27 -> "ab", 51 -> "az", 52 -> "ba".
///
/// Bijective means there is no zero digit; each position runs a..z.
pub fn letter(value: u32, upper: bool) -> String {
    let base = if upper { b'A' } else { b'a' };
    let mut digits = Vec::new();
    let mut remaining = value;
    loop {
        digits.push(char::from(base + (remaining % 26) as u8));
        if remaining < 26 {
            break;
        }
        remaining = remaining / 26 - 1;
    }
    digits.iter().rev().collect()
}

/// Render one level's fragment from its zero-based sibling counter.
///
/// Styled fragments are wrapped as `prefix + rendered + suffix`; a level
/// with no style renders as its literal prefix alone. Synthetic contexts
/// reach this function with counter -1: one-based decimal shows them as
/// `0`, while roman and alphabetic styles sit above that value and render
/// an empty fragment rather than panic.
pub fn format_level(counter: i32, descriptor: &StyleDescriptor) -> String {
    let rendered = match descriptor.style {
        IndexStyle::None => return descriptor.prefix.clone(),
        IndexStyle::Numeric0 => decimal(i64::from(counter), descriptor.padding),
        IndexStyle::Numeric1 => decimal(i64::from(counter) + 1, descriptor.padding),
        IndexStyle::RomanLower | IndexStyle::RomanUpper => {
            let upper = descriptor.style == IndexStyle::RomanUpper;
            match u32::try_from(counter + 1) {
                Ok(value) if value >= 1 => roman(value, upper),
                _ => String::new(),
            }
        }
        IndexStyle::AlphaLower | IndexStyle::AlphaUpper => {
            let upper = descriptor.style == IndexStyle::AlphaUpper;
            match u32::try_from(counter) {
                Ok(value) => letter(value, upper),
                Err(_) => String::new(),
            }
        }
    };
    format!("{}{}{}", descriptor.prefix, rendered, descriptor.suffix)
}
