//! Per-level index style data model
//!
//! A style specification configures one token per nesting level, outermost
//! first. Each token decodes into a [`StyleDescriptor`]: optional literal
//! text around the rendered counter, the numbering system for the level,
//! and an optional zero-padding width for numeric rendering.

pub mod parser;

pub use parser::parse_index_styles;

use serde::{Deserialize, Serialize};

/// Numbering system applied to one nesting level.
///
/// The style set is closed: the original symbols (`0 1 i I a A`) map onto a
/// tagged enum and dispatch happens in [`crate::numeral::format_level`], so
/// no runtime style registry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexStyle {
    /// No counter; the level renders as its literal prefix only.
    #[default]
    None,
    /// Zero-based decimal: 0, 1, 2, ...
    Numeric0,
    /// One-based decimal: 1, 2, 3, ...
    Numeric1,
    /// Lower-case roman numerals: i, ii, iii, ...
    RomanLower,
    /// Upper-case roman numerals: I, II, III, ...
    RomanUpper,
    /// Lower-case bijective alphabetic: a, b, ..., z, aa, ab, ...
    AlphaLower,
    /// Upper-case bijective alphabetic: A, B, ..., Z, AA, AB, ...
    AlphaUpper,
}

/// How one nesting level renders its counter.
///
/// Descriptors are stored ordered by level starting at 1, contiguous, no
/// gaps; level L is looked up at index L - 1.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Literal text before the rendered counter. When `style` is
    /// [`IndexStyle::None`] the whole fragment is this prefix.
    pub prefix: String,
    /// Literal text after the rendered counter. Ignored for
    /// [`IndexStyle::None`].
    pub suffix: String,
    /// Numbering system for the level.
    pub style: IndexStyle,
    /// Raw numeral formatting hint from the token (e.g. `02`), kept
    /// verbatim. Consumed by the numeric styles.
    pub format: Option<String>,
    /// Minimum digit width for numeric rendering, derived from `format`.
    pub padding: usize,
}
