//! Index engine: nested counters over a linear heading stream
//!
//! Headings arrive in document order (markup heading tags do not nest), so
//! nesting is reconstructed with a stack of open counting contexts, one per
//! depth. The stack acts as a memory of "open" levels: moving deeper pushes
//! fresh contexts one level at a time, moving shallower pops back to the
//! target depth, and staying level touches nothing. The counter of the
//! resulting top context is then incremented for the current heading.
//!
//! Two consequences of pushing one level at a time are load-bearing and
//! kept deliberately:
//!
//! - a jump over levels (h1 directly to h3) creates *synthetic* contexts
//!   for the skipped depths, which render with a pre-first counter value
//!   (a one-based decimal level shows `0`);
//! - popped contexts are discarded, so returning to a depth after visiting
//!   a shallower heading starts counting from the beginning again.
//!
//! The stack keeps an explicit sentinel root `{level: 0, index: -1}` that
//! is never popped, so every operation has a current context.

use markup5ever_rcdom::Handle;

use crate::dom;
use crate::error::{ConfigurationError, IndexingError};
use crate::numeral;
use crate::style::StyleDescriptor;

/// Options for one document pass, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Per-level style descriptors, level 1 first.
    pub styles: Vec<StyleDescriptor>,
    /// Joins per-level fragments inside one composed index.
    pub connector: String,
    /// Wraps the whole composed index.
    pub global_prefix: String,
    /// Wraps the whole composed index.
    pub global_suffix: String,
    /// Insert the composed index as raw markup merged with the heading's
    /// inner markup instead of as escaped text.
    pub allow_markup_injection: bool,
    /// Heading depth that maps to normalized level 1; shallower headings
    /// clamp to level 1. Always >= 1.
    pub start_level: u32,
}

/// One open counting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeadingContext {
    /// Depth in the normalized numbering space; 0 for the sentinel.
    level: u32,
    /// Zero-based sibling counter, -1 until the first sibling arrives.
    index: i32,
}

/// Stack of open counting contexts, sentinel always at the bottom.
struct ContextStack {
    contexts: Vec<HeadingContext>,
}

impl ContextStack {
    fn new() -> Self {
        ContextStack {
            contexts: vec![HeadingContext {
                level: 0,
                index: -1,
            }],
        }
    }

    fn top_level(&self) -> u32 {
        self.contexts[self.contexts.len() - 1].level
    }

    /// Push or pop until the top context sits at `level`.
    ///
    /// Pushes happen one level at a time, creating synthetic contexts for
    /// skipped depths. Pops discard the popped counters; the sentinel is
    /// never removed because `level` is always >= 1.
    fn align_to(&mut self, level: u32) {
        while self.top_level() < level {
            self.contexts.push(HeadingContext {
                level: self.top_level() + 1,
                index: -1,
            });
        }
        while self.top_level() > level && self.contexts.len() > 1 {
            self.contexts.pop();
        }
    }

    /// Count the current heading as a sibling at the top depth.
    fn bump(&mut self) {
        let top = self.contexts.len() - 1;
        self.contexts[top].index += 1;
    }

    /// Open contexts above the sentinel, shallowest first.
    fn open_levels(&self) -> &[HeadingContext] {
        &self.contexts[1..]
    }
}

/// Map a raw tag depth into the normalized numbering space.
///
/// Depths above `start_level` shift down by a constant offset; everything
/// at or above it collapses to level 1.
fn normalize_level(raw: u32, start_level: u32) -> u32 {
    if raw > start_level {
        raw - (start_level - 1)
    } else {
        1
    }
}

/// Compose the full hierarchical index for the current stack state.
fn compose_index(
    options: &RenderOptions,
    stack: &ContextStack,
) -> Result<String, ConfigurationError> {
    let mut fragments = Vec::with_capacity(stack.open_levels().len());
    for context in stack.open_levels() {
        let descriptor = options
            .styles
            .get((context.level - 1) as usize)
            .ok_or(ConfigurationError::MissingLevelStyle {
                level: context.level,
            })?;
        fragments.push(numeral::format_level(context.index, descriptor));
    }
    Ok(format!(
        "{}{}{}",
        options.global_prefix,
        fragments.join(&options.connector),
        options.global_suffix
    ))
}

/// Prepend the composed index to one heading.
fn write_index(
    options: &RenderOptions,
    heading: &Handle,
    index: &str,
) -> Result<(), IndexingError> {
    if options.allow_markup_injection {
        let merged = format!("{}{}", index, dom::inner_markup(heading)?);
        tracing::debug!(heading = %merged, "heading after index insertion (markup mode)");
        dom::set_inner_markup(heading, &merged)
    } else {
        let merged = format!("{}{}", index, dom::inner_text(heading));
        tracing::debug!(heading = %merged, "heading after index insertion (text mode)");
        dom::set_text(heading, &merged);
        Ok(())
    }
}

/// Re-index every heading in a rendered markup fragment.
///
/// Single pass over the headings in document order; on success returns the
/// serialized fragment with every heading prefixed by its composed index.
/// Fails with [`ConfigurationError`] wrapped in [`IndexingError`] when the
/// document nests deeper than the configured style levels.
pub fn index_fragment(options: &RenderOptions, markup: &str) -> Result<String, IndexingError> {
    let tree = dom::parse(markup);
    let body = dom::body(&tree)?;

    // The first heading depth is 1; a start level below that cannot mean
    // anything, so it is floored here as well as at options construction.
    let start_level = options.start_level.max(1);

    let mut stack = ContextStack::new();
    for (heading, raw_level) in dom::headings(&body) {
        let level = normalize_level(raw_level, start_level);
        stack.align_to(level);
        stack.bump();

        let index = compose_index(options, &stack)?;
        write_index(options, &heading, &index)?;
    }

    dom::serialize_children(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::parse_index_styles;

    fn options(spec: &str) -> RenderOptions {
        RenderOptions {
            styles: parse_index_styles(spec).unwrap(),
            connector: ".".to_string(),
            global_prefix: String::new(),
            global_suffix: " ".to_string(),
            allow_markup_injection: false,
            start_level: 1,
        }
    }

    #[rstest::rstest]
    #[case(1, 1, 1)]
    #[case(2, 1, 2)]
    #[case(6, 1, 6)]
    #[case(1, 2, 1)]
    #[case(2, 2, 1)]
    #[case(3, 2, 2)]
    #[case(6, 3, 4)]
    fn normalization_offsets_and_clamps(
        #[case] raw: u32,
        #[case] start_level: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(normalize_level(raw, start_level), expected);
    }

    #[test]
    fn stack_pushes_one_level_at_a_time() {
        let mut stack = ContextStack::new();
        stack.align_to(3);
        let levels: Vec<u32> = stack.open_levels().iter().map(|c| c.level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        // Skipped depths are synthetic: no sibling counted yet.
        assert!(stack.open_levels().iter().all(|c| c.index == -1));
    }

    #[test]
    fn stack_pop_discards_counters() {
        let mut stack = ContextStack::new();
        stack.align_to(1);
        stack.bump();
        stack.align_to(2);
        stack.bump();
        stack.bump();
        stack.align_to(1);
        assert_eq!(stack.open_levels().len(), 1);
        // Re-opening level 2 starts a fresh context.
        stack.align_to(2);
        stack.bump();
        assert_eq!(stack.open_levels()[1].index, 0);
    }

    #[test]
    fn sentinel_is_never_popped() {
        let mut stack = ContextStack::new();
        stack.align_to(4);
        stack.align_to(1);
        assert_eq!(stack.top_level(), 1);
        assert_eq!(stack.contexts[0].level, 0);
    }

    #[test]
    fn sibling_counters_increase_monotonically() {
        let opts = options("{1} {1}");
        let output = index_fragment(&opts, "<h1>A</h1><h1>B</h1><h1>C</h1>").unwrap();
        assert_eq!(output, "<h1>1 A</h1><h1>2 B</h1><h1>3 C</h1>");
    }

    #[test]
    fn deeper_levels_restart_and_resume() {
        let opts = options("{1} {1}");
        let output = index_fragment(
            &opts,
            "<h1>A</h1><h2>A1</h2><h2>A2</h2><h1>B</h1><h2>B1</h2>",
        )
        .unwrap();
        assert_eq!(
            output,
            "<h1>1 A</h1><h2>1.1 A1</h2><h2>1.2 A2</h2><h1>2 B</h1><h2>2.1 B1</h2>"
        );
    }

    #[test]
    fn level_skip_creates_synthetic_contexts() {
        let opts = options("{1} {1} {1}");
        let output = index_fragment(&opts, "<h1>A</h1><h3>B</h3><h3>C</h3><h2>D</h2>").unwrap();
        // The h1 -> h3 jump leaves a synthetic level-2 context that renders
        // its pre-first value, and the later h2 bumps that same context.
        assert_eq!(
            output,
            "<h1>1 A</h1><h3>1.0.1 B</h3><h3>1.0.2 C</h3><h2>1.1 D</h2>"
        );
    }

    #[test]
    fn nesting_beyond_configured_levels_fails() {
        let opts = options("{1} {1}");
        let err = index_fragment(&opts, "<h1>A</h1><h2>B</h2><h3>C</h3>").unwrap_err();
        assert_eq!(
            err,
            IndexingError::Configuration(ConfigurationError::MissingLevelStyle { level: 3 })
        );
    }

    #[test]
    fn start_level_collapses_shallow_headings() {
        let mut opts = options("{1} {1}");
        opts.start_level = 2;
        let output = index_fragment(&opts, "<h1>A</h1><h2>B</h2><h3>C</h3>").unwrap();
        // h1 and h2 share normalized level 1; h3 becomes level 2.
        assert_eq!(output, "<h1>1 A</h1><h2>2 B</h2><h3>2.1 C</h3>");
    }

    #[test]
    fn markup_injection_preserves_inner_elements() {
        let mut opts = options("{1}");
        opts.allow_markup_injection = true;
        opts.global_prefix = "<span class=\"index\">".to_string();
        opts.global_suffix = "</span> ".to_string();
        let output = index_fragment(&opts, "<h1><em>Title</em></h1>").unwrap();
        assert_eq!(
            output,
            "<h1><span class=\"index\">1</span> <em>Title</em></h1>"
        );
    }

    #[test]
    fn text_mode_flattens_inner_elements() {
        let opts = options("{1}");
        let output = index_fragment(&opts, "<h1><em>Title</em></h1>").unwrap();
        assert_eq!(output, "<h1>1 Title</h1>");
    }

    #[test]
    fn non_heading_content_is_untouched() {
        let opts = options("{1}");
        let output = index_fragment(
            &opts,
            "<p>Intro</p><h1>A</h1><ul><li>item</li></ul>",
        )
        .unwrap();
        assert_eq!(output, "<p>Intro</p><h1>1 A</h1><ul><li>item</li></ul>");
    }
}
