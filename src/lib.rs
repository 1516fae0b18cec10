//! Hierarchical heading index injection for rendered HTML
//!
//!     This crate post-processes rendered document content to put
//!     hierarchical, auto-incrementing index labels (e.g. "1.2.3", "A.1.i")
//!     in front of heading text. It runs once per rendered document, over an
//!     already-produced markup tree; it never restructures the heading
//!     hierarchy and keeps no state across documents.
//!
//! Architecture
//!
//!     - style: per-level style specification parsing into descriptors
//!     - numeral: pure counter-to-text rendering (decimal, roman, alphabetic)
//!     - engine: nested counter stack over the heading stream, index
//!       composition, DOM rewrite
//!     - dom: the markup library boundary (html5ever + rcdom), parsing,
//!       heading selection, text/markup rewrite, serialization
//!     - pipeline: host-facing pass over one document (settings, per-document
//!       overrides, content + excerpt)
//!     - error: configuration and markup-boundary error types
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── numeral.rs
//!     ├── dom.rs
//!     ├── engine.rs
//!     ├── pipeline.rs
//!     ├── style
//!     │   ├── mod.rs
//!     │   └── parser.rs
//!     └── lib.rs
//!
//! Usage
//!
//!     A host pipeline builds `IndexingSettings` (usually from its own
//!     configuration layer), wraps each rendered document in a
//!     `RenderedDocument`, and calls `index_document`:
//!
//!     ```ignore
//!     let settings = IndexingSettings { enable: true, ..Default::default() };
//!     let mut doc = RenderedDocument::new("posts/hello", rendered_html);
//!     index_document(&settings, &mut doc)?;
//!     ```
//!
//!     One invocation processes exactly one document to completion; there is
//!     no shared state between calls, so hosts may process documents in
//!     parallel without coordination.
//!
//! Style specifications
//!
//!     One token per nesting level, outermost first, e.g. "{1} {a:02} -":
//!     level 1 renders one-based decimal, level 2 renders zero-padded
//!     alphabetic, level 3 renders the literal "-". See the style module.

pub mod dom;
pub mod engine;
pub mod error;
pub mod numeral;
pub mod pipeline;
pub mod style;

pub use engine::{index_fragment, RenderOptions};
pub use error::{ConfigurationError, IndexingError};
pub use pipeline::{index_document, IndexingSettings, RenderedDocument};
pub use style::{parse_index_styles, IndexStyle, StyleDescriptor};
