//! Bitmap font loading
//!
//! Handles:
//! - Binary font file parsing (6-byte header + glyph rows)
//! - Font directory indexing by number
//! - Single-font cache with lazy loading

pub mod file;
pub mod registry;
pub mod source;

pub use file::{BitmapFont, FontHeader, Glyph, GlyphRows};
pub use registry::FontRegistry;
pub use source::{DirSource, FontSource, MemorySource};
