//! oled_fonts - bitmap fonts for small monochrome OLED displays
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │           Display driver (caller)        │
//! ├──────────────────────────────────────────┤
//! │  FontRegistry: index + one-font cache    │
//! │                    ↓                     │
//! │  BitmapFont parser (header + rows)       │
//! │                    ↓                     │
//! │  FontSource (filesystem / memory)        │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ```no_run
//! use oled_fonts::FontRegistry;
//!
//! let mut fonts = FontRegistry::new("/usr/share/oled-fonts/fonts");
//! for (number, name) in fonts.font_names()?.iter().enumerate() {
//!     println!("{number}: {name}");
//! }
//! let font = fonts.get_font(0)?;
//! let glyph = font.glyph(b'A')?;
//! for row in glyph.rows() {
//!     println!("{row:02x?}");
//! }
//! # Ok::<(), oled_fonts::FontError>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod font;

pub use config::{Config, ScanMode};
pub use error::{FontError, FontResult, ParseError, ScanWarning};
pub use font::{BitmapFont, DirSource, FontHeader, FontRegistry, FontSource, Glyph, MemorySource};
