//! # cloudprint-format
//!
//! Fixed-width text layout for thermal receipt printers.
//!
//! ## Scope
//!
//! This crate handles HOW printable lines are laid out:
//! - GBK width-unit math (CJK glyphs occupy 2 cells, ASCII 1)
//! - Width-aware wrapping that never splits a double-width glyph
//! - Multi-column rows with per-column alignment and markup labels
//! - Separator rules
//!
//! Business content (WHAT gets printed) stays in application code.
//! Everything here is pure and synchronous: same inputs, same lines.
//!
//! ## Example
//!
//! ```
//! use cloudprint_format::{Align, FormatSpec};
//!
//! let spec = FormatSpec::two_part([10, 20], [Align::Left, Align::Right])?;
//! let lines = spec.render(&["餐厅名称:", "XX食堂"])?;
//! assert_eq!(lines.len(), 1);
//! # Ok::<(), cloudprint_format::FormatError>(())
//! ```

mod encoding;
mod error;
mod layout;

// Re-exports
pub use encoding::{gbk_width, glyph_width};
pub use error::{FormatError, FormatResult};
pub use layout::{Align, FormatSpec, LINE_WIDTH, Rule, wrap};
