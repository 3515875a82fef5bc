//! Low-level scanner for Loom source text.
//!
//! Produces `(RawTag, len)` pairs from a sentinel-terminated buffer without
//! allocating and without failing. Malformed input becomes error tags; the
//! cooking layer (`loom_lexer`) turns those into diagnostics, resolves
//! keywords and groups trivia around tokens.
//!
//! Scanning can start at any character boundary, which is what incremental
//! re-lexing needs.

mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::{tokenize, RawScanner, ScanMode};
pub use source_buffer::SourceBuffer;
pub use tag::{RawTag, RawToken};
