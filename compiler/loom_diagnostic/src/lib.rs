//! Diagnostics for the Loom syntax core.
//!
//! Two shapes exist:
//! - [`Diagnostic`] lives inside tree nodes and tokens. Its offset is local
//!   to the owner, so a subtree can move without rewriting its diagnostics.
//! - [`PositionedDiagnostic`] carries an absolute span and a rendered
//!   message. Only the navigable facade produces it.
//!
//! Codes are grouped by phase: `E0xxx` lexer, `E1xxx` parser.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, PositionedDiagnostic, Severity};
pub use error_code::ErrorCode;
