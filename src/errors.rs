//! Error types with diagnostic codes using miette.
//!
//! Only contract violations surface as errors: malformed transform syntax
//! degrades silently to fewer parsed ops, and degenerate geometry (zero-length
//! directions, near-parallel miter joins) is resolved by explicit fallbacks
//! inside the geometry code.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced when a caller asks for geometry the core cannot provide.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// An element kind with no geometry conversion was asked for paths.
    ///
    /// Blocks and pictograms live in the host object model; the core only
    /// synthesizes connector geometry. Asking for anything else indicates a
    /// broken caller, not bad input data.
    #[error("no geometry conversion for element kind `{kind}`")]
    #[diagnostic(code(trazo::geometry::unsupported_element_kind))]
    UnsupportedElementKind { kind: &'static str },
}
