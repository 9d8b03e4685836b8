//! Parser facade — Lua source text to an ordered list of function documents.

pub mod annotation;
pub mod scan;

use crate::model::FunctionDoc;
use annotation::AnnotationError;

/// Parse every annotated definition in a source file.
///
/// Each chunk is parsed independently; a failure in one block never aborts
/// the rest. Successes keep source order, failures are returned alongside
/// for the caller to report.
pub fn parse_source(source: &str) -> (Vec<FunctionDoc>, Vec<AnnotationError>) {
    let mut docs = Vec::new();
    let mut errors = Vec::new();
    for chunk in scan::scan(source) {
        match annotation::parse_annotation(&chunk.name, &chunk.lines) {
            Ok(doc) => docs.push(doc),
            Err(err) => errors.push(err),
        }
    }
    (docs, errors)
}
