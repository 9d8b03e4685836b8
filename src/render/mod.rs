//! Renderer module — trait-based format dispatch.

pub mod markdown;
pub mod vimdoc;

use crate::model::FunctionDoc;
use anyhow::{anyhow, Result};

/// Trait for rendering a batch of function documents into output lines.
///
/// Renderers are pure: same input, same lines. Documents flagged private are
/// skipped; everything else appears in input order.
pub trait Renderer {
    fn render(&self, docs: &[FunctionDoc]) -> Vec<String>;
    fn file_extension(&self) -> &str;
}

/// Layout settings shared by renderer construction.
pub struct RenderOptions {
    /// Target line width for the help-file renderer.
    pub width: usize,
    /// Tag qualifier: tags render as `*namespace.name*`.
    pub namespace: String,
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, opts: &RenderOptions) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "vimdoc" | "txt" => Ok(Box::new(vimdoc::VimdocRenderer {
            width: opts.width,
            namespace: opts.namespace.clone(),
        })),
        _ => Err(anyhow!(
            "unknown format: {}. Use markdown or vimdoc",
            format
        )),
    }
}
