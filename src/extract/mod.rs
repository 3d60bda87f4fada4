// src/extract/mod.rs
// =============================================================================
// Everything that reads a page without touching the network.
//
// Submodules:
// - normalize: resolves href/src values into absolute URLs
// - html: pulls links and external resources out of a parsed page
// - script: finds URL literals in inline script source
// =============================================================================

mod html;
mod normalize;
mod script;

pub use html::{extract, Extraction, ExternalResource};
pub use normalize::{is_web_url, normalize, resolve};
pub use script::find_url_literals;
