// Template merge pipeline: token catalog, renderer, signature
// resolution, and the ordering rules used when formatting values.
// Everything here is synchronous and pure; callers pass all inputs explicitly.

pub mod chronology;
pub mod placeholders;
pub mod renderer;
pub mod signature;
pub mod skills;

pub use renderer::TemplateRenderer;
pub use signature::{resolve_signature, TargetFormat};
