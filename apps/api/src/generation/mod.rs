// Document generation: merges the caller's templates with candidate, job and
// skills data. The prose backend sits behind `DocumentGenerator`; the default
// backend is the in-process template renderer.

pub mod generator;
pub mod handlers;
