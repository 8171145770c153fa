// Debounced sync between the rich-text editor and the server copy.

pub mod debounce;
pub mod handlers;
pub mod sync;

pub use sync::{EditorStore, EditorSync};
