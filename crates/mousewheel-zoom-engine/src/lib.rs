pub mod canvas;
pub mod edit;
pub mod element;
mod error;
pub mod io;
pub mod keys;
pub mod reference;
pub mod settings;
pub mod zoom;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use edit::{EditPlan, EditTerm, Separator, SizeAnnotation};
pub use element::{ImageElement, ImageSource};
pub use error::ZoomError;
pub use io::{DocumentHost, IoError, Vault};
pub use keys::{KeyTracker, ModifierKey, Modifiers};
pub use reference::{ImageReference, ReferenceDialect};
pub use settings::ZoomSettings;
pub use zoom::{ImageZoom, ScrollDirection, ScrollTarget, WheelEvent, ZoomOutcome};
