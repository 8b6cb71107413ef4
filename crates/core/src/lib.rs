//! Core domain types, slide normalization, and export options
//! for building PowerPoint packages from an editor's slide model.

pub mod error;
pub mod normalize;
pub mod options;
pub mod types;

pub use error::{Error, Result};
pub use normalize::{slide_count, NormalizedSlide, SlideNormalizer};
pub use options::ExportOptions;
pub use types::{Background, ContentElement, Slide};
