//! cviz
//!
//! Turns a batch of classification results into a browsable gallery served on
//! the loopback interface.
//!
//! ## Pipeline
//!
//! Input file → [`InputDocument`] (both record shapes normalized) →
//! [`ViewModelBuilder`] (validation, colors, score ranking, ids) →
//! [`ViewModel`] held read-only for the life of the server. Each gallery
//! request picks a [`Window`] and hands it to a [`PageRenderer`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cviz::{gallery_router, ColorStrategy, GalleryState, InputDocument, TemplateRenderer, ViewModel};
//!
//! let document = InputDocument::load(path).await?;
//! let model = ViewModel::from_document(document, &ColorStrategy::default())?;
//! let state = GalleryState::new(model, Arc::new(TemplateRenderer::new()?));
//! let app = gallery_router(state);
//! ```

pub mod classes;
pub mod color;
pub mod error;
pub mod files;
pub mod input;
pub mod pager;
pub mod render;
pub mod router;
pub mod score;
pub mod view_model;

pub use classes::{ClassInfo, ClassSet};
pub use color::{ColorStrategy, Palette};
pub use error::{Error, FileError, LoadError, RenderError, Result, ValidationError, Violation, ViolationKind};
pub use input::{InputDocument, InputObject, Scores};
pub use pager::{window, PageRequest, Window};
pub use render::{GalleryPage, PageRenderer, TemplateRenderer};
pub use router::{gallery_router, GalleryState, GALLERY_PATH};
pub use score::{Ranking, MAX_RANKED_SCORES};
pub use view_model::{ViewModel, ViewModelBuilder, ViewObject};
