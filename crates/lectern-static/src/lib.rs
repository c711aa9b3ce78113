//! Static index page generator for lectern documentation sites.
//!
//! Renders one `index.html` plus a copied stylesheet asset from a parsed
//! site description.

pub mod assets;
pub mod builder;
pub mod markup;

pub use builder::{BuildConfig, BuildError, BuildResult, IndexBuilder};
pub use markup::Markup;
