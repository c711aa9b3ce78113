//! Site description parser for lectern documentation sites.
//!
//! This crate reads the `main.xml` site description into a typed model.
//! Parsing happens in two layers: a minimal read-only DOM built from
//! quick-xml events, and a schema layer that walks the tree into
//! [`SiteDescription`] while validating required fields and status labels.

pub mod dom;
pub mod site;

pub use dom::{Document, DomError, Element, Node};
pub use site::{
    parse_description, GuideCategory, GuideEntry, Introduction, SchemaError, SiteDescription,
    Status,
};
