//! Documents and the links written in them.

mod document;
mod scan;

pub use document::{DocId, Document};
pub use scan::{ScannedLink, extract_links, internal_links};
