//! Reusable HTML components for page generation
//!
//! Shared by the repository pages and the index page: the document layout
//! and the header blocks.

pub mod header;
pub mod layout;
