//! CLI library components for the Datadoc editor.

pub mod document;
pub mod edits;
pub mod logging;
