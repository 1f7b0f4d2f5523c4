//! Rendering: compose a page per date, then hand it to the external toolchain

pub mod compose;
pub mod raster;
pub mod template;

use crate::dates::MeetingDate;

/// The composed LaTeX source for one meeting date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub date: MeetingDate,
    /// Deduplicated attendee names, first-seen order
    pub attendees: Vec<String>,
    pub source: String,
}

impl Page {
    /// Base name shared by the `.tex`, `.pdf` and image outputs
    pub fn file_stem(&self) -> String {
        self.date.file_stem()
    }
}
