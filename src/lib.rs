pub mod extractor;
pub mod image;
pub mod report;
pub mod srcset;
