//! Output documents

pub mod pdf;

pub use pdf::PdfRenderer;
