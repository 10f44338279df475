// Output formats for a laid-out document: SVG for the live preview and PDF for
// the downloadable artifact. Both consume the same scene produced by `layout`.

pub mod pdf;
pub mod preview;
pub mod svg;

pub use pdf::{export_pdf, ExportError};
pub use preview::{render_preview, Preview};
