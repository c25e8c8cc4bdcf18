pub mod docx_exporter;
pub mod listing;

pub use docx_exporter::{DocxExporter, EXPORT_FILE_NAME};
pub use listing::{group_by_topic, render_listing};
