//! Paginated GRI 306 waste reports rendered to landscape PDF documents.
//!
//! [`ReportBuilder`] turns a normalised [`ReportPayload`] into a document made
//! of a cover page, a full-disclosure section with summary cards and up to four
//! paginated tables, and a closing contact page.

pub mod assets;
pub mod builder;
pub mod canvas;
pub mod config;
pub mod context;
pub mod decorator;
pub mod error;
pub mod fonts;
pub mod format;
pub mod images;
pub mod layout;
pub mod payload;
pub mod sections;
pub mod table;
pub mod theme;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{generate_report, RenderedReport, ReportBuilder, SectionMark};
pub use config::ReportConfig;
pub use error::{AssetError, PayloadError, ReportError};
pub use layout::PageGeometry;
pub use payload::ReportPayload;
