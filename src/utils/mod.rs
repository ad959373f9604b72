//! Utility modules for zap2xml
//!
//! Reusable helpers shared by the ingestion path and the XMLTV generator.

pub mod http_client;
pub mod human_format;
pub mod natural_sort;
pub mod time;
pub mod url;
pub mod xml;

pub use http_client::{HttpClient, StandardHttpClient};
pub use natural_sort::natural_cmp;
pub use xml::escape_xml;
