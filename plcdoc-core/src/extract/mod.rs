// Extraction from document text into domain objects.
// - metadata.rs: labeled block-info fields
// - interface.rs: interface declaration tables and the section state machine
// - tags.rs: global tag tables
// - table.rs: column splitting and address patterns shared by the above

pub mod interface;
pub mod metadata;
pub mod table;
pub mod tags;

pub use interface::{parse_interface, render_interface};
pub use metadata::extract_metadata;
pub use tags::{parse_tag_tables, render_tag_tables};
