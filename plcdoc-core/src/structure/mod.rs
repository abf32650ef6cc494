// Structuring of block bodies.
// - networks.rs: `Network n:` grouping and line classification
// - diagrams.rs: ladder/FBD token spelling
// - data_block.rs: DATA_BLOCK bodies with initial values

pub mod data_block;
pub mod diagrams;
pub mod networks;

pub use data_block::{render_data_block, structure_data_block};
pub use diagrams::format_diagrams;
pub use networks::{classify_line, render_networks, NetworkStructurer};
