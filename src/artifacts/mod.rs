pub mod scan;
pub mod types;

pub use scan::{dedupe_triples, find_test_images, parse_dir_name};
pub use types::{TestImageTriple, Viewport};
