//! # Small textbook instances
//!
//! Stored in the text format, with known optimal costs.
use std::path::PathBuf;

/// # Generation and execution
mod test;

/// Absolute path of a problem file in this folder, `name` without its `.txt` extension.
fn get_test_file_path(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "textbook", name].iter()
        .collect::<PathBuf>()
        .with_extension("txt")
}
