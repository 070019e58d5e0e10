mod classifier;
pub mod palette;
mod table;

pub use classifier::{ColorClassifier, UNDETECTED_DESCRIPTION};
pub use table::{ColorRange, ColorTable};
