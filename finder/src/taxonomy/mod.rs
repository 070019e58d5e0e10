pub mod dictionary;
mod extractor;
mod objects;

pub use extractor::{expand_compound_items, extract};
pub use objects::{find_main_object, item_type_hint};
