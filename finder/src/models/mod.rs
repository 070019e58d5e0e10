mod analysis;
mod candidate;
mod color;
mod query;
mod terms;
mod vision;

pub use analysis::*;
pub use candidate::*;
pub use color::*;
pub use query::*;
pub use terms::*;
pub use vision::*;
