mod pipeline;

pub use pipeline::MatchingPipeline;
