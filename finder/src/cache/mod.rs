mod result_cache;

pub use result_cache::{CacheRequest, CacheStats, CachedValue, ResultCache};
