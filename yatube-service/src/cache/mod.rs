pub mod feed_cache;

pub use feed_cache::FeedPageCache;
