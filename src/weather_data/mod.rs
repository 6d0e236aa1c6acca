pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod forecast;
pub mod historical;
pub mod normalize;
