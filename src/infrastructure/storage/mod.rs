mod http_fetcher;
mod s3_store;

pub use http_fetcher::HttpAudioFetcher;
pub use s3_store::S3AudioStorage;
