pub mod file;

pub use file::FileMarketDataProvider;
