// Adapters layer: concrete implementations for external systems (files, HTTP, export).

pub mod export;
pub mod http;
pub mod storage;

pub use export::ExportSink;
pub use http::HttpDeviceSink;
pub use storage::LocalStorage;
