// Adapters layer: concrete transports behind the `DataSource` port.

pub mod file;
pub mod http;
pub mod memory;

pub use file::FileSource;
pub use http::HttpSource;
pub use memory::MemorySource;
