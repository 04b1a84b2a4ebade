mod directory;
mod http;
mod memory;
mod source;

pub use directory::DirectoryContentSource;
pub use http::{HttpContentConfig, HttpContentSource};
pub use memory::{ContentRequest, InMemoryContentSource};
pub use source::{ContentSource, index_path, instance_path};
