//! I/O layer: reading the source list, fetching remote images, enumerating
//! and decoding inputs, and `writers` for the JPEG output.
pub mod decode;
pub mod enumerate;
pub mod fetch;
pub mod source;
pub use fetch::{HttpTransport, Retrieved, Transport};
pub use source::SourceRef;

pub mod writers;
