//! Core data types: the wire envelope and the request descriptor.

mod envelope;
mod request;

pub use envelope::ResponseEnvelope;
pub use request::{RequestDescriptor, RequestDescriptorBuilder};
