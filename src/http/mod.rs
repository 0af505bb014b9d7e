//! Request/response plumbing shared by every resource module.
//!
//! - [`request`]: URL, query and body construction
//! - [`document`]: JSON-API encode/decode mapping
//! - [`transport`]: the pluggable HTTP transport
//! - [`response`]: status mapping and decoding
//! - [`api`]: the [`ApiCore`] tying them together

pub mod api;
pub mod document;
pub mod request;
pub mod response;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ApiCore;
pub use document::{
    Attributes, EncodeResource, ErrorDocument, ErrorObject, Included, MEDIA_TYPE, Relationship,
    RelationshipData, Resource, ResourceIdentifier, ResourceObject,
};
pub use request::{ListOptions, Payload, RequestBuilder, segment};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
