//! I/O layer: the buffered HTTP transport abstraction and the pipeline
//! orchestrator built on top of it.

mod http;
mod pipeline;

pub use http::{HttpResponse, Transport};
pub use pipeline::Uploader;

#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;
