//! I/O side of fetching: the HTTP seam and the fetcher that drives it.

mod fetcher;
mod http;

pub use fetcher::Fetcher;
pub use http::{BoxStream, HttpClient, Response};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
