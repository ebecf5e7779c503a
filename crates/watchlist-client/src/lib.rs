pub mod client;
pub mod endpoints;
pub mod error;
pub mod response;
pub mod transport;

pub use client::ApiClient;
pub use error::{ApiError, TransportError};
pub use response::ApiResponse;
pub use transport::{RawResponse, ReqwestTransport, Transport};
