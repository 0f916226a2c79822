//! GitHub REST API adapter.

pub mod transport;

pub use transport::ReqwestTransport;
