pub mod basic_auth;
pub mod request_id;
pub mod timing;

pub use basic_auth::{BasicAuth, CredentialVerifier};
pub use request_id::{RequestId, RequestIdMiddleware};
pub use timing::TimingMiddleware;
