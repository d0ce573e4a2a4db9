pub mod requests;
pub mod responses;

pub use requests::NormalizeRequest;
pub use responses::{GrammarInfoResponse, HealthResponse, NormalizeResponse};
