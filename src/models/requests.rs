use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
}
