use serde::Serialize;

use crate::text_processing::{NormalizationOutcome, Substitution};

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub normalized: String,
    pub substitutions: Vec<Substitution>,
    pub replaced: usize,
    pub preserved: usize,
}

impl From<NormalizationOutcome> for NormalizeResponse {
    fn from(outcome: NormalizationOutcome) -> Self {
        let replaced = outcome.replaced_count();
        let preserved = outcome.preserved_count();
        Self {
            normalized: outcome.normalized,
            substitutions: outcome.substitutions,
            replaced,
            preserved,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct GrammarInfoResponse {
    pub name: String,
    pub num_states: usize,
    pub num_transitions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_response_from_outcome() {
        let outcome = NormalizationOutcome {
            normalized: "three and 1001".to_string(),
            substitutions: vec![
                Substitution {
                    start: 0,
                    end: 1,
                    original: "3".to_string(),
                    replacement: Some("three".to_string()),
                },
                Substitution {
                    start: 6,
                    end: 10,
                    original: "1001".to_string(),
                    replacement: None,
                },
            ],
        };

        let response = NormalizeResponse::from(outcome);

        assert_eq!(response.replaced, 1);
        assert_eq!(response.preserved, 1);
        assert_eq!(response.normalized, "three and 1001");
    }

    #[test]
    fn test_normalize_response_serialization() {
        let response = NormalizeResponse {
            normalized: "seven".to_string(),
            substitutions: vec![Substitution {
                start: 0,
                end: 1,
                original: "7".to_string(),
                replacement: Some("seven".to_string()),
            }],
            replaced: 1,
            preserved: 0,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["normalized"], "seven");
        assert_eq!(json["substitutions"][0]["original"], "7");
        assert_eq!(json["substitutions"][0]["replacement"], "seven");
        assert_eq!(json["replaced"], 1);
    }

    #[test]
    fn test_preserved_substitution_serializes_null_replacement() {
        let substitution = Substitution {
            start: 0,
            end: 4,
            original: "2000".to_string(),
            replacement: None,
        };

        let json = serde_json::to_value(&substitution).unwrap();

        assert!(json["replacement"].is_null());
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"version\":\"0.1.0\""));
    }

    #[test]
    fn test_grammar_info_serialization() {
        let response = GrammarInfoResponse {
            name: "cardinal_0_to_1000".to_string(),
            num_states: 42,
            num_transitions: 99,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["name"], "cardinal_0_to_1000");
        assert_eq!(json["num_states"], 42);
        assert_eq!(json["num_transitions"], 99);
    }
}
