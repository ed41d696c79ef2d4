use serde::{Deserialize, Serialize};

/// Body of `POST /api/debug`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub language: String,
    pub code: String,
}

/// One reported issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bug {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_line")]
    pub line: Option<u32>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complexity {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub space: Option<String>,
}

/// A generated test case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub input: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub expected_output: Option<String>,
}

/// Response of `POST /api/debug`.
///
/// Every field is optional; the analyzer is an external service and partially
/// populated responses are rendered field by field. A field with an unexpected
/// shape is dropped on its own without failing the rest of the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub using_ai: Option<bool>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub bugs: Option<Vec<Bug>>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fixed_code: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub optimized_code: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_complexity",
        skip_serializing_if = "Option::is_none"
    )]
    pub complexity: Option<Complexity>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub tests: Option<Vec<TestCase>>,
}

impl AnalysisResult {
    pub fn bugs(&self) -> &[Bug] {
        self.bugs.as_deref().unwrap_or_default()
    }

    pub fn tests(&self) -> &[TestCase] {
        self.tests.as_deref().unwrap_or_default()
    }

    pub fn bug_count(&self) -> usize {
        self.bugs().len()
    }
}

/// Response of `GET /`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}
