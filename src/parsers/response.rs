use serde::de::Error as _;
use serde_json::Value;

use crate::client::AnalyzeError;
use crate::models::AnalysisResult;

/// Decode the body of a successful `/api/debug` response.
///
/// An empty body or a literal `null` is reported as [`AnalyzeError::EmptyBody`].
/// Anything other than a JSON object is a decode error; inside the object each
/// field is read on its own.
pub fn parse_analysis_response(body: &str) -> Result<AnalysisResult, AnalyzeError> {
    if body.trim().is_empty() {
        return Err(AnalyzeError::EmptyBody);
    }

    let value: Value = serde_json::from_str(body).map_err(AnalyzeError::Decode)?;
    match value {
        Value::Null => Err(AnalyzeError::EmptyBody),
        object @ Value::Object(_) => {
            serde_json::from_value(object).map_err(AnalyzeError::Decode)
        }
        _ => Err(AnalyzeError::Decode(serde_json::Error::custom("expected a JSON object"))),
    }
}
