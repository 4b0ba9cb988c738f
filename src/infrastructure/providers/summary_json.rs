use serde_json::Value;

use crate::application::ports::{AiProviderError, MedicalSummary};

/// Parses the strict-JSON summarization payload both backends are instructed
/// to return. Anything that is not a JSON object is `ParseFailed`; the parser
/// never attempts to repair or guess.
pub fn parse_summary_json(raw: &str) -> Result<MedicalSummary, AiProviderError> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|_| AiProviderError::ParseFailed)?;

    if !value.is_object() {
        return Err(AiProviderError::ParseFailed);
    }

    Ok(MedicalSummary {
        summary: value
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
        symptoms: string_list(&value, "symptoms"),
        diagnoses: string_list(&value, "diagnoses"),
        medications: string_list(&value, "medications"),
        follow_up: string_list(&value, "follow_up"),
    })
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
