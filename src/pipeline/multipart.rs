//! Multipart form coercion.

use crate::error::PipelineError;
use reqwest::multipart::Form;

/// Coerce a JSON object body into a `multipart/form-data` form.
///
/// String values become text parts verbatim; other values are serialized to
/// their compact JSON text; nulls are skipped. Non-object bodies are a
/// configuration error since form fields need names.
pub fn form_from_json(body: &serde_json::Value) -> Result<Form, PipelineError> {
    let object = body.as_object().ok_or_else(|| {
        PipelineError::Configuration("form_data body must be a JSON object".to_string())
    })?;

    let mut form = Form::new();
    for (key, value) in object {
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        form = form.text(key.clone(), text);
    }
    Ok(form)
}
