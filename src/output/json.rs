// Canonical JSON capture of the API model

use crate::error::Result;
use crate::model::ApiModel;

/// Serialize the model as pretty-printed JSON.
///
/// Arrays and object keys come out sorted because the model is built on
/// ordered collections; constructor lists keep discovery order.
pub fn emit_json(model: &ApiModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// Read a document produced by [`emit_json`] back into a model
pub fn parse_json(text: &str) -> Result<ApiModel> {
    Ok(serde_json::from_str(text)?)
}
