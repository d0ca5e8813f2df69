use serde_json::Value as JsonValue;

use crate::{ModsError, RawResponse};

/// Turns an executor response into a JSON document.
///
/// Non-2xx statuses become [`ModsError::Http`]; 2xx bodies that fail to
/// parse become [`ModsError::Decode`].
pub(crate) fn decode_json_response(
    endpoint: &str,
    response: RawResponse,
) -> Result<JsonValue, ModsError> {
    if !response.is_success() {
        return Err(ModsError::Http {
            endpoint: endpoint.to_owned(),
            status: response.status,
            body: response.text(),
        });
    }

    serde_json::from_slice(&response.body).map_err(|err| ModsError::Decode {
        endpoint: endpoint.to_owned(),
        message: err.to_string(),
    })
}
