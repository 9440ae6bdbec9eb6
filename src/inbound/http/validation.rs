//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Validation error for a required request field that was not supplied.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn missing_field_errors_carry_the_field_name() {
        let error = missing_field_error("is_public");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert!(error.message().contains("is_public"));
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "is_public", "code": "missing_field" }))
        );
    }
}
