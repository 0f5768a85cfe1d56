use crate::error::ApiError;

/// Reject client writes to system-managed fields.
///
/// `fields` pairs each restricted field name with whether the request
/// supplied it. The error names every offending field rather than failing on
/// the first one.
pub fn reject_restricted_fields(fields: &[(&str, bool)]) -> Result<(), ApiError> {
    let offending: Vec<&str> = fields
        .iter()
        .filter(|(_, supplied)| *supplied)
        .map(|(name, _)| *name)
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Cannot set system-managed field(s): {}",
            offending.join(", ")
        )))
    }
}
