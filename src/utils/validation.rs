use validator::Validate;

use crate::error::{Error, Result};

/// Runs the payload's field rules and reports the full list of required
/// fields when any of them fails.
pub fn validate_required<T: Validate>(val: &T, required: &'static [&'static str]) -> Result<()> {
    val.validate()
        .map_err(|_| Error::MissingFields { required })
}
