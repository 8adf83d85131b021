use crate::{ConfigError, ConfigErrorResult, ConfigSection};

use std::fmt::Display;

/// Reject `value` unless it lies within `min..=max`
#[track_caller]
pub(crate) fn check_range<T>(
    section: ConfigSection,
    field: &str,
    value: T,
    min: T,
    max: T,
) -> ConfigErrorResult<()>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(ConfigError::invalid(
            section,
            format!("{section}.{field} must be {min}-{max}, got {value}"),
        ));
    }
    Ok(())
}
