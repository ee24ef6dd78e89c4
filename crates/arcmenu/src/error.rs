use derive_more::Display;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(Invalid),
}

/// Why a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Invalid {
    #[display("an arc needs at least 2 items, got {_0}")]
    TooFewItems(usize),
    #[display("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[display("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl From<Invalid> for Error {
    fn from(reason: Invalid) -> Self {
        Self::InvalidConfiguration(reason)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Invalid::NonFinite { field, value }.into())
    }
}

pub(crate) fn ensure_within(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Invalid::OutOfRange {
            field,
            value,
            min,
            max,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::from(Invalid::TooFewItems(1));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: an arc needs at least 2 items, got 1"
        );

        let err = ensure_within("hidden_width_ratio", 1.5, 0.0, 1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: hidden_width_ratio must be within [0, 1], got 1.5"
        );
    }

    #[test]
    fn test_non_finite_is_rejected_before_range() {
        assert!(matches!(
            ensure_within("alpha", f64::NAN, 0.0, 1.0),
            Err(Error::InvalidConfiguration(Invalid::NonFinite { field: "alpha", .. }))
        ));
    }
}
