use thiserror::Error;

use crate::error::CoreError;

/// tf2 error codes.
///
/// These mirror `tf2_msgs/msg/TF2Error` numeric constants.
pub mod tf2_error_codes {
    pub const NO_ERROR: u8 = 0;
    pub const LOOKUP_ERROR: u8 = 1;
    pub const CONNECTIVITY_ERROR: u8 = 2;
    pub const EXTRAPOLATION_ERROR: u8 = 3;
    pub const INVALID_ARGUMENT_ERROR: u8 = 4;
    pub const TIMEOUT_ERROR: u8 = 5;
    pub const TRANSFORM_ERROR: u8 = 6;
}

/// A transform could not be resolved.
///
/// `Transform` is the generic root kind; the others refine it. Every variant
/// carries the resolver's message verbatim.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum TransformException {
    #[error("transform failed: {0}")]
    Transform(String),

    #[error("connectivity error: {0}")]
    Connectivity(String),

    #[error("lookup error: {0}")]
    Lookup(String),

    #[error("extrapolation error: {0}")]
    Extrapolation(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("timeout: {0}")]
    Timeout(String),
}

impl TransformException {
    /// Map a non-success `TF2Error` code to its exception kind.
    ///
    /// Total: unknown codes (and `NO_ERROR`, if passed here) become the generic kind.
    pub fn from_code(code: u8, message: impl Into<String>) -> Self {
        use tf2_error_codes::*;

        let message = message.into();
        match code {
            LOOKUP_ERROR => Self::Lookup(message),
            CONNECTIVITY_ERROR => Self::Connectivity(message),
            EXTRAPOLATION_ERROR => Self::Extrapolation(message),
            INVALID_ARGUMENT_ERROR => Self::InvalidArgument(message),
            TIMEOUT_ERROR => Self::Timeout(message),
            _ => Self::Transform(message),
        }
    }

    /// Decode a `TF2Error` pair: `NO_ERROR` is success, anything else an exception.
    pub fn check(code: u8, message: &str) -> Result<(), Self> {
        if code == tf2_error_codes::NO_ERROR {
            Ok(())
        } else {
            Err(Self::from_code(code, message))
        }
    }

    /// Wire code for this kind (used by resolvers answering goals).
    pub const fn code(&self) -> u8 {
        use tf2_error_codes::*;

        match self {
            Self::Transform(_) => TRANSFORM_ERROR,
            Self::Connectivity(_) => CONNECTIVITY_ERROR,
            Self::Lookup(_) => LOOKUP_ERROR,
            Self::Extrapolation(_) => EXTRAPOLATION_ERROR,
            Self::InvalidArgument(_) => INVALID_ARGUMENT_ERROR,
            Self::Timeout(_) => TIMEOUT_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Transform(m)
            | Self::Connectivity(m)
            | Self::Lookup(m)
            | Self::Extrapolation(m)
            | Self::InvalidArgument(m)
            | Self::Timeout(m) => m,
        }
    }
}

/// Convenient result alias for buffer operations.
pub type BufferResult<T> = std::result::Result<T, BufferError>;

/// Everything a buffer operation can fail with.
///
/// Only `Transform` is a transform failure; the probe methods swallow it and
/// nothing else.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum BufferError {
    #[error(transparent)]
    Transform(#[from] TransformException),

    /// No apply-function registered for the payload type (programming error).
    #[error("no transform registered for payload type `{type_name}`")]
    UnregisteredType { type_name: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl BufferError {
    pub fn is_transform_failure(&self) -> bool {
        matches!(self, BufferError::Transform(_))
    }

    pub fn as_transform(&self) -> Option<&TransformException> {
        match self {
            BufferError::Transform(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::tf2_error_codes::*;
    use super::*;

    #[test]
    fn every_defined_code_maps_to_one_kind() {
        let cases = [
            (LOOKUP_ERROR, TransformException::Lookup("m".into())),
            (CONNECTIVITY_ERROR, TransformException::Connectivity("m".into())),
            (EXTRAPOLATION_ERROR, TransformException::Extrapolation("m".into())),
            (INVALID_ARGUMENT_ERROR, TransformException::InvalidArgument("m".into())),
            (TIMEOUT_ERROR, TransformException::Timeout("m".into())),
            (TRANSFORM_ERROR, TransformException::Transform("m".into())),
        ];

        for (code, expected) in cases {
            let mapped = TransformException::from_code(code, "m");
            assert_eq!(mapped, expected);
            assert_eq!(mapped.code(), code);
            assert_eq!(mapped.message(), "m");
        }
    }

    #[test]
    fn unknown_codes_map_to_generic_kind() {
        for code in (7..=u8::MAX).chain([NO_ERROR]) {
            assert_eq!(
                TransformException::from_code(code, "raw"),
                TransformException::Transform("raw".into())
            );
        }
    }

    #[test]
    fn check_accepts_only_no_error() {
        assert!(TransformException::check(NO_ERROR, "").is_ok());
        assert_eq!(
            TransformException::check(LOOKUP_ERROR, "unknown frame [base_link]"),
            Err(TransformException::Lookup("unknown frame [base_link]".into()))
        );
    }

    #[test]
    fn only_transform_variant_counts_as_transform_failure() {
        let tf: BufferError = TransformException::Timeout("t".into()).into();
        assert!(tf.is_transform_failure());
        assert!(tf.as_transform().is_some());

        let unregistered = BufferError::UnregisteredType { type_name: "Foo" };
        assert!(!unregistered.is_transform_failure());

        let core: BufferError = CoreError::client_not_initialized("tf2").into();
        assert!(!core.is_transform_failure());
        assert!(core.as_transform().is_none());
    }

    #[test]
    fn display_includes_resolver_message() {
        let e = TransformException::Extrapolation("future".into());
        assert_eq!(e.to_string(), "extrapolation error: future");
    }
}
