use crate::Error;

/// Marks a hit as valid in a response of the hit validation endpoint.
///
/// See <https://developers.google.com/analytics/devguides/collection/protocol/v1/validating-hits>
pub const VALID_HIT_MARKER: &str = r#""valid": true"#;

/// The outcome of sending a hit.
///
/// Sending never fails with an error, the error is captured here instead, so that many hits can
/// be sent and checked afterwards.
#[derive(Debug)]
pub enum TrackingResult<E> {
    Success {
        /// The body returned by the hit validation endpoint, if the hit was validated.
        validation: Option<String>,
    },
    Failed(E),
}

impl<E> TrackingResult<E> {
    pub fn success() -> Self {
        Self::Success { validation: None }
    }

    pub fn validated(body: impl Into<String>) -> Self {
        Self::Success {
            validation: Some(body.into()),
        }
    }

    pub fn failed(err: E) -> Self {
        Self::Failed(err)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failed(&self) -> bool {
        !self.is_success()
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Success { .. } => None,
            Self::Failed(err) => Some(err),
        }
    }

    pub fn into_error(self) -> Option<E> {
        match self {
            Self::Success { .. } => None,
            Self::Failed(err) => Some(err),
        }
    }

    pub fn validation_response(&self) -> Option<&str> {
        match self {
            Self::Success { validation } => validation.as_deref(),
            Self::Failed(_) => None,
        }
    }

    /// Whether the validation endpoint accepted the first hit.
    ///
    /// This only looks for [`VALID_HIT_MARKER`] in the raw body, it does not parse it. Fails if
    /// no validation response was captured.
    pub fn is_valid(&self) -> Result<bool, Error> {
        self.validation_response()
            .map(|body| body.contains(VALID_HIT_MARKER))
            .ok_or(Error::InvalidState("no validation response was captured"))
    }
}

impl<E> Default for TrackingResult<E> {
    fn default() -> Self {
        Self::success()
    }
}

impl<E> From<Result<Option<String>, E>> for TrackingResult<E> {
    fn from(result: Result<Option<String>, E>) -> Self {
        match result {
            Ok(validation) => Self::Success { validation },
            Err(err) => Self::Failed(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct SendError(u16);

    const VALID: &str = r#"{
  "hitParsingResult": [ {
    "valid": true,
    "parserMessage": [ ],
    "hit": "/debug/collect?v=1&tid=UA-1-1&cid=cid1&t=event&ec=cat&ea=act"
  } ],
  "parserMessage": [ {
    "messageType": "INFO",
    "description": "Found 1 hit in the request."
  } ]
}"#;

    const INVALID: &str = r#"{
  "hitParsingResult": [ {
    "valid": false,
    "parserMessage": [ {
      "messageType": "ERROR",
      "description": "The value provided for parameter 'qt' is out of bounds.",
      "messageCode": "VALUE_OUT_OF_BOUNDS",
      "parameter": "qt"
    } ],
    "hit": "/debug/collect?v=1&cid=sdf&tid=UA-12323423-2&t=event&qt=12313123123123123"
  } ],
  "parserMessage": [ {
    "messageType": "INFO",
    "description": "Found 1 hit in the request."
  } ]
}"#;

    #[test]
    fn success() {
        let result = TrackingResult::<SendError>::success();
        assert!(result.is_success());
        assert!(!result.is_failed());
        assert_eq!(result.error(), None);
    }

    #[test]
    fn failed_keeps_error() {
        let result = TrackingResult::failed(SendError(400));
        assert!(result.is_failed());
        assert_eq!(result.error(), Some(&SendError(400)));
        assert_eq!(result.into_error(), Some(SendError(400)));
    }

    #[test]
    fn from_result() {
        let result: TrackingResult<SendError> = Err(SendError(503)).into();
        assert_eq!(result.error(), Some(&SendError(503)));

        let result: TrackingResult<SendError> = Ok(Some(VALID.to_string())).into();
        assert_eq!(result.validation_response(), Some(VALID));
    }

    #[test]
    fn valid_response() {
        let result = TrackingResult::<SendError>::validated(VALID);
        assert_eq!(result.is_valid(), Ok(true));
    }

    #[test]
    fn invalid_response() {
        let result = TrackingResult::<SendError>::validated(INVALID);
        assert_eq!(result.is_valid(), Ok(false));
    }

    #[test]
    fn validity_without_response() {
        assert!(matches!(
            TrackingResult::<SendError>::success().is_valid(),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            TrackingResult::failed(SendError(400)).is_valid(),
            Err(Error::InvalidState(_))
        ));
    }

    /// The check is textual: a marker anywhere in the body counts, even outside
    /// `hitParsingResult[0]`. Kept for compatibility, this documents the weak spot.
    #[test]
    fn marker_anywhere_counts_as_valid() {
        let body = INVALID.replace("out of bounds.", r#"out of bounds, \"valid\": true"#);
        assert_eq!(TrackingResult::<SendError>::validated(body).is_valid(), Ok(false));

        let body = INVALID.replace(r#""parameter": "qt""#, r#""valid": true"#);
        assert_eq!(TrackingResult::<SendError>::validated(body).is_valid(), Ok(true));
    }

    #[test]
    fn compact_json_is_not_matched() {
        let body = r#"{"hitParsingResult":[{"valid":true}]}"#;
        assert_eq!(TrackingResult::<SendError>::validated(body).is_valid(), Ok(false));
    }
}
