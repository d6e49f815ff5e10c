/// Errors raised while constructing or inspecting model values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An input was missing, blank or malformed. `field` names the offending input.
    #[error("{field} {reason}")]
    InvalidArgument { field: &'static str, reason: &'static str },
    /// The operation doesn't apply to the value in its current state.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

impl Error {
    pub(crate) fn blank(field: &'static str) -> Self {
        Self::InvalidArgument {
            field,
            reason: "cannot be null or whitespace",
        }
    }

    /// The name of the offending field, if this is an argument error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { field, .. } => Some(field),
            Self::InvalidState(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Error::blank("EventAction").to_string(), "EventAction cannot be null or whitespace");
        assert_eq!(Error::blank("EventAction").field(), Some("EventAction"));
        assert_eq!(Error::InvalidState("no body").field(), None);
    }
}
