use thiserror::Error;

/// Errors raised by the match query surface.
///
/// Only the strict category policy produces an error; with the lenient
/// policy an unrecognized requester category degrades to an empty result and
/// no error path exists.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("unrecognized requester category `{0}` (expected male|female)")]
    UnrecognizedCategory(String),
}

#[cfg(test)]
mod tests {
    use super::MatchError;

    #[test]
    fn unrecognized_category_names_the_offending_label() {
        let message = MatchError::UnrecognizedCategory("other".to_string()).to_string();
        assert!(message.contains("`other`"));
        assert!(message.contains("male|female"));
    }
}
