use ulid::Ulid;

use crate::errors::Error;

/// Generate a fresh document identifier.
pub fn new_id() -> String {
    Ulid::new().to_string()
}

/// Convert a client supplied identifier into the store's native id type.
pub fn parse_id(value: &str) -> Result<Ulid, Error> {
    Ulid::from_string(value).map_err(|_| Error::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_parse_back() {
        let id = new_id();
        let parsed = parse_id(&id).unwrap();
        assert_eq!(parsed.to_string(), id);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn malformed_id_is_rejected() {
        for value in ["", "not-an-id", "01ARZ3NDEKTSV4RRFFQ69G5FA", "507f1f77bcf86cd799439011"] {
            let err = parse_id(value).unwrap_err();
            assert!(matches!(err, Error::InvalidId), "{value} should be rejected");
            assert_eq!(err.to_string(), "Invalid id format");
        }
    }
}
