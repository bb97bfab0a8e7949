//! Exit code constants for the mdschema CLI.
//!
//! - 0: Success (no error-severity violations)
//! - 1: User error (bad args, unreadable or invalid schema, unreadable document)
//! - 2: Validation failure (violations found)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid schema, or unreadable input.
pub const USER_ERROR: i32 = 1;

/// Validation failure: at least one document violated the schema.
pub const VALIDATION_FAILURE: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, VALIDATION_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(VALIDATION_FAILURE, 2);
    }
}
