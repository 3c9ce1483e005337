//! Shared formatting for user-facing errors and warnings.

use std::fmt::Display;

const PREFIX: &str = "component-files";

/// Format an error message so every fatal path reads the same in the CLI.
pub fn error_message(msg: impl Display) -> String {
    format!("{}: {}", PREFIX, msg)
}

/// Emit a non-fatal warning.
pub fn warn(msg: impl Display) {
    tracing::warn!("{}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_message_is_prefixed() {
        assert_eq!(
            error_message("bad regex"),
            "component-files: bad regex".to_string()
        );
    }
}
