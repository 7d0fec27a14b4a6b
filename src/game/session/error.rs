/// Session errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Session has been torn down")]
    TornDown,

    #[error("Player body missing from the physics world")]
    PlayerMissing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        assert_eq!(SessionError::TornDown.to_string(), "Session has been torn down");
    }
}
