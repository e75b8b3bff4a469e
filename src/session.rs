// ============================================================================
// Session Context
// ============================================================================
//
// Read-only accessor for the ambient request/user/session identifiers the
// replicating bus stamps into every record. Queried per publish call, so
// values reflect the session at the time of firing.
//
// ============================================================================

/// Provider of the ambient identifiers for the current caller.
///
/// Everything except `platform` and `environment` may be absent; absence is
/// not an error and ends up as `null` in the published record.
pub trait SessionContext: Send + Sync {
    /// The current user id, when a user is authenticated.
    fn user_id(&self) -> Option<String>;

    /// The current customer id.
    fn customer_id(&self) -> Option<String>;

    /// The calling platform, e.g. "web", "mobile", "desktop".
    fn platform(&self) -> String;

    /// The deployment environment, e.g. "production", "staging".
    fn environment(&self) -> String;

    /// The current session id.
    fn session_id(&self) -> Option<String>;

    /// The current request id.
    fn request_id(&self) -> Option<String>;
}

/// Fixed-value session context for wiring the bus outside a request
/// framework (demos, batch jobs, tests).
#[derive(Debug, Clone)]
pub struct StaticSession {
    user_id: Option<String>,
    customer_id: Option<String>,
    platform: String,
    environment: String,
    session_id: Option<String>,
    request_id: Option<String>,
}

impl StaticSession {
    pub fn new(platform: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            user_id: None,
            customer_id: None,
            platform: platform.into(),
            environment: environment.into(),
            session_id: None,
            request_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_request(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl SessionContext for StaticSession {
    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }

    fn customer_id(&self) -> Option<String> {
        self.customer_id.clone()
    }

    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn environment(&self) -> String {
        self.environment.clone()
    }

    fn session_id(&self) -> Option<String> {
        self.session_id.clone()
    }

    fn request_id(&self) -> Option<String> {
        self.request_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_only_platform_and_environment_by_default() {
        let session = StaticSession::new("web", "staging");

        assert_eq!(session.platform(), "web");
        assert_eq!(session.environment(), "staging");
        assert!(session.user_id().is_none());
        assert!(session.customer_id().is_none());
        assert!(session.session_id().is_none());
        assert!(session.request_id().is_none());
    }

    #[test]
    fn builders_fill_the_optional_identifiers() {
        let session = StaticSession::new("mobile", "production")
            .with_user("12")
            .with_customer("34")
            .with_session("1234")
            .with_request("5678");

        assert_eq!(session.user_id().as_deref(), Some("12"));
        assert_eq!(session.customer_id().as_deref(), Some("34"));
        assert_eq!(session.session_id().as_deref(), Some("1234"));
        assert_eq!(session.request_id().as_deref(), Some("5678"));
    }
}
