use crate::token::TokenCarrier;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Landing,
    /// `/timeline`
    Timeline,
    /// `/login`
    Login,
    /// `/signup`
    Signup,
    /// `/verify/{token}`
    Verify(String),
}

impl Route {
    /// Parse a path such as `/verify/abc/`. A trailing slash is optional.
    /// Unknown paths return `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        match trimmed {
            "" => Some(Self::Landing),
            "/timeline" => Some(Self::Timeline),
            "/login" => Some(Self::Login),
            "/signup" => Some(Self::Signup),
            other => other
                .strip_prefix("/verify/")
                .filter(|token| !token.is_empty() && !token.contains('/'))
                .map(|token| Self::Verify(token.to_string())),
        }
    }

    /// Like [`Route::parse`], falling back to the landing page.
    #[must_use]
    pub fn parse_or_landing(path: &str) -> Self {
        Self::parse(path).unwrap_or(Self::Landing)
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Timeline => "/timeline".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Verify(token) => format!("/verify/{token}"),
        }
    }

    /// Routes that require an access token.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Landing | Self::Timeline)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Route),
}

/// Gates protected routes on the presence of an access token. Validity is
/// left to the backend; an invalid token surfaces as a failed request later.
pub struct RouteGuard<'a> {
    tokens: &'a TokenCarrier,
}

impl<'a> RouteGuard<'a> {
    #[must_use]
    pub fn new(tokens: &'a TokenCarrier) -> Self {
        Self { tokens }
    }

    #[must_use]
    pub fn evaluate(&self, route: Route) -> GuardDecision {
        decide(route, self.tokens.is_present())
    }
}

fn decide(route: Route, has_token: bool) -> GuardDecision {
    if route.is_protected() && !has_token {
        GuardDecision::Redirect(Route::Login)
    } else {
        GuardDecision::Render(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn parses_known_paths_with_or_without_trailing_slash() {
        assert_eq!(Route::parse("/"), Some(Route::Landing));
        assert_eq!(Route::parse(""), Some(Route::Landing));
        assert_eq!(Route::parse("/timeline"), Some(Route::Timeline));
        assert_eq!(Route::parse("/timeline/"), Some(Route::Timeline));
        assert_eq!(Route::parse("/login/"), Some(Route::Login));
        assert_eq!(Route::parse("/signup"), Some(Route::Signup));
        assert_eq!(
            Route::parse("/verify/abc123/"),
            Some(Route::Verify("abc123".into()))
        );
    }

    #[test]
    fn unknown_paths_fall_back_to_landing() {
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("/verify/"), None);
        assert_eq!(Route::parse("/verify/a/b"), None);
        assert_eq!(Route::parse_or_landing("/nowhere"), Route::Landing);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Landing,
            Route::Timeline,
            Route::Login,
            Route::Signup,
            Route::Verify("t0k".into()),
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn protected_routes_redirect_without_a_token() {
        assert_eq!(
            decide(Route::Timeline, false),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            decide(Route::Landing, false),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            decide(Route::Signup, false),
            GuardDecision::Render(Route::Signup)
        );
        assert_eq!(
            decide(Route::Timeline, true),
            GuardDecision::Render(Route::Timeline)
        );
    }

    #[test]
    fn guard_reads_the_token_at_evaluation_time() {
        let tokens = TokenCarrier::new(Arc::new(MemoryStore::new()));
        let guard = RouteGuard::new(&tokens);
        assert_eq!(
            guard.evaluate(Route::Landing),
            GuardDecision::Redirect(Route::Login)
        );

        tokens.set("opaque").expect("stored");
        assert_eq!(
            guard.evaluate(Route::Landing),
            GuardDecision::Render(Route::Landing)
        );
    }
}
