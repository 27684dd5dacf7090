/// Builder for Discord API paths.
///
/// Literal segments are emitted verbatim (`@me`, `widget.json`); caller
/// supplied values go through [`Route::param`] and are percent-encoded so an
/// id can never introduce an extra path segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    path: String,
}

impl Route {
    pub fn new(first: &str) -> Self {
        Self::tail().segment(first)
    }

    /// An empty route, used as the suffix after a webhook's id and token.
    pub fn tail() -> Self {
        Self::default()
    }

    pub fn segment(mut self, literal: &str) -> Self {
        self.path.push('/');
        self.path.push_str(literal);
        self
    }

    pub fn param(mut self, value: &str) -> Self {
        self.path.push('/');
        self.path.push_str(&urlencoding::encode(value));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub fn into_string(self) -> String {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_routes() {
        let route = Route::new("guilds").param("123").segment("emojis").param("456");
        assert_eq!(route.as_str(), "/guilds/123/emojis/456");
    }

    #[test]
    fn literals_are_verbatim() {
        let route = Route::new("users").segment("@me").segment("channels");
        assert_eq!(route.as_str(), "/users/@me/channels");
    }

    #[test]
    fn params_cannot_escape_their_segment() {
        let route = Route::new("invites").param("abc/../../guilds");
        assert_eq!(route.as_str(), "/invites/abc%2F..%2F..%2Fguilds");
    }

    #[test]
    fn tail_starts_empty() {
        assert_eq!(Route::tail().as_str(), "");
        assert_eq!(Route::tail().segment("slack").as_str(), "/slack");
    }
}
