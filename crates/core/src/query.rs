/// Ordered query parameters. Values are pushed only when the caller supplied
/// them, and they render in push order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key=value` when `value` is present. Booleans render as the
    /// literal `true` / `false`, which is what Discord expects.
    pub fn push<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.pairs.push((key.to_string(), v.to_string()));
        }
        self
    }

    /// Adds one `key=value` pair per element (`a=1&a=2`).
    pub fn repeated<V: ToString>(mut self, key: &str, values: Option<&[V]>) -> Self {
        for v in values.unwrap_or_default() {
            self.pairs.push((key.to_string(), v.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Encoded `k=v&k=v` form, without the leading `?`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends this query to `path`, adding `?` only when there is something to add.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.encode())
        }
    }
}
