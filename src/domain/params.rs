//! Query-string filters sent with list requests

use super::types::{Level, Stream};

/// `student_email` / `stream` / `level` filter accepted by every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub student_email: Option<String>,
    pub stream: Option<Stream>,
    pub level: Option<Level>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the student email (blank emails are dropped)
    pub fn student_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into().trim().to_lowercase();
        self.student_email = if email.is_empty() { None } else { Some(email) };
        self
    }

    pub fn stream(mut self, stream: Stream) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Key/value pairs with unset filters omitted
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(email) = &self.student_email {
            pairs.push(("student_email", email.clone()));
        }
        if let Some(stream) = self.stream {
            pairs.push(("stream", stream.as_str().to_string()));
        }
        if let Some(level) = self.level {
            pairs.push(("level", level.as_str().to_string()));
        }
        pairs
    }

    /// `?a=b&c=d`, or an empty string when nothing is set
    pub fn to_query_string(&self) -> String {
        encode_pairs(&self.to_pairs())
    }
}

/// Filter for `GET glossary/`: the server only honours stream and `q`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryQuery {
    pub stream: Option<Stream>,
    pub q: Option<String>,
}

impl GlossaryQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(stream) = self.stream {
            pairs.push(("stream", stream.as_str().to_string()));
        }
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }
        pairs
    }

    pub fn to_query_string(&self) -> String {
        encode_pairs(&self.to_pairs())
    }
}

/// Endpoint path for one item: `tests/{slug}/`, `readings/{slug}/`
pub fn item_path(collection: &str, slug: &str) -> String {
    format!("{}/{}/", collection, urlencoding::encode(slug))
}

fn encode_pairs(pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{}", joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_query() {
        assert_eq!(FilterParams::new().to_query_string(), "");
        assert_eq!(FilterParams::new().student_email("   ").student_email, None);
    }

    #[test]
    fn test_filter_query_string() {
        let params = FilterParams::new()
            .student_email(" Kari@Example.com ")
            .stream(Stream::Nynorsk)
            .level(Level::B1);
        assert_eq!(
            params.to_query_string(),
            "?student_email=kari%40example.com&stream=nynorsk&level=B1"
        );
    }

    #[test]
    fn test_glossary_query_skips_blank_search() {
        let query = GlossaryQuery {
            stream: None,
            q: Some("  ".to_string()),
        };
        assert!(query.to_pairs().is_empty());

        let query = GlossaryQuery {
            stream: Some(Stream::Bokmaal),
            q: Some("hus og hjem".to_string()),
        };
        assert_eq!(query.to_query_string(), "?stream=bokmaal&q=hus%20og%20hjem");
    }

    #[test]
    fn test_item_path_encodes_slug() {
        assert_eq!(item_path("tests", "a1-basis"), "tests/a1-basis/");
        assert_eq!(item_path("readings", "på hytta"), "readings/p%C3%A5%20hytta/");
    }
}
