//! Links into the backend's admin site

/// Default admin host (the backend serves `/admin/` next to `/api/`)
pub const DEFAULT_ADMIN_URL: &str = "http://localhost:8001";

/// Login, logout and panel URLs derived from one admin host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminLinks {
    base: String,
}

impl Default for AdminLinks {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_URL)
    }
}

impl AdminLinks {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Derive the admin host from an API base such as `http://host/api/`
    pub fn from_api_base(api_base: &str) -> Self {
        let trimmed = api_base.trim().trim_end_matches('/');
        Self::new(trimmed.strip_suffix("/api").unwrap_or(trimmed))
    }

    pub fn login(&self) -> String {
        format!("{}/admin/login/?next=/admin/", self.base)
    }

    pub fn logout(&self) -> String {
        format!("{}/admin/logout/?next=/", self.base)
    }

    pub fn panel(&self) -> String {
        format!("{}/admin/", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_links() {
        let links = AdminLinks::default();
        assert_eq!(links.login(), "http://localhost:8001/admin/login/?next=/admin/");
        assert_eq!(links.logout(), "http://localhost:8001/admin/logout/?next=/");
        assert_eq!(links.panel(), "http://localhost:8001/admin/");
    }

    #[test]
    fn test_from_api_base() {
        let links = AdminLinks::from_api_base("https://norsk.example.com/api/");
        assert_eq!(links.panel(), "https://norsk.example.com/admin/");

        let links = AdminLinks::new("https://admin.example.com/");
        assert_eq!(links.panel(), "https://admin.example.com/admin/");
    }
}
