//! Norskkurs REST API client
//!
//! Thin async wrapper over the backend's JSON endpoints. The session cookie
//! set by the backend is kept for the lifetime of the client.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use crate::config::ApiConfig;
use crate::domain::{
    item_path, Exercise, Expression, FilterParams, GlossaryQuery, GlossaryTerm, Homework, Material,
    ProfileInfo, Reading, StreamUpdate, StudentProfile, SubmissionResponse, SubmitRequest, Test,
    TestDetail, VerbEntry,
};

/// REST API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base(&config.base_url),
        })
    }

    /// Client against `base_url` with default settings
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Self::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &str) -> String {
        format!("{}{}{}", self.base_url, path, query)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &str) -> Result<T, ApiError> {
        let url = self.url(path, query);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_send(e, &url))?;

        Self::decode(response, &url).await
    }

    /// Send a POST; returns the response with the URL it went to
    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(reqwest::Response, String), ApiError> {
        let url = self.url(path, "");
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::from_send(e, &url))?;

        Ok((response, url))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let (response, url) = self.post(path, body).await?;
        Self::decode(response, &url).await
    }

    async fn ensure_success(
        response: reqwest::Response,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status.as_u16(), &text);
        tracing::warn!(%url, error = %error, "Request failed");
        Err(error)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &str,
    ) -> Result<T, ApiError> {
        let bytes = Self::ensure_success(response, url).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%url, error = %e, "Unexpected response body");
            ApiError::Decode(e.to_string())
        })
    }

    // ============================================
    // TESTS
    // ============================================

    pub async fn list_tests(&self, params: &FilterParams) -> Result<Vec<Test>, ApiError> {
        self.get_json("tests/", &params.to_query_string()).await
    }

    pub async fn get_test(&self, slug: &str, params: &FilterParams) -> Result<TestDetail, ApiError> {
        let path = item_path("tests", slug);
        self.get_json(&path, &params.to_query_string()).await
    }

    pub async fn submit_test(
        &self,
        slug: &str,
        request: &SubmitRequest,
    ) -> Result<SubmissionResponse, ApiError> {
        let path = format!("{}submit/", item_path("tests", slug));
        self.post_json(&path, request).await
    }

    // ============================================
    // PROFILE
    // ============================================

    pub async fn profile(&self, student_email: Option<&str>) -> Result<ProfileInfo, ApiError> {
        let params = match student_email {
            Some(email) => FilterParams::new().student_email(email),
            None => FilterParams::new(),
        };
        self.get_json("profile/me/", &params.to_query_string()).await
    }

    /// Ends the session; the backend answers 204 with no body
    pub async fn logout(&self) -> Result<(), ApiError> {
        let (response, url) = self.post("profile/logout/", &serde_json::json!({})).await?;
        Self::ensure_success(response, &url).await?;
        Ok(())
    }

    pub async fn update_stream(&self, update: &StreamUpdate) -> Result<StudentProfile, ApiError> {
        self.post_json("profile/stream/", update).await
    }

    // ============================================
    // CONTENT
    // ============================================

    pub async fn materials(&self, params: &FilterParams) -> Result<Vec<Material>, ApiError> {
        self.get_json("materials/", &params.to_query_string()).await
    }

    pub async fn homework(&self, params: &FilterParams) -> Result<Vec<Homework>, ApiError> {
        self.get_json("homework/", &params.to_query_string()).await
    }

    pub async fn exercises(&self, params: &FilterParams) -> Result<Vec<Exercise>, ApiError> {
        self.get_json("exercises/", &params.to_query_string()).await
    }

    pub async fn verbs(&self, params: &FilterParams) -> Result<Vec<VerbEntry>, ApiError> {
        self.get_json("verbs/", &params.to_query_string()).await
    }

    pub async fn expressions(&self, params: &FilterParams) -> Result<Vec<Expression>, ApiError> {
        self.get_json("expressions/", &params.to_query_string()).await
    }

    pub async fn readings(&self, params: &FilterParams) -> Result<Vec<Reading>, ApiError> {
        self.get_json("readings/", &params.to_query_string()).await
    }

    pub async fn get_reading(&self, slug: &str) -> Result<Reading, ApiError> {
        let path = item_path("readings", slug);
        self.get_json(&path, "").await
    }

    pub async fn glossary(&self, query: &GlossaryQuery) -> Result<Vec<GlossaryTerm>, ApiError> {
        self.get_json("glossary/", &query.to_query_string()).await
    }
}

/// Ensure exactly one trailing slash so relative paths append cleanly
fn normalize_base(base: &str) -> String {
    format!("{}/", base.trim().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnswerPayload, Level, Stream};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::with_base_url(&format!("{}/api", server.uri())).unwrap()
    }

    fn test_json(slug: &str, level: &str) -> serde_json::Value {
        serde_json::json!({
            "id": 1, "title": "Test", "slug": slug, "description": "",
            "level": level, "stream": "bokmaal", "estimated_minutes": 10,
            "question_count": 3, "question_mode": "single", "is_restricted": false
        })
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:8001/api"), "http://localhost:8001/api/");
        assert_eq!(normalize_base("http://localhost:8001/api//"), "http://localhost:8001/api/");
    }

    #[tokio::test]
    async fn test_list_tests_sends_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tests/"))
            .and(query_param("stream", "nynorsk"))
            .and(query_param("level", "B1"))
            .and(query_param("student_email", "kari@example.com"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([test_json("b1", "B1")])),
            )
            .mount(&server)
            .await;

        let params = FilterParams::new()
            .student_email("kari@example.com")
            .stream(Stream::Nynorsk)
            .level(Level::B1);
        let tests = client(&server).list_tests(&params).await.unwrap();
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].level, Level::B1);
    }

    #[tokio::test]
    async fn test_restricted_test_returns_detail() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tests/b2-exam/"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"detail": "This test is assigned to another student."})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .get_test("b2-exam", &FilterParams::new())
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
        assert!(err.to_string().contains("assigned to another student"));
    }

    #[tokio::test]
    async fn test_submit_posts_answers() {
        let server = MockServer::start().await;

        let request = SubmitRequest {
            answers: vec![AnswerPayload {
                question: 5,
                selected_option: Some(50),
                text_response: String::new(),
            }],
            name: "Kari".to_string(),
            email: "kari@example.com".to_string(),
            locale: "nb".to_string(),
        };

        Mock::given(method("POST"))
            .and(path("/api/tests/a1-start/submit/"))
            .and(body_json(serde_json::json!({
                "answers": [{"question": 5, "selected_option": 50, "text_response": ""}],
                "name": "Kari", "email": "kari@example.com", "locale": "nb"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "summary": {"score": 1, "total_questions": 1, "percent": 100.0, "correct": 1, "incorrect": 0},
                "submission": {"id": 3, "test": 1, "name": "Kari", "email": "kari@example.com",
                               "score": 1, "total_questions": 1, "percent": 100.0,
                               "created_at": "2024-05-01T10:00:00Z"},
                "review": [{"question": 5, "order": 1, "text": "Hei?", "question_type": "single",
                            "selected_text": "Hei", "correct_answers": ["Hei"], "is_correct": true,
                            "explanation": ""}]
            })))
            .mount(&server)
            .await;

        let response = client(&server).submit_test("a1-start", &request).await.unwrap();
        assert_eq!(response.summary.score, 1);
        assert!(response.review[0].is_correct);
    }

    #[tokio::test]
    async fn test_glossary_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/glossary/"))
            .and(query_param("q", "hus"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "term": "hus", "translation_en": "house", "stream": "bokmaal",
                 "level": "A1", "tags": null}
            ])))
            .mount(&server)
            .await;

        let query = GlossaryQuery {
            stream: None,
            q: Some("hus".to_string()),
        };
        let terms = client(&server).glossary(&query).await.unwrap();
        assert_eq!(terms[0].translation_en, "house");
        assert!(terms[0].tags.is_empty());
    }

    #[tokio::test]
    async fn test_stream_update_and_logout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/profile/stream/"))
            .and(body_json(serde_json::json!({"email": "ola@example.com", "level": "A2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "email": "ola@example.com", "stream": "bokmaal", "level": "A2",
                "allow_stream_change": true, "teacher": null
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/profile/logout/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = client(&server);
        let profile = api
            .update_stream(&StreamUpdate {
                email: "ola@example.com".to_string(),
                stream: None,
                level: Some(Level::A2),
            })
            .await
            .unwrap();
        assert_eq!(profile.level, Level::A2);
        api.logout().await.unwrap();
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/verbs/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = client(&server).verbs(&FilterParams::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let api = ApiClient::with_base_url("http://127.0.0.1:9/api/").unwrap();
        let err = api.readings(&FilterParams::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Unavailable(_) | ApiError::Timeout | ApiError::Request(_)));
    }
}
