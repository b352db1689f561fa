//! HTTP API Client
//!
//! Functions for communicating with the Norskkurs REST API. Every call sends
//! the session cookie so the backend can tell teachers from students.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use norskkurs::domain::{
    item_path, Exercise, Expression, FilterParams, GlossaryQuery, GlossaryTerm, Homework, Material,
    ProfileInfo, Reading, StreamUpdate, StudentProfile, SubmissionResponse, SubmitRequest, Test,
    TestDetail, VerbEntry,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8001/api/";

/// localStorage key for a custom API base
const API_BASE_KEY: &str = "norskkurs_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_BASE_KEY).ok().flatten())
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Endpoint paths are relative, so the base keeps its trailing slash
    format!("{}/", url.trim().trim_end_matches('/'))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_BASE_KEY, url.trim());
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

// ============ Plumbing ============

fn with_session(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body: Option<ErrorBody> = response.json().await.ok();
    Err(body
        .and_then(|b| b.detail)
        .unwrap_or_else(|| format!("Request failed ({})", status)))
}

async fn get_json<T: DeserializeOwned>(path: &str, query: &str) -> Result<T, String> {
    let url = format!("{}{}{}", get_api_base(), path, query);

    let response = with_session(Request::get(&url))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn post<B: Serialize>(path: &str, body: &B) -> Result<Response, String> {
    let url = format!("{}{}", get_api_base(), path);

    let response = with_session(Request::post(&url))
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    post(path, body)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

// ============ Tests ============

pub async fn fetch_tests(params: &FilterParams) -> Result<Vec<Test>, String> {
    get_json("tests/", &params.to_query_string()).await
}

pub async fn fetch_test(slug: &str, params: &FilterParams) -> Result<TestDetail, String> {
    get_json(&item_path("tests", slug), &params.to_query_string()).await
}

pub async fn submit_test(
    slug: &str,
    request: &SubmitRequest,
) -> Result<SubmissionResponse, String> {
    post_json(&format!("{}submit/", item_path("tests", slug)), request).await
}

// ============ Profile ============

pub async fn fetch_profile(student_email: &str) -> Result<ProfileInfo, String> {
    let params = if student_email.trim().is_empty() {
        FilterParams::new()
    } else {
        FilterParams::new().student_email(student_email.trim())
    };
    get_json("profile/me/", &params.to_query_string()).await
}

/// The backend answers 204 with no body
pub async fn logout() -> Result<(), String> {
    post("profile/logout/", &serde_json::json!({})).await.map(|_| ())
}

pub async fn update_stream(update: &StreamUpdate) -> Result<StudentProfile, String> {
    post_json("profile/stream/", update).await
}

// ============ Library ============

pub async fn fetch_materials(params: &FilterParams) -> Result<Vec<Material>, String> {
    get_json("materials/", &params.to_query_string()).await
}

pub async fn fetch_homework(params: &FilterParams) -> Result<Vec<Homework>, String> {
    get_json("homework/", &params.to_query_string()).await
}

pub async fn fetch_exercises(params: &FilterParams) -> Result<Vec<Exercise>, String> {
    get_json("exercises/", &params.to_query_string()).await
}

// ============ Vocabulary ============

pub async fn fetch_verbs(params: &FilterParams) -> Result<Vec<VerbEntry>, String> {
    get_json("verbs/", &params.to_query_string()).await
}

pub async fn fetch_expressions(params: &FilterParams) -> Result<Vec<Expression>, String> {
    get_json("expressions/", &params.to_query_string()).await
}

pub async fn fetch_glossary(query: &GlossaryQuery) -> Result<Vec<GlossaryTerm>, String> {
    get_json("glossary/", &query.to_query_string()).await
}

// ============ Readings ============

pub async fn fetch_readings(params: &FilterParams) -> Result<Vec<Reading>, String> {
    get_json("readings/", &params.to_query_string()).await
}

pub async fn fetch_reading(slug: &str) -> Result<Reading, String> {
    get_json(&item_path("readings", slug), "").await
}
