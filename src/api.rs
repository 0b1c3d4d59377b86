//! REST Client
//!
//! Thin async bindings to the backend collections and the auth service.
//! All URLs are origin-relative; one collection per resource kind.

use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::FormModel;
use crate::query::{filter_param, QueryState};
use crate::resource::{Ref, Resource};

/// Total row count advertised by list responses.
const TOTAL_COUNT_HEADER: &str = "x-total-count";

fn check_status(resp: &Response) -> Result<(), String> {
    if resp.ok() {
        Ok(())
    } else {
        Err(format!(
            "server returned {} {}",
            resp.status(),
            resp.status_text()
        ))
    }
}

// ========================
// Collections
// ========================

/// Paginated list fetch. Returns the page of records plus the total
/// matching count; a missing count header reads as 0.
pub async fn list<R: Resource>(query: &QueryState) -> Result<(Vec<R>, u32), String> {
    let url = format!("/{}?{}", R::KIND, query.to_query_string());
    let resp = Request::get(&url).send().await.map_err(|e| e.to_string())?;
    check_status(&resp)?;
    let total = resp
        .headers()
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let rows = resp.json().await.map_err(|e| e.to_string())?;
    Ok((rows, total))
}

/// Unpaginated fetch of a whole collection (select options, drill-downs).
pub async fn list_all<R: Resource>() -> Result<Vec<R>, String> {
    let resp = Request::get(&format!("/{}", R::KIND))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check_status(&resp)?;
    resp.json().await.map_err(|e| e.to_string())
}

/// Collection filtered by one field, e.g. `GET /Bill?customerId=7`.
pub async fn list_where<R: Resource>(key: &str, value: &Value) -> Result<Vec<R>, String> {
    let url = match filter_param(key, value) {
        Some(param) => format!("/{}?{param}", R::KIND),
        None => format!("/{}", R::KIND),
    };
    let resp = Request::get(&url).send().await.map_err(|e| e.to_string())?;
    check_status(&resp)?;
    resp.json().await.map_err(|e| e.to_string())
}

/// Resolve a single referenced record.
pub async fn fetch_one<R: Resource>(reference: Ref<R>) -> Result<R, String> {
    let resp = Request::get(&format!("/{}/{}", R::KIND, reference.id()))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check_status(&resp)?;
    resp.json().await.map_err(|e| e.to_string())
}

/// Create a record from submitted form values; the backend assigns the id.
pub async fn create<R: Resource>(values: &FormModel) -> Result<R, String> {
    let resp = Request::post(&format!("/{}", R::KIND))
        .json(values)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check_status(&resp)?;
    resp.json().await.map_err(|e| e.to_string())
}

/// Update a record; the caller merges the submitted fields client-side.
pub async fn update<R: Resource>(id: u32, values: &FormModel) -> Result<(), String> {
    let resp = Request::put(&format!("/{}/{}", R::KIND, id))
        .json(values)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check_status(&resp)
}

pub async fn delete<R: Resource>(id: u32) -> Result<(), String> {
    let resp = Request::delete(&format!("/{}/{}", R::KIND, id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check_status(&resp)
}

// ========================
// Auth Service
// ========================

#[derive(Serialize)]
pub struct LoginArgs<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterArgs<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange credentials for an access token.
pub async fn login(args: &LoginArgs<'_>) -> Result<String, String> {
    let resp = Request::post("/auth/login")
        .json(args)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    let body: TokenResponse = resp.json().await.map_err(|e| e.to_string())?;
    Ok(body.access_token)
}

pub async fn register(args: &RegisterArgs<'_>) -> Result<(), String> {
    let resp = Request::post("/auth/register")
        .json(args)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(error_message(resp).await);
    }
    Ok(())
}

/// Prefer the backend's message field over the bare status line.
async fn error_message(resp: Response) -> String {
    let status = format!(
        "server returned {} {}",
        resp.status(),
        resp.status_text()
    );
    match resp.json::<Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(status),
        Err(_) => status,
    }
}
