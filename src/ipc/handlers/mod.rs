pub mod charts;
pub mod classes;
pub mod core;
pub mod exams;
pub mod leave;
pub mod students;
pub mod subjects;

use crate::api::Api;
use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};

fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

// Ids may arrive as JSON strings or numbers depending on which screen sent
// the request; both are accepted and normalized to strings.
fn required_id(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    let id = match req.params.get(key) {
        Some(v) if v.is_string() => v.as_str().unwrap_or_default().trim().to_string(),
        Some(v) if v.is_number() => v.to_string(),
        _ => String::new(),
    };
    if id.is_empty() {
        return Err(err(&req.id, "bad_params", format!("missing {}", key), None));
    }
    Ok(id)
}

fn optional_str(req: &Request, key: &str) -> Option<String> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn api<'a>(state: &'a AppState, req: &Request) -> Result<&'a dyn Api, serde_json::Value> {
    state
        .api
        .as_deref()
        .ok_or_else(|| err(&req.id, "no_session", "configure a session first", None))
}

fn page_params(req: &Request) -> Result<Vec<(&'static str, String)>, serde_json::Value> {
    let page = match req.params.get("page") {
        None => 1,
        Some(v) => match v.as_u64() {
            Some(p) if p >= 1 => p,
            _ => return Err(err(&req.id, "bad_params", "page must be >= 1", None)),
        },
    };
    let page_size = match req.params.get("pageSize") {
        None => 20,
        Some(v) => match v.as_u64() {
            Some(s) if (1..=200).contains(&s) => s,
            _ => {
                return Err(err(
                    &req.id,
                    "bad_params",
                    "pageSize must be in range 1..=200",
                    None,
                ))
            }
        },
    };
    Ok(vec![
        ("page", page.to_string()),
        ("pageSize", page_size.to_string()),
    ])
}

/// Body for a create/update call: the request params minus the routing keys,
/// which belong in the URL, not the payload.
fn body_without(req: &Request, skip: &[&str]) -> Result<serde_json::Value, serde_json::Value> {
    let Some(obj) = req.params.as_object() else {
        return Err(err(&req.id, "bad_params", "params must be an object", None));
    };
    let body: serde_json::Map<String, serde_json::Value> = obj
        .iter()
        .filter(|(k, _)| !skip.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if body.is_empty() {
        return Err(err(&req.id, "bad_params", "no fields to send", None));
    }
    Ok(serde_json::Value::Object(body))
}
