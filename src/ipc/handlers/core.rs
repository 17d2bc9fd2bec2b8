use super::required_str;
use crate::api::HttpApi;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn handle_health(state: &AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "sessionConfigured": state.api.is_some()
        }),
    )
}

fn handle_session_configure(state: &mut AppState, req: &Request) -> serde_json::Value {
    let base_url = match required_str(req, "baseUrl") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let token = match required_str(req, "token") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let timeout_secs = match req.params.get("timeoutSecs") {
        None => DEFAULT_TIMEOUT_SECS,
        Some(v) => match v.as_u64() {
            Some(t) if t >= 1 => t,
            _ => return err(&req.id, "bad_params", "timeoutSecs must be >= 1", None),
        },
    };

    match HttpApi::new(&base_url, &token, timeout_secs) {
        Ok(api) => {
            state.api = Some(Box::new(api));
            state.view.clear();
            tracing::info!(%base_url, "session configured");
            ok(&req.id, json!({ "baseUrl": base_url }))
        }
        Err(e) => err(&req.id, "session_failed", e.to_string(), None),
    }
}

fn handle_session_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.api = None;
    state.view.clear();
    ok(&req.id, json!({}))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "session.configure" => Some(handle_session_configure(state, req)),
        "session.clear" => Some(handle_session_clear(state, req)),
        _ => None,
    }
}
