use super::{api, body_without, required_id, required_str};
use crate::ipc::error::{api_err, ok};
use crate::ipc::types::{AppState, Request};

fn handle_subjects_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.get("/subjects", &[]) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_subjects_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    if let Err(e) = required_str(req, "name") {
        return e;
    }
    let body = match body_without(req, &[]) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.post("/subjects", body) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_subjects_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let subject_id = match required_id(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let body = match body_without(req, &["subjectId"]) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.put(&format!("/subjects/{}", subject_id), body) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_subjects_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let subject_id = match required_id(req, "subjectId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.delete(&format!("/subjects/{}", subject_id)) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "subjects.list" => Some(handle_subjects_list(state, req)),
        "subjects.create" => Some(handle_subjects_create(state, req)),
        "subjects.update" => Some(handle_subjects_update(state, req)),
        "subjects.delete" => Some(handle_subjects_delete(state, req)),
        _ => None,
    }
}
