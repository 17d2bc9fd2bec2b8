use super::{api, body_without, required_id, required_str};
use crate::ipc::error::{api_err, ok};
use crate::ipc::types::{AppState, Request};

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    // The class directory is small; no pagination on this screen.
    match api.get("/classes", &[]) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_classes_create(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    match api.post("/classes", body) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_classes_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let class_id = match required_id(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let body = match body_without(req, &["classId"]) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.put(&format!("/classes/{}", class_id), body) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_classes_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let class_id = match required_id(req, "classId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.delete(&format!("/classes/{}", class_id)) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_classes_list(state, req)),
        "classes.create" => Some(handle_classes_create(state, req)),
        "classes.update" => Some(handle_classes_update(state, req)),
        "classes.delete" => Some(handle_classes_delete(state, req)),
        _ => None,
    }
}
