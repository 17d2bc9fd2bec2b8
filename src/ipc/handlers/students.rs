use super::{api, body_without, optional_str, page_params, required_id, required_str};
use crate::ipc::error::{api_err, ok};
use crate::ipc::types::{AppState, Request};

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let mut query = match page_params(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    if let Some(class_id) = optional_str(req, "classId") {
        query.push(("classId", class_id));
    }
    if let Some(search) = optional_str(req, "search") {
        query.push(("search", search));
    }
    match api.get("/students", &query) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    match api.post("/students", body) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_students_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let student_id = match required_id(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let body = match body_without(req, &["studentId"]) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.put(&format!("/students/{}", student_id), body) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let student_id = match required_id(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.delete(&format!("/students/{}", student_id)) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        _ => None,
    }
}
