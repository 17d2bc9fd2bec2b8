use super::{api, body_without, page_params, required_id, required_str};
use crate::ipc::error::{api_err, err, ok};
use crate::ipc::types::{AppState, Request};
use chrono::NaiveDate;

// Exam dates are entered by hand in the dialog; reject obviously broken ones
// here instead of round-tripping to the server.
fn validate_exam_date(req: &Request, date: &str) -> Result<(), serde_json::Value> {
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(err(
            &req.id,
            "bad_params",
            "date must be formatted YYYY-MM-DD",
            None,
        ));
    }
    Ok(())
}

fn handle_exams_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let query = match page_params(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.get("/exams", &query) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_exams_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    if let Err(e) = required_str(req, "name") {
        return e;
    }
    let date = match required_str(req, "date") {
        Ok(v) => v,
        Err(e) => return e,
    };
    if let Err(e) = validate_exam_date(req, &date) {
        return e;
    }
    let body = match body_without(req, &[]) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.post("/exams", body) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_exams_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let exam_id = match required_id(req, "examId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    if let Some(date) = req.params.get("date").and_then(|v| v.as_str()) {
        if let Err(e) = validate_exam_date(req, date) {
            return e;
        }
    }
    let body = match body_without(req, &["examId"]) {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.put(&format!("/exams/{}", exam_id), body) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

fn handle_exams_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let exam_id = match required_id(req, "examId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match api.delete(&format!("/exams/{}", exam_id)) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "exams.list" => Some(handle_exams_list(state, req)),
        "exams.create" => Some(handle_exams_create(state, req)),
        "exams.update" => Some(handle_exams_update(state, req)),
        "exams.delete" => Some(handle_exams_delete(state, req)),
        _ => None,
    }
}
