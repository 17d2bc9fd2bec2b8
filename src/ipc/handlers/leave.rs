use super::{api, optional_str, page_params};
use crate::ipc::error::{api_err, err, ok};
use crate::ipc::types::{AppState, Request};
use chrono::NaiveDate;

fn handle_leave_list(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    if let Some(student_id) = optional_str(req, "studentId") {
        query.push(("studentId", student_id));
    }

    let from = optional_str(req, "from");
    let to = optional_str(req, "to");
    for value in [&from, &to].into_iter().flatten() {
        if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
            return err(
                &req.id,
                "bad_params",
                "from/to must be formatted YYYY-MM-DD",
                None,
            );
        }
    }
    if let (Some(f), Some(t)) = (&from, &to) {
        if f > t {
            return err(&req.id, "bad_params", "from must be <= to", None);
        }
    }
    if let Some(f) = from {
        query.push(("from", f));
    }
    if let Some(t) = to {
        query.push(("to", t));
    }

    match api.get("/leaves", &query) {
        Ok(result) => ok(&req.id, result),
        Err(e) => api_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "leave.list" => Some(handle_leave_list(state, req)),
        _ => None,
    }
}
