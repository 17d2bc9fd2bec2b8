use super::{api, optional_str, required_id};
use crate::api::Api;
use crate::chart::{
    align_series, build_exam_axis, build_pivot_table, parse_student_trend, StudentTrend,
};
use crate::ipc::error::{api_err, err, ok};
use crate::ipc::types::{AppState, Request};
use crate::stats::{format_stats, StatBlock};
use serde_json::json;
use std::collections::HashSet;

fn parse_subject_ids(req: &Request) -> Result<Option<Vec<String>>, serde_json::Value> {
    let Some(raw) = req.params.get("subjectIds") else {
        return Ok(None);
    };
    let Some(arr) = raw.as_array() else {
        return Err(err(&req.id, "bad_params", "subjectIds must be an array", None));
    };
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for v in arr {
        let id = if let Some(s) = v.as_str() {
            s.trim().to_string()
        } else if v.is_number() {
            v.to_string()
        } else {
            String::new()
        };
        if id.is_empty() {
            return Err(err(
                &req.id,
                "bad_params",
                "subjectIds must contain ids as strings or numbers",
                None,
            ));
        }
        if seen.insert(id.clone()) {
            out.push(id);
        }
    }
    if out.is_empty() {
        return Err(err(&req.id, "bad_params", "subjectIds must not be empty", None));
    }
    Ok(Some(out))
}

fn parse_student_ids(req: &Request) -> Result<Vec<String>, serde_json::Value> {
    let Some(arr) = req.params.get("studentIds").and_then(|v| v.as_array()) else {
        return Err(err(&req.id, "bad_params", "missing studentIds", None));
    };
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for v in arr {
        let id = if let Some(s) = v.as_str() {
            s.trim().to_string()
        } else if v.is_number() {
            v.to_string()
        } else {
            String::new()
        };
        if id.is_empty() {
            return Err(err(
                &req.id,
                "bad_params",
                "studentIds must contain ids as strings or numbers",
                None,
            ));
        }
        if seen.insert(id.clone()) {
            out.push(id);
        }
    }
    if out.is_empty() {
        return Err(err(
            &req.id,
            "bad_params",
            "studentIds must contain at least one student id",
            None,
        ));
    }
    Ok(out)
}

fn fetch_trend(
    api: &dyn Api,
    student_id: &str,
    subject_ids: Option<&[String]>,
) -> Result<StudentTrend, (String, String)> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(ids) = subject_ids {
        query.push(("subjectIds", ids.join(",")));
    }
    let raw = api
        .get(&format!("/charts/student/{}/trend", student_id), &query)
        .map_err(|e| (e.code, e.message))?;
    parse_student_trend(&raw).map_err(|e| (e.code, e.message))
}

fn handle_student_trend(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match required_id(req, "studentId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let subject_ids = match parse_subject_ids(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let generation = state.view.begin_query();
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let trend = match fetch_trend(api, &student_id, subject_ids.as_deref()) {
        Ok(v) => v,
        Err((code, message)) => return err(&req.id, &code, message, None),
    };

    let axis = build_exam_axis(&trend.subjects);
    let series = trend
        .subjects
        .iter()
        .map(|subject| {
            json!({
                "subjectId": subject.subject_id,
                "subjectName": subject.subject_name,
                "points": align_series(&subject.points, &axis)
            })
        })
        .collect::<Vec<_>>();

    let result = json!({
        "student": { "id": trend.student_id, "name": trend.student_name },
        "axis": axis,
        "series": series
    });
    if !state.view.commit(generation, result.clone()) {
        return err(&req.id, "stale_query", "superseded by a newer query", None);
    }
    ok(&req.id, result)
}

fn handle_student_compare(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_ids = match parse_student_ids(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let subject_ids = match parse_subject_ids(req) {
        Ok(v) => v,
        Err(e) => return e,
    };
    let generation = state.view.begin_query();
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };

    // Trends land in the slot of the student that requested them, so column
    // order always matches selection order, whatever the fetch order was.
    let mut trends: Vec<StudentTrend> = Vec::with_capacity(student_ids.len());
    for student_id in &student_ids {
        match fetch_trend(api, student_id, subject_ids.as_deref()) {
            Ok(trend) => trends.push(trend),
            Err((code, message)) => {
                return err(
                    &req.id,
                    &code,
                    message,
                    Some(json!({ "studentId": student_id })),
                )
            }
        }
    }

    let rows = build_pivot_table(&trends);
    let students = trends
        .iter()
        .map(|t| json!({ "id": t.student_id, "name": t.student_name }))
        .collect::<Vec<_>>();

    let result = json!({ "students": students, "rows": rows });
    if !state.view.commit(generation, result.clone()) {
        return err(&req.id, "stale_query", "superseded by a newer query", None);
    }
    ok(&req.id, result)
}

fn handle_subject_stats(state: &mut AppState, req: &Request) -> serde_json::Value {
    let exam_id = match required_id(req, "examId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let generation = state.view.begin_query();
    let api = match api(state, req) {
        Ok(v) => v,
        Err(e) => return e,
    };

    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(class_id) = optional_str(req, "classId") {
        query.push(("classId", class_id));
    }
    let raw = match api.get(&format!("/charts/exam/{}/subject-stats", exam_id), &query) {
        Ok(v) => v,
        Err(e) => return api_err(&req.id, e),
    };
    let Some(entries) = raw.as_array() else {
        return err(&req.id, "bad_response", "subject stats must be an array", None);
    };

    let mut stats = Vec::with_capacity(entries.len());
    for entry in entries {
        let subject_id = entry
            .get("subjectId")
            .map(|v| {
                v.as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| v.to_string())
            })
            .unwrap_or_default();
        let subject_name = entry
            .get("subjectName")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        // A subject with no stats yet still gets a row, rendered entirely as
        // placeholders.
        let block: StatBlock = entry
            .get("stats")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();
        stats.push(json!({
            "subjectId": subject_id,
            "subjectName": subject_name,
            "stats": format_stats(&block)
        }));
    }

    let result = json!({ "stats": stats });
    if !state.view.commit(generation, result.clone()) {
        return err(&req.id, "stale_query", "superseded by a newer query", None);
    }
    ok(&req.id, result)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "charts.studentTrend" => Some(handle_student_trend(state, req)),
        "charts.studentCompare" => Some(handle_student_compare(state, req)),
        "charts.subjectStats" => Some(handle_subject_stats(state, req)),
        _ => None,
    }
}
