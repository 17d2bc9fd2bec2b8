use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Pseudo-subject id the remote API uses for the all-subjects total series.
/// It never appears as a pivot-table row.
pub const TOTAL_SUBJECT_ID: &str = "-1";

#[derive(Debug, Clone, Serialize)]
pub struct ChartError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ChartError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }
}

// The remote API is inconsistent about id types: list endpoints return
// numeric ids, chart endpoints return strings. Normalize both to strings so
// composite keys never collide on representation.
fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Num(f64),
    }
    Ok(match RawId::deserialize(d)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Num(n) => n.to_string(),
    })
}

/// One student's result in one subject for one exam. Absent `score`/`fullScore`
/// means the student did not sit that subject in that exam.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePoint {
    #[serde(deserialize_with = "de_id")]
    pub exam_id: String,
    pub exam_name: String,
    pub exam_date: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub full_score: Option<f64>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub total_students: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSeries {
    #[serde(deserialize_with = "de_id")]
    pub subject_id: String,
    pub subject_name: String,
    #[serde(default)]
    pub points: Vec<ScorePoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentTrend {
    #[serde(deserialize_with = "de_id")]
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub subjects: Vec<SubjectSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamRef {
    pub id: String,
    pub name: String,
    pub date: String,
}

/// One axis position of an aligned series. Gaps keep the axis position's
/// `examName`/`examDate` and serialize `score` as an explicit null; a null
/// score means "no data", never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedPoint {
    pub exam_name: String,
    pub exam_date: String,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_students: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_students: Option<i64>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.score.is_none()
            && self.full_score.is_none()
            && self.rank.is_none()
            && self.total_students.is_none()
    }
}

/// One (exam, subject) combination with one score cell per selected student,
/// positionally aligned to the selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotRow {
    pub exam_name: String,
    pub subject_name: String,
    pub scores: Vec<Cell>,
}

pub fn parse_student_trend(raw: &serde_json::Value) -> Result<StudentTrend, ChartError> {
    serde_json::from_value(raw.clone())
        .map_err(|e| ChartError::new("bad_response", format!("trend response: {}", e)))
}

fn parse_exam_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Dedupe the exams referenced anywhere in the given per-subject series into
/// one chronologically ordered axis. Ordering key is parsed date ascending;
/// ties fall back to first-seen order, and entries whose date fails to parse
/// sort after all valid dates, keeping their discovery order among themselves.
pub fn build_exam_axis(subjects: &[SubjectSeries]) -> Vec<ExamRef> {
    struct AxisEntry {
        id: String,
        name: String,
        date: String,
        parsed: Option<NaiveDateTime>,
        first_seen: usize,
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries: Vec<AxisEntry> = Vec::new();
    for subject in subjects {
        for point in &subject.points {
            if !seen.insert(point.exam_id.as_str()) {
                continue;
            }
            let first_seen = entries.len();
            entries.push(AxisEntry {
                id: point.exam_id.clone(),
                name: point.exam_name.clone(),
                date: point.exam_date.clone(),
                parsed: parse_exam_date(&point.exam_date),
                first_seen,
            });
        }
    }

    entries.sort_by(|a, b| match (&a.parsed, &b.parsed) {
        (Some(x), Some(y)) => x.cmp(y).then(a.first_seen.cmp(&b.first_seen)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.first_seen.cmp(&b.first_seen),
    });

    entries
        .into_iter()
        .map(|e| ExamRef {
            id: e.id,
            name: e.name,
            date: e.date,
        })
        .collect()
}

/// Reindex one subject's sparse points onto the axis, one entry per axis
/// position. Output length always equals axis length.
pub fn align_series(points: &[ScorePoint], axis: &[ExamRef]) -> Vec<AlignedPoint> {
    let mut by_exam: HashMap<&str, &ScorePoint> = HashMap::new();
    for point in points {
        if by_exam.insert(point.exam_id.as_str(), point).is_some() {
            // Last write wins, but a subject reporting the same exam twice is
            // a data anomaly worth surfacing.
            tracing::warn!(exam_id = %point.exam_id, "duplicate exam id in subject series");
        }
    }

    axis.iter()
        .map(|exam| match by_exam.get(exam.id.as_str()) {
            Some(point) => AlignedPoint {
                exam_name: point.exam_name.clone(),
                exam_date: point.exam_date.clone(),
                score: point.score,
                full_score: point.full_score,
                rank: point.rank,
                total_students: point.total_students,
            },
            None => AlignedPoint {
                exam_name: exam.name.clone(),
                exam_date: exam.date.clone(),
                score: None,
                full_score: None,
                rank: None,
                total_students: None,
            },
        })
        .collect()
}

// Ids and names compose into one key so a numeric-looking id can never
// collide with a renamed exam/subject sharing the digits.
fn composite_key(id: &str, name: &str) -> String {
    format!("{}#{}", id, name)
}

/// Pivot per-student trends into one row per (exam, subject) pair that has at
/// least one populated cell. Every row carries exactly one cell per student,
/// indexed by selection order; a student with no data for a pair keeps an
/// empty cell rather than shifting anyone else's column.
///
/// Rows come out in lexicographic `examId#examName` / `subjectId#subjectName`
/// order. That deliberately differs from the chart axis, which is
/// chronological; the table view has always sorted this way.
pub fn build_pivot_table(students: &[StudentTrend]) -> Vec<PivotRow> {
    let slots = students.len();
    let mut exam_keys: BTreeMap<String, String> = BTreeMap::new();
    let mut subject_keys: BTreeMap<String, String> = BTreeMap::new();
    let mut cells: HashMap<(String, String), Vec<Cell>> = HashMap::new();

    for (slot, student) in students.iter().enumerate() {
        for subject in &student.subjects {
            if subject.subject_id == TOTAL_SUBJECT_ID {
                continue;
            }
            let subject_key = composite_key(&subject.subject_id, &subject.subject_name);
            subject_keys
                .entry(subject_key.clone())
                .or_insert_with(|| subject.subject_name.clone());
            for point in &subject.points {
                let exam_key = composite_key(&point.exam_id, &point.exam_name);
                exam_keys
                    .entry(exam_key.clone())
                    .or_insert_with(|| point.exam_name.clone());
                let row = cells
                    .entry((exam_key, subject_key.clone()))
                    .or_insert_with(|| vec![Cell::default(); slots]);
                row[slot] = Cell {
                    score: point.score,
                    full_score: point.full_score,
                    rank: point.rank,
                    total_students: point.total_students,
                };
            }
        }
    }

    let mut rows = Vec::new();
    for (exam_key, exam_name) in &exam_keys {
        for (subject_key, subject_name) in &subject_keys {
            let Some(row) = cells.get(&(exam_key.clone(), subject_key.clone())) else {
                continue;
            };
            if row.iter().all(Cell::is_empty) {
                continue;
            }
            rows.push(PivotRow {
                exam_name: exam_name.clone(),
                subject_name: subject_name.clone(),
                scores: row.clone(),
            });
        }
    }
    rows
}
