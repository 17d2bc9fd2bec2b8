
use homeroomd::chart::build_exam_axis;
use test_support::{point, subject};

#[test]
fn axis_dedupes_exams_and_sorts_by_date() {
    let subjects = vec![
        subject(
            "1",
            "Math",
            vec![
                point("e2", "Midterm", "2024-04-10", Some(88.0), Some(100.0)),
                point("e1", "Monthly 1", "2024-03-05", Some(80.0), Some(100.0)),
            ],
        ),
        subject(
            "2",
            "English",
            vec![
                point("e1", "Monthly 1", "2024-03-05", Some(75.0), Some(100.0)),
                point("e3", "Final", "2024-06-28", Some(91.0), Some(100.0)),
            ],
        ),
    ];

    let axis = build_exam_axis(&subjects);
    let ids: Vec<&str> = axis.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2", "e3"]);
    assert_eq!(axis[0].name, "Monthly 1");
    assert_eq!(axis[2].date, "2024-06-28");
}

#[test]
fn axis_is_deterministic_and_idempotent() {
    let subjects = vec![
        subject(
            "1",
            "Math",
            vec![
                point("e5", "Mock A", "2024-05-01", Some(60.0), Some(100.0)),
                point("e4", "Mock B", "2024-05-01", Some(61.0), Some(100.0)),
            ],
        ),
        subject(
            "2",
            "English",
            vec![point("e6", "Mock C", "2024-04-01", Some(62.0), Some(100.0))],
        ),
    ];

    let first = build_exam_axis(&subjects);
    let second = build_exam_axis(&subjects);
    assert_eq!(first, second);

    // Same-date exams keep their discovery order.
    let ids: Vec<&str> = first.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e6", "e5", "e4"]);
}

#[test]
fn every_distinct_exam_appears_exactly_once() {
    let subjects = vec![
        subject(
            "1",
            "Math",
            vec![
                point("e1", "Monthly 1", "2024-03-05", Some(80.0), Some(100.0)),
                point("e2", "Midterm", "2024-04-10", Some(88.0), Some(100.0)),
            ],
        ),
        subject(
            "2",
            "English",
            vec![
                point("e2", "Midterm", "2024-04-10", Some(70.0), Some(100.0)),
                point("e1", "Monthly 1", "2024-03-05", Some(72.0), Some(100.0)),
            ],
        ),
        subject(
            "3",
            "Physics",
            vec![point("e2", "Midterm", "2024-04-10", None, None)],
        ),
    ];

    let axis = build_exam_axis(&subjects);
    assert_eq!(axis.len(), 2);
    let mut ids: Vec<&str> = axis.iter().map(|e| e.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 2);
}

#[test]
fn unparsable_dates_sort_after_valid_ones_in_discovery_order() {
    let subjects = vec![subject(
        "1",
        "Math",
        vec![
            point("bad1", "Broken A", "invalid", Some(50.0), Some(100.0)),
            point("e1", "Monthly 1", "2024-03-05", Some(80.0), Some(100.0)),
            point("bad2", "Broken B", "someday", Some(51.0), Some(100.0)),
            point("e2", "Midterm", "2024-04-10", Some(88.0), Some(100.0)),
        ],
    )];

    let axis = build_exam_axis(&subjects);
    let ids: Vec<&str> = axis.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2", "bad1", "bad2"]);
}

#[test]
fn mixed_date_formats_parse_onto_one_axis() {
    let subjects = vec![subject(
        "1",
        "Math",
        vec![
            point("e2", "Midterm", "2024-04-10 09:30:00", Some(88.0), Some(100.0)),
            point("e3", "Final", "2024/06/28", Some(91.0), Some(100.0)),
            point("e1", "Monthly 1", "2024-03-05", Some(80.0), Some(100.0)),
        ],
    )];

    let axis = build_exam_axis(&subjects);
    let ids: Vec<&str> = axis.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2", "e3"]);
}
