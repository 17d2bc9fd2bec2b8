
use homeroomd::chart::{align_series, build_exam_axis};
use test_support::{point, subject};

#[test]
fn gap_in_the_middle_becomes_an_explicit_null_entry() {
    // Math sat exams 1 and 3 but skipped exam 2; some other subject puts
    // exam 2 on the axis.
    let math = subject(
        "1",
        "Math",
        vec![
            point("e1", "Monthly 1", "2024-03-05", Some(80.0), Some(100.0)),
            point("e3", "Final", "2024-06-28", Some(90.0), Some(100.0)),
        ],
    );
    let english = subject(
        "2",
        "English",
        vec![point("e2", "Midterm", "2024-04-10", Some(77.0), Some(100.0))],
    );

    let axis = build_exam_axis(&[math.clone(), english]);
    assert_eq!(axis.len(), 3);

    let aligned = align_series(&math.points, &axis);
    assert_eq!(aligned.len(), 3);
    assert_eq!(aligned[0].score, Some(80.0));
    assert_eq!(aligned[1].score, None);
    assert_eq!(aligned[2].score, Some(90.0));

    // The gap keeps the axis position's exam name and date.
    assert_eq!(aligned[1].exam_name, "Midterm");
    assert_eq!(aligned[1].exam_date, "2024-04-10");
    assert_eq!(aligned[1].full_score, None);
}

#[test]
fn every_subject_aligns_to_the_full_axis_length() {
    let subjects = vec![
        subject(
            "1",
            "Math",
            vec![
                point("e1", "Monthly 1", "2024-03-05", Some(80.0), Some(100.0)),
                point("e2", "Midterm", "2024-04-10", Some(85.0), Some(100.0)),
                point("e3", "Final", "2024-06-28", Some(90.0), Some(100.0)),
            ],
        ),
        subject(
            "2",
            "English",
            vec![point("e2", "Midterm", "2024-04-10", Some(70.0), Some(100.0))],
        ),
        subject("3", "Physics", vec![]),
    ];

    let axis = build_exam_axis(&subjects);
    for s in &subjects {
        assert_eq!(align_series(&s.points, &axis).len(), axis.len());
    }
}

#[test]
fn zero_score_is_never_mistaken_for_a_gap() {
    let math = subject(
        "1",
        "Math",
        vec![
            point("e1", "Monthly 1", "2024-03-05", Some(0.0), Some(100.0)),
            point("e2", "Midterm", "2024-04-10", None, None),
        ],
    );

    let axis = build_exam_axis(std::slice::from_ref(&math));
    let aligned = align_series(&math.points, &axis);

    // A real zero stays a zero; the no-show point stays null.
    assert_eq!(aligned[0].score, Some(0.0));
    assert_eq!(aligned[1].score, None);
}

#[test]
fn gap_serializes_score_as_explicit_null() {
    let math = subject(
        "1",
        "Math",
        vec![point("e1", "Monthly 1", "2024-03-05", Some(80.0), Some(100.0))],
    );
    let english = subject(
        "2",
        "English",
        vec![point("e2", "Midterm", "2024-04-10", Some(70.0), Some(100.0))],
    );

    let axis = build_exam_axis(&[math.clone(), english]);
    let aligned = align_series(&math.points, &axis);
    let raw = serde_json::to_value(&aligned[1]).expect("serialize gap");

    assert!(raw.get("score").map(|v| v.is_null()).unwrap_or(false));
    // Chart series stay positionally aligned only because the slot exists.
    assert_eq!(raw.get("examName").and_then(|v| v.as_str()), Some("Midterm"));
}

#[test]
fn duplicate_exam_in_series_takes_the_last_point() {
    let math = subject(
        "1",
        "Math",
        vec![
            point("e1", "Monthly 1", "2024-03-05", Some(80.0), Some(100.0)),
            point("e1", "Monthly 1", "2024-03-05", Some(82.0), Some(100.0)),
        ],
    );

    let axis = build_exam_axis(std::slice::from_ref(&math));
    let aligned = align_series(&math.points, &axis);
    assert_eq!(aligned.len(), 1);
    assert_eq!(aligned[0].score, Some(82.0));
}
