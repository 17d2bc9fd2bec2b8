
use homeroomd::chart::{build_pivot_table, Cell};
use test_support::{point, subject, trend};

#[test]
fn two_student_rows_align_cells_to_selection_order() {
    let a = trend(
        "s1",
        "Alice",
        vec![subject(
            "1",
            "Math",
            vec![
                point("e1", "E1", "2024-03-05", Some(80.0), Some(100.0)),
                point("e2", "E2", "2024-04-10", Some(85.0), Some(100.0)),
            ],
        )],
    );
    let b = trend(
        "s2",
        "Bob",
        vec![subject(
            "1",
            "Math",
            vec![point("e1", "E1", "2024-03-05", Some(75.0), Some(100.0))],
        )],
    );

    let rows = build_pivot_table(&[a, b]);
    assert_eq!(rows.len(), 2);

    let e1 = &rows[0];
    assert_eq!(e1.exam_name, "E1");
    assert_eq!(e1.subject_name, "Math");
    assert_eq!(e1.scores.len(), 2);
    assert_eq!(e1.scores[0].score, Some(80.0));
    assert_eq!(e1.scores[1].score, Some(75.0));

    // Bob has nothing at E2 but still occupies his slot.
    let e2 = &rows[1];
    assert_eq!(e2.scores[0].score, Some(85.0));
    assert_eq!(e2.scores[1], Cell::default());
}

#[test]
fn first_column_stays_first_even_when_its_data_is_sparse() {
    // Selection order is [Alice, Bob]; Alice has no Math data at all. Her
    // column must stay the empty first slot rather than Bob's data sliding in.
    let a = trend("s1", "Alice", vec![]);
    let b = trend(
        "s2",
        "Bob",
        vec![subject(
            "1",
            "Math",
            vec![point("e1", "E1", "2024-03-05", Some(75.0), Some(100.0))],
        )],
    );

    let rows = build_pivot_table(&[a, b]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].scores.len(), 2);
    assert!(rows[0].scores[0].is_empty());
    assert_eq!(rows[0].scores[1].score, Some(75.0));
}

#[test]
fn aggregate_total_pseudo_subject_is_excluded() {
    let a = trend(
        "s1",
        "Alice",
        vec![
            subject(
                "1",
                "Math",
                vec![point("e1", "E1", "2024-03-05", Some(80.0), Some(100.0))],
            ),
            subject(
                "-1",
                "Total",
                vec![point("e1", "E1", "2024-03-05", Some(530.0), Some(750.0))],
            ),
        ],
    );

    let rows = build_pivot_table(std::slice::from_ref(&a));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].subject_name, "Math");
}

#[test]
fn rows_come_out_in_lexicographic_exam_then_subject_order() {
    // Table order is lexicographic on the composite keys, which is not the
    // chart's chronological order ("e10" sorts before "e9").
    let a = trend(
        "s1",
        "Alice",
        vec![
            subject(
                "2",
                "English",
                vec![
                    point("e9", "Monthly 9", "2024-03-05", Some(70.0), Some(100.0)),
                    point("e10", "Monthly 10", "2024-04-10", Some(71.0), Some(100.0)),
                ],
            ),
            subject(
                "1",
                "Math",
                vec![point("e9", "Monthly 9", "2024-03-05", Some(80.0), Some(100.0))],
            ),
        ],
    );

    let rows = build_pivot_table(std::slice::from_ref(&a));
    let order: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.exam_name.as_str(), r.subject_name.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Monthly 10", "English"),
            ("Monthly 9", "Math"),
            ("Monthly 9", "English"),
        ]
    );
}

#[test]
fn pairs_with_no_populated_cell_are_omitted() {
    // A point that carries no score, full score, or rank leaves its cell
    // empty, and a pair with only empty cells emits no row.
    let a = trend(
        "s1",
        "Alice",
        vec![subject(
            "1",
            "Math",
            vec![
                point("e1", "E1", "2024-03-05", None, None),
                point("e2", "E2", "2024-04-10", Some(85.0), Some(100.0)),
            ],
        )],
    );

    let rows = build_pivot_table(std::slice::from_ref(&a));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].exam_name, "E2");
}

#[test]
fn rank_and_totals_travel_with_the_cell() {
    let mut p = point("e1", "E1", "2024-03-05", Some(80.0), Some(100.0));
    p.rank = Some(5);
    p.total_students = Some(42);
    let a = trend("s1", "Alice", vec![subject("1", "Math", vec![p])]);

    let rows = build_pivot_table(std::slice::from_ref(&a));
    assert_eq!(rows[0].scores[0].rank, Some(5));
    assert_eq!(rows[0].scores[0].total_students, Some(42));
}
