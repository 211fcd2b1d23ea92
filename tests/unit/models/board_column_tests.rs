// Unit tests for board columns and status transitions

use release_calendar::models::board::{
    column_by_id, column_for_status, group_by_column, is_completed, is_known_status,
    BOARD_COLUMNS, STATUSES,
};
use test_case::test_case;

#[test_case("Open", "todo")]
#[test_case("Not Started", "todo")]
#[test_case("On Hold", "todo")]
#[test_case("Suspended", "todo")]
#[test_case("In Progress", "progress")]
#[test_case("Awaiting Development", "progress")]
#[test_case("Awaiting Developer Reply", "progress")]
#[test_case("Business Attention", "progress")]
#[test_case("Lead Attention", "progress")]
#[test_case("Completed - Awaiting Closure", "done")]
#[test_case("Completed", "done")]
fn test_status_column(status: &str, column_id: &str) {
    let column = column_for_status(status).expect("status should map to a column");
    assert_eq!(column.id, column_id);
}

#[test_case("todo", "Not Started")]
#[test_case("progress", "In Progress")]
#[test_case("done", "Completed - Awaiting Closure")]
fn test_drop_on_column_sets_first_status(column_id: &str, expected: &str) {
    let column = column_by_id(column_id).unwrap();
    assert_eq!(column.target_status(), expected);
    assert!(is_known_status(column.target_status()));
}

#[test_case("Completed", true)]
#[test_case("Completed - Awaiting Closure", true)]
#[test_case("In Progress", false)]
#[test_case("Open", false)]
fn test_completed_statuses(status: &str, completed: bool) {
    assert_eq!(is_completed(status), completed);
}

#[test]
fn test_unknown_status_has_no_column() {
    assert!(column_for_status("Chiuso").is_none());
    assert!(!is_known_status("Chiuso"));
}

#[test]
fn test_columns_cover_vocabulary() {
    let total: usize = BOARD_COLUMNS.iter().map(|c| c.statuses.len()).sum();
    assert_eq!(total, STATUSES.len());
}

#[test]
fn test_group_preserves_input_order_and_skips_unknown() {
    let cards = vec![
        ("a", "In Progress"),
        ("b", "Open"),
        ("c", "Lead Attention"),
        ("d", "Unknown"),
    ];

    let grouped = group_by_column(&cards, |card| card.1);
    let ids: Vec<(&str, Vec<&str>)> = grouped
        .iter()
        .map(|(column, cards)| (column.id, cards.iter().map(|c| c.0).collect()))
        .collect();

    assert_eq!(
        ids,
        vec![
            ("todo", vec!["b"]),
            ("progress", vec!["a", "c"]),
            ("done", vec![]),
        ]
    );
}
