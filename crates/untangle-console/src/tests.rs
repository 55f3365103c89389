use super::*;

fn visitor(event: &str) -> EventVisitor {
    EventVisitor {
        event: Some(event.to_string()),
        strategy: Some("Greedy".to_string()),
        ..EventVisitor::default()
    }
}

#[test]
fn test_duration_formatting() {
    assert_eq!(format_duration_ms(250), "250ms");
    assert_eq!(format_duration_ms(1_500), "1.50s");
    assert_eq!(format_duration_ms(125_000), "2m 5s");
}

#[test]
fn test_reduction_sign() {
    assert!(format_reduction(3).contains("-3 crossings"));
    assert!(format_reduction(-2).contains("+2 crossings"));
    assert!(format_reduction(0).contains("±0"));
}

#[test]
fn test_unknown_event_is_silent() {
    assert!(format_event(&visitor("dispatch"), Level::INFO).is_empty());
    assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
}

#[test]
fn test_search_start_only_on_first_step() {
    let mut v = visitor("search_start");
    v.intersections = Some(1_234);
    v.step = Some(2);
    assert!(format_event(&v, Level::INFO).is_empty());

    v.step = Some(1);
    let line = format_event(&v, Level::INFO);
    assert!(line.contains("Greedy"));
    assert!(line.contains("1,234"));
}

#[test]
fn test_search_end_shows_node_or_no_move() {
    let mut v = visitor("search_end");
    v.node_id = Some(7);
    v.reduction = Some(2);
    v.candidates = Some(12_000);
    let line = format_event(&v, Level::INFO);
    assert!(line.contains("node    7"));
    assert!(line.contains("12,000"));

    v.node_id = Some(-1);
    assert!(format_event(&v, Level::INFO).contains("no move"));
}

#[test]
fn test_session_end_summary_box() {
    let mut v = visitor("session_end");
    v.status = Some("solved".to_string());
    v.initial = Some(5);
    v.remaining = Some(0);
    v.moves = Some(3);
    let out = format_event(&v, Level::INFO);
    assert!(out.contains("PLANAR LAYOUT FOUND"));
    assert!(out.contains("Initial crossings:"));

    v.status = Some("stuck".to_string());
    assert!(format_event(&v, Level::INFO).contains("CROSSINGS REMAIN"));
}

#[test]
fn test_candidate_lines_need_trace() {
    let mut v = visitor("improving_candidate");
    v.node_id = Some(1);
    v.reduction = Some(1);
    assert!(format_event(&v, Level::DEBUG).is_empty());
    assert!(format_event(&v, Level::TRACE).contains("Candidate node"));
}

#[test]
fn test_bench_run_line() {
    let mut v = visitor("bench_run");
    v.puzzle = Some(4);
    v.status = Some("move_limit".to_string());
    let line = format_event(&v, Level::INFO);
    assert!(line.contains("move_limit"));
    assert!(line.contains("puzzle   4"));
}
