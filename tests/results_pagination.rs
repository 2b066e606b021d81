mod common;

use common::{Reply, ScriptedSession, component, page, page_path, raw_result};
use serde_json::{Value, json};
use smartschool::{
    ResultWithoutDetails, Results, SmartschoolError,
    objects::{Component, GraphicValue},
};

fn collect_ok(session: &ScriptedSession) -> Vec<ResultWithoutDetails> {
    Results::new(session)
        .iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("all pages decode")
}

fn component_name(result: &ResultWithoutDetails) -> Option<&str> {
    result.component.as_ref().map(|c: &Component| c.name.as_str())
}

#[test]
fn full_pages_continue_and_short_page_stops() {
    let session = ScriptedSession::new([
        Reply::Body(page(0, 50)),
        Reply::Body(page(50, 50)),
        Reply::Body(page(100, 3)),
    ]);

    let results = collect_ok(&session);

    assert_eq!(results.len(), 103);
    assert_eq!(session.requests(), vec![page_path(1), page_path(2), page_path(3)]);
    assert_eq!(results[0].identifier, "49_10880_0_normal_0");
    assert_eq!(results[102].identifier, "49_10880_0_normal_102");
}

#[test]
fn full_last_page_triggers_one_more_request() {
    let session = ScriptedSession::new([Reply::Body(page(0, 50)), Reply::Body(json!([]))]);

    let results = collect_ok(&session);

    assert_eq!(results.len(), 50);
    assert_eq!(session.requests(), vec![page_path(1), page_path(2)]);
}

#[test]
fn empty_first_page_yields_nothing() {
    let session = ScriptedSession::new([Reply::Body(json!([]))]);

    assert!(collect_ok(&session).is_empty());
    assert_eq!(session.requests(), vec![page_path(1)]);
}

#[test]
fn pages_are_fetched_on_demand() {
    let session = ScriptedSession::new([Reply::Body(page(0, 50)), Reply::Body(page(50, 1))]);
    let mut iter = Results::new(&session).iter();

    assert!(session.requests().is_empty());
    for _ in 0..50 {
        iter.next().expect("element").expect("decodes");
    }
    assert_eq!(session.requests().len(), 1);

    iter.next().expect("element").expect("decodes");
    assert_eq!(session.requests().len(), 2);
    assert!(iter.next().is_none());
}

#[test]
fn component_carries_forward_within_and_across_pages() {
    let mut first = page(0, 50);
    first[0]["component"] = component("Math");
    first[37]["component"] = Value::Null;
    first[45]["component"] = component("Science");

    let session = ScriptedSession::new([Reply::Body(first), Reply::Body(page(50, 10))]);

    let results = collect_ok(&session);

    assert_eq!(results.len(), 60);
    assert_eq!(session.requests().len(), 2);
    assert_eq!(component_name(&results[0]), Some("Math"));
    assert_eq!(component_name(&results[37]), Some("Math"));
    assert_eq!(component_name(&results[44]), Some("Math"));
    assert_eq!(component_name(&results[45]), Some("Science"));
    assert!(
        results[50..]
            .iter()
            .all(|r| component_name(r) == Some("Science"))
    );
}

#[test]
fn explicit_component_is_kept_verbatim() {
    let session = ScriptedSession::new([Reply::Body(json!([
        raw_result(1, Some(component("Frans"))),
        raw_result(2, Some(component("Engels"))),
    ]))]);

    let results = collect_ok(&session);

    assert_eq!(
        results[0].component,
        Some(Component {
            id:           Some(5),
            name:         "Frans".into(),
            abbreviation: "Fr".into(),
        })
    );
    assert_eq!(component_name(&results[1]), Some("Engels"));
}

#[test]
fn component_stays_absent_without_predecessor() {
    let session = ScriptedSession::new([Reply::Body(json!([
        raw_result(1, None),
        raw_result(2, Some(Value::Null)),
        raw_result(3, Some(component("Latijn"))),
        raw_result(4, None),
    ]))]);

    let results = collect_ok(&session);

    assert_eq!(results[0].component, None);
    assert_eq!(results[1].component, None);
    assert_eq!(component_name(&results[3]), Some("Latijn"));
}

#[test]
fn no_grade_placeholder_becomes_negative_percentage() {
    let mut ungraded = raw_result(1, None);
    ungraded["graphic"] = json!({"type": "value", "color": "grey", "value": "—"});
    let mut lettered = raw_result(2, None);
    lettered["graphic"] = json!({"type": "value", "value": "AA"});

    let session = ScriptedSession::new([Reply::Body(json!([ungraded, lettered]))]);

    let results = collect_ok(&session);

    assert_eq!(results[0].graphic.value, GraphicValue::Number((-1).into()));
    assert_eq!(results[0].graphic.kind, "percentage");
    assert_eq!(results[0].graphic.color.as_deref(), Some("grey"));
    assert_eq!(results[1].graphic.value, GraphicValue::Text("AA".into()));
    assert_eq!(results[1].graphic.kind, "value");
    assert_eq!(results[1].graphic.value.as_f64(), None);
}

#[test]
fn missing_first_page_fails_before_any_element() {
    for reply in [Reply::Missing, Reply::Empty] {
        let session = ScriptedSession::new([reply]);
        let mut iter = Results::new(&session).iter();

        match iter.next() {
            Some(Err(SmartschoolError::Download(message))) => {
                assert_eq!(message, "No JSON was returned for the results?!")
            }
            other => panic!("expected a download error, got {other:?}"),
        }
        assert!(iter.next().is_none());
        assert_eq!(session.requests(), vec![page_path(1)]);
    }
}

#[test]
fn failure_on_third_page_keeps_earlier_elements() {
    let session = ScriptedSession::new([
        Reply::Body(page(0, 50)),
        Reply::Body(page(50, 50)),
        Reply::Missing,
    ]);
    let mut iter = Results::new(&session).iter();

    let mut yielded = 0;
    let error = loop {
        match iter.next() {
            Some(Ok(_)) => yielded += 1,
            Some(Err(err)) => break err,
            None => panic!("iteration ended without an error"),
        }
    };

    assert_eq!(yielded, 100);
    assert!(error.is_download());
    assert!(iter.next().is_none());
    assert_eq!(session.requests().len(), 3);
}

#[test]
fn session_errors_pass_through() {
    let session = ScriptedSession::new([Reply::Fail("connection reset")]);
    let mut iter = Results::new(&session).iter();

    match iter.next() {
        Some(Err(SmartschoolError::Session(err))) => {
            assert_eq!(err.to_string(), "connection reset")
        }
        other => panic!("expected a session error, got {other:?}"),
    }
    assert!(iter.next().is_none());
}

#[test]
fn malformed_page_is_a_json_error() {
    let session = ScriptedSession::new([Reply::Raw("<html>login</html>")]);
    let mut iter = Results::new(&session).iter();

    assert!(matches!(iter.next(), Some(Err(SmartschoolError::Json(_)))));
    assert!(iter.next().is_none());
}

#[test]
fn reiterating_starts_over_with_fresh_state() {
    let mut first_pass = page(0, 2);
    first_pass[0]["component"] = component("Math");

    let session = ScriptedSession::new([
        Reply::Body(first_pass),
        Reply::Body(page(10, 1)),
    ]);
    let results = Results::new(&session);

    let first: Vec<_> = results.iter().map(|r| r.expect("decodes")).collect();
    let second: Vec<_> = (&results).into_iter().map(|r| r.expect("decodes")).collect();

    assert_eq!(component_name(&first[1]), Some("Math"));
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].component, None);
    assert_eq!(session.requests(), vec![page_path(1), page_path(1)]);
}
