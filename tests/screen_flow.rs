//! Drives the plugin library the way the Zellij shim does: events in,
//! actions out, responses fed back with the context of the request.

use std::collections::BTreeMap;

use safenet::api::{Endpoint, HttpRequest, HttpResponse, Method};
use safenet::app::{ListPane, PaneStatus};
use safenet::domain::ListKind;
use safenet::ui::Body;
use safenet::{handle_event, Action, AppState, Event, Screen, Theme};

const BASE_URL: &str = "http://relief.test:5000";

fn start(screen: Screen) -> (AppState, Vec<Action>) {
    let mut state = AppState::new(BASE_URL, Theme::default(), screen);
    let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
    (state, actions)
}

fn only_request(actions: &[Action]) -> HttpRequest {
    match actions {
        [Action::SendRequest(request)] => request.clone(),
        other => panic!("expected exactly one request, got {other:?}"),
    }
}

fn respond(request: &HttpRequest, status: u16, body: &str) -> Event {
    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    Event::WebResponse {
        context: request.context.to_map(),
        response: HttpResponse::new(status, headers, body.as_bytes().to_vec()),
    }
}

fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    handle_event(state, &event).unwrap()
}

fn titles(pane: &dyn ListPane) -> Vec<String> {
    pane.rows().into_iter().map(|row| row.title).collect()
}

#[test]
fn camps_load_then_fail_on_reload() {
    let (mut state, actions) = start(Screen::Camps);
    let request = only_request(&actions);
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, format!("{BASE_URL}/api/camps"));
    assert_eq!(request.context.endpoint, Endpoint::List(ListKind::Camps));
    assert_eq!(state.pane(ListKind::Camps).status(), PaneStatus::Loading);

    let body = r#"[
        {"id": 1, "camp_name": "GHSS Kollam", "district": "Kollam", "current_people": 120},
        {"id": 2, "camp_name": "St. Mary's", "district": "Wayanad"}
    ]"#;
    let (render, _) = send(&mut state, respond(&request, 200, body));
    assert!(render);
    assert!(matches!(
        state.pane(ListKind::Camps).status(),
        PaneStatus::Ready { total: 2, .. }
    ));
    assert_eq!(
        titles(state.pane(ListKind::Camps)),
        vec!["GHSS Kollam", "St. Mary's"]
    );

    let (_, actions) = send(&mut state, Event::Reload);
    let reload = only_request(&actions);
    send(&mut state, respond(&reload, 500, r#"{"error":"db down"}"#));

    let PaneStatus::Failed { message } = state.pane(ListKind::Camps).status() else {
        panic!("expected a failed pane");
    };
    assert_eq!(message, "Error fetching camp data");
    assert_eq!(state.pane(ListKind::Camps).visible_len(), 0);

    let vm = state.compute_viewmodel(30, 100);
    match vm.body {
        Body::Empty(empty) => {
            assert!(empty.is_error);
            assert_eq!(empty.message, "Error fetching camp data");
        }
        other => panic!("expected inline error, got {other:?}"),
    }
}

#[test]
fn only_the_last_started_fetch_is_applied() {
    let (mut state, actions) = start(Screen::Requirements);
    let first = only_request(&actions);
    let (_, actions) = send(&mut state, Event::Reload);
    let second = only_request(&actions);
    assert!(second.context.seq > first.context.seq);

    let (render, _) = send(
        &mut state,
        respond(&second, 200, r#"[{"item_name": "Rice", "district": "Kollam"}]"#),
    );
    assert!(render);

    let (render, _) = send(
        &mut state,
        respond(&first, 200, r#"[{"item_name": "Stale", "district": "Kollam"}]"#),
    );
    assert!(!render);
    assert_eq!(titles(state.pane(ListKind::Requirements)), vec!["Rice"]);
}

#[test]
fn leaving_a_screen_discards_its_pending_fetch() {
    let (mut state, actions) = start(Screen::Vehicles);
    let vehicles = only_request(&actions);

    let (_, actions) = send(&mut state, Event::SwitchScreen(Screen::Camps));
    let camps = only_request(&actions);
    assert_eq!(state.pane(ListKind::Vehicles).status(), PaneStatus::Idle);

    let (render, _) = send(
        &mut state,
        respond(&vehicles, 200, r#"[{"id": 1, "vehicle_model": "Tata Ace"}]"#),
    );
    assert!(!render);
    assert_eq!(state.pane(ListKind::Vehicles).visible_len(), 0);

    send(&mut state, respond(&camps, 200, "[]"));
    match state.compute_viewmodel(30, 100).body {
        Body::Empty(empty) => assert_eq!(empty.message, "No camps found."),
        other => panic!("expected empty state, got {other:?}"),
    }
}

#[test]
fn district_filter_is_case_insensitive_substring() {
    let (mut state, actions) = start(Screen::Organizations);
    let body = r#"[
        {"org_name": "Seva", "district": "Kollam"},
        {"org_name": "Karuna", "district": "Kottayam"},
        {"org_name": "Snehalayam", "district": "Wayanad"}
    ]"#;
    send(&mut state, respond(&only_request(&actions), 200, body));

    // Organizations are listed latest first.
    assert_eq!(
        titles(state.pane(ListKind::Organizations)),
        vec!["Snehalayam", "Karuna", "Seva"]
    );

    send(&mut state, Event::SearchMode);
    send(&mut state, Event::Char('K'));
    send(&mut state, Event::Char('o'));
    assert_eq!(
        titles(state.pane(ListKind::Organizations)),
        vec!["Karuna", "Seva"]
    );

    send(&mut state, Event::Char('l'));
    assert_eq!(titles(state.pane(ListKind::Organizations)), vec!["Seva"]);

    send(&mut state, Event::Char('x'));
    match state.compute_viewmodel(30, 100).body {
        Body::List(list) => assert!(list.no_matches),
        other => panic!("expected list, got {other:?}"),
    }

    send(&mut state, Event::ExitSearch);
    assert_eq!(state.pane(ListKind::Organizations).visible_len(), 3);
}

#[test]
fn vehicles_are_shown_latest_first() {
    let (mut state, actions) = start(Screen::Vehicles);
    let body = r#"[
        {"id": 2, "vehicle_model": "Bolero"},
        {"id": 9, "vehicle_model": "Tempo"},
        {"id": 5, "vehicle_model": "Ace"}
    ]"#;
    send(&mut state, respond(&only_request(&actions), 200, body));
    assert_eq!(
        titles(state.pane(ListKind::Vehicles)),
        vec!["Tempo", "Ace", "Bolero"]
    );
}

fn fill_form(state: &mut AppState) {
    for c in "Relief Trust".chars() {
        send(state, Event::Char(c));
    }
    send(state, Event::FormNext);
    for c in "0712345678".chars() {
        send(state, Event::Char(c));
    }
    send(state, Event::FormNext);
    for c in "help@trust.org".chars() {
        send(state, Event::Char(c));
    }
    send(state, Event::FormNext);
    send(state, Event::DistrictNext);
}

#[test]
fn successful_registration_returns_to_organizations() {
    let (mut state, actions) = start(Screen::Register);
    assert!(actions.is_empty());

    fill_form(&mut state);
    let (_, actions) = send(&mut state, Event::Submit);
    let request = only_request(&actions);
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, format!("{BASE_URL}/api/organization"));

    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["org_name"], "Relief Trust");
    assert_eq!(body["phone_number"], "0712345678");
    assert_eq!(body["district"], "Thiruvananthapuram");

    // A second submit while the first is pending is ignored.
    let (_, actions) = send(&mut state, Event::Submit);
    assert!(actions.is_empty());

    let (_, actions) = send(&mut state, respond(&request, 201, r#"{"id": 12}"#));
    assert_eq!(state.screen, Screen::Organizations);
    let fetch = only_request(&actions);
    assert_eq!(fetch.context.endpoint, Endpoint::List(ListKind::Organizations));

    let alert = state.alert.clone().unwrap();
    assert_eq!(alert.title, "Success");
    assert_eq!(alert.message, "Organization registered!");
    assert!(state.form.org_name.is_empty());
}

#[test]
fn failed_registration_keeps_the_form() {
    let (mut state, _) = start(Screen::Register);
    fill_form(&mut state);
    let (_, actions) = send(&mut state, Event::Submit);
    let request = only_request(&actions);

    let (_, actions) = send(&mut state, respond(&request, 500, r#"{"error": "Duplicate organization"}"#));
    assert!(actions.is_empty());
    assert_eq!(state.screen, Screen::Register);

    let alert = state.alert.clone().unwrap();
    assert_eq!(alert.title, "Registration Failed");
    assert_eq!(alert.message, "Duplicate organization");
    assert_eq!(state.form.org_name, "Relief Trust");
    assert!(!state.form.is_pending());
}

#[test]
fn registration_refreshes_directory_left_open_while_pending() {
    let (mut state, _) = start(Screen::Register);
    fill_form(&mut state);
    let (_, actions) = send(&mut state, Event::Submit);
    let post = only_request(&actions);

    let (_, actions) = send(&mut state, Event::LeaveForm);
    assert_eq!(state.screen, Screen::Organizations);
    let early_fetch = only_request(&actions);
    send(
        &mut state,
        respond(&early_fetch, 200, r#"[{"id": 1, "org_name": "Old"}]"#),
    );
    assert_eq!(titles(state.pane(ListKind::Organizations)), vec!["Old"]);

    let (_, actions) = send(&mut state, respond(&post, 201, r#"{"id": 2}"#));
    let refetch = only_request(&actions);
    assert_eq!(refetch.context.endpoint, Endpoint::List(ListKind::Organizations));
    assert!(refetch.context.seq > early_fetch.context.seq);
    assert_eq!(state.alert.as_ref().map(|a| a.title.as_str()), Some("Success"));

    let body = r#"[{"id": 1, "org_name": "Old"}, {"id": 2, "org_name": "Relief Trust"}]"#;
    send(&mut state, respond(&refetch, 200, body));
    assert_eq!(
        titles(state.pane(ListKind::Organizations)),
        vec!["Relief Trust", "Old"]
    );
}
