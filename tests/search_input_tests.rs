mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::MockSource;
use gradelens::client::{DisplayedResult, InputState, ResultsRoute, SearchInput, SuggestionFetcher};
use gradelens::models::Suggestion;
use tokio::time::sleep;

fn listing() -> Vec<Suggestion> {
    vec![
        Suggestion::course("CSE 1310 - Intro to Programming"),
        Suggestion::professor("Marnim Galib"),
    ]
}

fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    (count, move || {
        c.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn test_reselecting_displayed_course_keeps_filters() {
    let source = Arc::new(MockSource::with_results(listing()));
    let (resets, on_reset) = counter();
    let mut input = SearchInput::new(SuggestionFetcher::new(source.clone()))
        .with_displayed(DisplayedResult::from_route(&ResultsRoute::Course("CSE 1310".to_string())))
        .with_reset(on_reset);

    input.on_keystroke("cse1310");
    assert_eq!(input.state(), InputState::Typing);
    sleep(Duration::from_millis(200)).await;
    assert_eq!(input.sync(), InputState::SuggestionsShown);

    // Enter -> primera sugerencia
    let nav = input.submit().expect("hay sugerencias");
    assert_eq!(nav.route, ResultsRoute::Course("CSE 1310".to_string()));
    assert_eq!(nav.path(), "/results?course=CSE%201310");
    assert!(!nav.reset_invoked);
    assert_eq!(resets.load(Ordering::SeqCst), 0);
    assert_eq!(input.state(), InputState::Selected);
    assert!(input.suggestions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_selecting_new_target_resets_exactly_once() {
    let source = Arc::new(MockSource::with_results(listing()));
    let (resets, on_reset) = counter();
    let mut input = SearchInput::new(SuggestionFetcher::new(source.clone()))
        .with_displayed(DisplayedResult::from_route(&ResultsRoute::Course("CSE 1310".to_string())))
        .with_reset(on_reset);

    input.on_keystroke("marnimg");
    sleep(Duration::from_millis(200)).await;
    assert_eq!(source.calls(), vec!["marnim g"]);

    let nav = input.select("Marnim Galib");
    assert_eq!(nav.route, ResultsRoute::Professor("Marnim Galib".to_string()));
    assert_eq!(nav.path(), "/results?professor=Marnim%20Galib");
    assert!(nav.reset_invoked);
    assert_eq!(resets.load(Ordering::SeqCst), 1);

    // ahora se muestra ese profesor: elegirlo de nuevo no reinicia
    let again = input.select("Marnim Galib");
    assert!(!again.reset_invoked);
    assert_eq!(resets.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_same_text_different_kind_is_not_identical() {
    let source = Arc::new(MockSource::with_results(vec![Suggestion::professor("Smith")]));
    let (resets, on_reset) = counter();
    let mut input = SearchInput::new(SuggestionFetcher::new(source.clone()))
        .with_displayed(DisplayedResult {
            route_type: Some(gradelens::models::SuggestionKind::Course),
            course: Some("Smith".to_string()),
            professor: None,
        })
        .with_reset(on_reset);

    input.on_keystroke("smith");
    sleep(Duration::from_millis(200)).await;
    let nav = input.submit().expect("hay sugerencias");
    assert!(nav.reset_invoked);
    assert_eq!(resets.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_without_callback_navigation_still_happens() {
    let source = Arc::new(MockSource::with_results(listing()));
    let mut input = SearchInput::new(SuggestionFetcher::new(source.clone()));

    input.on_keystroke("cse");
    sleep(Duration::from_millis(200)).await;
    let nav = input.submit().expect("hay sugerencias");
    assert_eq!(nav.path(), "/results?course=CSE%201310");
    assert!(!nav.reset_invoked);
}

#[tokio::test(start_paused = true)]
async fn test_submit_without_suggestions_is_noop() {
    let source = Arc::new(MockSource::with_results(Vec::new()));
    let (resets, on_reset) = counter();
    let mut input = SearchInput::new(SuggestionFetcher::new(source.clone())).with_reset(on_reset);

    input.on_keystroke("zzz");
    sleep(Duration::from_millis(200)).await;
    assert_eq!(input.sync(), InputState::Typing);
    assert!(input.submit().is_none());
    assert_eq!(resets.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_state_machine_transitions() {
    let source = Arc::new(MockSource::with_results(listing()).default_delay(Duration::from_millis(50)));
    let mut input = SearchInput::new(SuggestionFetcher::new(source.clone()));
    assert_eq!(input.state(), InputState::Idle);

    input.on_keystroke("cse");
    assert_eq!(input.sync(), InputState::Typing);

    sleep(Duration::from_millis(120)).await;
    assert_eq!(input.sync(), InputState::Loading);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(input.sync(), InputState::SuggestionsShown);

    input.on_keystroke("");
    assert_eq!(input.sync(), InputState::Idle);
    assert!(input.suggestions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_stops_suggestions() {
    let source = Arc::new(MockSource::with_results(listing()));
    let mut input = SearchInput::new(SuggestionFetcher::new(source.clone()));

    input.on_keystroke("cse");
    sleep(Duration::from_millis(40)).await;
    input.teardown();

    sleep(Duration::from_millis(300)).await;
    assert!(source.calls().is_empty());
    assert!(input.suggestions().is_empty());
}
