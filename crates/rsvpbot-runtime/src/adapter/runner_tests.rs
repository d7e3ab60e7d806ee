use std::time::Duration;

use rsvpbot_config::{TimingConfig, WaitMode};
use rsvpbot_protocols::AutomationError;

use super::runner::resolve_link;
use super::*;
use crate::testing::{
    Action, EVENTBRITE_SELECTORS, FakePage, SPLASHTHAT_SELECTORS, request,
};

const EVENT_URL: &str = "https://www.eventbrite.com/e/rust-meetup-123";
const REGISTER: &str = "a.js-ticket-modal-btn";
const CHECKOUT: &str = "input[type=submit][value=Checkout]";
const COMPLETE: &str = "span.button_checkout a[data-automation=complete_registration_button]";

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

async fn run_eventbrite(page: &FakePage, timing: &TimingConfig) -> Result<(), AutomationError> {
    let adapter = EventbriteAdapter::new(timing);
    adapter
        .register(page, &request("Rust Meetup", EVENT_URL))
        .await
}

#[tokio::test(start_paused = true)]
async fn test_eventbrite_full_flow() {
    let page = FakePage::with_selectors(EVENTBRITE_SELECTORS);
    run_eventbrite(&page, &TimingConfig::default()).await.unwrap();

    assert_eq!(page.clicks(), vec![REGISTER, CHECKOUT, COMPLETE]);
    assert_eq!(page.waits(), vec![ms(3500), ms(500), ms(4500), ms(3500)]);

    let actions = page.actions();
    assert_eq!(actions[0], Action::Open(EVENT_URL.to_string()));
    for (selector, value) in [
        ("input#first_name.required", "A"),
        ("input#last_name.required", "B"),
        ("input#email_address.required", "a@b.com"),
        ("input#confirm_email_address.required", "a@b.com"),
    ] {
        assert!(actions.contains(&Action::Set(selector.to_string(), value.to_string())));
    }
}

#[tokio::test(start_paused = true)]
async fn test_missing_register_button() {
    let page = FakePage::with_selectors(EVENTBRITE_SELECTORS).without(REGISTER);
    let err = run_eventbrite(&page, &TimingConfig::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AutomationError::recoverable("Doesnt have a register btn. Prob closed event.")
    );
    assert!(page.clicks().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_missing_checkout_button() {
    let page = FakePage::with_selectors(EVENTBRITE_SELECTORS).without(CHECKOUT);
    let err = run_eventbrite(&page, &TimingConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Doesnt have a checkout btn.");
    assert_eq!(page.clicks(), vec![REGISTER]);
}

#[tokio::test(start_paused = true)]
async fn test_fields_filled_concurrently_before_submit() {
    let mut page = FakePage::with_selectors(EVENTBRITE_SELECTORS);
    page.set_delay = Some(ms(200));

    let started = tokio::time::Instant::now();
    run_eventbrite(&page, &TimingConfig::default()).await.unwrap();

    assert_eq!(page.peak_sets_in_flight(), 4);
    // Settles plus one overlapped round of sets, not four in a row.
    let settles = ms(3500 + 500 + 4500 + 3500);
    let elapsed = started.elapsed();
    assert!(elapsed >= settles + ms(200));
    assert!(elapsed < settles + ms(400));

    let actions = page.actions();
    let last_set = actions
        .iter()
        .rposition(|a| matches!(a, Action::Set(..)))
        .unwrap();
    let submit = actions
        .iter()
        .position(|a| *a == Action::Click(COMPLETE.to_string()))
        .unwrap();
    assert_eq!(actions.iter().filter(|a| matches!(a, Action::Set(..))).count(), 4);
    assert!(submit > last_set);
}

#[tokio::test(start_paused = true)]
async fn test_splashthat_fields_filled_concurrently() {
    let mut page = FakePage::with_selectors(SPLASHTHAT_SELECTORS);
    page.set_delay = Some(ms(200));
    let adapter = SplashthatAdapter::new(&TimingConfig::default());

    adapter
        .register(&page, &request("Launch Party", "https://launch.splashthat.com/"))
        .await
        .unwrap();

    assert_eq!(page.peak_sets_in_flight(), 3);
    assert_eq!(page.clicks().last().map(String::as_str), Some("input#rsvp-submit"));
}

#[tokio::test(start_paused = true)]
async fn test_missing_field_stops_before_submit() {
    let page = FakePage::with_selectors(EVENTBRITE_SELECTORS)
        .without("input#confirm_email_address.required");
    let err = run_eventbrite(&page, &TimingConfig::default())
        .await
        .unwrap_err();

    assert!(err.is_recoverable());
    assert_eq!(err.message(), "Doesnt have confirm email field.");
    assert!(!page.clicks().contains(&COMPLETE.to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_missing_complete_button() {
    let page = FakePage::with_selectors(EVENTBRITE_SELECTORS).without(COMPLETE);
    let err = run_eventbrite(&page, &TimingConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Doesnt have a complete btn.");
}

#[tokio::test(start_paused = true)]
async fn test_open_failure_is_fatal() {
    let mut page = FakePage::with_selectors(EVENTBRITE_SELECTORS);
    page.failing_urls.insert(EVENT_URL.to_string());

    let err = run_eventbrite(&page, &TimingConfig::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AutomationError::fatal("something happened trying to open page")
    );
}

#[tokio::test(start_paused = true)]
async fn test_follows_redirect_notice() {
    let target = "https://www.eventbrite.com/e/rust-meetup-real";
    let mut page = FakePage::with_selectors(EVENTBRITE_SELECTORS);
    page.titles
        .insert(EVENT_URL.to_string(), REDIRECT_NOTICE.to_string());
    page.redirect_href = Some(target.to_string());

    run_eventbrite(&page, &TimingConfig::default()).await.unwrap();

    let opens: Vec<_> = page
        .actions()
        .into_iter()
        .filter(|a| matches!(a, Action::Open(_)))
        .collect();
    assert_eq!(
        opens,
        vec![
            Action::Open(EVENT_URL.to_string()),
            Action::Open(target.to_string())
        ]
    );
    assert_eq!(page.waits()[..2], [ms(3500), ms(3500)]);
}

#[tokio::test(start_paused = true)]
async fn test_redirect_without_link() {
    let mut page = FakePage::with_selectors(EVENTBRITE_SELECTORS);
    page.titles
        .insert(EVENT_URL.to_string(), REDIRECT_NOTICE.to_string());

    let err = run_eventbrite(&page, &TimingConfig::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AutomationError::recoverable("Doesnt have a new link to redirect to")
    );
}

#[tokio::test(start_paused = true)]
async fn test_redirect_anchor_without_href() {
    for href in [None, Some(""), Some("   ")] {
        let mut page = FakePage::with_selectors(EVENTBRITE_SELECTORS);
        page.titles
            .insert(EVENT_URL.to_string(), REDIRECT_NOTICE.to_string());
        page.present.insert("a".to_string());
        page.redirect_href = href.map(str::to_string);

        let err = run_eventbrite(&page, &TimingConfig::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AutomationError::recoverable("Doesnt have a new link to redirect to")
        );
        assert_eq!(page.actions(), vec![Action::Open(EVENT_URL.to_string())]);
    }
}

#[tokio::test(start_paused = true)]
async fn test_redirect_open_failure_is_fatal() {
    let target = "https://www.eventbrite.com/e/gone";
    let mut page = FakePage::with_selectors(EVENTBRITE_SELECTORS);
    page.titles
        .insert(EVENT_URL.to_string(), REDIRECT_NOTICE.to_string());
    page.redirect_href = Some(target.to_string());
    page.failing_urls.insert(target.to_string());

    let err = run_eventbrite(&page, &TimingConfig::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AutomationError::fatal("something happened trying to open redirect page")
    );
}

#[tokio::test(start_paused = true)]
async fn test_splashthat_full_flow() {
    let url = "https://launch.splashthat.com/";
    let page = FakePage::with_selectors(SPLASHTHAT_SELECTORS);
    let adapter = SplashthatAdapter::new(&TimingConfig::default());

    adapter
        .register(&page, &request("Launch Party", url))
        .await
        .unwrap();

    assert_eq!(page.clicks(), vec!["a[href=\"#rsvp\"]", "input#rsvp-submit"]);
    assert_eq!(page.waits(), vec![ms(3500), ms(500), ms(3500)]);
    assert!(
        page.actions()
            .contains(&Action::Set("input#rsvp-email".to_string(), "a@b.com".to_string()))
    );
}

#[tokio::test(start_paused = true)]
async fn test_splashthat_missing_rsvp_button() {
    let page = FakePage::with_selectors(SPLASHTHAT_SELECTORS).without("a[href=\"#rsvp\"]");
    let adapter = SplashthatAdapter::new(&TimingConfig::default());

    let err = adapter
        .register(&page, &request("Launch Party", "https://launch.splashthat.com/"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Doesnt have a rsvp btn. Prob closed event.");
}

#[tokio::test(start_paused = true)]
async fn test_poll_mode_stops_when_control_appears() {
    let timing = TimingConfig {
        wait_mode: WaitMode::Poll,
        ..Default::default()
    };
    let page = FakePage::with_selectors(EVENTBRITE_SELECTORS).without(REGISTER);
    page.appear_after.lock().insert(REGISTER.to_string(), 2);

    run_eventbrite(&page, &timing).await.unwrap();

    // Two misses after open, then nothing to wait for until submission.
    assert_eq!(page.waits(), vec![ms(50), ms(100), ms(3500)]);
    assert_eq!(page.clicks().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_poll_mode_bounded_by_settle() {
    let timing = TimingConfig {
        wait_mode: WaitMode::Poll,
        ..Default::default()
    };
    let page = FakePage::with_selectors(EVENTBRITE_SELECTORS).without(REGISTER);

    let err = run_eventbrite(&page, &timing).await.unwrap_err();
    assert_eq!(err.message(), "Doesnt have a register btn. Prob closed event.");

    let waits = page.waits();
    assert_eq!(waits.iter().sum::<Duration>(), ms(3500));
    assert!(waits.iter().all(|w| *w <= Duration::from_secs(1)));
    assert_eq!(waits[..6], [ms(50), ms(100), ms(200), ms(400), ms(800), ms(1000)]);
}

#[test]
fn test_plan_guards() {
    let adapter = EventbriteAdapter::new(&TimingConfig::default());
    let plan = adapter.plan();

    assert_eq!(plan.steps()[0], Step::Open);
    assert_eq!(plan.next_guard(0), Some(REGISTER));
    assert_eq!(plan.next_guard(2), Some(CHECKOUT));
    assert_eq!(plan.next_guard(4), Some("input#first_name.required"));
    assert_eq!(plan.next_guard(plan.steps().len() - 1), None);
}

#[test]
fn test_resolve_link() {
    assert_eq!(
        resolve_link("https://www.google.com/url?q=x", "/search?q=rust"),
        "https://www.google.com/search?q=rust"
    );
    assert_eq!(
        resolve_link("https://www.google.com/url", "https://www.eventbrite.com/e/1"),
        "https://www.eventbrite.com/e/1"
    );
    assert_eq!(resolve_link("not a url", "/relative"), "/relative");
}
