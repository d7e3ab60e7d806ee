//! Hand-written fakes of the page and session traits.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rsvpbot_protocols::{
    BrowserSession, EventRecord, Identity, OpenStatus, PageActions, PageError,
    RegistrationRequest, SessionError, SessionFactory,
};

pub const EVENTBRITE_SELECTORS: &[&str] = &[
    "a.js-ticket-modal-btn",
    "input[type=submit][value=Checkout]",
    "input#first_name.required",
    "input#last_name.required",
    "input#email_address.required",
    "input#confirm_email_address.required",
    "span.button_checkout a[data-automation=complete_registration_button]",
];

pub const SPLASHTHAT_SELECTORS: &[&str] = &[
    "a[href=\"#rsvp\"]",
    "input#rsvp-first-name",
    "input#rsvp-last-name",
    "input#rsvp-email",
    "input#rsvp-submit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Open(String),
    Click(String),
    Set(String, String),
    Screenshot(PathBuf),
}

/// Scriptable page. Titles and open failures are keyed by URL so one
/// template can serve a whole batch.
#[derive(Default)]
pub struct FakePage {
    pub present: HashSet<String>,
    pub titles: HashMap<String, String>,
    pub failing_urls: HashSet<String>,
    pub redirect_href: Option<String>,
    /// Selectors that only appear after this many existence checks.
    pub appear_after: Mutex<HashMap<String, usize>>,
    pub panic_on_click: Option<String>,
    pub hang_on_click: Option<String>,
    /// How long each field set takes to complete.
    pub set_delay: Option<Duration>,
    pub sets_in_flight: AtomicUsize,
    pub peak_sets_in_flight: AtomicUsize,
    pub fail_screenshot: bool,
    pub current: Mutex<String>,
    pub actions: Mutex<Vec<Action>>,
    pub waits: Mutex<Vec<Duration>>,
}

impl FakePage {
    pub fn with_selectors(selectors: &[&str]) -> Self {
        Self {
            present: selectors.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn without(mut self, selector: &str) -> Self {
        self.present.remove(selector);
        self
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().clone()
    }

    pub fn peak_sets_in_flight(&self) -> usize {
        self.peak_sets_in_flight.load(Ordering::SeqCst)
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Click(sel) => Some(sel),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl PageActions for FakePage {
    async fn open(&self, url: &str) -> Result<OpenStatus, PageError> {
        self.actions.lock().push(Action::Open(url.to_string()));
        if self.failing_urls.contains(url) {
            return Ok(OpenStatus::Failed("net::ERR_NAME_NOT_RESOLVED".to_string()));
        }
        *self.current.lock() = url.to_string();
        Ok(OpenStatus::Success)
    }

    async fn title(&self) -> Result<String, PageError> {
        let current = self.current.lock().clone();
        Ok(self
            .titles
            .get(&current)
            .cloned()
            .unwrap_or_else(|| "Event".to_string()))
    }

    async fn current_url(&self) -> Result<String, PageError> {
        Ok(self.current.lock().clone())
    }

    async fn element_exists(&self, selector: &str) -> Result<bool, PageError> {
        if selector == "a" {
            return Ok(self.redirect_href.is_some() || self.present.contains("a"));
        }
        let mut pending = self.appear_after.lock();
        if let Some(remaining) = pending.get_mut(selector) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(false);
            }
            return Ok(true);
        }
        Ok(self.present.contains(selector))
    }

    async fn read_text(&self, _selector: &str) -> Result<Option<String>, PageError> {
        Ok(None)
    }

    async fn read_attribute(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Option<String>, PageError> {
        if selector == "a" && attr == "href" {
            return Ok(self.redirect_href.clone());
        }
        Ok(None)
    }

    async fn set_field_value(&self, selector: &str, value: &str) -> Result<(), PageError> {
        let in_flight = self.sets_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_sets_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        if let Some(delay) = self.set_delay {
            tokio::time::sleep(delay).await;
        }
        self.sets_in_flight.fetch_sub(1, Ordering::SeqCst);
        // Recorded on completion.
        self.actions
            .lock()
            .push(Action::Set(selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        if self.panic_on_click.as_deref() == Some(selector) {
            panic!("click handler blew up");
        }
        if self.hang_on_click.as_deref() == Some(selector) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.actions.lock().push(Action::Click(selector.to_string()));
        Ok(())
    }

    async fn wait(&self, duration: Duration) {
        self.waits.lock().push(duration);
        tokio::time::sleep(duration).await;
    }

    async fn screenshot(&self, path: &Path) -> Result<(), PageError> {
        if self.fail_screenshot {
            return Err(PageError::Screenshot("renderer gone".to_string()));
        }
        self.actions
            .lock()
            .push(Action::Screenshot(path.to_path_buf()));
        Ok(())
    }
}

/// Counters shared between a [`FakeSessionFactory`] and its sessions.
#[derive(Default)]
pub struct SessionStats {
    pub opened: AtomicUsize,
    pub released: AtomicUsize,
    pub live: AtomicUsize,
    pub peak: AtomicUsize,
}

impl SessionStats {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

pub struct FakeSession {
    id: String,
    page: Arc<FakePage>,
    stats: Arc<SessionStats>,
    released: bool,
}

#[async_trait]
impl BrowserSession for FakeSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn page(&self) -> &dyn PageActions {
        self.page.as_ref()
    }

    async fn release(&mut self) -> Result<(), SessionError> {
        if !self.released {
            self.released = true;
            self.stats.live.fetch_sub(1, Ordering::SeqCst);
            self.stats.released.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

type PageTemplate = Box<dyn Fn() -> FakePage + Send + Sync>;

/// Opens [`FakeSession`]s, each with a fresh page from `template`. The last
/// page handed out is kept for inspection.
pub struct FakeSessionFactory {
    template: PageTemplate,
    pub stats: Arc<SessionStats>,
    pub last_page: Mutex<Option<Arc<FakePage>>>,
    pub fail_open: bool,
}

impl FakeSessionFactory {
    pub fn new(template: impl Fn() -> FakePage + Send + Sync + 'static) -> Self {
        Self {
            template: Box::new(template),
            stats: Arc::new(SessionStats::default()),
            last_page: Mutex::new(None),
            fail_open: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::new(FakePage::default)
        }
    }

    pub fn last_page(&self) -> Arc<FakePage> {
        self.last_page
            .lock()
            .clone()
            .expect("no session was opened")
    }
}

#[async_trait]
impl SessionFactory for FakeSessionFactory {
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>, SessionError> {
        if self.fail_open {
            return Err(SessionError::LaunchFailed("no display".to_string()));
        }
        let opened = self.stats.opened.fetch_add(1, Ordering::SeqCst);
        let live = self.stats.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.peak.fetch_max(live, Ordering::SeqCst);

        let page = Arc::new((self.template)());
        *self.last_page.lock() = Some(page.clone());
        Ok(Box::new(FakeSession {
            id: format!("fake-{}", opened),
            page,
            stats: self.stats.clone(),
            released: false,
        }))
    }
}

pub fn identity() -> Identity {
    Identity::new("a@b.com", "A", "B").unwrap()
}

pub fn event(name: &str, url: &str) -> EventRecord {
    EventRecord::new(name, url, "Jan 1", "The Venue")
}

pub fn request(name: &str, url: &str) -> RegistrationRequest {
    RegistrationRequest::new(event(name, url), identity())
}
