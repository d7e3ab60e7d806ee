//! Splashthat inline RSVP form.

use std::time::Duration;

use async_trait::async_trait;
use rsvpbot_config::TimingConfig;
use rsvpbot_protocols::{AttendeeField, Category};

use super::SiteAdapter;
use super::plan::{Field, InteractionPlan};

pub struct SplashthatAdapter {
    plan: InteractionPlan,
}

impl SplashthatAdapter {
    pub fn new(timing: &TimingConfig) -> Self {
        let plan = InteractionPlan::new("splashthat", timing)
            .open()
            .click(
                "a[href=\"#rsvp\"]",
                "Doesnt have a rsvp btn. Prob closed event.",
            )
            .settle(Duration::from_millis(timing.after_entry_ms))
            .fill_all(vec![
                Field::new(
                    "input#rsvp-first-name",
                    AttendeeField::FirstName,
                    "Doesnt have first name field.",
                ),
                Field::new(
                    "input#rsvp-last-name",
                    AttendeeField::LastName,
                    "Doesnt have last name field.",
                ),
                Field::new(
                    "input#rsvp-email",
                    AttendeeField::Email,
                    "Doesnt have email field.",
                ),
            ])
            .submit("input#rsvp-submit", "Doesnt have a complete btn.");
        Self { plan }
    }
}

#[async_trait]
impl SiteAdapter for SplashthatAdapter {
    fn site(&self) -> &str {
        "splashthat"
    }

    fn category(&self) -> Category {
        Category::Splashthat
    }

    fn plan(&self) -> &InteractionPlan {
        &self.plan
    }
}
