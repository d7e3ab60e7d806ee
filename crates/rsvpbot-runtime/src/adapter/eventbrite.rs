//! Eventbrite ticket-modal checkout.

use std::time::Duration;

use async_trait::async_trait;
use rsvpbot_config::TimingConfig;
use rsvpbot_protocols::{AttendeeField, Category};

use super::SiteAdapter;
use super::plan::{Field, InteractionPlan};

pub struct EventbriteAdapter {
    plan: InteractionPlan,
}

impl EventbriteAdapter {
    pub fn new(timing: &TimingConfig) -> Self {
        let plan = InteractionPlan::new("eventbrite", timing)
            .open()
            .click(
                "a.js-ticket-modal-btn",
                "Doesnt have a register btn. Prob closed event.",
            )
            .settle(Duration::from_millis(timing.after_entry_ms))
            .click(
                "input[type=submit][value=Checkout]",
                "Doesnt have a checkout btn.",
            )
            .settle(Duration::from_millis(timing.after_checkout_ms))
            .fill_all(vec![
                Field::new(
                    "input#first_name.required",
                    AttendeeField::FirstName,
                    "Doesnt have first name field.",
                ),
                Field::new(
                    "input#last_name.required",
                    AttendeeField::LastName,
                    "Doesnt have last name field.",
                ),
                Field::new(
                    "input#email_address.required",
                    AttendeeField::Email,
                    "Doesnt have email field.",
                ),
                Field::new(
                    "input#confirm_email_address.required",
                    AttendeeField::Email,
                    "Doesnt have confirm email field.",
                ),
            ])
            .submit(
                "span.button_checkout a[data-automation=complete_registration_button]",
                "Doesnt have a complete btn.",
            );
        Self { plan }
    }
}

#[async_trait]
impl SiteAdapter for EventbriteAdapter {
    fn site(&self) -> &str {
        "eventbrite"
    }

    fn category(&self) -> Category {
        Category::Eventbrite
    }

    fn plan(&self) -> &InteractionPlan {
        &self.plan
    }
}
