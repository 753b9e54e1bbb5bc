//! Contact form validation.
//!
//! The form never leaves the page: submission is always intercepted, the
//! fields are validated synchronously, and the visitor gets either a success
//! acknowledgment (and an emptied form) or a failure acknowledgment with the
//! offending fields outlined and their values kept.
//!
//! ## Rules
//!
//! - A required field that is present in the form must be non-blank after
//!   trimming. Required fields the form does not have are ignored.
//! - A present, non-empty email must look like `local@domain.tld`: no
//!   whitespace or `@` inside any part, and at least one `.` after the `@`.
//!
//! The rules are a pure function, [`validate`], over a typed
//! [`ContactSubmission`]; [`ContactForm`] only wires them to the page.
//!
//! A real deployment sends the accepted submission somewhere; that call
//! belongs where [`ContactForm`] currently shows the success acknowledgment.

use super::Behavior;
use crate::config::ContactConfig;
use crate::dom::{Page, StyleProperty};
use crate::event::{Event, Outcome, Trigger};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// A named contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Message];

    /// The control's `name` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// The form's values. `None` means the form has no control by that name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl ContactSubmission {
    /// Build from the form's name/value pairs. Unknown names are dropped; a
    /// repeated name keeps its last value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Self::default();
        for (key, value) in entries {
            if let Some(field) = Field::from_name(key.as_ref()) {
                *submission.slot_mut(field) = Some(value.into());
            }
        }
        submission
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Message => &mut self.message,
        }
    }
}

/// Outcome of validating one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    invalid: BTreeSet<Field>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn is_invalid(&self, field: Field) -> bool {
        self.invalid.contains(&field)
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.invalid.iter().copied()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate(submission: &ContactSubmission, required: &[Field]) -> Validation {
    let mut invalid = BTreeSet::new();
    for &field in required {
        if submission.get(field).is_some_and(|v| v.trim().is_empty()) {
            invalid.insert(field);
        }
    }
    if let Some(email) = submission.email.as_deref() {
        if !email.is_empty() && !is_valid_email(email) {
            invalid.insert(Field::Email);
        }
    }
    Validation { invalid }
}

pub struct ContactForm<N> {
    form: N,
    config: ContactConfig,
}

impl<N: Clone + PartialEq> ContactForm<N> {
    pub fn mount<P: Page<Node = N>>(page: &P, config: &ContactConfig) -> Option<Self> {
        let Some(form) = page.query(&config.form) else {
            tracing::debug!(selector = %config.form, "no contact form, skipping");
            return None;
        };
        Some(Self {
            form,
            config: config.clone(),
        })
    }

    fn control<P: Page<Node = N>>(&self, page: &P, field: Field) -> Option<N> {
        page.query_within(&self.form, &format!(r#"[name="{}"]"#, field.name()))
    }

    /// Outline invalid fields and clear the outline on checked valid ones.
    fn mark<P: Page<Node = N>>(&self, page: &mut P, submission: &ContactSubmission, result: &Validation) {
        let email_checked = submission.email.as_deref().is_some_and(|e| !e.is_empty());
        for field in Field::ALL {
            let checked = self.config.required.contains(&field)
                || (field == Field::Email && email_checked);
            if !checked {
                continue;
            }
            let Some(control) = self.control(page, field) else {
                continue;
            };
            let color = if result.is_invalid(field) {
                self.config.error_color.as_str()
            } else {
                ""
            };
            page.set_style(&control, StyleProperty::BorderColor, color);
        }
    }

    /// Validate the form and acknowledge the result.
    ///
    /// Runs to completion within the submit event, so the form is idle again
    /// by the time the next one arrives.
    pub fn submit<P: Page<Node = N>>(&self, page: &mut P) -> Validation {
        let submission = ContactSubmission::from_entries(page.form_entries(&self.form));
        let result = validate(&submission, &self.config.required);
        self.mark(page, &submission, &result);

        if result.is_valid() {
            tracing::info!("contact form accepted");
            page.alert(&self.config.success_message);
            page.reset_form(&self.form);
        } else {
            let invalid: Vec<_> = result.invalid_fields().map(Field::name).collect();
            tracing::debug!(?invalid, "contact form rejected");
            page.alert(&self.config.failure_message);
        }
        result
    }
}

impl<P: Page> Behavior<P> for ContactForm<P::Node> {
    fn name(&self) -> &'static str {
        "contact-form"
    }

    fn triggers(&self) -> Vec<Trigger<P::Node>> {
        vec![Trigger::submit(self.form.clone())]
    }

    fn handle(&mut self, page: &mut P, event: &Event<P::Node>) -> Outcome {
        match event {
            Event::Submit { form } if *form == self.form => {
                self.submit(page);
                Outcome::PreventDefault
            }
            _ => Outcome::Proceed,
        }
    }
}
