//! Contact form validation.
//!
//! Submission is always intercepted and never reaches the network: the form is
//! validated locally and answered with one of three fixed messages. The
//! validation itself is the pure [`validate_submission`]; the component only
//! reads fields, paints the message and resets the form.

use std::rc::Rc;

use crate::config::ContactConfig;
use crate::dom::{Document, Element, select, select_within};
use crate::events::{DomEvent, EventBus, EventKind, ListenTarget, Subscription};

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SENT_MESSAGE: &str = "Thank you! Your message has been sent.";

const ERROR_COLOR: &str = "red";
const SUCCESS_COLOR: &str = "green";

/// Result of validating one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field was empty after trimming.
    MissingFields,
    /// All fields present but the email is not `local@domain.tld` shaped.
    InvalidEmail,
    /// Accepted; the form is cleared.
    Sent,
}

impl SubmitOutcome {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingFields => MISSING_FIELDS_MESSAGE,
            Self::InvalidEmail => INVALID_EMAIL_MESSAGE,
            Self::Sent => SENT_MESSAGE,
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Sent => SUCCESS_COLOR,
            Self::MissingFields | Self::InvalidEmail => ERROR_COLOR,
        }
    }
}

/// Validate already-read field values. Values are trimmed here.
///
/// Emptiness is checked before email shape, so an empty email reports
/// [`SubmitOutcome::MissingFields`].
#[must_use]
pub fn validate_submission(name: &str, email: &str, message: &str) -> SubmitOutcome {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return SubmitOutcome::MissingFields;
    }
    if !is_email_shaped(email) {
        return SubmitOutcome::InvalidEmail;
    }
    SubmitOutcome::Sent
}

/// Permissive `local@domain.tld` check.
///
/// No whitespace or `@` anywhere except the single separator, a non-empty local
/// part, and a domain with a dot that has at least one character on each side.
#[must_use]
pub fn is_email_shaped(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let clean = |part: &str| !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c == '@');
    if !clean(local) || !clean(domain) {
        return false;
    }
    domain.char_indices().any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub struct ContactForm<E> {
    form: E,
    message: Option<E>,
    config: ContactConfig,
}

impl<E: Element> ContactForm<E> {
    /// `None` if the form is absent. The message element is optional.
    pub fn from_document<D: Document<Element = E>>(doc: &D, config: &ContactConfig) -> Option<Self> {
        let form = select(doc, &format!("#{}", config.form_id))?;
        let message = select(doc, &format!("#{}", config.message_id));
        if message.is_none() {
            log::debug!("contact form has no #{} element; feedback will not be shown", config.message_id);
        }
        Some(Self::new(form, message, config))
    }

    pub fn new(form: E, message: Option<E>, config: &ContactConfig) -> Self {
        Self { form, message, config: config.clone() }
    }

    /// Trimmed value of a named field; absent fields read as empty.
    fn field(&self, name: &str) -> String {
        select_within(&self.form, &format!("[name=\"{name}\"]"))
            .and_then(|el| el.value())
            .map(|v| v.trim().to_owned())
            .unwrap_or_default()
    }

    /// Form submitted: suppress native submission, validate, report.
    pub fn on_submit(&self, event: &DomEvent<E>) -> SubmitOutcome {
        event.prevent_default();

        let outcome = validate_submission(
            &self.field(&self.config.name_field),
            &self.field(&self.config.email_field),
            &self.field(&self.config.message_field),
        );
        self.show(outcome);
        if outcome == SubmitOutcome::Sent {
            self.form.reset();
        }
        log::debug!("contact form submission: {outcome:?}");
        outcome
    }

    fn show(&self, outcome: SubmitOutcome) {
        if let Some(message) = &self.message {
            message.set_text(outcome.message());
            message.set_style("color", outcome.color());
        }
    }

    pub fn mount(self: &Rc<Self>, events: &dyn EventBus<E>) -> Vec<Subscription> {
        let form = Rc::clone(self);
        vec![events.listen(
            ListenTarget::Element(self.form.clone()),
            EventKind::Submit,
            Box::new(move |event: &DomEvent<E>| {
                form.on_submit(event);
            }),
        )]
    }
}
