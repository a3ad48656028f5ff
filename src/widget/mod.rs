//! Chat widget: the session behind the input box and the transcript.
//!
//! A [`ChatSession`] owns everything one page load shows: the input buffer,
//! the ordered transcript, the loading flag and the error banner. It sends
//! through any [`RelayTransport`], normally [`client::HttpRelay`].

pub mod client;
pub mod format;
pub mod view;

use std::time::{Duration, Instant};

use log::{debug, error};
use serde::Serialize;
use thiserror::Error;

use crate::config::MAX_MESSAGE_CHARS;
pub use client::{HttpRelay, RelayCallError, RelayTransport};

pub const LOADING_TEXT: &str = "Analyzing ingredient safety...";
pub const APOLOGY_TEXT: &str =
    "I apologize, but I encountered an error processing your request. Please try again later.";
pub const FAILURE_BANNER_TEXT: &str =
    "Failed to get response. Please check your connection and try again.";

/// How long the error banner stays up once shown.
pub const BANNER_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub role: Role,
}

impl ChatMessage {
    fn new(text: impl Into<String>, role: Role) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a message.")]
    Empty,

    #[error("Message too long. Please keep it under {max} characters.", max = MAX_MESSAGE_CHARS)]
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] InputError),

    #[error("a request is already in flight")]
    Busy,
}

/// Trims `text` and checks it against the message length limit.
pub fn validate_message(text: &str) -> Result<&str, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(InputError::Empty)
    } else if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        Err(InputError::TooLong)
    } else {
        Ok(trimmed)
    }
}

#[derive(Debug, Clone)]
struct Banner {
    message: String,
    expires_at: Instant,
}

/// A validated message that has been added to the transcript and is waiting
/// for its relay outcome.
#[derive(Debug)]
#[must_use]
pub struct PendingSubmission {
    message: String,
}

impl PendingSubmission {
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    input: String,
    loading: bool,
    banner: Option<Banner>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the input buffer and re-runs live validation: an over-long
    /// draft raises the banner, anything else clears it.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        if validate_message(&self.input) == Err(InputError::TooLong) {
            self.show_error(InputError::TooLong.to_string());
        } else {
            self.dismiss_banner();
        }
    }

    pub fn can_send(&self) -> bool {
        !self.loading && validate_message(&self.input).is_ok()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn loading_indicator(&self) -> Option<&'static str> {
        self.loading.then_some(LOADING_TEXT)
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner_at(Instant::now())
    }

    pub fn banner_at(&self, now: Instant) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|banner| now < banner.expires_at)
            .map(|banner| banner.message.as_str())
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    fn show_error(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner {
            message: message.into(),
            expires_at: Instant::now() + BANNER_TTL,
        });
    }

    /// Validates `text`, records it as a user message, clears the input and
    /// enters the loading state. Invalid input only raises the banner.
    pub fn begin(&mut self, text: &str) -> Result<PendingSubmission, SubmitError> {
        if self.loading {
            return Err(SubmitError::Busy);
        }

        let message = match validate_message(text) {
            Ok(message) => message.to_string(),
            Err(err) => {
                self.show_error(err.to_string());
                return Err(err.into());
            }
        };

        self.transcript.push(ChatMessage::new(message.clone(), Role::User));
        self.input.clear();
        self.loading = true;

        Ok(PendingSubmission { message })
    }

    /// Leaves the loading state and records the relay outcome.
    pub fn complete(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<String, RelayCallError>,
    ) {
        self.loading = false;

        match outcome {
            Ok(reply) => {
                debug!("Reply received for {} character message", pending.message.chars().count());
                self.transcript.push(ChatMessage::new(reply, Role::Bot));
            }
            Err(e) => {
                error!("Relay error: {}", e);
                self.transcript.push(ChatMessage::new(APOLOGY_TEXT, Role::Error));
                self.show_error(FAILURE_BANNER_TEXT);
            }
        }
    }

    /// Sends `text` through `relay` and waits for the outcome. There is no
    /// timeout: a relay that never answers keeps the session loading.
    pub async fn submit<R: RelayTransport>(
        &mut self,
        relay: &R,
        text: &str,
    ) -> Result<(), SubmitError> {
        let pending = self.begin(text)?;
        let outcome = relay.send(pending.message()).await;
        self.complete(pending, outcome);
        Ok(())
    }

    pub async fn submit_input<R: RelayTransport>(&mut self, relay: &R) -> Result<(), SubmitError> {
        let text = self.input.clone();
        self.submit(relay, &text).await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct FakeRelay {
        sent: RefCell<Vec<String>>,
        status: Option<u16>,
        reply: &'static str,
    }

    impl FakeRelay {
        fn replying(reply: &'static str) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                status: None,
                reply,
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                status: Some(status),
                reply: "",
            }
        }
    }

    impl RelayTransport for FakeRelay {
        async fn send(&self, message: &str) -> Result<String, RelayCallError> {
            self.sent.borrow_mut().push(message.to_string());
            match self.status {
                Some(status) => Err(RelayCallError::Status(status)),
                None => Ok(self.reply.to_string()),
            }
        }
    }

    #[tokio::test]
    async fn blank_input_never_reaches_relay() {
        let relay = FakeRelay::replying("unused");
        let mut session = ChatSession::new();

        for text in ["", "   ", "\n\t"] {
            let err = session.submit(&relay, text).await.unwrap_err();
            assert_eq!(err, SubmitError::Invalid(InputError::Empty));
        }

        assert!(relay.sent.borrow().is_empty());
        assert!(session.transcript().is_empty());
        assert!(session.banner().is_some());
    }

    #[tokio::test]
    async fn valid_lengths_send_exactly_once() {
        for len in [1, 140, MAX_MESSAGE_CHARS] {
            let relay = FakeRelay::replying("ok");
            let mut session = ChatSession::new();
            let text = "x".repeat(len);

            session.submit(&relay, &text).await.unwrap();

            assert_eq!(*relay.sent.borrow(), vec![text.clone()]);
            assert_eq!(session.transcript()[0], ChatMessage::new(text, Role::User));
            assert_eq!(session.transcript()[1], ChatMessage::new("ok", Role::Bot));
            assert!(!session.is_loading());
        }
    }

    #[tokio::test]
    async fn over_limit_is_rejected_naming_the_limit() {
        let relay = FakeRelay::replying("unused");
        let mut session = ChatSession::new();

        let err = session
            .submit(&relay, &"x".repeat(MAX_MESSAGE_CHARS + 1))
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::Invalid(InputError::TooLong));
        assert!(err.to_string().contains("285"));
        assert!(session.banner().unwrap().contains("285"));
        assert!(relay.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn failure_appends_apology_and_banner_expires() {
        let relay = FakeRelay::failing(502);
        let mut session = ChatSession::new();

        let before = Instant::now();
        session.submit(&relay, "is talc safe?").await.unwrap();
        let after = Instant::now();

        let last = session.transcript().last().unwrap();
        assert_eq!(last.role, Role::Error);
        assert_eq!(last.text, APOLOGY_TEXT);
        assert_eq!(
            session.banner_at(before + Duration::from_secs(4)),
            Some(FAILURE_BANNER_TEXT)
        );
        assert_eq!(session.banner_at(after + BANNER_TTL), None);
    }

    #[test]
    fn second_submission_while_loading_is_refused() {
        let mut session = ChatSession::new();
        let pending = session.begin("first").unwrap();

        assert!(session.is_loading());
        assert_eq!(session.loading_indicator(), Some(LOADING_TEXT));
        session.set_input("second");
        assert!(!session.can_send());
        assert_eq!(session.begin("second").unwrap_err(), SubmitError::Busy);

        session.complete(pending, Ok("done".to_string()));
        assert!(!session.is_loading());
        assert!(session.can_send());
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn submit_input_clears_the_buffer() {
        let relay = FakeRelay::replying("fine");
        let mut session = ChatSession::new();
        session.set_input("  sodium lauryl sulfate  ");

        session.submit_input(&relay).await.unwrap();

        assert_eq!(session.input(), "");
        assert_eq!(*relay.sent.borrow(), vec!["sodium lauryl sulfate".to_string()]);
    }

    #[test]
    fn typing_over_the_limit_raises_then_clears_banner() {
        let mut session = ChatSession::new();

        session.set_input("y".repeat(MAX_MESSAGE_CHARS + 1));
        assert!(session.banner().is_some());
        assert!(!session.can_send());

        session.set_input("short");
        assert!(session.banner().is_none());
        assert!(session.can_send());
    }
}
