use serde::Serialize;
use tera::{Context, Tera};

use crate::widget::format::format_bot_response;
use crate::widget::{ChatSession, Role};

const TRANSCRIPT_TEMPLATE: &str = "transcript.html";

#[derive(Serialize)]
struct MessageView<'a> {
    role: Role,
    text: &'a str,
    // Only bot replies carry markup; everything else goes through autoescape
    markup: Option<String>,
}

/// Renders a session's transcript, loading indicator and banner as HTML.
pub struct TranscriptView {
    tera: Tera,
}

impl TranscriptView {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            TRANSCRIPT_TEMPLATE,
            include_str!("../../templates/transcript.html"),
        )?;
        tera.autoescape_on(vec![".html"]);
        Ok(Self { tera })
    }

    pub fn render(&self, session: &ChatSession) -> tera::Result<String> {
        let messages: Vec<MessageView> = session
            .transcript()
            .iter()
            .map(|message| MessageView {
                role: message.role,
                text: &message.text,
                markup: (message.role == Role::Bot).then(|| format_bot_response(&message.text)),
            })
            .collect();

        let mut context = Context::new();
        context.insert("messages", &messages);
        context.insert("loading", &session.loading_indicator());
        context.insert("banner", &session.banner());

        self.tera.render(TRANSCRIPT_TEMPLATE, &context)
    }
}
