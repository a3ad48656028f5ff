//! Terminal front end for the chat widget: one line of input per message.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use log::info;

use safety_chat_relay::widget::view::TranscriptView;
use safety_chat_relay::widget::{ChatSession, HttpRelay, Role};

#[derive(Debug, Parser)]
#[command(name = "chat-widget", about = "Chat with the safety assistant through the relay")]
struct Args {
    /// Relay endpoint to post messages to
    #[arg(long, default_value = "http://127.0.0.1:8080/chat-relay")]
    endpoint: String,

    /// Print the transcript as HTML on exit
    #[arg(long)]
    html: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let args = Args::parse();
    let relay = HttpRelay::new(args.endpoint);
    info!("Relay endpoint: {}", relay.endpoint());

    let mut session = ChatSession::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    prompt(&mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        session.set_input(line);

        let shown = session.transcript().len();
        if let Err(e) = session.submit_input(&relay).await {
            info!("Message not sent: {}", e);
        }

        // Skip the echoed user message; print what came back
        for message in session.transcript().iter().skip(shown) {
            match message.role {
                Role::User => {}
                Role::Bot => println!("bot> {}", message.text),
                Role::Error => println!("error> {}", message.text),
            }
        }
        if let Some(banner) = session.banner() {
            println!("! {}", banner);
        }

        prompt(&mut stdout)?;
    }

    if args.html {
        let view = TranscriptView::new().context("failed to load transcript template")?;
        println!("{}", view.render(&session).context("failed to render transcript")?);
    }

    Ok(())
}

fn prompt(stdout: &mut io::Stdout) -> Result<()> {
    print!("you> ");
    stdout.flush()?;
    Ok(())
}
