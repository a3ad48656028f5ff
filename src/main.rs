use actix_web::{web::Data, App, HttpServer};
use clap::Parser;
use dotenv::dotenv;
use log::{error, info};

use safety_chat_relay::config::RelayConfig;
use safety_chat_relay::web::{routes, RelayState};

#[derive(Debug, Parser)]
#[command(name = "chat-relay", about = "Relays chat messages to the safety-assessment API")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();

    info!("Starting chat relay");

    // Refuse to start without upstream URL and secret key
    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Relay configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let state = Data::new(RelayState::new(Ok(config)));

    info!("Listening on {}:{}", args.host, args.port);
    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors_headers())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await
}
