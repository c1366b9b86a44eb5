mod config;
mod github;
mod hooks;
mod http;
mod notifier;
mod signature;

use actix::Actor;
use actix_web::{middleware::Logger, web, App, HttpServer};
use color_eyre::eyre;

#[actix_web::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    color_eyre::install()?;
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(tracing_subscriber::fmt().finish())?;

    let config::Config {
        webhook_secret,
        discord_webhook,
        bind,
        payload_limit,
    } = envy::prefixed("STARHOOK_").from_env()?;

    tracing::info!(bind = bind.as_str(), "Starting star relay");

    let notifier = notifier::Notifier::new(discord_webhook).start();

    HttpServer::new(move || {
        App::new()
            .data(notifier.clone())
            .app_data(http::WebhookConfig::new(webhook_secret.clone()))
            .app_data(web::PayloadConfig::new(payload_limit))
            .wrap(Logger::default())
            .service(hooks::star_resource())
    })
    .bind(&bind)?
    .run()
    .await
    .map_err(Into::into)
}
