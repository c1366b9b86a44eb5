use actix::Addr;
use actix_web::{web, HttpResponse};

use crate::{github::StarEvent, http::Webhook, notifier::Notifier};

/// Mounts the relay on every path. Only `POST` is accepted.
pub fn star_resource() -> actix_web::Resource {
    web::resource("/{tail:.*}")
        .route(web::post().to(star_hook))
        .default_service(web::route().to(method_not_allowed))
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().body("Method Not Allowed")
}

pub async fn star_hook(
    Webhook(event): Webhook<StarEvent>,
    notifier: web::Data<Addr<Notifier>>,
) -> &'static str {
    let action = event.action.clone();
    let notification = match event.into_notification() {
        Some(notification) => notification,
        None => {
            tracing::debug!(action = ?action, "Ignoring event");
            return "Ignored";
        }
    };

    // Delivery failures are logged by the notifier and never reach the caller.
    match notifier.send(notification).await {
        Ok(delivery) => {
            tracing::debug!(sent = delivery.is_sent(), %delivery, "Relayed star event")
        }
        Err(err) => tracing::error!("Notifier mailbox is unavailable: {}", err),
    }

    "OK"
}
