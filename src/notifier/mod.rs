mod delivery;
mod discord;
use std::{fmt, sync::Arc};

pub use self::delivery::Delivery;

use actix::prelude::*;
use secstr::SecUtf8;
use tracing::Instrument as _;

/// A star worth announcing.
#[derive(Debug, Clone, Message)]
#[rtype(result = "Delivery")]
pub struct Notification {
    pub sender: String,
    pub repository: String,
}

#[derive(Clone)]
pub struct Notifier {
    discord: Arc<discord::Discord>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier").field("discord", &"<webhook>").finish()
    }
}

impl Notifier {
    pub fn new(discord_webhook: SecUtf8) -> Self {
        let http = Arc::new(awc::Client::new());
        Self {
            discord: Arc::new(discord::Discord::new(http, discord_webhook)),
        }
    }
}

impl Actor for Notifier {
    type Context = Context<Self>;
}

impl Handler<Notification> for Notifier {
    type Result = ResponseFuture<Delivery>;

    fn handle(&mut self, msg: Notification, _ctx: &mut Self::Context) -> Self::Result {
        let discord = self.discord.clone();
        let span = tracing::info_span!(
            "delivering notification",
            sender = msg.sender.as_str(),
            repository = msg.repository.as_str(),
        );
        Box::pin(
            async move {
                let delivery = Delivery::from(discord.deliver(&msg).await);
                match &delivery {
                    Delivery::Sent => tracing::info!(
                        "Announced star on {} by {}",
                        msg.repository,
                        msg.sender
                    ),
                    Delivery::Failed(err) => {
                        tracing::error!("Failed sending Discord notification: {}", err)
                    }
                }
                delivery
            }
            .instrument(span),
        )
    }
}
