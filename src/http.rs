use actix_web::{
    dev::Payload, error::ResponseError, http::StatusCode, web::Bytes, FromRequest, HttpRequest,
};
use secstr::SecStr;

use crate::signature::{self, Signature};

/// JSON payload of a webhook whose `X-Hub-Signature-256` matched the request body.
#[derive(Debug, Clone)]
pub struct Webhook<T>(pub T);

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Missing signature")]
    MissingSignature,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("HMAC key is not specified")]
    NoHmacKey,
    #[error("HMAC key has invalid length")]
    HmacInvalidLength,
    #[error("failed reading request data: {0}")]
    ActixError(#[from] actix_web::Error),
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<signature::Error> for WebhookError {
    fn from(err: signature::Error) -> Self {
        match err {
            signature::Error::HeaderNotFound => Self::MissingSignature,
            err => {
                tracing::debug!("Malformed signature header: {}", err);
                Self::InvalidSignature
            }
        }
    }
}

impl From<hmac::crypto_mac::InvalidKeyLength> for WebhookError {
    fn from(_: hmac::crypto_mac::InvalidKeyLength) -> Self {
        Self::HmacInvalidLength
    }
}

impl ResponseError for WebhookError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::NoHmacKey => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookError::HmacInvalidLength => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookError::JsonError(_) => StatusCode::BAD_REQUEST,
            WebhookError::ActixError(err) => err.as_response_error().status_code(),
        }
    }
}

#[derive(Debug, Default)]
pub struct WebhookConfig {
    pub key: Option<SecStr>,
}

impl WebhookConfig {
    pub fn new(key: SecStr) -> Self {
        Self { key: Some(key) }
    }
}

/// Checks `signature` against HMAC-SHA256 of `body` in constant time.
pub fn verify(key: &[u8], signature: &Signature, body: &[u8]) -> Result<(), WebhookError> {
    use hmac::{Mac as _, NewMac as _};

    let mut mac = hmac::Hmac::<sha2::Sha256>::new_varkey(key)?;
    mac.update(body);
    mac.verify(&signature.0)
        .map_err(|_| WebhookError::InvalidSignature)
}

impl<T> FromRequest for Webhook<T>
where
    T: serde::de::DeserializeOwned,
{
    type Error = WebhookError;
    type Future = futures::future::LocalBoxFuture<'static, Result<Self, Self::Error>>;
    type Config = WebhookConfig;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        // Header is checked before anything is read off the wire.
        let signature = Signature::from_headers(req.headers());
        let key = req
            .app_data::<Self::Config>()
            .and_then(|config| config.key.clone());
        let bytes = Bytes::from_request(req, payload);

        Box::pin(async move {
            let signature = signature?;
            let key = key.ok_or(WebhookError::NoHmacKey)?;
            let bytes = bytes.await?;

            if let Err(err) = verify(key.unsecure(), &signature, &bytes) {
                tracing::warn!(len = bytes.len(), "Rejected webhook with bad signature");
                return Err(err);
            }

            Ok(Self(serde_json::from_slice(&bytes)?))
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App, HttpResponse};

    use super::*;

    // https://docs.github.com/en/webhooks/using-webhooks/validating-webhook-deliveries
    const SECRET: &[u8] = b"It's a Secret to Everybody";
    const BODY: &[u8] = b"Hello, World!";
    const DIGEST: &str = "757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17";

    fn decode(digest: &str) -> Signature {
        let mut bytes = [0; 32];
        hex::decode_to_slice(digest, &mut bytes).unwrap();
        Signature(bytes)
    }

    #[test]
    fn github_demo() {
        verify(SECRET, &decode(DIGEST), BODY).unwrap();
    }

    #[test]
    fn single_bit_flips_are_rejected() {
        let mut body = BODY.to_vec();
        body[0] ^= 1;
        assert!(matches!(
            verify(SECRET, &decode(DIGEST), &body),
            Err(WebhookError::InvalidSignature)
        ));

        let mut sig = decode(DIGEST);
        sig.0[31] ^= 0x80;
        assert!(matches!(
            verify(SECRET, &sig, BODY),
            Err(WebhookError::InvalidSignature)
        ));

        assert!(verify(b"It's a secret to everybody", &decode(DIGEST), BODY).is_err());
    }

    #[test]
    fn statuses() {
        assert_eq!(
            WebhookError::MissingSignature.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::InvalidSignature.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::NoHmacKey.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let json = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        assert_eq!(
            WebhookError::from(json).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    async fn echo(Webhook(value): Webhook<serde_json::Value>) -> HttpResponse {
        HttpResponse::Ok().json(value)
    }

    #[actix_rt::test]
    async fn extractor_without_key_is_server_error() {
        let mut app =
            test::init_service(App::new().route("/", web::post().to(echo))).await;

        let req = test::TestRequest::post()
            .uri("/")
            .header(signature::HEADER, format!("sha256={}", DIGEST))
            .set_payload(BODY)
            .to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_rt::test]
    async fn extractor_respects_payload_limit() {
        let mut app = test::init_service(
            App::new()
                .app_data(WebhookConfig::new(SecStr::new(SECRET.to_vec())))
                .app_data(web::PayloadConfig::new(4))
                .route("/", web::post().to(echo)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/")
            .header(signature::HEADER, format!("sha256={}", DIGEST))
            .set_payload(BODY)
            .to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
