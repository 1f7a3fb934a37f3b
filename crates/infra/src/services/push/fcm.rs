use super::{IPushSender, PushError, PushMessage};
use crate::config::FcmConfig;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;

// https://firebase.google.com/docs/cloud-messaging/auth-server
// https://developers.google.com/identity/protocols/oauth2/service-account#httprest

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const ASSERTION_LIFETIME_SECS: i64 = 60 * 60;

#[derive(Debug, Serialize)]
struct ServiceAccountClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    // Seconds
    expires_in: i64,
}

struct CachedAccessToken {
    access_token: String,
    expires_ts: i64,
}

/// Sends notifications through the FCM HTTP v1 API, authenticated as a
/// service account
pub struct FcmPushSender {
    config: FcmConfig,
    key: EncodingKey,
    client: reqwest::Client,
    access_token: Mutex<Option<CachedAccessToken>>,
}

impl FcmPushSender {
    pub fn new(config: FcmConfig) -> Result<Self, PushError> {
        let key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())
            .map_err(|e| PushError::Auth(format!("invalid private key: {}", e)))?;
        Ok(Self {
            config,
            key,
            client: reqwest::Client::new(),
            access_token: Mutex::new(None),
        })
    }

    fn send_endpoint(&self) -> String {
        format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.config.project_id
        )
    }

    fn create_assertion(&self, now_secs: i64) -> Result<String, PushError> {
        let claims = ServiceAccountClaims {
            iss: &self.config.client_email,
            scope: MESSAGING_SCOPE,
            aud: TOKEN_ENDPOINT,
            iat: now_secs,
            exp: now_secs + ASSERTION_LIFETIME_SECS,
        };
        encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| PushError::Auth(e.to_string()))
    }

    async fn get_access_token(&self) -> Result<String, PushError> {
        let mut cached = self.access_token.lock().await;
        let now = Utc::now().timestamp_millis();
        let one_minute_in_millis = 1000 * 60;
        if let Some(token) = cached.as_ref() {
            // Still valid for at least one minute
            if now + one_minute_in_millis <= token.expires_ts {
                return Ok(token.access_token.clone());
            }
        }

        debug!("Fetching a new FCM access token");
        let assertion = self.create_assertion(now / 1000)?;
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ];
        let res = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(PushError::Auth(format!("status {}: {}", status, body)));
        }
        let tokens = res
            .json::<AccessTokenResponse>()
            .await
            .map_err(|e| PushError::Auth(e.to_string()))?;

        let access_token = tokens.access_token.clone();
        *cached = Some(CachedAccessToken {
            access_token: tokens.access_token,
            expires_ts: now + tokens.expires_in * 1000,
        });
        Ok(access_token)
    }
}

fn message_body(message: &PushMessage) -> serde_json::Value {
    json!({
        "message": {
            "token": message.token,
            "notification": {
                "title": message.title,
                "body": message.body,
            },
            "data": message.data,
        }
    })
}

#[async_trait::async_trait]
impl IPushSender for FcmPushSender {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        let access_token = self.get_access_token().await?;
        let res = self
            .client
            .post(&self.send_endpoint())
            .bearer_auth(access_token)
            .json(&message_body(message))
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        if res.status().is_success() {
            Ok(())
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(PushError::Rejected { status, body })
        }
    }
}
