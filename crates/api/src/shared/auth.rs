use crate::error::CoopError;
use actix_web::HttpRequest;
use coop_reminders_infra::CoopContext;

pub const CRON_SECRET_HEADER: &str = "coop-cron-secret";

/// Only callers knowing the cron secret may trigger a reminder run
pub fn protect_cron_route(req: &HttpRequest, ctx: &CoopContext) -> Result<(), CoopError> {
    let secret = match req.headers().get(CRON_SECRET_HEADER) {
        Some(secret) => match secret.to_str() {
            Ok(secret) => secret,
            Err(_) => {
                return Err(CoopError::Unauthorized(
                    "Malformed cron secret provided".to_string(),
                ))
            }
        },
        None => {
            return Err(CoopError::Unauthorized(format!(
                "Unable to find the cron secret in the {} header",
                CRON_SECRET_HEADER
            )))
        }
    };

    if secret == ctx.config.cron_secret {
        Ok(())
    } else {
        Err(CoopError::Unauthorized(format!(
            "Invalid cron secret provided in the {} header",
            CRON_SECRET_HEADER
        )))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use coop_reminders_infra::{Config, InMemoryMailer, StaticTimeSys};
    use std::sync::Arc;

    fn setup_context() -> CoopContext {
        let mut config = Config::new();
        config.cron_secret = "cron-secret".into();
        CoopContext::create_inmemory(
            config,
            Arc::new(StaticTimeSys(0)),
            Arc::new(InMemoryMailer::new()),
            None,
        )
    }

    #[test]
    fn accepts_matching_secret() {
        let ctx = setup_context();
        let req = TestRequest::default()
            .insert_header((CRON_SECRET_HEADER, "cron-secret"))
            .to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_ok());
    }

    #[test]
    fn rejects_missing_or_wrong_secret() {
        let ctx = setup_context();
        let req = TestRequest::default().to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_err());

        let req = TestRequest::default()
            .insert_header((CRON_SECRET_HEADER, "guess"))
            .to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_err());
    }
}
