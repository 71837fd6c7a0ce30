use flodesk::FlodeskClient;
use shared::config::Config;
use std::sync::Arc;
use tracing::{error, info};
use waitlist::segments::SegmentResolver;
use waitlist::submission::{LeadSubmissionService, SubmissionPolicy};

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when the Flodesk credential is missing or the client could not
    /// be built; submissions then fail with a configuration error.
    pub leads: Option<Arc<LeadSubmissionService>>,
    pub policy: SubmissionPolicy,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let policy = if config.fail_open {
            SubmissionPolicy::FailOpen
        } else {
            SubmissionPolicy::Strict
        };

        Self {
            leads: Self::init_lead_service(config).map(Arc::new),
            policy,
        }
    }

    fn init_lead_service(config: &Config) -> Option<LeadSubmissionService> {
        let api_key = config.flodesk_api_key.as_deref()?;

        let client = match &config.flodesk_api_url {
            Some(url) => FlodeskClient::with_base_url(api_key, url),
            None => FlodeskClient::new(api_key),
        };

        match client {
            Ok(client) => {
                let client = Arc::new(client);
                info!("Flodesk client initialized");
                Some(LeadSubmissionService::new(
                    SegmentResolver::new(client.clone()),
                    client,
                ))
            }
            Err(err) => {
                error!("Failed to initialize Flodesk client: {}", err);
                None
            }
        }
    }
}
