use crate::domain::{Lead, SubscriberPayload};
use crate::ports::SubscriberUpsert;
use crate::segments::{SegmentLookup, SegmentResolver};
use shared::Result;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// How provider failures during subscriber creation are reported to the
/// visitor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionPolicy {
    /// Log the failure server-side, report success to the visitor.
    FailOpen,
    /// Surface provider failures to the caller.
    Strict,
}

/// Use case: turn a validated lead into a provider subscriber record.
pub struct LeadSubmissionService {
    resolver: SegmentResolver,
    subscribers: Arc<dyn SubscriberUpsert>,
}

impl LeadSubmissionService {
    pub fn new(resolver: SegmentResolver, subscribers: Arc<dyn SubscriberUpsert>) -> Self {
        Self {
            resolver,
            subscribers,
        }
    }

    /// Resolve the lead's target segment and upsert the subscriber.
    ///
    /// An absent or failed segment lookup is logged and the subscriber is
    /// created without segment ids; only the upsert itself can fail.
    pub async fn submit(&self, lead: &Lead) -> Result<()> {
        let submission_id = Uuid::new_v4();
        let segment_name = lead.segment_name();

        let lookup = self.resolver.resolve(segment_name).await;
        match &lookup {
            SegmentLookup::Found(id) => {
                info!(%submission_id, segment = segment_name, segment_id = %id, "segment resolved");
            }
            SegmentLookup::ConfirmedAbsent => {
                warn!(%submission_id, segment = segment_name, "segment not found in provider");
            }
            SegmentLookup::LookupFailed => {
                warn!(%submission_id, segment = segment_name, "segment lookup failed, submitting without segment");
            }
        }

        let payload = SubscriberPayload::from_lead(lead, lookup.segment_id());
        self.subscribers.upsert(&payload).await?;

        info!(%submission_id, "lead submitted");
        Ok(())
    }
}
