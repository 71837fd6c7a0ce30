use crate::domain::{SegmentPage, SubscriberPayload};
use async_trait::async_trait;
use shared::Result;

// Ports are the pluggable seams to the marketing provider's REST API

/// Port for paging through the provider's segment listing
#[async_trait]
pub trait SegmentListing: Send + Sync + 'static {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<SegmentPage>;
}

/// Port for creating or updating a subscriber record
#[async_trait]
pub trait SubscriberUpsert: Send + Sync + 'static {
    async fn upsert(&self, subscriber: &SubscriberPayload) -> Result<()>;
}
