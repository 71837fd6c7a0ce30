use crate::domain::Segment;
use crate::ports::SegmentListing;
use crate::segments::cache::SegmentCache;
use shared::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Listing page size requested from the provider.
pub const SEGMENTS_PER_PAGE: u32 = 50;

/// Upper bound on listing pages fetched per lookup, so a provider that keeps
/// reporting more pages cannot hold a request in an endless loop.
pub const MAX_SEGMENT_PAGES: u32 = 40;

/// Outcome of a segment lookup.
///
/// `ConfirmedAbsent` is a completed search that found no match and is cached;
/// `LookupFailed` is a transport-level failure and is never cached. Callers
/// treat both as "submit without a segment".
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SegmentLookup {
    Found(String),
    ConfirmedAbsent,
    LookupFailed,
}

impl SegmentLookup {
    pub fn segment_id(&self) -> Option<&str> {
        match self {
            SegmentLookup::Found(id) => Some(id),
            _ => None,
        }
    }
}

/// Maps a segment display name to the provider-assigned id, with a
/// process-wide cache in front of the provider's paginated listing.
pub struct SegmentResolver {
    listing: Arc<dyn SegmentListing>,
    cache: SegmentCache,
}

impl SegmentResolver {
    pub fn new(listing: Arc<dyn SegmentListing>) -> Self {
        Self {
            listing,
            cache: SegmentCache::new(),
        }
    }

    pub fn with_cache_ttl(listing: Arc<dyn SegmentListing>, ttl: Duration) -> Self {
        Self {
            listing,
            cache: SegmentCache::with_ttl(ttl),
        }
    }

    /// Resolve `segment_name` to the provider's segment id.
    ///
    /// Serves fresh cache entries without network activity, otherwise pages
    /// through the full listing and scans it for an exact name match. There
    /// is no single-flight guard: concurrent cold lookups may each fetch the
    /// listing, and the last store wins.
    pub async fn resolve(&self, segment_name: &str) -> SegmentLookup {
        if let Some(cached) = self.cache.lookup(segment_name) {
            debug!(segment = segment_name, "segment cache hit");
            return match cached {
                Some(id) => SegmentLookup::Found(id),
                None => SegmentLookup::ConfirmedAbsent,
            };
        }

        let segments = match self.fetch_all_segments().await {
            Ok(segments) => segments,
            Err(err) => {
                warn!(segment = segment_name, error = %err, "segment listing failed");
                return SegmentLookup::LookupFailed;
            }
        };

        let segment_id = segments
            .iter()
            .find(|segment| segment.name == segment_name)
            .map(|segment| segment.id.clone());

        self.cache.store(segment_name, segment_id.clone());

        match segment_id {
            Some(id) => SegmentLookup::Found(id),
            None => SegmentLookup::ConfirmedAbsent,
        }
    }

    /// Accumulate the provider's segment listing page by page.
    ///
    /// A non-2xx page or a body without the expected shape ends the listing
    /// early and the prefix collected so far is returned; only transport
    /// failures surface as an error.
    async fn fetch_all_segments(&self) -> shared::Result<Vec<Segment>> {
        let mut segments = Vec::new();
        let mut page = 1;

        loop {
            let body = match self.listing.fetch_page(page, SEGMENTS_PER_PAGE).await {
                Ok(body) => body,
                Err(Error::ProviderStatus { status, .. }) => {
                    warn!(page, status, "segment listing returned an error status, stopping");
                    break;
                }
                Err(err) => return Err(err),
            };

            let Some(data) = body.data else {
                debug!(page, "segment listing page had no data array, stopping");
                break;
            };
            segments.extend(data);

            let total_pages = body.meta.map(|meta| meta.total_pages).unwrap_or(0);
            if page >= total_pages {
                break;
            }
            if page >= MAX_SEGMENT_PAGES {
                warn!(total_pages, "segment listing page cap reached, stopping");
                break;
            }
            page += 1;
        }

        Ok(segments)
    }
}
