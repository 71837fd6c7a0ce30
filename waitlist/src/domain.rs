use serde::{Deserialize, Serialize};

/// Flodesk segment names the waitlist signs leads up to, by site language.
pub const SEGMENT_NAME_ENGLISH: &str = "Whagons5-waitlist-ENGLISH";
pub const SEGMENT_NAME_SPANISH: &str = "Whagons5-waitlist-ESPANOL";

/// Stamped on every subscriber so campaigns can tell where a lead came from.
pub const LEAD_SOURCE: &str = "whagons-website";

const DEFAULT_COUNTRY: &str = "Unknown";
const DEFAULT_LANGUAGE: &str = "en";

/// A validated waitlist signup.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub company: String,
    pub industry: String,
    pub country: Option<String>,
    pub language: Option<String>,
}

impl Lead {
    /// Segment this lead should be added to, based on the site language.
    pub fn segment_name(&self) -> &'static str {
        segment_name_for_language(self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE))
    }
}

pub fn segment_name_for_language(language: &str) -> &'static str {
    if language == "es" {
        SEGMENT_NAME_SPANISH
    } else {
        SEGMENT_NAME_ENGLISH
    }
}

/// One entry from the provider's segment listing.
#[derive(Clone, Debug, Deserialize)]
pub struct Segment {
    pub id: String,
    pub name: String,
}

/// Pagination metadata as reported by the provider.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub total_pages: u32,
}

/// One page of the provider's segment listing.
///
/// Both fields are optional: a well-formed body without a `data` array marks
/// the end of the listing rather than an error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SegmentPage {
    #[serde(default)]
    pub data: Option<Vec<Segment>>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

/// Subscriber record sent to the provider when a lead signs up.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubscriberPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segment_ids: Vec<String>,
    pub custom_fields: CustomFields,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomFields {
    pub company: String,
    pub industry: String,
    pub country: String,
    pub language: String,
    pub source: String,
}

impl SubscriberPayload {
    /// Build the provider payload for a lead, attaching the segment when one
    /// was resolved.
    pub fn from_lead(lead: &Lead, segment_id: Option<&str>) -> Self {
        let (first_name, last_name) = split_name(&lead.name);
        Self {
            email: lead.email.trim().to_string(),
            first_name,
            last_name,
            segment_ids: segment_id
                .map(|id| vec![id.to_string()])
                .unwrap_or_default(),
            custom_fields: CustomFields {
                company: lead.company.trim().to_string(),
                industry: lead.industry.clone(),
                country: lead
                    .country
                    .clone()
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
                language: lead
                    .language
                    .clone()
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
                source: LEAD_SOURCE.to_string(),
            },
        }
    }
}

/// First whitespace-separated token becomes the first name, the remainder the
/// last name. Single-token names keep the last name empty.
fn split_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}
