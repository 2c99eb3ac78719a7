//! Counselor, event and resource catalogs.
//!
//! The catalogs are static, read-only fixtures. Each listing has a query type
//! whose dimensions (free-text search, category, type) are independent
//! predicates, so they can be applied in any order with the same result. A
//! dimension set to `All` or left empty does not filter.

pub mod fixtures;

pub use fixtures::{counselors, events, resources};

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

/// Filter value that disables its dimension.
pub const ALL: &str = "All";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SessionMedium {
    #[default]
    Video,
    Phone,
    InPerson,
}

impl SessionMedium {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMedium::Video => "video",
            SessionMedium::Phone => "phone",
            SessionMedium::InPerson => "in-person",
        }
    }
}

impl fmt::Display for SessionMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Counselor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub specialties: Vec<String>,
    pub rating: f32,
    pub review_count: u32,
    pub image: String,
    /// Bookable time slots, as displayed.
    pub availability: Vec<String>,
    /// Per-session price in whole dollars.
    pub price: u32,
    pub location: String,
    pub session_mediums: Vec<SessionMedium>,
    pub languages: Vec<String>,
}

impl Counselor {
    pub fn offers(&self, medium: SessionMedium) -> bool {
        self.session_mediums.contains(&medium)
    }

    pub fn has_slot(&self, slot: &str) -> bool {
        self.availability.iter().any(|s| s == slot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Webinar,
    Workshop,
    SupportGroup,
    GroupSession,
}

impl EventType {
    pub fn all() -> [EventType; 4] {
        [
            EventType::Webinar,
            EventType::Workshop,
            EventType::SupportGroup,
            EventType::GroupSession,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Webinar => "webinar",
            EventType::Workshop => "workshop",
            EventType::SupportGroup => "support-group",
            EventType::GroupSession => "group-session",
        }
    }

    /// Human-readable label, e.g. `Support Group`.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Webinar => "Webinar",
            EventType::Workshop => "Workshop",
            EventType::SupportGroup => "Support Group",
            EventType::GroupSession => "Group Session",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub instructor: String,
    pub capacity: u32,
    pub registered: u32,
    /// Price label (`Free`, `$49`).
    pub price: String,
    pub description: String,
    pub image: String,
    pub location: String,
    pub category: String,
}

impl Event {
    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.registered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Article,
    Video,
    Pdf,
}

impl ResourceType {
    pub fn all() -> [ResourceType; 3] {
        [ResourceType::Article, ResourceType::Video, ResourceType::Pdf]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Article => "article",
            ResourceType::Video => "video",
            ResourceType::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub category: String,
    pub author: String,
    /// Read time, running time or page count depending on the type.
    pub length: String,
    pub thumbnail: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

/// Listing entry for an event, with the derived seat count.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventListing {
    #[serde(flatten)]
    pub event: Event,
    pub spots_left: u32,
}

impl From<&Event> for EventListing {
    fn from(event: &Event) -> Self {
        Self {
            spots_left: event.spots_left(),
            event: event.clone(),
        }
    }
}

/// Filter choices offered for each listing. Every list starts with `All`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterOptions {
    pub specialties: Vec<String>,
    pub event_categories: Vec<String>,
    pub event_types: Vec<String>,
    pub resource_categories: Vec<String>,
    pub resource_types: Vec<String>,
}

pub fn filter_options() -> FilterOptions {
    fn with_all<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        std::iter::once(ALL)
            .chain(values)
            .map(str::to_string)
            .collect()
    }

    FilterOptions {
        specialties: fixtures::SPECIALTY_FILTERS.iter().map(|s| s.to_string()).collect(),
        event_categories: fixtures::EVENT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        event_types: with_all(EventType::all().iter().map(|t| t.as_str())),
        resource_categories: fixtures::RESOURCE_CATEGORIES
            .iter()
            .map(|s| s.to_string())
            .collect(),
        resource_types: with_all(ResourceType::all().iter().map(|t| t.as_str())),
    }
}

/// `None` when the dimension is unset, empty or `All`.
fn active(value: &Option<String>) -> Option<&str> {
    match value.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(v) if v.eq_ignore_ascii_case(ALL) => None,
        Some(v) => Some(v),
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn search_term(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CounselorQuery {
    /// Case-insensitive substring of the name or a specialty
    pub search: Option<String>,
    /// Exact specialty; `All` disables
    pub specialty: Option<String>,
}

impl CounselorQuery {
    pub fn matches_search(&self, counselor: &Counselor) -> bool {
        match search_term(&self.search) {
            None => true,
            Some(term) => {
                contains_ci(&counselor.name, &term)
                    || counselor.specialties.iter().any(|s| contains_ci(s, &term))
            }
        }
    }

    pub fn matches_specialty(&self, counselor: &Counselor) -> bool {
        match active(&self.specialty) {
            None => true,
            Some(specialty) => counselor.specialties.iter().any(|s| s == specialty),
        }
    }

    pub fn matches(&self, counselor: &Counselor) -> bool {
        self.matches_search(counselor) && self.matches_specialty(counselor)
    }

    pub fn apply<'a>(&self, counselors: &'a [Counselor]) -> Vec<&'a Counselor> {
        counselors.iter().filter(|c| self.matches(c)).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventQuery {
    /// Case-insensitive substring of the title or description
    pub search: Option<String>,
    pub category: Option<String>,
    /// Event type, e.g. `support-group`
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

impl EventQuery {
    pub fn matches(&self, event: &Event) -> bool {
        let search = match search_term(&self.search) {
            None => true,
            Some(term) => contains_ci(&event.title, &term) || contains_ci(&event.description, &term),
        };
        let category = active(&self.category).is_none_or(|c| event.category == c);
        let kind = active(&self.event_type).is_none_or(|t| event.event_type.as_str() == t);

        search && category && kind
    }

    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResourceQuery {
    /// Case-insensitive substring of the title, excerpt or a tag
    pub search: Option<String>,
    pub category: Option<String>,
    /// `article`, `video` or `pdf`
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
}

impl ResourceQuery {
    pub fn matches(&self, resource: &Resource) -> bool {
        let search = match search_term(&self.search) {
            None => true,
            Some(term) => {
                contains_ci(&resource.title, &term)
                    || contains_ci(&resource.excerpt, &term)
                    || resource.tags.iter().any(|t| contains_ci(t, &term))
            }
        };
        let category = active(&self.category).is_none_or(|c| resource.category == c);
        let kind = active(&self.resource_type).is_none_or(|t| resource.resource_type.as_str() == t);

        search && category && kind
    }

    pub fn apply<'a>(&self, resources: &'a [Resource]) -> Vec<&'a Resource> {
        resources.iter().filter(|r| self.matches(r)).collect()
    }
}

pub fn find_counselor(id: &str) -> Option<&'static Counselor> {
    counselors().iter().find(|c| c.id == id)
}
