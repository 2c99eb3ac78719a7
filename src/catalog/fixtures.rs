//! Static catalog data.

use super::{Counselor, Event, EventType, Resource, ResourceType, SessionMedium};
use std::sync::LazyLock;

pub const SPECIALTY_FILTERS: &[&str] = &[
    "All",
    "Anxiety",
    "Depression",
    "Trauma",
    "Relationships",
    "LGBTQ+ Support",
    "Career Counseling",
];

pub const EVENT_CATEGORIES: &[&str] = &[
    "All",
    "Mental Health",
    "Relationships",
    "LGBTQ+ Support",
    "Self-Care",
    "Parenting",
    "Trauma Support",
];

pub const RESOURCE_CATEGORIES: &[&str] = &[
    "All",
    "Mental Health",
    "Self-Care",
    "Relationships",
    "LGBTQ+ Support",
    "Parenting",
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn image(photo: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=400"
    )
}

static COUNSELORS: LazyLock<Vec<Counselor>> = LazyLock::new(|| {
    use SessionMedium::*;
    vec![
        Counselor {
            id: "1".to_string(),
            name: "Dr. Sarah Chen".to_string(),
            title: "Licensed Clinical Psychologist".to_string(),
            specialties: strings(&["Anxiety", "Depression", "Trauma"]),
            rating: 4.9,
            review_count: 127,
            image: image(5327921),
            availability: strings(&["Today 2:00 PM", "Tomorrow 10:00 AM", "Friday 3:00 PM"]),
            price: 120,
            location: "San Francisco, CA".to_string(),
            session_mediums: vec![Video, Phone, InPerson],
            languages: strings(&["English", "Mandarin"]),
        },
        Counselor {
            id: "2".to_string(),
            name: "Michael Rodriguez".to_string(),
            title: "Licensed Marriage & Family Therapist".to_string(),
            specialties: strings(&["Relationships", "Couples Therapy", "Family Counseling"]),
            rating: 4.8,
            review_count: 89,
            image: image(5327580),
            availability: strings(&["Today 4:00 PM", "Tomorrow 2:00 PM", "Monday 11:00 AM"]),
            price: 110,
            location: "Los Angeles, CA".to_string(),
            session_mediums: vec![Video, InPerson],
            languages: strings(&["English", "Spanish"]),
        },
        Counselor {
            id: "3".to_string(),
            name: "Dr. Ashley Johnson".to_string(),
            title: "Clinical Social Worker".to_string(),
            specialties: strings(&["LGBTQ+ Support", "Identity", "Coming Out"]),
            rating: 5.0,
            review_count: 156,
            image: image(5327589),
            availability: strings(&["Tomorrow 9:00 AM", "Friday 1:00 PM", "Saturday 10:00 AM"]),
            price: 95,
            location: "Seattle, WA".to_string(),
            session_mediums: vec![Video, Phone],
            languages: strings(&["English"]),
        },
        Counselor {
            id: "4".to_string(),
            name: "Dr. James Wilson".to_string(),
            title: "Psychiatrist & Therapist".to_string(),
            specialties: strings(&["Career Counseling", "Work Stress", "Leadership"]),
            rating: 4.7,
            review_count: 73,
            image: image(5327656),
            availability: strings(&["Today 6:00 PM", "Monday 9:00 AM", "Tuesday 3:00 PM"]),
            price: 140,
            location: "New York, NY".to_string(),
            session_mediums: vec![Video, Phone, InPerson],
            languages: strings(&["English"]),
        },
    ]
});

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    title: &str,
    event_type: EventType,
    date: &str,
    time: &str,
    duration: &str,
    instructor: &str,
    (capacity, registered): (u32, u32),
    price: &str,
    description: &str,
    photo: u32,
    category: &str,
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        event_type,
        date: date.to_string(),
        time: time.to_string(),
        duration: duration.to_string(),
        instructor: instructor.to_string(),
        capacity,
        registered,
        price: price.to_string(),
        description: description.to_string(),
        image: image(photo),
        location: "Online".to_string(),
        category: category.to_string(),
    }
}

static EVENTS: LazyLock<Vec<Event>> = LazyLock::new(|| {
    vec![
        event(
            "1",
            "Managing Anxiety in Daily Life",
            EventType::Webinar,
            "2025-01-15",
            "7:00 PM EST",
            "60 minutes",
            "Dr. Sarah Chen",
            (100, 67),
            "Free",
            "Join us for an interactive webinar on practical strategies for managing anxiety in everyday situations.",
            4101143,
            "Mental Health",
        ),
        event(
            "2",
            "Couples Communication Workshop",
            EventType::Workshop,
            "2025-01-18",
            "2:00 PM EST",
            "2 hours",
            "Michael Rodriguez",
            (20, 14),
            "$49",
            "Interactive workshop for couples to improve communication skills and strengthen relationships.",
            7176315,
            "Relationships",
        ),
        event(
            "3",
            "LGBTQ+ Support Group Meeting",
            EventType::SupportGroup,
            "2025-01-20",
            "6:00 PM EST",
            "90 minutes",
            "Dr. Ashley Johnson",
            (15, 8),
            "Free",
            "Safe space for LGBTQ+ individuals to share experiences and support each other.",
            5327589,
            "LGBTQ+ Support",
        ),
        event(
            "4",
            "Mindfulness Meditation Session",
            EventType::GroupSession,
            "2025-01-22",
            "8:00 AM EST",
            "45 minutes",
            "Dr. Maria Garcia",
            (50, 23),
            "$15",
            "Start your week with a guided mindfulness meditation session to reduce stress and increase focus.",
            3757952,
            "Self-Care",
        ),
        event(
            "5",
            "Parenting Teens: Navigating Challenges",
            EventType::Webinar,
            "2025-01-25",
            "7:30 PM EST",
            "90 minutes",
            "Dr. James Wilson",
            (75, 42),
            "$25",
            "Expert guidance for parents dealing with teenage challenges and improving family communication.",
            4101175,
            "Parenting",
        ),
        event(
            "6",
            "Trauma Recovery Workshop",
            EventType::Workshop,
            "2025-01-28",
            "1:00 PM EST",
            "3 hours",
            "Dr. Alex Thompson",
            (12, 7),
            "$75",
            "Intensive workshop focusing on healing strategies and building resilience after trauma.",
            5327656,
            "Trauma Support",
        ),
    ]
});

#[allow(clippy::too_many_arguments)]
fn resource(
    id: &str,
    title: &str,
    resource_type: ResourceType,
    category: &str,
    author: &str,
    length: &str,
    photo: u32,
    excerpt: &str,
    tags: &[&str],
) -> Resource {
    Resource {
        id: id.to_string(),
        title: title.to_string(),
        resource_type,
        category: category.to_string(),
        author: author.to_string(),
        length: length.to_string(),
        thumbnail: image(photo),
        excerpt: excerpt.to_string(),
        tags: strings(tags),
    }
}

static RESOURCES: LazyLock<Vec<Resource>> = LazyLock::new(|| {
    vec![
        resource(
            "1",
            "Understanding Anxiety: A Complete Guide",
            ResourceType::Article,
            "Mental Health",
            "Dr. Sarah Chen",
            "8 min read",
            4101143,
            "Learn about different types of anxiety disorders, their symptoms, and effective coping strategies.",
            &["anxiety", "mental health", "coping strategies"],
        ),
        resource(
            "2",
            "Mindfulness Meditation for Beginners",
            ResourceType::Video,
            "Self-Care",
            "Michael Rodriguez",
            "15:23",
            3757952,
            "A guided meditation session perfect for those new to mindfulness practices.",
            &["meditation", "mindfulness", "relaxation"],
        ),
        resource(
            "3",
            "Building Healthy Relationships Workbook",
            ResourceType::Pdf,
            "Relationships",
            "Dr. Ashley Johnson",
            "24 pages",
            7176315,
            "Interactive exercises and worksheets to improve communication and strengthen relationships.",
            &["relationships", "communication", "worksheets"],
        ),
        resource(
            "4",
            "Stress Management Techniques",
            ResourceType::Article,
            "Mental Health",
            "Dr. James Wilson",
            "6 min read",
            5327656,
            "Practical strategies for managing stress in daily life and work environments.",
            &["stress", "work-life balance", "productivity"],
        ),
        resource(
            "5",
            "Depression Recovery: Hope and Healing",
            ResourceType::Video,
            "Mental Health",
            "Dr. Maria Garcia",
            "22:17",
            4101175,
            "Understanding depression and the journey to recovery with expert insights.",
            &["depression", "recovery", "hope"],
        ),
        resource(
            "6",
            "LGBTQ+ Mental Health Resource Guide",
            ResourceType::Pdf,
            "LGBTQ+ Support",
            "Dr. Alex Thompson",
            "18 pages",
            7176315,
            "Comprehensive guide addressing unique mental health challenges faced by LGBTQ+ individuals.",
            &["lgbtq+", "identity", "support"],
        ),
    ]
});

pub fn counselors() -> &'static [Counselor] {
    &COUNSELORS
}

pub fn events() -> &'static [Event] {
    &EVENTS
}

pub fn resources() -> &'static [Resource] {
    &RESOURCES
}
