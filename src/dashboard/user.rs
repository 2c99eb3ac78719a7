//! Dashboard for people using the platform.

use super::DashboardTab;
use serde::{Deserialize, Serialize};

/// Number of mood entries shown on the progress tab.
pub const MOOD_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTab {
    #[default]
    Overview,
    Sessions,
    Progress,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Completed,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpcomingSession {
    pub id: &'static str,
    pub counselor: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub session_type: &'static str,
    pub topic: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PastSession {
    pub id: &'static str,
    pub counselor: &'static str,
    pub date: &'static str,
    /// Stars out of five.
    pub rating: u8,
    pub notes: &'static str,
}

/// One row of the combined session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionHistoryEntry {
    pub counselor: &'static str,
    pub date: &'static str,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodEntry {
    pub date: &'static str,
    /// Self-reported, 1 to 10.
    pub mood: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
    pub progress_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub name: &'static str,
    pub member_since: &'static str,
    pub streak_days: u32,
    pub total_sessions: u32,
    pub ai_chats: u32,
    pub upcoming_sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum UserPanel {
    Overview {
        upcoming: &'static [UpcomingSession],
        recent: &'static [PastSession],
    },
    Sessions {
        history: Vec<SessionHistoryEntry>,
    },
    Progress {
        recent_moods: &'static [MoodEntry],
        achievements: &'static [Achievement],
    },
    Profile {
        name: &'static str,
        member_since: &'static str,
    },
}

const NAME: &str = "Sarah Johnson";
const MEMBER_SINCE: &str = "2024-06-15";

pub const UPCOMING_SESSIONS: &[UpcomingSession] = &[
    UpcomingSession {
        id: "1",
        counselor: "Dr. Sarah Chen",
        date: "2025-01-15",
        time: "2:00 PM",
        session_type: "Video Call",
        topic: "Anxiety Management",
    },
    UpcomingSession {
        id: "2",
        counselor: "Michael Rodriguez",
        date: "2025-01-18",
        time: "10:00 AM",
        session_type: "Phone Call",
        topic: "Work Stress",
    },
];

pub const RECENT_SESSIONS: &[PastSession] = &[
    PastSession {
        id: "1",
        counselor: "Dr. Sarah Chen",
        date: "2025-01-08",
        rating: 5,
        notes: "Great session on breathing techniques",
    },
    PastSession {
        id: "2",
        counselor: "Michael Rodriguez",
        date: "2025-01-05",
        rating: 4,
        notes: "Helpful discussion about workplace boundaries",
    },
];

pub const MOOD_LOG: &[MoodEntry] = &[
    MoodEntry { date: "2025-01-01", mood: 7 },
    MoodEntry { date: "2025-01-02", mood: 6 },
    MoodEntry { date: "2025-01-03", mood: 8 },
    MoodEntry { date: "2025-01-04", mood: 7 },
    MoodEntry { date: "2025-01-05", mood: 9 },
    MoodEntry { date: "2025-01-06", mood: 8 },
    MoodEntry { date: "2025-01-07", mood: 7 },
];

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        title: "7-Day Wellness Streak",
        description: "Completed daily check-ins",
        progress_percent: 100,
    },
    Achievement {
        title: "First Session Complete",
        description: "Attended your first counseling session",
        progress_percent: 100,
    },
    Achievement {
        title: "Mindfulness Master",
        description: "Complete 10 meditation sessions",
        progress_percent: 60,
    },
];

/// The last [`MOOD_WINDOW`] entries, oldest first.
pub fn recent_moods(log: &[MoodEntry]) -> &[MoodEntry] {
    &log[log.len().saturating_sub(MOOD_WINDOW)..]
}

/// Completed sessions followed by upcoming ones.
pub fn session_history() -> Vec<SessionHistoryEntry> {
    let completed = RECENT_SESSIONS.iter().map(|s| SessionHistoryEntry {
        counselor: s.counselor,
        date: s.date,
        status: SessionStatus::Completed,
        rating: Some(s.rating),
        detail: Some(s.notes),
    });
    let upcoming = UPCOMING_SESSIONS.iter().map(|s| SessionHistoryEntry {
        counselor: s.counselor,
        date: s.date,
        status: SessionStatus::Upcoming,
        rating: None,
        detail: Some(s.topic),
    });
    completed.chain(upcoming).collect()
}

impl DashboardTab for UserTab {
    type Summary = UserSummary;
    type Panel = UserPanel;

    fn all() -> &'static [Self] {
        &[
            UserTab::Overview,
            UserTab::Sessions,
            UserTab::Progress,
            UserTab::Profile,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            UserTab::Overview => "overview",
            UserTab::Sessions => "sessions",
            UserTab::Progress => "progress",
            UserTab::Profile => "profile",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            UserTab::Overview => "Overview",
            UserTab::Sessions => "Sessions",
            UserTab::Progress => "Progress",
            UserTab::Profile => "Profile",
        }
    }

    fn summary() -> UserSummary {
        UserSummary {
            name: NAME,
            member_since: MEMBER_SINCE,
            streak_days: 12,
            total_sessions: 15,
            ai_chats: 47,
            upcoming_sessions: UPCOMING_SESSIONS.len(),
        }
    }

    fn panel(&self) -> UserPanel {
        match self {
            UserTab::Overview => UserPanel::Overview {
                upcoming: UPCOMING_SESSIONS,
                recent: RECENT_SESSIONS,
            },
            UserTab::Sessions => UserPanel::Sessions {
                history: session_history(),
            },
            UserTab::Progress => UserPanel::Progress {
                recent_moods: recent_moods(MOOD_LOG),
                achievements: ACHIEVEMENTS,
            },
            UserTab::Profile => UserPanel::Profile {
                name: NAME,
                member_since: MEMBER_SINCE,
            },
        }
    }
}
