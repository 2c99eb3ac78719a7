//! Dashboard for counselors.

use super::{utilisation_percent, DashboardTab};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounselorTab {
    #[default]
    Overview,
    Schedule,
    Clients,
    Earnings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Appointment {
    pub id: &'static str,
    pub client: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub session_type: &'static str,
    pub topic: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletedSession {
    pub id: &'static str,
    pub client: &'static str,
    pub date: &'static str,
    pub duration: &'static str,
    pub notes: &'static str,
    pub rating: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub day: &'static str,
    pub slots: u32,
    pub booked: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    #[serde(flatten)]
    pub day: DaySchedule,
    pub utilisation_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    pub id: u32,
    pub name: &'static str,
    pub sessions: u32,
    pub last_seen: &'static str,
    pub status: ClientStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Earnings {
    pub this_month: u32,
    pub last_month: u32,
    pub average_per_session: u32,
    pub bank_account: &'static str,
    pub next_payout: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounselorSummary {
    pub name: &'static str,
    pub specialties: &'static [&'static str],
    pub rating: f32,
    pub total_clients: u32,
    pub sessions_this_week: u32,
    pub monthly_earnings: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum CounselorPanel {
    Overview {
        upcoming: &'static [Appointment],
        recent: &'static [CompletedSession],
    },
    Schedule {
        days: Vec<ScheduleRow>,
        total_slots: u32,
        total_booked: u32,
        utilisation_percent: f64,
        average_session_minutes: u32,
        no_show_rate_percent: u32,
    },
    Clients {
        clients: &'static [ClientRecord],
        active: usize,
    },
    Earnings(Earnings),
}

pub const UPCOMING: &[Appointment] = &[
    Appointment {
        id: "1",
        client: "Client A",
        date: "2025-01-15",
        time: "2:00 PM",
        session_type: "Video Call",
        topic: "Anxiety Management",
    },
    Appointment {
        id: "2",
        client: "Client B",
        date: "2025-01-15",
        time: "4:00 PM",
        session_type: "Phone Call",
        topic: "Depression Support",
    },
];

pub const RECENT: &[CompletedSession] = &[
    CompletedSession {
        id: "1",
        client: "Client C",
        date: "2025-01-14",
        duration: "50 min",
        notes: "Progress on breathing techniques",
        rating: 5,
    },
    CompletedSession {
        id: "2",
        client: "Client D",
        date: "2025-01-14",
        duration: "60 min",
        notes: "Discussed workplace stress management",
        rating: 5,
    },
];

pub const WEEKLY_SCHEDULE: &[DaySchedule] = &[
    DaySchedule { day: "Monday", slots: 6, booked: 4 },
    DaySchedule { day: "Tuesday", slots: 6, booked: 6 },
    DaySchedule { day: "Wednesday", slots: 6, booked: 3 },
    DaySchedule { day: "Thursday", slots: 6, booked: 5 },
    DaySchedule { day: "Friday", slots: 6, booked: 4 },
    DaySchedule { day: "Saturday", slots: 4, booked: 2 },
    DaySchedule { day: "Sunday", slots: 0, booked: 0 },
];

pub const CLIENTS: &[ClientRecord] = &[
    ClientRecord {
        id: 1,
        name: "Client A",
        sessions: 8,
        last_seen: "2025-01-14",
        status: ClientStatus::Active,
    },
    ClientRecord {
        id: 2,
        name: "Client B",
        sessions: 12,
        last_seen: "2025-01-13",
        status: ClientStatus::Active,
    },
    ClientRecord {
        id: 3,
        name: "Client C",
        sessions: 5,
        last_seen: "2025-01-10",
        status: ClientStatus::Inactive,
    },
    ClientRecord {
        id: 4,
        name: "Client D",
        sessions: 15,
        last_seen: "2025-01-14",
        status: ClientStatus::Active,
    },
];

const MONTHLY_EARNINGS: u32 = 3240;

pub fn schedule_rows(schedule: &[DaySchedule]) -> Vec<ScheduleRow> {
    schedule
        .iter()
        .map(|day| ScheduleRow {
            day: *day,
            utilisation_percent: utilisation_percent(day.booked, day.slots),
        })
        .collect()
}

pub fn total_booked(schedule: &[DaySchedule]) -> u32 {
    schedule.iter().map(|d| d.booked).sum()
}

fn schedule_panel() -> CounselorPanel {
    let total_slots = WEEKLY_SCHEDULE.iter().map(|d| d.slots).sum();
    let total_booked = total_booked(WEEKLY_SCHEDULE);

    CounselorPanel::Schedule {
        days: schedule_rows(WEEKLY_SCHEDULE),
        total_slots,
        total_booked,
        utilisation_percent: utilisation_percent(total_booked, total_slots),
        average_session_minutes: 52,
        no_show_rate_percent: 3,
    }
}

impl DashboardTab for CounselorTab {
    type Summary = CounselorSummary;
    type Panel = CounselorPanel;

    fn all() -> &'static [Self] {
        &[
            CounselorTab::Overview,
            CounselorTab::Schedule,
            CounselorTab::Clients,
            CounselorTab::Earnings,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            CounselorTab::Overview => "overview",
            CounselorTab::Schedule => "schedule",
            CounselorTab::Clients => "clients",
            CounselorTab::Earnings => "earnings",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CounselorTab::Overview => "Overview",
            CounselorTab::Schedule => "Schedule",
            CounselorTab::Clients => "Clients",
            CounselorTab::Earnings => "Earnings",
        }
    }

    fn summary() -> CounselorSummary {
        CounselorSummary {
            name: "Dr. Sarah Chen",
            specialties: &["Anxiety", "Depression", "Trauma"],
            rating: 4.9,
            total_clients: 47,
            sessions_this_week: 12,
            monthly_earnings: MONTHLY_EARNINGS,
        }
    }

    fn panel(&self) -> CounselorPanel {
        match self {
            CounselorTab::Overview => CounselorPanel::Overview {
                upcoming: UPCOMING,
                recent: RECENT,
            },
            CounselorTab::Schedule => schedule_panel(),
            CounselorTab::Clients => CounselorPanel::Clients {
                clients: CLIENTS,
                active: CLIENTS
                    .iter()
                    .filter(|c| c.status == ClientStatus::Active)
                    .count(),
            },
            CounselorTab::Earnings => CounselorPanel::Earnings(Earnings {
                this_month: MONTHLY_EARNINGS,
                last_month: 2890,
                average_per_session: 120,
                bank_account: "****1234",
                next_payout: "January 20, 2025",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_rows() {
        let rows = schedule_rows(WEEKLY_SCHEDULE);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[1].utilisation_percent, 100.0);
        assert_eq!(rows[6].utilisation_percent, 0.0);
        assert!((rows[0].utilisation_percent - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_schedule_totals() {
        assert_eq!(total_booked(WEEKLY_SCHEDULE), 24);

        match CounselorTab::Schedule.panel() {
            CounselorPanel::Schedule {
                total_slots,
                total_booked,
                ..
            } => {
                assert_eq!(total_slots, 34);
                assert_eq!(total_booked, 24);
            }
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[test]
    fn test_clients_panel_counts_active() {
        match CounselorTab::Clients.panel() {
            CounselorPanel::Clients { clients, active } => {
                assert_eq!(clients.len(), 4);
                assert_eq!(active, 3);
            }
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[test]
    fn test_earnings_panel_serializes_with_tab() {
        let value = serde_json::to_value(CounselorTab::Earnings.panel()).unwrap();
        assert_eq!(value["tab"], "earnings");
        assert_eq!(value["this_month"], 3240);
    }
}
