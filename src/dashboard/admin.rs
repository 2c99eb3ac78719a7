//! Platform administration dashboard.

use super::DashboardTab;
use crate::types::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    #[default]
    Overview,
    Users,
    Content,
    Reports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    UserSignup,
    CounselorApplication,
    SessionCompleted,
    PaymentProcessed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub message: &'static str,
    pub time: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthPoint {
    pub month: &'static str,
    pub users: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Pending,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ManagedUser {
    pub name: &'static str,
    pub email: &'static str,
    pub role: Role,
    pub status: AccountStatus,
    pub joined: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub users: u32,
    pub counselors: u32,
    pub admins: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentCounts {
    pub articles: u32,
    pub events: u32,
    pub resources: u32,
    pub pages: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentUpdate {
    pub title: &'static str,
    pub kind: &'static str,
    pub author: &'static str,
    pub updated: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialReport {
    pub total_revenue_ytd: u32,
    pub platform_fees: u32,
    pub counselor_payouts: u32,
    pub session_completion_rate_percent: u32,
    pub user_satisfaction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminSummary {
    pub total_users: u32,
    pub active_counselors: u32,
    pub sessions_today: u32,
    pub monthly_revenue: u32,
    pub pending_approvals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum AdminPanel {
    Overview {
        recent_activity: &'static [Activity],
        user_growth: &'static [GrowthPoint],
        net_user_growth: i64,
        system_health: &'static [Metric],
    },
    Users {
        counts: RoleCounts,
        recent_users: &'static [ManagedUser],
    },
    Content {
        counts: ContentCounts,
        recent_updates: &'static [ContentUpdate],
    },
    Reports(FinancialReport),
}

pub const RECENT_ACTIVITY: &[Activity] = &[
    Activity {
        kind: ActivityKind::UserSignup,
        message: "New user registered: Sarah M.",
        time: "2 minutes ago",
    },
    Activity {
        kind: ActivityKind::CounselorApplication,
        message: "Counselor application submitted: Dr. James Wilson",
        time: "15 minutes ago",
    },
    Activity {
        kind: ActivityKind::SessionCompleted,
        message: "Session completed: Client A with Dr. Chen",
        time: "23 minutes ago",
    },
    Activity {
        kind: ActivityKind::PaymentProcessed,
        message: "Payment processed: $120 for session #1234",
        time: "1 hour ago",
    },
];

pub const USER_GROWTH: &[GrowthPoint] = &[
    GrowthPoint { month: "Jan", users: 8500 },
    GrowthPoint { month: "Feb", users: 9200 },
    GrowthPoint { month: "Mar", users: 9800 },
    GrowthPoint { month: "Apr", users: 10247 },
];

pub const SYSTEM_HEALTH: &[Metric] = &[
    Metric { label: "Server Uptime", value: "99.9%" },
    Metric { label: "Database Performance", value: "Excellent" },
    Metric { label: "API Response Time", value: "120ms" },
    Metric { label: "Storage Usage", value: "67%" },
];

pub const RECENT_USERS: &[ManagedUser] = &[
    ManagedUser {
        name: "Sarah Johnson",
        email: "sarah@email.com",
        role: Role::User,
        status: AccountStatus::Active,
        joined: "2025-01-10",
    },
    ManagedUser {
        name: "Dr. Michael Chen",
        email: "mchen@email.com",
        role: Role::Counselor,
        status: AccountStatus::Pending,
        joined: "2025-01-09",
    },
    ManagedUser {
        name: "Emily Rodriguez",
        email: "emily@email.com",
        role: Role::User,
        status: AccountStatus::Active,
        joined: "2025-01-08",
    },
    ManagedUser {
        name: "Dr. James Wilson",
        email: "jwilson@email.com",
        role: Role::Counselor,
        status: AccountStatus::Active,
        joined: "2025-01-07",
    },
];

pub const RECENT_CONTENT: &[ContentUpdate] = &[
    ContentUpdate {
        title: "Understanding Anxiety: A Complete Guide",
        kind: "Article",
        author: "Dr. Sarah Chen",
        updated: "2 hours ago",
    },
    ContentUpdate {
        title: "Mindfulness Workshop Series",
        kind: "Event",
        author: "Admin",
        updated: "1 day ago",
    },
    ContentUpdate {
        title: "Depression Recovery Resources",
        kind: "Resource",
        author: "Dr. Michael Rodriguez",
        updated: "2 days ago",
    },
];

/// Users gained between the first and last point of the series.
pub fn net_user_growth(series: &[GrowthPoint]) -> i64 {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => i64::from(last.users) - i64::from(first.users),
        _ => 0,
    }
}

impl DashboardTab for AdminTab {
    type Summary = AdminSummary;
    type Panel = AdminPanel;

    fn all() -> &'static [Self] {
        &[
            AdminTab::Overview,
            AdminTab::Users,
            AdminTab::Content,
            AdminTab::Reports,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            AdminTab::Overview => "overview",
            AdminTab::Users => "users",
            AdminTab::Content => "content",
            AdminTab::Reports => "reports",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AdminTab::Overview => "Overview",
            AdminTab::Users => "User Management",
            AdminTab::Content => "Content Management",
            AdminTab::Reports => "Reports",
        }
    }

    fn summary() -> AdminSummary {
        AdminSummary {
            total_users: 10247,
            active_counselors: 523,
            sessions_today: 89,
            monthly_revenue: 124500,
            pending_approvals: 12,
        }
    }

    fn panel(&self) -> AdminPanel {
        match self {
            AdminTab::Overview => AdminPanel::Overview {
                recent_activity: RECENT_ACTIVITY,
                user_growth: USER_GROWTH,
                net_user_growth: net_user_growth(USER_GROWTH),
                system_health: SYSTEM_HEALTH,
            },
            AdminTab::Users => AdminPanel::Users {
                counts: RoleCounts {
                    users: 8947,
                    counselors: 523,
                    admins: 12,
                },
                recent_users: RECENT_USERS,
            },
            AdminTab::Content => AdminPanel::Content {
                counts: ContentCounts {
                    articles: 247,
                    events: 34,
                    resources: 156,
                    pages: 12,
                },
                recent_updates: RECENT_CONTENT,
            },
            AdminTab::Reports => AdminPanel::Reports(FinancialReport {
                total_revenue_ytd: 1_247_500,
                platform_fees: 187_125,
                counselor_payouts: 1_060_375,
                session_completion_rate_percent: 94,
                user_satisfaction: 4.8,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_user_growth() {
        assert_eq!(net_user_growth(USER_GROWTH), 1747);
        assert_eq!(net_user_growth(&[]), 0);
    }

    #[test]
    fn test_reports_add_up() {
        match AdminTab::Reports.panel() {
            AdminPanel::Reports(report) => {
                assert_eq!(
                    report.platform_fees + report.counselor_payouts,
                    report.total_revenue_ytd
                );
            }
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[test]
    fn test_users_panel_serializes_roles_lowercase() {
        let value = serde_json::to_value(AdminTab::Users.panel()).unwrap();
        assert_eq!(value["tab"], "users");
        assert_eq!(value["recent_users"][1]["role"], "counselor");
        assert_eq!(value["recent_users"][1]["status"], "pending");
    }

    #[test]
    fn test_tab_labels() {
        assert_eq!(AdminTab::Users.label(), "User Management");
        assert_eq!(AdminTab::parse("CONTENT"), Some(AdminTab::Content));
        assert_eq!(AdminTab::parse("schedule"), None);
    }
}
