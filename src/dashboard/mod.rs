//! Role dashboards.
//!
//! Every dashboard is a closed set of tabs implementing [`DashboardTab`].
//! A [`DashboardView`] has exactly one active tab (the first one until
//! switched) and exposes the fixture panel for it.

pub mod admin;
pub mod counselor;
pub mod user;

pub use admin::AdminTab;
pub use counselor::CounselorTab;
pub use user::UserTab;

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use utoipa::{IntoParams, ToSchema};

pub trait DashboardTab: Copy + Eq + Default + Debug + Serialize + Send + Sync + 'static {
    /// Headline figures shown above the tabs.
    type Summary: Serialize;
    /// Content of a single tab.
    type Panel: Serialize;

    fn all() -> &'static [Self];
    fn key(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn summary() -> Self::Summary;
    fn panel(&self) -> Self::Panel;

    fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::all()
            .iter()
            .copied()
            .find(|tab| tab.key().eq_ignore_ascii_case(key))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TabInfo {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardView<T: DashboardTab> {
    active: T,
}

impl<T: DashboardTab> DashboardView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> T {
        self.active
    }

    pub fn select(&mut self, tab: T) {
        self.active = tab;
    }

    pub fn tabs(&self) -> Vec<TabInfo> {
        T::all()
            .iter()
            .map(|tab| TabInfo {
                key: tab.key(),
                label: tab.label(),
            })
            .collect()
    }

    pub fn panel(&self) -> T::Panel {
        self.active.panel()
    }

    pub fn page(&self) -> DashboardPage<T> {
        DashboardPage {
            active_tab: self.active,
            tabs: self.tabs(),
            summary: T::summary(),
            panel: self.panel(),
        }
    }
}

#[derive(Serialize)]
#[serde(bound = "")]
pub struct DashboardPage<T: DashboardTab> {
    pub active_tab: T,
    pub tabs: Vec<TabInfo>,
    pub summary: T::Summary,
    pub panel: T::Panel,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Tab key; the first tab when omitted
    pub tab: Option<String>,
}

impl DashboardQuery {
    /// Open a view on the requested tab. Unknown keys are rejected.
    pub fn view<T: DashboardTab>(&self) -> Result<DashboardView<T>> {
        let mut view = DashboardView::new();
        if let Some(key) = self.tab.as_deref().filter(|k| !k.trim().is_empty()) {
            let tab = T::parse(key)
                .ok_or_else(|| AppError::InvalidInput(format!("Unknown dashboard tab: {}", key)))?;
            view.select(tab);
        }
        Ok(view)
    }
}

/// Share of booked slots as a percentage; `0` for days without slots.
pub fn utilisation_percent(booked: u32, slots: u32) -> f64 {
    if slots == 0 {
        0.0
    } else {
        f64::from(booked) / f64::from(slots) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tab_is_overview() {
        assert_eq!(DashboardView::<UserTab>::new().active(), UserTab::Overview);
        assert_eq!(
            DashboardView::<CounselorTab>::new().active(),
            CounselorTab::Overview
        );
        assert_eq!(DashboardView::<AdminTab>::new().active(), AdminTab::Overview);
    }

    #[test]
    fn test_select_switches_only_the_tab() {
        let mut view = DashboardView::<AdminTab>::new();
        view.select(AdminTab::Reports);
        assert_eq!(view.active(), AdminTab::Reports);
        assert_eq!(view.tabs().len(), 4);

        view.select(AdminTab::Users);
        assert_eq!(view.active(), AdminTab::Users);
    }

    #[test]
    fn test_query_parses_tab_keys() {
        let query = DashboardQuery {
            tab: Some("Schedule".to_string()),
        };
        assert_eq!(
            query.view::<CounselorTab>().unwrap().active(),
            CounselorTab::Schedule
        );

        let query = DashboardQuery {
            tab: Some("earnings".to_string()),
        };
        assert!(matches!(
            query.view::<UserTab>(),
            Err(AppError::InvalidInput(_))
        ));

        assert_eq!(
            DashboardQuery::default().view::<UserTab>().unwrap().active(),
            UserTab::Overview
        );
    }

    #[test]
    fn test_utilisation() {
        assert_eq!(utilisation_percent(6, 6), 100.0);
        assert_eq!(utilisation_percent(0, 0), 0.0);
        assert_eq!(utilisation_percent(2, 4), 50.0);
    }

    #[test]
    fn test_page_serializes_active_tab() {
        let mut view = DashboardView::<UserTab>::new();
        view.select(UserTab::Progress);
        let value = serde_json::to_value(view.page()).unwrap();

        assert_eq!(value["active_tab"], "progress");
        assert_eq!(value["panel"]["tab"], "progress");
        assert_eq!(value["tabs"][0]["key"], "overview");
    }
}
