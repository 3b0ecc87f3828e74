use common::model::user::CurrentUser;
use presenter::{Dashboard, DashboardConfig};
use yew::NodeRef;

use crate::session;

/// Top-level sections reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Upload,
    Analyze,
    History,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [ActiveView::Upload, ActiveView::Analyze, ActiveView::History];

    /// Value of the nav item's `data-view` attribute.
    pub fn key(self) -> &'static str {
        match self {
            ActiveView::Upload => "upload",
            ActiveView::Analyze => "analyze",
            ActiveView::History => "history",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActiveView::Upload => "Upload",
            ActiveView::Analyze => "Analysis",
            ActiveView::History => "History",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ActiveView::Upload => "cloud_upload",
            ActiveView::Analyze => "insights",
            ActiveView::History => "history",
        }
    }
}

pub struct DashboardComponent {
    pub dashboard: Dashboard,
    pub active_view: ActiveView,
    /// Profile stored at sign-in; only the name is shown.
    pub user: Option<CurrentUser>,
    /// The affected rows section, scrolled into view once it expands.
    pub rows_ref: NodeRef,
    /// Guard for the one-time history load.
    pub loaded: bool,
}

impl DashboardComponent {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            dashboard: Dashboard::new(config),
            active_view: ActiveView::Upload,
            user: session::current_user(),
            rows_ref: NodeRef::default(),
            loaded: false,
        }
    }

    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.username.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "User".to_string())
    }
}
