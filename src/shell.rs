//! View shell: navigation tabs, menu entries and panel dispatch.
//!
//! DESIGN
//! ======
//! The shell is the only place that knows the full tab set. A tab tag from
//! the client is parsed leniently (unknown tags land on the dashboard), and
//! an anonymous caller is answered with a redirect to the auth entry point
//! instead of a panel.

use serde::Serialize;

use crate::display::{Presentable, Presentation, progress_percent};
use crate::services::auth::AuthStatus;
use crate::services::conversation::{self, ConversationsView, StatusFilter};
use crate::services::dashboard::{self, DashboardView};
use crate::services::document::{self, DocumentSummary};
use crate::services::security::{self, SecurityView};
use crate::services::setup::SetupView;
use crate::state::{AppState, Document};

// =============================================================================
// TABS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    Setup,
    Documents,
    Conversations,
    Security,
}

impl Tab {
    pub const ALL: [Self; 5] = [Self::Dashboard, Self::Setup, Self::Documents, Self::Conversations, Self::Security];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Setup => "setup",
            Self::Documents => "documents",
            Self::Conversations => "conversations",
            Self::Security => "security",
        }
    }

    /// Parse a tab tag. Unknown or missing tags select the dashboard.
    #[must_use]
    pub fn parse(tag: Option<&str>) -> Self {
        let Some(tag) = tag.map(str::trim) else {
            return Self::default();
        };
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or_default()
    }

    fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Setup => "Setup",
            Self::Documents => "Documents",
            Self::Conversations => "Conversations",
            Self::Security => "Security",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Dashboard => "Overview and metrics",
            Self::Setup => "API keys and connectors",
            Self::Documents => "Content management",
            Self::Conversations => "Chatbot history",
            Self::Security => "Logs and monitoring",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub active: bool,
}

/// Navigation entries in display order with `active` highlighted.
#[must_use]
pub fn menu(active: Tab) -> Vec<MenuEntry> {
    Tab::ALL
        .into_iter()
        .map(|tab| MenuEntry {
            id: tab.as_str(),
            label: tab.label(),
            description: tab.description(),
            active: tab == active,
        })
        .collect()
}

// =============================================================================
// PANELS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DocumentRow {
    #[serde(flatten)]
    pub document: Document,
    pub presentation: Presentation,
    /// Only while processing with known counters.
    pub progress: Option<u8>,
}

impl From<Document> for DocumentRow {
    fn from(document: Document) -> Self {
        let progress = match (document.status.is_terminal(), document.processed_chunks, document.total_chunks) {
            (false, Some(processed), Some(total)) => Some(progress_percent(processed, total)),
            _ => None,
        };
        Self { presentation: document.status.presentation(), progress, document }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentsView {
    pub summary: DocumentSummary,
    pub documents: Vec<DocumentRow>,
}

pub async fn documents_view(state: &AppState) -> DocumentsView {
    let listing = document::list_documents(state).await;
    DocumentsView {
        summary: listing.summary,
        documents: listing.documents.into_iter().map(DocumentRow::from).collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tab", content = "data", rename_all = "snake_case")]
pub enum Panel {
    Dashboard(DashboardView),
    Setup(SetupView),
    Documents(DocumentsView),
    Conversations(ConversationsView),
    Security(SecurityView),
}

/// Build the default (unfiltered) payload for `tab`.
pub async fn panel(state: &AppState, tab: Tab) -> Panel {
    match tab {
        Tab::Dashboard => Panel::Dashboard(dashboard::view(state).await),
        Tab::Setup => Panel::Setup(state.setup.read().await.view()),
        Tab::Documents => Panel::Documents(documents_view(state).await),
        Tab::Conversations => Panel::Conversations(conversation::view(&state.conversations, "", StatusFilter::All)),
        Tab::Security => Panel::Security(security::view(&state.security_logs, None)),
    }
}

// =============================================================================
// SHELL
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShellOutcome {
    Redirect { location: String },
    Render { tab: Tab, menu: Vec<MenuEntry>, panel: Panel },
}

/// Resolve a shell request for the given auth status and tab tag.
pub async fn resolve(state: &AppState, auth: &AuthStatus, tag: Option<&str>) -> ShellOutcome {
    if !auth.is_authenticated() {
        return ShellOutcome::Redirect { location: state.config.auth_entry_url.clone() };
    }
    let tab = Tab::parse(tag);
    ShellOutcome::Render { tab, menu: menu(tab), panel: panel(state, tab).await }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
