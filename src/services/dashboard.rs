//! Dashboard panel: metric cards, system status and recent activity.
//!
//! Conversation, user and cost figures are seeded. The documents card and the
//! status rows read live state from the document store and the setup panel.

use serde::Serialize;

use crate::display::{Presentable, Presentation, Tone, progress_percent};
use crate::services::document::{self, DocumentSummary};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Success,
    Error,
    Processing,
    Info,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub change: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusRow {
    pub name: &'static str,
    pub badge: String,
    pub tone: Tone,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub kind: &'static str,
    pub message: &'static str,
    pub time: &'static str,
    pub status: ActivityStatus,
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub metrics: Vec<MetricCard>,
    pub system_status: Vec<StatusRow>,
    pub activities: Vec<Activity>,
}

// =============================================================================
// BUILDERS
// =============================================================================

#[must_use]
pub fn metric_cards(documents: DocumentSummary) -> Vec<MetricCard> {
    let card = |title, value: &str, change: String, icon| MetricCard {
        title,
        value: value.to_owned(),
        change,
        icon,
    };
    vec![
        card("Conversations today", "247", "+12%".to_owned(), "message-square"),
        card("Active users", "1,834", "+5%".to_owned(), "users"),
        card(
            "Documents",
            &documents.total.to_string(),
            format!("+{}", documents.processing),
            "file-text",
        ),
        card("API cost (month)", "$89.50", "+2%".to_owned(), "dollar-sign"),
    ]
}

/// Status rows for the chat provider, messaging connector and pipeline.
/// Pipeline progress is the completed share of all documents.
#[must_use]
pub fn system_status(api_key_configured: bool, messaging_connected: bool, documents: DocumentSummary) -> Vec<StatusRow> {
    let chat = if api_key_configured {
        StatusRow { name: "Chat API", badge: "Active".to_owned(), tone: Tone::Success, progress: 98 }
    } else {
        StatusRow { name: "Chat API", badge: "Not configured".to_owned(), tone: Tone::Secondary, progress: 0 }
    };
    let messaging = if messaging_connected {
        StatusRow { name: "Messaging API", badge: "Connected".to_owned(), tone: Tone::Success, progress: 100 }
    } else {
        StatusRow { name: "Messaging API", badge: "Disconnected".to_owned(), tone: Tone::Destructive, progress: 0 }
    };
    let total = u32::try_from(documents.total).unwrap_or(u32::MAX);
    let completed = u32::try_from(documents.completed).unwrap_or(u32::MAX);
    let progress = if total == 0 { 100 } else { progress_percent(completed, total) };
    let tone = if documents.error > 0 {
        Tone::Destructive
    } else if progress < 100 {
        Tone::Warning
    } else {
        Tone::Success
    };
    let pipeline = StatusRow { name: "Processing", badge: format!("{progress}%"), tone, progress };
    vec![chat, messaging, pipeline]
}

#[must_use]
pub fn recent_activities() -> Vec<Activity> {
    let activity = |kind, message, time, status: ActivityStatus| Activity {
        kind,
        message,
        time,
        status,
        presentation: status.presentation(),
    };
    vec![
        activity("document", "Document 'Product_Manual.pdf' processed successfully", "5 min ago", ActivityStatus::Success),
        activity("conversation", "142 new conversations started", "10 min ago", ActivityStatus::Info),
        activity("error", "Messaging API connection failed", "25 min ago", ActivityStatus::Error),
        activity("document", "3 document uploads processing", "1 hour ago", ActivityStatus::Processing),
    ]
}

// =============================================================================
// PANEL
// =============================================================================

pub async fn view(state: &AppState) -> DashboardView {
    let documents = document::summary(state).await;
    let setup = state.setup.read().await.view();
    DashboardView {
        metrics: metric_cards(documents),
        system_status: system_status(setup.api_key_configured, setup.connected, documents),
        activities: recent_activities(),
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
