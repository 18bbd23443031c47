//! Security panel: seeded health metrics and system log entries.

use serde::{Deserialize, Serialize};

use crate::display::{Presentable, Presentation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    Good,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    pub source: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityMetric {
    pub title: &'static str,
    pub value: String,
    pub status: MetricStatus,
    pub description: &'static str,
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogRow {
    #[serde(flatten)]
    pub entry: LogEntry,
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityView {
    pub metrics: Vec<SecurityMetric>,
    pub logs: Vec<LogRow>,
}

fn metric(title: &'static str, value: String, status: MetricStatus, description: &'static str) -> SecurityMetric {
    SecurityMetric { title, value, status, description, presentation: status.presentation() }
}

/// Incident metric over the full log: critical on any error entry, warning
/// on any warning entry, good otherwise.
#[must_use]
pub fn incident_metric(logs: &[LogEntry]) -> SecurityMetric {
    let errors = logs.iter().filter(|e| e.level == LogLevel::Error).count();
    let warnings = logs.iter().filter(|e| e.level == LogLevel::Warning).count();
    let (status, description) = match (errors, warnings) {
        (0, 0) => (MetricStatus::Good, "No errors or warnings logged"),
        (0, _) => (MetricStatus::Warning, "Warnings logged, no errors"),
        _ => (MetricStatus::Critical, "Errors need attention"),
    };
    metric("Log incidents", format!("{errors} errors, {warnings} warnings"), status, description)
}

#[must_use]
pub fn security_metrics(logs: &[LogEntry]) -> Vec<SecurityMetric> {
    vec![
        metric("API status", "Secure".to_owned(), MetricStatus::Good, "All traffic over HTTPS"),
        metric("Rate limiting", "85%".to_owned(), MetricStatus::Warning, "Approaching the monthly limit"),
        metric("Authentication", "Active".to_owned(), MetricStatus::Good, "Access protected by token"),
        metric("Monitoring", "Online".to_owned(), MetricStatus::Good, "Log pipeline running"),
        incident_metric(logs),
    ]
}

/// Panel view; `level` narrows the log list when set. Metrics always cover
/// the full log.
#[must_use]
pub fn view(logs: &[LogEntry], level: Option<LogLevel>) -> SecurityView {
    let rows = logs
        .iter()
        .filter(|e| level.is_none_or(|l| e.level == l))
        .map(|e| LogRow { entry: e.clone(), presentation: e.level.presentation() })
        .collect();
    SecurityView { metrics: security_metrics(logs), logs: rows }
}

#[must_use]
pub fn seed_logs() -> Vec<LogEntry> {
    let entry = |id: &str, ts: &str, level: LogLevel, message: &str, source: &str, details: &str| LogEntry {
        id: id.to_owned(),
        timestamp: ts.to_owned(),
        level,
        message: message.to_owned(),
        source: source.to_owned(),
        details: (!details.is_empty()).then(|| details.to_owned()),
    };
    vec![
        entry("1", "2024-01-10 14:35:22", LogLevel::Success, "Chat API: response generated", "Chat Provider", "Response time: 1.2s | Tokens: 150"),
        entry("2", "2024-01-10 14:32:15", LogLevel::Warning, "Rate limit approaching threshold", "API Manager", "85% of the monthly quota used"),
        entry("3", "2024-01-10 14:28:10", LogLevel::Error, "Messaging API connection failed", "Messaging", "Timeout after 30s | Reconnecting in 60s"),
        entry("4", "2024-01-10 14:25:05", LogLevel::Info, "Document processed: Manual_v2.pdf", "Document Processor", "45 chunks generated | Indexing complete"),
        entry("5", "2024-01-10 14:20:33", LogLevel::Success, "Automatic backup completed", "System", "Conversations and settings saved"),
    ]
}

#[cfg(test)]
#[path = "security_test.rs"]
mod tests;
