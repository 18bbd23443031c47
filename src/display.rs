//! Display helpers shared by every panel.
//!
//! DESIGN
//! ======
//! Each enumerated status maps to a `Presentation` through an exhaustive
//! `match`, so adding a variant without a row here fails to compile. The
//! formatting helpers turn raw byte counts and file names into the strings
//! the dashboard shows.

use serde::Serialize;

use crate::services::conversation::ConversationStatus;
use crate::services::dashboard::ActivityStatus;
use crate::services::security::{LogLevel, MetricStatus};
use crate::state::DocumentStatus;

// =============================================================================
// PRESENTATION
// =============================================================================

/// Colour family used for badges and icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Primary,
    Secondary,
    Success,
    Warning,
    Destructive,
}

/// Icon, badge text and tone for one status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub icon: &'static str,
    pub badge: &'static str,
    pub tone: Tone,
    /// Icon should animate (in-flight work).
    pub animated: bool,
}

impl Presentation {
    const fn still(icon: &'static str, badge: &'static str, tone: Tone) -> Self {
        Self { icon, badge, tone, animated: false }
    }
}

pub trait Presentable {
    fn presentation(&self) -> Presentation;
}

impl Presentable for DocumentStatus {
    fn presentation(&self) -> Presentation {
        match self {
            Self::Processing => Presentation { icon: "clock", badge: "Processing", tone: Tone::Warning, animated: true },
            Self::Completed => Presentation::still("check-circle", "Processed", Tone::Success),
            Self::Error => Presentation::still("alert-circle", "Error", Tone::Destructive),
        }
    }
}

impl Presentable for LogLevel {
    fn presentation(&self) -> Presentation {
        match self {
            Self::Success => Presentation::still("check-circle", "Success", Tone::Success),
            Self::Info => Presentation::still("activity", "Info", Tone::Secondary),
            Self::Warning => Presentation::still("alert-triangle", "Warning", Tone::Warning),
            Self::Error => Presentation::still("x-circle", "Error", Tone::Destructive),
        }
    }
}

impl Presentable for MetricStatus {
    fn presentation(&self) -> Presentation {
        match self {
            Self::Good => Presentation::still("shield", "Good", Tone::Success),
            Self::Warning => Presentation::still("alert-triangle", "Warning", Tone::Warning),
            Self::Critical => Presentation::still("x-circle", "Critical", Tone::Destructive),
        }
    }
}

impl Presentable for ConversationStatus {
    fn presentation(&self) -> Presentation {
        match self {
            Self::Active => Presentation::still("message-square", "Active", Tone::Primary),
            Self::Resolved => Presentation::still("check-circle", "Resolved", Tone::Success),
            Self::Pending => Presentation::still("clock", "Pending", Tone::Warning),
        }
    }
}

impl Presentable for ActivityStatus {
    fn presentation(&self) -> Presentation {
        match self {
            Self::Success => Presentation::still("check-circle", "Success", Tone::Success),
            Self::Error => Presentation::still("alert-circle", "Error", Tone::Destructive),
            Self::Processing => Presentation { icon: "clock", badge: "Processing", tone: Tone::Warning, animated: true },
            Self::Info => Presentation::still("message-square", "Info", Tone::Primary),
        }
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Human-readable size: `B` below 1 KiB, whole `KB` below 1 MiB, one-decimal `MB` above.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    let value = bytes as f64;
    if bytes < KIB {
        return format!("{bytes} B");
    }
    // Units switch on the rounded figure so 1023.9 KiB never prints as `1024 KB`.
    let kb = (value / KIB as f64).round();
    if kb < KIB as f64 {
        format!("{kb:.0} KB")
    } else {
        format!("{:.1} MB", value / MIB as f64)
    }
}

/// Upper-cased extension of `name`, preferring an explicit `extension`.
/// Returns `Unknown` when neither yields one. A dotless name (`README`) or a
/// bare dotfile (`.bashrc`) counts as having no extension, so it is `Unknown`
/// rather than its upper-cased name.
#[must_use]
pub fn type_label(name: &str, extension: Option<&str>) -> String {
    let from_name = name
        .rsplit_once('.')
        .map(|(stem, ext)| if stem.is_empty() { "" } else { ext });
    extension
        .map(|e| e.trim().trim_start_matches('.'))
        .filter(|e| !e.is_empty())
        .or(from_name.filter(|e| !e.is_empty()))
        .map_or_else(|| "Unknown".to_owned(), str::to_ascii_uppercase)
}

/// Whole-number completion percentage, clamped to `0..=100`.
#[must_use]
pub fn progress_percent(processed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (u64::from(processed.min(total)) * 100) / u64::from(total);
    u8::try_from(pct).unwrap_or(100)
}

#[cfg(test)]
#[path = "display_test.rs"]
mod tests;
