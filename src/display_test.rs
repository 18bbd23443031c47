use super::*;

// =============================================================================
// format_size
// =============================================================================

#[test]
fn format_size_bytes() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(1023), "1023 B");
}

#[test]
fn format_size_kilobytes() {
    assert_eq!(format_size(124 * 1024), "124 KB");
    assert_eq!(format_size(856 * 1024), "856 KB");
}

#[test]
fn format_size_just_below_one_mebibyte_switches_to_megabytes() {
    assert_eq!(format_size(1_048_575), "1.0 MB");
    assert_eq!(format_size(1023 * 1024), "1023 KB");
    assert_eq!(format_size(1_048_063), "1023 KB");
    assert_eq!(format_size(1_048_064), "1.0 MB");
}

#[test]
fn format_size_megabytes() {
    assert_eq!(format_size(2_516_582), "2.4 MB");
    assert_eq!(format_size(10 * 1024 * 1024), "10.0 MB");
}

// =============================================================================
// type_label
// =============================================================================

#[test]
fn type_label_from_name() {
    assert_eq!(type_label("Manual.pdf", None), "PDF");
    assert_eq!(type_label("FAQ_Atendimento.docx", None), "DOCX");
    assert_eq!(type_label("archive.tar.gz", None), "GZ");
}

#[test]
fn type_label_prefers_explicit_extension() {
    assert_eq!(type_label("notes", Some("txt")), "TXT");
    assert_eq!(type_label("notes.md", Some(".pdf")), "PDF");
}

#[test]
fn type_label_unknown_without_extension() {
    assert_eq!(type_label("README", None), "Unknown");
    assert_eq!(type_label("trailing.", None), "Unknown");
    assert_eq!(type_label(".hidden", None), "Unknown");
    assert_eq!(type_label(".bashrc", None), "Unknown");
    assert_eq!(type_label("README", Some("  ")), "Unknown");
}

// =============================================================================
// progress_percent
// =============================================================================

#[test]
fn progress_percent_bounds() {
    assert_eq!(progress_percent(0, 0), 0);
    assert_eq!(progress_percent(0, 34), 0);
    assert_eq!(progress_percent(23, 34), 67);
    assert_eq!(progress_percent(45, 45), 100);
    assert_eq!(progress_percent(99, 45), 100);
}

// =============================================================================
// Presentation tables
// =============================================================================

#[test]
fn document_status_presentation() {
    let processing = DocumentStatus::Processing.presentation();
    assert_eq!(processing.tone, Tone::Warning);
    assert!(processing.animated);

    assert_eq!(DocumentStatus::Completed.presentation().badge, "Processed");
    assert_eq!(DocumentStatus::Error.presentation().tone, Tone::Destructive);
}

#[test]
fn log_level_presentation() {
    assert_eq!(LogLevel::Error.presentation().icon, "x-circle");
    assert_eq!(LogLevel::Info.presentation().tone, Tone::Secondary);
}

#[test]
fn metric_and_conversation_presentation() {
    assert_eq!(MetricStatus::Critical.presentation().tone, Tone::Destructive);
    assert_eq!(ConversationStatus::Pending.presentation().badge, "Pending");
    assert!(ActivityStatus::Processing.presentation().animated);
}

#[test]
fn presentation_serializes_tone_snake_case() {
    let json = serde_json::to_value(DocumentStatus::Error.presentation()).unwrap();
    assert_eq!(json["tone"], "destructive");
    assert_eq!(json["badge"], "Error");
}
