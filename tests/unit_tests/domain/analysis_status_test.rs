use resume_pipeline::domain::{AnalysisStatus, ApplicantId, Resume};

#[test]
fn given_new_resume_when_created_then_status_is_pending_without_analysis() {
    let resume = Resume::new(
        ApplicantId::new(),
        "/api/resumes/a/b/1_cv.pdf".to_string(),
        "cv.pdf".to_string(),
    );

    assert_eq!(resume.analysis_status, AnalysisStatus::Pending);
    assert!(resume.ai_analysis.is_none());
    assert!(resume.extracted_text.is_none());
    assert!(resume.analyzed_at.is_none());
}

#[test]
fn given_each_status_when_checking_start_then_only_processing_is_refused() {
    assert!(AnalysisStatus::Pending.can_start_analysis());
    assert!(AnalysisStatus::Failed.can_start_analysis());
    assert!(AnalysisStatus::Completed.can_start_analysis());
    assert!(!AnalysisStatus::Processing.can_start_analysis());
}

#[test]
fn given_processing_when_transitioning_then_only_terminal_statuses_are_allowed() {
    let processing = AnalysisStatus::Processing;

    assert!(processing.can_transition_to(AnalysisStatus::Completed));
    assert!(processing.can_transition_to(AnalysisStatus::Failed));
    assert!(!processing.can_transition_to(AnalysisStatus::Pending));
    assert!(!processing.can_transition_to(AnalysisStatus::Processing));
}

#[test]
fn given_terminal_status_when_transitioning_then_cannot_skip_processing() {
    assert!(!AnalysisStatus::Pending.can_transition_to(AnalysisStatus::Completed));
    assert!(!AnalysisStatus::Failed.can_transition_to(AnalysisStatus::Completed));
    assert!(!AnalysisStatus::Completed.can_transition_to(AnalysisStatus::Failed));
}

#[test]
fn given_status_strings_when_parsing_then_round_trips_lowercase_names() {
    for status in [
        AnalysisStatus::Pending,
        AnalysisStatus::Processing,
        AnalysisStatus::Completed,
        AnalysisStatus::Failed,
    ] {
        assert_eq!(status.as_str().parse::<AnalysisStatus>(), Ok(status));
    }
}

#[test]
fn given_unknown_status_string_when_parsing_then_returns_error() {
    let result = "queued".parse::<AnalysisStatus>();

    assert_eq!(result, Err("Invalid analysis status: queued".to_string()));
}

#[test]
fn given_status_when_serialized_then_uses_lowercase_json_string() {
    let json = serde_json::to_string(&AnalysisStatus::Processing).unwrap();

    assert_eq!(json, "\"processing\"");
}
