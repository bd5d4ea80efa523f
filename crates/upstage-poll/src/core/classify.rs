use crate::data::{FailReason, JobPhase};

/// What one probe report means for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Terminal: the job is done and enough items are visible.
    Success,
    /// Terminal: the remote side gave up; no further probing.
    Failure(FailReason),
    /// Keep polling. Covers pending, running, not-yet-visible records, and
    /// succeeded reports whose items have not all materialized.
    Continue,
}

/// Classify one normalized report.
///
/// An explicit failure code is terminal no matter which phase accompanies
/// it. A succeeded phase only completes the session once `expected_items`
/// are visible — the service marks jobs done slightly before every result
/// item lands in the listing.
pub fn classify(
    phase: JobPhase,
    item_count: u32,
    fail_code: Option<&str>,
    expected_items: u32,
) -> Verdict {
    if let Some(code) = fail_code {
        return Verdict::Failure(FailReason::Remote {
            code: code.to_string(),
        });
    }

    match phase {
        JobPhase::Failed => Verdict::Failure(FailReason::Remote {
            code: "unspecified".to_string(),
        }),
        JobPhase::Succeeded if item_count >= expected_items => Verdict::Success,
        JobPhase::Succeeded
        | JobPhase::Pending
        | JobPhase::Running
        | JobPhase::NotVisible => Verdict::Continue,
    }
}
