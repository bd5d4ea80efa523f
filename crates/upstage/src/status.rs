//! Normalization of the generation service's numeric status codes into the
//! poller's phase vocabulary.

use upstage_poll::{JobPhase, ProbeReport};

use crate::collab::{CollabError, JobSnapshot};

pub const STATUS_PROCESSING: i32 = 20;
pub const STATUS_FAILED: i32 = 30;
pub const STATUS_QUEUED: i32 = 42;
pub const STATUS_PENDING: i32 = 45;
pub const STATUS_DONE: i32 = 50;

/// Map a service status code onto [`JobPhase`].
///
/// Unknown codes map to `Running`: the service grows intermediate states
/// without notice, and an unrecognized code on a live job must not fail it.
pub fn normalize_status(code: i32) -> JobPhase {
    match code {
        STATUS_DONE => JobPhase::Succeeded,
        STATUS_FAILED => JobPhase::Failed,
        STATUS_QUEUED | STATUS_PENDING => JobPhase::Pending,
        _ => JobPhase::Running,
    }
}

/// Build the poller's report from one probe result.
///
/// An absent record maps to `NotVisible` and a collaborator error to
/// `Running` — both keep the session polling. Only an explicit failure code
/// from the service itself is terminal; transport, auth, and server noise on
/// the status path is transient by policy, and the poller's budgets bound
/// how long that tolerance lasts.
pub fn probe_report(
    result: Result<Option<JobSnapshot>, CollabError>,
) -> ProbeReport<Option<JobSnapshot>> {
    match result {
        Ok(Some(snapshot)) => {
            let mut report = ProbeReport::new(normalize_status(snapshot.status_code), None)
                .with_items(snapshot.item_count);
            if let Some(code) = &snapshot.fail_code {
                report = report.with_fail_code(code.clone());
            }
            if let Some(finished_at) = snapshot.finished_at {
                report = report.with_finished_at(finished_at);
            }
            report.data = Some(snapshot);
            report
        }
        Ok(None) => ProbeReport::new(JobPhase::NotVisible, None),
        Err(error) => {
            tracing::warn!(error = %error, "status probe failed; treating as still processing");
            ProbeReport::new(JobPhase::Running, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(normalize_status(STATUS_DONE), JobPhase::Succeeded);
        assert_eq!(normalize_status(STATUS_FAILED), JobPhase::Failed);
        assert_eq!(normalize_status(STATUS_QUEUED), JobPhase::Pending);
        assert_eq!(normalize_status(STATUS_PENDING), JobPhase::Pending);
        assert_eq!(normalize_status(STATUS_PROCESSING), JobPhase::Running);
    }

    #[test]
    fn test_unknown_code_is_still_processing() {
        assert_eq!(normalize_status(99), JobPhase::Running);
        assert_eq!(normalize_status(-1), JobPhase::Running);
    }

    #[test]
    fn test_absent_record_is_not_visible() {
        let report = probe_report(Ok(None));
        assert_eq!(report.phase, JobPhase::NotVisible);
        assert!(report.data.is_none());
    }

    #[test]
    fn test_collab_error_is_transient() {
        let report = probe_report(Err(CollabError::Transport("connection reset".to_string())));
        assert_eq!(report.phase, JobPhase::Running);
        assert!(report.fail_code.is_none());
    }

    #[test]
    fn test_snapshot_fields_flow_through() {
        let snapshot = JobSnapshot {
            status_code: STATUS_DONE,
            item_count:  1,
            fail_code:   None,
            finished_at: Some(1_700_000_000),
            items:       serde_json::json!([{"uri": "v/xyz"}]),
        };
        let report = probe_report(Ok(Some(snapshot)));
        assert_eq!(report.phase, JobPhase::Succeeded);
        assert_eq!(report.item_count, 1);
        assert_eq!(report.finished_at, Some(1_700_000_000));
        assert!(report.data.is_some());
    }

    #[test]
    fn test_fail_code_survives_normalization() {
        let snapshot = JobSnapshot {
            status_code: STATUS_PROCESSING,
            fail_code: Some("1180".to_string()),
            ..JobSnapshot::default()
        };
        let report = probe_report(Ok(Some(snapshot)));
        assert_eq!(report.fail_code.as_deref(), Some("1180"));
    }
}
