//! Status vocabularies stored as TEXT columns.

/// Lifecycle of an async provider job (training or image generation).
///
/// Jobs move `Pending -> Generated | Failed` exactly once; webhooks treat a
/// job already in a terminal status as settled and do not re-apply effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Generated,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Generated => "Generated",
            JobStatus::Failed => "Failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(JobStatus::Pending),
            "Generated" => Some(JobStatus::Generated),
            "Failed" => Some(JobStatus::Failed),
            _ => None,
        }
    }

    /// Terminal statuses are never left again.
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Pending)
    }
}

/// Lifecycle of a payment attempt.
///
/// `PENDING -> SUCCESS | FAILED` exactly once, driven by signature
/// verification; never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Success,
    Failed,
}

impl TxStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TxStatus::Pending => "PENDING",
            TxStatus::Success => "SUCCESS",
            TxStatus::Failed => "FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_round_trips() {
        for status in [JobStatus::Pending, JobStatus::Generated, JobStatus::Failed] {
            assert_eq!(JobStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(JobStatus::parse("Queued"), None);
    }

    #[test]
    fn test_only_pending_is_non_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(JobStatus::Generated.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }
}
