//! Metrics for the Vigil pipeline, following Prometheus naming conventions.

use std::fmt;

/// Every metric name used in the system; no magic strings at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Gate metrics
    GateSubmissionsAccepted,
    GateSubmissionsRejected,

    // Duplicate oracle metrics
    OracleQueriesSuccess,
    OracleQueriesError,

    // Blob store metrics
    StoreWritesSuccess,
    StoreWritesError,

    // Background indexer metrics
    IndexerRecordsUpserted,
    IndexerErrors,

    // Fingerprint skill metrics
    SkillRecordsHashed,
    SkillRecordsFailed,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::GateSubmissionsAccepted => "vigil_gate_submissions_accepted_total",
            MetricName::GateSubmissionsRejected => "vigil_gate_submissions_rejected_total",
            MetricName::OracleQueriesSuccess => "vigil_oracle_queries_success_total",
            MetricName::OracleQueriesError => "vigil_oracle_queries_error_total",
            MetricName::StoreWritesSuccess => "vigil_store_writes_success_total",
            MetricName::StoreWritesError => "vigil_store_writes_error_total",
            MetricName::IndexerRecordsUpserted => "vigil_indexer_records_upserted_total",
            MetricName::IndexerErrors => "vigil_indexer_errors_total",
            MetricName::SkillRecordsHashed => "vigil_skill_records_hashed_total",
            MetricName::SkillRecordsFailed => "vigil_skill_records_failed_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod gate {
    use super::MetricName;

    pub fn submission_accepted() {
        ::metrics::counter!(MetricName::GateSubmissionsAccepted.as_str()).increment(1);
    }

    pub fn submission_rejected() {
        ::metrics::counter!(MetricName::GateSubmissionsRejected.as_str()).increment(1);
    }
}

pub mod oracle {
    use super::MetricName;

    pub fn query_success() {
        ::metrics::counter!(MetricName::OracleQueriesSuccess.as_str()).increment(1);
    }

    pub fn query_error() {
        ::metrics::counter!(MetricName::OracleQueriesError.as_str()).increment(1);
    }
}

pub mod store {
    use super::MetricName;

    pub fn write_success() {
        ::metrics::counter!(MetricName::StoreWritesSuccess.as_str()).increment(1);
    }

    pub fn write_error() {
        ::metrics::counter!(MetricName::StoreWritesError.as_str()).increment(1);
    }
}

pub mod indexer {
    use super::MetricName;

    pub fn record_upserted() {
        ::metrics::counter!(MetricName::IndexerRecordsUpserted.as_str()).increment(1);
    }

    pub fn error() {
        ::metrics::counter!(MetricName::IndexerErrors.as_str()).increment(1);
    }
}

pub mod skill {
    use super::MetricName;

    pub fn record_hashed() {
        ::metrics::counter!(MetricName::SkillRecordsHashed.as_str()).increment(1);
    }

    pub fn record_failed() {
        ::metrics::counter!(MetricName::SkillRecordsFailed.as_str()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_follow_prometheus_conventions() {
        let counters = [
            MetricName::GateSubmissionsAccepted,
            MetricName::GateSubmissionsRejected,
            MetricName::OracleQueriesSuccess,
            MetricName::OracleQueriesError,
            MetricName::StoreWritesSuccess,
            MetricName::StoreWritesError,
            MetricName::IndexerRecordsUpserted,
            MetricName::IndexerErrors,
            MetricName::SkillRecordsHashed,
            MetricName::SkillRecordsFailed,
        ];
        for name in counters {
            assert!(name.as_str().starts_with("vigil_"));
            assert!(name.as_str().ends_with("_total"));
            assert_eq!(name.to_string(), name.as_str());
        }
    }
}
