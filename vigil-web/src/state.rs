use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use vigil_core::gate::SubmissionGate;

/// Collaborator handles built once at startup and passed to every handler;
/// no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<SubmissionGate>,
    pub metrics: PrometheusHandle,
}
