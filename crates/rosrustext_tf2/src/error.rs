use rosrustext_tf2_core::error::{CoreError, Payload, Severity};

/// Emit a `CoreError` at the tracing level matching its severity.
pub fn log_core_error(err: CoreError) {
    let action = match &err.payload {
        Payload::Action { name } => name.as_ref(),
        _ => "",
    };
    match err.severity {
        Severity::Warn => tracing::warn!(action, "{err}"),
        Severity::Error => tracing::error!(action, "{err}"),
    }
}
