//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into boundary-level APIs.
//! - Keep CLI/transport layers decoupled from storage details.
//! - Emit one metadata-only log event per write or report call.

pub mod chicken_service;
pub mod collection_service;
pub mod employee_service;
pub mod error;
pub mod report_service;

use error::{ServiceError, ServiceResult};
use log::{error, info, warn};
use std::time::Instant;

pub(crate) fn log_outcome<T>(event: &str, started_at: Instant, result: &ServiceResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event={event} module=service status=ok duration_ms={duration_ms}"),
        Err(err @ (ServiceError::Validation(_) | ServiceError::NotFound { .. })) => warn!(
            "event={event} module=service status=rejected duration_ms={duration_ms} error_code={}",
            err.code()
        ),
        Err(err) => error!(
            "event={event} module=service status=error duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
    }
}
