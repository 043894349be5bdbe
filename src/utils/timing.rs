use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::utils::logging::TIMING_TARGET;

#[derive(Debug)]
pub struct CommandTimer {
    command: String,
    product: String,
    category: String,
    started_at: DateTime<Utc>,
    started_perf: Instant,
    status: String,
    detail: Option<String>,
    completed: bool,
}

impl CommandTimer {
    pub fn new(command: &str, product: &str, category: &str) -> Self {
        let product = if product.chars().count() > 300 {
            product.chars().take(300).collect()
        } else {
            product.to_string()
        };

        CommandTimer {
            command: command.to_string(),
            product,
            category: category.to_string(),
            started_at: Utc::now(),
            started_perf: Instant::now(),
            status: "success".to_string(),
            detail: None,
            completed: false,
        }
    }

    pub fn log_received(&self) {
        info!(
            target: TIMING_TARGET,
            "event=command_received command={} product={:?} category={:?} received_at={}",
            self.command,
            self.product,
            self.category,
            self.started_at.to_rfc3339()
        );
    }

    pub fn mark_status(&mut self, status: &str, detail: Option<String>) {
        self.status = status.to_string();
        self.detail = detail;
    }

    pub fn log_completed(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        let completed_at = Utc::now();
        let duration = self.started_perf.elapsed().as_secs_f64();
        info!(
            target: TIMING_TARGET,
            "event=command_completed command={} product={:?} category={:?} started_at={} completed_at={} duration_s={:.3} status={} detail={}",
            self.command,
            self.product,
            self.category,
            self.started_at.to_rfc3339(),
            completed_at.to_rfc3339(),
            duration,
            self.status,
            self.detail.clone().unwrap_or_default()
        );
    }
}

pub fn start_command_timer(command: &str, product: &str, category: &str) -> CommandTimer {
    let timer = CommandTimer::new(command, product, category);
    timer.log_received();
    timer
}

pub fn complete_command_timer(timer: &mut CommandTimer, status: &str, detail: Option<String>) {
    timer.mark_status(status, detail);
    timer.log_completed();
}

pub async fn log_llm_timing<T, E, F, Fut>(
    provider: &str,
    model: &str,
    operation: &str,
    metadata: Option<JsonValue>,
    call: F,
) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let started_at = Utc::now();
    let started_perf = Instant::now();
    let metadata_text = metadata
        .as_ref()
        .map(|value| value.to_string())
        .unwrap_or_else(|| "{}".to_string());
    info!(
        target: TIMING_TARGET,
        "event=llm_request provider={} model={} operation={} started_at={} metadata={}",
        provider,
        model,
        operation,
        started_at.to_rfc3339(),
        metadata_text
    );

    let result = call().await;
    let status = if result.is_ok() { "success" } else { "error" };

    let completed_at = Utc::now();
    let duration = started_perf.elapsed().as_secs_f64();
    info!(
        target: TIMING_TARGET,
        "event=llm_response provider={} model={} operation={} completed_at={} duration_s={:.3} status={} metadata={}",
        provider,
        model,
        operation,
        completed_at.to_rfc3339(),
        duration,
        status,
        metadata_text
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_product_names_are_clipped() {
        let name = "x".repeat(400);
        let timer = CommandTimer::new("generate", &name, "Pet Supplies");
        assert_eq!(timer.product.chars().count(), 300);
    }

    #[test]
    fn completion_is_logged_once() {
        let mut timer = CommandTimer::new("generate", "Mug", "Home & Kitchen");
        complete_command_timer(&mut timer, "fallback", Some("offline".to_string()));
        assert!(timer.completed);
        assert_eq!(timer.status, "fallback");
        timer.mark_status("ai", None);
        timer.log_completed();
        assert_eq!(timer.status, "ai");
    }

    #[tokio::test]
    async fn llm_timing_passes_result_through() {
        let ok: Result<u8, String> =
            log_llm_timing("gemini", "test-model", "unit", None, || async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));
        let err: Result<u8, String> = log_llm_timing("gemini", "test-model", "unit", None, || async {
            Err("boom".to_string())
        })
        .await;
        assert_eq!(err, Err("boom".to_string()));
    }
}
