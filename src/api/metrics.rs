use actix_web::HttpResponse;
use std::sync::atomic::{AtomicU64, Ordering};

static OPERATION_COUNT: AtomicU64 = AtomicU64::new(0);
static OPERATION_ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    OPERATION_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    OPERATION_ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

fn render(operations: u64, errors: u64) -> String {
    format!(
        "# HELP recipe_operations_total Total number of API operations\n\
         # TYPE recipe_operations_total counter\n\
         recipe_operations_total {}\n\
         \n\
         # HELP recipe_operation_errors_total Operations that ended in an error\n\
         # TYPE recipe_operation_errors_total counter\n\
         recipe_operation_errors_total {}\n",
        operations, errors
    )
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Operation counters in Prometheus text format", body = String)
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let operations = OPERATION_COUNT.load(Ordering::Relaxed);
    let errors = OPERATION_ERROR_COUNT.load(Ordering::Relaxed);

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render(operations, errors))
}
