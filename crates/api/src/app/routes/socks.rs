use std::sync::Arc;

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Extension, Multipart, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use sockwarehouse_core::StockId;
use sockwarehouse_inventory::{BatchUpload, CottonComparison, StockDelta};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/income", post(register_income))
        .route("/outcome", post(register_outcome))
        .route("/socks", get(total_socks))
        .route("/socks/:id", put(update_socks))
        .route(
            "/batch",
            post(upload_batch).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

fn delta_from_body(body: Result<Json<dto::StockDeltaRequest>, JsonRejection>) -> Result<StockDelta, axum::response::Response> {
    match body {
        Ok(Json(body)) => Ok(body.into()),
        Err(rejection) => Err(errors::invalid_input(rejection.body_text())),
    }
}

pub async fn register_income(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::StockDeltaRequest>, JsonRejection>,
) -> axum::response::Response {
    let delta = match delta_from_body(body) {
        Ok(d) => d,
        Err(res) => return res,
    };

    match services.inventory().register_income(&delta).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn register_outcome(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::StockDeltaRequest>, JsonRejection>,
) -> axum::response::Response {
    let delta = match delta_from_body(body) {
        Ok(d) => d,
        Err(res) => return res,
    };

    match services.inventory().register_outcome(&delta).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn total_socks(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::TotalSocksQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::invalid_input(rejection.body_text()),
    };

    let comparison: CottonComparison = match query.operation.parse() {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .inventory()
        .total_socks(&query.color, comparison, query.cotton_part)
        .await
    {
        Ok(total) => (StatusCode::OK, Json(total)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_socks(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::StockDeltaRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: StockId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let delta = match delta_from_body(body) {
        Ok(d) => d,
        Err(res) => return res,
    };

    match services.inventory().update_socks(id, &delta).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn upload_batch(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> axum::response::Response {
    let upload = match multipart {
        Ok(multipart) => match read_batch_file(multipart).await {
            Ok(upload) => upload,
            Err(message) => return errors::batch_failure(message),
        },
        Err(rejection) => return errors::batch_failure(rejection.body_text()),
    };

    match services.inventory().upload_batch(&upload).await {
        Ok(summary) => (
            StatusCode::OK,
            format!(
                "File uploaded successfully: {} line(s) applied.",
                summary.lines_applied
            ),
        )
            .into_response(),
        Err(e) => errors::batch_failure(e),
    }
}

/// Pull the `file` field out of the multipart body; other fields are skipped.
async fn read_batch_file(mut multipart: Multipart) -> Result<BatchUpload, String> {
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        if field.name() != Some(dto::BATCH_FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let content = field.bytes().await.map_err(|e| e.to_string())?;
        return Ok(BatchUpload::new(file_name, content.to_vec()));
    }
    Err(format!("missing multipart field '{}'", dto::BATCH_FILE_FIELD))
}
