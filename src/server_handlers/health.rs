use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::server::AppState;
use crate::store;

/// GET /health
pub async fn health_handler(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (sections, last_import) = state
        .run_blocking(|db| Ok((store::count_sections(db)?, store::last_import(db)?)))
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "sections": sections,
        "last_import": last_import.map(|(ts, source, inserted)| json!({
            "ts": ts,
            "source": source,
            "inserted": inserted
        })),
    })))
}
