use crate::config::ApiConfig;
use crate::model::SummaryModel;
use crate::pdf;
use crate::pipeline;
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{web, App, Error, HttpResponse, HttpServer};
use chrono::Utc;
use futures_util::stream::StreamExt;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub type SharedModel = Arc<dyn SummaryModel>;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Generate a short request ID for correlation
fn generate_request_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

async fn index_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

async fn health_check(model: web::Data<SharedModel>) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "model": model.model_name(),
        "timestamp": Utc::now().to_rfc3339(),
        "request_id": generate_request_id()
    })))
}

/// POST /upload: one PDF in, one summary out. The uploaded bytes live in a
/// temp file that is deleted as soon as extraction finishes; nothing is kept
/// across requests.
async fn upload_and_summarize(
    mut payload: Multipart,
    model: web::Data<SharedModel>,
    config: web::Data<ApiConfig>,
) -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let Some(filename) = field
            .content_disposition()
            .as_ref()
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
        else {
            continue;
        };

        let ext = Path::new(&filename)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        if !ext.eq_ignore_ascii_case("pdf") {
            return Ok(HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Only .pdf uploads are supported",
                "request_id": request_id
            })));
        }

        let mut tmp = web::block(tempfile::NamedTempFile::new).await??;
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            tmp = web::block(move || {
                tmp.write_all(&data)?;
                Ok::<_, std::io::Error>(tmp)
            })
            .await??;
        }

        info!(request_id = %request_id, filename = %filename, "Extracting PDF text");
        let extracted = web::block(move || pdf::extract_file(tmp.path())).await?;
        let text = match extracted {
            Ok(text) => text,
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "PDF extraction failed");
                return Ok(HttpResponse::UnprocessableEntity().json(json!({
                    "status": "error",
                    "message": e.to_string(),
                    "request_id": request_id
                })));
            }
        };

        if text.trim().is_empty() {
            return Ok(HttpResponse::Ok().json(json!({
                "status": "warning",
                "message": "No readable text found in the PDF.",
                "request_id": request_id
            })));
        }

        let opts = config.summary_options();
        let mut chunks_total = 0usize;
        let rid = request_id.clone();
        let result = pipeline::summarize_document(
            &text,
            &opts,
            model.get_ref().as_ref(),
            |current, total| {
                chunks_total = total;
                info!(request_id = %rid, chunk = current, total, "Summarizing chunk");
            },
        )
        .await;

        return match result {
            Ok(summary) => Ok(HttpResponse::Ok().json(json!({
                "status": "success",
                "summary": summary,
                "chunks": chunks_total,
                "model": model.model_name(),
                "request_id": request_id
            }))),
            Err(e) => {
                error!(request_id = %request_id, error = %e, "Summarization failed");
                Ok(HttpResponse::BadGateway().json(json!({
                    "status": "error",
                    "message": e.to_string(),
                    "request_id": request_id
                })))
            }
        };
    }

    Ok(HttpResponse::BadRequest().json(json!({
        "status": "error",
        "message": "No file uploaded",
        "request_id": request_id
    })))
}

pub async fn start_api_server(config: &ApiConfig, model: SharedModel) -> std::io::Result<()> {
    let bind_addr = config.bind_addr();
    let config = config.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::AUTHORIZATION,
            ])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(model.clone()))
            .wrap(cors)
            .route("/", web::get().to(index_page))
            .route("/health", web::get().to(health_check))
            .route("/upload", web::post().to(upload_and_summarize))
    })
    .bind(bind_addr)?
    .run()
    .await
}
