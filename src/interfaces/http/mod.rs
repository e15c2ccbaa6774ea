use crate::application::use_cases::bulk_upload::{BulkUploadOptions, BulkUploadUseCase};
use crate::domain::app_config::{file_too_large_message, AppConfig};
use crate::domain::bulk_upload::{
    FilePreviewData, TemplateDownloadParams, TemplateKind, UploadFile, ValidationError,
};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::backend_client::BulkSettingGateway;
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub gateway: Arc<dyn BulkSettingGateway + Send + Sync>,
    pub config: AppConfig,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl HttpState {
    /// Every request gets its own upload session.
    fn session(&self) -> BulkUploadUseCase {
        BulkUploadUseCase::new(
            self.gateway.clone(),
            BulkUploadOptions::from_config(&self.config),
        )
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody {
        error: message.into(),
    })
}

#[derive(Deserialize)]
pub struct TemplateQuery {
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub preview: Option<FilePreviewData>,
    pub errors: Option<Vec<ValidationError>>,
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[get("/template/{template_type}")]
async fn download_template(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<TemplateQuery>,
) -> impl Responder {
    let Some(account_id) = query
        .account_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    else {
        return bad_request("Account ID is required");
    };
    let kind = match path.parse::<TemplateKind>() {
        Ok(kind) => kind,
        Err(e) => return bad_request(e.to_string()),
    };

    add_log(
        &data.logs,
        "INFO",
        "Template",
        &format!("Downloading {} template for account {}", kind, account_id),
    );

    let session = data.session();
    match session
        .download_template(&TemplateDownloadParams::new(account_id, kind))
        .await
    {
        Some(template) => HttpResponse::Ok()
            .content_type(XLSX_MIME)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(template.filename)],
            })
            .body(template.bytes),
        None => {
            let message = session
                .state()
                .errors
                .and_then(|errors| errors.into_iter().next())
                .map(|error| error.message)
                .unwrap_or_else(|| "Failed to download template".to_string());
            add_log(&data.logs, "ERROR", "Template", &message);
            HttpResponse::BadGateway().json(ErrorBody { error: message })
        }
    }
}

#[post("/preview/{template_type}")]
async fn preview(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Multipart,
) -> impl Responder {
    let kind = match path.parse::<TemplateKind>() {
        Ok(kind) => kind,
        Err(e) => return bad_request(e.to_string()),
    };
    let file = match read_upload_file(payload, data.config.max_upload_bytes).await {
        Ok(file) => file,
        Err(e) => return bad_request(e.to_string()),
    };

    add_log(
        &data.logs,
        "INFO",
        "Preview",
        &format!("Previewing {} ({} bytes) as {}", file.name, file.size(), kind),
    );

    let session = data.session();
    session.preview_file(&file, kind).await;
    let state = session.state();

    HttpResponse::Ok().json(PreviewResponse {
        preview: state.preview_data,
        errors: state.errors,
    })
}

#[post("/upload/{template_type}")]
async fn upload(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Multipart,
) -> impl Responder {
    let kind = match path.parse::<TemplateKind>() {
        Ok(kind) => kind,
        Err(e) => return bad_request(e.to_string()),
    };
    let file = match read_upload_file(payload, data.config.max_upload_bytes).await {
        Ok(file) => file,
        Err(e) => return bad_request(e.to_string()),
    };

    add_log(
        &data.logs,
        "INFO",
        "Upload",
        &format!("Uploading {} ({} bytes) as {}", file.name, file.size(), kind),
    );

    let response = data.session().upload_file(&file, kind).await;
    if response.success {
        HttpResponse::Created().json(response)
    } else {
        add_log(
            &data.logs,
            "ERROR",
            "Upload",
            &format!(
                "Upload of {} rejected with {} error(s)",
                file.name,
                response.error_list().len()
            ),
        );
        HttpResponse::BadRequest().json(response)
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data
        .logs
        .lock()
        .map(|logs| logs.clone())
        .unwrap_or_default();
    HttpResponse::Ok().json(logs)
}

/// Take the `file` part of a multipart body, enforcing the size limit while
/// streaming. Other parts are skipped.
async fn read_upload_file(mut payload: Multipart, max_bytes: usize) -> Result<UploadFile> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::ValidationError(format!("Invalid form data: {}", e)))?;

        let (name, filename) = field
            .content_disposition()
            .map(|cd| {
                (
                    cd.get_name().map(str::to_string),
                    cd.get_filename().map(str::to_string),
                )
            })
            .unwrap_or((None, None));
        let content_type = field.content_type().map(|mime| mime.to_string());

        if name.as_deref() != Some("file") {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| AppError::ValidationError(format!("Invalid form data: {}", e)))?;
            }
            continue;
        }

        let filename =
            filename.ok_or_else(|| AppError::ValidationError("No file provided".to_string()))?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::ValidationError(format!("Invalid form data: {}", e)))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::ValidationError(file_too_large_message(max_bytes)));
            }
            bytes.extend_from_slice(&chunk);
        }

        let file = UploadFile::new(filename, bytes);
        return Ok(match content_type {
            Some(content_type) => file.with_content_type(content_type),
            None => file,
        });
    }

    Err(AppError::ValidationError("No file provided".to_string()))
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }
    let mut logs = logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api")
            .service(download_template)
            .service(preview)
            .service(upload)
            .service(get_logs),
    );
}

pub fn start_server(state: HttpState) -> std::io::Result<Server> {
    let listen_addr = state.config.listen_addr.clone();
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Dashboard is served from another origin

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(listen_addr)?
    .run();

    Ok(server)
}
