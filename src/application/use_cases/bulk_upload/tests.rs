use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use encoding_rs::SHIFT_JIS;

use super::*;
use crate::domain::bulk_upload::KwFilteringField;

struct FakeGateway {
    upload_calls: AtomicUsize,
    download_calls: AtomicUsize,
    upload_response: Result<FileUploadResponse>,
    download_response: Result<TemplateFile>,
}

impl FakeGateway {
    fn accepting() -> Self {
        Self {
            upload_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            upload_response: Ok(FileUploadResponse::succeeded("File uploaded successfully")),
            download_response: Ok(TemplateFile {
                filename: "rule_1001.xlsx".to_string(),
                bytes: vec![1, 2, 3],
            }),
        }
    }

    fn uploads(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BulkSettingGateway for FakeGateway {
    async fn upload(&self, _file: &UploadFile, _kind: TemplateKind) -> Result<FileUploadResponse> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.upload_response.clone()
    }

    async fn download_template(&self, _params: &TemplateDownloadParams) -> Result<TemplateFile> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.download_response.clone()
    }
}

fn kw_csv(inspection_values: &[&str]) -> UploadFile {
    let headers: Vec<&str> = KwFilteringField::ALL.iter().map(|f| f.header()).collect();
    let mut text = headers.join(",");
    for value in inspection_values {
        text.push_str(&format!("\r\n1001,Main,2001,Spring,{},,,,,", value));
    }
    text.push_str("\r\n");
    let (bytes, _, _) = SHIFT_JIS.encode(&text);
    UploadFile::new("kw_filtering.csv", bytes.into_owned())
}

fn use_case(gateway: Arc<FakeGateway>, options: BulkUploadOptions) -> BulkUploadUseCase {
    BulkUploadUseCase::new(gateway, options)
}

#[tokio::test]
async fn test_preview_valid_file() {
    let gateway = Arc::new(FakeGateway::accepting());
    let session = use_case(gateway.clone(), BulkUploadOptions::default());

    let values = ["CPA", "CPC", "CPM", "CPA", "CPC", "CPM", "CPA"];
    session.preview_file(&kw_csv(&values), TemplateKind::KwFiltering).await;

    let state = session.state();
    assert!(!state.is_loading);
    assert!(state.errors.is_none());
    let preview = state.preview_data.unwrap();
    assert_eq!(preview.rows.len(), 5);
    assert_eq!(preview.total_rows, 7);
    assert_eq!(preview.headers[4], "精査軸");
    assert_eq!(gateway.uploads(), 0);
}

#[tokio::test]
async fn test_preview_invalid_file_still_shows_rows() {
    let session = use_case(Arc::new(FakeGateway::accepting()), BulkUploadOptions::default());

    session
        .preview_file(&kw_csv(&["CPA", "XYZ", ""]), TemplateKind::KwFiltering)
        .await;

    let state = session.state();
    let errors = state.errors.unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].row, Some(3));
    assert_eq!(errors[1].row, Some(4));
    assert_eq!(state.preview_data.unwrap().total_rows, 3);
}

#[tokio::test]
async fn test_preview_unreadable_file_is_single_file_error() {
    let session = use_case(Arc::new(FakeGateway::accepting()), BulkUploadOptions::default());

    session
        .preview_file(&UploadFile::new("notes.txt", b"hello".to_vec()), TemplateKind::KwFiltering)
        .await;

    let state = session.state();
    let errors = state.errors.unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_file_level());
    assert_eq!(
        errors[0].message,
        "Unsupported file type. Please upload CSV or Excel files."
    );
    assert!(state.preview_data.is_none());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_invalid_file_is_never_uploaded() {
    let gateway = Arc::new(FakeGateway::accepting());
    let reported = Arc::new(AtomicUsize::new(0));
    let counter = reported.clone();
    let options = BulkUploadOptions::default().on_error(move |errors| {
        counter.fetch_add(errors.len(), Ordering::SeqCst);
    });
    let session = use_case(gateway.clone(), options);

    let response = session
        .upload_file(&kw_csv(&["CPA", "XYZ"]), TemplateKind::KwFiltering)
        .await;

    assert!(!response.success);
    assert_eq!(gateway.uploads(), 0);
    assert_eq!(reported.load(Ordering::SeqCst), 1);
    let state = session.state();
    assert!(!state.is_uploading);
    assert_eq!(state.errors.unwrap()[0].column.as_deref(), Some("精査軸"));
}

#[tokio::test]
async fn test_oversized_file_is_never_uploaded() {
    let gateway = Arc::new(FakeGateway::accepting());
    let options = BulkUploadOptions {
        max_upload_bytes: 16,
        ..Default::default()
    };
    let session = use_case(gateway.clone(), options);

    let response = session.upload_file(&kw_csv(&["CPA"]), TemplateKind::KwFiltering).await;

    assert!(!response.success);
    assert_eq!(gateway.uploads(), 0);
    assert!(response.error_list()[0].message.starts_with("File too large"));
}

#[tokio::test]
async fn test_valid_file_is_uploaded_once() {
    let gateway = Arc::new(FakeGateway::accepting());
    let message = Arc::new(Mutex::new(None));
    let sink = message.clone();
    let options = BulkUploadOptions::default().on_success(move |msg| {
        *sink.lock().unwrap() = msg;
    });
    let session = use_case(gateway.clone(), options);

    let response = session
        .upload_file(&kw_csv(&["CPA", "CPM"]), TemplateKind::KwFiltering)
        .await;

    assert!(response.success);
    assert_eq!(gateway.uploads(), 1);
    assert_eq!(
        message.lock().unwrap().as_deref(),
        Some("File uploaded successfully")
    );
    let state = session.state();
    assert!(!state.is_uploading);
    assert!(state.errors.is_none());
}

#[tokio::test]
async fn test_backend_rejection_surfaces_as_errors() {
    let mut gateway = FakeGateway::accepting();
    gateway.upload_response = Ok(FileUploadResponse::rejected(vec![ValidationError::cell(
        2,
        "キャンペーンID",
        "Campaign does not exist",
    )]));
    let gateway = Arc::new(gateway);
    let session = use_case(gateway.clone(), BulkUploadOptions::default());

    let response = session.upload_file(&kw_csv(&["CPA"]), TemplateKind::KwFiltering).await;

    assert!(!response.success);
    assert_eq!(gateway.uploads(), 1);
    let errors = session.state().errors.unwrap();
    assert_eq!(errors[0].column.as_deref(), Some("キャンペーンID"));
}

#[tokio::test]
async fn test_transport_failure_surfaces_as_file_error() {
    let mut gateway = FakeGateway::accepting();
    gateway.upload_response = Err(AppError::TransportError("connection refused".to_string()));
    let session = use_case(Arc::new(gateway), BulkUploadOptions::default());

    session.upload_file(&kw_csv(&["CPA"]), TemplateKind::KwFiltering).await;

    let state = session.state();
    assert!(!state.is_uploading);
    assert_eq!(
        state.errors.unwrap(),
        vec![ValidationError::file_level("connection refused")]
    );
}

#[tokio::test]
async fn test_download_template() {
    let gateway = Arc::new(FakeGateway::accepting());
    let session = use_case(gateway.clone(), BulkUploadOptions::default());

    let template = session
        .download_template(&TemplateDownloadParams::new("1001", TemplateKind::KwFiltering))
        .await
        .unwrap();

    assert_eq!(template.filename, "rule_1001.xlsx");
    assert_eq!(gateway.download_calls.load(Ordering::SeqCst), 1);
    assert!(!session.state().is_loading);
}

#[tokio::test]
async fn test_download_failure_sets_generic_error() {
    let mut gateway = FakeGateway::accepting();
    gateway.download_response = Err(AppError::TransportError("502".to_string()));
    let session = use_case(Arc::new(gateway), BulkUploadOptions::default());

    let template = session
        .download_template(&TemplateDownloadParams::new("1001", TemplateKind::GenreKeyword))
        .await;

    assert!(template.is_none());
    assert_eq!(
        session.state().errors.unwrap(),
        vec![ValidationError::file_level(TEMPLATE_DOWNLOAD_FAILED)]
    );
}

#[tokio::test]
async fn test_reset_all_clears_everything() {
    let session = use_case(Arc::new(FakeGateway::accepting()), BulkUploadOptions::default());
    session
        .preview_file(&kw_csv(&["XYZ"]), TemplateKind::KwFiltering)
        .await;
    assert!(session.state().has_errors());

    session.reset_errors();
    assert!(session.state().errors.is_none());
    assert!(session.state().preview_data.is_some());

    session.reset_all();
    assert_eq!(session.state(), UploadSessionState::default());
}
