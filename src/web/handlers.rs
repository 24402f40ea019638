//! Request handlers for the upload server.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Html;

use crate::bill::{parse_amount, parse_bill_date, Bill};
use crate::error::{Error, Result};
use crate::fs::store_upload;
use crate::web::response::UploadResponse;
use crate::web::AppState;

/// Fallback page used when the static directory has no `index.html`.
const EMBEDDED_INDEX: &str = include_str!("../../static/index.html");

/// Fields collected from the multipart form.
#[derive(Debug, Default)]
struct UploadForm {
    amount: Option<String>,
    date: Option<String>,
    bill: Option<(String, Bytes)>,
}

impl UploadForm {
    async fn read(multipart: &mut Multipart, limit: usize) -> Result<Self> {
        let mut form = UploadForm::default();
        let upload_error = |err: MultipartError| {
            if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
                Error::UploadTooLarge(limit)
            } else {
                Error::Upload(err.body_text())
            }
        };

        while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "amount" => form.amount = Some(field.text().await.map_err(upload_error)?),
                "date" => form.date = Some(field.text().await.map_err(upload_error)?),
                "bill" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let content = field.bytes().await.map_err(upload_error)?;
                    form.bill = Some((filename, content));
                }
                other => tracing::debug!("Ignoring unexpected form field '{}'", other),
            }
        }

        Ok(form)
    }

    /// Split into the three required values, listing every one that is
    /// absent or empty.
    fn require(self) -> Result<(String, String, String, Bytes)> {
        let amount = self.amount.filter(|v| !v.trim().is_empty());
        let date = self.date.filter(|v| !v.trim().is_empty());
        let bill = self.bill.filter(|(filename, _)| !filename.is_empty());

        match (amount, date, bill) {
            (Some(amount), Some(date), Some((filename, content))) => {
                Ok((amount, date, filename, content))
            }
            (amount, date, bill) => {
                let missing: Vec<&str> = [
                    ("amount", amount.is_none()),
                    ("date", date.is_none()),
                    ("bill", bill.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(Error::MissingField(missing.join(", ")))
            }
        }
    }
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page),
        Err(e) => {
            tracing::debug!("Serving embedded index page ({}: {})", path.display(), e);
            Html(EMBEDDED_INDEX.to_string())
        }
    }
}

/// `POST /upload`
///
/// Fields are validated before anything is written, so a rejected request
/// leaves neither the upload directory nor the registry changed. The digest
/// is taken from the received bytes, the same bytes written to disk.
pub async fn upload_bill(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<UploadResponse> {
    let (amount, date, filename, content) =
        UploadForm::read(&mut multipart, state.max_upload_bytes)
            .await
            .and_then(UploadForm::require)
            .inspect_err(|e| tracing::warn!("Rejected upload: {}", e))?;

    let amount = parse_amount(&amount).inspect_err(|e| tracing::warn!("Rejected upload: {}", e))?;
    let date = parse_bill_date(&date).inspect_err(|e| tracing::warn!("Rejected upload: {}", e))?;

    let upload_dir = state.upload_dir.clone();
    let bill = tokio::task::spawn_blocking(move || {
        let path = store_upload(&upload_dir, &filename, &content)?;
        Ok::<_, Error>(Bill::from_bytes(amount, date, &content, path))
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::other(e)))??;

    let submission = state.registry.record(bill)?;

    Ok(UploadResponse::from(&submission))
}
