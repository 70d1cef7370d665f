//! HTTP front end: the upload validation server and remote sequence fetches
//!
//! Only available when the "http" feature is enabled.

#[cfg(feature = "http")]
pub mod http_impl {
    use axum::{
        body::Bytes,
        extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
        http::StatusCode,
        response::{Html, IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    };
    use fseq_core::Validator;
    use tokio::signal;
    use tower_http::trace::TraceLayer;
    use tracing::{error, info, warn};

    use crate::config::ValidatorConfig;
    use crate::error::{Error, Result};
    use crate::response::{MissingUpload, UploadResponse};

    /// Multipart field carrying the sequence file
    pub const FILE_FIELD: &str = "fesq";
    /// Multipart field that asks for a JSON answer instead of HTML
    pub const JSON_FIELD: &str = "json";

    #[derive(Clone)]
    struct AppState {
        validator: Validator,
    }

    /// Routes of the upload server
    pub fn router(config: &ValidatorConfig) -> Router {
        let state = AppState {
            validator: config.validator(),
        };

        Router::new()
            .route("/health", get(health))
            .route("/validate", post(validate_upload))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.server.max_upload_bytes()))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve uploads until Ctrl+C
    pub async fn serve(config: ValidatorConfig) -> Result<()> {
        let addr = config.server.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| Error::Bind {
                addr: addr.clone(),
                source,
            })?;

        info!(
            "Server listening on http://{} (command capacity {})",
            addr, config.limits.command_capacity
        );
        info!("  POST http://{}/validate - Validate a sequence upload", addr);
        info!("  GET  http://{}/health - Health check", addr);

        axum::serve(listener, router(&config))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Error::Server)?;

        info!("Server shutdown complete");
        Ok(())
    }

    async fn health() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        }))
    }

    struct Upload {
        file: Option<(String, Bytes)>,
        json: bool,
    }

    impl Upload {
        async fn read(multipart: &mut Multipart) -> std::result::Result<Self, MultipartError> {
            let mut upload = Upload {
                file: None,
                json: false,
            };

            while let Some(field) = multipart.next_field().await? {
                let name = field.name().map(str::to_owned);
                match name.as_deref() {
                    Some(FILE_FIELD) => {
                        let file_name = field.file_name().unwrap_or("upload.fseq").to_owned();
                        let data = field.bytes().await?;
                        upload.file = Some((file_name, data));
                    }
                    Some(JSON_FIELD) => upload.json = true,
                    _ => {}
                }
            }
            Ok(upload)
        }
    }

    async fn validate_upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
        let upload = match Upload::read(&mut multipart).await {
            Ok(upload) => upload,
            Err(error) => {
                warn!(%error, "unreadable upload");
                return (error.status(), error.body_text()).into_response();
            }
        };

        let Some((name, bytes)) = upload.file else {
            return Json(MissingUpload::default()).into_response();
        };

        let validator = state.validator;
        let scanned = tokio::task::spawn_blocking(move || {
            let result = validator.validate(&bytes);
            UploadResponse::from_outcome(name, &bytes, &result)
        })
        .await;

        let response = match scanned {
            Ok(response) => response,
            Err(join_error) => {
                error!(%join_error, "validation task failed");
                return (StatusCode::INTERNAL_SERVER_ERROR, join_error.to_string()).into_response();
            }
        };

        match &response.error {
            None => info!(file = %response.file.name, size = response.file.size, "upload accepted"),
            Some(reason) => warn!(file = %response.file.name, %reason, "upload rejected"),
        }

        if upload.json {
            Json(response).into_response()
        } else {
            Html(response.to_html()).into_response()
        }
    }

    async fn shutdown_signal() {
        if let Err(error) = signal::ctrl_c().await {
            error!(%error, "failed to listen for Ctrl+C, shutting down");
        }
    }

    /// Download a sequence file
    pub async fn fetch_sequence(url: &str) -> Result<Vec<u8>> {
        let response = reqwest::get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url, size = bytes.len(), "fetched sequence");
        Ok(bytes.to_vec())
    }

    /// Download and validate a sequence, naming it after the last path segment
    pub async fn validate_url(url: &str, validator: &Validator) -> Result<UploadResponse> {
        let bytes = fetch_sequence(url).await?;
        let name = url
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(url);
        let result = validator.validate(&bytes);
        Ok(UploadResponse::from_outcome(name, &bytes, &result))
    }
}

#[cfg(feature = "http")]
pub use http_impl::*;

#[cfg(not(feature = "http"))]
pub mod http_stub {
    use crate::error::{Error, Result};

    pub async fn fetch_sequence(_url: &str) -> Result<Vec<u8>> {
        Err(Error::Unsupported("Fetching remote sequences", "http"))
    }

    #[cfg(feature = "serde")]
    pub async fn validate_url(
        _url: &str,
        _validator: &fseq_core::Validator,
    ) -> Result<crate::response::UploadResponse> {
        Err(Error::Unsupported("Fetching remote sequences", "http"))
    }

    #[cfg(feature = "serde")]
    pub async fn serve(_config: crate::config::ValidatorConfig) -> Result<()> {
        Err(Error::Unsupported("The upload server", "http"))
    }
}

#[cfg(not(feature = "http"))]
pub use http_stub::*;
