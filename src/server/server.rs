//! # Stego Service - Encode/Decode Execution
//!
//! The service core is responsible for ONE thing: running the steganography
//! routines for a request and recording the outcome. HTTP concerns (routing,
//! multipart parsing, transport encoding) live in [`web`](super::web).

use log::{info, warn};
use std::time::Instant;

use super::error::ApiError;
use super::metrics::{Operation, ServiceMetrics};
use crate::processing::steganography;

/// Runs encode and decode requests against the steganography core.
#[derive(Debug, Clone, Default)]
pub struct StegoService {
    metrics: ServiceMetrics,
}

impl StegoService {
    pub fn new(metrics: ServiceMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    /// Embed `message` into `image_data` using LSB steganography.
    ///
    /// # Arguments
    /// - `request_id`: Identifier used in log lines
    /// - `image_data`: Raw bytes of the uploaded image
    /// - `message`: Text to hide
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)`: Image bytes with the message embedded
    /// - `Err(ApiError::Capacity)`: The image is too small for the message
    ///
    /// # Example
    /// ```ignore
    /// let image_data = std::fs::read("input.bmp")?;
    /// let encoded = service.encode(1, image_data, "secret".to_string()).await?;
    /// ```
    pub async fn encode(
        &self,
        request_id: u64,
        image_data: Vec<u8>,
        message: String,
    ) -> Result<Vec<u8>, ApiError> {
        self.metrics.increment_requests(Operation::Encode);
        info!(
            "📷 Encode request #{}: {} byte image, {} byte message",
            request_id,
            image_data.len(),
            message.len()
        );

        let started = Instant::now();
        // Embedding is CPU-bound; keep it off the async workers.
        let result = tokio::task::spawn_blocking(move || {
            steganography::encode_message(image_data, &message)
        })
        .await;

        match result {
            Ok(Ok(encoded)) => {
                self.metrics.record_success(encoded.len(), started.elapsed());
                info!("✅ Encode request #{} complete", request_id);
                Ok(encoded)
            }
            Ok(Err(e)) => {
                self.metrics.increment_failed_requests();
                warn!("❌ Encode request #{} rejected: {}", request_id, e);
                Err(e.into())
            }
            Err(e) => {
                self.metrics.increment_failed_requests();
                warn!("❌ Encode request #{} task failed: {}", request_id, e);
                Err(e.into())
            }
        }
    }

    /// Recover the message hidden in `image_data`.
    ///
    /// Decoding itself never fails; an image without a message yields an
    /// empty or meaningless string.
    pub async fn decode(&self, request_id: u64, image_data: Vec<u8>) -> Result<String, ApiError> {
        self.metrics.increment_requests(Operation::Decode);
        info!(
            "🔍 Decode request #{}: {} byte image",
            request_id,
            image_data.len()
        );

        let started = Instant::now();
        let bytes = image_data.len();
        let message =
            tokio::task::spawn_blocking(move || steganography::decode_message(&image_data))
                .await
                .map_err(|e| {
                    self.metrics.increment_failed_requests();
                    warn!("❌ Decode request #{} task failed: {}", request_id, e);
                    ApiError::from(e)
                })?;

        self.metrics.record_success(bytes, started.elapsed());
        info!(
            "✅ Decode request #{} complete: {} characters",
            request_id,
            message.chars().count()
        );

        Ok(message)
    }
}
