//! Cover brightness sampling
//!
//! Estimates whether a cover image reads as light or dark so the metadata
//! overlay can pick a text tone that stays legible on top of it. Sampling
//! is fire-and-forget on a worker thread; results carry the request token
//! they were issued under so a late arrival for a since-abandoned record
//! can be discarded (see [`crate::navigation::NavigationState::apply_contrast`]).

use std::sync::Arc;
use tokio::sync::mpsc;

/// Perceived dominant brightness of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brightness {
    Light,
    Dark,
}

/// Estimate perceived brightness from encoded image bytes.
///
/// The image is reduced to its average color, then scored with the HSP
/// perceptual model: sqrt(0.299 r^2 + 0.587 g^2 + 0.114 b^2), light above
/// the midpoint of the 8-bit range. Never fails; undecodable input is
/// treated as [`Brightness::Dark`], the conservative default.
pub fn estimate_brightness(bytes: &[u8]) -> Brightness {
    let Ok(img) = image::load_from_memory(bytes) else {
        return Brightness::Dark;
    };

    let rgba = img.to_rgba8();
    let pixel_count = (rgba.width() as u64 * rgba.height() as u64).max(1);

    let mut sum_r = 0u64;
    let mut sum_g = 0u64;
    let mut sum_b = 0u64;
    for pixel in rgba.pixels() {
        sum_r += pixel.0[0] as u64;
        sum_g += pixel.0[1] as u64;
        sum_b += pixel.0[2] as u64;
    }

    let r = (sum_r / pixel_count) as f64;
    let g = (sum_g / pixel_count) as f64;
    let b = (sum_b / pixel_count) as f64;

    let hsp = (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt();
    if hsp > 127.5 {
        Brightness::Light
    } else {
        Brightness::Dark
    }
}

/// Fetches the raw bytes behind a cover reference.
///
/// Rendering and remote fetching live outside this crate; the default
/// implementation reads local paths only.
pub trait CoverSource: Send + Sync {
    fn fetch(&self, reference: &str) -> anyhow::Result<Vec<u8>>;
}

/// Cover source that treats references as filesystem paths
#[derive(Debug, Default)]
pub struct FsCoverSource;

impl CoverSource for FsCoverSource {
    fn fetch(&self, reference: &str) -> anyhow::Result<Vec<u8>> {
        Ok(std::fs::read(reference)?)
    }
}

/// A resolved sample, tagged with the token it was requested under
#[derive(Debug, Clone, Copy)]
pub struct SampleResult {
    pub token: u64,
    pub brightness: Brightness,
}

#[derive(Debug)]
struct SampleRequest {
    token: u64,
    reference: String,
}

/// Asynchronous brightness sampler
pub struct BrightnessSampler {
    request_tx: mpsc::UnboundedSender<SampleRequest>,
}

impl BrightnessSampler {
    /// Create a sampler backed by a worker thread. Results arrive on the
    /// returned receiver in request order.
    pub fn new(source: Arc<dyn CoverSource>) -> (Self, mpsc::UnboundedReceiver<SampleResult>) {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<SampleRequest>();
        let (result_tx, result_rx) = mpsc::unbounded_channel::<SampleResult>();

        std::thread::spawn(move || {
            while let Some(request) = request_rx.blocking_recv() {
                let brightness = match source.fetch(&request.reference) {
                    Ok(bytes) => estimate_brightness(&bytes),
                    Err(e) => {
                        tracing::debug!(
                            reference = %request.reference,
                            "Cover fetch failed ({}), defaulting to dark",
                            e
                        );
                        Brightness::Dark
                    }
                };
                if result_tx
                    .send(SampleResult {
                        token: request.token,
                        brightness,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });

        (Self { request_tx }, result_rx)
    }

    /// Queue a sample for the given cover reference
    pub fn request(&self, token: u64, reference: &str) {
        let _ = self.request_tx.send(SampleRequest {
            token,
            reference: reference.to_string(),
        });
    }
}
