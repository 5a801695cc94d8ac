use std::sync::Arc;
use std::sync::mpsc::Sender;

#[cfg(not(target_arch = "wasm32"))]
use std::{
    panic::{self, AssertUnwindSafe},
    thread,
};

use super::messages::{JobRequest, JobResult};

use crate::analysis::AnalysisPipeline;
use crate::data::VisionModel;
use crate::utils::AppInstant;

#[cfg(not(target_arch = "wasm32"))]
use crate::error::VisionError;

/// Runs one pipeline call and sends the result back, whatever happens.
///
/// `notify` is called after the send so the UI can repaint immediately instead
/// of waiting for the next input event.
pub async fn process_request<M: VisionModel>(
    pipeline: &AnalysisPipeline<M>,
    req: JobRequest,
    tx: &Sender<JobResult>,
) {
    let start = AppInstant::now();
    let outcome = pipeline
        .analyze(&req.image, req.language, &req.local_time)
        .await;
    let duration_ms = start.elapsed().as_millis();

    if tx
        .send(JobResult {
            token: req.token,
            duration_ms,
            outcome,
        })
        .is_err()
    {
        // UI gone (app closing)
        log::warn!("Analysis #{} finished after the receiver closed", req.token);
    }
}

/// NATIVE: one short-lived thread per job, with its own current-thread runtime
/// for the HTTP call.
///
/// Every path sends exactly one result for the token, including a runtime that
/// fails to start, a panic inside the pipeline and a thread that cannot spawn.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_analysis<M, F>(
    pipeline: Arc<AnalysisPipeline<M>>,
    req: JobRequest,
    tx: Sender<JobResult>,
    notify: F,
) where
    M: VisionModel + Send + Sync + 'static,
    F: Fn() + Send + 'static,
{
    let token = req.token;
    let fallback_tx = tx.clone();

    let spawned = thread::Builder::new()
        .name(format!("analysis-{}", token))
        .spawn(move || {
            match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => {
                    let run = panic::catch_unwind(AssertUnwindSafe(|| {
                        rt.block_on(process_request(&pipeline, req, &tx))
                    }));
                    if run.is_err() {
                        log::error!("Analysis #{} panicked", token);
                        send_failure(&tx, token, "the analysis stopped unexpectedly".into());
                    }
                }
                Err(e) => {
                    log::error!("Failed to start runtime for analysis #{}: {}", token, e);
                    send_failure(
                        &tx,
                        token,
                        format!("could not start the network runtime: {}", e),
                    );
                }
            }
            notify();
        });

    if let Err(e) = spawned {
        log::error!("Failed to spawn analysis thread: {}", e);
        send_failure(
            &fallback_tx,
            token,
            format!("could not start the analysis: {}", e),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn send_failure(tx: &Sender<JobResult>, token: u64, message: String) {
    let _ = tx.send(JobResult {
        token,
        duration_ms: 0,
        outcome: Err(VisionError::UpstreamFailure(message)),
    });
}

/// WASM: the browser event loop drives the request.
#[cfg(target_arch = "wasm32")]
pub fn spawn_analysis<M, F>(
    pipeline: Arc<AnalysisPipeline<M>>,
    req: JobRequest,
    tx: Sender<JobResult>,
    notify: F,
) where
    M: VisionModel + 'static,
    F: Fn() + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        process_request(&pipeline, req, &tx).await;
        notify();
    });
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::data::{ModelRequest, ModelResponse};
    use crate::domain::Language;
    use crate::error::VisionError;
    use async_trait::async_trait;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    struct DownModel;

    struct CrashingModel;

    #[async_trait]
    impl VisionModel for CrashingModel {
        async fn generate(&self, _request: &ModelRequest) -> Result<ModelResponse, VisionError> {
            panic!("model crashed")
        }
    }

    fn chart_png() -> Vec<u8> {
        use image::{DynamicImage, ImageFormat, RgbImage};
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(32, 32))
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[async_trait]
    impl VisionModel for DownModel {
        async fn generate(&self, _request: &ModelRequest) -> Result<ModelResponse, VisionError> {
            Err(VisionError::UpstreamFailure("offline".into()))
        }
    }

    #[test]
    fn worker_reports_back_with_the_request_token() {
        let (tx, rx) = channel();
        let (ping_tx, ping_rx) = channel();
        let req = JobRequest {
            token: 7,
            file_name: "chart.png".into(),
            image: Arc::from(b"not an image".to_vec()),
            language: Language::En,
            local_time: "2026-03-14 09:26".into(),
        };

        spawn_analysis(Arc::new(AnalysisPipeline::new(DownModel)), req, tx, move || {
            let _ = ping_tx.send(());
        });

        let result = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(result.token, 7);
        assert!(matches!(result.outcome, Err(VisionError::InputInvalid(_))));
        assert!(ping_rx.recv_timeout(Duration::from_secs(10)).is_ok());
    }

    #[test]
    fn panicking_model_still_reports_a_failure() {
        let (tx, rx) = channel();
        let req = JobRequest {
            token: 11,
            file_name: "chart.png".into(),
            image: Arc::from(chart_png()),
            language: Language::En,
            local_time: "2026-03-14 09:26".into(),
        };

        spawn_analysis(Arc::new(AnalysisPipeline::new(CrashingModel)), req, tx, || {});

        let result = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(result.token, 11);
        assert!(matches!(result.outcome, Err(VisionError::UpstreamFailure(_))));
    }
}
