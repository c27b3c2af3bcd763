//! Model upload client.
//!
//! Uploads a model file to the companion parse server as a multipart form
//! (`POST {base}/parse_model?depth=N`) on a background thread and delivers
//! the parsed result over a channel polled from the frame loop. The UI
//! stays interactive while a request is in flight.
//!
//! In-flight requests are never cancelled. Instead every request carries a
//! generation token; responses whose token is no longer current are
//! discarded, so a slow response cannot clobber a newer model.

use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};

use crate::config::ServerConfig;
use crate::model::ModelGraph;

/// A pending upload: raw file bytes plus the parse depth.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub depth: u32,
}

#[derive(Debug)]
struct Delivery {
    generation: u64,
    outcome: Result<ModelGraph, String>,
}

/// Background upload client. One request at a time is current; newer
/// requests supersede older ones via the generation token.
pub struct ModelClient {
    base_url: String,
    timeout: Duration,
    generation: u64,
    in_flight: bool,
    started_at: Option<Instant>,
    tx: Sender<Delivery>,
    rx: Receiver<Delivery>,
}

impl ModelClient {
    pub fn new(config: &ServerConfig) -> Self {
        let (tx, rx) = unbounded();
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            generation: 0,
            in_flight: false,
            started_at: None,
            tx,
            rx,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// How long the current request has been in flight (drives the
    /// loading indicator).
    pub fn busy_for(&self) -> Option<Duration> {
        self.in_flight.then(|| {
            self.started_at
                .map(|t| t.elapsed())
                .unwrap_or(Duration::ZERO)
        })
    }

    /// Kick off an upload. A request already in flight keeps running but
    /// its response will be stale on arrival.
    pub fn upload(&mut self, request: UploadRequest) {
        self.generation += 1;
        self.in_flight = true;
        self.started_at = Some(Instant::now());

        let generation = self.generation;
        let url = format!("{}/parse_model", self.base_url);
        let timeout = self.timeout;
        let tx = self.tx.clone();

        info!(
            "uploading {} ({} bytes, depth {})",
            request.file_name,
            request.bytes.len(),
            request.depth
        );

        std::thread::spawn(move || {
            let outcome = Self::post_model(&url, timeout, request);
            // Receiver dropped means the app is shutting down
            let _ = tx.send(Delivery {
                generation,
                outcome,
            });
        });
    }

    fn post_model(
        url: &str,
        timeout: Duration,
        request: UploadRequest,
    ) -> Result<ModelGraph, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("client setup: {}", e))?;

        let part = reqwest::blocking::multipart::Part::bytes(request.bytes)
            .file_name(request.file_name);
        let form = reqwest::blocking::multipart::Form::new().part("model", part);

        let response = client
            .post(url)
            .query(&[("depth", request.depth)])
            .multipart(form)
            .send()
            .map_err(|e| format!("upload failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("server returned {}", status));
        }

        response
            .json::<ModelGraph>()
            .map_err(|e| format!("bad model response: {}", e))
    }

    /// Poll for a completed request. Stale responses (an older generation)
    /// are dropped silently apart from a debug line.
    pub fn poll(&mut self) -> Option<Result<ModelGraph, String>> {
        while let Ok(delivery) = self.rx.try_recv() {
            if delivery.generation != self.generation {
                debug!(
                    "dropping stale response (generation {} != {})",
                    delivery.generation, self.generation
                );
                continue;
            }
            self.in_flight = false;
            self.started_at = None;
            if let Err(ref msg) = delivery.outcome {
                warn!("model request failed: {}", msg);
            }
            return Some(delivery.outcome);
        }
        None
    }
}
