/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use anyhow::{Context, anyhow};
use flume::{Receiver, RecvTimeoutError, Sender, TrySendError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

const SUBMIT_THREAD_NAME: &str = "sentry-submit";
const SUBMIT_QUEUE_SIZE: usize = 64;

/// A ready to send store API request.
#[derive(Clone, Debug)]
pub struct SentryRequest {
    pub url: String,
    pub auth: String,
    pub body: Vec<u8>,
    pub timeout: Duration,
}

/// How store requests reach the server.
pub trait SentryTransport: Send + Sync {
    fn send(&self, req: &SentryRequest) -> anyhow::Result<()>;
}

type SubmitReply = anyhow::Result<()>;

struct SubmitJob {
    req: SentryRequest,
    reply: Sender<SubmitReply>,
}

/// HTTP transport backed by a dedicated submit thread.
///
/// The blocking client lives and dies on that thread, so the caller may be
/// inside an async runtime. Each `send` waits for the reply at most for the
/// request timeout.
pub struct ReqwestTransport {
    sender: Sender<SubmitJob>,
}

impl ReqwestTransport {
    pub fn new() -> anyhow::Result<Self> {
        let (sender, receiver) = flume::bounded::<SubmitJob>(SUBMIT_QUEUE_SIZE);
        let (ready_sender, ready_receiver) = flume::bounded::<SubmitReply>(1);

        let _detached_thread = std::thread::Builder::new()
            .name(SUBMIT_THREAD_NAME.to_string())
            .spawn(move || match build_client() {
                Ok(client) => {
                    let _ = ready_sender.send(Ok(()));
                    SubmitThread { client, receiver }.run_to_end();
                }
                Err(e) => {
                    let _ = ready_sender.send(Err(e));
                }
            })
            .context("failed to spawn sentry submit thread")?;

        ready_receiver
            .recv()
            .map_err(|_| anyhow!("sentry submit thread exited before ready"))??;
        Ok(ReqwestTransport { sender })
    }
}

impl SentryTransport for ReqwestTransport {
    fn send(&self, req: &SentryRequest) -> anyhow::Result<()> {
        let (reply, reply_receiver) = flume::bounded::<SubmitReply>(1);
        let job = SubmitJob {
            req: req.clone(),
            reply,
        };
        match self.sender.try_send(job) {
            Ok(_) => {}
            Err(TrySendError::Full(_)) => return Err(anyhow!("sentry submit queue is full")),
            Err(TrySendError::Disconnected(_)) => {
                return Err(anyhow!("sentry submit thread has quit"));
            }
        }

        match reply_receiver.recv_timeout(req.timeout) {
            Ok(r) => r,
            Err(RecvTimeoutError::Timeout) => Err(anyhow!(
                "store request to {} timed out after {:?}",
                req.url,
                req.timeout
            )),
            Err(RecvTimeoutError::Disconnected) => Err(anyhow!("sentry submit thread has quit")),
        }
    }
}

fn build_client() -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(concat!("logrelay/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build http client")
}

struct SubmitThread {
    client: Client,
    receiver: Receiver<SubmitJob>,
}

impl SubmitThread {
    fn run_to_end(self) {
        while let Ok(job) = self.receiver.recv() {
            let r = self.post(&job.req);
            // the caller may have given up already
            let _ = job.reply.send(r);
        }
    }

    fn post(&self, req: &SentryRequest) -> anyhow::Result<()> {
        let rsp = self
            .client
            .post(&req.url)
            .header("X-Sentry-Auth", &req.auth)
            .header(CONTENT_TYPE, "application/json")
            .timeout(req.timeout)
            .body(req.body.clone())
            .send()
            .map_err(|e| anyhow!("store request to {} failed: {e}", req.url))?;

        let status = rsp.status();
        if !status.is_success() {
            let reason = rsp
                .headers()
                .get("X-Sentry-Error")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            return Err(anyhow!("store request rejected with status {status}: {reason}"));
        }
        Ok(())
    }
}
