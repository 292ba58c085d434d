// File: livewatch-core/tests/test_utils/mod.rs
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::io;

use async_trait::async_trait;
use tokio::sync::Mutex;

use livewatch_common::models::NotificationTarget;
use livewatch_core::Error;
use livewatch_core::platforms::{NotificationSink, StatusProbe};

/// Probe that replays a fixed script of results, then repeats `fallback` forever.
pub struct ScriptedProbe {
    script: Mutex<VecDeque<Result<bool, Error>>>,
    fallback: bool,
    pub calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new(script: Vec<Result<bool, Error>>, fallback: bool) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn from_observations(observations: &[bool]) -> Arc<Self> {
        Self::new(observations.iter().map(|&o| Ok(o)).collect(), false)
    }
}

#[async_trait]
impl StatusProbe for ScriptedProbe {
    async fn is_user_live(&self, _username: &str) -> Result<bool, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.script.lock().await;
        guard.pop_front().unwrap_or(Ok(self.fallback))
    }
}

/// Sink that records every message it is asked to deliver.
#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<(NotificationTarget, String)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, target: &NotificationTarget, message: &str) -> Result<(), Error> {
        self.sent.lock().await.push((target.clone(), message.to_string()));
        Ok(())
    }
}

pub fn test_target() -> NotificationTarget {
    NotificationTarget::new(Some("1000".into()), Some("2000".into()))
}

/// In-memory log sink so tests can assert on what was logged.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<std::sync::Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Routes `tracing` output on the current thread into the returned buffer until the
    /// guard is dropped.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

pub struct CapturedWriter {
    buf: Arc<std::sync::Mutex<Vec<u8>>>,
}

impl io::Write for CapturedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter { buf: self.buf.clone() }
    }
}
