//! Shared fakes and fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use entrypoint::config::{EntrypointConfig, ServiceTarget};
use entrypoint::init::{CommandRunner, Invocation, StepStatus};
use entrypoint::readiness::Connector;
use tokio::net::TcpListener;

pub fn argv(parts: &[&str]) -> Vec<OsString> {
    parts.iter().map(OsString::from).collect()
}

/// Default config with initialization rooted in `workdir`.
pub fn config_in(workdir: &Path) -> EntrypointConfig {
    let mut config = EntrypointConfig::default();
    config.init.workdir = workdir.to_path_buf();
    config
}

/// Refuses each host until its configured attempt number; records every probe.
#[derive(Clone, Default)]
pub struct ScriptedConnector {
    probes: Arc<Mutex<Vec<String>>>,
    /// host → attempt that first succeeds. Missing hosts succeed at once; 0 never does.
    succeed_on: Arc<HashMap<String, u32>>,
}

impl ScriptedConnector {
    pub fn new(succeed_on: &[(&str, u32)]) -> Self {
        Self {
            probes: Arc::default(),
            succeed_on: Arc::new(
                succeed_on
                    .iter()
                    .map(|(host, n)| (host.to_string(), *n))
                    .collect(),
            ),
        }
    }

    /// Hosts in the order they were probed.
    pub fn probes(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }

    /// Distinct hosts in first-probe order.
    pub fn hosts_waited_for(&self) -> Vec<String> {
        let mut hosts: Vec<String> = Vec::new();
        for host in self.probes() {
            if !hosts.contains(&host) {
                hosts.push(host);
            }
        }
        hosts
    }
}

impl Connector for ScriptedConnector {
    fn connect(&self, target: &ServiceTarget) -> impl Future<Output = io::Result<()>> + Send {
        let attempt = {
            let mut probes = self.probes.lock().unwrap();
            probes.push(target.host.clone());
            probes.iter().filter(|h| **h == target.host).count() as u32
        };
        let succeed_on = self.succeed_on.get(&target.host).copied().unwrap_or(1);

        async move {
            if succeed_on != 0 && attempt >= succeed_on {
                Ok(())
            } else {
                Err(io::ErrorKind::ConnectionRefused.into())
            }
        }
    }
}

/// Records every command line; fails any whose text contains `fail_matching`.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    commands: Arc<Mutex<Vec<String>>>,
    fail_matching: Option<(&'static str, i32)>,
}

impl RecordingRunner {
    pub fn failing_on(pattern: &'static str, code: i32) -> Self {
        Self {
            fail_matching: Some((pattern, code)),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> impl Future<Output = io::Result<StepStatus>> + Send {
        let line = invocation.to_string();
        let status = match self.fail_matching {
            Some((pattern, code)) if line.contains(pattern) => StepStatus::Failed(code),
            _ => StepStatus::Success,
        };
        self.commands.lock().unwrap().push(line);
        async move { Ok(status) }
    }
}

/// In-memory log sink for asserting on emitted status lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Route this thread's tracing output here until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(needle)).count()
    }
}

/// Reserve a free local port, then start listening on it after `delay`.
pub async fn listen_after(delay: Duration) -> SocketAddr {
    let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = probe.local_addr().unwrap();
    drop(probe);

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let listener = TcpListener::bind(addr).await.unwrap();
        loop {
            match listener.accept().await {
                Ok((socket, _)) => drop(socket),
                Err(_) => break,
            }
        }
    });

    addr
}

/// A listener that accepts and drops connections for the life of the test.
pub async fn listen_now() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    addr
}
