//! Shared fixtures for the bootstrap integration tests.
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use teddy_bot_backend::application::Configurator;
use teddy_bot_backend::domain::manifest::AVATAR_DEFAULT_PATH;
use teddy_bot_backend::domain::ports::ConfigLoaderPort;
use teddy_bot_backend::domain::{CompletionRule, DefaultPayload, Manifest};

pub const AVATAR_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x7f, 0xfe];

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Loader that answers with a fixed value and counts how often it was asked.
pub struct StubLoader {
    result: bool,
    calls: AtomicUsize,
}

impl StubLoader {
    pub fn returning(result: bool) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigLoaderPort for StubLoader {
    async fn load_config(&self) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result)
    }
}

pub struct FailingLoader;

#[async_trait]
impl ConfigLoaderPort for FailingLoader {
    async fn load_config(&self) -> Result<bool> {
        Err(anyhow!("ids.json is not an object"))
    }
}

pub fn configurator(root: &Path, loader: Arc<StubLoader>, rule: CompletionRule) -> Configurator {
    Configurator::new(root, Manifest::teddy_bot(), loader, rule)
}

// ---------------------------------------------------------------------------
// Filesystem seeding
// ---------------------------------------------------------------------------

pub fn seed_avatar_default(root: &Path) {
    let path = root.join(AVATAR_DEFAULT_PATH);
    std::fs::create_dir_all(path.parent().expect("avatar parent")).expect("create img dir");
    std::fs::write(path, AVATAR_BYTES).expect("write default avatar");
}

/// Content written by [`seed_all`] for an entry path.
pub fn custom_content(relative: &Path) -> Vec<u8> {
    format!("operator edited {}", relative.display()).into_bytes()
}

/// Creates every manifest file with operator content that differs from the
/// defaults.
pub fn seed_all(root: &Path) {
    seed_avatar_default(root);
    for entry in Manifest::teddy_bot().entries() {
        let path = root.join(&entry.path);
        std::fs::create_dir_all(path.parent().expect("entry parent")).expect("create parent");
        let content = match entry.payload {
            DefaultPayload::Inline(_) => custom_content(&entry.path),
            DefaultPayload::CopyFrom(_) => b"custom avatar".to_vec(),
        };
        std::fs::write(path, content).expect("seed entry");
    }
}

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

/// Collects formatted INFO+ events emitted on the current thread.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let buffer = self.buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .with_writer(move || CaptureWriter(buffer.clone()))
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().expect("log buffer")).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
