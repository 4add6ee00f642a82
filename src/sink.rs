//! Report sinks: the HID gadget device and an in-memory recorder.

use crate::report::REPORT_LEN;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Default USB HID gadget keyboard device.
pub const DEFAULT_DEVICE: &str = "/dev/hidg0";

/// Destination for raw 8-byte reports, written strictly in order.
#[async_trait(?Send)]
pub trait ReportSink {
    /// Write one report. An `Err` means the report did not reach the host.
    async fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> io::Result<()>;
}

/// A HID gadget character device such as `/dev/hidg0`.
pub struct DeviceSink {
    path: PathBuf,
    file: File,
}

impl DeviceSink {
    /// Open an existing device for writing. The path is never created.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .await?;
        Ok(Self { path, file })
    }

    /// Path the device was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait(?Send)]
impl ReportSink for DeviceSink {
    async fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> io::Result<()> {
        self.file.write_all(report).await?;
        // Surface the error on the write that caused it.
        self.file.flush().await
    }
}

/// Records every report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub reports: Vec<[u8; REPORT_LEN]>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl ReportSink for MemorySink {
    async fn write_report(&mut self, report: &[u8; REPORT_LEN]) -> io::Result<()> {
        self.reports.push(*report);
        Ok(())
    }
}
