//! JSON-lines sink: one serialized feature per line

use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::super::ports::{EmitError, FeatureSink};
use crate::shared::models::Feature;

pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<BufWriter<W>>,
}

impl JsonLinesSink<File> {
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
        }
    }

    /// Flush and return the inner writer
    pub fn into_inner(self) -> Result<W, EmitError> {
        self.writer
            .into_inner()
            .into_inner()
            .map_err(|e| EmitError::Io(e.into_error()))
    }
}

impl<W: Write + Send> FeatureSink for JsonLinesSink<W> {
    fn emit(&self, feature: Feature) -> Result<(), EmitError> {
        // Serialize outside the lock
        let line =
            serde_json::to_string(&feature).map_err(|e| EmitError::Serialization(e.to_string()))?;
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), EmitError> {
        self.writer.lock().flush()?;
        Ok(())
    }
}
