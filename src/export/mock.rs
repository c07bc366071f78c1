use super::{DocExport, ExportSink};
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockExportSink {
    deliveries: Arc<Mutex<Vec<DocExport>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockExportSink {
    pub fn new() -> Self {
        Self {
            deliveries: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    pub fn get_deliveries(&self) -> Vec<DocExport> {
        self.deliveries.lock().unwrap().clone()
    }
}

impl Default for MockExportSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExportSink for MockExportSink {
    async fn deliver(&self, export: &DocExport) -> Result<PathBuf> {
        if *self.should_fail.lock().unwrap() {
            return Err(crate::Error::Io(std::io::Error::other("Mock failure")));
        }

        self.deliveries.lock().unwrap().push(export.clone());
        Ok(PathBuf::from(&export.file_name))
    }
}
