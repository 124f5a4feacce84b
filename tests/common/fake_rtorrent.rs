//! An in-memory rtorrent that answers the XML-RPC methods montorrent uses.
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use montorrent::core::backend::RemoteBackend;
use montorrent::core::error::Error;

#[derive(Debug, Clone)]
pub struct Download {
    pub name: String,
    pub bytes_done: u64,
    pub bytes_left: u64,
}

#[derive(Default)]
pub struct FakeRtorrent {
    downloads: Mutex<BTreeMap<String, Download>>,
    listing_calls: AtomicUsize,
    down: AtomicBool,
}

impl FakeRtorrent {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// # Panics
    ///
    /// Will panic if the downloads lock is poisoned.
    pub fn add(&self, hash: &str, name: &str, bytes_done: u64, bytes_left: u64) {
        self.downloads.lock().unwrap().insert(
            hash.to_owned(),
            Download {
                name: name.to_owned(),
                bytes_done,
                bytes_left,
            },
        );
    }

    /// Makes every following call answer with nothing.
    pub fn go_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    fn answer(&self, operation: &str, target: &str) -> String {
        let downloads = self.downloads.lock().unwrap();

        match operation {
            "download_list" => {
                let items: String = downloads
                    .keys()
                    .map(|hash| format!("<value><string>{hash}</string></value>\n"))
                    .collect();
                format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<methodResponse>\n<params>\n<param><value><array><data>\n{items}</data></array></value></param>\n</params>\n</methodResponse>\n"
                )
            }
            "d.name" => downloads
                .get(target)
                .map(|download| response(&format!("<string>{}</string>", download.name)))
                .unwrap_or_default(),
            "d.get_bytes_done" => downloads
                .get(target)
                .map(|download| response(&format!("<i8>{}</i8>", download.bytes_done)))
                .unwrap_or_default(),
            "d.get_left_bytes" => downloads
                .get(target)
                .map(|download| response(&format!("<i8>{}</i8>", download.bytes_left)))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

fn response(value: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<methodResponse>\n<params>\n<param><value>{value}</value></param>\n</params>\n</methodResponse>\n"
    )
}

#[async_trait]
impl RemoteBackend for FakeRtorrent {
    async fn invoke(&self, operation: &str, target: &str) -> Result<Vec<u8>, Error> {
        if operation == "download_list" {
            self.listing_calls.fetch_add(1, Ordering::SeqCst);
        }

        if self.down.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }

        Ok(self.answer(operation, target).into_bytes())
    }
}
