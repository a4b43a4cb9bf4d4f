//! Buffering of multipart form submissions.
//!
//! Upload handlers read every part up front and then pick the fields they
//! need by name, so field order in the request does not matter.

use std::collections::HashMap;

use axum::extract::Multipart;
use thermoscan_core::storage::guess_content_type;

/// A file part held in memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Every part of one multipart request. Parts with a file name are files,
/// the rest are text. A repeated name keeps its last value.
#[derive(Debug, Default)]
pub struct FormData {
    texts: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl FormData {
    /// Drain `multipart`. Errors carry the reader's message and are meant
    /// for a 400 response.
    pub async fn read(mut multipart: Multipart) -> Result<Self, String> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .map(str::to_string)
                        .unwrap_or_else(|| guess_content_type(&file_name).to_string());
                    let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                    form.files.insert(
                        name,
                        Upload {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let text = field.text().await.map_err(|e| e.to_string())?;
                    form.texts.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Trimmed text value; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .get(name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Remove and return a file part. Empty uploads count as absent.
    pub fn take_file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name).filter(|u| !u.bytes.is_empty())
    }
}
