//! Sample documents and parser output.

use bytes::Bytes;
use docflow_api::UploadRequest;
use docflow_core::models::ExtractedContent;
use serde_json::{json, Map, Value};

pub const PDF: &str = "application/pdf";
pub const PPT: &str = "application/vnd.ms-powerpoint";
pub const CSV: &str = "text/csv";

pub fn pdf_bytes() -> Bytes {
    Bytes::from_static(b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n")
}

pub fn csv_bytes() -> Bytes {
    Bytes::from_static(b"region,revenue\nnorth,120\nsouth,95\n")
}

pub fn ppt_bytes() -> Bytes {
    // OLE2 compound file signature
    Bytes::from_static(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00, 0x00])
}

pub fn metadata(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn extracted_content() -> ExtractedContent {
    ExtractedContent {
        text: "Quarterly revenue grew 12% year over year.".to_string(),
        metadata: metadata(json!({
            "page_count": 3,
            "author": "Finance",
            "languages": ["eng"]
        })),
    }
}

pub fn upload(content_type: &str, data: Bytes, filename: &str) -> UploadRequest {
    UploadRequest {
        declared_size: Some(data.len() as u64),
        data,
        content_type: content_type.to_string(),
        original_filename: Some(filename.to_string()),
    }
}
