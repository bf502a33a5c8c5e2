//! File services: upload, download, listing, deletion.

pub mod service;

pub use service::{FileDownload, FileService, UploadFileRequest};
