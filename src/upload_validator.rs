// src/upload_validator.rs
use std::path::Path;

use thiserror::Error;
use tokio::fs;

use crate::app_log;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct UploadValidationError {
    pub file_name: String,
    pub error_type: UploadErrorType,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorType {
    EmptyFile,
    TooLarge,
    WrongFormat,
    CorruptedFile,
    UnreadableFile,
}

impl UploadErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyFile => "UPLOAD_EMPTY",
            Self::TooLarge => "UPLOAD_TOO_LARGE",
            Self::WrongFormat => "UPLOAD_WRONG_FORMAT",
            Self::CorruptedFile => "UPLOAD_CORRUPTED",
            Self::UnreadableFile => "UPLOAD_UNREADABLE",
        }
    }
}

/// What the file is for. Each kind has its own MIME allow-list and ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Resume,
    Avatar,
}

impl UploadKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Resume => "/upload/resume",
            Self::Avatar => "/upload/avatar",
        }
    }

    pub fn max_bytes(&self) -> usize {
        match self {
            Self::Resume => 5 * 1024 * 1024,
            Self::Avatar => 2 * 1024 * 1024,
        }
    }

    pub fn allowed_mime_types(&self) -> &'static [&'static str] {
        match self {
            Self::Resume => &[
                "application/pdf",
                "application/msword",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ],
            Self::Avatar => &["image/png", "image/jpeg", "image/webp"],
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::Avatar => "Avatar",
        }
    }
}

/// A file staged for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self, UploadValidationError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let bytes = fs::read(path).await.map_err(|e| UploadValidationError {
            file_name: file_name.clone(),
            error_type: UploadErrorType::UnreadableFile,
            message: format!("Cannot read file: {}", e),
            suggestion: "Check the path and file permissions".to_string(),
        })?;

        let mime_type = mime_from_file_name(&file_name).to_string();
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }
}

pub fn mime_from_file_name(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    match lower.rsplit_once('.').map(|(_, ext)| ext) {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub struct UploadValidator;

impl UploadValidator {
    /// Check type and size before anything is sent.
    pub fn validate(kind: UploadKind, file: &UploadFile) -> Result<(), UploadValidationError> {
        let fail = |error_type, message: String, suggestion: &str| UploadValidationError {
            file_name: file.file_name.clone(),
            error_type,
            message,
            suggestion: suggestion.to_string(),
        };

        if file.bytes.is_empty() {
            return Err(fail(
                UploadErrorType::EmptyFile,
                format!("{} file is empty", kind.label()),
                "Please choose a valid file",
            ));
        }

        if file.bytes.len() > kind.max_bytes() {
            return Err(fail(
                UploadErrorType::TooLarge,
                format!(
                    "{} file too large: {:.1}MB (max {}MB)",
                    kind.label(),
                    file.bytes.len() as f64 / 1024.0 / 1024.0,
                    kind.max_bytes() / 1024 / 1024
                ),
                "Please compress the file and try again",
            ));
        }

        if !kind.allowed_mime_types().contains(&file.mime_type.as_str()) {
            let suggestion = match kind {
                UploadKind::Resume => "Please use PDF, DOC or DOCX format",
                UploadKind::Avatar => "Please use PNG, JPEG or WEBP format",
            };
            return Err(fail(
                UploadErrorType::WrongFormat,
                format!("Unsupported file type: {}", file.mime_type),
                suggestion,
            ));
        }

        match file.mime_type.as_str() {
            "image/png" => Self::check_signature(file, PNG_SIGNATURE, "PNG")?,
            "image/jpeg" => Self::check_signature(file, JPEG_SIGNATURE, "JPEG")?,
            _ => {}
        }

        app_log!(debug, "{} upload passed validation: {}", kind.label(), file.file_name);
        Ok(())
    }

    fn check_signature(
        file: &UploadFile,
        signature: &[u8],
        format: &str,
    ) -> Result<(), UploadValidationError> {
        if file.bytes.starts_with(signature) {
            return Ok(());
        }

        let (error_type, message) = if format == "PNG" && file.bytes.starts_with(JPEG_SIGNATURE) {
            (
                UploadErrorType::WrongFormat,
                "File is JPEG but was declared as PNG".to_string(),
            )
        } else if format == "JPEG" && file.bytes.starts_with(PNG_SIGNATURE) {
            (
                UploadErrorType::WrongFormat,
                "File is PNG but was declared as JPEG".to_string(),
            )
        } else {
            (
                UploadErrorType::CorruptedFile,
                format!("Invalid {} file - corrupted or wrong format", format),
            )
        };

        app_log!(warn, "Upload rejected: {}", message);
        Err(UploadValidationError {
            file_name: file.file_name.clone(),
            error_type,
            message,
            suggestion: format!("Please upload a valid {} image", format),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0u8; 32]);
        bytes
    }

    #[test]
    fn test_accepts_small_pdf_resume() {
        let file = UploadFile::new("cv.pdf", "application/pdf", b"%PDF-1.7 ...".to_vec());
        assert!(UploadValidator::validate(UploadKind::Resume, &file).is_ok());
    }

    #[test]
    fn test_rejects_empty_file() {
        let file = UploadFile::new("cv.pdf", "application/pdf", Vec::new());
        let err = UploadValidator::validate(UploadKind::Resume, &file).unwrap_err();
        assert_eq!(err.error_type, UploadErrorType::EmptyFile);
    }

    #[test]
    fn test_rejects_oversized_avatar() {
        let mut bytes = png_bytes();
        bytes.resize(UploadKind::Avatar.max_bytes() + 1, 0);
        let file = UploadFile::new("me.png", "image/png", bytes);
        let err = UploadValidator::validate(UploadKind::Avatar, &file).unwrap_err();
        assert_eq!(err.error_type, UploadErrorType::TooLarge);
        assert_eq!(err.error_type.code(), "UPLOAD_TOO_LARGE");
    }

    #[test]
    fn test_rejects_image_as_resume() {
        let file = UploadFile::new("cv.png", "image/png", png_bytes());
        let err = UploadValidator::validate(UploadKind::Resume, &file).unwrap_err();
        assert_eq!(err.error_type, UploadErrorType::WrongFormat);
    }

    #[test]
    fn test_detects_jpeg_declared_as_png() {
        let mut bytes = JPEG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0u8; 16]);
        let file = UploadFile::new("me.png", "image/png", bytes);
        let err = UploadValidator::validate(UploadKind::Avatar, &file).unwrap_err();
        assert_eq!(err.error_type, UploadErrorType::WrongFormat);
        assert!(err.message.contains("JPEG"));
    }

    #[test]
    fn test_mime_from_file_name() {
        assert_eq!(mime_from_file_name("Resume.DOCX"), UploadKind::Resume.allowed_mime_types()[2]);
        assert_eq!(mime_from_file_name("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_from_file_name("noext"), "application/octet-stream");
    }
}
