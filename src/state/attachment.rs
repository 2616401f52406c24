//! Proof attachment: size/type constraints, classification and preview loading

use super::forms::FormStateStore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest accepted attachment (5 MiB)
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

pub const FILE_TOO_LARGE: &str = "File must be 5MB or smaller.";

/// Extensions the attachment picker offers
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Errors raised at the picker boundary, before the engine sees a file
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Only .jpg, .jpeg, .png and .pdf files are accepted")]
    UnsupportedType,
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification used for icons and preview decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
    File,
}

impl FileKind {
    pub fn from_name(name: &str) -> Self {
        let Some(ext) = extension_of(name) else {
            return Self::File;
        };

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Image
        } else if ext == "pdf" {
            Self::Pdf
        } else {
            Self::File
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::File => "file",
        }
    }
}

/// Metadata for a file the user selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size_bytes: u64,
    pub path: Option<PathBuf>,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            path: None,
        }
    }

    /// Inspect a path chosen in the picker, applying the picker's type filter
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let accepted = extension_of(&name)
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false);
        if !accepted {
            return Err(AttachmentError::UnsupportedType);
        }

        let metadata = std::fs::metadata(path).map_err(|source| AttachmentError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }
}

/// Verdict of the constraint checker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    pub accepted: bool,
    pub error: Option<&'static str>,
    pub kind: FileKind,
}

/// Enforce the size ceiling and classify the file by extension
pub fn check_file(file: &FileMeta) -> FileCheck {
    let kind = FileKind::from_name(&file.name);

    if file.size_bytes > MAX_FILE_SIZE {
        FileCheck {
            accepted: false,
            error: Some(FILE_TOO_LARGE),
            kind,
        }
    } else {
        FileCheck {
            accepted: true,
            error: None,
            kind,
        }
    }
}

fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Image preview lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// Not an image, no preview is produced
    NotApplicable,
    /// Decode in flight; nothing should be rendered yet
    Loading,
    /// Decoded `data:` URL
    Ready(String),
    /// Decode failed; the attachment itself stays valid
    Unavailable,
}

impl PreviewState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// The currently attached proof file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub size_bytes: u64,
    pub kind: FileKind,
    pub preview: PreviewState,
}

/// Work order for an asynchronous preview decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    /// Attachment stamp the decode was issued for
    pub stamp: u64,
    pub file_name: String,
    pub path: PathBuf,
}

/// Completed decode, tagged with the stamp it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewResult {
    pub stamp: u64,
    pub data_url: Option<String>,
}

/// Read an image and encode it as a `data:` URL
pub async fn decode_preview(request: PreviewRequest) -> PreviewResult {
    let data_url = match tokio::fs::read(&request.path).await {
        Ok(bytes) => Some(format!(
            "data:{};base64,{}",
            image_mime(&request.file_name),
            STANDARD.encode(bytes)
        )),
        Err(err) => {
            tracing::warn!("Preview decode failed for {}: {err}", request.file_name);
            None
        }
    };

    PreviewResult {
        stamp: request.stamp,
        data_url,
    }
}

fn image_mime(name: &str) -> &'static str {
    match extension_of(name).as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Owns the attached file and keeps the store's attachment slot in sync
#[derive(Debug, Default)]
pub struct FileAttachmentController {
    attachment: Option<Attachment>,
    /// Incremented whenever the attachment changes; stale decodes carry an old stamp
    stamp: u64,
}

impl FileAttachmentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn stamp(&self) -> u64 {
        self.stamp
    }

    /// Attach a selected file, or treat `None` (cancelled picker) as removal.
    ///
    /// Returns a decode request when the accepted file is an image with a path.
    pub fn attach(
        &mut self,
        store: &mut FormStateStore,
        file: Option<FileMeta>,
    ) -> Option<PreviewRequest> {
        let Some(file) = file else {
            self.remove(store);
            return None;
        };

        self.stamp = self.stamp.wrapping_add(1);
        let check = check_file(&file);

        if !check.accepted {
            tracing::info!(
                "Rejected attachment {} ({} bytes)",
                file.name,
                file.size_bytes
            );
            self.attachment = None;
            store.set_attachment_name("");
            store.set_attachment_error(check.error);
            store.touch_attachment();
            store.bump_picker_generation();
            return None;
        }

        let request = match (check.kind, &file.path) {
            (FileKind::Image, Some(path)) => Some(PreviewRequest {
                stamp: self.stamp,
                file_name: file.name.clone(),
                path: path.clone(),
            }),
            _ => None,
        };
        let preview = match check.kind {
            FileKind::Image if request.is_some() => PreviewState::Loading,
            FileKind::Image => PreviewState::Unavailable,
            _ => PreviewState::NotApplicable,
        };

        store.set_attachment_name(&file.name);
        store.set_attachment_error(None);
        store.touch_attachment();
        self.attachment = Some(Attachment {
            file_name: file.name,
            size_bytes: file.size_bytes,
            kind: check.kind,
            preview,
        });

        request
    }

    /// Drop the attachment, its error and its touched flag
    pub fn remove(&mut self, store: &mut FormStateStore) {
        self.discard();
        store.set_attachment_name("");
        store.set_attachment_error(None);
        store.untouch_attachment();
        store.bump_picker_generation();
    }

    /// Forget the attachment without touching the store (used after a full reset)
    pub fn discard(&mut self) {
        self.stamp = self.stamp.wrapping_add(1);
        self.attachment = None;
    }

    /// Apply a finished decode. Returns false when the result is stale.
    pub fn complete_preview(&mut self, result: PreviewResult) -> bool {
        if result.stamp != self.stamp {
            tracing::debug!(
                "Discarding stale preview (stamp {} != {})",
                result.stamp,
                self.stamp
            );
            return false;
        }

        match self.attachment.as_mut() {
            Some(attachment) if attachment.preview == PreviewState::Loading => {
                attachment.preview = match result.data_url {
                    Some(url) => PreviewState::Ready(url),
                    None => PreviewState::Unavailable,
                };
                true
            }
            _ => false,
        }
    }

    pub fn is_preview_pending(&self) -> bool {
        self.attachment
            .as_ref()
            .is_some_and(|a| a.preview == PreviewState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::RefundField;

    fn image_meta(name: &str, size: u64) -> FileMeta {
        FileMeta {
            name: name.to_string(),
            size_bytes: size,
            path: Some(PathBuf::from(format!("/tmp/{name}"))),
        }
    }

    mod file_kind {
        use super::*;

        #[test]
        fn test_images_classified_case_insensitively() {
            for name in ["a.jpg", "a.JPEG", "a.png", "a.gif", "a.bmp", "a.WebP"] {
                assert_eq!(FileKind::from_name(name), FileKind::Image, "{name}");
            }
        }

        #[test]
        fn test_pdf_classified() {
            assert_eq!(FileKind::from_name("receipt.PDF"), FileKind::Pdf);
        }

        #[test]
        fn test_other_and_missing_extensions_are_files() {
            assert_eq!(FileKind::from_name("notes.txt"), FileKind::File);
            assert_eq!(FileKind::from_name("README"), FileKind::File);
            assert_eq!(FileKind::from_name("trailing."), FileKind::File);
            assert_eq!(FileKind::from_name(".hidden"), FileKind::File);
        }
    }

    mod check_file {
        use super::*;

        #[test]
        fn test_exact_limit_is_accepted() {
            let check = check_file(&FileMeta::new("proof.pdf", 5_242_880));
            assert!(check.accepted);
            assert!(check.error.is_none());
            assert_eq!(check.kind, FileKind::Pdf);
        }

        #[test]
        fn test_one_byte_over_is_rejected() {
            let check = check_file(&FileMeta::new("proof.pdf", 5_242_881));
            assert!(!check.accepted);
            assert_eq!(check.error, Some(FILE_TOO_LARGE));
        }
    }

    mod file_meta {
        use super::*;

        #[test]
        fn test_from_path_rejects_unsupported_extension() {
            let result = FileMeta::from_path(Path::new("/tmp/evidence.gif"));
            assert!(matches!(result, Err(AttachmentError::UnsupportedType)));
        }

        #[test]
        fn test_from_path_reports_missing_file() {
            let result = FileMeta::from_path(Path::new("/definitely/not/here/receipt.pdf"));
            assert!(matches!(result, Err(AttachmentError::Unreadable { .. })));
        }

        #[test]
        fn test_from_path_reads_size() {
            let path = std::env::temp_dir().join(format!(
                "dispute-desk-meta-{}.pdf",
                std::process::id()
            ));
            std::fs::write(&path, b"%PDF-1.4").unwrap();
            let meta = FileMeta::from_path(&path).unwrap();
            std::fs::remove_file(&path).ok();

            assert_eq!(meta.size_bytes, 8);
            assert!(meta.name.ends_with(".pdf"));
            assert_eq!(meta.path.as_deref(), Some(path.as_path()));
        }
    }

    mod controller {
        use super::*;

        #[test]
        fn test_attach_pdf_sets_name_and_kind() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();

            let request = controller.attach(&mut store, Some(FileMeta::new("proof.pdf", 1024)));

            assert!(request.is_none());
            let attachment = controller.attachment().unwrap();
            assert_eq!(attachment.kind, FileKind::Pdf);
            assert_eq!(attachment.preview, PreviewState::NotApplicable);
            assert_eq!(store.value(RefundField::ProofFileName), "proof.pdf");
            assert!(store.is_touched(RefundField::ProofFileName));
            assert!(store.error(RefundField::ProofFileName).is_none());
        }

        #[test]
        fn test_oversized_clears_previous_attachment() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();
            controller.attach(&mut store, Some(FileMeta::new("ok.pdf", 10)));
            let generation = store.picker_generation();

            controller.attach(&mut store, Some(FileMeta::new("huge.png", 5_242_881)));

            assert!(controller.attachment().is_none());
            assert_eq!(store.value(RefundField::ProofFileName), "");
            assert_eq!(store.error(RefundField::ProofFileName), Some(FILE_TOO_LARGE));
            assert_eq!(store.picker_generation(), generation + 1);
        }

        #[test]
        fn test_valid_file_after_rejection_clears_error() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();
            controller.attach(&mut store, Some(FileMeta::new("big.pdf", 6 * 1024 * 1024)));
            controller.attach(&mut store, Some(FileMeta::new("small.pdf", 1024 * 1024)));

            let attachment = controller.attachment().unwrap();
            assert_eq!(attachment.file_name, "small.pdf");
            assert_eq!(attachment.kind, FileKind::Pdf);
            assert!(store.error(RefundField::ProofFileName).is_none());
        }

        #[test]
        fn test_cancelled_picker_behaves_like_remove() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();
            controller.attach(&mut store, Some(FileMeta::new("big.pdf", MAX_FILE_SIZE + 1)));
            let generation = store.picker_generation();

            controller.attach(&mut store, None);

            assert!(controller.attachment().is_none());
            assert!(store.error(RefundField::ProofFileName).is_none());
            assert!(!store.is_touched(RefundField::ProofFileName));
            assert_eq!(store.picker_generation(), generation + 1);
        }

        #[test]
        fn test_remove_resets_only_attachment_touch() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();
            store.set_field(RefundField::TransactionId, "TXN-1");
            controller.attach(&mut store, Some(FileMeta::new("proof.pdf", 1)));

            controller.remove(&mut store);

            assert!(!store.is_touched(RefundField::ProofFileName));
            assert!(store.is_touched(RefundField::TransactionId));
            assert_eq!(store.value(RefundField::ProofFileName), "");
        }

        #[test]
        fn test_image_requests_preview_and_starts_loading() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();

            let request = controller
                .attach(&mut store, Some(image_meta("shot.png", 2048)))
                .unwrap();

            assert_eq!(request.stamp, controller.stamp());
            assert!(controller.is_preview_pending());
            assert!(!controller.attachment().unwrap().preview.is_loaded());
        }

        #[test]
        fn test_image_without_path_has_no_preview() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();
            let request = controller.attach(&mut store, Some(FileMeta::new("shot.png", 1)));
            assert!(request.is_none());
            assert_eq!(
                controller.attachment().unwrap().preview,
                PreviewState::Unavailable
            );
        }

        #[test]
        fn test_completed_preview_is_applied() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();
            let request = controller
                .attach(&mut store, Some(image_meta("shot.png", 2048)))
                .unwrap();

            let applied = controller.complete_preview(PreviewResult {
                stamp: request.stamp,
                data_url: Some("data:image/png;base64,AA==".to_string()),
            });

            assert!(applied);
            assert!(controller.attachment().unwrap().preview.is_loaded());
        }

        #[test]
        fn test_stale_preview_after_reattach_is_discarded() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();
            let first = controller
                .attach(&mut store, Some(image_meta("first.png", 1)))
                .unwrap();
            controller.attach(&mut store, Some(image_meta("second.png", 1)));

            let applied = controller.complete_preview(PreviewResult {
                stamp: first.stamp,
                data_url: Some("data:image/png;base64,AA==".to_string()),
            });

            assert!(!applied);
            let attachment = controller.attachment().unwrap();
            assert_eq!(attachment.file_name, "second.png");
            assert_eq!(attachment.preview, PreviewState::Loading);
        }

        #[test]
        fn test_stale_preview_after_remove_is_discarded() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();
            let request = controller
                .attach(&mut store, Some(image_meta("shot.png", 1)))
                .unwrap();
            controller.remove(&mut store);

            assert!(!controller.complete_preview(PreviewResult {
                stamp: request.stamp,
                data_url: Some("data:image/png;base64,AA==".to_string()),
            }));
            assert!(controller.attachment().is_none());
        }

        #[test]
        fn test_failed_decode_marks_unavailable() {
            let mut store = FormStateStore::default();
            let mut controller = FileAttachmentController::new();
            let request = controller
                .attach(&mut store, Some(image_meta("shot.png", 1)))
                .unwrap();

            controller.complete_preview(PreviewResult {
                stamp: request.stamp,
                data_url: None,
            });

            assert_eq!(
                controller.attachment().unwrap().preview,
                PreviewState::Unavailable
            );
        }
    }

    mod decode {
        use super::*;

        #[test]
        fn test_decode_preview_encodes_data_url() {
            let path = std::env::temp_dir().join(format!(
                "dispute-desk-preview-{}.png",
                std::process::id()
            ));
            std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

            let result = tokio_test::block_on(decode_preview(PreviewRequest {
                stamp: 7,
                file_name: "shot.png".to_string(),
                path: path.clone(),
            }));
            std::fs::remove_file(&path).ok();

            assert_eq!(result.stamp, 7);
            assert_eq!(result.data_url.as_deref(), Some("data:image/png;base64,iVBORw=="));
        }

        #[test]
        fn test_decode_preview_missing_file_yields_none() {
            let result = tokio_test::block_on(decode_preview(PreviewRequest {
                stamp: 1,
                file_name: "gone.jpg".to_string(),
                path: PathBuf::from("/definitely/not/here/gone.jpg"),
            }));
            assert!(result.data_url.is_none());
        }
    }
}
