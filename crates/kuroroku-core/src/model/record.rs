/// Scanned-file records — the input boundary of the core.
///
/// A `FileRecord` is one entry yielded by the (out-of-crate) directory
/// scanner. `path` is the unique join key the frontend uses to correlate
/// tree nodes, treemap rectangles, and selection state back to records.
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Broad media classification for a scanned entry.
///
/// Irrelevant to tree building and tiling — carried through for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Directory,
    Video,
    Image,
    Audio,
    Document,
    Other,
}

impl FileKind {
    /// Classify a file extension into a media kind.
    ///
    /// Lowercases into a fixed-size stack buffer rather than allocating a
    /// `String`; anything longer than 8 bytes is `Other`.
    pub fn from_extension(ext: &str) -> Self {
        let bytes = ext.as_bytes();
        if bytes.len() > 8 {
            return Self::Other;
        }

        let mut lower = [0u8; 8];
        for (dst, &src) in lower.iter_mut().zip(bytes.iter()) {
            *dst = src.to_ascii_lowercase();
        }
        let lower = match std::str::from_utf8(&lower[..bytes.len()]) {
            Ok(s) => s,
            Err(_) => return Self::Other,
        };

        match lower {
            "mp4" | "mkv" | "avi" | "mov" | "wmv" | "flv" | "webm" | "m4v" | "mpeg" | "mpg" => {
                Self::Video
            }
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" | "svg" | "ico" | "tiff" | "tif" => {
                Self::Image
            }
            "mp3" | "wav" | "flac" | "aac" | "ogg" | "wma" | "m4a" | "opus" => Self::Audio,
            "pdf" | "doc" | "docx" | "txt" | "rtf" | "odt" | "xls" | "xlsx" | "ppt" | "pptx" => {
                Self::Document
            }
            _ => Self::Other,
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Directory => "Directory",
            Self::Video => "Video",
            Self::Image => "Image",
            Self::Audio => "Audio",
            Self::Document => "Document",
            Self::Other => "Other",
        }
    }
}

/// One scanned filesystem entry, as supplied by the scanning collaborator.
///
/// Paths may use `/` or `\` separators and are not required to be
/// filesystem-normalized; within one collection they are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full path — the unique join key.
    pub path: String,

    /// Display name, usually the path's final segment.
    pub name: CompactString,

    /// Lowercased extension without the dot; empty when absent.
    pub extension: CompactString,

    /// Media classification (display-only in this crate).
    pub kind: FileKind,

    /// Logical file size in bytes.
    pub size: u64,

    /// Creation timestamp, when the scanner could read one.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// Last-modified timestamp, when the scanner could read one.
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

impl FileRecord {
    /// Build a record from a path and size, deriving name, extension, and
    /// kind from the final path segment.
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        let path = path.into();
        let name: CompactString = path
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or("")
            .into();
        let extension: CompactString = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
                ext.to_ascii_lowercase().into()
            }
            _ => CompactString::default(),
        };
        let kind = FileKind::from_extension(&extension);

        Self {
            path,
            name,
            extension,
            kind,
            size,
            created: None,
            modified: None,
        }
    }

    /// Set the last-modified timestamp.
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Override the derived kind (e.g. for directory entries).
    pub fn with_kind(mut self, kind: FileKind) -> Self {
        self.kind = kind;
        self
    }
}
