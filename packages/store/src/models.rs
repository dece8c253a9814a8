//! # Domain models for devices and their documents
//!
//! Defines the records the console exchanges with the backend. They are
//! `Serialize + Deserialize` with camelCase field names so they match the
//! backend's JSON bodies one to one.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Device`] | A registered device: backend `id`, the structured `device_id` (`aaaa-1111-bbbb-2222`), a display name, and the password echoed back on creation. |
//! | [`NewDevice`] | The body of a device-creation request, also the input of the create form. |
//! | [`DeviceFile`] | A document attached to a device. The reserved [`PASSWORD_ARTIFACT_NAME`] file holds the device password. |
//! | [`Upload`] | A file picked by the user, passed through opaquely to the upload endpoint. |
//! | [`FileKind`] | The closed set of icon categories a file can be displayed with. |
//!
//! ## Helper functions
//!
//! - [`FileKind::of`] — maps MIME type / file name to a [`FileKind`].
//! - [`resolve_file_url`] — turns a descriptor's `url` into something the browser can open.
//! - [`local_timestamp`] — formats `createdAt`/`updatedAt` in the viewer's time zone.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::list::Identified;

/// Name of the reserved file that stores a device's password.
pub const PASSWORD_ARTIFACT_NAME: &str = ".password";

/// A device as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Backend primary key, used in every `/api/devices/:id` path.
    pub id: u64,
    /// Structured identifier: "abcd-1234-efgh-5678"
    pub device_id: String,
    /// Empty when the backend sends no name or `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub device_name: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Device {
    /// Name shown on cards and rows, with a placeholder for blank names.
    pub fn display_name(&self) -> &str {
        if self.device_name.trim().is_empty() {
            "Device Name"
        } else {
            &self.device_name
        }
    }
}

impl Identified for Device {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Fields submitted when registering a device.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub device_id: String,
    pub device_name: String,
    pub password: String,
}

/// A document stored under a device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFile {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub mime: String,
    /// Either an absolute URL or a path relative to the backend base URL.
    pub url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DeviceFile {
    /// Whether this is the reserved password file created with the device.
    pub fn is_password_artifact(&self) -> bool {
        self.name == PASSWORD_ARTIFACT_NAME
    }

    /// Icon category for this file.
    pub fn kind(&self) -> FileKind {
        FileKind::of(&self.mime, &self.name)
    }

    /// Name truncated to `max` characters for card display.
    pub fn short_name(&self, max: usize) -> String {
        self.name.chars().take(max).collect()
    }
}

impl Identified for DeviceFile {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A file selected for upload. Contents are never inspected.
#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// The password artifact uploaded right after a device is created.
    pub fn password_artifact(password: &str) -> Self {
        Self {
            name: PASSWORD_ARTIFACT_NAME.to_string(),
            mime: "text/plain".to_string(),
            bytes: password.as_bytes().to_vec(),
        }
    }
}

/// Display category for a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Word,
    Image,
    Video,
    Other,
}

impl FileKind {
    /// Classify a file. A recognised MIME type decides; otherwise the
    /// extension does; otherwise [`FileKind::Other`].
    pub fn of(mime: &str, name: &str) -> Self {
        Self::from_mime(mime)
            .or_else(|| Self::from_name(name))
            .unwrap_or(FileKind::Other)
    }

    fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence {
            "application/pdf" => Some(FileKind::Pdf),
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(FileKind::Word)
            }
            m if m.starts_with("image/") => Some(FileKind::Image),
            m if m.starts_with("video/") => Some(FileKind::Video),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "doc" | "docx" => Some(FileKind::Word),
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "svg" => Some(FileKind::Image),
            "mp4" | "mov" | "webm" | "mkv" | "avi" => Some(FileKind::Video),
            _ => None,
        }
    }
}

/// Build the URL a file is opened at.
///
/// Absolute `http(s)` URLs pass through; relative paths are joined onto
/// `base_url` with exactly one slash between them.
pub fn resolve_file_url(base_url: &str, file: &DeviceFile) -> String {
    let url = file.url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

/// Timestamp as shown on cards, in the viewer's local time.
pub fn local_timestamp(at: &DateTime<Utc>) -> String {
    format_timestamp(at, &Local)
}

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: Display,
{
    at.with_timezone(zone).format("%d %b %Y, %H:%M").to_string()
}
