//! The release being assembled by the upload wizard.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use shared::domain::{Genre, PlatformId};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    fn mime_prefix(self) -> &'static str {
        match self {
            MediaKind::Image => "image/",
            MediaKind::Audio => "audio/",
        }
    }
}

/// A file handed over by a picker or drag-drop. The bytes are never sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaBlob {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl MediaBlob {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Declared mime type, or one guessed from the file extension.
    pub fn effective_mime_type(&self) -> Option<String> {
        self.mime_type.clone().or_else(|| {
            mime_guess::from_path(&self.file_name)
                .first_raw()
                .map(str::to_string)
        })
    }

    pub fn is_kind(&self, kind: MediaKind) -> bool {
        self.effective_mime_type()
            .is_some_and(|mime| mime.to_ascii_lowercase().starts_with(kind.mime_prefix()))
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size as shown under the audio preview, e.g. `"3.42 MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.bytes.len() as f64 / BYTES_PER_MB)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonetizationFlags {
    pub monetize_all_platforms: bool,
    pub user_generated_content: bool,
    pub sync_licensing: bool,
}

impl Default for MonetizationFlags {
    fn default() -> Self {
        Self {
            monetize_all_platforms: true,
            user_generated_content: true,
            sync_licensing: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadDraft {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub genre: Option<Genre>,
    pub release_date: Option<NaiveDate>,
    pub explicit: bool,
    pub monetization: MonetizationFlags,
    pub agreement_accepted: bool,
    cover_image: Option<MediaBlob>,
    audio_file: Option<MediaBlob>,
    selected_platforms: BTreeSet<PlatformId>,
}

impl Default for UploadDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            album: None,
            genre: None,
            release_date: None,
            explicit: false,
            monetization: MonetizationFlags::default(),
            agreement_accepted: false,
            cover_image: None,
            audio_file: None,
            selected_platforms: PlatformId::ALL
                .iter()
                .copied()
                .filter(|platform| platform.selected_by_default())
                .collect(),
        }
    }
}

impl UploadDraft {
    pub fn cover_image(&self) -> Option<&MediaBlob> {
        self.cover_image.as_ref()
    }

    pub fn audio_file(&self) -> Option<&MediaBlob> {
        self.audio_file.as_ref()
    }

    pub fn has_required_media(&self) -> bool {
        self.cover_image.is_some() && self.audio_file.is_some()
    }

    pub fn select_cover(&mut self, blob: MediaBlob) {
        self.cover_image = Some(blob);
    }

    /// Drag-drop only accepts images; anything else is ignored.
    pub fn drop_cover(&mut self, blob: MediaBlob) -> bool {
        if !blob.is_kind(MediaKind::Image) {
            return false;
        }
        self.cover_image = Some(blob);
        true
    }

    pub fn clear_cover(&mut self) {
        self.cover_image = None;
    }

    pub fn select_audio(&mut self, blob: MediaBlob) {
        self.audio_file = Some(blob);
    }

    pub fn drop_audio(&mut self, blob: MediaBlob) -> bool {
        if !blob.is_kind(MediaKind::Audio) {
            return false;
        }
        self.audio_file = Some(blob);
        true
    }

    pub fn clear_audio(&mut self) {
        self.audio_file = None;
    }

    pub fn set_album(&mut self, album: impl Into<String>) {
        let album = album.into();
        self.album = if album.trim().is_empty() {
            None
        } else {
            Some(album)
        };
    }

    /// Flips a platform and returns whether it is now selected.
    pub fn toggle_platform(&mut self, platform: PlatformId) -> bool {
        if self.selected_platforms.remove(&platform) {
            false
        } else {
            self.selected_platforms.insert(platform);
            true
        }
    }

    pub fn is_platform_selected(&self, platform: PlatformId) -> bool {
        self.selected_platforms.contains(&platform)
    }

    pub fn selected_platforms(&self) -> impl Iterator<Item = PlatformId> + '_ {
        self.selected_platforms.iter().copied()
    }
}
