//! Artist profile page with its view/edit toggle.

use serde::Serialize;
use shared::{domain::Genre, records::ArtistProfile, records::SessionUser};
use thiserror::Error;
use tracing::{debug, info};

use crate::draft::{MediaBlob, MediaKind};

pub const DEFAULT_PROFILE_AVATAR_URL: &str = "https://images.pexels.com/photos/1699419/pexels-photo-1699419.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";
pub const DEFAULT_PROFILE_COVER_URL: &str = "https://images.pexels.com/photos/4997833/pexels-photo-4997833.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";

/// Genres offered by the profile dropdown, in display order.
pub const PROFILE_GENRES: [Genre; 9] = [
    Genre::Electronic,
    Genre::HipHop,
    Genre::Pop,
    Genre::Rock,
    Genre::RnB,
    Genre::Jazz,
    Genre::Classical,
    Genre::Country,
    Genre::Folk,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("profile is not in edit mode")]
    NotEditing,
    #[error("social link {index} does not exist ({len} links)")]
    SocialLinkOutOfRange { index: usize, len: usize },
    #[error("genre {0} is not offered on the profile")]
    UnsupportedGenre(Genre),
    #[error("'{0}' is not an image")]
    NotAnImage(String),
}

/// Images picked while editing; dropped on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfilePreviews {
    pub avatar: Option<MediaBlob>,
    pub cover: Option<MediaBlob>,
}

pub struct ProfileEditor {
    profile: ArtistProfile,
    previews: ProfilePreviews,
    editing: bool,
}

impl ProfileEditor {
    /// A profile without a name takes the signed-in user's name.
    pub fn new(mut profile: ArtistProfile, user: Option<&SessionUser>) -> Self {
        if profile.name.trim().is_empty() {
            if let Some(user) = user {
                profile.name = user.name.clone();
            }
        }
        Self {
            profile,
            previews: ProfilePreviews::default(),
            editing: false,
        }
    }

    pub fn profile(&self) -> &ArtistProfile {
        &self.profile
    }

    pub fn previews(&self) -> &ProfilePreviews {
        &self.previews
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Header button: enters edit mode, or saves and leaves it.
    pub fn toggle_editing(&mut self) -> bool {
        if self.editing {
            self.previews = ProfilePreviews::default();
            info!(name = %self.profile.name, "profile saved");
        } else {
            debug!("profile edit started");
        }
        self.editing = !self.editing;
        self.editing
    }

    fn fields(&mut self) -> Result<&mut ArtistProfile, ProfileError> {
        if !self.editing {
            return Err(ProfileError::NotEditing);
        }
        Ok(&mut self.profile)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ProfileError> {
        self.fields()?.name = name.into();
        Ok(())
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) -> Result<(), ProfileError> {
        self.fields()?.bio = bio.into();
        Ok(())
    }

    pub fn set_genre(&mut self, genre: Genre) -> Result<(), ProfileError> {
        if !PROFILE_GENRES.contains(&genre) {
            return Err(ProfileError::UnsupportedGenre(genre));
        }
        self.fields()?.genre = genre.label().to_string();
        Ok(())
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> Result<(), ProfileError> {
        self.fields()?.location = location.into();
        Ok(())
    }

    pub fn set_website(&mut self, website: impl Into<String>) -> Result<(), ProfileError> {
        self.fields()?.website = website.into();
        Ok(())
    }

    pub fn set_social_url(
        &mut self,
        index: usize,
        url: impl Into<String>,
    ) -> Result<(), ProfileError> {
        let links = &mut self.fields()?.social_links;
        let len = links.len();
        let link = links
            .get_mut(index)
            .ok_or(ProfileError::SocialLinkOutOfRange { index, len })?;
        link.url = url.into();
        Ok(())
    }

    pub fn stage_avatar(&mut self, image: MediaBlob) -> Result<(), ProfileError> {
        let image = Self::checked_image(image)?;
        self.fields()?;
        self.previews.avatar = Some(image);
        Ok(())
    }

    pub fn stage_cover(&mut self, image: MediaBlob) -> Result<(), ProfileError> {
        let image = Self::checked_image(image)?;
        self.fields()?;
        self.previews.cover = Some(image);
        Ok(())
    }

    fn checked_image(image: MediaBlob) -> Result<MediaBlob, ProfileError> {
        if image.is_kind(MediaKind::Image) {
            Ok(image)
        } else {
            Err(ProfileError::NotAnImage(image.file_name))
        }
    }
}

#[cfg(test)]
#[path = "tests/profile_tests.rs"]
mod tests;
