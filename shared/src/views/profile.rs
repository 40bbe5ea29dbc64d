//! The profile page.

use super::{Notifier, SubmitOutcome};
use crate::format::initials;
use crate::validation::{FormErrors, ProfileField, ProfileForm, ProfileInput, INVALID_FORM_MESSAGE};
use crate::{AgendaApi, Profile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileState {
    pub profile: Profile,
    pub form: ProfileForm,
    pub errors: FormErrors<ProfileField>,
    /// Local preview URL of a picked but not yet uploaded avatar
    pub avatar_preview: Option<String>,
    pub loaded: bool,
}

impl ProfileState {
    pub fn set_profile(&mut self, profile: Profile) {
        self.form = ProfileForm::from_profile(&profile);
        self.profile = profile;
        self.loaded = true;
    }

    pub fn apply_input(&mut self, input: ProfileInput) {
        let field = self.form.apply(input);
        self.errors.clear(field);
    }

    /// Fold a successful save in. The preview of a picked avatar survives when
    /// its upload failed; otherwise it is released and returned.
    pub fn apply_saved(&mut self, saved: SavedProfile) -> Option<String> {
        let released = if saved.avatar_pending {
            None
        } else {
            self.avatar_preview.take()
        };
        self.set_profile(saved.profile);
        released
    }

    /// Image to show: the pending preview, else the stored avatar
    pub fn avatar_src(&self) -> Option<&str> {
        self.avatar_preview
            .as_deref()
            .or(self.profile.avatar_url.as_deref())
    }

    /// Fallback text for the avatar circle
    pub fn initials(&self) -> String {
        if self.profile.full_name.trim().is_empty() {
            initials(&self.form.full_name)
        } else {
            initials(&self.profile.full_name)
        }
    }
}

/// A saved profile, and whether a picked avatar still has to be uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct SavedProfile {
    pub profile: Profile,
    /// The picked avatar failed to upload; the page keeps it for another try
    pub avatar_pending: bool,
}

pub struct ProfileController<'a, A, N> {
    api: &'a A,
    notifier: &'a N,
}

impl<'a, A, N> ProfileController<'a, A, N>
where
    A: AgendaApi,
    N: Notifier,
{
    pub fn new(api: &'a A, notifier: &'a N) -> Self {
        Self { api, notifier }
    }

    pub async fn load(&self) -> Result<Profile, String> {
        self.api.get_profile().await.map_err(|error| {
            let message = error.user_message();
            self.notifier.error(format!("Failed to load profile: {}", message));
            message
        })
    }

    /// Save the profile fields, uploading `avatar` first when one was picked.
    ///
    /// A failed upload is reported but does not stop the field update.
    pub async fn save(
        &self,
        form: &ProfileForm,
        avatar: Option<A::Upload>,
    ) -> SubmitOutcome<ProfileField, SavedProfile> {
        let update = match form.validate() {
            Ok(update) => update,
            Err(errors) => {
                self.notifier.error(INVALID_FORM_MESSAGE);
                return SubmitOutcome::Invalid(errors);
            }
        };

        let mut avatar_url = None;
        let mut avatar_pending = false;
        if let Some(file) = avatar {
            match self.api.upload_avatar(file).await {
                Ok(url) => {
                    self.notifier.success("Avatar updated successfully!");
                    avatar_url = Some(url);
                }
                Err(error) => {
                    self.notifier
                        .error(format!("Failed to upload avatar: {}", error.user_message()));
                    avatar_pending = true;
                }
            }
        }

        match self.api.update_profile(&update).await {
            Ok(mut profile) => {
                if profile.avatar_url.is_none() {
                    profile.avatar_url = avatar_url;
                }
                self.notifier.success("Profile updated successfully!");
                SubmitOutcome::Saved(SavedProfile { profile, avatar_pending })
            }
            Err(error) => {
                let message = error.user_message();
                self.notifier.error(format!("Failed to save profile: {}", message));
                SubmitOutcome::Failed(message)
            }
        }
    }
}
