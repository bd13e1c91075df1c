use crate::types::Profile;

use super::{SpotifyClient, error::Result};

impl SpotifyClient {
    async fn get_profile(&self) -> Result<Profile> {
        self.get_json("/me").await
    }

    /// Returns the Spotify ID of the user the token belongs to.
    ///
    /// A body that is valid JSON but not a profile object fails with
    /// [`SpotifyError::Deserialization`](super::SpotifyError::Deserialization).
    pub async fn get_user_id(&self) -> Result<String> {
        let profile = self.get_profile().await?;
        Ok(profile.id)
    }
}
