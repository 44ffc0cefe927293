//! User profile service.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use teamhub_core::error::AppError;
use teamhub_core::result::AppResult;
use teamhub_core::traits::storage::BlobStore;
use teamhub_database::repositories::user::UserRepository;
use teamhub_entity::user::User;

/// Image extensions accepted for profile pictures.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Manages user profiles, including profile image uploads.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    images: Arc<dyn BlobStore>,
}

impl UserService {
    /// Create a new user service.
    pub fn new(users: Arc<UserRepository>, images: Arc<dyn BlobStore>) -> Self {
        Self { users, images }
    }

    /// Fetch a user's profile.
    pub async fn get(&self, user_id: i64) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Change the display name.
    pub async fn update_name(&self, user_id: i64, name: &str) -> AppResult<User> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }
        self.users.update_name(user_id, name.trim()).await
    }

    /// Replace the profile image. The image is stored under a generated
    /// name and referenced from the user record as a `/static/` URL.
    pub async fn update_profile_image(
        &self,
        user_id: i64,
        filename: &str,
        data: Bytes,
    ) -> AppResult<User> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| AppError::validation("Only image files can be uploaded"))?;

        let stored_name = format!("profile_{user_id}_{}", teamhub_storage::unique_blob_name(
            &format!("image.{extension}")
        ));
        self.images.write(&stored_name, data).await?;

        let image_url = format!("/static/{stored_name}");
        let user = self.users.update_profile_image(user_id, &image_url).await?;

        info!(user_id, "Profile image updated");
        Ok(user)
    }
}
