// User directory endpoints.

use tracing::debug;

use crate::client::FaceClient;
use crate::error::Error;
use crate::types::{DeleteResponse, UsersListResponse};

impl FaceClient {
    /// List all enrolled users, in the order the service returns them.
    ///
    /// `GET /users`
    pub async fn list_users(&self) -> Result<UsersListResponse, Error> {
        debug!("listing users");
        self.get("users", "Failed to fetch users").await
    }

    /// Delete a user and their face embedding.
    ///
    /// `DELETE /users/{user_id}`
    pub async fn delete_user(&self, user_id: i64) -> Result<DeleteResponse, Error> {
        debug!(user_id, "deleting user");
        self.delete(&format!("users/{user_id}"), "Failed to delete user")
            .await
    }
}
