use crate::{PostgresBookingStore, store_error};
use hotel_booking_core::{Result, SessionRepository, UserId};

impl SessionRepository for PostgresBookingStore {
    #[tracing::instrument(skip_all)]
    async fn find_user_by_token(&self, token: &str) -> Result<Option<UserId>> {
        let user_id: Option<(i32,)> =
            sqlx::query_as("SELECT user_id FROM sessions WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error("query session"))?;

        Ok(user_id.map(|(id,)| UserId::new(id)))
    }
}
