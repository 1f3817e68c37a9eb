use crate::rows::{EnrollmentRow, TicketRow};
use crate::{PostgresBookingStore, store_error};
use hotel_booking_core::{EligibilityRepository, Enrollment, EnrollmentId, Result, Ticket, UserId};

impl EligibilityRepository for PostgresBookingStore {
    #[tracing::instrument(skip(self))]
    async fn find_enrollment_with_address(&self, user_id: UserId) -> Result<Option<Enrollment>> {
        let row: Option<EnrollmentRow> = sqlx::query_as(
            r"
            SELECT e.id, e.user_id, e.name, e.created_at, e.updated_at,
                   a.cep, a.street, a.city, a.state, a.number, a.neighborhood,
                   a.address_detail
            FROM enrollments e
            LEFT JOIN addresses a ON a.enrollment_id = e.id
            WHERE e.user_id = $1
            ",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("query enrollment"))?;

        Ok(row.map(Enrollment::from))
    }

    #[tracing::instrument(skip(self))]
    async fn find_ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Ticket>> {
        let row: Option<TicketRow> = sqlx::query_as(
            r"
            SELECT t.id, t.enrollment_id, t.status, t.created_at, t.updated_at,
                   tt.id AS ticket_type_id, tt.name AS ticket_type_name, tt.price,
                   tt.is_remote, tt.includes_hotel
            FROM tickets t
            JOIN ticket_types tt ON tt.id = t.ticket_type_id
            WHERE t.enrollment_id = $1
            ORDER BY t.id
            LIMIT 1
            ",
        )
        .bind(enrollment_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("query ticket"))?;

        row.map(Ticket::try_from).transpose()
    }
}
