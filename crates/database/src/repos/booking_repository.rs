//! Repository for bookings and the stay lifecycle.
//!
//! Every status change runs in a single transaction together with the room
//! status flip and any payment or refund it implies.

use crate::entities::{
    Booking, BookingCancellation, BookingFilter, BookingStatus, CheckoutSummary, NewBooking,
    PaymentMethod, RoomStatus, TransactionKind,
};
use crate::repos::room_repository::{fetch_room, set_room_status};
use crate::repos::transaction_repository::{insert_transaction, net_paid_cents};
use crate::types::{now_timestamp, DatabaseError, DatabaseResult, Page};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

const BOOKING_SELECT: &str = "SELECT b.id, b.reference, b.hotel_id, b.room_id, r.room_number,
        b.guest_name, b.guest_email, b.guest_phone, b.check_in, b.check_out, b.guests,
        b.total_cents, b.status, b.created_at, b.updated_at
     FROM bookings b
     JOIN rooms r ON r.id = b.room_id";

/// Repository for booking database operations
#[derive(Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Booking>> {
        let mut conn = self.pool.acquire().await?;
        fetch_booking(&mut conn, id).await
    }

    pub async fn find_by_reference(&self, reference: &str) -> DatabaseResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!("{BOOKING_SELECT} WHERE b.reference = ?"))
            .bind(reference.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    pub async fn list(&self, filter: &BookingFilter, page: Page) -> DatabaseResult<Vec<Booking>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("{BOOKING_SELECT} WHERE 1 = 1"));

        if let Some(hotel_id) = filter.hotel_id {
            query.push(" AND b.hotel_id = ").push_bind(hotel_id);
        }
        if let Some(room_id) = filter.room_id {
            query.push(" AND b.room_id = ").push_bind(room_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND b.status = ").push_bind(status);
        }
        if let Some(date) = filter.date {
            query
                .push(" AND b.check_in <= ")
                .push_bind(date)
                .push(" AND b.check_out > ")
                .push_bind(date);
        }

        query
            .push(" ORDER BY b.check_in, b.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let bookings = query.build_query_as::<Booking>().fetch_all(&self.pool).await?;
        Ok(bookings)
    }

    /// Reserve a room. The overlap check and the insert share one transaction.
    pub async fn create(&self, request: &NewBooking) -> DatabaseResult<Booking> {
        if request.check_out <= request.check_in {
            return Err(DatabaseError::ValidationError(format!(
                "check-out {} must be after check-in {}",
                request.check_out, request.check_in
            )));
        }

        let mut tx = self.pool.begin().await?;

        let room = fetch_room(&mut tx, request.room_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("room", request.room_id))?;

        if room.status == RoomStatus::Maintenance {
            return Err(DatabaseError::conflict(format!(
                "room {} is under maintenance",
                room.room_number
            )));
        }
        if request.guests < 1 || request.guests > room.capacity {
            return Err(DatabaseError::ValidationError(format!(
                "room {} takes between 1 and {} guests, got {}",
                room.room_number, room.capacity, request.guests
            )));
        }

        let clash: Option<String> = sqlx::query_scalar(
            "SELECT reference FROM bookings
             WHERE room_id = ? AND status IN ('booked', 'checked_in')
               AND check_in < ? AND check_out > ?
             LIMIT 1",
        )
        .bind(room.id)
        .bind(request.check_out)
        .bind(request.check_in)
        .fetch_optional(&mut *tx)
        .await?;
        if let Some(reference) = clash {
            debug!(room_id = room.id, %reference, "booking overlaps an existing stay");
            return Err(DatabaseError::conflict(format!(
                "room {} is already booked between {} and {}",
                room.room_number, request.check_in, request.check_out
            )));
        }

        let nights = (request.check_out - request.check_in).num_days();
        let total_cents = nights
            .checked_mul(room.rate_cents)
            .ok_or_else(|| DatabaseError::ValidationError("booking total overflows".to_string()))?;

        let now = now_timestamp();
        let reference = cuid2::create_id();
        let result = sqlx::query(
            "INSERT INTO bookings (reference, hotel_id, room_id, guest_name, guest_email, guest_phone, check_in, check_out, guests, total_cents, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&reference)
        .bind(room.hotel_id)
        .bind(room.id)
        .bind(&request.guest_name)
        .bind(&request.guest_email)
        .bind(&request.guest_phone)
        .bind(request.check_in)
        .bind(request.check_out)
        .bind(request.guests)
        .bind(total_cents)
        .bind(BookingStatus::Booked)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let booking_id = result.last_insert_rowid();
        let booking = fetch_booking(&mut tx, booking_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("booking", booking_id))?;
        tx.commit().await?;

        info!(
            booking_id,
            reference = %booking.reference,
            room_id = room.id,
            nights,
            total_cents,
            "created booking"
        );
        Ok(booking)
    }

    pub async fn check_in(&self, id: i64) -> DatabaseResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let booking = transition(&mut tx, id, BookingStatus::Booked, BookingStatus::CheckedIn).await?;
        set_room_status(&mut tx, booking.room_id, RoomStatus::Occupied).await?;
        tx.commit().await?;

        info!(booking_id = id, room_id = booking.room_id, "guest checked in");
        Ok(booking)
    }

    /// Close the stay, free the room and charge whatever is still owed.
    pub async fn check_out(&self, id: i64, method: PaymentMethod) -> DatabaseResult<CheckoutSummary> {
        let mut tx = self.pool.begin().await?;

        let booking = transition(&mut tx, id, BookingStatus::CheckedIn, BookingStatus::CheckedOut).await?;
        set_room_status(&mut tx, booking.room_id, RoomStatus::Available).await?;

        let previously_paid_cents = net_paid_cents(&mut tx, id).await?;
        let outstanding = booking.total_cents - previously_paid_cents;
        let payment = if outstanding > 0 {
            Some(
                insert_transaction(
                    &mut tx,
                    booking.hotel_id,
                    Some(id),
                    TransactionKind::Payment,
                    method,
                    outstanding,
                    Some(booking.reference.as_str()),
                )
                .await?,
            )
        } else {
            None
        };
        tx.commit().await?;

        let amount_charged_cents = payment.as_ref().map_or(0, |p| p.amount_cents);
        info!(
            booking_id = id,
            total_cents = booking.total_cents,
            amount_charged_cents,
            "guest checked out"
        );

        Ok(CheckoutSummary {
            nights: booking.nights(),
            total_cents: booking.total_cents,
            previously_paid_cents,
            amount_charged_cents,
            payment,
            booking,
        })
    }

    /// Cancel a reservation that has not started. Money already taken is
    /// refunded with the method of the most recent payment.
    pub async fn cancel(&self, id: i64) -> DatabaseResult<BookingCancellation> {
        let mut tx = self.pool.begin().await?;

        let booking = transition(&mut tx, id, BookingStatus::Booked, BookingStatus::Cancelled).await?;

        let paid = net_paid_cents(&mut tx, id).await?;
        let refund = if paid > 0 {
            let method: Option<PaymentMethod> = sqlx::query_scalar(
                "SELECT method FROM transactions WHERE booking_id = ? AND kind = 'payment'
                 ORDER BY id DESC LIMIT 1",
            )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

            Some(
                insert_transaction(
                    &mut tx,
                    booking.hotel_id,
                    Some(id),
                    TransactionKind::Refund,
                    method.unwrap_or(PaymentMethod::Cash),
                    paid,
                    Some(booking.reference.as_str()),
                )
                .await?,
            )
        } else {
            None
        };
        tx.commit().await?;

        info!(booking_id = id, refunded_cents = paid.max(0), "booking cancelled");
        Ok(BookingCancellation { booking, refund })
    }
}

async fn fetch_booking(conn: &mut SqliteConnection, id: i64) -> DatabaseResult<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(&format!("{BOOKING_SELECT} WHERE b.id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(booking)
}

/// Move a booking from `from` to `to`, failing with `Conflict` from any other status.
async fn transition(
    conn: &mut SqliteConnection,
    id: i64,
    from: BookingStatus,
    to: BookingStatus,
) -> DatabaseResult<Booking> {
    let current = fetch_booking(&mut *conn, id)
        .await?
        .ok_or_else(|| DatabaseError::not_found("booking", id))?;

    let result = sqlx::query("UPDATE bookings SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(now_timestamp())
        .bind(id)
        .bind(from)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::conflict(format!(
            "booking {} is {} and cannot become {}",
            current.reference, current.status, to
        )));
    }

    fetch_booking(conn, id)
        .await?
        .ok_or_else(|| DatabaseError::not_found("booking", id))
}
