//! Checkin / table / booking coordinator
//!
//! Associates tables and bookings with checkins and orders. An order
//! must carry a valid checkin reference before it can be accepted for
//! table service; seating a booking against an order whose checkin does
//! not match the booking's aborts before any platform call.

use shared::models::{Booking, Checkin, CheckinCreate};

use crate::context::BridgeContext;
use crate::error::{BridgeError, BridgeResult};

pub struct SeatingCoordinator {
    ctx: BridgeContext,
}

impl SeatingCoordinator {
    pub fn new(ctx: BridgeContext) -> Self {
        Self { ctx }
    }

    /// Allocate tables to a POS order. If the order already has a
    /// checkin this is a modification of that allocation, not a new
    /// checkin.
    pub async fn allocate_table(
        &self,
        pos_ref: &str,
        table_names: Vec<String>,
        covers: u32,
    ) -> BridgeResult<Checkin> {
        let link = self
            .ctx
            .adapter
            .order_by_pos_ref(pos_ref)
            .await?
            .ok_or_else(|| {
                BridgeError::Precondition(format!("POS order {pos_ref} does not exist"))
            })?;

        if let Some(checkin_id) = link.checkin_id.as_deref() {
            tracing::debug!(pos_ref, checkin_id, "order already checked in, modifying allocation");
            return self.modify_allocation(checkin_id, table_names, covers).await;
        }

        let checkin = self
            .ctx
            .gateway
            .create_checkin(&CheckinCreate {
                table_names,
                covers,
                consumer: None,
            })
            .await?;
        self.ctx
            .adapter
            .record_checkin(pos_ref, Some(&checkin.id))
            .await?;
        self.ctx.adapter.record_platform_checkin(&checkin).await?;
        tracing::info!(pos_ref, checkin_id = %checkin.id, "checkin created for table allocation");

        // Attach the checkin to the platform copy of the order
        if let Some(platform_id) = link.platform_id.as_deref() {
            self.push_order_checkin(pos_ref, platform_id, &checkin.id)
                .await?;
        }

        Ok(checkin)
    }

    /// Re-issue a checkin's allocation. An empty `table_names` list
    /// deallocates; an empty platform response is a hard failure.
    pub async fn modify_allocation(
        &self,
        checkin_id: &str,
        table_names: Vec<String>,
        covers: u32,
    ) -> BridgeResult<Checkin> {
        let updated = self
            .ctx
            .gateway
            .update_checkin(
                checkin_id,
                &CheckinCreate {
                    table_names,
                    covers,
                    consumer: None,
                },
            )
            .await?;
        self.ctx.adapter.record_platform_checkin(&updated).await?;
        tracing::info!(checkin_id, tables = ?updated.table_names, "allocation modified");
        Ok(updated)
    }

    /// Seat a booking, optionally against an existing POS order.
    ///
    /// When the POS order already has a checkin it must match the
    /// booking's on id, covers and table-name set (set-equality) — any
    /// mismatch aborts before the seating call goes out.
    pub async fn seat_booking(
        &self,
        booking: &Booking,
        pos_ref: Option<&str>,
    ) -> BridgeResult<Checkin> {
        let reservations = self.ctx.reservations.as_ref().ok_or_else(|| {
            BridgeError::Precondition("POS provides no reservation capability".into())
        })?;

        let link = match pos_ref {
            Some(pos_ref) => Some(
                self.ctx
                    .adapter
                    .order_by_pos_ref(pos_ref)
                    .await?
                    .ok_or_else(|| {
                        BridgeError::Precondition(format!("POS order {pos_ref} does not exist"))
                    })?,
            ),
            None => None,
        };

        if let Some(existing_id) = link.as_ref().and_then(|l| l.checkin_id.as_deref()) {
            self.verify_seating_criteria(booking, existing_id).await?;
        }

        let seated = self
            .ctx
            .gateway
            .seat_booking(
                &booking.id,
                &CheckinCreate {
                    table_names: booking.table_names.clone(),
                    covers: booking.covers,
                    consumer: Some(booking.consumer.clone()),
                },
            )
            .await?;

        // Platform confirmed — record the link, then attach to the order
        reservations
            .record_booking_checkin(&booking.id, &seated.id)
            .await?;
        self.ctx.adapter.record_platform_checkin(&seated).await?;

        if let Some(link) = link {
            self.ctx
                .adapter
                .record_checkin(&link.pos_ref, Some(&seated.id))
                .await?;
            if let Some(platform_id) = link.platform_id.as_deref() {
                self.push_order_checkin(&link.pos_ref, platform_id, &seated.id)
                    .await?;
            }
        }

        tracing::info!(booking_id = %booking.id, checkin_id = %seated.id, "booking seated");
        Ok(seated)
    }

    /// Seating criteria: order checkin and booking checkin must agree on
    /// id, covers and table set.
    async fn verify_seating_criteria(
        &self,
        booking: &Booking,
        order_checkin_id: &str,
    ) -> BridgeResult<()> {
        let booking_checkin_id = booking.checkin_id.as_deref().ok_or_else(|| {
            BridgeError::Precondition(format!(
                "order is checked in ({order_checkin_id}) but booking {} is unseated",
                booking.id
            ))
        })?;
        if booking_checkin_id != order_checkin_id {
            return Err(BridgeError::Precondition(format!(
                "order checkin {order_checkin_id} does not match booking checkin {booking_checkin_id}"
            )));
        }

        let checkin = self.ctx.gateway.get_checkin(order_checkin_id).await?;
        if checkin.covers != booking.covers {
            return Err(BridgeError::Precondition(format!(
                "covers mismatch: checkin has {}, booking has {}",
                checkin.covers, booking.covers
            )));
        }
        if !checkin.same_tables(&booking.table_names) {
            return Err(BridgeError::Precondition(format!(
                "table set mismatch between checkin {order_checkin_id} and booking {}",
                booking.id
            )));
        }
        Ok(())
    }

    /// Push the checkin reference onto the platform order, carrying the
    /// last recorded version.
    async fn push_order_checkin(
        &self,
        pos_ref: &str,
        platform_id: &str,
        checkin_id: &str,
    ) -> BridgeResult<()> {
        let mut order = self.ctx.gateway.get_order(platform_id).await?;
        order.checkin_id = Some(checkin_id.to_string());
        if let Some(v) = self.ctx.adapter.recorded_version(pos_ref).await? {
            order.version = Some(v);
        }
        let returned = self.ctx.gateway.update_order(&order).await?;
        if let Some(v) = returned.version.as_deref() {
            self.ctx.adapter.record_version(pos_ref, v).await?;
        }
        Ok(())
    }
}
