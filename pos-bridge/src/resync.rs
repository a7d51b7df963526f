//! Resync supervisor
//!
//! Runs once per realtime connect (initial and every reconnect) and
//! re-derives the full in-flight order/transaction/checkin set through
//! the *same* entry points live events use. Replaying an event the POS
//! already reflects is a no-op, which is what makes a dropped connection
//! unable to leave state permanently diverged.

use std::collections::HashSet;

use shared::models::OrderStatus;

use crate::context::BridgeContext;
use crate::error::BridgeResult;
use crate::orders::OrderReconciler;

pub struct ResyncSupervisor {
    ctx: BridgeContext,
    orders: OrderReconciler,
}

impl ResyncSupervisor {
    pub fn new(ctx: BridgeContext) -> Self {
        let orders = OrderReconciler::new(ctx.clone());
        Self { ctx, orders }
    }

    /// Full resync. Per-order failures are logged and skipped so one bad
    /// order cannot wedge recovery of the rest.
    pub async fn run(&self) -> BridgeResult<()> {
        tracing::info!("resync started");
        self.replay_unlinked_orders().await?;
        self.diff_checkins().await?;
        self.replay_linked_orders().await?;
        tracing::info!("resync finished");
        Ok(())
    }

    /// 1. Orders the platform holds no POS link for: feed each pending
    /// one, with its transaction list attached, through the live
    /// pending-order path.
    async fn replay_unlinked_orders(&self) -> BridgeResult<()> {
        let unlinked = self.ctx.gateway.list_unlinked_orders().await?;
        for mut order in unlinked {
            if !matches!(order.status, OrderStatus::Pending | OrderStatus::New) {
                continue;
            }
            let Some(order_id) = order.id.clone() else {
                tracing::warn!("resync: unlinked order without an id, skipping");
                continue;
            };
            match self
                .ctx
                .gateway
                .transactions_for_unlinked_order(&order_id)
                .await
            {
                Ok(transactions) => order.transactions = transactions,
                Err(e) => {
                    tracing::warn!(%order_id, "resync: transaction listing failed, skipping: {e}");
                    continue;
                }
            }
            if let Err(e) = self.orders.handle_order_event(order).await {
                tracing::warn!(%order_id, "resync: pending order replay failed: {e}");
            }
        }
        Ok(())
    }

    /// 2. Diff the platform's checked-in set against the POS's and
    /// synthesize checkin/checkout events for one-sided entries. Active
    /// platform checkins are re-recorded, which also re-issues any
    /// outstanding table allocations.
    async fn diff_checkins(&self) -> BridgeResult<()> {
        let platform_checkins = self.ctx.gateway.list_checkins().await?;
        let pos_active: HashSet<String> =
            self.ctx.adapter.checked_in().await?.into_iter().collect();

        let mut platform_active: HashSet<String> = HashSet::new();
        for checkin in &platform_checkins {
            if checkin.completed {
                continue;
            }
            platform_active.insert(checkin.id.clone());
            if let Err(e) = self.ctx.adapter.record_platform_checkin(checkin).await {
                tracing::warn!(checkin_id = %checkin.id, "resync: checkin record failed: {e}");
            }
        }

        for checkin_id in pos_active.difference(&platform_active) {
            tracing::info!(%checkin_id, "resync: checkin gone on the platform, closing");
            if let Err(e) = self.ctx.adapter.checkin_closed(checkin_id).await {
                tracing::warn!(%checkin_id, "resync: checkin close failed: {e}");
            }
        }
        Ok(())
    }

    /// 3. Replay linked pending/ready-to-pay/cancelled orders through
    /// the live handlers.
    async fn replay_linked_orders(&self) -> BridgeResult<()> {
        for status in [
            OrderStatus::Pending,
            OrderStatus::ReadyToPay,
            OrderStatus::Cancelled,
        ] {
            let orders = self.ctx.gateway.list_orders(Some(status)).await?;
            for order in orders {
                let order_id = order.id.clone().unwrap_or_default();
                if let Err(e) = self.orders.handle_order_event(order).await {
                    tracing::warn!(%order_id, ?status, "resync: order replay failed: {e}");
                }
            }
        }
        Ok(())
    }
}
