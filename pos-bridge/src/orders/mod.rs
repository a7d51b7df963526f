//! Order reconciler — the acceptance state machine
//!
//! Turns a received order event (or a locally-initiated order mutation)
//! into platform gateway calls and POS adapter calls:
//!
//! ```text
//! pending/new ──▶ accepted ──▶ waiting_for_payment ──▶ paid
//!      │              └──────────────(bistro: one synchronous pass)
//!      └─▶ rejected                  any state ──▶ cancelled
//! ```
//!
//! The bistro/restaurant branch lives here once, keyed by
//! [`CaptureMode`], instead of being re-derived at each call site.
//! Every outbound mutation carries the version last recorded for the
//! POS-local order; local effects are recorded only after the
//! corresponding remote call succeeded.

mod order_ahead;

use rust_decimal::Decimal;
use shared::models::{Order, OrderStatus};

use platform_client::OrderDecision;

use crate::adapter::{AvailabilityVerdict, PaymentCoverage, PaymentScope};
use crate::config::CaptureMode;
use crate::context::BridgeContext;
use crate::error::{BridgeError, BridgeResult};
use crate::transactions::TransactionReconciler;

pub struct OrderReconciler {
    ctx: BridgeContext,
    transactions: TransactionReconciler,
}

impl OrderReconciler {
    pub fn new(ctx: BridgeContext) -> Self {
        let transactions = TransactionReconciler::new(ctx.clone());
        Self { ctx, transactions }
    }

    /// Entry point for platform order pushes. Resync replays through
    /// here as well, so every path must be a no-op once the POS already
    /// reflects the outcome.
    pub async fn handle_order_event(&self, order: Order) -> BridgeResult<()> {
        let order_id = order
            .id
            .clone()
            .ok_or_else(|| BridgeError::Protocol("platform pushed an order without an id".into()))?;

        match order.status {
            OrderStatus::New | OrderStatus::Pending => self.intake_pending(order_id, order).await,
            OrderStatus::ReadyToPay => self.ready_to_pay(order_id, order).await,
            OrderStatus::Cancelled => self.cancelled(order_id).await,
            other => Err(BridgeError::Protocol(format!(
                "order {order_id} pushed with unexpected status {other:?}"
            ))),
        }
    }

    /// A pending/new platform order: judge it onto the POS.
    async fn intake_pending(&self, order_id: String, order: Order) -> BridgeResult<()> {
        if let Some(link) = self.ctx.adapter.order_by_platform_id(&order_id).await? {
            tracing::debug!(%order_id, pos_ref = %link.pos_ref, "pending order already on the POS, skipping");
            return Ok(());
        }

        // A missing consumer record is unconditionally fatal to the
        // order: reject it and every attached transaction, no
        // availability judgment at all.
        if order.consumer.is_none() {
            tracing::warn!(%order_id, "pending order has no consumer record, rejecting");
            return self
                .reject_pending(&order_id, order, "consumer record missing")
                .await;
        }

        // Payment attached: confirm straight onto the POS, split by
        // whether the transactions cover the full total.
        if !order.transactions.is_empty() {
            let coverage = if order.fully_covered() {
                PaymentCoverage::FullyPaid
            } else {
                PaymentCoverage::AwaitingReadyToPay
            };
            let pos_ref = self.ctx.adapter.confirm_new_order(&order, coverage).await?;
            tracing::info!(
                %order_id,
                %pos_ref,
                fulfilment = ?order.fulfilment,
                ?coverage,
                "confirmed platform order with payment attached"
            );
            self.push_accepted(&order_id, &pos_ref, order.version.as_deref())
                .await?;
            return Ok(());
        }

        // No payment attached: the POS judges availability and pricing.
        match self
            .ctx
            .adapter
            .judge_availability(&order, self.ctx.mode)
            .await?
        {
            AvailabilityVerdict::Declined { reason } => {
                tracing::info!(%order_id, %reason, "availability declined, rejecting");
                self.reject_pending(&order_id, order, &reason).await
            }
            AvailabilityVerdict::Approved {
                order: priced,
                pos_ref,
            } => {
                let version = priced.version.clone().or(order.version);
                match self.ctx.mode {
                    CaptureMode::Restaurant => {
                        // Payment capture happens later, on ready-to-pay
                        self.push_accepted(&order_id, &pos_ref, version.as_deref())
                            .await?;
                        tracing::info!(%order_id, %pos_ref, "order accepted, awaiting ready-to-pay");
                        Ok(())
                    }
                    CaptureMode::Bistro => {
                        // Single pass: accepted → waiting_for_payment →
                        // capture, one synchronous sequence
                        self.push_accepted(&order_id, &pos_ref, version.as_deref())
                            .await?;
                        self.capture_single_pass(&order_id, &pos_ref, priced).await
                    }
                }
            }
        }
    }

    /// Bistro tail of a positive availability judgment.
    async fn capture_single_pass(
        &self,
        order_id: &str,
        pos_ref: &str,
        priced: Order,
    ) -> BridgeResult<()> {
        let mut reconciled = self.ctx.adapter.reconcile_totals(priced).await?;
        if reconciled.not_paying_total > Decimal::ZERO {
            return Err(BridgeError::Protocol(format!(
                "order {order_id} carries a positive not-paying-total in bistro mode"
            )));
        }

        reconciled.status = OrderStatus::WaitingForPayment;
        reconciled.version = self.ctx.adapter.recorded_version(pos_ref).await?;
        let returned = self.ctx.gateway.update_order(&reconciled).await?;
        if let Some(v) = returned.version.as_deref() {
            self.ctx.adapter.record_version(pos_ref, v).await?;
        }

        self.ctx
            .adapter
            .capture_payment(&returned, PaymentScope::Full)
            .await?;
        tracing::info!(%order_id, %pos_ref, "single-pass payment captured");
        Ok(())
    }

    /// Consumer asked for the bill: reconcile totals, push
    /// `waiting_for_payment`, capture.
    async fn ready_to_pay(&self, order_id: String, order: Order) -> BridgeResult<()> {
        let link = self
            .ctx
            .adapter
            .order_by_platform_id(&order_id)
            .await?
            .ok_or_else(|| {
                BridgeError::Precondition(format!("order {order_id} is not on the POS"))
            })?;

        if link.payment_captured {
            tracing::debug!(%order_id, "payment already captured, skipping replayed ready-to-pay");
            return Ok(());
        }

        // The pushed version is the freshest observed
        if let Some(v) = order.version.as_deref() {
            self.ctx.adapter.record_version(&link.pos_ref, v).await?;
        }

        // The POS is the pricing source of truth and may rewrite the
        // order before payment
        let mut reconciled = self.ctx.adapter.reconcile_totals(order).await?;

        let partial = reconciled.not_paying_total > Decimal::ZERO;
        if partial && self.ctx.mode == CaptureMode::Bistro {
            return Err(BridgeError::Protocol(format!(
                "order {order_id} carries a positive not-paying-total in bistro mode"
            )));
        }

        reconciled.status = OrderStatus::WaitingForPayment;
        reconciled.version = self.ctx.adapter.recorded_version(&link.pos_ref).await?;
        let returned = self.ctx.gateway.update_order(&reconciled).await?;
        if let Some(v) = returned.version.as_deref() {
            self.ctx.adapter.record_version(&link.pos_ref, v).await?;
        }

        let scope = if partial {
            PaymentScope::Partial
        } else {
            PaymentScope::Full
        };
        self.ctx.adapter.capture_payment(&returned, scope).await?;
        tracing::info!(%order_id, ?scope, "payment captured at ready-to-pay");
        Ok(())
    }

    /// Platform cancelled the order: notify the POS and stop. No further
    /// platform calls.
    async fn cancelled(&self, order_id: String) -> BridgeResult<()> {
        self.ctx.adapter.order_cancelled(&order_id).await?;
        tracing::info!(%order_id, "order cancelled by platform");
        Ok(())
    }

    /// Report the accept decision, then record the answered version.
    async fn push_accepted(
        &self,
        order_id: &str,
        pos_ref: &str,
        version: Option<&str>,
    ) -> BridgeResult<Order> {
        let returned = self
            .ctx
            .gateway
            .submit_order_result(order_id, OrderDecision::Accepted, version)
            .await?;
        if let Some(v) = returned.version.as_deref() {
            self.ctx.adapter.record_version(pos_ref, v).await?;
        }
        Ok(returned)
    }

    /// Report the reject decision, notify the POS, reject every attached
    /// transaction. Individual transaction failures do not abort the
    /// batch.
    async fn reject_pending(
        &self,
        order_id: &str,
        order: Order,
        reason: &str,
    ) -> BridgeResult<()> {
        self.ctx
            .gateway
            .submit_order_result(order_id, OrderDecision::Rejected, order.version.as_deref())
            .await?;
        self.ctx.adapter.reject_order(&order, reason).await?;

        for tx in &order.transactions {
            if let Err(e) = self.transactions.reject_payment(tx.clone(), reason).await {
                tracing::warn!(
                    order_id,
                    transaction_id = %tx.id,
                    "attached transaction reject failed: {e}"
                );
            }
        }
        Ok(())
    }
}
