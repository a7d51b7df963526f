//! Order-ahead accept/reject sub-protocol
//!
//! Order-ahead orders are platform-originated before the consumer is
//! allocated to a table; the terminal decision is POS-initiated. The
//! platform does not support mutating an order-ahead order after that
//! decision, so per-transaction claim/reject failures are logged and the
//! batch continues — there is nothing to retry against.

use platform_client::OrderDecision;

use crate::error::{BridgeError, BridgeResult};

use super::OrderReconciler;

impl OrderReconciler {
    /// Accept a POS-initiated order-ahead order.
    ///
    /// Re-fetches the platform's current copy first; a version that
    /// moved past the recorded one refuses the accept (caller re-fetches
    /// and retries) rather than silently overwriting.
    pub async fn accept_order_ahead(&self, pos_ref: &str) -> BridgeResult<()> {
        let (platform_id, current) = self.fetch_order_ahead(pos_ref).await?;

        let recorded = self.ctx.adapter.recorded_version(pos_ref).await?;
        if current.version != recorded {
            return Err(BridgeError::Conflict(format!(
                "order {platform_id} changed on the platform, re-fetch and retry"
            )));
        }

        let returned = self
            .ctx
            .gateway
            .submit_order_result(&platform_id, OrderDecision::Accepted, recorded.as_deref())
            .await?;
        if let Some(v) = returned.version.as_deref() {
            self.ctx.adapter.record_version(pos_ref, v).await?;
        }
        tracing::info!(%pos_ref, %platform_id, "order-ahead accepted");

        // Every attached transaction moves to waiting and gets claimed
        for tx in current.transactions {
            let transaction_id = tx.id.clone();
            if let Err(e) = self.transactions.claim_payment(tx).await {
                tracing::warn!(
                    pos_ref,
                    %transaction_id,
                    "order-ahead claim failed, continuing: {e}"
                );
            }
        }
        Ok(())
    }

    /// Reject a POS-initiated order-ahead order and every attached
    /// transaction.
    pub async fn reject_order_ahead(&self, pos_ref: &str, reason: &str) -> BridgeResult<()> {
        let (platform_id, current) = self.fetch_order_ahead(pos_ref).await?;

        self.ctx
            .gateway
            .submit_order_result(
                &platform_id,
                OrderDecision::Rejected,
                current.version.as_deref(),
            )
            .await?;
        tracing::info!(%pos_ref, %platform_id, %reason, "order-ahead rejected");

        for tx in current.transactions {
            let transaction_id = tx.id.clone();
            if let Err(e) = self.transactions.reject_payment(tx, reason).await {
                tracing::warn!(
                    pos_ref,
                    %transaction_id,
                    "order-ahead transaction reject failed, continuing: {e}"
                );
            }
        }
        Ok(())
    }

    /// Resolve the platform copy of a POS order-ahead order.
    async fn fetch_order_ahead(
        &self,
        pos_ref: &str,
    ) -> BridgeResult<(String, shared::models::Order)> {
        let link = self
            .ctx
            .adapter
            .order_by_pos_ref(pos_ref)
            .await?
            .ok_or_else(|| {
                BridgeError::Precondition(format!("POS order {pos_ref} does not exist"))
            })?;
        let platform_id = link.platform_id.ok_or_else(|| {
            BridgeError::Precondition(format!("POS order {pos_ref} never round-tripped"))
        })?;
        let current = self.ctx.gateway.get_order(&platform_id).await?;
        Ok((platform_id, current))
    }
}
