//! Transaction reconciler — payment-claim lifecycle
//!
//! `pending → waiting → complete | rejected | cancelled`. A pending
//! claim must be resolved before its order can reach a terminal state.
//! Claiming is never retried automatically: a failed claim always
//! resolves to a local cancel, which releases any held inventory/tender
//! through the adapter.

use platform_client::GatewayError;
use shared::models::{Transaction, TransactionStatus};

use crate::context::BridgeContext;
use crate::error::{BridgeError, BridgeResult};

pub struct TransactionReconciler {
    ctx: BridgeContext,
}

impl TransactionReconciler {
    pub fn new(ctx: BridgeContext) -> Self {
        Self { ctx }
    }

    /// Entry point for platform transaction pushes.
    pub async fn handle_transaction_event(&self, tx: Transaction) -> BridgeResult<()> {
        match tx.status {
            TransactionStatus::Pending => self.pending(tx).await,
            TransactionStatus::Complete => self.sync_version(&tx).await,
            TransactionStatus::Cancelled => {
                self.sync_version(&tx).await?;
                self.ctx.adapter.cancel_payment(&tx).await?;
                tracing::info!(transaction_id = %tx.id, "transaction cancelled by platform");
                Ok(())
            }
            // Interim states echo our own pushes back; nothing to do
            TransactionStatus::Waiting | TransactionStatus::Rejected => {
                tracing::debug!(transaction_id = %tx.id, status = ?tx.status, "ignoring echoed transaction state");
                Ok(())
            }
        }
    }

    /// Platform-pushed pending claim: the POS decides whether the order
    /// is payable.
    async fn pending(&self, tx: Transaction) -> BridgeResult<()> {
        match self.ctx.adapter.ready_to_pay(&tx).await? {
            None => {
                tracing::info!(
                    transaction_id = %tx.id,
                    order_id = tx.order_id.as_deref().unwrap_or("-"),
                    "no matching POS order for pending transaction, rejecting"
                );
                self.reject_payment(tx, "no matching order on the POS").await
            }
            Some(_order) => {
                if let Some(v) = tx.version.as_deref() {
                    self.ctx
                        .adapter
                        .record_transaction_version(&tx.id, v)
                        .await?;
                }
                self.claim_payment(tx).await
            }
        }
    }

    /// Claim payment: push `waiting`, then record the outcome locally.
    ///
    /// Any fault resolves to a local cancel — never a retry. The
    /// platform does not document the claim endpoint as idempotent, so a
    /// blind retry risks a double charge.
    pub async fn claim_payment(&self, mut tx: Transaction) -> BridgeResult<()> {
        tx.status = TransactionStatus::Waiting;

        match self.ctx.gateway.update_transaction(&tx).await {
            Ok(returned) if returned.id == tx.id => {
                // Local effects only after the remote call succeeded
                self.ctx.adapter.record_payment(&returned).await?;
                if let Some(v) = returned.version.as_deref() {
                    self.ctx
                        .adapter
                        .record_transaction_version(&returned.id, v)
                        .await?;
                }
                tracing::info!(transaction_id = %tx.id, "payment claimed");
                Ok(())
            }
            Ok(returned) => {
                tracing::error!(
                    transaction_id = %tx.id,
                    returned_id = %returned.id,
                    "claim answered with a foreign transaction, cancelling locally"
                );
                self.ctx.adapter.cancel_payment(&tx).await?;
                Ok(())
            }
            Err(e @ GatewayError::NotFound(_)) => {
                tracing::warn!(transaction_id = %tx.id, "transaction gone on the platform, cancelling locally: {e}");
                self.ctx.adapter.cancel_payment(&tx).await?;
                Ok(())
            }
            Err(e @ GatewayError::Conflict(_)) => {
                tracing::warn!(transaction_id = %tx.id, "payment already claimed, cancelling locally: {e}");
                self.ctx.adapter.cancel_payment(&tx).await?;
                Ok(())
            }
            Err(e) => {
                tracing::error!(transaction_id = %tx.id, "claim failed, cancelling locally: {e}");
                self.ctx.adapter.cancel_payment(&tx).await?;
                Ok(())
            }
        }
    }

    /// Reject payment: push `rejected`; the platform confirms with
    /// `complete`, anything else is a failed rejection.
    pub async fn reject_payment(&self, mut tx: Transaction, reason: &str) -> BridgeResult<()> {
        tx.status = TransactionStatus::Rejected;
        tx.reason = Some(reason.to_string());

        let returned = self.ctx.gateway.update_transaction(&tx).await?;
        if returned.status != TransactionStatus::Complete {
            return Err(BridgeError::Protocol(format!(
                "platform did not confirm rejection of transaction {} (answered {:?})",
                tx.id, returned.status
            )));
        }
        tracing::info!(transaction_id = %tx.id, reason, "payment rejected");
        Ok(())
    }

    /// Complete/cancelled pushed directly: just re-synchronize the
    /// version.
    async fn sync_version(&self, tx: &Transaction) -> BridgeResult<()> {
        if let Some(v) = tx.version.as_deref() {
            self.ctx
                .adapter
                .record_transaction_version(&tx.id, v)
                .await?;
        }
        Ok(())
    }
}
