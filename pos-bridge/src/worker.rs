//! Bridge worker — sequential signal pump
//!
//! Receives [`RealtimeSignal`]s from the channel and drives the
//! reconcilers. Events are handled one at a time in arrival order;
//! handling an event for a given order additionally takes that order's
//! lock so locally-initiated mutations cannot interleave with it.
//!
//! A failed event leaves both sides in their prior-known-good state and
//! the worker keeps draining — only shutdown or a closed channel stops
//! it.

use shared::event::{PlatformEvent, RealtimeSignal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::context::BridgeContext;
use crate::error::BridgeResult;
use crate::locks::OrderLocks;
use crate::orders::OrderReconciler;
use crate::resync::ResyncSupervisor;
use crate::transactions::TransactionReconciler;

pub struct BridgeWorker {
    ctx: BridgeContext,
    orders: OrderReconciler,
    transactions: TransactionReconciler,
    resync: ResyncSupervisor,
    locks: OrderLocks,
    signals: mpsc::Receiver<RealtimeSignal>,
    shutdown: CancellationToken,
}

impl BridgeWorker {
    pub fn new(
        ctx: BridgeContext,
        locks: OrderLocks,
        signals: mpsc::Receiver<RealtimeSignal>,
        shutdown: CancellationToken,
    ) -> Self {
        let orders = OrderReconciler::new(ctx.clone());
        let transactions = TransactionReconciler::new(ctx.clone());
        let resync = ResyncSupervisor::new(ctx.clone());
        Self {
            ctx,
            orders,
            transactions,
            resync,
            locks,
            signals,
            shutdown,
        }
    }

    /// Main run loop — drain signals until shutdown.
    pub async fn run(mut self) {
        tracing::info!("bridge worker started");
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                signal = self.signals.recv() => match signal {
                    None => break,
                    Some(signal) => self.handle_signal(signal).await,
                }
            }
        }
        tracing::info!("bridge worker stopped");
    }

    pub async fn handle_signal(&self, signal: RealtimeSignal) {
        match signal {
            RealtimeSignal::Connected { epoch } => {
                tracing::info!(%epoch, "connection established, resyncing in-flight state");
                if let Err(e) = self.resync.run().await {
                    tracing::error!("resync failed: {e}");
                }
            }
            RealtimeSignal::Disconnected => {
                tracing::info!("realtime connection lost, awaiting reconnect");
            }
            RealtimeSignal::Timeout => {
                tracing::warn!("realtime connection stale, disassociating platform-pending state");
                if let Err(e) = self.ctx.adapter.disassociate_all().await {
                    tracing::error!("disassociate failed: {e}");
                }
            }
            RealtimeSignal::Event(event) => {
                let kind = event.kind();
                if let Err(e) = self.dispatch(event).await {
                    tracing::error!(kind, "event handling failed: {e}");
                }
            }
        }
    }

    async fn dispatch(&self, event: PlatformEvent) -> BridgeResult<()> {
        match event {
            PlatformEvent::OrderCreated { order } | PlatformEvent::OrderUpdated { order } => {
                let _serial = match order.id.as_deref() {
                    Some(id) => Some(self.locks.lock(id).await),
                    None => None,
                };
                self.orders.handle_order_event(order).await
            }
            PlatformEvent::TransactionCreated { transaction }
            | PlatformEvent::TransactionUpdated { transaction } => {
                let _serial = match transaction.order_id.as_deref() {
                    Some(id) => Some(self.locks.lock(id).await),
                    None => None,
                };
                self.transactions
                    .handle_transaction_event(transaction)
                    .await
            }
            PlatformEvent::TableAllocationChanged { checkin }
            | PlatformEvent::CheckinCreated { checkin } => {
                self.ctx.adapter.record_platform_checkin(&checkin).await?;
                Ok(())
            }
            PlatformEvent::Checkout { checkin_id } => {
                self.ctx.adapter.checkin_closed(&checkin_id).await?;
                Ok(())
            }
            PlatformEvent::MemberCreated { member } | PlatformEvent::MemberUpdated { member } => {
                self.ctx.adapter.upsert_member(&member).await?;
                Ok(())
            }
            PlatformEvent::BookingCreated { booking }
            | PlatformEvent::BookingUpdated { booking } => match &self.ctx.reservations {
                Some(reservations) => {
                    reservations.upsert_booking(&booking).await?;
                    Ok(())
                }
                None => {
                    tracing::debug!(booking_id = %booking.id, "no reservation capability, skipping booking event");
                    Ok(())
                }
            },
            PlatformEvent::BookingDeleted { booking_id } => match &self.ctx.reservations {
                Some(reservations) => {
                    reservations.delete_booking(&booking_id).await?;
                    Ok(())
                }
                None => {
                    tracing::debug!(%booking_id, "no reservation capability, skipping booking event");
                    Ok(())
                }
            },
        }
    }
}
