//! In-memory mock implementations of the POS adapter and platform
//! gateway, plus entity builders shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use platform_client::{GatewayError, GatewayResult, OrderDecision, PlatformGateway};
use pos_bridge::{
    AdapterError, AvailabilityVerdict, BridgeContext, CaptureMode, PaymentCoverage, PaymentScope,
    PosAdapter, PosOrder, ReservationCapability, RewardCapability,
};
use pos_bridge::error::AdapterResult;
use shared::models::{
    Booking, Checkin, CheckinCreate, Consumer, FulfilmentType, Member, Order, OrderStatus, Reward,
    Table, Transaction, TransactionStatus,
};

pub fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn consumer(name: &str) -> Consumer {
    Consumer {
        name: name.into(),
        phone: Some("0400000000".into()),
        email: None,
        address: None,
    }
}

pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: Some(id.into()),
        pos_ref: None,
        status,
        version: Some("v1".into()),
        checkin_id: None,
        fulfilment: FulfilmentType::Unknown,
        consumer: Some(consumer("Ada")),
        items: vec![shared::models::OrderItem {
            id: "i1".into(),
            name: "Noodles".into(),
            quantity: 2,
            unit_price: d("12.50"),
            notes: None,
        }],
        adjustments: vec![],
        pay_total: Decimal::ZERO,
        not_paying_total: Decimal::ZERO,
        split_ways: 0,
        pay_splits: 0,
        tip: Decimal::ZERO,
        transactions: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn transaction(id: &str, order_id: &str, amount: &str, status: TransactionStatus) -> Transaction {
    Transaction {
        id: id.into(),
        order_id: Some(order_id.into()),
        amount: d(amount),
        status,
        version: Some("tv1".into()),
        partner_initiated: false,
        accept_less: false,
        reason: None,
        created_at: Utc::now(),
    }
}

pub fn checkin(id: &str, tables: &[&str], covers: u32) -> Checkin {
    Checkin {
        id: id.into(),
        table_names: tables.iter().map(|t| t.to_string()).collect(),
        covers,
        consumer: None,
        completed: false,
        updated_at: Utc::now(),
    }
}

pub fn booking(id: &str, tables: &[&str], covers: u32) -> Booking {
    Booking {
        id: id.into(),
        table_names: tables.iter().map(|t| t.to_string()).collect(),
        date: Utc::now(),
        covers,
        consumer: consumer("Grace"),
        checkin_id: None,
        updated_at: Utc::now(),
    }
}

// ==================== Mock POS adapter ====================

#[derive(Default)]
pub struct PosState {
    pub orders: HashMap<String, PosOrder>,
    pub by_platform: HashMap<String, String>,
    pub versions: HashMap<String, String>,
    pub tx_versions: HashMap<String, String>,
    /// (platform order id, coverage) per confirm call — every call is
    /// recorded so duplicate confirmations are visible
    pub confirmed: Vec<(String, PaymentCoverage)>,
    /// Platform order ids that went through availability judgment
    pub judged: Vec<String>,
    pub rejected: Vec<(String, String)>,
    pub cancelled_orders: Vec<String>,
    /// (platform order id, scope) per capture call
    pub captures: Vec<(String, PaymentScope)>,
    pub payments: Vec<String>,
    pub cancelled_payments: Vec<String>,
    pub members: HashMap<String, Member>,
    pub checkins: HashMap<String, Checkin>,
    pub closed_checkins: Vec<String>,
    pub disassociated: bool,

    // === programmable behavior ===
    /// When set, availability judgments decline with this reason
    pub decline_reason: Option<String>,
    /// Payable orders answered by the ready-to-pay judgment, keyed by
    /// platform order id
    pub payable: HashMap<String, Order>,
    /// When set, reconcile_totals rewrites not_paying_total to this
    pub inject_not_paying_total: Option<Decimal>,
}

#[derive(Default)]
pub struct MockPos {
    state: Mutex<PosState>,
}

impl MockPos {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, PosState> {
        self.state.lock().unwrap()
    }

    /// Seed a linked POS order.
    pub fn seed_link(&self, pos_ref: &str, platform_id: &str, version: &str) {
        let mut state = self.state();
        state.orders.insert(
            pos_ref.to_string(),
            PosOrder {
                pos_ref: pos_ref.to_string(),
                platform_id: Some(platform_id.to_string()),
                checkin_id: None,
                payment_captured: false,
            },
        );
        state
            .by_platform
            .insert(platform_id.to_string(), pos_ref.to_string());
        state
            .versions
            .insert(pos_ref.to_string(), version.to_string());
    }

    pub fn set_order_checkin(&self, pos_ref: &str, checkin_id: &str) {
        let mut state = self.state();
        if let Some(link) = state.orders.get_mut(pos_ref) {
            link.checkin_id = Some(checkin_id.to_string());
        }
    }

    fn link_for(state: &PosState, platform_id: &str) -> Option<PosOrder> {
        state
            .by_platform
            .get(platform_id)
            .and_then(|pos_ref| state.orders.get(pos_ref))
            .cloned()
    }
}

#[async_trait]
impl PosAdapter for MockPos {
    async fn order_by_pos_ref(&self, pos_ref: &str) -> AdapterResult<Option<PosOrder>> {
        Ok(self.state().orders.get(pos_ref).cloned())
    }

    async fn order_by_platform_id(&self, platform_id: &str) -> AdapterResult<Option<PosOrder>> {
        Ok(Self::link_for(&self.state(), platform_id))
    }

    async fn recorded_version(&self, pos_ref: &str) -> AdapterResult<Option<String>> {
        Ok(self.state().versions.get(pos_ref).cloned())
    }

    async fn record_version(&self, pos_ref: &str, version: &str) -> AdapterResult<()> {
        self.state()
            .versions
            .insert(pos_ref.to_string(), version.to_string());
        Ok(())
    }

    async fn record_checkin(&self, pos_ref: &str, checkin_id: Option<&str>) -> AdapterResult<()> {
        let mut state = self.state();
        let link = state
            .orders
            .get_mut(pos_ref)
            .ok_or_else(|| AdapterError::new(format!("no POS order {pos_ref}")))?;
        link.checkin_id = checkin_id.map(str::to_string);
        Ok(())
    }

    async fn judge_availability(
        &self,
        order: &Order,
        _mode: CaptureMode,
    ) -> AdapterResult<AvailabilityVerdict> {
        let mut state = self.state();
        let platform_id = order.id.clone().unwrap_or_default();
        state.judged.push(platform_id.clone());

        if let Some(reason) = state.decline_reason.clone() {
            return Ok(AvailabilityVerdict::Declined { reason });
        }

        let pos_ref = format!("pos-{platform_id}");
        state.orders.insert(
            pos_ref.clone(),
            PosOrder {
                pos_ref: pos_ref.clone(),
                platform_id: Some(platform_id.clone()),
                checkin_id: None,
                payment_captured: false,
            },
        );
        state.by_platform.insert(platform_id, pos_ref.clone());
        Ok(AvailabilityVerdict::Approved {
            order: order.clone(),
            pos_ref,
        })
    }

    async fn confirm_new_order(
        &self,
        order: &Order,
        coverage: PaymentCoverage,
    ) -> AdapterResult<String> {
        let mut state = self.state();
        let platform_id = order.id.clone().unwrap_or_default();
        state.confirmed.push((platform_id.clone(), coverage));

        let pos_ref = format!("pos-{platform_id}");
        state.orders.insert(
            pos_ref.clone(),
            PosOrder {
                pos_ref: pos_ref.clone(),
                platform_id: Some(platform_id.clone()),
                checkin_id: None,
                payment_captured: matches!(coverage, PaymentCoverage::FullyPaid),
            },
        );
        state.by_platform.insert(platform_id, pos_ref.clone());
        Ok(pos_ref)
    }

    async fn reject_order(&self, order: &Order, reason: &str) -> AdapterResult<()> {
        self.state()
            .rejected
            .push((order.id.clone().unwrap_or_default(), reason.to_string()));
        Ok(())
    }

    async fn order_cancelled(&self, platform_id: &str) -> AdapterResult<()> {
        let mut state = self.state();
        if !state.cancelled_orders.iter().any(|id| id == platform_id) {
            state.cancelled_orders.push(platform_id.to_string());
        }
        Ok(())
    }

    async fn reconcile_totals(&self, mut order: Order) -> AdapterResult<Order> {
        if let Some(npt) = self.state().inject_not_paying_total {
            order.not_paying_total = npt;
        }
        Ok(order)
    }

    async fn capture_payment(&self, order: &Order, scope: PaymentScope) -> AdapterResult<()> {
        let mut state = self.state();
        let platform_id = order.id.clone().unwrap_or_default();
        state.captures.push((platform_id.clone(), scope));
        let pos_ref = state.by_platform.get(&platform_id).cloned();
        if let Some(pos_ref) = pos_ref {
            if let Some(link) = state.orders.get_mut(&pos_ref) {
                link.payment_captured = true;
            }
        }
        Ok(())
    }

    async fn ready_to_pay(&self, transaction: &Transaction) -> AdapterResult<Option<Order>> {
        let state = self.state();
        Ok(transaction
            .order_id
            .as_deref()
            .and_then(|order_id| state.payable.get(order_id))
            .cloned())
    }

    async fn record_transaction_version(
        &self,
        transaction_id: &str,
        version: &str,
    ) -> AdapterResult<()> {
        self.state()
            .tx_versions
            .insert(transaction_id.to_string(), version.to_string());
        Ok(())
    }

    async fn record_payment(&self, transaction: &Transaction) -> AdapterResult<()> {
        self.state().payments.push(transaction.id.clone());
        Ok(())
    }

    async fn cancel_payment(&self, transaction: &Transaction) -> AdapterResult<()> {
        self.state().cancelled_payments.push(transaction.id.clone());
        Ok(())
    }

    async fn upsert_member(&self, member: &Member) -> AdapterResult<()> {
        self.state()
            .members
            .insert(member.id.clone(), member.clone());
        Ok(())
    }

    async fn delete_member(&self, member_id: &str) -> AdapterResult<()> {
        self.state().members.remove(member_id);
        Ok(())
    }

    async fn checked_in(&self) -> AdapterResult<Vec<String>> {
        Ok(self.state().checkins.keys().cloned().collect())
    }

    async fn record_platform_checkin(&self, checkin: &Checkin) -> AdapterResult<()> {
        self.state()
            .checkins
            .insert(checkin.id.clone(), checkin.clone());
        Ok(())
    }

    async fn checkin_closed(&self, checkin_id: &str) -> AdapterResult<()> {
        let mut state = self.state();
        state.checkins.remove(checkin_id);
        state.closed_checkins.push(checkin_id.to_string());
        Ok(())
    }

    async fn disassociate_all(&self) -> AdapterResult<()> {
        self.state().disassociated = true;
        Ok(())
    }
}

// ==================== Mock reservation / reward capabilities ====================

#[derive(Default)]
pub struct MockReservations {
    pub bookings: Mutex<HashMap<String, Booking>>,
    pub links: Mutex<Vec<(String, String)>>,
}

impl MockReservations {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl ReservationCapability for MockReservations {
    async fn upsert_booking(&self, booking: &Booking) -> AdapterResult<()> {
        self.bookings
            .lock()
            .unwrap()
            .insert(booking.id.clone(), booking.clone());
        Ok(())
    }

    async fn delete_booking(&self, booking_id: &str) -> AdapterResult<()> {
        self.bookings.lock().unwrap().remove(booking_id);
        Ok(())
    }

    async fn record_booking_checkin(
        &self,
        booking_id: &str,
        checkin_id: &str,
    ) -> AdapterResult<()> {
        self.links
            .lock()
            .unwrap()
            .push((booking_id.to_string(), checkin_id.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockRewards {
    pub applied: Mutex<Vec<(String, String)>>,
}

impl MockRewards {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl RewardCapability for MockRewards {
    async fn apply_redemption(&self, pos_ref: &str, reward: &Reward) -> AdapterResult<()> {
        self.applied
            .lock()
            .unwrap()
            .push((pos_ref.to_string(), reward.id.clone()));
        Ok(())
    }
}

// ==================== Mock platform gateway ====================

#[derive(Default)]
pub struct GatewayState {
    pub orders: HashMap<String, Order>,
    pub unlinked: HashSet<String>,
    pub unlinked_transactions: HashMap<String, Vec<Transaction>>,
    pub transactions: HashMap<String, Transaction>,
    pub checkins: HashMap<String, Checkin>,
    pub bookings: HashMap<String, Booking>,
    pub tables: HashMap<String, Table>,
    pub members: HashMap<String, Member>,
    pub rewards: HashMap<String, Vec<Reward>>,
    pub redeemed: Vec<String>,
    /// Every gateway call, in order — lets tests assert "no seating call
    /// went out" and "no retry happened"
    pub calls: Vec<String>,
    version_counter: u64,

    // === programmable faults ===
    /// Status to fail `update_transaction` with, keyed by transaction id
    pub transaction_faults: HashMap<String, u16>,
    /// Status the platform answers a reject push with (default:
    /// complete, the confirmation)
    pub reject_answer: Option<TransactionStatus>,
    /// Simulate an empty 2xx body on `update_checkin`
    pub empty_checkin_response: bool,
}

impl GatewayState {
    fn next_version(&mut self) -> String {
        self.version_counter += 1;
        format!("v{}", self.version_counter + 1)
    }
}

#[derive(Default)]
pub struct MockGateway {
    state: Mutex<GatewayState>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, GatewayState> {
        self.state.lock().unwrap()
    }

    pub fn seed_order(&self, order: Order) {
        let id = order.id.clone().expect("seeded order needs an id");
        self.state().orders.insert(id, order);
    }

    pub fn seed_unlinked_order(&self, order: Order, transactions: Vec<Transaction>) {
        let id = order.id.clone().expect("seeded order needs an id");
        let mut state = self.state();
        state.unlinked.insert(id.clone());
        state.unlinked_transactions.insert(id.clone(), transactions);
        state.orders.insert(id, order);
    }

    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl PlatformGateway for MockGateway {
    async fn get_order(&self, order_id: &str) -> GatewayResult<Order> {
        let mut state = self.state();
        state.calls.push(format!("get_order:{order_id}"));
        state
            .orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("order {order_id}")))
    }

    async fn create_order(&self, order: &Order) -> GatewayResult<Order> {
        let mut state = self.state();
        state.calls.push("create_order".into());
        let id = order
            .id
            .clone()
            .unwrap_or_else(|| format!("ord-{}", state.orders.len() + 1));
        let mut created = order.clone();
        created.id = Some(id.clone());
        created.version = Some(state.next_version());
        state.orders.insert(id, created.clone());
        Ok(created)
    }

    async fn update_order(&self, order: &Order) -> GatewayResult<Order> {
        let mut state = self.state();
        let id = order
            .id
            .clone()
            .ok_or_else(|| GatewayError::NotFound("order has no platform id".into()))?;
        state.calls.push(format!("update_order:{id}"));

        let stored = state
            .orders
            .get(&id)
            .ok_or_else(|| GatewayError::NotFound(format!("order {id}")))?;
        if stored.version != order.version {
            return Err(GatewayError::Conflict(format!(
                "order {id}: version {:?} is stale (current {:?})",
                order.version, stored.version
            )));
        }

        let mut updated = order.clone();
        updated.version = Some(state.next_version());
        state.orders.insert(id, updated.clone());
        Ok(updated)
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> GatewayResult<Vec<Order>> {
        let mut state = self.state();
        state.calls.push("list_orders".into());
        Ok(state
            .orders
            .values()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect())
    }

    async fn list_unlinked_orders(&self) -> GatewayResult<Vec<Order>> {
        let mut state = self.state();
        state.calls.push("list_unlinked_orders".into());
        let unlinked = state.unlinked.clone();
        Ok(state
            .orders
            .values()
            .filter(|o| o.id.as_ref().is_some_and(|id| unlinked.contains(id)))
            .cloned()
            .collect())
    }

    async fn submit_order_result(
        &self,
        order_id: &str,
        decision: OrderDecision,
        version: Option<&str>,
    ) -> GatewayResult<Order> {
        let mut state = self.state();
        state
            .calls
            .push(format!("submit_order_result:{order_id}:{decision:?}"));

        let stored = state
            .orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("order {order_id}")))?;
        if stored.version.as_deref() != version {
            return Err(GatewayError::Conflict(format!(
                "order {order_id}: result carried stale version {version:?}"
            )));
        }

        let mut updated = stored;
        updated.status = match decision {
            OrderDecision::Accepted => OrderStatus::Accepted,
            OrderDecision::Rejected => OrderStatus::Rejected,
        };
        updated.version = Some(state.next_version());
        state.unlinked.remove(order_id);
        state.orders.insert(order_id.to_string(), updated.clone());
        Ok(updated)
    }

    async fn get_transaction(&self, transaction_id: &str) -> GatewayResult<Transaction> {
        let mut state = self.state();
        state.calls.push(format!("get_transaction:{transaction_id}"));
        state
            .transactions
            .get(transaction_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("transaction {transaction_id}")))
    }

    async fn update_transaction(&self, transaction: &Transaction) -> GatewayResult<Transaction> {
        let mut state = self.state();
        state
            .calls
            .push(format!("update_transaction:{}", transaction.id));

        if let Some(status) = state.transaction_faults.get(&transaction.id).copied() {
            return Err(GatewayError::from_status(status, "injected fault"));
        }

        let mut returned = transaction.clone();
        if transaction.status == TransactionStatus::Rejected {
            // The platform confirms a reject by answering `complete`
            returned.status = state.reject_answer.unwrap_or(TransactionStatus::Complete);
        }
        returned.version = Some(state.next_version());
        state
            .transactions
            .insert(returned.id.clone(), returned.clone());
        Ok(returned)
    }

    async fn transactions_for_unlinked_order(
        &self,
        order_id: &str,
    ) -> GatewayResult<Vec<Transaction>> {
        let mut state = self.state();
        state
            .calls
            .push(format!("transactions_for_unlinked_order:{order_id}"));
        // 404 folds to an empty list per the gateway contract
        Ok(state
            .unlinked_transactions
            .get(order_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_checkin(&self, checkin: &CheckinCreate) -> GatewayResult<Checkin> {
        let mut state = self.state();
        state.calls.push("create_checkin".into());
        let id = format!("chk-{}", state.checkins.len() + 1);
        let created = Checkin {
            id: id.clone(),
            table_names: checkin.table_names.clone(),
            covers: checkin.covers,
            consumer: checkin.consumer.clone(),
            completed: false,
            updated_at: Utc::now(),
        };
        state.checkins.insert(id, created.clone());
        Ok(created)
    }

    async fn update_checkin(
        &self,
        checkin_id: &str,
        checkin: &CheckinCreate,
    ) -> GatewayResult<Checkin> {
        let mut state = self.state();
        state.calls.push(format!("update_checkin:{checkin_id}"));

        if state.empty_checkin_response {
            return Err(GatewayError::EmptyResponse);
        }

        let stored = state
            .checkins
            .get_mut(checkin_id)
            .ok_or_else(|| GatewayError::NotFound(format!("checkin {checkin_id}")))?;
        stored.table_names = checkin.table_names.clone();
        stored.covers = checkin.covers;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn get_checkin(&self, checkin_id: &str) -> GatewayResult<Checkin> {
        let mut state = self.state();
        state.calls.push(format!("get_checkin:{checkin_id}"));
        state
            .checkins
            .get(checkin_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("checkin {checkin_id}")))
    }

    async fn list_checkins(&self) -> GatewayResult<Vec<Checkin>> {
        let mut state = self.state();
        state.calls.push("list_checkins".into());
        Ok(state.checkins.values().cloned().collect())
    }

    async fn close_checkin(&self, checkin_id: &str) -> GatewayResult<Checkin> {
        let mut state = self.state();
        state.calls.push(format!("close_checkin:{checkin_id}"));
        let stored = state
            .checkins
            .get_mut(checkin_id)
            .ok_or_else(|| GatewayError::NotFound(format!("checkin {checkin_id}")))?;
        stored.completed = true;
        Ok(stored.clone())
    }

    async fn list_tables(&self) -> GatewayResult<Vec<Table>> {
        Ok(self.state().tables.values().cloned().collect())
    }

    async fn get_table(&self, name: &str) -> GatewayResult<Table> {
        self.state()
            .tables
            .get(name)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("table {name}")))
    }

    async fn create_table(&self, table: &Table) -> GatewayResult<Table> {
        self.state()
            .tables
            .insert(table.name.clone(), table.clone());
        Ok(table.clone())
    }

    async fn update_table(&self, table: &Table) -> GatewayResult<Table> {
        self.state()
            .tables
            .insert(table.name.clone(), table.clone());
        Ok(table.clone())
    }

    async fn delete_table(&self, name: &str) -> GatewayResult<()> {
        self.state().tables.remove(name);
        Ok(())
    }

    async fn get_booking(&self, booking_id: &str) -> GatewayResult<Booking> {
        let mut state = self.state();
        state.calls.push(format!("get_booking:{booking_id}"));
        state
            .bookings
            .get(booking_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("booking {booking_id}")))
    }

    async fn seat_booking(
        &self,
        booking_id: &str,
        checkin: &CheckinCreate,
    ) -> GatewayResult<Checkin> {
        let mut state = self.state();
        state.calls.push(format!("seat_booking:{booking_id}"));

        let id = format!("chk-{}", state.checkins.len() + 1);
        let seated = Checkin {
            id: id.clone(),
            table_names: checkin.table_names.clone(),
            covers: checkin.covers,
            consumer: checkin.consumer.clone(),
            completed: false,
            updated_at: Utc::now(),
        };
        state.checkins.insert(id.clone(), seated.clone());
        if let Some(booking) = state.bookings.get_mut(booking_id) {
            booking.checkin_id = Some(id);
        }
        Ok(seated)
    }

    async fn get_member(&self, member_id: &str) -> GatewayResult<Member> {
        self.state()
            .members
            .get(member_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("member {member_id}")))
    }

    async fn create_member(&self, member: &Member) -> GatewayResult<Member> {
        self.state()
            .members
            .insert(member.id.clone(), member.clone());
        Ok(member.clone())
    }

    async fn update_member(&self, member: &Member) -> GatewayResult<Member> {
        self.state()
            .members
            .insert(member.id.clone(), member.clone());
        Ok(member.clone())
    }

    async fn delete_member(&self, member_id: &str) -> GatewayResult<()> {
        self.state().members.remove(member_id);
        Ok(())
    }

    async fn list_rewards(&self, member_id: &str) -> GatewayResult<Vec<Reward>> {
        Ok(self
            .state()
            .rewards
            .get(member_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn redeem_reward(&self, member_id: &str, reward_id: &str) -> GatewayResult<()> {
        let mut state = self.state();
        state
            .calls
            .push(format!("redeem_reward:{member_id}:{reward_id}"));
        state.redeemed.push(reward_id.to_string());
        Ok(())
    }
}

// ==================== Context builder ====================

pub fn context(
    pos: &Arc<MockPos>,
    gateway: &Arc<MockGateway>,
    mode: CaptureMode,
) -> BridgeContext {
    BridgeContext::new(pos.clone(), gateway.clone(), mode, "venue-1")
}
