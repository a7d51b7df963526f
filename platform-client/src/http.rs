//! HTTP implementation of the platform gateway
//!
//! Thin typed wrapper over `reqwest`: every call sends the venue-scoped
//! request with the bearer token, maps any non-2xx answer to a
//! [`GatewayError`] via the numeric status, and decodes the body into
//! the shared entity type.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Booking, Checkin, CheckinCreate, Member, Order, OrderStatus, Reward, Table, Transaction};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{OrderDecision, PlatformGateway};

/// Default request timeout
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Typed HTTP client for the ordering platform
pub struct HttpGateway {
    client: Client,
    base_url: String,
    venue: String,
    token: String,
}

impl HttpGateway {
    pub fn new(
        base_url: impl Into<String>,
        venue: impl Into<String>,
        token: impl Into<String>,
    ) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            venue: venue.into(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/venues/{}/{}", self.base_url, self.venue, path)
    }

    /// Send a request and decode the answer, or raise the typed fault.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> GatewayResult<T> {
        let url = self.url(path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(%method, %url, status = status.as_u16(), "platform call failed");
            return Err(GatewayError::from_status(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        self.send(Method::GET, path, None::<&()>).await
    }

    /// Send a request whose success answer carries no entity.
    async fn send_empty(&self, method: Method, path: &str) -> GatewayResult<()> {
        let url = self.url(path);
        let response = self
            .client
            .request(method, &url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::from_status(status.as_u16(), text));
        }
        Ok(())
    }
}

/// Body for the order create-result endpoint.
#[derive(Serialize)]
struct OrderResultBody<'a> {
    decision: OrderDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
}

#[async_trait]
impl PlatformGateway for HttpGateway {
    async fn get_order(&self, order_id: &str) -> GatewayResult<Order> {
        self.get_json(&format!("orders/{order_id}")).await
    }

    async fn create_order(&self, order: &Order) -> GatewayResult<Order> {
        self.send(Method::POST, "orders", Some(order)).await
    }

    async fn update_order(&self, order: &Order) -> GatewayResult<Order> {
        let id = order
            .id
            .as_deref()
            .ok_or_else(|| GatewayError::NotFound("order has no platform id".into()))?;
        self.send(Method::PUT, &format!("orders/{id}"), Some(order))
            .await
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> GatewayResult<Vec<Order>> {
        let path = match status {
            Some(status) => {
                // Status filter uses the wire spelling
                let s = serde_json::to_string(&status)?;
                format!("orders?status={}", s.trim_matches('"'))
            }
            None => "orders".to_string(),
        };
        self.get_json(&path).await
    }

    async fn list_unlinked_orders(&self) -> GatewayResult<Vec<Order>> {
        self.get_json("orders/unlinked").await
    }

    async fn submit_order_result(
        &self,
        order_id: &str,
        decision: OrderDecision,
        version: Option<&str>,
    ) -> GatewayResult<Order> {
        tracing::info!(order_id, ?decision, "submitting order result");
        self.send(
            Method::POST,
            &format!("orders/{order_id}/result"),
            Some(&OrderResultBody { decision, version }),
        )
        .await
    }

    async fn get_transaction(&self, transaction_id: &str) -> GatewayResult<Transaction> {
        self.get_json(&format!("transactions/{transaction_id}")).await
    }

    async fn update_transaction(&self, transaction: &Transaction) -> GatewayResult<Transaction> {
        self.send(
            Method::PUT,
            &format!("transactions/{}", transaction.id),
            Some(transaction),
        )
        .await
    }

    async fn transactions_for_unlinked_order(
        &self,
        order_id: &str,
    ) -> GatewayResult<Vec<Transaction>> {
        // 404 here means "no transactions yet", not a missing resource
        match self
            .get_json(&format!("orders/unlinked/{order_id}/transactions"))
            .await
        {
            Ok(transactions) => Ok(transactions),
            Err(GatewayError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn create_checkin(&self, checkin: &CheckinCreate) -> GatewayResult<Checkin> {
        self.send(Method::POST, "checkins", Some(checkin)).await
    }

    async fn update_checkin(
        &self,
        checkin_id: &str,
        checkin: &CheckinCreate,
    ) -> GatewayResult<Checkin> {
        self.send(Method::PUT, &format!("checkins/{checkin_id}"), Some(checkin))
            .await
    }

    async fn get_checkin(&self, checkin_id: &str) -> GatewayResult<Checkin> {
        self.get_json(&format!("checkins/{checkin_id}")).await
    }

    async fn list_checkins(&self) -> GatewayResult<Vec<Checkin>> {
        self.get_json("checkins").await
    }

    async fn close_checkin(&self, checkin_id: &str) -> GatewayResult<Checkin> {
        self.send(
            Method::DELETE,
            &format!("checkins/{checkin_id}"),
            None::<&()>,
        )
        .await
    }

    async fn list_tables(&self) -> GatewayResult<Vec<Table>> {
        self.get_json("tables").await
    }

    async fn get_table(&self, name: &str) -> GatewayResult<Table> {
        self.get_json(&format!("tables/{name}")).await
    }

    async fn create_table(&self, table: &Table) -> GatewayResult<Table> {
        self.send(Method::POST, "tables", Some(table)).await
    }

    async fn update_table(&self, table: &Table) -> GatewayResult<Table> {
        self.send(Method::PUT, &format!("tables/{}", table.name), Some(table))
            .await
    }

    async fn delete_table(&self, name: &str) -> GatewayResult<()> {
        self.send_empty(Method::DELETE, &format!("tables/{name}")).await
    }

    async fn get_booking(&self, booking_id: &str) -> GatewayResult<Booking> {
        self.get_json(&format!("bookings/{booking_id}")).await
    }

    async fn seat_booking(
        &self,
        booking_id: &str,
        checkin: &CheckinCreate,
    ) -> GatewayResult<Checkin> {
        tracing::info!(booking_id, "seating booking");
        self.send(
            Method::POST,
            &format!("bookings/{booking_id}/seat"),
            Some(checkin),
        )
        .await
    }

    async fn get_member(&self, member_id: &str) -> GatewayResult<Member> {
        self.get_json(&format!("members/{member_id}")).await
    }

    async fn create_member(&self, member: &Member) -> GatewayResult<Member> {
        self.send(Method::POST, "members", Some(member)).await
    }

    async fn update_member(&self, member: &Member) -> GatewayResult<Member> {
        self.send(Method::PUT, &format!("members/{}", member.id), Some(member))
            .await
    }

    async fn delete_member(&self, member_id: &str) -> GatewayResult<()> {
        self.send_empty(Method::DELETE, &format!("members/{member_id}"))
            .await
    }

    async fn list_rewards(&self, member_id: &str) -> GatewayResult<Vec<Reward>> {
        self.get_json(&format!("members/{member_id}/rewards")).await
    }

    async fn redeem_reward(&self, member_id: &str, reward_id: &str) -> GatewayResult<()> {
        self.send_empty(
            Method::POST,
            &format!("members/{member_id}/rewards/{reward_id}/redeem"),
        )
        .await
    }
}
