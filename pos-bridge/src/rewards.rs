//! Reward redemption round-trip
//!
//! Redeeming updates the order on the platform (a discount adjustment,
//! version-checked) before the reward itself is claimed; only then is
//! the redemption applied to the POS.

use shared::models::{Adjustment, AdjustmentKind, Reward};

use crate::context::BridgeContext;
use crate::error::{BridgeError, BridgeResult};

pub struct RewardCoordinator {
    ctx: BridgeContext,
}

impl RewardCoordinator {
    pub fn new(ctx: BridgeContext) -> Self {
        Self { ctx }
    }

    /// Redeem a member reward against a POS order.
    pub async fn redeem(&self, pos_ref: &str, reward: &Reward) -> BridgeResult<()> {
        let rewards = self
            .ctx
            .rewards
            .as_ref()
            .ok_or_else(|| BridgeError::Precondition("POS provides no reward capability".into()))?;

        let link = self
            .ctx
            .adapter
            .order_by_pos_ref(pos_ref)
            .await?
            .ok_or_else(|| {
                BridgeError::Precondition(format!("POS order {pos_ref} does not exist"))
            })?;
        let platform_id = link.platform_id.as_deref().ok_or_else(|| {
            BridgeError::Precondition(format!("POS order {pos_ref} never round-tripped"))
        })?;

        // The order update goes out first; a conflict here refuses the
        // redemption before the reward is consumed
        let mut order = self.ctx.gateway.get_order(platform_id).await?;
        order.adjustments.push(Adjustment {
            name: reward.name.clone(),
            kind: AdjustmentKind::Discount,
            amount: -reward.amount,
        });
        if let Some(v) = self.ctx.adapter.recorded_version(pos_ref).await? {
            order.version = Some(v);
        }
        let returned = self.ctx.gateway.update_order(&order).await?;
        if let Some(v) = returned.version.as_deref() {
            self.ctx.adapter.record_version(pos_ref, v).await?;
        }

        self.ctx
            .gateway
            .redeem_reward(&reward.member_id, &reward.id)
            .await?;
        rewards.apply_redemption(pos_ref, reward).await?;

        tracing::info!(pos_ref, reward_id = %reward.id, "reward redeemed");
        Ok(())
    }
}
