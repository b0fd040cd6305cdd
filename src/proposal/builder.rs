//! C3 — Proposal Builder: emits a symmetric multi-level [`Proposal`] from spreads and
//! levels, or a fully overridden one from an order-override table.

use crate::config::StrategyConfig;
use crate::types::{OrderOverride, PriceSize, Proposal, Side};
use rust_decimal::Decimal;

pub struct ProposalBuilder<'a> {
    config: &'a StrategyConfig,
}

impl<'a> ProposalBuilder<'a> {
    pub fn new(config: &'a StrategyConfig) -> Self {
        Self { config }
    }

    /// Builds the initial proposal. `bid_reference` and `ask_reference` are normally the
    /// same price; when inventory-cost pricing is active the caller passes
    /// `ask_reference = max(inventory_cost, reference)`.
    pub fn build(&self, bid_reference: Decimal, ask_reference: Decimal) -> Proposal {
        if !self.config.order_override.is_empty() {
            return self.build_from_overrides(bid_reference, ask_reference);
        }
        self.build_symmetric(bid_reference, ask_reference)
    }

    fn build_symmetric(&self, bid_reference: Decimal, ask_reference: Decimal) -> Proposal {
        let mut buys = Vec::with_capacity(self.config.order_levels as usize);
        let mut sells = Vec::with_capacity(self.config.order_levels as usize);

        for i in 0..self.config.order_levels {
            let i_dec = Decimal::from(i);

            let bid_spread =
                self.config.bid_spread + i_dec * self.config.order_level_spread;
            let buy_price = bid_reference * (Decimal::ONE - bid_spread);
            let buy_size = self.config.order_amount + i_dec * self.config.order_level_amount;
            buys.push(PriceSize::new(buy_price, buy_size));

            let ask_spread =
                self.config.ask_spread + i_dec * self.config.order_level_spread;
            let sell_price = ask_reference * (Decimal::ONE + ask_spread);
            let sell_size = self.config.order_amount + i_dec * self.config.order_level_amount;
            sells.push(PriceSize::new(sell_price, sell_size));
        }

        Proposal::new(buys, sells)
    }

    fn build_from_overrides(&self, bid_reference: Decimal, ask_reference: Decimal) -> Proposal {
        let mut levels: Vec<(&String, &OrderOverride)> =
            self.config.order_override.iter().collect();
        levels.sort_by(|a, b| a.0.cmp(b.0));

        let mut buys = Vec::new();
        let mut sells = Vec::new();
        let hundred = Decimal::new(100, 0);

        for (_, ov) in levels {
            let spread = ov.spread_pct / hundred;
            match ov.side {
                Side::Buy => {
                    let price = bid_reference * (Decimal::ONE - spread);
                    buys.push(PriceSize::new(price, ov.size));
                }
                Side::Sell => {
                    let price = ask_reference * (Decimal::ONE + spread);
                    sells.push(PriceSize::new(price, ov.size));
                }
            }
        }

        buys.sort_by(|a, b| b.price.cmp(&a.price));
        sells.sort_by(|a, b| a.price.cmp(&b.price));

        Proposal::new(buys, sells)
    }
}
