//! Order data model for receipt composition

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the customer receives the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Fulfillment {
    Delivery,
    Pickup,
}

impl Fulfillment {
    /// Printable label
    pub fn display(self) -> &'static str {
        match self {
            Fulfillment::Delivery => "外卖",
            Fulfillment::Pickup => "自取",
        }
    }
}

/// One order line item
///
/// Prices are decimal-exact; the subtotal is derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoodsLine {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl GoodsLine {
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// `price × quantity`, exact
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// The four goods-table cells: name, unit price, quantity, subtotal
    pub(crate) fn columns(&self) -> [String; 4] {
        [
            self.name.clone(),
            format!("{:.2}", self.price),
            self.quantity.to_string(),
            format!("{:.2}", self.subtotal()),
        ]
    }
}

/// Everything the acceptance receipt needs about one order
///
/// Built per call and immutable once built; nothing here is cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSnapshot {
    pub shop_name: String,
    pub fulfillment: Fulfillment,
    pub user_name: String,
    pub user_phone: String,
    pub pickup_place: String,
    /// Already formatted for printing (`YYYY-MM-DD HH:MM:SS`)
    pub confirm_time: String,
    pub goods: Vec<GoodsLine>,
    /// Display string, e.g. `"24.00元"`
    pub total_price: String,
    pub note: String,
    /// Order reference carried in the machine-readable trailer
    pub reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal_is_exact() {
        // 3 × 9.90 must be 29.70, not a float approximation
        let line = GoodsLine::new("糖醋排骨", Decimal::new(990, 2), 3);
        assert_eq!(line.subtotal(), Decimal::new(2970, 2));
    }

    #[test]
    fn test_columns_two_decimal_formatting() {
        let line = GoodsLine::new("米饭", Decimal::new(15, 1), 2);
        let cols = line.columns();
        assert_eq!(cols, ["米饭", "1.50", "2", "3.00"]);
    }

    #[test]
    fn test_fulfillment_display() {
        assert_eq!(Fulfillment::Delivery.display(), "外卖");
        assert_eq!(Fulfillment::Pickup.display(), "自取");
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let snapshot = OrderSnapshot {
            shop_name: "一食堂".to_string(),
            fulfillment: Fulfillment::Pickup,
            user_name: "张三".to_string(),
            user_phone: "13800000000".to_string(),
            pickup_place: "一楼窗口".to_string(),
            confirm_time: "2024-01-22 12:30:00".to_string(),
            goods: vec![GoodsLine::new("米饭", Decimal::new(150, 2), 1)],
            total_price: "1.50元".to_string(),
            note: "暂无备注".to_string(),
            reference: "ORDER-20240122-001".to_string(),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: OrderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
