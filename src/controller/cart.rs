//! Grand Exchange shopping cart.

use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub name: String,
    pub qty: u32,
    pub unit: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn add(&mut self, name: impl Into<String>, qty: u32, unit: i64) -> &CartItem {
        let qty = qty.max(1);
        self.items.push(CartItem {
            name: name.into(),
            qty,
            unit,
            total: unit.saturating_mul(i64::from(qty)),
        });
        &self.items[self.items.len() - 1]
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn grand_total(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.total)
            .fold(0, i64::saturating_add)
    }

    /// Plain-text receipt, one row per item followed by the grand total.
    pub fn receipt(&self) -> String {
        let name_width = self
            .items
            .iter()
            .map(|item| item.name.chars().count())
            .chain(std::iter::once("Item".len()))
            .max()
            .unwrap_or(4);

        let mut out = String::from("Grand Exchange Receipt\n\n");
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>6}  {:>12}  {:>14}",
            "Item", "Qty", "Unit", "Total"
        );
        for item in &self.items {
            let _ = writeln!(
                out,
                "{:<name_width$}  {:>6}  {:>12}  {:>14}",
                item.name, item.qty, item.unit, item.total
            );
        }
        let _ = write!(out, "\nGrand Total: {}", self.grand_total());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_multiply_unit_by_qty_and_sum() {
        let mut cart = Cart::default();
        cart.add("Feather", 100, 3);
        let item = cart.add("Rune bar", 0, 12_000);
        assert_eq!(item.qty, 1, "quantity floors at one");
        assert_eq!(cart.items()[0].total, 300);
        assert_eq!(cart.grand_total(), 12_300);
    }

    #[test]
    fn grand_total_saturates_instead_of_overflowing() {
        let mut cart = Cart::default();
        cart.add("Partyhat", 2, i64::MAX / 2 + 1);
        cart.add("Feather", 1, 1);
        assert_eq!(cart.items()[0].total, i64::MAX);
        assert_eq!(cart.grand_total(), i64::MAX);
        assert!(cart.receipt().ends_with(&format!("Grand Total: {}", i64::MAX)));
    }

    #[test]
    fn receipt_lists_items_and_grand_total() {
        let mut cart = Cart::default();
        cart.add("Yew logs", 27, 250);
        let receipt = cart.receipt();
        assert!(receipt.starts_with("Grand Exchange Receipt"));
        assert!(receipt.contains("Yew logs"));
        assert!(receipt.contains("6750"));
        assert!(receipt.ends_with("Grand Total: 6750"));
    }
}
