use super::money::{Price, TaxRate};
use super::product::Product;

/// One product entry in the cart.
///
/// `name` and `unit_price` are captured when the product is first added and
/// are never refreshed by later adds of the same code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub code: String,
    pub name: String,
    pub unit_price: Price,
    /// Always at least 1.
    pub quantity: u32,
}

impl LineItem {
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// Subtotal, tax and total derived from a cart at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckoutTotals {
    pub subtotal: Price,
    pub tax: Price,
    pub total: Price,
}

/// The ordered line items of one register session.
///
/// Holds at most one [`LineItem`] per product code, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `code`, merging into an existing line if present.
    pub fn add(&mut self, code: &str, name: &str, unit_price: Price) -> &LineItem {
        let index = match self.items.iter().position(|item| item.code == code) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
                index
            }
            None => {
                self.items.push(LineItem {
                    code: code.to_string(),
                    name: name.to_string(),
                    unit_price,
                    quantity: 1,
                });
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    pub fn add_product(&mut self, product: &Product) -> &LineItem {
        self.add(
            &product.product_code,
            &product.product_name,
            product.product_price,
        )
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, code: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.code == code)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn tax(subtotal: Price) -> Price {
        TaxRate::STANDARD.apply(subtotal)
    }

    pub fn total(&self) -> Price {
        let subtotal = self.subtotal();
        subtotal + Self::tax(subtotal)
    }

    pub fn totals(&self) -> CheckoutTotals {
        let subtotal = self.subtotal();
        let tax = Self::tax(subtotal);
        CheckoutTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
