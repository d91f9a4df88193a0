use core::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::Serialize;

use fastchow_catalog::Product;
use fastchow_core::{Aggregate, AggregateRoot, ProductId, SessionId, Xlm};
use fastchow_events::{Event, execute};

/// Cart line: a catalog product and how many of it.
///
/// `quantity` is always ≥ 1; a line that would drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub product: &'static Product,
    pub quantity: u64,
}

impl CartItem {
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// `price × quantity` for this line.
    pub fn line_total(&self) -> Xlm {
        self.product.line_total(self.quantity)
    }
}

/// Aggregate root: Cart (one per session).
///
/// Lines keep insertion order and are unique by product id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: SessionId,
    items: Vec<CartItem>,
    version: u64,
}

impl Cart {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            items: Vec::new(),
            version: 0,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, product_id: &str) -> Option<u64> {
        self.line(product_id).map(|item| item.quantity)
    }

    /// Σ price × quantity. Zero for an empty cart.
    pub fn total_price(&self) -> Xlm {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ quantity (the badge count), not the number of distinct products.
    pub fn total_items(&self) -> u128 {
        self.items.iter().map(|item| u128::from(item.quantity)).sum()
    }

    /// Add `quantity` of `product`, merging with an existing line.
    ///
    /// A zero quantity changes nothing.
    pub fn add_item(&mut self, product: &'static Product, quantity: u64) -> Vec<CartEvent> {
        self.run(CartCommand::AddItem(AddItem {
            product,
            quantity,
            occurred_at: Utc::now(),
        }))
    }

    /// Replace a line's quantity; `quantity <= 0` removes the line. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Vec<CartEvent> {
        self.run(CartCommand::UpdateQuantity(UpdateQuantity {
            product_id: product_id.to_string(),
            quantity,
            occurred_at: Utc::now(),
        }))
    }

    /// Remove a line if present.
    pub fn remove_item(&mut self, product_id: &str) -> Vec<CartEvent> {
        self.run(CartCommand::RemoveItem(RemoveItem {
            product_id: product_id.to_string(),
            occurred_at: Utc::now(),
        }))
    }

    pub fn clear(&mut self) -> Vec<CartEvent> {
        self.run(CartCommand::ClearCart(ClearCart {
            occurred_at: Utc::now(),
        }))
    }

    /// Decide + apply a command. Cart commands cannot fail.
    pub fn run(&mut self, command: CartCommand) -> Vec<CartEvent> {
        match execute(self, &command) {
            Ok(events) => events,
            Err(never) => match never {},
        }
    }

    fn line(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.product.id == product_id)
    }
}

impl AggregateRoot for Cart {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    pub product: &'static Product,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateQuantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQuantity {
    pub product_id: String,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveItem {
    pub product_id: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearCart {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    AddItem(AddItem),
    UpdateQuantity(UpdateQuantity),
    RemoveItem(RemoveItem),
    ClearCart(ClearCart),
}

/// Event: ItemAdded (a new line was appended).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemAdded {
    pub product: &'static Product,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityChanged (an existing line now has `quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityChanged {
    pub product_id: ProductId,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRemoved {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartCleared {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    QuantityChanged(QuantityChanged),
    ItemRemoved(ItemRemoved),
    CartCleared(CartCleared),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item.added",
            CartEvent::QuantityChanged(_) => "cart.item.quantity_changed",
            CartEvent::ItemRemoved(_) => "cart.item.removed",
            CartEvent::CartCleared(_) => "cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::QuantityChanged(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::CartCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = Infallible;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => match self.line_mut(e.product.id) {
                Some(item) => item.quantity = item.quantity.saturating_add(e.quantity),
                None => self.items.push(CartItem {
                    product: e.product,
                    quantity: e.quantity,
                }),
            },
            CartEvent::QuantityChanged(e) => {
                if let Some(item) = self.line_mut(e.product_id) {
                    item.quantity = e.quantity;
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.items.retain(|item| item.product.id != e.product_id);
            }
            CartEvent::CartCleared(_) => {
                self.items.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        Ok(match command {
            CartCommand::AddItem(cmd) => self.handle_add(cmd),
            CartCommand::UpdateQuantity(cmd) => self.handle_update(cmd),
            CartCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            CartCommand::ClearCart(cmd) => self.handle_clear(cmd),
        })
    }
}

impl Cart {
    fn handle_add(&self, cmd: &AddItem) -> Vec<CartEvent> {
        if cmd.quantity == 0 {
            return vec![];
        }

        match self.line(cmd.product.id.as_str()) {
            Some(item) => {
                let quantity = item.quantity.saturating_add(cmd.quantity);
                if quantity == item.quantity {
                    return vec![];
                }
                vec![CartEvent::QuantityChanged(QuantityChanged {
                    product_id: item.product.id,
                    quantity,
                    occurred_at: cmd.occurred_at,
                })]
            }
            None => vec![CartEvent::ItemAdded(ItemAdded {
                product: cmd.product,
                quantity: cmd.quantity,
                occurred_at: cmd.occurred_at,
            })],
        }
    }

    fn handle_update(&self, cmd: &UpdateQuantity) -> Vec<CartEvent> {
        let Some(item) = self.line(&cmd.product_id) else {
            return vec![];
        };

        if cmd.quantity <= 0 {
            return vec![CartEvent::ItemRemoved(ItemRemoved {
                product_id: item.product.id,
                occurred_at: cmd.occurred_at,
            })];
        }

        let quantity = cmd.quantity.unsigned_abs();
        if quantity == item.quantity {
            return vec![];
        }

        vec![CartEvent::QuantityChanged(QuantityChanged {
            product_id: item.product.id,
            quantity,
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Vec<CartEvent> {
        match self.line(&cmd.product_id) {
            Some(item) => vec![CartEvent::ItemRemoved(ItemRemoved {
                product_id: item.product.id,
                occurred_at: cmd.occurred_at,
            })],
            None => vec![],
        }
    }

    fn handle_clear(&self, cmd: &ClearCart) -> Vec<CartEvent> {
        if self.items.is_empty() {
            return vec![];
        }

        vec![CartEvent::CartCleared(CartCleared {
            occurred_at: cmd.occurred_at,
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastchow_catalog::Catalog;

    fn product(id: &str) -> &'static Product {
        Catalog::standard().find(id).unwrap()
    }

    fn empty_cart() -> Cart {
        Cart::new(SessionId::new())
    }

    #[test]
    fn add_item_appends_new_line() {
        let mut cart = empty_cart();
        let events = cart.add_item(product("budget-a"), 1);

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], CartEvent::ItemAdded(_)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("budget-a"), Some(1));
    }

    #[test]
    fn repeated_adds_sum_quantities() {
        let mut cart = empty_cart();
        cart.add_item(product("budget-a"), 1);
        let events = cart.add_item(product("budget-a"), 2);

        match &events[0] {
            CartEvent::QuantityChanged(e) => assert_eq!(e.quantity, 3),
            _ => panic!("Expected QuantityChanged event"),
        }
        assert_eq!(cart.quantity_of("budget-a"), Some(3));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn add_zero_is_a_no_op() {
        let mut cart = empty_cart();
        assert!(cart.add_item(product("budget-a"), 0).is_empty());
        assert!(cart.is_empty());
        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = empty_cart();
        cart.add_item(product("bulk-g"), 1);
        cart.add_item(product("budget-a"), 1);
        cart.add_item(product("bulk-g"), 1);

        let ids: Vec<_> = cart.items().iter().map(|i| i.product_id().as_str()).collect();
        assert_eq!(ids, vec!["bulk-g", "budget-a"]);
    }

    #[test]
    fn update_quantity_replaces_quantity() {
        let mut cart = empty_cart();
        cart.add_item(product("middle-d"), 4);
        cart.update_quantity("middle-d", 2);
        assert_eq!(cart.quantity_of("middle-d"), Some(2));
    }

    #[test]
    fn update_to_zero_or_negative_removes_line() {
        let mut cart = empty_cart();
        cart.add_item(product("middle-d"), 4);
        cart.add_item(product("middle-e"), 1);

        cart.update_quantity("middle-d", 0);
        assert_eq!(cart.quantity_of("middle-d"), None);

        let events = cart.update_quantity("middle-e", -5);
        assert!(matches!(events[0], CartEvent::ItemRemoved(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn update_unknown_id_neither_inserts_nor_fails() {
        let mut cart = empty_cart();
        cart.add_item(product("budget-a"), 1);
        let before = cart.clone();

        assert!(cart.update_quantity("budget-b", 5).is_empty());
        assert!(cart.update_quantity("no-such-product", 5).is_empty());
        assert_eq!(cart, before);
    }

    #[test]
    fn update_to_same_quantity_emits_nothing() {
        let mut cart = empty_cart();
        cart.add_item(product("budget-a"), 2);
        assert!(cart.update_quantity("budget-a", 2).is_empty());
    }

    #[test]
    fn remove_absent_id_is_idempotent() {
        let mut cart = empty_cart();
        cart.add_item(product("budget-a"), 1);

        cart.remove_item("budget-a");
        let once = cart.clone();
        assert!(cart.remove_item("budget-a").is_empty());
        assert_eq!(cart, once);
    }

    #[test]
    fn totals_follow_lines() {
        let mut cart = empty_cart();
        assert_eq!(cart.total_price(), Xlm::ZERO);
        assert_eq!(cart.total_items(), 0);

        cart.add_item(product("budget-a"), 2);
        cart.add_item(product("middle-f"), 1);

        assert_eq!(cart.total_price(), Xlm::from_xlm(950));
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = empty_cart();
        cart.add_item(product("bulk-i"), 1);
        cart.add_item(product("bulk-h"), 1);

        let events = cart.clear();
        assert!(matches!(events[0], CartEvent::CartCleared(_)));
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Xlm::ZERO);

        assert!(cart.clear().is_empty());
    }

    #[test]
    fn add_update_remove_scenario() {
        let mut cart = empty_cart();
        let budget_a = product("budget-a");

        cart.add_item(budget_a, 2);
        assert_eq!(cart.total_price(), Xlm::from_xlm(200));

        cart.add_item(budget_a, 1);
        assert_eq!(cart.quantity_of("budget-a"), Some(3));
        assert_eq!(cart.total_price(), Xlm::from_xlm(300));

        cart.update_quantity("budget-a", -1);
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Xlm::ZERO);
    }

    #[test]
    fn large_quantities_total_exactly() {
        let mut cart = empty_cart();
        cart.add_item(product("bulk-i"), 2_000_000_000);
        assert_eq!(cart.total_price(), Xlm::from_xlm(30_000_000_000_000));
        assert_eq!(cart.total_price().stroops(), 300_000_000_000_000_000_000);

        cart.add_item(product("bulk-h"), u64::MAX);
        assert_eq!(
            cart.total_price().stroops(),
            300_000_000_000_000_000_000 + 80_000_000_000 * u128::from(u64::MAX)
        );
        assert_eq!(cart.total_items(), 2_000_000_000 + u128::from(u64::MAX));
    }

    #[test]
    fn line_quantity_stops_at_u64_max() {
        let mut cart = empty_cart();
        cart.add_item(product("bulk-i"), u64::MAX);
        assert!(cart.add_item(product("bulk-i"), 1).is_empty());
        assert_eq!(cart.quantity_of("bulk-i"), Some(u64::MAX));
        assert_eq!(
            cart.total_price().stroops(),
            150_000_000_000 * u128::from(u64::MAX)
        );
    }

    #[test]
    fn version_counts_applied_events() {
        let mut cart = empty_cart();
        cart.add_item(product("budget-a"), 1);
        cart.add_item(product("budget-a"), 1);
        cart.remove_item("missing");
        cart.update_quantity("budget-a", 0);
        assert_eq!(cart.version(), 3);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut cart = empty_cart();
        cart.add_item(product("budget-a"), 1);
        let before = cart.clone();

        let cmd = CartCommand::RemoveItem(RemoveItem {
            product_id: "budget-a".to_string(),
            occurred_at: Utc::now(),
        });
        let first = cart.handle(&cmd).unwrap();
        let second = cart.handle(&cmd).unwrap();

        assert_eq!(cart, before);
        assert_eq!(first, second);
    }

    #[test]
    fn event_types_are_stable() {
        let mut cart = empty_cart();
        let added = cart.add_item(product("budget-a"), 1);
        let changed = cart.add_item(product("budget-a"), 1);
        let removed = cart.remove_item("budget-a");
        cart.add_item(product("budget-a"), 1);
        let cleared = cart.clear();

        assert_eq!(added[0].event_type(), "cart.item.added");
        assert_eq!(changed[0].event_type(), "cart.item.quantity_changed");
        assert_eq!(removed[0].event_type(), "cart.item.removed");
        assert_eq!(cleared[0].event_type(), "cart.cleared");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use fastchow_catalog::PRODUCTS;
        use proptest::prelude::*;
        use std::collections::HashSet;

        #[derive(Debug, Clone)]
        enum Op {
            Add(usize, u64),
            Update(usize, i64),
            Remove(usize),
            UpdateUnknown(i64),
            Clear,
        }

        fn op() -> impl Strategy<Value = Op> {
            let idx = 0..PRODUCTS.len();
            prop_oneof![
                4 => (idx.clone(), 1u64..20).prop_map(|(i, q)| Op::Add(i, q)),
                3 => (idx.clone(), -3i64..20).prop_map(|(i, q)| Op::Update(i, q)),
                2 => idx.prop_map(Op::Remove),
                1 => (-3i64..20).prop_map(Op::UpdateUnknown),
                1 => Just(Op::Clear),
            ]
        }

        fn run(cart: &mut Cart, op: &Op) {
            match op {
                Op::Add(i, q) => {
                    cart.add_item(&PRODUCTS[*i], *q);
                }
                Op::Update(i, q) => {
                    cart.update_quantity(PRODUCTS[*i].id.as_str(), *q);
                }
                Op::Remove(i) => {
                    cart.remove_item(PRODUCTS[*i].id.as_str());
                }
                Op::UpdateUnknown(q) => {
                    cart.update_quantity("unknown-product", *q);
                }
                Op::Clear => {
                    cart.clear();
                }
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: no two lines share a product id, and every line has a positive quantity.
            #[test]
            fn lines_stay_unique_and_positive(ops in prop::collection::vec(op(), 0..60)) {
                let mut cart = Cart::new(SessionId::new());
                for op in &ops {
                    run(&mut cart, op);

                    let ids: HashSet<_> = cart.items().iter().map(|i| i.product_id()).collect();
                    prop_assert_eq!(ids.len(), cart.len());
                    prop_assert!(cart.items().iter().all(|i| i.quantity > 0));
                }
            }

            /// Property: totals always equal the sums over current lines.
            #[test]
            fn totals_match_lines(ops in prop::collection::vec(op(), 0..60)) {
                let mut cart = Cart::new(SessionId::new());
                for op in &ops {
                    run(&mut cart, op);
                }

                let expected_price: u128 = cart
                    .items()
                    .iter()
                    .map(|i| i.product.price.stroops() * u128::from(i.quantity))
                    .sum();
                let expected_items: u128 = cart.items().iter().map(|i| u128::from(i.quantity)).sum();

                prop_assert_eq!(cart.total_price().stroops(), expected_price);
                prop_assert_eq!(cart.total_items(), expected_items);
            }

            /// Property: adding the same product repeatedly sums the added quantities.
            #[test]
            fn repeated_adds_sum(idx in 0..PRODUCTS.len(), quantities in prop::collection::vec(1u64..1000, 1..20)) {
                let mut cart = Cart::new(SessionId::new());
                for q in &quantities {
                    cart.add_item(&PRODUCTS[idx], *q);
                }
                let expected: u64 = quantities.iter().sum();
                prop_assert_eq!(cart.quantity_of(PRODUCTS[idx].id.as_str()), Some(expected));
                prop_assert_eq!(cart.len(), 1);
            }

            /// Property: replaying emitted events onto a fresh cart reproduces the same state.
            #[test]
            fn replaying_events_reproduces_state(ops in prop::collection::vec(op(), 0..40)) {
                let session = SessionId::new();
                let mut source = Cart::new(session);
                let mut replayed = Cart::new(session);
                for op in &ops {
                    let events = match op {
                        Op::Add(i, q) => source.add_item(&PRODUCTS[*i], *q),
                        Op::Update(i, q) => source.update_quantity(PRODUCTS[*i].id.as_str(), *q),
                        Op::Remove(i) => source.remove_item(PRODUCTS[*i].id.as_str()),
                        Op::UpdateUnknown(q) => source.update_quantity("unknown-product", *q),
                        Op::Clear => source.clear(),
                    };
                    for event in &events {
                        replayed.apply(event);
                    }
                }

                prop_assert_eq!(replayed, source);
            }
        }
    }
}
