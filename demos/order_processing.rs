//! E-commerce Order Processing
//!
//! An order lifecycle where payment and shipping are gated by guards
//! resolved from a container, and a direct transition routes paid orders
//! onwards without a further signal.
//!
//! Key concepts:
//! - Guards looked up by name in a `Container`
//! - Direct transitions applied in a cascade
//! - Event listeners recording history
//!
//! Run with: cargo run --example order_processing

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use waypoint::builder::{MachineBuilder, TransitionBuilder};
use waypoint::core::{Context, State, Transition};
use waypoint::events::EventBus;
use waypoint::guard::{Container, PredicateGuard};
use waypoint::state_enum;

state_enum! {
    enum OrderState {
        Draft,
        Paid,
        Routing,
        AwaitingAddress,
        Shipped,
        Delivered,
    }
    initial: [Draft]
    direct: [Routing]
    final: [Delivered]
}

struct Order {
    id: String,
    state: String,
}

impl Context for Order {
    fn context_uid(&self) -> &str {
        &self.id
    }

    fn context_state(&self) -> &str {
        &self.state
    }

    fn set_context_state(&mut self, state: &str) {
        self.state = state.to_string();
    }
}

// Order details kept outside the machine, as a repository would.
#[derive(Default)]
struct Details {
    total: f64,
    address: Option<String>,
}

type Store = Arc<RwLock<HashMap<String, Details>>>;

fn store_guard<F>(store: &Store, check: F) -> PredicateGuard<OrderState>
where
    F: Fn(&Details) -> bool + Send + Sync + 'static,
{
    let store = Arc::clone(store);
    PredicateGuard::new(move |ctx: &dyn Context, _t: &Transition<OrderState>| {
        store
            .read()
            .map(|orders| orders.get(ctx.context_uid()).is_some_and(&check))
            .unwrap_or(false)
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Order Processing ===\n");

    let store: Store = Arc::new(RwLock::new(HashMap::new()));

    let mut container = Container::new();
    container
        .register_guard("can_pay", store_guard(&store, |d| d.total > 0.0))
        .register_guard("has_address", store_guard(&store, |d| d.address.is_some()))
        .register_guard("no_address", store_guard(&store, |d| d.address.is_none()));

    let events: EventBus<OrderState> = EventBus::new();
    events.subscribe(|event| {
        println!(
            "  [{}] {} -> {} ({})",
            event.context_uid,
            event.from.name(),
            event.to.name(),
            event.signal.as_deref().unwrap_or("direct")
        );
    });
    let history = events.record_history();

    let machine = MachineBuilder::new()
        .name("orders")
        .strict(true)
        .container(container)
        .event_factory(Arc::new(events))
        .transition(
            TransitionBuilder::new()
                .from(OrderState::Draft)
                .to(OrderState::Paid)
                .on("pay")
                .guard("can_pay"),
        )?
        .transition(
            TransitionBuilder::new()
                .from(OrderState::Paid)
                .to(OrderState::Routing)
                .direct(),
        )?
        .transition(
            TransitionBuilder::new()
                .from(OrderState::Routing)
                .to(OrderState::Shipped)
                .direct()
                .guard("has_address"),
        )?
        .transition(
            TransitionBuilder::new()
                .from(OrderState::Routing)
                .to(OrderState::AwaitingAddress)
                .direct()
                .guard("no_address"),
        )?
        .transition(
            TransitionBuilder::new()
                .from(OrderState::AwaitingAddress)
                .to(OrderState::Routing)
                .on("address_added"),
        )?
        .transition(
            TransitionBuilder::new()
                .from(OrderState::Shipped)
                .to(OrderState::Delivered)
                .on("deliver"),
        )?
        .build()?;

    let mut order = Order {
        id: "order-1001".to_string(),
        state: "Draft".to_string(),
    };

    println!("Empty order:");
    store
        .write()
        .map_err(|e| e.to_string())?
        .insert(order.id.clone(), Details::default());
    println!("  can pay? {}", machine.is_signal_allowed(&order, "pay")?);

    println!("\nPaying without a shipping address:");
    if let Some(details) = store.write().map_err(|e| e.to_string())?.get_mut(&order.id) {
        details.total = 99.99;
    }
    machine.signal(&mut order, "pay")?;

    println!("\nAdding the address:");
    if let Some(details) = store.write().map_err(|e| e.to_string())?.get_mut(&order.id) {
        details.address = Some("123 Main St".to_string());
    }
    machine.signal(&mut order, "address_added")?;

    println!("\nDelivering:");
    machine.signal(&mut order, "deliver")?;

    let history = history.lock().map_err(|e| e.to_string())?;
    let path: Vec<&str> = history.get_path().into_iter().map(OrderState::name).collect();
    println!("\nPath: {}", path.join(" -> "));
    println!("Final: {}", machine.current_state(&order)?.is_final());

    println!("\n=== Example Complete ===");
    Ok(())
}
