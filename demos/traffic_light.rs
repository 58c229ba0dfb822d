//! Traffic Light State Machine
//!
//! A cyclic machine driven by a single `tick` signal. The light itself
//! carries its state; the machine only knows the graph.
//!
//! Run with: cargo run --example traffic_light

use waypoint::builder::{signal_transition, MachineBuilder};
use waypoint::core::Context;
use waypoint::state_enum;

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
    initial: [Red]
}

struct Light {
    id: String,
    state: String,
}

impl Context for Light {
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

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let machine = MachineBuilder::new()
        .name("traffic_light")
        .strict(true)
        .transitions(vec![
            signal_transition(TrafficLight::Red, TrafficLight::Green, "tick"),
            signal_transition(TrafficLight::Green, TrafficLight::Yellow, "tick"),
            signal_transition(TrafficLight::Yellow, TrafficLight::Red, "tick"),
        ])
        .build()
        .unwrap();

    let mut north = Light {
        id: "north".to_string(),
        state: "Red".to_string(),
    };
    let mut east = Light {
        id: "east".to_string(),
        state: "Green".to_string(),
    };

    for _ in 0..4 {
        machine.signal(&mut north, "tick").unwrap();
        machine.signal(&mut east, "tick").unwrap();
        println!("north: {:<6} east: {}", north.state, east.state);
    }

    println!("\nUnknown signals are ignored:");
    machine.signal(&mut north, "flash").unwrap();
    println!("north after 'flash': {}", north.state);

    println!("\n=== Example Complete ===");
}
