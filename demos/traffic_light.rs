//! Traffic Light
//!
//! A cyclic machine driven purely by auto-detect transitions: nothing ever
//! requests a state change explicitly. Each light counts frames in its
//! update callback, and the auto-detected edge to the next light fires once
//! the dwell time is up.
//!
//! Run with: cargo run --example traffic_light

use clockstep::state_key;
use clockstep::FsmBuilder;
use std::cell::Cell;
use std::rc::Rc;

state_key! {
    enum Light {
        Red,
        Green,
        Yellow,
    }
}

fn main() {
    println!("=== Traffic Light ===\n");

    let timer = Rc::new(Cell::new(0_u32));

    let tick_up = |timer: &Rc<Cell<u32>>| {
        let timer = Rc::clone(timer);
        move || timer.set(timer.get() + 1)
    };
    let reset = |timer: &Rc<Cell<u32>>, name: &'static str| {
        let timer = Rc::clone(timer);
        move |_: Option<Light>, _: Option<&()>| {
            timer.set(0);
            println!("  -> {name}");
        }
    };
    let elapsed = |timer: &Rc<Cell<u32>>, frames: u32| {
        let timer = Rc::clone(timer);
        move |_: Option<&()>| timer.get() >= frames
    };

    let fsm = FsmBuilder::<Light>::new()
        .state(Light::Red, |s| {
            s.add_enter(reset(&timer, "RED: stop"));
            s.add_update(tick_up(&timer));
        })
        .state(Light::Green, |s| {
            s.add_enter(reset(&timer, "GREEN: go"));
            s.add_update(tick_up(&timer));
        })
        .state(Light::Yellow, |s| {
            s.add_enter(reset(&timer, "YELLOW: caution"));
            s.add_update(tick_up(&timer));
        })
        .auto_edge(Light::Red, Light::Green, elapsed(&timer, 4))
        .auto_edge(Light::Green, Light::Yellow, elapsed(&timer, 3))
        .auto_edge(Light::Yellow, Light::Red, elapsed(&timer, 2))
        .initial(Light::Red)
        .build()
        .unwrap();

    println!("Driving 20 frames:");
    for frame in 1..=20 {
        fsm.tick(true);
        println!("  frame {frame:2}: {:?}", fsm.current().unwrap());
    }

    println!("\nVisited path: {:?}", fsm.trace().path());
    println!("\n=== Done ===");
}
