//! Patrol AI
//!
//! A small NPC brain showing the reentrancy protocol: the Patrol state's
//! update callback requests a transition on the machine that is currently
//! ticking it. The request queues, and drains after the update has
//! returned — no nested tick, no interleaved callbacks.
//!
//! Requests carry the sighting distance as their argument; the guard on
//! Patrol -> Chase only lets close sightings through.
//!
//! Run with: cargo run --example patrol_ai

use clockstep::core::Fsm;
use clockstep::state_key;
use std::cell::Cell;
use std::rc::Rc;

state_key! {
    enum Ai {
        Idle,
        Patrol,
        Chase,
    }
}

fn main() {
    println!("=== Patrol AI ===\n");

    // Distance to the player, fed in by the host loop each frame.
    let player_distance = Rc::new(Cell::new(f32::INFINITY));

    let fsm: Fsm<Ai, f32> = Fsm::new();

    fsm.state(Ai::Idle)
        .add_enter(|_, _| println!("  idle: stretching"));
    fsm.state(Ai::Patrol)
        .add_enter(|last, _| println!("  patrol: walking the route (was {last:?})"))
        .add_exit(|next| println!("  patrol: dropping route, heading to {next:?}"));
    fsm.state(Ai::Chase)
        .add_enter(|_, arg| println!("  chase: target spotted at distance {arg:?}"));

    // Wakes up on its own after one frame of idling.
    fsm.edge(Ai::Idle, Ai::Patrol).guard(|_| true, true);
    // Only chases targets that are actually close.
    fsm.edge(Ai::Patrol, Ai::Chase)
        .guard(|distance| distance.copied().unwrap_or(f32::INFINITY) < 5.0, false);

    {
        let handle = fsm.clone();
        let player_distance = Rc::clone(&player_distance);
        fsm.state(Ai::Patrol).add_update(move || {
            let distance = player_distance.get();
            if distance.is_finite() {
                println!("  patrol: something at distance {distance}");
                // Queued: we are inside this machine's own tick.
                handle.transition_with(Ai::Chase, Some(distance), true);
            }
        });
    }

    fsm.start(Ai::Idle).unwrap();

    let sightings = [None, None, Some(12.0_f32), Some(4.0)];
    for (frame, sighting) in sightings.iter().enumerate() {
        player_distance.set(sighting.unwrap_or(f32::INFINITY));
        println!("frame {frame}:");
        fsm.tick(true);
        println!("  state: {:?}", fsm.current().unwrap());
    }

    println!("\nTick trace:");
    println!("{}", serde_json::to_string_pretty(&fsm.trace()).unwrap());
    println!("\n=== Done ===");
}
