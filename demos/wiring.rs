//! Wiring example: build a small substrate, name its endpoints, and
//! round-trip the whole store through JSON.
//!
//! Run with: `cargo run --example wiring`

use serde_json::json;
use symbios_substrate::{Substrate, Table};

fn main() -> symbios_substrate::Result<()> {
    let mut substrate = Substrate::new();

    // Name a few coordinates for the network's edges
    let vision = substrate.register(
        Table::Inputs,
        "vision",
        4,
        4,
        json!({"modality": "camera"}).as_object().unwrap().clone(),
    );
    let audio = substrate.register_input("audio");
    let motor = substrate.register_output("motor");

    println!("vision -> {vision}");
    println!("audio  -> {audio}");
    println!("motor  -> {motor}");

    // Write some cells; the motor grid grows in place
    substrate.space_mut().set_cell(vision, 0, 0, 0.9);
    substrate.space_mut().set_cell(motor, 2, 3, -0.5);
    println!(
        "motor grid grew to {:?} (declared {:?})",
        substrate.space().dimensions(motor),
        {
            let b = substrate.lookup(Table::Outputs, "motor").unwrap();
            (b.rows, b.cols)
        }
    );

    // Stash an opaque genome record
    substrate
        .genomes_mut()
        .add("champion", json!({"generation": 12, "fitness": 3.97}));

    // Full round-trip through the interchange JSON layout
    let json = substrate.snapshot().to_json()?;
    println!("snapshot: {} bytes of JSON", json.len());

    let restored = Substrate::from_snapshot(symbios_substrate::Snapshot::from_json(&json)?)?;
    println!(
        "restored: {} occupied coordinates, {} genomes, cursor at {}",
        restored.space().occupied_count(),
        restored.genomes().len(),
        restored.allocator().cursor(),
    );

    assert_eq!(restored.space().cell(vision, 0, 0)?, 0.9);
    assert_eq!(restored.space().cell(motor, 2, 3)?, -0.5);
    println!("round-trip verified");

    Ok(())
}
