//! `super-agent tools`: List the built-in tools.

use super_agent_tools::default_registry;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let registry = default_registry();

    println!();
    println!("  Built-in tools ({})", registry.len());
    println!();
    for def in registry.definitions() {
        println!("  {:<12} {}", def.name, def.description);
    }
    println!();

    Ok(())
}
