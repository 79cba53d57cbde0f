//! `super-agent config`: Show the resolved configuration.

use super_agent_config::OrchestratorConfig;

pub async fn show(default_toml: bool) -> Result<(), Box<dyn std::error::Error>> {
    if default_toml {
        print!("{}", OrchestratorConfig::default_toml());
        return Ok(());
    }

    let config = OrchestratorConfig::load(None).map_err(|e| format!("Failed to load config: {e}"))?;
    println!("# {}", OrchestratorConfig::config_path().display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
