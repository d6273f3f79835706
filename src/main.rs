use color_eyre::eyre::Result;
use dotenv::dotenv;
use groupsync_cli::config::GroupsConfig;
use tracing::info;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = GroupsConfig::from_env()?;

    // Initialize logging
    groupsync_cli::init_logging(config.log_level)?;

    info!(
        group_size = config.group_size,
        output_timezone = %config.output_timezone,
        strategy = %config.strategy,
        "Starting GroupSync"
    );

    let output = groupsync_cli::run(&config)?;
    println!("{output}");

    Ok(())
}
