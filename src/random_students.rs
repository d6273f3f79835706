use color_eyre::eyre::Result;
use dotenv::dotenv;
use groupsync_cli::config::GroupsConfig;
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = GroupsConfig::from_env()?;
    groupsync_cli::init_logging(config.log_level)?;

    let (codes, seed) = groupsync_cli::random_codes(&config);
    info!(seed, count = codes.len(), "Generated random students");

    for code in codes {
        println!("{code}");
    }

    Ok(())
}
