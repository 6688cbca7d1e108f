use crate::{
    CleanArgs,
    build::{Builder, base_path_from_config},
    config::Config,
};

pub async fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let config_path = super::config_path(args.config_file.as_deref())?;
    let config = Config::load_from_arg(Some(config_path.as_path())).await?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);
    let output_dir = Builder::new(config, base_path).output_dir();

    if !output_dir.exists() {
        println!("Nothing to clean at {}", output_dir.display());
        return Ok(());
    }

    if args.dry_run {
        println!("Would delete {}", output_dir.display());
    } else {
        tokio::fs::remove_dir_all(&output_dir).await?;
        println!("Deleted {}", output_dir.display());
    }

    Ok(())
}
