use anyhow::Result;
use log::info;

use apt_compare::{
    config,
    logger::{level_from_env, setup_logger},
    report,
    services::workspace::Workspace,
    store::persistence::FileStore,
};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logger
    setup_logger(level_from_env())?;

    let config = config::read_config();

    let store = FileStore::new(&config.storage_path);
    info!("Reading apartments from {}", store.path().display());

    let workspace = Workspace::open_with_config(store, &config);
    println!("{}", report::render(&workspace.overview()));

    Ok(())
}
