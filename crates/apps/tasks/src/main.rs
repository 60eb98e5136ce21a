use app_state::load_app_settings;
use clap::Parser;
use color_eyre::Result;
use common_services::database::get_db_pool;
use tasks::task_runner::{Task, run_task};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    task: Task,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    color_eyre::install()?;

    let args = Args::parse();
    let settings = load_app_settings()?;
    let pool = get_db_pool(&settings.secrets.database_url, &settings.database).await?;
    run_task(args.task, &pool, &settings).await?;

    Ok(())
}
