use app_state::AppSettings;
use clap::Subcommand;
use color_eyre::Result;
use common_services::database::{rebuild_vector_index, run_migrations};
use sqlx::PgPool;
use tracing::info;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Apply pending database migrations.
    Migrate,
    /// Rebuild the embedding vector index.
    Reindex {
        /// Number of index lists, defaults to `database.ivf_lists`.
        #[arg(long)]
        lists: Option<u32>,
    },
}

pub async fn run_task(task: Task, pool: &PgPool, settings: &AppSettings) -> Result<()> {
    match task {
        Task::Migrate => run_migrations(pool).await?,
        Task::Reindex { lists } => {
            let lists = lists.unwrap_or(settings.database.ivf_lists);
            rebuild_vector_index(pool, lists).await?;
        }
    }
    info!("Task {:?} finished", task);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(subcommand)]
        task: Task,
    }

    #[test]
    fn test_parse_tasks() -> Result<()> {
        assert_eq!(Cli::try_parse_from(["tasks", "migrate"])?.task, Task::Migrate);
        assert_eq!(
            Cli::try_parse_from(["tasks", "reindex"])?.task,
            Task::Reindex { lists: None }
        );
        assert_eq!(
            Cli::try_parse_from(["tasks", "reindex", "--lists", "250"])?.task,
            Task::Reindex { lists: Some(250) }
        );
        assert!(Cli::try_parse_from(["tasks", "vacuum"]).is_err());
        Ok(())
    }
}
