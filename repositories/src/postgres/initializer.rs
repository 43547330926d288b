use crate::postgres::categories::CategoryRepo;
use crate::postgres::{ConnectionDetails, PostgresConfig, RepoInitErr, RepoMigrationErr};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use error_stack::{Report, ResultExt};
use std::str::FromStr;
use tokio_postgres::{Client, Config, NoTls};
use tracing::debug;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("./src/postgres/migrations");
}

pub trait Init {
    type Repo;
    fn init(self, pool: Pool) -> impl Future<Output = Result<Self::Repo, Report<RepoInitErr>>>;
    fn run_migrations(
        &self,
        client: &mut Client,
    ) -> impl Future<Output = Result<(), Report<RepoMigrationErr>>>;
}

pub struct CategoryInit;

impl Init for CategoryInit {
    type Repo = CategoryRepo;

    async fn init(self, pool: Pool) -> Result<Self::Repo, Report<RepoInitErr>> {
        CategoryRepo::new(pool)
            .await
            .change_context(RepoInitErr::categories())
    }

    async fn run_migrations(&self, client: &mut Client) -> Result<(), Report<RepoMigrationErr>> {
        embedded::migrations::runner()
            .run_async(client)
            .await
            .change_context(RepoMigrationErr)
            .attach("categories repo")?;
        Ok(())
    }
}

/// Starts as `RepoCreator<()>`, which can only pick repos; `create` exists
/// once at least one repo is selected.
pub struct RepoCreator<T = ()> {
    initializer: T,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to create repos")]
pub struct RepoCreationErr;

impl<T> RepoCreator<T>
where
    T: Init,
{
    pub async fn create(
        self,
        connection_details: ConnectionDetails,
        pool_size: Option<usize>,
    ) -> Result<T::Repo, Report<RepoCreationErr>> {
        let config = match connection_details {
            ConnectionDetails::Url(url) => {
                Config::from_str(&url).change_context(RepoCreationErr)?
            }
        };

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(config, NoTls, mgr_config);
        let mut pool_builder = Pool::builder(mgr);
        if let Some(pool_size) = pool_size {
            pool_builder = pool_builder.max_size(pool_size);
        }
        debug!("building connection pool..");
        let pool = pool_builder.build().change_context(RepoCreationErr)?;
        debug!("connection pool built, running migrations");

        self.run_migrations(&pool)
            .await
            .change_context(RepoCreationErr)?;

        self.initializer
            .init(pool)
            .await
            .change_context(RepoCreationErr)
    }

    pub async fn create_from_config(
        self,
        config: PostgresConfig,
    ) -> Result<T::Repo, Report<RepoCreationErr>> {
        self.create(config.connection, config.pool_size).await
    }

    // the handle is dropped before init so a pool of size 1 still has a connection left
    async fn run_migrations(&self, pool: &Pool) -> Result<(), Report<RepoMigrationErr>> {
        let mut handle = pool.get().await.change_context(RepoMigrationErr)?;

        let client = &mut **handle;

        self.initializer.run_migrations(client).await
    }
}

impl Default for RepoCreator<()> {
    fn default() -> Self {
        Self { initializer: () }
    }
}

impl RepoCreator<()> {
    pub fn with_categories(self) -> RepoCreator<CategoryInit> {
        RepoCreator {
            initializer: CategoryInit,
        }
    }
}
