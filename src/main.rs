use courses_api::{App, AppContext, ConfigBuilder, CoursesModule, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigBuilder::new().from_env().build()?;
    courses_api::init_tracing_with_config(&config);

    let db = database::connect(&config.database).await?;

    if config.database.auto_migrate {
        database::run_migrations::<database::Migrator>(&db).await?;
    }

    let context = AppContext::builder().with_database(db).build();

    App::with_config(config)
        .with_context(context)
        .register_module(CoursesModule)
        .serve()
        .await?;

    Ok(())
}
