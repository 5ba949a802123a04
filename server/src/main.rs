use todo_server::{logging, Config};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;
    tracing::info!("Starting todo-server");

    let config = Config::load()?;
    todo_server::serve(config).await?;
    Ok(())
}
