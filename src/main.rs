use droptaxi::config::Settings;
use droptaxi::engine::Engine;
use droptaxi::error::Error;
use droptaxi::notifications::{self, Dispatcher};
use droptaxi::server::serve;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("droptaxi=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let dispatcher = Dispatcher::start(
        notifications::from_settings(&settings)?,
        settings.notification_timeout,
    );
    let engine = Engine::new(&settings, dispatcher.clone())?;
    let grace = settings.notification_timeout;

    let served = serve(engine, settings).await;

    dispatcher.shutdown(grace).await;

    served
}
