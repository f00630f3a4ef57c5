use crate::{app::AppContext, config::Config, health, http::RouteModule};
use axum::{Router, extract::DefaultBodyLimit, http::Request, routing::get};
use std::time::Duration;
use tokio::signal;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Assigns a random v4 UUID as `x-request-id` when the client sent none
#[derive(Clone, Copy, Debug, Default)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _: &Request<B>) -> Option<RequestId> {
        let value = Uuid::new_v4().hyphenated().to_string();
        value.parse().ok().map(RequestId::new)
    }
}

/// Main application structure
pub struct App {
    router: Router<AppContext>,
    config: Config,
    context: AppContext,
}

impl App {
    /// Creates a new App with default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new App with the provided configuration
    pub fn with_config(config: Config) -> Self {
        let router = Router::<AppContext>::new().route("/health", get(health::health_handler));

        Self {
            router,
            config,
            context: AppContext::new(),
        }
    }

    /// Builder pattern for constructing an App
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Register a route module with the application
    pub fn register_module<M: RouteModule>(mut self, module: M) -> Self {
        self.router = module.register(self.router);
        self
    }

    /// Set the application context
    pub fn with_context(mut self, context: AppContext) -> Self {
        self.context = context;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Router with middleware and `AppContext` applied, for in-process tests
    pub fn into_test_router(self) -> Router {
        let app = self.with_middleware();
        app.router.with_state(app.context)
    }

    /// Apply middleware stack and prepare for serving
    fn with_middleware(mut self) -> Self {
        let mut router = self.router;

        // Middleware order (from inner to outer):
        // 1. Body size limit - reject large bodies early
        router = router.layer(DefaultBodyLimit::max(self.config.server.max_body_size));

        // 2. Trace layer - HTTP tracing, sees the request id set below
        router = router.layer(TraceLayer::new_for_http());

        // 3. Request ID - add request IDs for tracing
        router = router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId));

        self.router = router;
        self
    }

    /// Start the application server
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let addr = self
            .config
            .server
            .addr()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let app = self.with_middleware();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("Server starting on http://{}", addr);
        tracing::info!("Health check available at http://{}/health", addr);

        // Router<AppContext> is a router still missing its state; only
        // Router<()> can be served
        let router = app.router.with_state(app.context);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for App with fluent API
#[must_use = "builder does nothing until you call build()"]
pub struct AppBuilder {
    config: Config,
    context: AppContext,
    modules: Vec<Box<dyn FnOnce(Router<AppContext>) -> Router<AppContext>>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            context: AppContext::new(),
            modules: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_context(mut self, context: AppContext) -> Self {
        self.context = context;
        self
    }

    pub fn register_module<M: RouteModule + 'static>(mut self, module: M) -> Self {
        self.modules
            .push(Box::new(move |router| module.register(router)));
        self
    }

    pub fn build(self) -> App {
        let mut app = App::with_config(self.config).with_context(self.context);

        for register in self.modules {
            app.router = register(app.router);
        }

        app
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give connections a grace period to close
    tokio::time::sleep(Duration::from_secs(1)).await;
    tracing::info!("Shutdown complete");
}
