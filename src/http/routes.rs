use crate::app::AppContext;
use axum::Router;

/// Trait for composable route modules
///
/// Implement this trait to group related routes. Each module registers its
/// own routes and is composed into the main application by [`crate::App`].
///
/// # Example
///
/// ```ignore
/// struct CoursesModule;
///
/// impl RouteModule for CoursesModule {
///     fn routes(&self) -> Router<AppContext> {
///         Router::new().route("/courses/", get(list_courses))
///     }
///
///     fn prefix(&self) -> Option<&str> {
///         Some("/api/v1")
///     }
/// }
/// ```
pub trait RouteModule {
    /// Returns a router with all routes for this module
    ///
    /// The router should NOT have state applied; the App applies
    /// `AppContext` once every module is merged.
    fn routes(&self) -> Router<AppContext>;

    /// Optional: specify a path prefix for all routes in this module
    fn prefix(&self) -> Option<&str> {
        None
    }

    /// Registers this module's routes into the application router
    fn register(self, router: Router<AppContext>) -> Router<AppContext>
    where
        Self: Sized,
    {
        let routes = self.routes();

        if let Some(prefix) = self.prefix() {
            router.nest(prefix, routes)
        } else {
            router.merge(routes)
        }
    }
}
