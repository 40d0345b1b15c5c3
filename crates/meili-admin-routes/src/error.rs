//! Route lookup errors.

/// Errors from reverse routing and route-name parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No route carries the given name.
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// A `:param` in the route path had no value.
    #[error("route {route} needs parameter {param:?}")]
    MissingParam {
        /// Route being built.
        route: String,
        /// Name of the missing parameter.
        param: String,
    },
}
