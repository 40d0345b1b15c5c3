//! Page routing for the Meili Admin dashboard.
//!
//! A static tree maps browser paths to named routes and their page
//! components. [`resolve`] turns a path into the matched chain and its
//! parameters, [`href`] builds a path from a route name, and
//! [`ViewRegistry`] loads page components on first use.
//!
//! There are no guards and no asynchronous resolution.

pub mod error;
pub mod matcher;
pub mod table;
pub mod views;

pub use error::RouteError;
pub use matcher::{MatchedRoute, RouteMatch, href, href_by_name, resolve};
pub use table::{ROUTES, RouteDef, RouteName, View};
pub use views::ViewRegistry;

#[cfg(test)]
mod tests {
    #[test]
    fn route_match_serializes_for_display() {
        let json = crate::resolve("/projects/4/keys")
            .and_then(|m| serde_json::to_value(m).ok())
            .unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "ProjectKeys",
                "matched": [
                    {"name": "ProjectDetail", "view": "ProjectDetail"},
                    {"name": "ProjectKeys", "view": "ProjectKeys"}
                ],
                "params": {"id": "4"}
            })
        );
    }
}
