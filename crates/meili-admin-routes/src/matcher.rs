//! Path resolution and reverse routing.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::Serialize;

use crate::error::RouteError;
use crate::table::{ROUTES, RouteDef, RouteName, View, find};

/// Characters escaped inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// One level of a matched route chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchedRoute {
    /// Route name.
    pub name: RouteName,
    /// Page component rendered at this level.
    pub view: View,
}

impl From<&RouteDef> for MatchedRoute {
    fn from(def: &RouteDef) -> Self {
        Self {
            name: def.name,
            view: def.view,
        }
    }
}

/// Result of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Leaf route name.
    pub name: RouteName,
    /// Matched routes, outermost first.
    pub matched: Vec<MatchedRoute>,
    /// Decoded path parameters.
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    /// Decoded value of parameter `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Page component of the leaf route.
    pub fn view(&self) -> Option<View> {
        self.matched.last().map(|m| m.view)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Match `pattern` segments against `path` segments, capturing params.
///
/// Static segments compare ASCII case-insensitively; param values keep
/// their case.
fn match_segments(pattern: &[&str], path: &[&str]) -> Option<BTreeMap<String, String>> {
    if pattern.len() != path.len() {
        return None;
    }
    let mut params = BTreeMap::new();
    for (pat, seg) in pattern.iter().zip(path) {
        if let Some(key) = pat.strip_prefix(':') {
            let value = percent_decode_str(seg).decode_utf8_lossy().into_owned();
            params.insert(key.to_owned(), value);
        } else if !pat.eq_ignore_ascii_case(seg) {
            return None;
        }
    }
    Some(params)
}

/// Resolve a browser path to its route chain.
///
/// Query strings and fragments are ignored, as are empty segments, so
/// `/projects/3/` and `/projects/3` resolve alike, as do `/Projects/3` and
/// `/projects/3`. A parent whose child has an empty path resolves to that
/// child.
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let wanted: Vec<&str> = segments(path).collect();

    for route in ROUTES {
        let parent: Vec<&str> = segments(route.path).collect();

        for child in route.children {
            let pattern: Vec<&str> = parent
                .iter()
                .copied()
                .chain(segments(child.path))
                .collect();
            if let Some(params) = match_segments(&pattern, &wanted) {
                return Some(RouteMatch {
                    name: child.name,
                    matched: vec![route.into(), child.into()],
                    params,
                });
            }
        }

        if let Some(params) = match_segments(&parent, &wanted) {
            return Some(RouteMatch {
                name: route.name,
                matched: vec![route.into()],
                params,
            });
        }
    }
    None
}

/// Build the path of route `name`, percent-encoding each parameter.
pub fn href(name: RouteName, params: &[(&str, &str)]) -> Result<String, RouteError> {
    let (parent, route) = find(name).ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

    let pattern = parent
        .map(|p| p.path)
        .into_iter()
        .chain(core::iter::once(route.path))
        .flat_map(segments);

    let mut out = String::new();
    for seg in pattern {
        out.push('/');
        if let Some(key) = seg.strip_prefix(':') {
            let value = params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| RouteError::MissingParam {
                    route: name.to_string(),
                    param: key.to_owned(),
                })?;
            out.extend(utf8_percent_encode(value, SEGMENT));
        } else {
            out.push_str(seg);
        }
    }

    if out.is_empty() {
        out.push('/');
    }
    Ok(out)
}

/// [`href`] for a route given by its string name.
pub fn href_by_name(name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
    href(name.parse()?, params)
}
