//! The static page route tree.
//!
//! Declaration order is match order. Child paths are relative to their
//! parent; an empty child path is the parent's default page.

use std::str::FromStr;

use serde::Serialize;

use crate::error::RouteError;

/// Declares a fieldless enum with a fixed string form for each variant.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Fixed string form.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labelled_enum! {
    /// Name of a page route, used for reverse routing.
    RouteName {
        /// Landing page.
        Home => "Home",
        /// Project list.
        Projects => "Projects",
        /// Project shell page.
        ProjectDetail => "ProjectDetail",
        /// Default project tab: its indexes.
        ProjectIndexes => "ProjectIndexes",
        /// Task queue of a project.
        ProjectTasks => "ProjectTasks",
        /// Project connection settings.
        ProjectSettings => "ProjectSettings",
        /// API keys of a project.
        ProjectKeys => "ProjectKeys",
        /// Cross-index search playground.
        ProjectSearch => "ProjectSearch",
        /// Index shell page.
        IndexDetail => "IndexDetail",
        /// Default index tab: overview and documents.
        IndexGeneral => "IndexGeneral",
        /// Displayed, searchable, filterable and sortable attributes.
        IndexAttributes => "IndexAttributes",
        /// Ranking rules.
        IndexRankingRules => "IndexRankingRules",
        /// Synonyms.
        IndexSynonyms => "IndexSynonyms",
        /// Typo tolerance.
        IndexTypoTolerance => "IndexTypoTolerance",
        /// Prefix search.
        IndexPrefixSearch => "IndexPrefixSearch",
        /// Stop words.
        IndexStopWords => "IndexStopWords",
        /// Separator and non-separator tokens.
        IndexSeparators => "IndexSeparators",
        /// Dictionary.
        IndexDictionary => "IndexDictionary",
        /// Pagination limits.
        IndexPagination => "IndexPagination",
        /// Faceting limits.
        IndexFaceting => "IndexFaceting",
        /// Search cutoff.
        IndexSearchCutoff => "IndexSearchCutoff",
        /// Embedders.
        IndexEmbedders => "IndexEmbedders",
    }
}

impl FromStr for RouteName {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| RouteError::UnknownRoute(s.to_owned()))
    }
}

labelled_enum! {
    /// Page component rendered for a route, named by its source location.
    View {
        /// `Home`.
        Home => "Home",
        /// `Projects`.
        Projects => "Projects",
        /// `ProjectDetail`.
        ProjectDetail => "ProjectDetail",
        /// `project/Indexes`.
        ProjectIndexes => "project/Indexes",
        /// `project/Tasks`.
        ProjectTasks => "project/Tasks",
        /// `project/Settings`.
        ProjectSettings => "project/Settings",
        /// `project/Keys`.
        ProjectKeys => "project/Keys",
        /// `project/Search`.
        ProjectSearch => "project/Search",
        /// `IndexDetail`.
        IndexDetail => "IndexDetail",
        /// `index/General`.
        IndexGeneral => "index/General",
        /// `index/Attributes`.
        IndexAttributes => "index/Attributes",
        /// `index/RankingRules`.
        IndexRankingRules => "index/RankingRules",
        /// `index/Synonyms`.
        IndexSynonyms => "index/Synonyms",
        /// `index/TypoTolerance`.
        IndexTypoTolerance => "index/TypoTolerance",
        /// `index/PrefixSearch`.
        IndexPrefixSearch => "index/PrefixSearch",
        /// `index/StopWords`.
        IndexStopWords => "index/StopWords",
        /// `index/Separators`.
        IndexSeparators => "index/Separators",
        /// `index/Dictionary`.
        IndexDictionary => "index/Dictionary",
        /// `index/Pagination`.
        IndexPagination => "index/Pagination",
        /// `index/Faceting`.
        IndexFaceting => "index/Faceting",
        /// `index/SearchCutoff`.
        IndexSearchCutoff => "index/SearchCutoff",
        /// `index/Embedders`.
        IndexEmbedders => "index/Embedders",
    }
}

/// One node of the route tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    /// Path pattern; `:name` segments capture a parameter.
    pub path: &'static str,
    /// Route name.
    pub name: RouteName,
    /// Page component.
    pub view: View,
    /// Nested routes, paths relative to this one.
    pub children: &'static [RouteDef],
}

impl RouteDef {
    const fn leaf(path: &'static str, name: RouteName, view: View) -> Self {
        Self {
            path,
            name,
            view,
            children: &[],
        }
    }
}

const PROJECT_CHILDREN: &[RouteDef] = &[
    RouteDef::leaf("", RouteName::ProjectIndexes, View::ProjectIndexes),
    RouteDef::leaf("tasks", RouteName::ProjectTasks, View::ProjectTasks),
    RouteDef::leaf("settings", RouteName::ProjectSettings, View::ProjectSettings),
    RouteDef::leaf("keys", RouteName::ProjectKeys, View::ProjectKeys),
    RouteDef::leaf("search", RouteName::ProjectSearch, View::ProjectSearch),
];

const INDEX_CHILDREN: &[RouteDef] = &[
    RouteDef::leaf("", RouteName::IndexGeneral, View::IndexGeneral),
    RouteDef::leaf("attributes", RouteName::IndexAttributes, View::IndexAttributes),
    RouteDef::leaf("ranking-rules", RouteName::IndexRankingRules, View::IndexRankingRules),
    RouteDef::leaf("synonyms", RouteName::IndexSynonyms, View::IndexSynonyms),
    RouteDef::leaf("typo-tolerance", RouteName::IndexTypoTolerance, View::IndexTypoTolerance),
    RouteDef::leaf("prefix-search", RouteName::IndexPrefixSearch, View::IndexPrefixSearch),
    RouteDef::leaf("stop-words", RouteName::IndexStopWords, View::IndexStopWords),
    RouteDef::leaf("separators", RouteName::IndexSeparators, View::IndexSeparators),
    RouteDef::leaf("dictionary", RouteName::IndexDictionary, View::IndexDictionary),
    RouteDef::leaf("pagination", RouteName::IndexPagination, View::IndexPagination),
    RouteDef::leaf("faceting", RouteName::IndexFaceting, View::IndexFaceting),
    RouteDef::leaf("search-cutoff", RouteName::IndexSearchCutoff, View::IndexSearchCutoff),
    RouteDef::leaf("embedders", RouteName::IndexEmbedders, View::IndexEmbedders),
];

/// The dashboard's page routes.
pub const ROUTES: &[RouteDef] = &[
    RouteDef::leaf("/", RouteName::Home, View::Home),
    RouteDef::leaf("/projects", RouteName::Projects, View::Projects),
    RouteDef {
        path: "/projects/:id",
        name: RouteName::ProjectDetail,
        view: View::ProjectDetail,
        children: PROJECT_CHILDREN,
    },
    RouteDef {
        path: "/projects/:projectId/indexes/:indexId",
        name: RouteName::IndexDetail,
        view: View::IndexDetail,
        children: INDEX_CHILDREN,
    },
];

/// Find a route by name, together with its parent when it is nested.
pub fn find(name: RouteName) -> Option<(Option<&'static RouteDef>, &'static RouteDef)> {
    ROUTES.iter().find_map(|route| {
        if route.name == name {
            return Some((None, route));
        }
        route
            .children
            .iter()
            .find(|child| child.name == name)
            .map(|child| (Some(route), child))
    })
}
