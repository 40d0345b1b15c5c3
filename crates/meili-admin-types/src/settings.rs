//! Index settings.
//!
//! [`Settings`] doubles as the read model and the `PATCH` body: every field
//! is optional and unset fields are not serialized, so a partial update only
//! touches what it names. The individual settings endpoints accept the
//! field's own value (a string list, a synonym map, or one of the small
//! structs below).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Synonym table: each word maps to the words it is equivalent to.
pub type Synonyms = BTreeMap<String, Vec<String>>;

/// Full settings object of an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Settings {
    /// Attributes returned in documents (`["*"]` for all).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed_attributes: Option<Vec<String>>,
    /// Attributes searched, in priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
    /// Attributes usable in filter expressions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filterable_attributes: Option<Vec<String>>,
    /// Attributes usable in sort criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable_attributes: Option<Vec<String>>,
    /// Ranking rules, in order of application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_rules: Option<Vec<String>>,
    /// Words ignored by the query parser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<Vec<String>>,
    /// Characters that never split words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_separator_tokens: Option<Vec<String>>,
    /// Extra characters that split words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator_tokens: Option<Vec<String>>,
    /// Strings tokenized as single words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<Vec<String>>,
    /// Synonym table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Synonyms>,
    /// Attribute used to de-duplicate hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_attribute: Option<String>,
    /// `byWord` or `byAttribute`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity_precision: Option<String>,
    /// Typo tolerance rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typo_tolerance: Option<TypoTolerance>,
    /// Facet search limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faceting: Option<Faceting>,
    /// Pagination limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Maximum search duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_cutoff_ms: Option<u64>,
    /// Prefix search mode: `indexingTime` or `disabled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_search: Option<String>,
    /// Whether facet values can be searched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet_search: Option<bool>,
    /// Embedder configurations keyed by name; passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedders: Option<Value>,
}

/// Typo tolerance rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TypoTolerance {
    /// Master switch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Word lengths at which one and two typos are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_word_size_for_typos: Option<MinWordSizeForTypos>,
    /// Words that must match exactly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_on_words: Option<Vec<String>>,
    /// Attributes that must match exactly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_on_attributes: Option<Vec<String>>,
}

/// Minimum word sizes for typo tolerance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MinWordSizeForTypos {
    /// Minimum length for one typo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_typo: Option<u8>,
    /// Minimum length for two typos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_typos: Option<u8>,
}

/// Pagination limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Pagination {
    /// Ceiling on reachable hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_total_hits: Option<u64>,
}

/// Facet search limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Faceting {
    /// Maximum values returned per facet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values_per_facet: Option<u64>,
    /// Facet value order per facet (`alpha` or `count`); `*` sets the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_facet_values_by: Option<BTreeMap<String, String>>,
}
