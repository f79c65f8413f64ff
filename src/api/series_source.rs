use indexmap::IndexMap;

use crate::css::SelectorRecord;

/// Input accepted by [`add`](super::SpecificityChart::add) and friends.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesSource {
    /// Raw stylesheet text, extracted with the chart's extractor.
    Css(String),
    /// Records extracted elsewhere, used as-is.
    Records(Vec<SelectorRecord>),
    /// Several named sources added in one call; each key becomes a series
    /// id. Nested maps contribute their own keys.
    Named(IndexMap<String, SeriesSource>),
}

impl SeriesSource {
    /// Builds a [`SeriesSource::Named`] from `(id, source)` pairs.
    pub fn named<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SeriesSource>,
    {
        Self::Named(
            entries
                .into_iter()
                .map(|(id, source)| (id.into(), source.into()))
                .collect(),
        )
    }

    /// Flattens into `(id, leaf)` pairs in map order. The outer id of a
    /// nested map is not used.
    pub(super) fn into_leaves(self, id: Option<String>, out: &mut Vec<(Option<String>, Self)>) {
        match self {
            Self::Named(entries) => {
                for (key, source) in entries {
                    source.into_leaves(Some(key), out);
                }
            }
            leaf => out.push((id, leaf)),
        }
    }
}

impl From<&str> for SeriesSource {
    fn from(css: &str) -> Self {
        Self::Css(css.to_owned())
    }
}

impl From<String> for SeriesSource {
    fn from(css: String) -> Self {
        Self::Css(css)
    }
}

impl From<Vec<SelectorRecord>> for SeriesSource {
    fn from(records: Vec<SelectorRecord>) -> Self {
        Self::Records(records)
    }
}

impl From<IndexMap<String, SeriesSource>> for SeriesSource {
    fn from(entries: IndexMap<String, SeriesSource>) -> Self {
        Self::Named(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::SeriesSource;

    #[test]
    fn nested_maps_flatten_to_their_own_keys() {
        let source = SeriesSource::named([
            ("a", SeriesSource::from(".a{}")),
            (
                "outer",
                SeriesSource::named([("b", ".b{}"), ("c", ".c{}")]),
            ),
        ]);
        let mut leaves = Vec::new();
        source.into_leaves(None, &mut leaves);
        let ids: Vec<_> = leaves.iter().map(|(id, _)| id.as_deref()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b"), Some("c")]);
    }
}
