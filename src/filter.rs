use crate::catalog::{Award, Episode, Publication};

/// Stable identity of a record: its position within its catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub usize);

/// Sentinel value that resets a dimension filter.
pub const ALL: &str = "all";

/// A record that can be narrowed by one exact-match dimension.
pub trait Dimensioned {
    fn dimension(&self) -> &str;
}

/// A record that can be matched by free-text search.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Dimensioned for Episode {
    fn dimension(&self) -> &str {
        &self.theme
    }
}

impl Dimensioned for Award {
    fn dimension(&self) -> &str {
        &self.category
    }
}

impl Searchable for Episode {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.theme.as_str(),
        ]
    }
}

impl Searchable for Publication {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.abstract_text.as_deref());
        fields.extend(self.theme.as_deref());
        fields
    }
}

/// A record captured into a view together with its catalog id.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<R> {
    pub id: RecordId,
    pub record: R,
}

/// The last narrowing applied to a view. Filter and search share one slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Narrowing {
    #[default]
    All,
    Dimension(String),
    Search(String),
}

/// Ordered snapshot of a catalog category.
///
/// Always a subsequence of the source in source order; rebuilt wholesale on
/// every change, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<R> {
    entries: Vec<Entry<R>>,
}

impl<R: Clone> FilteredView<R> {
    /// Every record of `source`.
    pub fn full(source: &[R]) -> Self {
        Self::select(source, |_| true)
    }

    fn select(source: &[R], mut keep: impl FnMut(&R) -> bool) -> Self {
        let entries = source
            .iter()
            .enumerate()
            .filter(|(_, record)| keep(record))
            .map(|(i, record)| Entry {
                id: RecordId(i),
                record: record.clone(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry<R>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<RecordId> {
        self.entries.iter().map(|e| e.id).collect()
    }
}

impl<R: Clone + Dimensioned> FilteredView<R> {
    /// Records whose dimension equals `value` exactly; `"all"` keeps all.
    pub fn by_dimension(source: &[R], value: &str) -> Self {
        if value == ALL {
            return Self::full(source);
        }
        Self::select(source, |r| r.dimension() == value)
    }
}

impl<R: Clone + Searchable> FilteredView<R> {
    /// Records with any search field containing `query`, ignoring case and
    /// surrounding whitespace. An empty query keeps all.
    pub fn search(source: &[R], query: &str) -> Self {
        let needle = normalize_query(query);
        if needle.is_empty() {
            return Self::full(source);
        }
        Self::select(source, |r| {
            r.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
    }
}

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Distinct dimension values in first-seen catalog order.
pub fn dimension_values<R: Dimensioned>(source: &[R]) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for record in source {
        let value = record.dimension();
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
    values
}
