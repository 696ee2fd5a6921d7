//! Listing order: directories first, then by the active field.

use std::cmp::Ordering;

use folder_host::{EntryRecord, ShelfPrefs, SortField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Active sort column and direction.
pub struct SortOrder {
    /// Active column.
    pub field: SortField,
    /// Whether the active column is descending.
    pub descending: bool,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            descending: true,
        }
    }
}

impl SortOrder {
    /// Builds the order stored in `prefs`.
    pub fn from_prefs(prefs: &ShelfPrefs) -> Self {
        Self {
            field: prefs.sort_field,
            descending: prefs.sort_descending,
        }
    }

    /// Order after the user clicks the `field` column header.
    ///
    /// Clicking the active column flips direction; switching columns resets to the column's
    /// default direction.
    pub fn toggled(self, field: SortField) -> Self {
        if field == self.field {
            Self {
                field,
                descending: !self.descending,
            }
        } else {
            Self {
                field,
                descending: field.default_descending(),
            }
        }
    }

    /// Compares two records.
    ///
    /// Directories precede files regardless of field and direction. Date ties fall back to the
    /// name before the direction is applied. Directories carry no date, so under the date field
    /// they stay in ascending name order.
    pub fn compare(&self, a: &EntryRecord, b: &EntryRecord) -> Ordering {
        if a.kind != b.kind {
            return if a.kind.is_directory() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        match self.field {
            SortField::Name => self.directed(locale_compare(&a.name, &b.name)),
            SortField::Date if a.kind.is_directory() => locale_compare(&a.name, &b.name),
            SortField::Date => self.directed(
                a.last_modified
                    .cmp(&b.last_modified)
                    .then_with(|| locale_compare(&a.name, &b.name)),
            ),
        }
    }

    /// Stable-sorts `items` by the record each one exposes.
    pub fn sort_by_record<T>(&self, items: &mut [T], record: impl Fn(&T) -> &EntryRecord) {
        items.sort_by(|a, b| self.compare(record(a), record(b)));
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Case-insensitive name comparison with a deterministic case tie-break.
///
/// Approximates the host's locale collation: letters compare by their lowercase form first,
/// so `"apple"` < `"Banana"` < `"cherry"`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}
