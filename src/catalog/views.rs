use crate::constants::{FEATURED_LIMIT, RELATED_LIMIT};
use crate::domain::{CatalogEntry, Category};

/// Entries of one category, in catalog order
pub fn in_category(catalog: &[CatalogEntry], category: Category) -> Vec<&CatalogEntry> {
    catalog.iter().filter(|e| e.category == category).collect()
}

/// Featured entries for the landing page, capped at five
pub fn featured(catalog: &[CatalogEntry]) -> Vec<&CatalogEntry> {
    catalog
        .iter()
        .filter(|e| e.featured)
        .take(FEATURED_LIMIT)
        .collect()
}

/// Other entries in the same category as `entry`, capped at four
pub fn related<'a>(catalog: &'a [CatalogEntry], entry: &CatalogEntry) -> Vec<&'a CatalogEntry> {
    catalog
        .iter()
        .filter(|e| e.category == entry.category && e.id != entry.id)
        .take(RELATED_LIMIT)
        .collect()
}

pub fn find_by_slug<'a>(catalog: &'a [CatalogEntry], slug: &str) -> Option<&'a CatalogEntry> {
    catalog.iter().find(|e| e.slug == slug)
}

/// Number of entries per category, in the fixed category order
pub fn category_counts(catalog: &[CatalogEntry]) -> Vec<(Category, usize)> {
    Category::ALL
        .into_iter()
        .map(|c| (c, catalog.iter().filter(|e| e.category == c).count()))
        .collect()
}
