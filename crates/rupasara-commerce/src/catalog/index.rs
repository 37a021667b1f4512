//! Flattened, read-only lookups over the taxonomy.

use crate::catalog::{Category, Group, Product, Taxonomy};
use crate::error::CommerceError;
use crate::ids::{CategorySlug, ProductId};
use std::collections::HashMap;

/// Queryable view over groups, categories and products.
///
/// Built once at start and never mutated. Lookups that miss return `None`;
/// callers fall back to a default view.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    groups: Vec<Group>,
    // (group, category) positions in flattened order.
    categories: Vec<(usize, usize)>,
    by_slug: HashMap<CategorySlug, usize>,
    by_product: HashMap<ProductId, (usize, usize)>,
}

impl CatalogIndex {
    /// Index a taxonomy.
    pub fn new(taxonomy: Taxonomy) -> Self {
        let groups = taxonomy.groups;
        let mut categories = Vec::new();
        let mut by_slug = HashMap::new();
        let mut by_product = HashMap::new();

        for (g, group) in groups.iter().enumerate() {
            for (c, category) in group.categories.iter().enumerate() {
                let flat = categories.len();
                categories.push((g, c));
                by_slug.entry(category.slug.clone()).or_insert(flat);
                for (p, product) in category.products.iter().enumerate() {
                    by_product.entry(product.id.clone()).or_insert((flat, p));
                }
            }
        }

        tracing::debug!(
            groups = groups.len(),
            categories = categories.len(),
            products = by_product.len(),
            "indexed catalog"
        );

        Self {
            groups,
            categories,
            by_slug,
            by_product,
        }
    }

    /// Index the compiled-in RUPASARA taxonomy.
    pub fn builtin() -> Result<Self, CommerceError> {
        Ok(Self::new(Taxonomy::builtin()?))
    }

    /// Groups in menu order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// All categories across all groups, in order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.categories.iter().map(|&(g, c)| &self.groups[g].categories[c])
    }

    /// The first category, used as the default shopping destination.
    pub fn first_category(&self) -> Option<&Category> {
        self.categories().next()
    }

    /// Find a category by slug. The first match wins.
    pub fn find_category(&self, slug: &str) -> Option<&Category> {
        self.by_slug.get(slug).map(|&flat| self.category_at(flat))
    }

    /// Find a product by id. The first match in category order wins.
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.by_product
            .get(id)
            .map(|&(flat, p)| &self.category_at(flat).products[p])
    }

    /// The category a product is listed under (first listing).
    pub fn category_of(&self, id: &str) -> Option<&Category> {
        self.by_product.get(id).map(|&(flat, _)| self.category_at(flat))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    fn category_at(&self, flat: usize) -> &Category {
        let (g, c) = self.categories[flat];
        &self.groups[g].categories[c]
    }
}
