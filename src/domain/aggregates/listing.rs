//! Product listing: a priced, filterable, sortable set of products

use serde::{Deserialize, Serialize};

use super::product::{PriceResolver, PriceView};
use crate::domain::value_objects::PriceRange;
use crate::ProductPriceInput;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug)]
pub struct ListedProduct {
    pub product: ProductPriceInput,
    pub view: PriceView,
}

#[derive(Clone, Debug, Default)]
pub struct ProductListing {
    items: Vec<ListedProduct>,
}

impl ProductListing {
    /// Prices every product once, in input order.
    pub fn price(resolver: &PriceResolver, products: Vec<ProductPriceInput>) -> Self {
        let items = products
            .into_iter()
            .map(|product| {
                let view = resolver.view(&product);
                ListedProduct { product, view }
            })
            .collect::<Vec<_>>();
        tracing::debug!(count = items.len(), "priced product listing");
        Self { items }
    }

    pub fn items(&self) -> &[ListedProduct] { &self.items }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn views(&self) -> Vec<PriceView> { self.items.iter().map(|i| i.view.clone()).collect() }

    pub fn filter(&mut self, range: PriceRange) {
        if range.is_open() { return; }
        self.items.retain(|i| range.contains(i.view.display_price));
    }

    /// Stable: equal prices keep their input order.
    pub fn sort(&mut self, order: SortOrder) {
        self.items.sort_by(|a, b| {
            let ord = a.view.display_price.total_cmp(&b.view.display_price);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }
}
