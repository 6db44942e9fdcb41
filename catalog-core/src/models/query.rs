/// Search, filter and page parameters for listing products.
///
/// Every filter is optional and they combine conjunctively.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProductQuery {
    /// Case-insensitive substring to look for in the product name
    pub keyword: Option<String>,
    /// Exact category to restrict to
    pub category: Option<String>,
    /// Inclusive lower bound on price
    pub price_gte: Option<f64>,
    /// Inclusive upper bound on price
    pub price_lte: Option<f64>,
    /// Inclusive lower bound on the mean rating
    pub ratings_gte: Option<f64>,
    /// 1-based page number
    pub page: Option<u32>,
}

impl ProductQuery {
    /// The requested page, with anything below 1 treated as the first page.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// The number of matching products to skip for a given page size.
    pub fn offset(&self, limit: usize) -> usize {
        (self.page() as usize - 1).saturating_mul(limit)
    }
}

/// One page of products.
#[derive(Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductPage<T> {
    /// The number of products in the catalog, regardless of filters
    pub total_products: u64,
    /// The page size used to produce this page
    pub result_per_page: usize,
    /// The products on this page
    pub products: Vec<T>,
}
