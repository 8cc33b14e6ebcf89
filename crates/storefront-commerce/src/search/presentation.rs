//! Result presentation: homepage carousels or a paginated grid.
//!
//! Everything here borrows from the fetched page. Buckets are views into the
//! server-ordered product list, so splitting never reorders or mutates it.

use crate::catalog::Product;
use crate::search::{Pagination, ProductPage, RouteParams};
use serde::Serialize;

/// Number of products shown in the featured strip.
pub const FEATURED_LIMIT: usize = 8;

/// Color scheme of a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Mens,
    Ladies,
}

/// One homepage carousel: which categories feed it and how it is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSpec {
    /// Category the "view all" link points at.
    pub category: &'static str,
    pub title: &'static str,
    pub theme: Theme,
    /// Product categories collected into this carousel.
    pub members: &'static [&'static str],
}

impl CarouselSpec {
    const fn new(category: &'static str, title: &'static str, theme: Theme, members: &'static [&'static str]) -> Self {
        Self {
            category,
            title,
            theme,
            members,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.members.contains(&product.category.as_str())
    }

    pub fn link(&self) -> String {
        format!("/category/{}", self.category)
    }
}

/// Homepage carousels in display order.
///
/// "ELITE PERFORMANCE" also collects `men-sport` and `ladies-sport`, so a
/// sport product appears both there and in its own carousel. Every other
/// carousel owns its categories.
pub const CAROUSELS: &[CarouselSpec] = &[
    CarouselSpec::new("tshirt", "MEN'S T-SHIRTS", Theme::Mens, &["tshirt"]),
    CarouselSpec::new("shirt", "MEN'S SHIRTS", Theme::Mens, &["shirt"]),
    CarouselSpec::new("jeans", "MEN'S JEANS", Theme::Mens, &["jeans"]),
    CarouselSpec::new("sneakers", "MEN'S SNEAKERS", Theme::Mens, &["sneakers"]),
    CarouselSpec::new("cargo", "MEN'S CARGO", Theme::Mens, &["cargo"]),
    CarouselSpec::new("trousers", "MEN'S TROUSERS", Theme::Mens, &["trousers"]),
    CarouselSpec::new("hoodies-sweaters", "MEN'S HOODIES & SWEATERS", Theme::Mens, &["hoodies-sweaters"]),
    CarouselSpec::new("flipflop", "MEN'S FLIP FLOPS", Theme::Mens, &["flipflop"]),
    CarouselSpec::new("men-sport", "MEN'S SPORT", Theme::Mens, &["men-sport"]),
    CarouselSpec::new("men-accessories", "MEN'S ACCESSORIES", Theme::Mens, &["men-accessories"]),
    CarouselSpec::new("ladies-tshirt", "LADIES' T-SHIRTS", Theme::Ladies, &["ladies-tshirt"]),
    CarouselSpec::new("ladies-shirt", "LADIES' SHIRTS", Theme::Ladies, &["ladies-shirt"]),
    CarouselSpec::new("ladies-jeans", "LADIES' JEANS", Theme::Ladies, &["ladies-jeans"]),
    CarouselSpec::new("ladies-shorts", "LADIES' SHORTS", Theme::Ladies, &["ladies-shorts"]),
    CarouselSpec::new("coord-set", "LADIES' CO-ORD SETS", Theme::Ladies, &["coord-set"]),
    CarouselSpec::new("ladies-cargo", "LADIES' CARGO", Theme::Ladies, &["ladies-cargo"]),
    CarouselSpec::new("ladies-trousers", "LADIES' TROUSERS", Theme::Ladies, &["ladies-trousers"]),
    CarouselSpec::new("ladies-hoodies", "LADIES' HOODIES", Theme::Ladies, &["ladies-hoodies"]),
    CarouselSpec::new("ladies-sport", "LADIES' SPORT", Theme::Ladies, &["ladies-sport"]),
    CarouselSpec::new("ladies-clothing", "LADIES' CLOTHING", Theme::Ladies, &["ladies-clothing"]),
    CarouselSpec::new("ladies-accessories", "LADIES' ACCESSORIES", Theme::Ladies, &["ladies-accessories"]),
    CarouselSpec::new("lingerie", "LADIES' LINGERIE", Theme::Ladies, &["lingerie"]),
    CarouselSpec::new(
        "kids-clothing",
        "KIDS' SELECTION",
        Theme::Mens,
        &["kids-clothing", "boys", "girls", "infants"],
    ),
    CarouselSpec::new(
        "activewear",
        "ELITE PERFORMANCE",
        Theme::Mens,
        &["activewear", "performance", "gym-gear", "running", "training", "men-sport", "ladies-sport"],
    ),
];

/// Products of one carousel, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselBucket<'a> {
    pub spec: &'a CarouselSpec,
    pub products: Vec<&'a Product>,
}

impl CarouselBucket<'_> {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Every carousel bucket, including empty ones.
pub fn all_buckets(products: &[Product]) -> Vec<CarouselBucket<'_>> {
    CAROUSELS
        .iter()
        .map(|spec| CarouselBucket {
            spec,
            products: products
                .iter()
                .filter(|p| p.is_renderable() && spec.matches(p))
                .collect(),
        })
        .collect()
}

/// The homepage: featured strip plus non-empty carousels.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSections<'a> {
    pub featured: Vec<&'a Product>,
    pub carousels: Vec<CarouselBucket<'a>>,
}

impl<'a> HomeSections<'a> {
    pub fn split(products: &'a [Product]) -> Self {
        let featured = products
            .iter()
            .filter(|p| p.is_renderable() && p.featured)
            .take(FEATURED_LIMIT)
            .collect();

        let carousels = all_buckets(products)
            .into_iter()
            .filter(|b| !b.is_empty())
            .collect();

        Self { featured, carousels }
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.carousels.is_empty()
    }
}

/// A category or search results grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView<'a> {
    pub heading: String,
    pub products: Vec<&'a Product>,
    pub pagination: Pagination,
    /// Base of the pager links; `/page/2` style segments are appended.
    link_base: String,
}

impl<'a> GridView<'a> {
    pub fn new(page: &'a ProductPage, route: &RouteParams) -> Self {
        let (heading, link_base) = match (route.keyword(), route.category_slug()) {
            (Some(keyword), _) => (format!("Results for \"{}\"", keyword), format!("/search/{}", keyword)),
            (None, Some(category)) => (
                crate::catalog::Category::new(category).display_name().to_string(),
                format!("/category/{}", category),
            ),
            (None, None) => ("All Products".to_string(), String::new()),
        };

        Self {
            heading,
            products: page.products.iter().filter(|p| p.is_renderable()).collect(),
            pagination: page.pagination(),
            link_base,
        }
    }

    /// Link target for page `n` of this grid.
    pub fn page_link(&self, n: u32) -> String {
        format!("{}/page/{}", self.link_base, n)
    }

    /// (page number, link, is current) for the pager.
    pub fn pager(&self, max_visible: usize) -> Vec<(u32, String, bool)> {
        if !self.pagination.is_paged() {
            return Vec::new();
        }
        self.pagination
            .page_numbers(max_visible)
            .into_iter()
            .map(|n| (n, self.page_link(n), n == self.pagination.page))
            .collect()
    }
}

/// How a fetched page is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation<'a> {
    Home(HomeSections<'a>),
    Grid(GridView<'a>),
}

/// Pick homepage or grid mode from the route and split the page accordingly.
///
/// Any route without a keyword or category is the homepage, `/page/N`
/// included; it fetches with the homepage page size, so carousels apply.
pub fn present<'a>(page: &'a ProductPage, route: &RouteParams) -> Presentation<'a> {
    if route.is_homepage() {
        Presentation::Home(HomeSections::split(&page.products))
    } else {
        Presentation::Grid(GridView::new(page, route))
    }
}

/// Link target for page `n` of a catalog route.
pub fn page_link(route: &RouteParams, n: u32) -> String {
    match (route.keyword(), route.category_slug()) {
        (Some(keyword), _) => format!("/search/{}/page/{}", keyword, n),
        (None, Some(category)) => format!("/category/{}/page/{}", category, n),
        (None, None) => format!("/page/{}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: &str, category: &str) -> Product {
        let mut p = Product::new(id, format!("Item {}", id), category, Money::from_major(999, Currency::INR));
        p.images = vec![format!("{}.jpg", id)];
        p
    }

    fn sample() -> Vec<Product> {
        let mut featured = product("f1", "jeans");
        featured.featured = true;
        let mut broken = product("x1", "jeans");
        broken.images.clear();
        vec![
            product("p1", "tshirt"),
            featured,
            product("p2", "jeans"),
            broken,
            product("p3", "boys"),
            product("p4", "unlisted-category"),
            product("p5", "ladies-sport"),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_buckets_keep_server_order() {
        let products = sample();
        let buckets = all_buckets(&products);

        let jeans = buckets.iter().find(|b| b.spec.category == "jeans").unwrap();
        assert_eq!(ids(&jeans.products), vec!["f1", "p2"]);

        let kids = buckets.iter().find(|b| b.spec.category == "kids-clothing").unwrap();
        assert_eq!(ids(&kids.products), vec!["p3"]);
    }

    #[test]
    fn test_every_bucket_is_a_subsequence_of_the_source() {
        let products = sample();
        for bucket in all_buckets(&products) {
            let mut source = products.iter();
            for item in &bucket.products {
                assert!(source.any(|p| std::ptr::eq(p, *item)));
            }
        }
    }

    #[test]
    fn test_only_activewear_shares_categories() {
        let products = vec![
            product("s1", "men-sport"),
            product("t1", "tshirt"),
            product("l1", "ladies-sport"),
        ];
        let buckets = all_buckets(&products);
        let (shared, owned): (Vec<_>, Vec<_>) = buckets.iter().partition(|b| b.spec.category == "activewear");

        // Carousels other than activewear never hold the same product twice.
        let owned_ids: Vec<String> = owned.iter().flat_map(|b| ids(&b.products)).collect();
        assert_eq!(owned_ids, vec!["t1", "s1", "l1"]);

        // Activewear repeats both sport products, in source order.
        assert_eq!(ids(&shared[0].products), vec!["s1", "l1"]);
    }

    #[test]
    fn test_owned_categories_are_disjoint() {
        let owned: Vec<&CarouselSpec> = CAROUSELS.iter().filter(|c| c.category != "activewear").collect();
        for (i, a) in owned.iter().enumerate() {
            for b in &owned[i + 1..] {
                assert!(
                    a.members.iter().all(|m| !b.members.contains(m)),
                    "{} and {} share a category",
                    a.category,
                    b.category
                );
            }
        }
    }

    #[test]
    fn test_empty_buckets_are_suppressed() {
        let products = sample();
        let home = HomeSections::split(&products);
        assert!(home.carousels.iter().all(|b| !b.is_empty()));
        let titles: Vec<_> = home.carousels.iter().map(|b| b.spec.title).collect();
        assert_eq!(
            titles,
            vec!["MEN'S T-SHIRTS", "MEN'S JEANS", "LADIES' SPORT", "KIDS' SELECTION", "ELITE PERFORMANCE"]
        );
    }

    #[test]
    fn test_featured_limited_to_eight() {
        let products: Vec<Product> = (0..12)
            .map(|i| {
                let mut p = product(&format!("f{}", i), "shirt");
                p.featured = true;
                p
            })
            .collect();
        let home = HomeSections::split(&products);
        assert_eq!(home.featured.len(), FEATURED_LIMIT);
        assert_eq!(home.featured[0].id.as_str(), "f0");
    }

    #[test]
    fn test_splitting_does_not_mutate_source() {
        let products = sample();
        let before = products.clone();
        let _ = HomeSections::split(&products);
        let _ = all_buckets(&products);
        assert_eq!(products, before);
    }

    #[test]
    fn test_grid_mode_for_category_route() {
        let page = ProductPage {
            products: sample(),
            page: 2,
            pages: 3,
            total: 30,
        };
        let route = RouteParams::category("jeans").with_page(2);
        match present(&page, &route) {
            Presentation::Grid(grid) => {
                assert_eq!(grid.heading, "Men's Jeans");
                assert_eq!(grid.products.len(), 6);
                assert_eq!(grid.page_link(3), "/category/jeans/page/3");
                let pager = grid.pager(5);
                assert_eq!(pager.len(), 3);
                assert!(pager[1].2);
            }
            Presentation::Home(_) => panic!("expected grid"),
        }
    }

    #[test]
    fn test_home_route_is_carousels() {
        let page = ProductPage {
            products: sample(),
            ..ProductPage::default()
        };
        assert!(matches!(present(&page, &RouteParams::home()), Presentation::Home(_)));
    }

    #[test]
    fn test_later_home_pages_are_carousels() {
        let page = ProductPage {
            products: sample(),
            page: 2,
            pages: 2,
            total: 300,
        };
        let route = RouteParams::home().with_page(2);
        assert!(matches!(present(&page, &route), Presentation::Home(_)));

        let query = crate::search::CatalogQuery::build(&crate::search::FilterState::default(), &route);
        assert_eq!(query.page_number, 2);
        assert_eq!(query.page_size, Some(crate::search::HOMEPAGE_PAGE_SIZE));
    }

    #[test]
    fn test_page_links() {
        assert_eq!(page_link(&RouteParams::search("denim"), 2), "/search/denim/page/2");
        assert_eq!(page_link(&RouteParams::category("shirt"), 4), "/category/shirt/page/4");
        assert_eq!(page_link(&RouteParams::home(), 3), "/page/3");
    }

    #[test]
    fn test_single_page_grid_has_no_pager() {
        let page = ProductPage {
            products: sample(),
            ..ProductPage::default()
        };
        let grid = GridView::new(&page, &RouteParams::search("tee"));
        assert!(grid.pager(5).is_empty());
        assert_eq!(grid.heading, "Results for \"tee\"");
    }
}
