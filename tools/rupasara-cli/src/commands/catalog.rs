//! Catalog browsing commands.

use anyhow::Result;
use rupasara_commerce::catalog::{CatalogIndex, Category, StyleFilter};
use rupasara_commerce::currency::CurrencyService;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{CatalogArgs, CategoryArgs};
use crate::context::Context;
use crate::output::muted;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let currency = ctx.currency_service()?;
    print_overview(&catalog, &currency, args.products, ctx);
    Ok(())
}

/// Run the category command.
pub async fn run_category(args: CategoryArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let currency = ctx.currency_service()?;

    if args.refresh {
        let spinner = ctx.output.spinner("Updating rates…");
        let refreshed = currency.refresh_rates(ctx.rate_source()?.as_ref()).await;
        spinner.finish_and_clear();
        if let Err(e) = refreshed {
            ctx.output.warn(&format!("Using built-in rates: {}", e));
        }
    }

    let filter = args
        .style
        .as_deref()
        .map(StyleFilter::parse)
        .unwrap_or_default();

    match catalog.find_category(&args.slug) {
        Some(category) => print_category(category, &filter, &currency, ctx),
        None => {
            ctx.output
                .warn(&format!("No category '{}'. Showing the catalog.", args.slug));
            print_overview(&catalog, &currency, false, ctx);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct GroupSummary<'a> {
    label: &'a str,
    anchor: String,
    categories: Vec<CategorySummary<'a>>,
}

#[derive(Serialize)]
struct CategorySummary<'a> {
    slug: &'a str,
    name: &'a str,
    products: usize,
}

#[derive(Serialize)]
struct CategoryListing<'a> {
    slug: &'a str,
    name: &'a str,
    description: &'a str,
    styles: &'a [String],
    filter: String,
    currency: String,
    products: Vec<ProductLine<'a>>,
}

#[derive(Serialize)]
struct ProductLine<'a> {
    id: &'a str,
    title: &'a str,
    style: &'a str,
    base_price: Decimal,
    price: String,
}

/// Print groups and their categories.
pub fn print_overview(
    catalog: &CatalogIndex,
    currency: &CurrencyService,
    with_products: bool,
    ctx: &Context,
) {
    if ctx.output.is_json() {
        let groups: Vec<_> = catalog
            .groups()
            .iter()
            .map(|group| GroupSummary {
                label: &group.label,
                anchor: group.anchor(),
                categories: group
                    .categories
                    .iter()
                    .map(|c| CategorySummary {
                        slug: c.slug.as_str(),
                        name: &c.name,
                        products: c.products.len(),
                    })
                    .collect(),
            })
            .collect();
        ctx.output.json(&groups);
        return;
    }

    for group in catalog.groups() {
        ctx.output.header(&group.label);
        for category in &group.categories {
            let count = match category.products.len() {
                0 => "coming soon".to_string(),
                1 => "1 saree".to_string(),
                n => format!("{} sarees", n),
            };
            ctx.output.list_item(&format!(
                "{} {} {}",
                category.name,
                muted(&format!("[{}]", category.slug)),
                muted(&count)
            ));
            if with_products {
                for product in &category.products {
                    ctx.output.product_line(product, currency);
                }
            }
        }
    }

    ctx.output.info(&format!(
        "Prices in {}. Browse with `rupasara category <slug>`.",
        currency.currency()
    ));
}

/// Print one category's products passing `filter`.
pub fn print_category(
    category: &Category,
    filter: &StyleFilter,
    currency: &CurrencyService,
    ctx: &Context,
) {
    let products = category.filter(filter);

    if ctx.output.is_json() {
        ctx.output.json(&CategoryListing {
            slug: category.slug.as_str(),
            name: &category.name,
            description: &category.description,
            styles: &category.styles,
            filter: filter.to_string(),
            currency: currency.currency().to_string(),
            products: products
                .iter()
                .map(|p| ProductLine {
                    id: p.id.as_str(),
                    title: &p.title,
                    style: &p.style,
                    base_price: p.price,
                    price: currency.format(p.price),
                })
                .collect(),
        });
        return;
    }

    ctx.output.header(&category.name);
    if !category.description.is_empty() {
        ctx.output.text(&muted(&category.description));
    }

    let chips: Vec<String> = category
        .filter_options()
        .iter()
        .map(|option| {
            if option == filter {
                format!("[{}]", option)
            } else {
                option.to_string()
            }
        })
        .collect();
    ctx.output.kv("Styles", &chips.join("  "));

    if products.is_empty() {
        ctx.output.info("No sarees here yet.");
        return;
    }

    ctx.output.products(&products, currency);
}
