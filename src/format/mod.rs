//! Output formatting for price matches and catalog details (table, JSON, markdown, CSV).

use crate::catalog::{CatalogDetails, MatchResult, PriceMatches};
use crate::config::OutputFormat;

/// Flattened view of a match for tabular output.
struct PriceRow<'a> {
    sku: &'a str,
    family: &'a str,
    usage_type: &'a str,
    price: String,
    currency: &'a str,
    unit: &'a str,
    description: &'a str,
}

impl<'a> PriceRow<'a> {
    fn new(sku: &'a str, matched: &'a MatchResult) -> Self {
        let dimension = matched.first_dimension();
        let (currency, price) = dimension
            .and_then(|d| d.price_per_unit.iter().next())
            .map(|(c, p)| (c.as_str(), trim_price(p)))
            .unwrap_or(("", String::new()));

        Self {
            sku,
            family: matched.product.product_family.as_deref().unwrap_or(""),
            usage_type: matched.product.attribute("usagetype").unwrap_or(""),
            price,
            currency,
            unit: dimension.map(|d| d.unit.as_str()).unwrap_or(""),
            description: dimension.map(|d| d.description.as_str()).unwrap_or(""),
        }
    }
}

/// Drops insignificant trailing zeros from a decimal price string.
fn trim_price(price: &str) -> String {
    if !price.contains('.') {
        return price.to_string();
    }
    price.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// Formats query output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a set of price matches.
    pub fn format_prices(&self, matches: &PriceMatches) -> String {
        if matches.is_empty() {
            return match self.format {
                OutputFormat::Json => "{}".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No matching products found.".to_string(),
            };
        }

        let rows: Vec<PriceRow> = matches.iter().map(|(sku, m)| PriceRow::new(sku, m)).collect();

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(matches).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_prices(&rows),
            OutputFormat::Markdown => self.markdown_prices(&rows),
            OutputFormat::Csv => self.csv_prices(&rows),
        }
    }

    /// Formats catalog index details.
    pub fn format_details(&self, details: &CatalogDetails) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(details).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => [
                format!("  Format Version: {}", details.format_version),
                format!("Publication Date: {}", details.publication_date),
                format!("          Offers: {}", details.offers.join(", ")),
            ]
            .join("\n"),
            OutputFormat::Markdown => {
                let mut lines = vec![
                    "## Price List Catalog".to_string(),
                    String::new(),
                    format!("- **Format Version:** {}", details.format_version),
                    format!("- **Publication Date:** {}", details.publication_date),
                    format!("- **Offers:** {}", details.offers.len()),
                    String::new(),
                ];
                lines.extend(details.offers.iter().map(|o| format!("- `{}`", o)));
                lines.join("\n")
            }
            OutputFormat::Csv => {
                let mut lines = vec!["offer_code,format_version,publication_date".to_string()];
                lines.extend(details.offers.iter().map(|o| {
                    format!(
                        "{},{},{}",
                        Self::csv_escape(o),
                        Self::csv_escape(&details.format_version),
                        Self::csv_escape(&details.publication_date)
                    )
                }));
                lines.join("\n")
            }
        }
    }

    // Table formatting

    fn table_prices(&self, rows: &[PriceRow]) -> String {
        let sku_width = rows.iter().map(|r| r.sku.len()).max().unwrap_or(0).max(3);
        let family_width = rows.iter().map(|r| r.family.len()).max().unwrap_or(0).clamp(6, 20);
        let usage_width = rows.iter().map(|r| r.usage_type.len()).max().unwrap_or(0).clamp(10, 32);
        let price_width = 14;
        let unit_width = 10;
        let description_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<sku_width$}  {:<family_width$}  {:<usage_width$}  {:>price_width$}  {:<unit_width$}  {}",
            "SKU", "Family", "Usage Type", "Price", "Unit", "Description"
        ));
        lines.push(format!(
            "{:-<sku_width$}  {:-<family_width$}  {:-<usage_width$}  {:-<price_width$}  {:-<unit_width$}  {:-<description_width$}",
            "", "", "", "", "", ""
        ));

        for row in rows {
            let price = if row.price.is_empty() {
                "N/A".to_string()
            } else {
                format!("{} {}", row.price, row.currency)
            };

            lines.push(format!(
                "{:<sku_width$}  {:<family_width$}  {:<usage_width$}  {:>price_width$}  {:<unit_width$}  {}",
                row.sku,
                truncate(row.family, family_width),
                truncate(row.usage_type, usage_width),
                price,
                truncate(row.unit, unit_width),
                truncate(row.description, description_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", rows.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_prices(&self, rows: &[PriceRow]) -> String {
        let mut lines = Vec::new();

        lines.push("| SKU | Family | Usage Type | Price | Unit | Description |".to_string());
        lines.push("|-----|--------|------------|-------|------|-------------|".to_string());

        for row in rows {
            let price = if row.price.is_empty() {
                "N/A".to_string()
            } else {
                format!("{} {}", row.price, row.currency)
            };

            lines.push(format!(
                "| `{}` | {} | {} | {} | {} | {} |",
                row.sku,
                row.family,
                row.usage_type,
                price,
                row.unit,
                row.description.replace('|', "\\|")
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", rows.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "sku,product_family,usage_type,price,currency,unit,description".to_string()
    }

    fn csv_prices(&self, rows: &[PriceRow]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for row in rows {
            lines.push(format!(
                "{},{},{},{},{},{},{}",
                row.sku,
                Self::csv_escape(row.family),
                Self::csv_escape(row.usage_type),
                row.price,
                row.currency,
                Self::csv_escape(row.unit),
                Self::csv_escape(row.description)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
