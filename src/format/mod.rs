//! Output formatting for catalog results (table, JSON, markdown, CSV).

use crate::amazon::{BrowseNode, BrowseNodeLookupResponse, ItemSearchResponse, Product};
use crate::config::OutputFormat;
use serde::Serialize;

/// Formats catalog results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => json(product),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => json(&products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats one page of search results, with totals where the format allows.
    pub fn format_search(&self, response: &ItemSearchResponse) -> String {
        match self.format {
            OutputFormat::Json => json(response),
            OutputFormat::Csv => self.format_products(&response.products),
            OutputFormat::Table | OutputFormat::Markdown => format!(
                "{}\n\nPage results: {} of {} total ({} pages)",
                self.format_products(&response.products),
                response.count(),
                response.total_results,
                response.total_pages
            ),
        }
    }

    /// Formats a browse node with its ancestors and children.
    pub fn format_browse(&self, response: &BrowseNodeLookupResponse) -> String {
        match self.format {
            OutputFormat::Json => json(response),
            OutputFormat::Table => response.to_string(),
            OutputFormat::Markdown => self.markdown_browse(response),
            OutputFormat::Csv => self.csv_browse(response),
        }
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ASIN:     {}", product.asin));
        lines.push(format!("Title:    {}", product.title));
        lines.push(format!("Category: {}", product.category));
        lines.push(format!("URL:      {}", product.detail_url));

        if let Some(author) = &product.author {
            lines.push(format!("Author:   {}", author));
        }
        if !product.artists.is_empty() {
            lines.push(format!("Artists:  {}", product.artists.join(", ")));
        }
        if !product.actors.is_empty() {
            lines.push(format!("Actors:   {}", product.actors.join(", ")));
        }

        lines.push(format!("Price:    {}", price_text(product)));
        lines.push(format!("Rank:     {}", product.sales_rank.as_deref().unwrap_or("N/A")));

        if let Some(image) = product
            .large_image_url
            .as_ref()
            .or(product.medium_image_url.as_ref())
            .or(product.small_image_url.as_ref())
        {
            lines.push(format!("Image:    {}", image));
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let asin_width = 10;
        let category_width = 14;
        let price_width = 10;
        let rank_width = 10;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<asin_width$}  {:<category_width$}  {:<price_width$}  {:<rank_width$}  {}",
            "ASIN", "Category", "Price", "Rank", "Title"
        ));
        lines.push(format!(
            "{:-<asin_width$}  {:-<category_width$}  {:-<price_width$}  {:-<rank_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        for product in products {
            lines.push(format!(
                "{:<asin_width$}  {:<category_width$}  {:>price_width$}  {:>rank_width$}  {}",
                product.asin,
                truncate(&product.category, category_width),
                price_text(product),
                product.sales_rank.as_deref().unwrap_or("N/A"),
                truncate(&product.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.title));
        lines.push(String::new());

        lines.push(format!("- **ASIN:** {}", product.asin));
        lines.push(format!("- **Category:** {}", product.category));
        lines.push(format!("- **URL:** [View on Amazon]({})", product.detail_url));

        if let Some(author) = &product.author {
            lines.push(format!("- **Author:** {}", author));
        }
        if !product.artists.is_empty() {
            lines.push(format!("- **Artists:** {}", product.artists.join(", ")));
        }
        if !product.actors.is_empty() {
            lines.push(format!("- **Actors:** {}", product.actors.join(", ")));
        }
        if product.lowest_new_price.is_some() {
            lines.push(format!("- **Lowest new price:** {}", price_text(product)));
        }
        if let Some(rank) = &product.sales_rank {
            lines.push(format!("- **Sales rank:** {}", rank));
        }
        if let Some(image) = &product.medium_image_url {
            lines.push(String::new());
            lines.push(format!("![{}]({})", product.title, image));
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| ASIN | Category | Price | Rank | Title |".to_string());
        lines.push("|------|----------|------:|-----:|-------|".to_string());

        for product in products {
            lines.push(format!(
                "| {} | {} | {} | {} | [{}]({}) |",
                product.asin,
                product.category,
                price_text(product),
                product.sales_rank.as_deref().unwrap_or("N/A"),
                truncate(&product.title, 60).replace('|', "\\|"),
                product.detail_url
            ));
        }

        lines.join("\n")
    }

    fn markdown_browse(&self, response: &BrowseNodeLookupResponse) -> String {
        let mut lines = vec![format!("## {} ({})", response.node.name, response.node.node_id)];

        for (heading, nodes) in [("Ancestors", &response.ancestors), ("Children", &response.children)] {
            lines.push(String::new());
            lines.push(format!("### {}", heading));
            if nodes.is_empty() {
                lines.push("_None_".to_string());
            }
            lines.extend(nodes.iter().map(|node| format!("- {} ({})", node.name, node.node_id)));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "asin,title,category,author,lowest_new_price,sales_rank,detail_url,image_url".to_string()
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = vec![self.csv_header()];

        for product in products {
            lines.push(format!(
                "{},{},{},{},{},{},{},{}",
                product.asin,
                csv_escape(&product.title),
                csv_escape(&product.category),
                csv_escape(product.author.as_deref().unwrap_or("")),
                product.lowest_new_price.map(|p| p.to_string()).unwrap_or_default(),
                csv_escape(product.sales_rank.as_deref().unwrap_or("")),
                csv_escape(&product.detail_url),
                csv_escape(product.medium_image_url.as_deref().unwrap_or(""))
            ));
        }

        lines.join("\n")
    }

    fn csv_browse(&self, response: &BrowseNodeLookupResponse) -> String {
        let row = |relation: &str, node: &BrowseNode| {
            format!(
                "{},{},{},{}",
                relation,
                node.node_id,
                csv_escape(&node.name),
                node.category_root.map(|r| r.to_string()).unwrap_or_default()
            )
        };

        let mut lines = vec!["relation,node_id,name,category_root".to_string(), row("node", &response.node)];
        lines.extend(response.ancestors.iter().map(|n| row("ancestor", n)));
        lines.extend(response.children.iter().map(|n| row("child", n)));
        lines.join("\n")
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn price_text(product: &Product) -> String {
    match product.lowest_new_price {
        Some(price) => format!("{:.2}", price),
        None => "N/A".to_string(),
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn make_product() -> Product {
        Product {
            asin: "0307277674".to_string(),
            detail_url: "https://www.amazon.com/dp/0307277674".to_string(),
            category: "Book".to_string(),
            title: "Stumbling on Happiness".to_string(),
            author: Some("Daniel Gilbert".to_string()),
            lowest_new_price: Some(Decimal::new(1099, 2)),
            medium_image_url: Some("https://images.example.com/m.jpg".to_string()),
            sales_rank: Some("5123".to_string()),
            ..Product::default()
        }
    }

    fn make_minimal_product() -> Product {
        Product {
            asin: "B00KINDLE1".to_string(),
            detail_url: "https://www.amazon.com/dp/B00KINDLE1".to_string(),
            category: "eBooks".to_string(),
            title: "Kindle Edition, Volume \"One\"".to_string(),
            ..Product::default()
        }
    }

    fn make_browse() -> BrowseNodeLookupResponse {
        let node = |id, name: &str| BrowseNode { node_id: id, name: name.to_string(), category_root: None };
        BrowseNodeLookupResponse {
            request_id: "req".to_string(),
            is_valid: true,
            node: node(17, "Literature & Fiction"),
            ancestors: vec![node(1000, "Subjects")],
            children: vec![node(10, "Classics"), node(11, "Poetry")],
        }
    }

    #[test]
    fn test_json_single_product() {
        let output = Formatter::new(OutputFormat::Json).format_product(&make_product());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["asin"], "0307277674");
        assert_eq!(parsed["author"], "Daniel Gilbert");
        assert!(parsed["large_image_url"].is_null());
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_products(&[]), "[]");
    }

    #[test]
    fn test_table_single_product() {
        let output = Formatter::new(OutputFormat::Table).format_product(&make_product());
        assert!(output.contains("ASIN:     0307277674"));
        assert!(output.contains("Author:   Daniel Gilbert"));
        assert!(output.contains("Price:    10.99"));
        assert!(output.contains("Rank:     5123"));
        assert!(output.contains("Image:    https://images.example.com/m.jpg"));
    }

    #[test]
    fn test_table_single_minimal_product() {
        let output = Formatter::new(OutputFormat::Table).format_product(&make_minimal_product());
        assert!(output.contains("Price:    N/A"));
        assert!(output.contains("Rank:     N/A"));
        assert!(!output.contains("Author:"));
        assert!(!output.contains("Image:"));
    }

    #[test]
    fn test_table_multiple_products() {
        let output = Formatter::new(OutputFormat::Table)
            .format_products(&[make_product(), make_minimal_product()]);
        assert!(output.contains("ASIN"));
        assert!(output.contains("0307277674"));
        assert!(output.contains("B00KINDLE1"));
        assert!(output.contains("Total: 2 products"));
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(Formatter::new(OutputFormat::Table).format_products(&[]), "No products found.");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_markdown_single_product() {
        let output = Formatter::new(OutputFormat::Markdown).format_product(&make_product());
        assert!(output.starts_with("## Stumbling on Happiness"));
        assert!(output.contains("- **Lowest new price:** 10.99"));
        assert!(output.contains("![Stumbling on Happiness](https://images.example.com/m.jpg)"));
    }

    #[test]
    fn test_markdown_products_escape_pipes() {
        let mut product = make_minimal_product();
        product.title = "A | B".to_string();
        let output = Formatter::new(OutputFormat::Markdown).format_products(&[product]);
        assert!(output.contains("A \\| B"));
    }

    #[test]
    fn test_csv_products() {
        let output = Formatter::new(OutputFormat::Csv)
            .format_products(&[make_product(), make_minimal_product()]);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0307277674,Stumbling on Happiness,Book,Daniel Gilbert,10.99,5123,"));
        assert!(lines[2].contains("\"Kindle Edition, Volume \"\"One\"\"\""));
    }

    #[test]
    fn test_csv_empty() {
        let output = Formatter::new(OutputFormat::Csv).format_products(&[]);
        assert!(output.starts_with("asin,title"));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_format_search_totals() {
        let response = ItemSearchResponse {
            request_id: "req".to_string(),
            is_valid: true,
            total_results: 42,
            total_pages: 5,
            products: vec![make_product()],
        };
        let output = Formatter::new(OutputFormat::Table).format_search(&response);
        assert!(output.contains("Page results: 1 of 42 total (5 pages)"));

        let output = Formatter::new(OutputFormat::Json).format_search(&response);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["total_pages"], 5);
    }

    #[test]
    fn test_format_browse_all_formats() {
        let response = make_browse();

        let table = Formatter::new(OutputFormat::Table).format_browse(&response);
        assert!(table.starts_with("Literature & Fiction (17)"));

        let markdown = Formatter::new(OutputFormat::Markdown).format_browse(&response);
        assert!(markdown.contains("### Ancestors\n- Subjects (1000)"));
        assert!(markdown.contains("- Poetry (11)"));

        let csv = Formatter::new(OutputFormat::Csv).format_browse(&response);
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.contains("child,10,Classics,"));

        let json = Formatter::new(OutputFormat::Json).format_browse(&response);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["children"].as_array().unwrap().len(), 2);
    }
}
