//! 产品 HTML 视图

use super::model::Product;

const CURRENCY: &str = "₹";

/// 首页：列出可浏览的路由
pub fn landing_page() -> String {
    r#"
    <h1>Welcome to Product API</h1>
    <p>Try these:</p>
    <ul>
      <li><a href="/output">/output</a> – View all products (HTML)</li>
      <li><a href="/products">/products</a> – View all products (JSON)</li>
      <li><a href="/products/instock">/products/instock</a> – View in-stock products</li>
    </ul>
  "#
    .to_string()
}

/// 产品表格，每行一个产品
pub fn product_table(products: &[Product]) -> String {
    let mut html = String::from(
        r#"
    <h2>Product List</h2>
    <table border="1" cellpadding="8">
      <tr><th>ID</th><th>Name</th><th>Price</th><th>In Stock</th></tr>
  "#,
    );

    for p in products {
        html.push_str(&format!(
            r#"
      <tr>
        <td>{}</td>
        <td>{}</td>
        <td>{}{}</td>
        <td>{}</td>
      </tr>"#,
            p.id,
            escape_html(&p.name),
            CURRENCY,
            p.price,
            stock_label(p.in_stock)
        ));
    }

    html.push_str("</table>");
    html
}

fn stock_label(in_stock: bool) -> &'static str {
    if in_stock {
        "✅ Yes"
    } else {
        "❌ No"
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::products::model::seed_products;

    #[test]
    fn test_landing_page_links() {
        let html = landing_page();
        assert!(html.contains("Welcome to Product API"));
        for route in ["/output", "/products", "/products/instock"] {
            assert!(html.contains(&format!(r#"href="{}""#, route)));
        }
    }

    #[test]
    fn test_product_table_rows() {
        let mut products = seed_products();
        products[1].in_stock = false;
        let html = product_table(&products);

        assert!(html.contains("<h2>Product List</h2>"));
        assert!(html.contains("<td>Laptop</td>"));
        assert!(html.contains("<td>₹60000</td>"));
        assert!(html.contains("<td>₹800</td>"));
        assert!(html.contains("✅ Yes"));
        assert!(html.contains("❌ No"));
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.ends_with("</table>"));
    }

    #[test]
    fn test_names_are_escaped() {
        let products = vec![Product::new(1, "<b>Bold</b> & co", 1, true)];
        let html = product_table(&products);
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; co"));
        assert!(!html.contains("<b>"));
    }
}
