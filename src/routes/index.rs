use axum::response::Html;

const TITLE: &str = "Calorie Tracker";

pub async fn landing_page() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>{TITLE}</title>
  </head>
  <body>
    <h1>{TITLE}</h1>
    <p>Welcome to {TITLE}</p>
    <ul>
      <li><code>POST /addcalories</code> record a meal</li>
      <li><code>GET /report?user_id=&amp;year=&amp;month=</code> monthly report by category</li>
      <li><code>GET /about</code> developers</li>
    </ul>
  </body>
</html>
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn landing_page_has_title() {
        let Html(page) = landing_page().await;
        assert!(page.contains("<title>Calorie Tracker</title>"));
    }
}
