use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

/// Fetch the landing page HTML listing the published annex documents.
pub async fn fetch_landing_page(client: &Client, cfg: &PipelineConfig) -> Result<String> {
    let html = client
        .get(&cfg.landing_url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(html)
}

/// Returns the first link, in document order, whose href contains the
/// configured marker and ends with an allowed extension. Relative hrefs are
/// joined onto the configured base host. The match is on the href itself,
/// not the anchor text.
pub fn find_annex_url(html: &str, cfg: &PipelineConfig) -> Result<String> {
    let selector = Selector::parse("a[href]").expect("CSS selector for links should be valid");
    let base = Url::parse(&cfg.base_host)?;
    let document = Html::parse_document(html);

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.contains(&cfg.link_marker) {
            continue;
        }
        let lower = href.to_lowercase();
        if !cfg
            .allowed_extensions
            .iter()
            .any(|ext| lower.ends_with(ext))
        {
            continue;
        }
        let url = if href.starts_with("http") {
            href.to_string()
        } else {
            base.join(href)?.to_string()
        };
        info!(url = %url, "annex link located");
        return Ok(url);
    }

    Err(Error::LocatorNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_annex_link_is_made_absolute() {
        let cfg = PipelineConfig::default();
        let html = r#"<html><body>
            <a href="/sobre">Sobre</a>
            <a href="/arquivo/Anexo_I_Rol.pdf">Anexo I</a>
        </body></html>"#;
        let url = find_annex_url(html, &cfg).unwrap();
        assert_eq!(url, "https://www.gov.br/arquivo/Anexo_I_Rol.pdf");
    }

    #[test]
    fn absolute_links_are_returned_untouched() {
        let cfg = PipelineConfig::default();
        let html = r#"<a href="https://cdn.gov.br/Anexo_I_2021.xlsx">planilha</a>"#;
        let url = find_annex_url(html, &cfg).unwrap();
        assert_eq!(url, "https://cdn.gov.br/Anexo_I_2021.xlsx");
    }

    #[test]
    fn first_qualifying_link_in_document_order_wins() {
        let cfg = PipelineConfig::default();
        let html = r#"
            <a href="/paginas/Anexo_I.html">pagina</a>
            <a href="/docs/rol_completo.pdf">rol</a>
            <a href="/docs/Anexo_I_v1.pdf">v1</a>
            <a href="/docs/Anexo_I_v2.pdf">v2</a>
        "#;
        let url = find_annex_url(html, &cfg).unwrap();
        assert_eq!(url, "https://www.gov.br/docs/Anexo_I_v1.pdf");
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let cfg = PipelineConfig::default();
        let html = r#"<a href="/docs/Anexo_I.PDF">anexo</a>"#;
        let url = find_annex_url(html, &cfg).unwrap();
        assert_eq!(url, "https://www.gov.br/docs/Anexo_I.PDF");
    }

    #[test]
    fn missing_link_is_a_locator_error() {
        let cfg = PipelineConfig::default();
        let html = r#"
            <a href="/docs/rol_completo.pdf">rol</a>
            <a href="/docs/Anexo_2.pdf">outro anexo</a>
        "#;
        assert!(matches!(
            find_annex_url(html, &cfg),
            Err(Error::LocatorNotFound)
        ));
    }

    #[test]
    fn marker_matches_as_a_plain_substring() {
        // "Anexo_I" is contained in "Anexo_II", so that link qualifies too
        let cfg = PipelineConfig::default();
        let html = r#"<a href="/docs/Anexo_II.pdf">anexo dois</a>"#;
        let url = find_annex_url(html, &cfg).unwrap();
        assert_eq!(url, "https://www.gov.br/docs/Anexo_II.pdf");
    }
}
