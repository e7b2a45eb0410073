use std::path::PathBuf;

/// One abbreviation code and the full label it expands to.
#[derive(Debug, Clone)]
pub struct Abbreviation {
    pub code: String,
    pub label: String,
}

impl Abbreviation {
    pub fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// Immutable pipeline configuration, passed by reference into each stage.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Landing page listing the published annex documents.
    pub landing_url: String,
    /// Host prefixed onto relative annex links.
    pub base_host: String,
    /// Substring that identifies the annex link among all page links.
    pub link_marker: String,
    /// Lowercased file extensions accepted for the annex document.
    pub allowed_extensions: Vec<String>,
    pub download_dir: PathBuf,
    pub output_dir: PathBuf,
    pub annex_filename: String,
    pub csv_filename: String,
    /// Canonical column names every output row conforms to, in order.
    pub expected_columns: Vec<String>,
    /// Code cells in the columns named by each label expand to that label.
    pub abbreviations: Vec<Abbreviation>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            landing_url: "https://www.gov.br/ans/pt-br/acesso-a-informacao/\
                          participacao-da-sociedade/atualizacao-do-rol-de-procedimentos"
                .to_string(),
            base_host: "https://www.gov.br".to_string(),
            link_marker: "Anexo_I".to_string(),
            allowed_extensions: vec![".pdf".to_string(), ".xlsx".to_string()],
            download_dir: PathBuf::from("downloads"),
            output_dir: PathBuf::from("output"),
            annex_filename: "Anexo_I.pdf".to_string(),
            csv_filename: "Rol_Procedimentos.csv".to_string(),
            expected_columns: [
                "PROCEDIMENTO",
                "RN_alteracao",
                "VIGENCIA",
                "Seg. Odontológica",
                "Seg. Ambulatorial",
                "HCO",
                "HSO",
                "REF",
                "PAC",
                "DUT",
                "SUBGRUPO",
                "GRUPO",
                "CAPITULO",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            abbreviations: vec![
                Abbreviation::new("OD", "Seg. Odontológica"),
                Abbreviation::new("AMB", "Seg. Ambulatorial"),
            ],
        }
    }
}
