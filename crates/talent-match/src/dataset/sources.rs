use super::DatasetError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Which of the three remote documents a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Prospects,
    Applicants,
    Jobs,
}

impl SourceKind {
    pub const fn label(self) -> &'static str {
        match self {
            SourceKind::Prospects => "prospects",
            SourceKind::Applicants => "applicants",
            SourceKind::Jobs => "jobs",
        }
    }

    /// File name used when the sources are read from a local directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            SourceKind::Prospects => "prospects.json",
            SourceKind::Applicants => "applicants.json",
            SourceKind::Jobs => "vagas.json",
        }
    }
}

/// The three decoded documents. Prospects keep document order so joins are
/// reproducible.
#[derive(Debug, Default, Clone)]
pub struct RawSources {
    pub prospects: IndexMap<String, ProspectGroup>,
    pub applicants: HashMap<String, Applicant>,
    pub jobs: HashMap<String, JobPosting>,
}

impl RawSources {
    pub fn from_slices(
        prospects: &[u8],
        applicants: &[u8],
        jobs: &[u8],
    ) -> Result<Self, DatasetError> {
        Ok(Self {
            prospects: decode(SourceKind::Prospects, prospects)?,
            applicants: decode(SourceKind::Applicants, applicants)?,
            jobs: decode(SourceKind::Jobs, jobs)?,
        })
    }

    /// Reads `prospects.json`, `applicants.json` and `vagas.json` from `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        let read = |kind: SourceKind| {
            let path = dir.join(kind.file_name());
            std::fs::read(&path).map_err(|source| DatasetError::Io { path, source })
        };

        let prospects = read(SourceKind::Prospects)?;
        let applicants = read(SourceKind::Applicants)?;
        let jobs = read(SourceKind::Jobs)?;
        Self::from_slices(&prospects, &applicants, &jobs)
    }

    pub fn prospect_count(&self) -> usize {
        self.prospects
            .values()
            .map(|group| group.prospects.len())
            .sum()
    }
}

pub(crate) fn decode<T>(kind: SourceKind, bytes: &[u8]) -> Result<T, DatasetError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_slice(bytes).map_err(|source| DatasetError::Decode {
        source_name: kind.label(),
        source,
    })
}

/// Applications received by one job.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProspectGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prospects: Vec<Prospect>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Prospect {
    #[serde(default)]
    pub codigo: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub situacao_candidado: Option<String>,
}

impl Prospect {
    /// Candidate code as a string; numeric codes are stringified.
    pub fn candidate_id(&self) -> Option<String> {
        match &self.codigo {
            Value::String(code) if !code.trim().is_empty() => Some(code.trim().to_string()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Applicant {
    #[serde(default)]
    pub infos_basicas: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cv_pt: Option<String>,
}

impl Applicant {
    pub fn name(&self) -> Option<String> {
        string_at(&self.infos_basicas, "nome")
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub informacoes_basicas: Value,
    #[serde(default)]
    pub perfil_vaga: Value,
}

impl JobPosting {
    pub fn title(&self) -> Option<String> {
        string_at(&self.informacoes_basicas, "titulo_vaga")
    }

    pub fn requirements(&self) -> Option<String> {
        string_at(
            &self.perfil_vaga,
            "competencia_tecnicas_e_comportamentais",
        )
    }
}

fn string_at(object: &Value, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prospects_keep_document_order() {
        let raw = br#"{
            "9": {"prospects": [{"codigo": "1"}]},
            "2": {"prospects": []},
            "5": {"prospects": null}
        }"#;
        let prospects: IndexMap<String, ProspectGroup> =
            decode(SourceKind::Prospects, raw).expect("decodes");
        let keys: Vec<&str> = prospects.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["9", "2", "5"]);
        assert!(prospects["5"].prospects.is_empty());
    }

    #[test]
    fn candidate_codes_accept_strings_and_numbers() {
        let numeric = Prospect {
            codigo: serde_json::json!(31000),
            situacao_candidado: None,
        };
        let text = Prospect {
            codigo: serde_json::json!(" 31001 "),
            situacao_candidado: None,
        };
        let missing = Prospect::default();
        assert_eq!(numeric.candidate_id().as_deref(), Some("31000"));
        assert_eq!(text.candidate_id().as_deref(), Some("31001"));
        assert_eq!(missing.candidate_id(), None);
    }

    #[test]
    fn non_string_leaves_are_treated_as_missing() {
        let raw = br#"{
            "31000": {"infos_basicas": {"nome": 42}, "cv_pt": null},
            "31001": {"infos_basicas": null, "cv_pt": "Engenheiro"}
        }"#;
        let applicants: HashMap<String, Applicant> =
            decode(SourceKind::Applicants, raw).expect("decodes");
        assert_eq!(applicants["31000"].name(), None);
        assert_eq!(applicants["31000"].cv_pt, None);
        assert_eq!(applicants["31001"].name(), None);
        assert_eq!(applicants["31001"].cv_pt.as_deref(), Some("Engenheiro"));
    }

    #[test]
    fn malformed_document_names_its_source() {
        let error = RawSources::from_slices(b"{}", b"[1, 2", b"{}").expect_err("bad json");
        match error {
            DatasetError::Decode { source_name, .. } => assert_eq!(source_name, "applicants"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn job_fields_are_read_from_nested_sections() {
        let raw = r#"{"4530": {
            "informacoes_basicas": {"titulo_vaga": "Analista SAP"},
            "perfil_vaga": {"competencia_tecnicas_e_comportamentais": "SAP FI, inglês avançado"}
        }}"#;
        let jobs: HashMap<String, JobPosting> =
            decode(SourceKind::Jobs, raw.as_bytes()).expect("decodes");
        assert_eq!(jobs["4530"].title().as_deref(), Some("Analista SAP"));
        assert_eq!(
            jobs["4530"].requirements().as_deref(),
            Some("SAP FI, inglês avançado")
        );
    }
}
