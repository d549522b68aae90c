use super::draft::RegistrationDraft;
use serde::{Deserialize, Deserializer, Serialize};

/// Remote rows are loosely typed: numbers, booleans and nulls are all
/// read back as text.
pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(match v {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

pub(crate) fn lenient_opt_string<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<String>, D::Error> {
    let s = lenient_string(d)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

/// The sixteen upper-case fields shared by the submit payload and the
/// history rows returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursFields {
    #[serde(rename = "OPERADOR_MATRICULA", deserialize_with = "lenient_string")]
    pub operador_matricula: String,
    #[serde(rename = "LOCAL_SERVICO", deserialize_with = "lenient_string")]
    pub local_servico: String,
    #[serde(rename = "RA", deserialize_with = "lenient_string")]
    pub ra: String,
    #[serde(rename = "COMUNIDADE", deserialize_with = "lenient_string")]
    pub comunidade: String,
    #[serde(rename = "PROCESSO", deserialize_with = "lenient_string")]
    pub processo: String,
    #[serde(rename = "DATA", deserialize_with = "lenient_string")]
    pub data: String,
    #[serde(rename = "MAQUINA_PREFIXO", deserialize_with = "lenient_string")]
    pub maquina_prefixo: String,
    #[serde(rename = "IMPLEMENTO_PREFIXO", deserialize_with = "lenient_string")]
    pub implemento_prefixo: String,
    #[serde(rename = "HORIMETRO_INICIAL", deserialize_with = "lenient_string")]
    pub horimetro_inicial: String,
    #[serde(rename = "HORIMETRO_FINAL", deserialize_with = "lenient_string")]
    pub horimetro_final: String,
    #[serde(rename = "HORA_FINAL", deserialize_with = "lenient_string")]
    pub hora_final: String,
    #[serde(rename = "TOTAL_SERVICO", deserialize_with = "lenient_string")]
    pub total_servico: String,
    #[serde(rename = "ABASTECIMENTO", deserialize_with = "lenient_string")]
    pub abastecimento: String,
    #[serde(rename = "OBSERVACAO", deserialize_with = "lenient_string")]
    pub observacao: String,
    #[serde(rename = "OPERADOR_NOME", deserialize_with = "lenient_string")]
    pub operador_nome: String,
    /// Comma-joined ids of the selected services. The key spelling is the
    /// one the service expects.
    #[serde(rename = "SEVICO_REALIZADO", deserialize_with = "lenient_string")]
    pub sevico_realizado: String,
}

impl From<&RegistrationDraft> for HoursFields {
    fn from(d: &RegistrationDraft) -> Self {
        Self {
            operador_matricula: d.matricula.clone(),
            local_servico: d.local_servico.clone(),
            ra: d.ra_signla.clone(),
            comunidade: d.comunidade.clone(),
            processo: d.processo.clone(),
            data: d.data.clone(),
            maquina_prefixo: d.prefixo_maquina.clone(),
            implemento_prefixo: d.prefixo_implementos.clone(),
            horimetro_inicial: d.horimetro_inicial.clone(),
            horimetro_final: d.horimetro_final.clone(),
            hora_final: d.hora_fim.clone(),
            total_servico: d.total_servico.clone(),
            abastecimento: d.abastecimento.clone(),
            observacao: d.observacoes.clone(),
            operador_nome: d.operador.clone(),
            sevico_realizado: d.services_csv(),
        }
    }
}

/// A submitted work session, as listed by the history views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursRecord {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: HoursFields,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "lenient_opt_string"
    )]
    pub created_at: Option<String>,
}

impl HoursRecord {
    /// Case-insensitive substring on operator name, matricula or location.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        let f = &self.fields;
        f.operador_nome.to_lowercase().contains(&q)
            || f.operador_matricula.to_lowercase().contains(&q)
            || f.local_servico.to_lowercase().contains(&q)
    }

    pub fn on_date(&self, date: &str) -> bool {
        self.fields.data == date.trim()
    }
}

/// Local backup copy of a submitted draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    pub id: String,
    #[serde(flatten)]
    pub draft: RegistrationDraft,
    pub created_at: String,
    pub rht_status: bool,
}

impl From<&BackupRecord> for HoursRecord {
    fn from(b: &BackupRecord) -> Self {
        Self {
            id: Some(b.id.clone()),
            fields: HoursFields::from(&b.draft),
            created_at: Some(b.created_at.clone()),
        }
    }
}
