use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use megasena_db::models::{MAX_NUMBER_VALUE, NUMBERS_PER_SET};

use crate::analysis::sampler::BatchParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub min_history: usize,
    pub pool_size: usize,
    pub sets_to_generate: usize,
    pub export_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_history: 10,
            pool_size: 30,
            sets_to_generate: 5,
            export_file: "historico_numeros.json".to_string(),
        }
    }
}

impl Settings {
    /// Lê um arquivo JSON de configuração; campos ausentes ficam com o valor padrão.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Não foi possível ler {:?}", path))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("JSON inválido em {:?}", path))?;
        settings
            .validate()
            .with_context(|| format!("Configuração inválida em {:?}", path))?;
        log::info!("Configuração carregada de {:?}", path);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let max_pool = MAX_NUMBER_VALUE as usize;
        ensure!(
            (NUMBERS_PER_SET..=max_pool).contains(&self.pool_size),
            "pool_size deve estar entre {NUMBERS_PER_SET} e {max_pool} (recebido {})",
            self.pool_size
        );
        ensure!(self.sets_to_generate > 0, "sets_to_generate deve ser maior que zero");
        Ok(())
    }

    pub fn batch_params(&self) -> BatchParams {
        BatchParams {
            batch_size: self.sets_to_generate,
            min_pool: self.pool_size,
        }
    }
}
