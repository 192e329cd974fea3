use std::path::Path;

use rand::rngs::StdRng;

use megasena_db::db::KvStore;
use megasena_db::error::{HistoryError, ValidationError};
use megasena_db::history::HistoryStore;
use megasena_db::models::{MAX_NUMBER_VALUE, NUMBERS_PER_SET, NumberSet};

use crate::analysis::{FrequencyEntry, ranked_frequencies};
use crate::analysis::sampler::{GeneratedBatch, GenerationError, generate_from_history, make_rng};
use crate::config::Settings;
use crate::import::{read_import_file, write_export_file};

/// Interface de apresentação. Os métodos `render_*` só leem o estado.
pub trait Ui {
    fn notify_success(&mut self, message: &str);
    fn notify_error(&mut self, message: &str);
    fn render_history(&mut self, history: &[NumberSet]);
    fn render_frequency_list(&mut self, entries: &[FrequencyEntry]);
    fn render_generated_batch(&mut self, batch: &GeneratedBatch);
}

pub struct App<S: KvStore, U: Ui> {
    history: HistoryStore<S>,
    ui: U,
    settings: Settings,
    rng: StdRng,
}

impl<S: KvStore, U: Ui> App<S, U> {
    pub fn new(store: S, ui: U, settings: Settings, seed: Option<u64>) -> Self {
        Self {
            history: HistoryStore::load(store),
            ui,
            settings,
            rng: make_rng(seed),
        }
    }

    pub fn history(&self) -> &[NumberSet] {
        self.history.sets()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[cfg(test)]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn add_set(&mut self, input: &str) -> bool {
        match self.history.add_str(input) {
            Ok(set) => {
                log::info!("Conjunto adicionado: {set}");
                self.refresh();
                self.ui.notify_success("Conjunto adicionado com sucesso!");
                true
            }
            Err(e) => {
                self.report_history_error(e);
                false
            }
        }
    }

    pub fn import_text(&mut self, text: &str) -> bool {
        match self.history.import_json(text) {
            Ok(count) => {
                self.refresh();
                self.ui.notify_success(&format!(
                    "Histórico importado com sucesso! ({count} conjuntos)"
                ));
                true
            }
            Err(e) => {
                self.report_history_error(e);
                false
            }
        }
    }

    pub fn import_file(&mut self, path: &Path) -> bool {
        match read_import_file(path) {
            Ok(text) => self.import_text(&text),
            Err(e) => {
                self.ui
                    .notify_error(&format!("Erro ao ler o arquivo JSON: {e:#}"));
                false
            }
        }
    }

    pub fn export_text(&mut self) -> Option<String> {
        match self.history.export() {
            Ok(json) => Some(json),
            Err(e) => {
                self.report_history_error(e);
                None
            }
        }
    }

    pub fn export_file(&mut self, path: &Path) -> bool {
        let Some(json) = self.export_text() else {
            return false;
        };
        match write_export_file(path, &json) {
            Ok(()) => {
                self.ui.notify_success(&format!(
                    "Histórico exportado com sucesso! ({})",
                    path.display()
                ));
                true
            }
            Err(e) => {
                self.ui.notify_error(&format!("Erro ao exportar o histórico: {e:#}"));
                false
            }
        }
    }

    /// Gera o lote; um lote parcial é exibido e sinalizado como erro.
    pub fn generate(&mut self) -> Option<GeneratedBatch> {
        let result = generate_from_history(self.history.sets(), &self.settings, &mut self.rng);
        match result {
            Ok(batch) => {
                self.ui.render_generated_batch(&batch);
                if batch.is_exhausted() {
                    self.ui.notify_error(&format!(
                        "Não foi possível gerar {} conjuntos únicos com os {} mais prováveis sem repetição, \
                         devido ao esgotamento de números disponíveis ({} gerados). \
                         Considere adicionar mais histórico ou ajustar o limite de números mais prováveis.",
                        batch.requested,
                        self.settings.pool_size,
                        batch.sets.len()
                    ));
                } else {
                    self.ui.notify_success("Números gerados com sucesso!");
                }
                Some(batch)
            }
            Err(GenerationError::InsufficientHistory { required, .. }) => {
                self.ui.notify_error(&format!(
                    "É necessário ter pelo menos {required} conjuntos no histórico para gerar números significativos."
                ));
                None
            }
            Err(GenerationError::InsufficientPool { required, found }) => {
                self.ui.notify_error(&format!(
                    "Não há números suficientes no histórico para selecionar os {required} números mais prováveis \
                     ({found} distintos). Tente adicionar mais conjuntos."
                ));
                None
            }
            Err(e @ GenerationError::InvalidSet(_)) => {
                log::error!("Conjunto gerado inválido: {e}");
                self.ui.notify_error(&format!("Erro ao gerar os conjuntos: {e}"));
                None
            }
        }
    }

    pub fn show_history(&mut self) {
        self.ui.render_history(self.history.sets());
    }

    pub fn show_frequencies(&mut self) {
        let entries = ranked_frequencies(self.history.sets(), self.settings.pool_size);
        self.ui.render_frequency_list(&entries);
    }

    fn refresh(&mut self) {
        self.show_history();
        self.show_frequencies();
    }

    fn report_history_error(&mut self, err: HistoryError) {
        let message = match &err {
            HistoryError::Validation(ValidationError::DuplicateWithinSet(n)) => {
                format!("O conjunto não pode conter números repetidos ({n:02}).")
            }
            HistoryError::Validation(e) => format!(
                "Por favor, insira {NUMBERS_PER_SET} números válidos (de 1 a {MAX_NUMBER_VALUE}), \
                 separados por vírgula. Ex: 01,05,12,23,45,50 ({e})"
            ),
            HistoryError::InvalidImportEntry { .. } | HistoryError::MalformedImportFile(_) => format!(
                "Formato de arquivo JSON inválido. O arquivo deve conter um array de arrays de números \
                 (conjuntos de {NUMBERS_PER_SET} números entre 1 e {MAX_NUMBER_VALUE}). ({err})"
            ),
            HistoryError::EmptyHistory => "Não há histórico para exportar.".to_string(),
            HistoryError::Storage(e) => {
                log::error!("Falha de gravação: {e:#}");
                format!("Erro ao gravar o histórico: {e:#}")
            }
        };
        self.ui.notify_error(&message);
    }
}
