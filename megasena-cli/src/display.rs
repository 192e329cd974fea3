use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use megasena_db::models::NumberSet;

use crate::analysis::FrequencyEntry;
use crate::analysis::sampler::GeneratedBatch;
use crate::app::Ui;

pub fn format_number(n: u8) -> String {
    format!("{:02}", n)
}

fn numbers_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn history_table(history: &[NumberSet]) -> Table {
    let mut table = numbers_table(vec!["#", "Números"]);
    // Do mais recente ao mais antigo
    for (i, set) in history.iter().enumerate().rev() {
        table.add_row(vec![(i + 1).to_string(), set.to_string()]);
    }
    table
}

pub fn frequency_table(entries: &[FrequencyEntry]) -> Table {
    let mut table = numbers_table(vec!["Número", "Frequência", "%"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(format_number(entry.number)),
            Cell::new(entry.frequency.to_string()),
            Cell::new(format!("{:.2}%", entry.percentage)),
        ]);
    }
    table
}

pub fn batch_table(batch: &GeneratedBatch) -> Table {
    let mut table = numbers_table(vec!["#", "Números"]);
    for (i, set) in batch.sets.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(set.to_string()).fg(Color::Green),
        ]);
    }
    table
}

#[derive(Debug, Default)]
pub struct TerminalUi;

impl Ui for TerminalUi {
    fn notify_success(&mut self, message: &str) {
        println!("✔ {message}");
    }

    fn notify_error(&mut self, message: &str) {
        eprintln!("✘ {message}");
    }

    fn render_history(&mut self, history: &[NumberSet]) {
        println!("\n📜 Histórico ({} conjuntos)\n", history.len());
        if history.is_empty() {
            println!("Nenhum conjunto no histórico. Adicione um conjunto ou importe um arquivo.");
            return;
        }
        println!("{}", history_table(history));
    }

    fn render_frequency_list(&mut self, entries: &[FrequencyEntry]) {
        println!("\n📊 Números mais prováveis\n");
        if entries.is_empty() {
            println!("Nenhum número provável ainda. Adicione conjuntos ao histórico.");
            return;
        }
        println!("{}", frequency_table(entries));
    }

    fn render_generated_batch(&mut self, batch: &GeneratedBatch) {
        println!("\n🎲 Conjuntos gerados ({}/{})\n", batch.sets.len(), batch.requested);
        if batch.sets.is_empty() {
            return;
        }
        println!("{}", batch_table(batch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1), "01");
        assert_eq!(format_number(10), "10");
        assert_eq!(format_number(60), "60");
    }

    #[test]
    fn test_history_table_newest_first() {
        let history = vec![
            NumberSet::new(&[1, 2, 3, 4, 5, 6]).unwrap(),
            NumberSet::new(&[7, 8, 9, 10, 11, 12]).unwrap(),
        ];
        let rendered = history_table(&history).to_string();
        let newest = rendered.find("07, 08, 09, 10, 11, 12").unwrap();
        let oldest = rendered.find("01, 02, 03, 04, 05, 06").unwrap();
        assert!(newest < oldest);
    }

    #[test]
    fn test_frequency_table_shows_percentage() {
        let entries = vec![FrequencyEntry {
            number: 7,
            frequency: 3,
            percentage: 16.67,
        }];
        let rendered = frequency_table(&entries).to_string();
        assert!(rendered.contains("07"));
        assert!(rendered.contains("16.67%"));
    }
}
