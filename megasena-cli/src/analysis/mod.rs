pub mod sampler;

use megasena_db::models::{MAX_NUMBER_VALUE, NumberSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Vec<u32>,
}

impl FrequencyTable {
    pub fn count(&self, number: u8) -> u32 {
        match number {
            1..=MAX_NUMBER_VALUE => self.counts[(number - 1) as usize],
            _ => 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Quantidade de números que já apareceram ao menos uma vez.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| ((i + 1) as u8, c))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyEntry {
    pub number: u8,
    pub frequency: u32,
    pub percentage: f64,
}

pub fn compute_frequency(history: &[NumberSet]) -> FrequencyTable {
    let mut counts = vec![0u32; MAX_NUMBER_VALUE as usize];
    for set in history {
        for &n in set.numbers() {
            counts[(n - 1) as usize] += 1;
        }
    }
    FrequencyTable { counts }
}

/// Os `n` números mais frequentes. Empates são desfeitos pelo menor número;
/// números que nunca saíram não entram no ranking.
pub fn top_n(table: &FrequencyTable, n: usize) -> Vec<u8> {
    let mut ranked: Vec<(u8, u32)> = table.iter().filter(|&(_, c)| c > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(n).map(|(number, _)| number).collect()
}

pub fn percentage_of(table: &FrequencyTable, number: u8, total_occurrences: u32) -> f64 {
    if total_occurrences == 0 {
        return 0.0;
    }
    let pct = table.count(number) as f64 / total_occurrences as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

pub fn ranked_frequencies(history: &[NumberSet], n: usize) -> Vec<FrequencyEntry> {
    let table = compute_frequency(history);
    let total = table.total();
    top_n(&table, n)
        .into_iter()
        .map(|number| FrequencyEntry {
            number,
            frequency: table.count(number),
            percentage: percentage_of(&table, number, total),
        })
        .collect()
}
