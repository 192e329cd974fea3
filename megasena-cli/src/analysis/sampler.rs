use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use megasena_db::error::ValidationError;
use megasena_db::models::{MAX_NUMBER_VALUE, NUMBERS_PER_SET, NumberSet};

use crate::analysis::{compute_frequency, top_n};
use crate::config::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchParams {
    pub batch_size: usize,
    pub min_pool: usize,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            batch_size: 5,
            min_pool: 30,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("histórico insuficiente: {found} conjuntos, mínimo {required}")]
    InsufficientHistory { required: usize, found: usize },

    #[error("números distintos insuficientes: {found} disponíveis, {required} necessários")]
    InsufficientPool { required: usize, found: usize },

    #[error(transparent)]
    InvalidSet(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBatch {
    pub sets: Vec<NumberSet>,
    pub requested: usize,
}

impl GeneratedBatch {
    /// Verdadeiro quando os números acabaram antes de completar o lote.
    pub fn is_exhausted(&self) -> bool {
        self.sets.len() < self.requested
    }
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Sorteia `batch_size` conjuntos disjuntos a partir do pool.
///
/// Cada número do pool é usado no máximo uma vez no lote inteiro. Quando
/// restam menos de 6 números livres, o lote parcial é devolvido e
/// [`GeneratedBatch::is_exhausted`] indica o esgotamento.
pub fn generate_batch(
    pool: &[u8],
    params: BatchParams,
    rng: &mut StdRng,
) -> Result<GeneratedBatch, GenerationError> {
    let mut available: Vec<u8> = pool
        .iter()
        .copied()
        .filter(|n| (1..=MAX_NUMBER_VALUE).contains(n))
        .collect();
    available.sort_unstable();
    available.dedup();

    if available.len() < params.min_pool {
        return Err(GenerationError::InsufficientPool {
            required: params.min_pool,
            found: available.len(),
        });
    }

    let mut sets = Vec::with_capacity(params.batch_size);
    for _ in 0..params.batch_size {
        if available.len() < NUMBERS_PER_SET {
            log::warn!(
                "Pool esgotado após {} de {} conjuntos ({} números restantes)",
                sets.len(),
                params.batch_size,
                available.len()
            );
            break;
        }

        // Fisher-Yates parcial, só as 6 primeiras posições são sorteadas.
        for i in 0..NUMBERS_PER_SET {
            let j = rng.random_range(i..available.len());
            available.swap(i, j);
        }
        let drawn: Vec<i64> = available.drain(..NUMBERS_PER_SET).map(i64::from).collect();
        sets.push(NumberSet::new(&drawn)?);
    }

    Ok(GeneratedBatch {
        sets,
        requested: params.batch_size,
    })
}

pub fn generate_from_history(
    history: &[NumberSet],
    settings: &Settings,
    rng: &mut StdRng,
) -> Result<GeneratedBatch, GenerationError> {
    if history.len() < settings.min_history {
        return Err(GenerationError::InsufficientHistory {
            required: settings.min_history,
            found: history.len(),
        });
    }

    let table = compute_frequency(history);
    let pool = top_n(&table, settings.pool_size);
    log::debug!(
        "Pool de {} números ({} distintos no histórico): {:?}",
        pool.len(),
        table.distinct(),
        pool
    );

    generate_batch(&pool, settings.batch_params(), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_disjoint(batch: &GeneratedBatch, pool: &[u8]) {
        let mut seen = HashSet::new();
        for set in &batch.sets {
            let numbers = set.numbers();
            assert!(numbers.windows(2).all(|w| w[0] < w[1]), "conjunto não ordenado: {set}");
            for n in numbers {
                assert!(pool.contains(n), "{n} fora do pool");
                assert!(seen.insert(*n), "{n} repetido no lote");
            }
        }
    }

    #[test]
    fn test_pool_of_thirty_fills_batch() {
        let pool: Vec<u8> = (1..=30).collect();
        let mut rng = make_rng(Some(42));
        let batch = generate_batch(&pool, BatchParams::default(), &mut rng).unwrap();

        assert_eq!(batch.sets.len(), 5);
        assert!(!batch.is_exhausted());
        assert_disjoint(&batch, &pool);

        let union: HashSet<u8> = batch.sets.iter().flat_map(|s| s.numbers().iter().copied()).collect();
        assert_eq!(union.len(), 30);
    }

    #[test]
    fn test_pool_of_twenty_nine_is_insufficient() {
        let pool: Vec<u8> = (1..=29).collect();
        let mut rng = make_rng(Some(42));
        assert_eq!(
            generate_batch(&pool, BatchParams::default(), &mut rng),
            Err(GenerationError::InsufficientPool { required: 30, found: 29 })
        );
    }

    #[test]
    fn test_pool_of_twenty_nine_exhausts() {
        let pool: Vec<u8> = (31..=59).collect();
        let params = BatchParams { batch_size: 5, min_pool: 29 };
        let mut rng = make_rng(Some(7));
        let batch = generate_batch(&pool, params, &mut rng).unwrap();

        assert_eq!(batch.sets.len(), 4);
        assert_eq!(batch.requested, 5);
        assert!(batch.is_exhausted());
        assert_disjoint(&batch, &pool);
    }

    #[test]
    fn test_duplicates_in_pool_do_not_count() {
        let mut pool: Vec<u8> = (1..=25).collect();
        pool.extend(1..=10);
        let mut rng = make_rng(Some(1));
        assert_eq!(
            generate_batch(&pool, BatchParams::default(), &mut rng),
            Err(GenerationError::InsufficientPool { required: 30, found: 25 })
        );
    }

    #[test]
    fn test_seed_is_reproducible() {
        let pool: Vec<u8> = (11..=50).collect();
        let a = generate_batch(&pool, BatchParams::default(), &mut make_rng(Some(2024))).unwrap();
        let b = generate_batch(&pool, BatchParams::default(), &mut make_rng(Some(2024))).unwrap();
        assert_eq!(a, b);
        assert_disjoint(&a, &pool);
    }

    #[test]
    fn test_many_seeds_stay_disjoint() {
        let pool: Vec<u8> = (1..=60).step_by(2).collect();
        for seed in 0..200 {
            let batch = generate_batch(&pool, BatchParams::default(), &mut make_rng(Some(seed))).unwrap();
            assert_eq!(batch.sets.len(), 5);
            assert_disjoint(&batch, &pool);
        }
    }

    #[test]
    fn test_from_history_requires_minimum_sets() {
        let history = vec![NumberSet::new(&[1, 2, 3, 4, 5, 6]).unwrap(); 9];
        let mut rng = make_rng(Some(1));
        assert_eq!(
            generate_from_history(&history, &Settings::default(), &mut rng),
            Err(GenerationError::InsufficientHistory { required: 10, found: 9 })
        );
    }

    #[test]
    fn test_from_history_identical_sets() {
        let history = vec![NumberSet::new(&[1, 2, 3, 4, 5, 6]).unwrap(); 10];
        let mut rng = make_rng(Some(1));
        assert_eq!(
            generate_from_history(&history, &Settings::default(), &mut rng),
            Err(GenerationError::InsufficientPool { required: 30, found: 6 })
        );
    }

    #[test]
    fn test_from_history_uses_top_numbers() {
        // 1..=30 aparecem duas vezes, 31..=60 uma vez
        let mut history = Vec::new();
        for start in [1i64, 7, 13, 19, 25] {
            let numbers: Vec<i64> = (start..start + 6).collect();
            history.push(NumberSet::new(&numbers).unwrap());
            history.push(NumberSet::new(&numbers).unwrap());
        }
        for start in [31i64, 37, 43, 49, 55] {
            let numbers: Vec<i64> = (start..start + 6).collect();
            history.push(NumberSet::new(&numbers).unwrap());
        }

        let mut rng = make_rng(Some(99));
        let batch = generate_from_history(&history, &Settings::default(), &mut rng).unwrap();
        let top: Vec<u8> = (1..=30).collect();
        assert_eq!(batch.sets.len(), 5);
        assert_disjoint(&batch, &top);
    }
}
