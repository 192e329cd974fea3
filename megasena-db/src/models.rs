use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const NUMBERS_PER_SET: usize = 6;
pub const MAX_NUMBER_VALUE: u8 = 60;
pub const MAX_HISTORY_SIZE: usize = 60;

/// Conjunto de 6 números distintos entre 1 e 60, sempre em ordem crescente.
///
/// Serializado como um simples array JSON (`[1, 5, 12, 23, 45, 50]`); a
/// desserialização passa pela mesma validação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<u8>")]
pub struct NumberSet([u8; NUMBERS_PER_SET]);

impl NumberSet {
    pub fn new(numbers: &[i64]) -> Result<Self, ValidationError> {
        if numbers.len() != NUMBERS_PER_SET {
            return Err(ValidationError::WrongCount {
                expected: NUMBERS_PER_SET,
                found: numbers.len(),
            });
        }

        let mut set = [0u8; NUMBERS_PER_SET];
        for (slot, &n) in set.iter_mut().zip(numbers) {
            if n < 1 || n > MAX_NUMBER_VALUE as i64 {
                return Err(ValidationError::OutOfRange {
                    value: n,
                    max: MAX_NUMBER_VALUE,
                });
            }
            *slot = n as u8;
        }

        set.sort_unstable();
        if let Some(pair) = set.windows(2).find(|w| w[0] == w[1]) {
            return Err(ValidationError::DuplicateWithinSet(pair[0]));
        }

        Ok(Self(set))
    }

    /// Valida uma entrada bruta, token por token.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ValidationError> {
        if tokens.len() != NUMBERS_PER_SET {
            return Err(ValidationError::WrongCount {
                expected: NUMBERS_PER_SET,
                found: tokens.len(),
            });
        }

        let numbers = tokens
            .iter()
            .map(|t| {
                let t = t.as_ref().trim();
                t.parse::<i64>()
                    .map_err(|_| ValidationError::NotNumeric(t.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(&numbers)
    }

    pub fn numbers(&self) -> &[u8; NUMBERS_PER_SET] {
        &self.0
    }

    pub fn contains(&self, number: u8) -> bool {
        self.0.binary_search(&number).is_ok()
    }
}

impl TryFrom<Vec<i64>> for NumberSet {
    type Error = ValidationError;

    fn try_from(numbers: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(&numbers)
    }
}

impl From<NumberSet> for Vec<u8> {
    fn from(set: NumberSet) -> Self {
        set.0.to_vec()
    }
}

impl fmt::Display for NumberSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{joined}")
    }
}

/// Separa uma linha digitada (`"01,05,12,23,45,50"` ou `"1 5 12 23 45 50"`).
///
/// Com vírgula ou ponto e vírgula, cada campo conta, inclusive os vazios;
/// sem eles, a linha é separada por espaços.
pub fn split_input(input: &str) -> Vec<&str> {
    if input.contains([',', ';']) {
        input.split([',', ';']).map(str::trim).collect()
    } else {
        input.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_numbers() {
        let set = NumberSet::new(&[50, 5, 12, 1, 45, 23]).unwrap();
        assert_eq!(set.numbers(), &[1, 5, 12, 23, 45, 50]);
    }

    #[test]
    fn test_new_bounds() {
        assert!(NumberSet::new(&[1, 2, 3, 4, 5, 60]).is_ok());
        assert_eq!(
            NumberSet::new(&[0, 2, 3, 4, 5, 6]),
            Err(ValidationError::OutOfRange { value: 0, max: 60 })
        );
        assert_eq!(
            NumberSet::new(&[1, 2, 3, 4, 5, 61]),
            Err(ValidationError::OutOfRange { value: 61, max: 60 })
        );
        assert!(NumberSet::new(&[-3, 2, 3, 4, 5, 6]).is_err());
    }

    #[test]
    fn test_new_wrong_count() {
        assert_eq!(
            NumberSet::new(&[1, 2, 3, 4, 5]),
            Err(ValidationError::WrongCount { expected: 6, found: 5 })
        );
        assert!(NumberSet::new(&[1, 2, 3, 4, 5, 6, 7]).is_err());
    }

    #[test]
    fn test_new_duplicate() {
        assert_eq!(
            NumberSet::new(&[7, 2, 3, 7, 5, 6]),
            Err(ValidationError::DuplicateWithinSet(7))
        );
    }

    #[test]
    fn test_parse_tokens() {
        let set = NumberSet::parse(&["01", " 05", "12 ", "23", "45", "50"]).unwrap();
        assert_eq!(set.numbers(), &[1, 5, 12, 23, 45, 50]);
    }

    #[test]
    fn test_parse_not_numeric() {
        assert_eq!(
            NumberSet::parse(&["1", "2", "x", "4", "5", "6"]),
            Err(ValidationError::NotNumeric("x".to_string()))
        );
    }

    #[test]
    fn test_parse_checks_count_first() {
        assert_eq!(
            NumberSet::parse(&["a", "b"]),
            Err(ValidationError::WrongCount { expected: 6, found: 2 })
        );
    }

    #[test]
    fn test_split_input() {
        assert_eq!(split_input("01,05,12,23,45,50").len(), 6);
        assert_eq!(split_input("1, 5, 12,23 ;45,50"), vec!["1", "5", "12", "23", "45", "50"]);
        assert_eq!(split_input("1  5 12\t23 45 50"), vec!["1", "5", "12", "23", "45", "50"]);
        assert!(split_input("   ").is_empty());
    }

    #[test]
    fn test_split_input_keeps_empty_fields() {
        assert_eq!(split_input("1,2,3,4,5,6,"), vec!["1", "2", "3", "4", "5", "6", ""]);
        assert_eq!(split_input("1,,2,3,4,5"), vec!["1", "", "2", "3", "4", "5"]);
        assert_eq!(split_input(",1,2,3,4,5,6").len(), 7);
    }

    #[test]
    fn test_display_pads_numbers() {
        let set = NumberSet::new(&[1, 5, 12, 23, 45, 50]).unwrap();
        assert_eq!(set.to_string(), "01, 05, 12, 23, 45, 50");
    }

    #[test]
    fn test_serde_uses_plain_array() {
        let set = NumberSet::new(&[6, 5, 4, 3, 2, 1]).unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2,3,4,5,6]");

        let parsed: NumberSet = serde_json::from_str("[10,9,8,7,6,5]").unwrap();
        assert_eq!(parsed.numbers(), &[5, 6, 7, 8, 9, 10]);
        assert!(serde_json::from_str::<NumberSet>("[1,2,3,4,5]").is_err());
        assert!(serde_json::from_str::<NumberSet>("[1,2,3,4,5,99]").is_err());
    }

    #[test]
    fn test_contains() {
        let set = NumberSet::new(&[1, 5, 12, 23, 45, 50]).unwrap();
        assert!(set.contains(12));
        assert!(!set.contains(13));
    }
}
