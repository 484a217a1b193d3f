//! Selection policy over the non-dominated candidate set.

use crate::error::{Error, Result};

/// Picks one element of the non-dominated set uniformly at random and
/// returns its index.
///
/// Every front member is equally likely; no exploitation bias toward
/// candidates near existing observations.
///
/// # Errors
///
/// Returns [`Error::EmptySelection`] on an empty set. The driver never
/// invokes selection on an empty candidate front, so hitting this error
/// indicates a caller bug rather than a recoverable condition.
pub(crate) fn select_uniform<T>(front: &[T], rng: &mut fastrand::Rng) -> Result<usize> {
    if front.is_empty() {
        return Err(Error::EmptySelection);
    }
    Ok(rng.usize(..front.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_a_member() {
        let front = vec!["a", "b", "c"];
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..50 {
            let idx = select_uniform(&front, &mut rng).unwrap();
            assert!(idx < front.len());
        }
    }

    #[test]
    fn test_selection_single_element() {
        let front = vec![42];
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(select_uniform(&front, &mut rng).unwrap(), 0);
    }

    #[test]
    fn test_selection_empty_set_fails() {
        let front: Vec<i32> = vec![];
        let mut rng = fastrand::Rng::with_seed(1);
        assert!(matches!(
            select_uniform(&front, &mut rng),
            Err(Error::EmptySelection)
        ));
    }

    #[test]
    fn test_selection_eventually_covers_all_members() {
        let front = vec![0, 1, 2, 3];
        let mut rng = fastrand::Rng::with_seed(9);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[select_uniform(&front, &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_selection_deterministic_with_seed() {
        let front = vec![0, 1, 2, 3, 4];
        let mut a = fastrand::Rng::with_seed(123);
        let mut b = fastrand::Rng::with_seed(123);
        for _ in 0..20 {
            assert_eq!(
                select_uniform(&front, &mut a).unwrap(),
                select_uniform(&front, &mut b).unwrap()
            );
        }
    }
}
