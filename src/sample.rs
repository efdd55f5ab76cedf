//! Uniform sampling over grouped values.
//!
//! Both samplers draw `k` (key, element) pairs uniformly without
//! replacement from a `HashMap<K, Vec<V>>` and regroup the result by key.
//! [`sample_grouped`] flattens the groups into a pair vector first;
//! [`sample_grouped_low_mem`] instead samples flat indices and resolves
//! each through cumulative per-key bins, trading a binary search per draw
//! for the intermediate vector. Output distributions are identical.
//!
//! Callers supply the `Rng`, so runs are reproducible with seeded
//! generators.

use crate::error::RelsetError;
use rand::seq::index;
use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;

/// Samples `k` elements uniformly without replacement from grouped values.
///
/// # Example
/// ```rust
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use relset::sample::sample_grouped;
/// use std::collections::HashMap;
///
/// let groups = HashMap::from([("a", vec![1, 5, 9]), ("b", vec![6, 42])]);
/// let mut rng = SmallRng::seed_from_u64(7);
/// let sampled = sample_grouped(&groups, 2, &mut rng).unwrap();
/// assert_eq!(sampled.values().map(Vec::len).sum::<usize>(), 2);
/// ```
pub fn sample_grouped<K, V, R>(
    groups: &HashMap<K, Vec<V>>,
    k: usize,
    rng: &mut R,
) -> Result<HashMap<K, Vec<V>>, RelsetError>
where
    K: Clone + Eq + Hash,
    V: Clone,
    R: Rng + ?Sized,
{
    let flat: Vec<(&K, &V)> = groups
        .iter()
        .flat_map(|(key, values)| values.iter().map(move |value| (key, value)))
        .collect();
    check_sample_size(k, flat.len())?;

    let mut sampled: HashMap<K, Vec<V>> = HashMap::new();
    for flat_index in index::sample(rng, flat.len(), k) {
        let (key, value) = flat[flat_index];
        sampled.entry(key.clone()).or_default().push(value.clone());
    }
    Ok(sampled)
}

/// Samples `k` elements uniformly without replacement from grouped values
/// without materializing the flattened pair sequence.
///
/// Flat indices are drawn over the total element count and mapped back to
/// (key, element) positions through cumulative per-key bins.
pub fn sample_grouped_low_mem<K, V, R>(
    groups: &HashMap<K, Vec<V>>,
    k: usize,
    rng: &mut R,
) -> Result<HashMap<K, Vec<V>>, RelsetError>
where
    K: Clone + Eq + Hash,
    V: Clone,
    R: Rng + ?Sized,
{
    let keys: Vec<&K> = groups.keys().collect();
    // bins[j] = number of elements in the first j groups, so a flat index
    // i belongs to the last group whose bin does not exceed i.
    let mut bins = Vec::with_capacity(keys.len() + 1);
    let mut total = 0usize;
    bins.push(total);
    for key in &keys {
        total += groups[*key].len();
        bins.push(total);
    }
    check_sample_size(k, total)?;

    let mut sampled: HashMap<K, Vec<V>> = HashMap::new();
    for flat_index in index::sample(rng, total, k) {
        let key_index = bins.partition_point(|&bin| bin <= flat_index) - 1;
        let key = keys[key_index];
        let value_index = flat_index - bins[key_index];
        sampled
            .entry(key.clone())
            .or_default()
            .push(groups[key][value_index].clone());
    }
    Ok(sampled)
}

fn check_sample_size(requested: usize, available: usize) -> Result<(), RelsetError> {
    if requested > available {
        return Err(RelsetError::SampleTooLarge {
            requested,
            available,
        });
    }
    Ok(())
}
