//! Generic predicate matching over ordered label/value mappings.

/// Return the labels whose value satisfies `predicate`, in mapping order.
///
/// The mapping is any ordered sequence of `(label, value)` pairs. This is
/// how callers pick a capable implementation out of a registry, or a
/// coordinate out of an array, by testing what the value *is* rather than
/// dispatching on its name.
pub fn match_values<L, V, P>(predicate: P, mapping: impl IntoIterator<Item = (L, V)>) -> Vec<L>
where
    P: Fn(&V) -> bool,
{
    mapping
        .into_iter()
        .filter(|(_, value)| predicate(value))
        .map(|(label, _)| label)
        .collect()
}
