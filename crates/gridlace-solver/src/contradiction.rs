/// Returns the first hypothesis that leads to a contradiction.
///
/// For each hypothesis in order, `refutes` receives a fresh clone of `state`
/// and must return `true` if assuming the hypothesis on that clone makes the
/// puzzle unsolvable. The caller is expected to commit the negation of the
/// returned hypothesis to the real state.
///
/// `state` itself is never modified, so a refuted hypothesis leaves no trace
/// of the probe.
///
/// # Examples
///
/// ```
/// use gridlace_solver::find_refutation;
///
/// // A total above 5 stands in for a contradiction.
/// let state = vec![1, 2];
/// let refuted = find_refutation(&state, [1, 3, 4], |mut s, &h| {
///     s.push(h);
///     s.iter().sum::<i32>() > 5
/// });
/// assert_eq!(refuted, Some(3));
/// ```
pub fn find_refutation<S, H, I, F>(state: &S, hypotheses: I, mut refutes: F) -> Option<H>
where
    S: Clone,
    I: IntoIterator<Item = H>,
    F: FnMut(S, &H) -> bool,
{
    hypotheses
        .into_iter()
        .find(|hypothesis| refutes(state.clone(), hypothesis))
}
