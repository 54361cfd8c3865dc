/// Errors raised while solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    /// The grid has no consistent completion.
    #[display("contradiction: the grid has no consistent completion")]
    Contradiction,
}
