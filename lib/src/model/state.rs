/// Marker for a model that has not been fitted yet.
///
/// `LinearModel<Unfitted>` only knows its feature schema; `predict` and
/// persistence are not available until `fit` turns it into a
/// `LinearModel<Fitted>`.
#[derive(Debug, Clone, Copy)]
pub struct Unfitted;

/// Marker for a model holding trained parameters.
///
/// A fitted model carries only what inference needs: weights, bias and the
/// ordered feature names it was trained on.
#[derive(Debug, Clone, Copy)]
pub struct Fitted;
