use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FavoritePrimesAction {
    /// Delete the entries at these positions. Positions refer to the list as
    /// it was before the deletion.
    DeleteFavoritePrimes(Vec<usize>),
}
