use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PrimeModalAction {
    SaveFavoritePrime,
    RemoveFavoritePrime,
}
