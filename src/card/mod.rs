pub mod presentation;
pub mod types;

pub use presentation::{CardPresentationState, Face};
pub use types::{Card, CardVariant};
