//! The catalog views: four entity lists with their cards, and favorites.

pub mod card;
pub mod character;
pub mod favorites;
pub mod film;
pub mod format;
pub mod list;
pub mod planet;
pub mod starship;

pub use card::{Badge, CardView, EntityKind, Tone};
pub use favorites::Favorites;
pub use list::{ListModel, ListView, ViewSpec};

use crate::graphql::{FetchError, Operation};
use serde_json::Value;

fn film_card(v: Value) -> Result<CardView, FetchError> {
    list::read_with(v, film::card)
}

fn character_card(v: Value) -> Result<CardView, FetchError> {
    list::read_with(v, character::card)
}

fn planet_card(v: Value) -> Result<CardView, FetchError> {
    list::read_with(v, planet::card)
}

fn starship_card(v: Value) -> Result<CardView, FetchError> {
    list::read_with(v, starship::card)
}

pub static FILMS: ViewSpec = ViewSpec {
    operation: &film::QUERY,
    fragment: &film::FRAGMENT,
    connection: "allFilms",
    items: "films",
    noun: "films",
    skeleton: 6,
    read_card: film_card,
};

pub static CHARACTERS: ViewSpec = ViewSpec {
    operation: &character::QUERY,
    fragment: &character::FRAGMENT,
    connection: "allPeople",
    items: "people",
    noun: "characters",
    skeleton: 8,
    read_card: character_card,
};

pub static PLANETS: ViewSpec = ViewSpec {
    operation: &planet::QUERY,
    fragment: &planet::FRAGMENT,
    connection: "allPlanets",
    items: "planets",
    noun: "planets",
    skeleton: 8,
    read_card: planet_card,
};

pub static STARSHIPS: ViewSpec = ViewSpec {
    operation: &starship::QUERY,
    fragment: &starship::FRAGMENT,
    connection: "allStarships",
    items: "starships",
    noun: "starships",
    skeleton: 6,
    read_card: starship_card,
};

/// Every root query the catalog issues.
pub fn operations() -> [&'static Operation; 4] {
    [&film::QUERY, &character::QUERY, &planet::QUERY, &starship::QUERY]
}
