use serde::Deserialize;

use super::card::{Badge, CardView, EntityKind, Tone};
use super::format;
use crate::graphql::{Fragment, Operation};

pub static FRAGMENT: Fragment = Fragment::new(
    "CharacterCard_person",
    r#"fragment CharacterCard_person on Person {
  id
  name
  birthYear
  gender
  height
  mass
  eyeColor
  hairColor
  skinColor
  homeworld {
    name
  }
}"#,
);

static FRAGMENTS: [&Fragment; 1] = [&FRAGMENT];

pub static QUERY: Operation = Operation::new(
    "CharactersListQuery",
    r#"query CharactersListQuery($first: Int) {
  allPeople(first: $first) {
    people {
      id
      ...CharacterCard_person
    }
    totalCount
  }
}"#,
    &FRAGMENTS,
);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterData {
    pub id: String,
    pub name: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub mass: Option<f64>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub homeworld: Option<Homeworld>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Homeworld {
    pub name: Option<String>,
}

/// Gender badge accent; anything unrecognized stays neutral.
pub fn gender_tone(gender: Option<&str>) -> Tone {
    match gender.map(str::to_lowercase).as_deref() {
        Some("male") => Tone::Blue,
        Some("female") => Tone::Cyan,
        _ => Tone::Neutral,
    }
}

pub fn card(data: &CharacterData) -> CardView {
    let mut card = CardView::new(
        EntityKind::Character,
        &data.id,
        format::or_unknown(data.name.as_deref()),
    );
    card.eyebrow = "Character".into();
    card.badge = Some(Badge::new(
        format::or_unknown(data.gender.as_deref()),
        gender_tone(data.gender.as_deref()),
    ));
    card.field("Height:", format::with_unit(data.height, "cm"));
    card.field("Mass:", format::with_unit(data.mass, "kg"));
    if let Some(world) = data
        .homeworld
        .as_ref()
        .and_then(|h| h.name.as_deref())
        .filter(|n| !n.is_empty())
    {
        card.field("Homeworld:", world);
    }
    card.field("Born:", format::or_unknown(data.birth_year.as_deref()));

    if let Some(eye) = present(&data.eye_color).filter(|c| *c != "unknown") {
        card.tags.push(Badge::neutral(format!("eyes {eye}")));
    }
    if let Some(hair) = present(&data.hair_color).filter(|c| *c != "n/a" && *c != "none") {
        card.tags.push(Badge::neutral(format!("hair {hair}")));
    }
    if let Some(skin) = present(&data.skin_color) {
        card.tags.push(Badge::neutral(format!("skin {skin}")));
    }
    card
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
