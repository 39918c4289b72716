use serde::Deserialize;

use super::card::{Badge, CardView, EntityKind, Tone};
use super::format;
use crate::graphql::{Fragment, Operation};

pub static FRAGMENT: Fragment = Fragment::new(
    "StarshipCard_starship",
    r#"fragment StarshipCard_starship on Starship {
  id
  name
  model
  starshipClass
  manufacturers
  costInCredits
  length
  crew
  passengers
  maxAtmospheringSpeed
  hyperdriveRating
  MGLT
}"#,
);

static FRAGMENTS: [&Fragment; 1] = [&FRAGMENT];

pub static QUERY: Operation = Operation::new(
    "StarshipsListQuery",
    r#"query StarshipsListQuery($first: Int) {
  allStarships(first: $first) {
    starships {
      id
      ...StarshipCard_starship
    }
    totalCount
  }
}"#,
    &FRAGMENTS,
);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarshipData {
    pub id: String,
    pub name: Option<String>,
    pub model: Option<String>,
    pub starship_class: Option<String>,
    pub manufacturers: Option<Vec<Option<String>>>,
    pub cost_in_credits: Option<f64>,
    pub length: Option<f64>,
    pub crew: Option<String>,
    pub passengers: Option<String>,
    pub max_atmosphering_speed: Option<f64>,
    pub hyperdrive_rating: Option<f64>,
    #[serde(rename = "MGLT")]
    pub mglt: Option<f64>,
}

pub fn card(data: &StarshipData) -> CardView {
    let mut card = CardView::new(
        EntityKind::Starship,
        &data.id,
        format::or_unknown(data.name.as_deref()),
    );
    card.eyebrow = data
        .starship_class
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("Starship")
        .to_string();
    card.subtitle = data.model.clone().filter(|m| !m.is_empty());
    card.badge = nonzero(data.hyperdrive_rating)
        .map(|r| Badge::new(format!("Hyperdrive: {}", format::number(r)), Tone::Cyan));

    card.field("Crew:", format::or_unknown(data.crew.as_deref()));
    card.field("Passengers:", format::or_unknown(data.passengers.as_deref()));
    card.field(
        "Speed:",
        nonzero(data.max_atmosphering_speed)
            .map(|s| format!("{} km/h", format::number(s)))
            .unwrap_or_else(|| "N/A".to_string()),
    );
    card.field(
        "Cost:",
        format!("{} credits", format::abbreviate(data.cost_in_credits)),
    );
    if let Some(length) = nonzero(data.length) {
        card.field("Length:", format!("{} m", format::group_thousands(length)));
    }

    for m in data
        .manufacturers
        .iter()
        .flatten()
        .flatten()
        .take(2)
    {
        card.tags.push(Badge::neutral(m.as_str()));
    }
    if let Some(mglt) = nonzero(data.mglt) {
        card.tags.push(Badge::new(format!("{} MGLT", format::number(mglt)), Tone::Cyan));
    }
    card
}

fn nonzero(v: Option<f64>) -> Option<f64> {
    v.filter(|n| *n != 0.0)
}
