use serde::Deserialize;

use super::card::{Badge, CardView, EntityKind, Tone};
use super::format;
use crate::graphql::{Fragment, Operation};

pub static FRAGMENT: Fragment = Fragment::new(
    "PlanetCard_planet",
    r#"fragment PlanetCard_planet on Planet {
  id
  name
  diameter
  gravity
  population
  climates
  terrains
  surfaceWater
  orbitalPeriod
  rotationPeriod
}"#,
);

static FRAGMENTS: [&Fragment; 1] = [&FRAGMENT];

/// Not preloaded: the planets view dispatches this itself when first shown.
pub static QUERY: Operation = Operation::new(
    "PlanetsListQuery",
    r#"query PlanetsListQuery($first: Int) {
  allPlanets(first: $first) {
    planets {
      id
      ...PlanetCard_planet
    }
    totalCount
  }
}"#,
    &FRAGMENTS,
);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetData {
    pub id: String,
    pub name: Option<String>,
    pub diameter: Option<f64>,
    pub gravity: Option<String>,
    pub population: Option<f64>,
    pub climates: Option<Vec<Option<String>>>,
    pub terrains: Option<Vec<Option<String>>>,
    pub surface_water: Option<f64>,
    pub orbital_period: Option<f64>,
    pub rotation_period: Option<f64>,
}

pub fn card(data: &PlanetData) -> CardView {
    let mut card = CardView::new(
        EntityKind::Planet,
        &data.id,
        format::or_unknown(data.name.as_deref()),
    );
    card.eyebrow = "Planet".into();
    let diameter = match data.diameter {
        Some(d) if d != 0.0 => format!("{} km", format::group_thousands(d)),
        _ => format::UNKNOWN.to_string(),
    };
    card.badge = Some(Badge::new(diameter, Tone::Green));

    card.field("Population:", format::abbreviate(data.population));
    card.field("Water:", format::with_unit(data.surface_water, "%"));
    if let Some(gravity) = data.gravity.as_deref().filter(|g| !g.is_empty()) {
        card.field("Gravity:", gravity);
    }
    card.field("Orbital Period:", format::with_unit(data.orbital_period, " days"));
    card.field("Rotation Period:", format::with_unit(data.rotation_period, " hours"));

    for climate in first_three(&data.climates) {
        card.tags.push(Badge::neutral(climate));
    }
    for terrain in first_three(&data.terrains) {
        card.tags.push(Badge::new(terrain, Tone::Green));
    }
    card
}

fn first_three<'a>(list: &'a Option<Vec<Option<String>>>) -> impl Iterator<Item = &'a str> + 'a {
    list.iter().flatten().flatten().map(String::as_str).take(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn planet_card_layout() {
        let data: PlanetData = serde_json::from_value(json!({
            "id": "p1",
            "name": "Tatooine",
            "diameter": 10465,
            "gravity": "1 standard",
            "population": 200000,
            "climates": ["arid"],
            "terrains": ["desert", "canyons", "mesas", "dunes"],
            "surfaceWater": 1,
            "orbitalPeriod": 304,
            "rotationPeriod": 23
        }))
        .unwrap();

        let card = card(&data);
        assert_eq!(card.badge.as_ref().unwrap().text, "10,465 km");
        let values: Vec<&str> = card.fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, ["200.0K", "1%", "1 standard", "304 days", "23 hours"]);
        let tags: Vec<&str> = card.tags.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(tags, ["arid", "desert", "canyons", "mesas"]);
    }

    #[test]
    fn unknown_population_and_diameter() {
        let data: PlanetData = serde_json::from_value(json!({
            "id": "p2", "name": "Hoth", "diameter": 0, "gravity": null,
            "population": null, "climates": null, "terrains": [null],
            "surfaceWater": null, "orbitalPeriod": null, "rotationPeriod": null
        }))
        .unwrap();
        let card = card(&data);
        assert_eq!(card.badge.as_ref().unwrap().text, "Unknown");
        assert_eq!(card.fields[0].value, "Unknown");
        assert!(card.tags.is_empty());
    }
}
