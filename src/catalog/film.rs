use serde::Deserialize;

use super::card::{Badge, CardView, EntityKind};
use super::format;
use crate::graphql::{Fragment, Operation};

pub static FRAGMENT: Fragment = Fragment::new(
    "FilmCard_film",
    r#"fragment FilmCard_film on Film {
  id
  title
  episodeID
  director
  releaseDate
  openingCrawl
  producers
}"#,
);

static FRAGMENTS: [&Fragment; 1] = [&FRAGMENT];

pub static QUERY: Operation = Operation::new(
    "FilmsListQuery",
    r#"query FilmsListQuery {
  allFilms {
    films {
      id
      ...FilmCard_film
    }
    totalCount
  }
}"#,
    &FRAGMENTS,
);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmData {
    pub id: String,
    pub title: Option<String>,
    #[serde(rename = "episodeID")]
    pub episode_id: Option<i64>,
    pub director: Option<String>,
    pub release_date: Option<String>,
    pub opening_crawl: Option<String>,
    pub producers: Option<Vec<Option<String>>>,
}

pub fn card(data: &FilmData) -> CardView {
    let mut card = CardView::new(
        EntityKind::Film,
        &data.id,
        format::or_unknown(data.title.as_deref()),
    );
    card.eyebrow = format::episode_label(data.episode_id);
    card.badge = Some(Badge::neutral(format::release_year(
        data.release_date.as_deref(),
    )));
    card.blurb = Some(format::truncate_crawl(data.opening_crawl.as_deref()));
    card.field("Directed by", format::or_unknown(data.director.as_deref()));

    let producers: Vec<&str> = data
        .producers
        .iter()
        .flatten()
        .flatten()
        .map(String::as_str)
        .collect();
    for p in producers.iter().take(2) {
        card.tags.push(Badge::neutral(*p));
    }
    if producers.len() > 2 {
        card.tags.push(Badge::neutral(format!("+{} more", producers.len() - 2)));
    }
    card
}
