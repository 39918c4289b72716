use std::fmt;

use crate::catalog::favorites::PendingFavorite;
use crate::graphql::FetchCompleted;

/// Messages delivered to the UI loop from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    Fetched(FetchCompleted),
    FavoriteCommitted(PendingFavorite),
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Films,
    Characters,
    Planets,
    Starships,
    Favorites,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Films,
        Tab::Characters,
        Tab::Planets,
        Tab::Starships,
        Tab::Favorites,
    ];

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> Option<Tab> {
        Self::ALL.get(i).copied()
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Films => "Films",
            Tab::Characters => "Characters",
            Tab::Planets => "Planets",
            Tab::Starships => "Starships",
            Tab::Favorites => "Favorites",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Tab::Films => "Star Wars Films",
            other => other.title(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tab::Films => "Explore the complete Star Wars saga. Preloaded query with colocated fragments.",
            Tab::Characters => "Meet the heroes and villains of the galaxy. Each card reads its own fragment.",
            Tab::Planets => "Discover worlds across the galaxy far, far away. Query variables for pagination.",
            Tab::Starships => "Browse iconic vessels from X-wings to Star Destroyers. Each card defines its own data requirements.",
            Tab::Favorites => "Manage your favorite items. Local state standing in for a mutation.",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "films" | "film" => Ok(Tab::Films),
            "characters" | "character" | "people" => Ok(Tab::Characters),
            "planets" | "planet" => Ok(Tab::Planets),
            "starships" | "starship" => Ok(Tab::Starships),
            "favorites" | "favourites" => Ok(Tab::Favorites),
            _ => Err(anyhow::anyhow!(
                "Invalid tab '{s}'. Valid options: films, characters, planets, starships, favorites"
            )),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_parse_and_cycle() {
        assert_eq!("Planets".parse::<Tab>().unwrap(), Tab::Planets);
        assert!("vehicles".parse::<Tab>().is_err());
        assert_eq!(Tab::Favorites.next(), Tab::Films);
        assert_eq!(Tab::Films.prev(), Tab::Favorites);
        assert_eq!(Tab::from_index(3), Some(Tab::Starships));
        assert_eq!(Tab::Characters.to_string(), "characters");
    }
}
