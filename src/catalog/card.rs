//! Renderer-agnostic card model shared by every entity view.

use std::fmt;

/// Accent used for badges and titles; mapped to concrete colors by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Yellow,
    Blue,
    Cyan,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Film,
    Character,
    Planet,
    Starship,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Film,
        EntityKind::Character,
        EntityKind::Planet,
        EntityKind::Starship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Film => "film",
            EntityKind::Character => "character",
            EntityKind::Planet => "planet",
            EntityKind::Starship => "starship",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            EntityKind::Film => Tone::Yellow,
            EntityKind::Character => Tone::Blue,
            EntityKind::Planet => Tone::Green,
            EntityKind::Starship => Tone::Cyan,
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Neutral)
    }
}

/// One `label value` row in a card body.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub kind: EntityKind,
    pub id: String,
    /// Small line above the title ("Episode IV", "Character", ship class).
    pub eyebrow: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub badge: Option<Badge>,
    /// Quoted free text (film crawl).
    pub blurb: Option<String>,
    pub fields: Vec<Field>,
    pub tags: Vec<Badge>,
}

impl CardView {
    pub fn new(kind: EntityKind, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            eyebrow: String::new(),
            title: title.into(),
            subtitle: None,
            badge: None,
            blurb: None,
            fields: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn field(&mut self, label: &'static str, value: impl Into<String>) {
        self.fields.push(Field {
            label,
            value: value.into(),
        });
    }

    /// Plain-text rendering used for the clipboard.
    pub fn to_plain_text(&self) -> String {
        let mut out = Vec::new();
        if !self.eyebrow.is_empty() {
            out.push(self.eyebrow.clone());
        }
        match &self.badge {
            Some(b) => out.push(format!("{} [{}]", self.title, b.text)),
            None => out.push(self.title.clone()),
        }
        if let Some(sub) = &self.subtitle {
            out.push(sub.clone());
        }
        if let Some(blurb) = &self.blurb {
            out.push(format!("\"{blurb}\""));
        }
        for f in &self.fields {
            out.push(format!("{} {}", f.label, f.value));
        }
        if !self.tags.is_empty() {
            let tags: Vec<&str> = self.tags.iter().map(|t| t.text.as_str()).collect();
            out.push(tags.join(" · "));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_lists_every_part() {
        let mut card = CardView::new(EntityKind::Planet, "p1", "Tatooine");
        card.eyebrow = "Planet".into();
        card.badge = Some(Badge::new("10,465 km", Tone::Green));
        card.field("Population:", "200.0K");
        card.tags.push(Badge::neutral("arid"));
        card.tags.push(Badge::neutral("desert"));

        assert_eq!(
            card.to_plain_text(),
            "Planet\nTatooine [10,465 km]\nPopulation: 200.0K\narid · desert"
        );
    }

    #[test]
    fn kinds_cycle_both_ways() {
        assert_eq!(EntityKind::Starship.next(), EntityKind::Film);
        assert_eq!(EntityKind::Film.prev(), EntityKind::Starship);
        assert_eq!(EntityKind::Character.to_string(), "character");
    }
}
