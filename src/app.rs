use serde_json::json;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

use crate::catalog::favorites::{self, Favorites};
use crate::catalog::{self, CardView, ListView};
use crate::config::Config;
use crate::graphql::{variables, Environment};
use crate::theme::{ColorScheme, Theme};
use crate::types::{AppEvent, Tab};

/// Page sizes the shell preloads with; planets ask for theirs lazily.
pub const CHARACTERS_PAGE: u64 = 10;
pub const STARSHIPS_PAGE: u64 = 12;
pub const PLANETS_PAGE: u64 = 12;

const MAX_LOG_ENTRIES: usize = 50;
const TOAST_DURATION: Duration = Duration::from_secs(2);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    FavoriteDialog,
}

pub struct App {
    quit: bool,
    tab: Tab,
    env: Environment,
    events: UnboundedSender<AppEvent>,
    mounted: bool,

    films: ListView,
    characters: ListView,
    planets: ListView,
    starships: ListView,
    favorites: Favorites,

    fps: u32,
    fps_choices: Vec<u32>,
    theme: Theme,
    colors: ColorScheme,
    spinner: usize,

    // Debug log (rolling, Ctrl+D)
    debug_log: Vec<String>,
    debug_visible: bool,

    toast_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(env: Environment, events: UnboundedSender<AppEvent>, cfg: &Config) -> Self {
        Self {
            quit: false,
            tab: cfg.initial_tab,
            env,
            events,
            mounted: false,
            films: ListView::preloaded(&catalog::FILMS),
            characters: ListView::preloaded(&catalog::CHARACTERS),
            planets: ListView::lazy(&catalog::PLANETS, variables(json!({ "first": PLANETS_PAGE }))),
            starships: ListView::preloaded(&catalog::STARSHIPS),
            favorites: Favorites::new(),
            fps: cfg.render_fps,
            fps_choices: cfg.render_fps_choices.clone(),
            theme: cfg.theme,
            colors: cfg.theme.colors(),
            spinner: 0,
            debug_log: Vec::new(),
            debug_visible: false,
            toast_message: None,
        }
    }

    /// Dispatch the preloadable queries. Runs once; later calls are no-ops.
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        let films = self.env.fetch(&catalog::film::QUERY, variables(json!({})));
        self.films.preload(films);
        let people = self.env.fetch(
            &catalog::character::QUERY,
            variables(json!({ "first": CHARACTERS_PAGE })),
        );
        self.characters.preload(people);
        let ships = self.env.fetch(
            &catalog::starship::QUERY,
            variables(json!({ "first": STARSHIPS_PAGE })),
        );
        self.starships.preload(ships);
        self.log_debug(format!("Mounted: {} queries dispatched", self.env.dispatched()));
    }

    // ----- accessors -----
    pub fn quit_flag(&self) -> bool {
        self.quit
    }
    pub fn request_quit(&mut self) {
        self.quit = true;
    }
    pub fn tab(&self) -> Tab {
        self.tab
    }
    pub fn env(&self) -> &Environment {
        &self.env
    }
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }
    pub fn theme(&self) -> &ColorScheme {
        &self.colors
    }
    pub fn theme_name(&self) -> Theme {
        self.theme
    }
    pub fn fps(&self) -> u32 {
        self.fps
    }
    pub fn debug_log(&self) -> &[String] {
        &self.debug_log
    }
    pub fn debug_visible(&self) -> bool {
        self.debug_visible
    }
    pub fn spinner_frame(&self) -> usize {
        self.spinner
    }

    pub fn input_mode(&self) -> InputMode {
        if self.tab == Tab::Favorites && self.favorites.dialog_open() {
            InputMode::FavoriteDialog
        } else {
            InputMode::Normal
        }
    }

    /// The list behind a data tab; `None` on the favorites tab.
    pub fn list(&self, tab: Tab) -> Option<&ListView> {
        match tab {
            Tab::Films => Some(&self.films),
            Tab::Characters => Some(&self.characters),
            Tab::Planets => Some(&self.planets),
            Tab::Starships => Some(&self.starships),
            Tab::Favorites => None,
        }
    }

    fn list_mut(&mut self, tab: Tab) -> Option<&mut ListView> {
        match tab {
            Tab::Films => Some(&mut self.films),
            Tab::Characters => Some(&mut self.characters),
            Tab::Planets => Some(&mut self.planets),
            Tab::Starships => Some(&mut self.starships),
            Tab::Favorites => None,
        }
    }

    /// Resolve only the active tab's query (this is what triggers the lazy planets fetch).
    pub fn sync(&mut self) {
        let tab = self.tab;
        let view = match tab {
            Tab::Films => &mut self.films,
            Tab::Characters => &mut self.characters,
            Tab::Planets => &mut self.planets,
            Tab::Starships => &mut self.starships,
            Tab::Favorites => return,
        };
        view.refresh(&mut self.env);
    }

    pub fn tick_spinner(&mut self) {
        self.spinner = self.spinner.wrapping_add(1);
    }

    // ----- events -----
    pub fn on_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::Fetched(done) => {
                let msg = match &done.result {
                    Ok(_) => format!("Response {}", done.key),
                    Err(e) => format!("Failed {}: {e}", done.key),
                };
                self.log_debug(msg);
                self.env.on_completed(done);
            }
            AppEvent::FavoriteCommitted(pending) => {
                let added = self.favorites.complete(pending);
                let (name, kind) = (added.name.clone(), added.kind);
                self.log_debug(format!("Favorite committed: {name} ({kind})"));
                self.show_toast(format!("Added {name} to favorites"));
            }
            AppEvent::Quit => self.quit = true,
        }
    }

    // ----- tabs & selection -----
    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.log_debug(format!("Tab -> {tab}"));
        }
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.set_tab(self.tab.prev());
    }

    pub fn select_next(&mut self) {
        let tab = self.tab;
        match self.list_mut(tab) {
            Some(view) => view.select_next(),
            None => self.favorites.select_next(),
        }
    }

    pub fn select_prev(&mut self) {
        let tab = self.tab;
        match self.list_mut(tab) {
            Some(view) => view.select_prev(),
            None => self.favorites.select_prev(),
        }
    }

    pub fn selected_card(&self) -> Option<&CardView> {
        self.list(self.tab)?.selected_card()
    }

    // ----- favorites -----
    pub fn open_favorite_dialog(&mut self) {
        if self.tab == Tab::Favorites {
            self.favorites.open_dialog();
        }
    }

    pub fn close_favorite_dialog(&mut self) {
        self.favorites.close_dialog();
    }

    pub fn favorite_input(&mut self, c: char) {
        self.favorites.push_char(c);
    }

    pub fn favorite_backspace(&mut self) {
        self.favorites.backspace();
    }

    pub fn favorite_next_kind(&mut self) {
        self.favorites.next_kind();
    }

    pub fn favorite_prev_kind(&mut self) {
        self.favorites.prev_kind();
    }

    /// Start the simulated add. Blank names and submits while adding are ignored.
    pub fn submit_favorite(&mut self) -> bool {
        let Some(pending) = self.favorites.submit() else {
            return false;
        };
        self.log_debug(format!("Adding favorite {} ({})", pending.name, pending.kind));
        let events = self.events.clone();
        tokio::spawn(async move {
            let done = favorites::commit(pending).await;
            let _ = events.send(AppEvent::FavoriteCommitted(done));
        });
        true
    }

    pub fn remove_selected_favorite(&mut self) {
        if self.tab != Tab::Favorites {
            return;
        }
        if let Some(id) = self.favorites.remove_selected() {
            self.log_debug(format!("Removed favorite {id}"));
        }
    }

    // ----- copy -----
    /// Text copied by `c`: the selected card, or the selected favorite.
    pub fn copy_text(&self) -> Option<String> {
        match self.tab {
            Tab::Favorites => {
                let fav = self.favorites.items().get(self.favorites.selected())?;
                Some(format!("{} ({})", fav.name, fav.kind))
            }
            _ => self.selected_card().map(CardView::to_plain_text),
        }
    }

    // ----- knobs -----
    pub fn cycle_fps(&mut self) {
        if self.fps_choices.is_empty() {
            return;
        }
        let mut idx = self
            .fps_choices
            .iter()
            .position(|&v| v == self.fps)
            .unwrap_or(0);
        idx = (idx + 1) % self.fps_choices.len();
        self.fps = self.fps_choices[idx];
        self.show_toast(format!("FPS {}", self.fps));
    }

    /// Toggle debug panel visibility (Ctrl+D)
    pub fn toggle_debug_panel(&mut self) {
        self.debug_visible = !self.debug_visible;
        self.log_debug(format!(
            "Debug panel: {}",
            if self.debug_visible { "visible" } else { "hidden" }
        ));
    }

    /// Show a toast notification for 2 seconds
    pub fn show_toast(&mut self, msg: String) {
        self.toast_message = Some((msg, Instant::now()));
    }

    /// Get current toast message if still active
    pub fn toast_message(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed() < TOAST_DURATION {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    pub fn log_debug(&mut self, msg: String) {
        log::debug!("{msg}");
        self.debug_log.push(msg);
        if self.debug_log.len() > MAX_LOG_ENTRIES {
            self.debug_log.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::{GraphQlRequest, Transport, TransportError};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::mpsc::unbounded_channel;

    struct NeverTransport;

    #[async_trait]
    impl Transport for NeverTransport {
        async fn execute(&self, _request: GraphQlRequest) -> Result<Value, TransportError> {
            std::future::pending().await
        }
    }

    fn app() -> App {
        let (tx, _rx) = unbounded_channel();
        let env = Environment::new(Arc::new(NeverTransport), tx.clone());
        App::new(env, tx, &Config::default())
    }

    #[tokio::test]
    async fn mount_dispatches_three_preloads_once() {
        let mut app = app();
        app.mount();
        app.mount();
        assert_eq!(app.env().dispatched(), 3);
        assert!(app.list(Tab::Planets).unwrap().lifecycle().is_lazy());
    }

    #[tokio::test]
    async fn planets_fetch_only_when_their_tab_is_shown() {
        let mut app = app();
        app.mount();
        app.sync();
        assert_eq!(app.env().dispatched(), 3);

        app.set_tab(Tab::Planets);
        app.sync();
        app.sync();
        assert_eq!(app.env().dispatched(), 4);
    }

    #[test]
    fn fps_cycles_through_choices() {
        let mut app = app();
        assert_eq!(app.fps(), 20);
        app.cycle_fps();
        app.cycle_fps();
        assert_eq!(app.fps(), 60);
        app.cycle_fps();
        assert_eq!(app.fps(), 20);
    }

    #[test]
    fn debug_log_is_bounded() {
        let mut app = app();
        for i in 0..80 {
            app.log_debug(format!("entry {i}"));
        }
        assert_eq!(app.debug_log().len(), MAX_LOG_ENTRIES);
        assert_eq!(app.debug_log()[0], "entry 30");
    }

    #[test]
    fn dialog_mode_only_on_favorites_tab() {
        let mut app = app();
        app.open_favorite_dialog();
        assert_eq!(app.input_mode(), InputMode::Normal);
        app.set_tab(Tab::Favorites);
        app.open_favorite_dialog();
        assert_eq!(app.input_mode(), InputMode::FavoriteDialog);
        assert_eq!(app.copy_text().as_deref(), Some("Luke Skywalker (character)"));
    }
}
