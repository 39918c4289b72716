//! Generic list view: one root query, one card per non-null entry, plus the
//! `Showing X of Y` counter.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::card::CardView;
use crate::graphql::{
    Environment, FetchError, Fragment, FragmentRef, Operation, QueryLifecycle, QueryRef,
    QueryResult, Suspense, Variables,
};

/// Turns one fragment read into a card.
pub type CardReader = fn(Value) -> Result<CardView, FetchError>;

/// Static description of a list: which query, where its entries live, and how to draw them.
pub struct ViewSpec {
    pub operation: &'static Operation,
    pub fragment: &'static Fragment,
    /// Root connection field, e.g. `allPeople`.
    pub connection: &'static str,
    /// Entry list inside the connection, e.g. `people`.
    pub items: &'static str,
    pub noun: &'static str,
    /// Placeholder cards while the query is pending.
    pub skeleton: usize,
    pub read_card: CardReader,
}

/// Deserialize fragment data and map it through `card`.
pub fn read_with<T: DeserializeOwned>(
    value: Value,
    card: fn(&T) -> CardView,
) -> Result<CardView, FetchError> {
    let data: T = serde_json::from_value(value).map_err(|e| FetchError::Missing(e.to_string()))?;
    Ok(card(&data))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListModel {
    pub cards: Vec<CardView>,
    /// Server-reported total; may exceed `cards.len()`.
    pub total: u64,
    pub noun: &'static str,
}

impl ListModel {
    pub fn summary(&self) -> String {
        format!("Showing {} of {} {}", self.cards.len(), self.total, self.noun)
    }
}

pub struct ListView {
    spec: &'static ViewSpec,
    lifecycle: QueryLifecycle,
    /// Last built model and the store version it was built from.
    cache: Option<(u64, ListModel)>,
    failure: Option<FetchError>,
    selected: usize,
}

impl ListView {
    /// A view whose query the shell dispatches; pending until [`ListView::preload`].
    pub fn preloaded(spec: &'static ViewSpec) -> Self {
        Self::with_lifecycle(spec, QueryLifecycle::Idle)
    }

    /// A view that dispatches its own query the first time it is resolved.
    pub fn lazy(spec: &'static ViewSpec, variables: Variables) -> Self {
        Self::with_lifecycle(spec, QueryLifecycle::LazyTriggered(variables))
    }

    fn with_lifecycle(spec: &'static ViewSpec, lifecycle: QueryLifecycle) -> Self {
        Self {
            spec,
            lifecycle,
            cache: None,
            failure: None,
            selected: 0,
        }
    }

    pub fn spec(&self) -> &'static ViewSpec {
        self.spec
    }

    pub fn lifecycle(&self) -> &QueryLifecycle {
        &self.lifecycle
    }

    pub fn preload(&mut self, query: QueryRef) {
        self.lifecycle = QueryLifecycle::Preloaded(query);
        self.cache = None;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if let Some((_, model)) = &self.cache {
            if self.selected + 1 < model.cards.len() {
                self.selected += 1;
            }
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_card(&self) -> Option<&CardView> {
        self.cache
            .as_ref()
            .and_then(|(_, model)| model.cards.get(self.selected))
    }

    /// Resolve and remember the outcome for [`ListView::current`].
    pub fn refresh(&mut self, env: &mut Environment) {
        let failure = match self.resolve(env) {
            Suspense::Failed(e) => Some(e),
            _ => None,
        };
        self.failure = failure;
    }

    /// Outcome of the last [`ListView::refresh`], without touching the environment.
    pub fn current(&self) -> Suspense<&ListModel> {
        if let Some(e) = &self.failure {
            return Suspense::Failed(e.clone());
        }
        match &self.cache {
            Some((_, model)) => Suspense::Ready(model),
            None => Suspense::Pending,
        }
    }

    /// Suspending read of the whole list. Rebuilt only when the store changed.
    pub fn resolve(&mut self, env: &mut Environment) -> Suspense<&ListModel> {
        let version = env.store().version();
        if matches!(&self.cache, Some((v, _)) if *v != version) {
            self.cache = None;
        }
        if self.cache.is_none() {
            let spec = self.spec;
            let model = match self
                .lifecycle
                .resolve(spec.operation, env)
                .and_then(|result| build_model(spec, &result, env))
            {
                Suspense::Pending => return Suspense::Pending,
                Suspense::Failed(e) => return Suspense::Failed(e),
                Suspense::Ready(model) => model,
            };
            log::debug!(
                "{}: {} (store v{version})",
                self.spec.operation.name(),
                model.summary()
            );
            self.selected = self.selected.min(model.cards.len().saturating_sub(1));
            self.cache = Some((version, model));
        }
        match &self.cache {
            Some((_, model)) => Suspense::Ready(model),
            None => Suspense::Pending,
        }
    }
}

/// Drop null entries, resolve each remaining fragment ref, and build its card.
pub fn build_model(
    spec: &ViewSpec,
    result: &QueryResult,
    env: &Environment,
) -> Result<ListModel, FetchError> {
    let connection = result.data.get(spec.connection).filter(|c| !c.is_null());
    let total = connection
        .and_then(|c| c.get("totalCount"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let entries = connection
        .and_then(|c| c.get(spec.items))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut cards = Vec::with_capacity(entries.len());
    for entry in entries.iter().filter(|e| !e.is_null()) {
        let Some(fragment_ref) = FragmentRef::from_masked(entry, spec.fragment, &result.variables)
        else {
            return Err(FetchError::Missing(format!(
                "{} entry without {}",
                spec.items,
                spec.fragment.name()
            )));
        };
        let data = env.read_fragment(spec.fragment, &fragment_ref)?;
        cards.push((spec.read_card)(data)?);
    }
    Ok(ListModel {
        cards,
        total,
        noun: spec.noun,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::card::EntityKind;

    #[test]
    fn summary_reports_both_counts() {
        let model = ListModel {
            cards: vec![
                CardView::new(EntityKind::Character, "1", "Luke"),
                CardView::new(EntityKind::Character, "2", "Leia"),
            ],
            total: 82,
            noun: "characters",
        };
        assert_eq!(model.summary(), "Showing 2 of 82 characters");
    }
}
