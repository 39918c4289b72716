//! Shared fixtures: a scripted transport and helpers to pump events and render.

#![allow(dead_code)]

use async_trait::async_trait;
use ratatui::{backend::TestBackend, Terminal};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use swapix::config::Config;
use swapix::graphql::{Environment, GraphQlRequest, Transport, TransportError};
use swapix::types::AppEvent;
use swapix::{ui, App};

/// Replies by operation name. Operations without a reply never complete.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: HashMap<&'static str, Result<Value, TransportError>>,
    calls: Mutex<Vec<(&'static str, Value)>>,
}

impl ScriptedTransport {
    pub fn reply(mut self, operation: &'static str, body: Value) -> Self {
        self.replies.insert(operation, Ok(body));
        self
    }

    pub fn fail(mut self, operation: &'static str, err: TransportError) -> Self {
        self.replies.insert(operation, Err(err));
        self
    }

    /// `(operation, variables)` of every request that reached the network.
    pub fn calls(&self) -> Vec<(&'static str, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: GraphQlRequest) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.operation, request.variables.clone()));
        match self.replies.get(request.operation) {
            Some(reply) => reply.clone(),
            None => std::future::pending().await,
        }
    }
}

pub fn app_with(transport: Arc<ScriptedTransport>) -> (App, UnboundedReceiver<AppEvent>) {
    let (tx, rx) = unbounded_channel();
    let env = Environment::new(transport, tx.clone());
    (App::new(env, tx, &Config::default()), rx)
}

/// Feed every event that arrives before the queue goes quiet.
pub async fn settle(app: &mut App, rx: &mut UnboundedReceiver<AppEvent>) -> usize {
    let mut handled = 0;
    while let Ok(Some(ev)) = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await {
        app.on_event(ev);
        handled += 1;
    }
    handled
}

/// Draw one frame and return the screen, one line per row.
pub fn render(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buf = terminal.backend().buffer();
    (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
