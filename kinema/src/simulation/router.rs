use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::core::schema::{NormalizedParameters, Topic};
use crate::simulation::object::Stage;

/// Builds the objects of a scene from normalized parameters.
pub type Constructor = Arc<dyn Fn(&NormalizedParameters, &mut Stage<'_>)>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("topic must be a non-empty string")]
    EmptyTopic,
    #[error("unknown topic \"{0}\"")]
    UnknownTopic(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Ready,
}

impl RouteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteStatus::Ready => "ready",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    Registered,
    Stub,
}

/// The outcome of routing: which constructor will build the scene.
#[derive(Clone)]
pub struct RuntimeHandle {
    topic: Topic,
    source: RouteSource,
    constructor: Constructor,
}

impl RuntimeHandle {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn source(&self) -> RouteSource {
        self.source
    }

    pub fn status(&self) -> RouteStatus {
        RouteStatus::Ready
    }

    pub fn is_stub(&self) -> bool {
        self.source == RouteSource::Stub
    }

    pub fn constructor(&self) -> Constructor {
        Arc::clone(&self.constructor)
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("topic", &self.topic)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Topic -> scene constructor table.
#[derive(Default, Clone)]
pub struct SimulationRouter {
    handlers: HashMap<Topic, Constructor>,
}

impl SimulationRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `constructor` to `topic`. Later registrations replace earlier ones.
    pub fn register<F>(&mut self, topic: &str, constructor: F) -> Result<&mut Self, RouterError>
    where
        F: Fn(&NormalizedParameters, &mut Stage<'_>) + 'static,
    {
        let key = Topic::canonical(topic);
        if key.is_empty() {
            return Err(RouterError::EmptyTopic);
        }
        let topic: Topic = key.parse().map_err(|_| RouterError::UnknownTopic(key.clone()))?;
        if self.handlers.insert(topic, Arc::new(constructor)).is_some() {
            info!(target: "router", %topic, "handler replaced");
        }
        Ok(self)
    }

    pub fn is_registered(&self, topic: Topic) -> bool {
        self.handlers.contains_key(&topic)
    }

    /// Selects the constructor for `params.topic`, or a stub that adds no objects.
    pub fn route(&self, params: &NormalizedParameters) -> RuntimeHandle {
        let topic = params.topic;
        match self.handlers.get(&topic) {
            Some(constructor) => {
                info!(target: "router", %topic, "custom handler");
                RuntimeHandle {
                    topic,
                    source: RouteSource::Registered,
                    constructor: Arc::clone(constructor),
                }
            }
            None => {
                warn!(target: "router", %topic, sub_topic = params.sub_topic.or(""), "no handler; using stub");
                RuntimeHandle {
                    topic,
                    source: RouteSource::Stub,
                    constructor: Arc::new(empty_scene),
                }
            }
        }
    }
}

fn empty_scene(_params: &NormalizedParameters, _stage: &mut Stage<'_>) {}
