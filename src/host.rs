//! Host integration – SceneHostAgent bridges the engine to a scene host.
//!
//! ## Command contract (inbound)
//!
//! | Command    | Payload           | Effect                                  |
//! |------------|-------------------|------------------------------------------|
//! | `Populate` | count             | one-shot initial population, frame 0     |
//! | `Spawn`    | completion sender | one batch, or a silent busy-reject       |
//! | `Stats`    | reply sender      | reply with `EngineStats`                 |
//! | `Snapshot` | reply sender      | reply with the full `SceneSnapshot`      |
//!
//! ## Event contract (outbound)
//!
//! | Subject                  | Payload type                    |
//! |--------------------------|---------------------------------|
//! | `scene.object.placed`    | `SceneEvent<ObjectPlaced>`      |
//! | `scene.batch.completed`  | `SceneEvent<BatchCompleted>`    |
//!
//! For an accepted batch the ordering guarantee is: every `ObjectPlaced`
//! publication, then the `BatchCompleted` publication, then the exactly-once
//! completion reply to the issuing context, then the engine guard clears.
//! A rejected spawn publishes nothing and drops the completion sender — the
//! requester observes absence of a signal, never an error.

use bytes::Bytes;
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::engine::{PlacementDirective, PopulationEngine, SpawnOutcome};
use crate::protocol::{subjects, BatchCompleted, ObjectPlaced, SceneEvent, SceneSnapshot};
use crate::scene::{PlacedObject, SceneRegistry};
use crate::types::EngineStats;

// ---------------------------------------------------------------------------
// Commands & publications
// ---------------------------------------------------------------------------

/// Discrete events driving the agent, typically translated from UI actions.
#[derive(Debug)]
pub enum HostCommand {
    /// Place the one-shot initial population.
    Populate { count: u32 },
    /// One press of the spawn trigger. The completion sender fires exactly
    /// once if the request is accepted, and is dropped if it is rejected.
    Spawn {
        completion: oneshot::Sender<BatchCompleted>,
    },
    Stats {
        reply: oneshot::Sender<EngineStats>,
    },
    Snapshot {
        reply: oneshot::Sender<SceneSnapshot>,
    },
}

/// One serialized wire event, ready for whatever transport the scene host
/// listens on.
#[derive(Debug, Clone)]
pub struct Publication {
    pub subject: &'static str,
    pub payload: Bytes,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum HostError {
    /// The scene host dropped its end of the event channel.
    #[error("scene host disconnected")]
    HostDisconnected,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SceneHostConfig {
    /// Session tag stamped on every outbound envelope.
    pub session: String,
}

impl Default for SceneHostConfig {
    fn default() -> Self {
        Self {
            session: "default".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SceneHostAgent
// ---------------------------------------------------------------------------

/// Wraps a [`PopulationEngine`] and drives it from host commands.
///
/// Call [`SceneHostAgent::run`] inside a Tokio task, or [`handle`]
/// one command at a time from a host with its own loop.
///
/// [`handle`]: SceneHostAgent::handle
pub struct SceneHostAgent {
    config: SceneHostConfig,
    engine: Arc<Mutex<PopulationEngine>>,
    registry: SceneRegistry,
    events: mpsc::Sender<Publication>,
}

impl SceneHostAgent {
    pub fn new(
        config: SceneHostConfig,
        engine: Arc<Mutex<PopulationEngine>>,
        events: mpsc::Sender<Publication>,
    ) -> Self {
        Self {
            config,
            engine,
            registry: SceneRegistry::new(),
            events,
        }
    }

    /// Process commands until the channel closes or SIGINT arrives.
    pub async fn run(mut self, mut commands: mpsc::Receiver<HostCommand>) -> Result<(), HostError> {
        info!("SceneHostAgent active (session='{}')", self.config.session);
        loop {
            tokio::select! {
                cmd = commands.recv() => {
                    match cmd {
                        Some(cmd) => self.handle(cmd).await?,
                        None => {
                            info!("command channel closed, SceneHostAgent stopping");
                            return Ok(());
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("SceneHostAgent shutting down (SIGINT)");
                    return Ok(());
                }
            }
        }
    }

    /// Process a single command.
    pub async fn handle(&mut self, cmd: HostCommand) -> Result<(), HostError> {
        match cmd {
            HostCommand::Populate { count } => {
                // Hold the lock only long enough to sample, then release
                // before publishing.
                let directives = self.engine.lock().initial_population(count);
                for (ordinal, directive) in directives.into_iter().enumerate() {
                    self.place(0, ordinal, directive).await?;
                }
            }

            HostCommand::Spawn { completion } => {
                let outcome = self.engine.lock().request_spawn_batch();
                match outcome {
                    SpawnOutcome::InProgress => {
                        // Dropping `completion` is the whole signal: the
                        // requester sees a closed channel, not an error.
                        debug!("spawn intent rejected, completion sender dropped");
                    }
                    SpawnOutcome::Accepted(batch) => {
                        let index = batch.index;
                        let spawned = batch.directives.len() as u32;
                        for (ordinal, directive) in batch.directives.into_iter().enumerate() {
                            self.place(index, ordinal, directive).await?;
                        }

                        let completed = BatchCompleted {
                            batch: index,
                            spawned,
                            total_objects: self.registry.len(),
                        };
                        self.publish(subjects::BATCH_COMPLETED, index, &completed)
                            .await?;
                        if completion.send(completed).is_err() {
                            warn!("batch {} completion receiver dropped", index);
                        }
                        self.engine.lock().complete_batch();
                    }
                }
            }

            HostCommand::Stats { reply } => {
                let stats = self.engine.lock().stats();
                let _ = reply.send(stats);
            }

            HostCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
        }
        Ok(())
    }

    /// Full placement history for a reconnecting host.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            objects: self
                .registry
                .ordered()
                .into_iter()
                .map(Self::wire_object)
                .collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    async fn place(
        &mut self,
        batch: u64,
        ordinal: usize,
        directive: PlacementDirective,
    ) -> Result<(), HostError> {
        let placed = PlacedObject {
            id: format!("obj.{}.{}", batch, ordinal),
            batch,
            shape: directive.shape,
            color: directive.color,
            position: directive.position,
            scale: directive.scale,
        };

        let msg = Self::wire_object(&placed);
        self.publish(subjects::OBJECT_PLACED, batch, &msg).await?;
        self.registry.insert(placed);
        Ok(())
    }

    fn wire_object(placed: &PlacedObject) -> ObjectPlaced {
        ObjectPlaced {
            object_id: placed.id.clone(),
            batch: placed.batch,
            shape: placed.shape,
            hue: placed.color.h,
            saturation: placed.color.s,
            value: placed.color.v,
            x: placed.position.x,
            y: placed.position.y,
            z: placed.position.z,
            scale: placed.scale,
            metadata: serde_json::Value::Null,
        }
    }

    // -----------------------------------------------------------------------
    // Publish helper
    // -----------------------------------------------------------------------

    /// Serialize `payload` into an envelope and send it to the scene host.
    ///
    /// Serialization failures are logged and swallowed — a single bad event
    /// should not take the agent down. A closed event channel does: the
    /// scene host is gone and there is nobody left to place objects for.
    async fn publish<T: Serialize>(
        &self,
        subject: &'static str,
        frame: u64,
        payload: &T,
    ) -> Result<(), HostError> {
        let event = SceneEvent::new(self.config.session.as_str(), frame, payload);
        match serde_json::to_vec(&event) {
            Ok(bytes) => self
                .events
                .send(Publication {
                    subject,
                    payload: Bytes::from(bytes),
                })
                .await
                .map_err(|_| HostError::HostDisconnected),
            Err(e) => {
                warn!("failed to serialize event for {}: {}", subject, e);
                Ok(())
            }
        }
    }
}
