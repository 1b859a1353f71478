//! populator-host binary
//!
//! Starts the population engine behind a [`SceneHostAgent`] and drives it
//! with a scripted set of spawn intents, standing in for the UI and scene
//! host of a real AR app. Every publication is decoded and logged.
//!
//! ## Configuration (env / TOML via `config` crate)
//!
//! | Key                        | Default     | Description                        |
//! |----------------------------|-------------|-------------------------------------|
//! | `SCENE_SESSION`            | `default`   | Session tag on outbound events      |
//! | `SCENE_SEED`               | `42`        | Sampling seed                       |
//! | `SCENE_INITIAL_COUNT`      | `2`         | One-shot initial population size    |
//! | `SCENE_SEED_COUNT`         | `5`         | First-batch object count            |
//! | `SCENE_BATCHES`            | `4`         | Spawn requests to issue             |
//! | `SCENE_SPAWN_INTERVAL_MS`  | `500`       | Delay between spawn requests        |
//! | `SCENE_CONFIG`             | *(unset)*   | TOML file for population parameters |
//! | `SCENE_POPULATION_*`       | *(unset)*   | Per-field population overrides      |

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use scene_populator::{
    host::{HostCommand, Publication, SceneHostAgent, SceneHostConfig},
    protocol::{subjects, BatchCompleted, ObjectPlaced, SceneEvent},
    types::PopulationConfig,
    PopulationEngine,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "populator-host", about = "Scene Population Engine demo host", version)]
struct Args {
    /// Session tag stamped on outbound events
    #[arg(long, env = "SCENE_SESSION", default_value = "default")]
    session: String,

    /// Sampling seed
    #[arg(long, env = "SCENE_SEED")]
    seed: Option<u64>,

    /// One-shot initial population size
    #[arg(long, env = "SCENE_INITIAL_COUNT")]
    initial_count: Option<u32>,

    /// First-batch object count
    #[arg(long, env = "SCENE_SEED_COUNT")]
    seed_count: Option<u32>,

    /// Spawn requests to issue before printing stats
    #[arg(long, env = "SCENE_BATCHES", default_value_t = 4)]
    batches: u32,

    /// Delay between spawn requests in milliseconds
    #[arg(long, env = "SCENE_SPAWN_INTERVAL_MS", default_value_t = 500)]
    spawn_interval_ms: u64,

    /// TOML file with population parameters (see PopulationConfig)
    #[arg(long, env = "SCENE_CONFIG")]
    config: Option<String>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Layered population config: struct defaults, then an optional TOML file,
/// then `SCENE_POPULATION_*` environment overrides.
fn load_population_config(path: Option<&str>) -> Result<PopulationConfig> {
    let defaults = config::Config::try_from(&PopulationConfig::default())
        .context("failed to build default population config")?;

    let mut builder = config::Config::builder().add_source(defaults);
    builder = match path {
        Some(p) => builder.add_source(config::File::with_name(p)),
        None => builder.add_source(config::File::with_name("populator").required(false)),
    };

    builder
        .add_source(
            config::Environment::with_prefix("SCENE_POPULATION")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to load population config")?
        .try_deserialize()
        .context("invalid population config")
}

// ---------------------------------------------------------------------------
// Stand-in scene host
// ---------------------------------------------------------------------------

/// Decode and log every publication — what a real renderer would turn into
/// anchored meshes.
async fn render_events(mut events: mpsc::Receiver<Publication>) {
    while let Some(publication) = events.recv().await {
        match publication.subject {
            subjects::OBJECT_PLACED => {
                match serde_json::from_slice::<SceneEvent<ObjectPlaced>>(&publication.payload) {
                    Ok(event) => {
                        let o = event.payload;
                        tracing::info!(
                            "place {} {} at ({:.2}, {:.2}, {:.2}) hue {:.1}",
                            o.object_id,
                            o.shape,
                            o.x,
                            o.y,
                            o.z,
                            o.hue,
                        );
                    }
                    Err(e) => tracing::warn!("bad {} payload: {}", publication.subject, e),
                }
            }
            subjects::BATCH_COMPLETED => {
                match serde_json::from_slice::<SceneEvent<BatchCompleted>>(&publication.payload) {
                    Ok(event) => {
                        let b = event.payload;
                        tracing::info!(
                            "batch {} completed: {} spawned, {} objects in scene",
                            b.batch,
                            b.spawned,
                            b.total_objects,
                        );
                    }
                    Err(e) => tracing::warn!("bad {} payload: {}", publication.subject, e),
                }
            }
            other => tracing::warn!("unexpected subject {}", other),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scene_populator=debug".parse()?)
                .add_directive("populator_host=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut population = load_population_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        population.rng_seed = seed;
    }
    if let Some(count) = args.initial_count {
        population.initial_count = count;
    }
    if let Some(count) = args.seed_count {
        population.batch_seed_count = count;
    }

    tracing::info!(
        "Starting populator-host (session='{}', seed={}, initial={}, seed_count={}, batches={})",
        args.session,
        population.rng_seed,
        population.initial_count,
        population.batch_seed_count,
        args.batches,
    );

    // Assemble engine, agent, and the stand-in scene host.
    let engine = Arc::new(Mutex::new(PopulationEngine::seeded(population.clone())));

    let (event_tx, event_rx) = mpsc::channel(256);
    let (cmd_tx, cmd_rx) = mpsc::channel(16);

    let agent = SceneHostAgent::new(
        SceneHostConfig {
            session: args.session.clone(),
        },
        engine,
        event_tx,
    );

    let agent_handle = tokio::spawn(agent.run(cmd_rx));
    let render_handle = tokio::spawn(render_events(event_rx));

    // Scripted drive: initial population, then spawn intents on an interval.
    cmd_tx
        .send(HostCommand::Populate {
            count: population.initial_count,
        })
        .await?;

    let mut timer =
        tokio::time::interval(std::time::Duration::from_millis(args.spawn_interval_ms.max(1)));
    for _ in 0..args.batches {
        timer.tick().await;

        let (done_tx, done_rx) = oneshot::channel();
        cmd_tx.send(HostCommand::Spawn { completion: done_tx }).await?;
        match done_rx.await {
            Ok(done) => tracing::info!(
                "spawn request served: batch {} ({} objects)",
                done.batch,
                done.spawned,
            ),
            // Dropped sender: the engine was busy and the request was a no-op.
            Err(_) => tracing::info!("spawn request dropped (batch in flight)"),
        }
    }

    let (stats_tx, stats_rx) = oneshot::channel();
    cmd_tx.send(HostCommand::Stats { reply: stats_tx }).await?;
    let stats = stats_rx.await.context("agent dropped stats reply")?;
    tracing::info!(
        "final stats: {} batches accepted, {} rejected, {} objects emitted, next batch size {}",
        stats.batches_accepted,
        stats.batches_rejected,
        stats.objects_emitted,
        stats.next_batch_size,
    );

    // Close the command channel so the agent drains and exits cleanly.
    drop(cmd_tx);
    agent_handle.await??;
    render_handle.await?;
    Ok(())
}
