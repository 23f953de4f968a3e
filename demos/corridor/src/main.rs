//! corridor: one warden guarding a corridor.
//!
//! Loads the agent configuration from JSON and the patrol route from CSV,
//! builds a corridor with a crate to hop over, and walks a scripted target
//! past the guard.  State transitions are printed as they happen; the full
//! trace lands in `output/corridor/`.
//!
//! ```text
//! corridor [agent.json] [route.csv]
//! RUST_LOG=wd_behavior=debug corridor
//! ```

mod scene;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wd_behavior::{AnimCue, BehaviorConfig, BehaviorEvent};
use wd_core::Tick;
use wd_output::{CsvTraceWriter, TraceObserver, TraceWriter};
use wd_schedule::load_route_csv;
use wd_sight::{FieldOfView, SightConfig, SightRay, VisibilityMesh};
use wd_sim::{SimBuilder, SimConfig, SimObserver, TargetHandle, TickSnapshot, TimedAnimator};
use wd_world::{KinematicBody, Layer, LayerMask};

use scene::{build_world, TargetScript};

// ── Constants ─────────────────────────────────────────────────────────────────

const FRAME_SECS:   f64  = 1.0 / 60.0;
const EXTRA_SECS:   f64  = 12.0; // keep running after the script ends
const START:        Vec2 = Vec2::new(0.0, 0.5);
const BODY_HALF:    Vec2 = Vec2::new(0.4, 0.5);
const TARGET_HALF:  Vec2 = Vec2::new(0.3, 0.5);
const OUTPUT_DIR:   &str = "output/corridor";

// ── Agent file ────────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct AgentFile {
    behavior: BehaviorConfig,
    sight:    SightConfig,
    sim:      SimConfig,
    fov:      Option<FieldOfView>,
    animator: AnimatorFile,
}

#[derive(Deserialize)]
#[serde(default)]
struct AnimatorFile {
    detect_secs: f64,
    attack_secs: f64,
}

impl Default for AnimatorFile {
    fn default() -> Self {
        Self { detect_secs: 0.6, attack_secs: 0.5 }
    }
}

fn load_agent(path: &Path) -> Result<AgentFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints transitions and tallies events, forwarding everything to the trace.
struct DemoObserver<W: TraceWriter> {
    trace:  TraceObserver<W>,
    counts: BTreeMap<&'static str, usize>,
    step:   f64,
}

impl<W: TraceWriter> SimObserver for DemoObserver<W> {
    fn on_tick_end(&mut self, snapshot: &TickSnapshot) {
        self.trace.on_tick_end(snapshot);
    }

    fn on_event(&mut self, tick: Tick, event: &BehaviorEvent) {
        *self.counts.entry(event.kind()).or_default() += 1;
        if let BehaviorEvent::StateChanged { from, to } = event {
            println!("{:>7.2}s  {:<7} → {}", tick.0 as f64 * self.step, from.as_str(), to);
        }
        self.trace.on_event(tick, event);
    }

    fn on_anim_cue(&mut self, tick: Tick, cue: AnimCue) {
        self.trace.on_anim_cue(tick, cue);
    }

    fn on_sight_rays(&mut self, tick: Tick, rays: &[SightRay]) {
        self.trace.on_sight_rays(tick, rays);
    }

    fn on_mesh(&mut self, tick: Tick, mesh: &VisibilityMesh) {
        self.trace.on_mesh(tick, mesh);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.trace.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let agent_path = args.next().unwrap_or_else(|| data.join("agent.json"));
    let route_path = args.next().unwrap_or_else(|| data.join("route.csv"));

    println!("=== corridor — warden demo ===");

    // 1. Configuration.
    let agent = load_agent(&agent_path)?;
    let route = load_route_csv(&route_path)
        .with_context(|| format!("loading route {}", route_path.display()))?;
    println!("Route: {} waypoints from {}", route.len(), route_path.display());

    // 2. Level, guard body and target.
    let world = build_world()?;
    let body = KinematicBody::new(START, BODY_HALF, LayerMask::from_layers(&[Layer::GROUND, Layer::WALL]));
    let script = TargetScript::corridor();
    let target = TargetHandle::new(script.position_at(0.0), TARGET_HALF);

    // 3. Sim.
    let step = agent.sim.physics_step_secs;
    let tag = agent.sim.target_tag.clone();
    let mut builder = SimBuilder::new(agent.sim, world, body, agent.behavior, route, agent.sight)
        .target(tag, target.clone())
        .animator(TimedAnimator::new(agent.animator.detect_secs, agent.animator.attack_secs));
    if let Some(fov) = agent.fov {
        builder = builder.field_of_view(fov);
    }
    let mut sim = builder.build()?;

    // 4. Trace output.
    let writer = CsvTraceWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = DemoObserver { trace: TraceObserver::new(writer), counts: BTreeMap::new(), step };

    // 5. Run: move the target, then advance one visual frame.
    let total = script.duration() + EXTRA_SECS;
    println!("Running {total:.1} s at {:.0} fps, physics step {step} s", 1.0 / FRAME_SECS);
    println!();

    let t0 = Instant::now();
    while sim.now().secs() < total {
        target.set_position(script.position_at(sim.now().secs()));
        sim.frame(FRAME_SECS, &mut obs)?;
    }
    obs.on_sim_end(sim.current_tick());
    let elapsed = t0.elapsed();
    info!(ticks = sim.current_tick().0, elapsed_ms = elapsed.as_millis() as u64, "run finished");

    if let Some(e) = obs.trace.take_error() {
        eprintln!("trace error: {e}");
    }

    // 6. Summary.
    println!();
    println!("Final state: {} at x = {:.2}", sim.state(), sim.body().position.x);
    println!("{:<18} {:>6}", "Event", "Count");
    println!("{}", "-".repeat(25));
    for (kind, n) in &obs.counts {
        println!("{kind:<18} {n:>6}");
    }
    println!();
    println!("Trace written to {OUTPUT_DIR}/");

    Ok(())
}
