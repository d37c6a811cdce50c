//! Single-flight background optimization with a progress stream.
//!
//! An [`OptimizationService`] runs at most one optimization at a time on a
//! dedicated worker thread. The worker reports each iteration and the final
//! outcome as [`Event`]s on an unbounded channel, read through
//! [`OptimizationService::events`]:
//!
//! ```no_run
//! use std::{sync::Arc, time::Duration};
//! use wing_opt::service::{Event, MemorySink, OptimizationService, ServiceConfig};
//!
//! let service = OptimizationService::new(ServiceConfig::default());
//! let handle = service.start("max_CL", Arc::new(MemorySink::new())).unwrap();
//!
//! while let Some(event) = service.events().next_timeout(Duration::from_secs(5)) {
//!     println!("{}", serde_json::to_string(&event).unwrap());
//!     if event.is_terminal() {
//!         break;
//!     }
//! }
//! handle.join().unwrap();
//! ```
//!
//! A second [`start`](OptimizationService::start) while a run is active
//! returns [`StartError::Busy`] immediately. On every outcome, panics
//! included, the run flag is released together with the terminal event, so a
//! listener may start again as soon as it sees that event.

mod artifact;
mod error;
mod event;
mod guard;
mod reader;

pub use artifact::{ArtifactError, ArtifactSink, MemorySink};
pub use error::{RunError, StartError};
pub use event::{CompletionStatus, Event};
pub use reader::EventReader;

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        mpsc::{self, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::geometry::WingBaseline;
use crate::models::aero::AerodynamicMetrics;
use crate::optimize::{self, CemConfig, Objective, OptimizedDesign};
use crate::support::mesh::{MeshConfig, build_mesh};

use guard::RunGuard;

/// Settings shared by every run of a service.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ServiceConfig {
    pub baseline: WingBaseline,
    pub cem: CemConfig,
    pub mesh: MeshConfig,

    /// Sleep after each iteration, to slow progress down for live display.
    pub pacing: Duration,
}

/// Owner of the run flag and the progress channel.
#[derive(Debug)]
pub struct OptimizationService {
    config: ServiceConfig,
    running: Arc<Mutex<bool>>,
    sender: Sender<Event>,
    events: EventReader,
}

/// Handle to a started run.
#[derive(Debug)]
pub struct RunHandle {
    objective: Objective,
    worker: JoinHandle<Result<OptimizedDesign, RunError>>,
}

impl RunHandle {
    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Whether the worker has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Waits for the run and returns its design.
    ///
    /// # Errors
    ///
    /// Returns the [`RunError`] that aborted the run.
    pub fn join(self) -> Result<OptimizedDesign, RunError> {
        self.worker.join().unwrap_or_else(|payload| {
            Err(RunError::Panicked {
                message: panic_message(payload.as_ref()),
            })
        })
    }
}

impl OptimizationService {
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            config,
            running: Arc::new(Mutex::new(false)),
            sender,
            events: EventReader::new(receiver),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Whether a run is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        *self.running.lock()
    }

    /// The progress channel shared by all runs of this service.
    #[must_use]
    pub fn events(&self) -> &EventReader {
        &self.events
    }

    /// Starts a run for the objective named by `objective` in the background.
    ///
    /// The token is checked before the run flag, so an invalid token is
    /// reported as such even while another run is active.
    ///
    /// # Errors
    ///
    /// Returns [`StartError`] if the token is unknown, the optimizer
    /// configuration is invalid, a run is already active, or the worker
    /// thread cannot be spawned.
    pub fn start(
        &self,
        objective: &str,
        sink: Arc<dyn ArtifactSink>,
    ) -> Result<RunHandle, StartError> {
        let objective: Objective = objective.parse()?;
        self.config.cem.validate()?;

        let guard = RunGuard::acquire(&self.running).ok_or(StartError::Busy)?;

        let config = self.config;
        let sender = self.sender.clone();

        let worker = thread::Builder::new()
            .name(format!("wing-opt-{objective}"))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    execute(&config, objective, sink.as_ref(), &sender)
                }));

                let result = outcome.unwrap_or_else(|payload| {
                    Err(RunError::Panicked {
                        message: panic_message(payload.as_ref()),
                    })
                });

                let terminal = match &result {
                    Ok((design, artifact_ref)) => {
                        info!(%objective, score = design.score, "run complete");
                        Event::complete(artifact_ref.clone())
                    }
                    Err(err @ RunError::Panicked { .. }) => {
                        error!(%objective, error = %err, "run panicked");
                        Event::failed(err)
                    }
                    Err(err) => {
                        warn!(%objective, error = %err, "run failed");
                        Event::failed(err)
                    }
                };

                guard.finish(|| emit(&sender, terminal));
                result.map(|(design, _)| design)
            })?;

        info!(%objective, "run started");
        Ok(RunHandle { objective, worker })
    }
}

/// Body of the worker thread, up to but excluding the terminal event.
///
/// Returns the design and the reference the sink stored it under.
fn execute(
    config: &ServiceConfig,
    objective: Objective,
    sink: &dyn ArtifactSink,
    sender: &Sender<Event>,
) -> Result<(OptimizedDesign, String), RunError> {
    let optimum = optimize::run(&config.baseline, objective, &config.cem, |step| {
        if let Some(best) = step.best.filter(|_| sink.wants_live_mesh()) {
            match build_mesh(&best.geometry, &config.mesh) {
                Ok(mesh) => sink.live(step.index, &mesh),
                Err(err) => warn!(error = %err, "skipping live mesh"),
            }
        }

        emit(
            sender,
            Event::Progress {
                iteration: step.index,
                metrics: step
                    .best
                    .map_or_else(AerodynamicMetrics::failed, |best| best.metrics),
                objective,
            },
        );

        if !config.pacing.is_zero() {
            thread::sleep(config.pacing);
        }
    })?;

    let design = optimum.to_design(objective);
    let mesh = build_mesh(&optimum.geometry, &config.mesh)?;
    let artifact_ref = sink.store(&design, &mesh)?;

    Ok((design, artifact_ref))
}

fn emit(sender: &Sender<Event>, event: Event) {
    if sender.send(event).is_err() {
        debug!("event receiver dropped");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::mpsc::Receiver;

    use crate::support::mesh::Mesh;

    const WAIT: Duration = Duration::from_secs(30);

    fn quick_config() -> ServiceConfig {
        ServiceConfig {
            cem: CemConfig {
                iterations: 3,
                population: 8,
                ..CemConfig::default()
            },
            mesh: MeshConfig {
                span_stations: 4,
                airfoil_points: 9,
                ..MeshConfig::default()
            },
            ..ServiceConfig::default()
        }
    }

    /// Blocks in `store` until released.
    struct GateSink {
        gate: Mutex<Receiver<()>>,
    }

    impl ArtifactSink for GateSink {
        fn store(&self, _design: &OptimizedDesign, _mesh: &Mesh) -> Result<String, ArtifactError> {
            self.gate
                .lock()
                .recv()
                .map_err(|_| ArtifactError("gate closed".into()))?;
            Ok("gated".into())
        }
    }

    struct PanickingSink;

    impl ArtifactSink for PanickingSink {
        fn store(&self, _design: &OptimizedDesign, _mesh: &Mesh) -> Result<String, ArtifactError> {
            panic!("sink exploded");
        }
    }

    struct FailingSink;

    impl ArtifactSink for FailingSink {
        fn store(&self, _design: &OptimizedDesign, _mesh: &Mesh) -> Result<String, ArtifactError> {
            Err(ArtifactError("disk full".into()))
        }
    }

    fn collect_until_terminal(service: &OptimizationService) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(event) = service.events().next_timeout(WAIT) {
            let terminal = event.is_terminal();
            events.push(event);
            if terminal {
                break;
            }
        }
        events
    }

    #[test]
    fn streams_progress_then_completion() {
        let service = OptimizationService::new(quick_config());
        let sink = Arc::new(MemorySink::with_live_mesh());

        let handle = service.start("max_CL", sink.clone()).unwrap();
        let events = collect_until_terminal(&service);
        let design = handle.join().unwrap();

        assert_eq!(events.len(), 4);
        for (i, event) in events[..3].iter().enumerate() {
            match event {
                Event::Progress {
                    iteration,
                    objective,
                    ..
                } => {
                    assert_eq!(*iteration, i + 1);
                    assert_eq!(*objective, Objective::MaxLift);
                }
                other => panic!("expected progress, got {other:?}"),
            }
        }
        assert_eq!(events[3], Event::complete("memory://0"));

        assert_eq!(design.objective, Objective::MaxLift);
        assert_eq!(sink.designs(), [design]);
        assert_eq!(sink.mesh("memory://0").unwrap().triangle_count(), 2 * 3 * 16 + 2 * 16);
        assert_eq!(sink.latest_live().map(|(iteration, _)| iteration), Some(3));
        assert!(!service.is_running());
    }

    #[test]
    fn second_start_while_running_is_busy() {
        let service = OptimizationService::new(quick_config());
        let (release, gate) = mpsc::channel();
        let sink = Arc::new(GateSink {
            gate: Mutex::new(gate),
        });

        let first = service.start("maximize_L_over_D", sink.clone()).unwrap();
        assert!(service.is_running());

        let second = service.start("max_CL", sink);
        assert!(matches!(second, Err(StartError::Busy)));

        release.send(()).unwrap();
        first.join().unwrap();
        assert!(!service.is_running());

        let third = service.start("max_CL", Arc::new(MemorySink::new())).unwrap();
        third.join().unwrap();
    }

    #[test]
    fn restart_on_terminal_event_is_never_busy() {
        let mut config = quick_config();
        config.cem.iterations = 1;
        config.cem.population = 2;
        let service = OptimizationService::new(config);

        let mut handle = service.start("max_CL", Arc::new(MemorySink::new())).unwrap();
        for _ in 0..50 {
            let events = collect_until_terminal(&service);
            assert!(events.last().is_some_and(Event::is_terminal));
            assert!(!service.is_running());

            let next = service.start("max_CL", Arc::new(MemorySink::new()));
            handle.join().unwrap();
            handle = next.unwrap();
        }
        handle.join().unwrap();
    }

    #[test]
    fn pacing_delays_each_iteration() {
        let mut config = quick_config();
        config.pacing = Duration::from_millis(20);
        let service = OptimizationService::new(config);

        let started = std::time::Instant::now();
        let handle = service.start("max_CL", Arc::new(MemorySink::new())).unwrap();
        let events = collect_until_terminal(&service);
        handle.join().unwrap();

        assert_eq!(events.len(), 4);
        assert!(started.elapsed() >= 3 * config.pacing);
    }

    #[test]
    fn invalid_objective_is_rejected_without_running() {
        let service = OptimizationService::new(quick_config());
        let result = service.start("fly_sideways", Arc::new(MemorySink::new()));

        assert!(matches!(result, Err(StartError::InvalidObjective(_))));
        assert!(!service.is_running());
        assert_eq!(service.events().try_next(), None);
    }

    #[test]
    fn invalid_config_is_rejected_without_running() {
        let mut config = quick_config();
        config.cem.elite_fraction = 0.0;
        let service = OptimizationService::new(config);

        let result = service.start("max_CL", Arc::new(MemorySink::new()));
        assert!(matches!(result, Err(StartError::Config(_))));
        assert!(!service.is_running());
    }

    #[test]
    fn panicking_sink_reports_error_and_releases_flag() {
        let service = OptimizationService::new(quick_config());

        let handle = service.start("max_e", Arc::new(PanickingSink)).unwrap();
        let events = collect_until_terminal(&service);
        let result = handle.join();

        match &result {
            Err(RunError::Panicked { message }) => assert_eq!(message, "sink exploded"),
            other => panic!("expected panic error, got {other:?}"),
        }
        match events.last() {
            Some(Event::Failed { error }) => assert!(error.contains("sink exploded")),
            other => panic!("expected failure event, got {other:?}"),
        }
        assert!(!service.is_running());
    }

    #[test]
    fn sink_error_reports_error_event() {
        let service = OptimizationService::new(quick_config());

        let handle = service.start("min_CD", Arc::new(FailingSink)).unwrap();
        let events = collect_until_terminal(&service);

        assert!(matches!(handle.join(), Err(RunError::Artifact(_))));
        assert!(matches!(events.last(), Some(Event::Failed { .. })));
        assert!(!service.is_running());
    }

    #[test]
    fn bad_mesh_config_fails_the_run() {
        let mut config = quick_config();
        config.mesh.span_stations = 1;
        let service = OptimizationService::new(config);

        let handle = service.start("max_CL", Arc::new(MemorySink::new())).unwrap();
        assert!(matches!(handle.join(), Err(RunError::Mesh(_))));
        assert!(!service.is_running());
    }

    #[test]
    fn service_is_shareable_across_threads() {
        let service = Arc::new(OptimizationService::new(quick_config()));
        let (release, gate) = mpsc::channel();
        let sink = Arc::new(GateSink {
            gate: Mutex::new(gate),
        });

        let first = service.start("max_CL", sink.clone()).unwrap();

        let contender = {
            let service = Arc::clone(&service);
            thread::spawn(move || service.start("max_CL", sink).map(|_| ()))
        };
        assert!(matches!(
            contender.join().unwrap(),
            Err(StartError::Busy)
        ));

        release.send(()).unwrap();
        first.join().unwrap();
    }
}
