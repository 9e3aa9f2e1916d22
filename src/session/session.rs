use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::geo::GeoPoint;
use crate::propagator::Propagator;
use crate::rate::{RateSample, RateTracker};
use crate::targeting::{compute_camera_view, select_nearest_target, CameraView};
use crate::targets::{generate_shifted_targets, generate_targets, ShiftConfig};

use super::config::{Config, ConfigError};
use super::error::SessionError;

/// One entry of the append-only position history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionSample {
    pub timestamp: DateTime<Utc>,
    pub position: GeoPoint,
}

#[derive(Debug, Clone, Serialize)]
pub enum SessionMode {
    Idle,
    Running { start: DateTime<Utc> },
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub mode: SessionMode,
    pub history: Vec<PositionSample>,
    pub last_view: Option<CameraView>,
    pub last_rate: Option<RateSample>,
}

#[derive(Debug)]
struct Shared {
    status: SessionStatus,
    rates: RateTracker,
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<Result<(), SessionError>>,
}

/// Process-wide tracking session: owns the target set, the append-only
/// position history and the latest camera/rate snapshots, all behind a
/// single lock. One worker writes; any number of callers read `status()`.
pub struct Session {
    config: Config,
    targets: Vec<GeoPoint>,
    shared: Arc<StdMutex<Shared>>,
    worker: Option<WorkerHandle>,
}

impl Session {
    pub fn new(config: Config, targets: Vec<GeoPoint>) -> Self {
        let rates = RateTracker::new(config.session.heading_wrap);
        Self {
            config,
            targets,
            shared: Arc::new(StdMutex::new(Shared {
                status: SessionStatus {
                    mode: SessionMode::Idle,
                    history: Vec::new(),
                    last_view: None,
                    last_rate: None,
                },
                rates,
            })),
            worker: None,
        }
    }

    /// Build a session from config: fixed sites plus the generated target
    /// plan, sampled from the given propagator starting at `start`.
    pub fn from_config<P: Propagator + ?Sized>(
        config: Config,
        propagator: &P,
        start: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let mut targets = config.site_points()?;
        if let Some(ref plan) = config.targets {
            let generated = match plan.shift {
                Some(shift) => {
                    let mut rng = match shift.seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_os_rng(),
                    };
                    generate_shifted_targets(
                        propagator,
                        start,
                        plan.window,
                        plan.interval,
                        ShiftConfig {
                            max_shift_km: shift.max_shift_km,
                            shift_prob: shift.shift_prob,
                        },
                        &mut rng,
                    )?
                }
                None => generate_targets(propagator, start, plan.window, plan.interval)?,
            };
            targets.extend(generated);
        }

        Ok(Self::new(config, targets))
    }

    pub fn targets(&self) -> &[GeoPoint] {
        &self.targets
    }

    pub fn status(&self) -> SessionStatus {
        self.shared.lock().unwrap().status.clone()
    }

    pub fn latest_view(&self) -> Option<CameraView> {
        self.shared.lock().unwrap().status.last_view
    }

    pub fn latest_rate(&self) -> Option<RateSample> {
        self.shared.lock().unwrap().status.last_rate
    }

    /// Start the update worker.
    ///
    /// Every `update_interval` it propagates the current position, appends
    /// it to the history, retargets the camera and refreshes the rate
    /// snapshot. A propagation failure ends the worker with the error
    /// surfaced through `stop()`.
    pub fn run<P: Propagator + 'static>(&mut self, propagator: P) -> Result<(), SessionError> {
        if self.worker.is_some() {
            return Err(SessionError::AlreadyRunning);
        }
        let interval = self
            .config
            .session
            .update_interval
            .to_std()
            .map_err(|_| ConfigError::Invalid("update_interval must be positive".into()))?;
        if interval.is_zero() {
            return Err(ConfigError::Invalid("update_interval must be positive".into()).into());
        }

        let shared = self.shared.clone();
        let targets = self.targets.clone();
        let range_offset_m = self.config.session.range_offset_m;
        let (stop_tx, stop_rx) = oneshot::channel();

        let join = tokio::spawn(async move {
            let result =
                run_session_loop(shared.clone(), targets, propagator, interval, range_offset_m, stop_rx)
                    .await;

            if let Err(ref e) = result {
                log::error!("Session worker failed: {}", e);
                let mut locked = shared.lock().unwrap();
                locked.status.mode = SessionMode::Idle;
            }

            result
        });

        self.worker = Some(WorkerHandle { stop_tx, join });

        {
            let mut locked = self.shared.lock().unwrap();
            locked.status.mode = SessionMode::Running { start: Utc::now() };
        }

        Ok(())
    }

    /// Stop the worker and wait for it, returning its failure if it died.
    pub async fn stop(&mut self) -> Result<(), SessionError> {
        let mut result = Ok(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            if let Ok(worker_result) = worker.join.await {
                result = worker_result;
            }
        }
        let mut locked = self.shared.lock().unwrap();
        locked.status.mode = SessionMode::Idle;
        result
    }
}

async fn run_session_loop<P: Propagator>(
    shared: Arc<StdMutex<Shared>>,
    targets: Vec<GeoPoint>,
    propagator: P,
    interval: std::time::Duration,
    range_offset_m: f64,
    mut stop_rx: oneshot::Receiver<()>,
) -> Result<(), SessionError> {
    log::info!(
        "Session worker started: {} targets, update every {:?}",
        targets.len(),
        interval
    );

    loop {
        let now = Utc::now();
        let position = propagator.position_at(now)?;
        let target = select_nearest_target(position, &targets)?;
        let view = compute_camera_view(position, target, range_offset_m);

        {
            let mut locked = shared.lock().unwrap();
            let rate = locked.rates.update(view, now)?;
            locked.status.history.push(PositionSample {
                timestamp: now,
                position,
            });
            locked.status.last_view = Some(view);
            if let Some(rate) = rate {
                locked.status.last_rate = Some(rate);
            }
        }

        log::debug!(
            "lat={:.6} lon={:.6} alt={:.2} km, heading={:.1} tilt={:.1}",
            position.latitude_deg,
            position.longitude_deg,
            position.altitude_km,
            view.heading_deg,
            view.tilt_deg
        );

        let should_stop = tokio::select! {
            _ = sleep_until(Instant::now() + interval) => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            let mut locked = shared.lock().unwrap();
            locked.status.mode = SessionMode::Idle;
            log::info!("Session worker stopped");
            return Ok(());
        }
    }
}
