// seeker_sim/src/simulation/plugins/vision.rs

use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::collections::VecDeque;

// --- Simulation Crate Imports ---
use crate::prelude::*;
use crate::simulation::config::structs::PolicyKind;
use crate::simulation::core::{
    components::{AgentDirective, SeekerAgent, Target},
    events::VisionResultEvent,
    prng::SimulationRng,
    simulation_setup::{SimulationClock, SimulationClockSet},
};

// --- Core Library Imports ---
use seeker_core::error::SeekerResult;
use seeker_core::vision::Detection;

// =========================================================================
// == Vision Service Resource & Components ==
// =========================================================================

/// The stand-in for the remote vision model: geometry, noise and a policy.
#[derive(Resource)]
pub struct VisionService {
    policy: Box<dyn NavigationPolicy>,
    camera: StereoCameraModel,
    distance_noise: Option<Normal<f64>>,
    angle_noise: Option<Normal<f64>>,
    failure_probability: f64,
    latency: f64,
}

/// A capture whose answer is still "on the wire".
#[derive(Debug)]
struct PendingCapture {
    token: RequestToken,
    ready_at: f64,
    result: SeekerResult<VisionResponse>,
    view_request: Option<CameraPair>,
}

/// Per-agent connection to the vision service.
#[derive(Component, Debug)]
pub struct VisionLink {
    tracker: VisionRequestTracker,
    pending: VecDeque<PendingCapture>,
    latest: Option<VisionResponse>,
    view_request: Option<CameraPair>,
}

impl VisionLink {
    pub fn new(interval: f64) -> Self {
        Self {
            tracker: VisionRequestTracker::new(interval),
            pending: VecDeque::new(),
            latest: None,
            view_request: None,
        }
    }

    /// Most recent accepted response.
    pub fn latest(&self) -> Option<&VisionResponse> {
        self.latest.as_ref()
    }

    /// Hands out the pending view request once.
    pub fn take_view_request(&mut self) -> Option<CameraPair> {
        self.view_request.take()
    }

    /// Drops the last answer and makes the in-flight one stale.
    pub fn reset(&mut self) {
        self.tracker.invalidate();
        self.latest = None;
        self.view_request = None;
    }
}

pub struct VisionPlugin;

impl Plugin for VisionPlugin {
    fn build(&self, app: &mut App) {
        let vision = app
            .world()
            .get_resource::<ScenarioConfig>()
            .map(|c| c.vision.clone())
            .unwrap_or_default();

        let policy: Box<dyn NavigationPolicy> = match vision.policy {
            PolicyKind::Stereo => Box::new(StereoPolicy {
                fov_deg: vision.camera.fov_deg,
                ..Default::default()
            }),
            PolicyKind::BoundingBox => Box::new(BoundingBoxPolicy),
        };
        info!(
            "[VISION] {} policy, {:.2}s interval, {:.2}s latency, {:.0}% failures",
            policy.name(),
            vision.interval_seconds,
            vision.latency_seconds,
            vision.failure_probability * 100.0
        );

        app.insert_resource(VisionService {
            policy,
            camera: vision.camera,
            distance_noise: noise(vision.distance_noise_stddev),
            angle_noise: noise(vision.angle_noise_stddev_deg),
            failure_probability: vision.failure_probability,
            latency: vision.latency_seconds,
        })
        .add_systems(
            OnEnter(AppState::SceneBuilding),
            attach_vision_links.in_set(SceneBuildSet::Perception),
        )
        .add_systems(
            FixedUpdate,
            (deliver_vision_results, capture_frames)
                .chain()
                .in_set(SimulationClockSet),
        );
    }
}

fn noise(stddev: f64) -> Option<Normal<f64>> {
    (stddev > 0.0).then(|| Normal::new(0.0, stddev).ok()).flatten()
}

// =========================================================================
// == Spawning System ==
// =========================================================================

fn attach_vision_links(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    agents: Query<(Entity, &Name), With<SeekerAgent>>,
) {
    for (entity, name) in &agents {
        info!("  -> Connecting agent '{}' to the vision service", name.as_str());
        commands
            .entity(entity)
            .insert(VisionLink::new(config.vision.interval_seconds));
    }
}

// =========================================================================
// == Runtime Systems ==
// =========================================================================

/// Hands over every answer whose latency has elapsed. Answers to
/// invalidated requests are dropped here.
fn deliver_vision_results(
    clock: Res<SimulationClock>,
    mut results: EventWriter<VisionResultEvent>,
    mut agents: Query<(Entity, &Name, &mut VisionLink)>,
) {
    for (entity, name, mut link) in &mut agents {
        while link.pending.front().is_some_and(|p| p.ready_at <= clock.0) {
            let Some(capture) = link.pending.pop_front() else {
                break;
            };
            let Some(response) = link.tracker.resolve(capture.token, capture.result) else {
                debug!("[VISION] '{}' dropped stale result #{}", name.as_str(), capture.token.0);
                continue;
            };
            debug!(
                "[VISION] '{}' #{}: {} ({}){}",
                name.as_str(),
                capture.token.0,
                response.action,
                response.reasoning,
                response
                    .detection_box()
                    .map(|b| format!(" box x={:.0} h={:.0}", b.center_x(), b.height()))
                    .unwrap_or_default()
            );
            link.view_request = capture.view_request;
            link.latest = Some(response.clone());
            results.write(VisionResultEvent {
                agent: AgentHandle::from_entity(entity),
                token: capture.token,
                response,
            });
        }
    }
}

/// Starts a capture whenever the tracker allows one.
fn capture_frames(
    clock: Res<SimulationClock>,
    service: Res<VisionService>,
    mut rng: ResMut<SimulationRng>,
    targets: Query<&Target>,
    mut agents: Query<(&SeekerAgent, &AgentDirective, &mut VisionLink)>,
) {
    for (agent, directive, mut link) in &mut agents {
        if directive.halt {
            continue;
        }
        let Some(token) = link.tracker.try_begin(clock.0) else {
            continue;
        };

        let seeker = &agent.0;
        let target = directive
            .target_name
            .as_deref()
            .and_then(|name| targets.iter().find(|t| t.name == name));

        let (result, view_request) = if rng.0.gen_bool(service.failure_probability) {
            (
                Err(SeekerError::VisionService("simulated request timeout".into())),
                None,
            )
        } else if let Some(target) = target {
            let active = seeker.view().active_pair();
            let other = match active {
                CameraPair::Front => CameraPair::Rear,
                CameraPair::Rear => CameraPair::Front,
            };
            let mut look = |pair| {
                service
                    .camera
                    .observe(seeker.pose(), pair, &target.position, target.radius, seeker.layout())
                    .map(|d| service.perturb(d, &mut rng.0))
            };
            let seen = look(active);
            let seen_by_other = look(other);

            let view_request = match (&seen, &seen_by_other) {
                (None, Some(_)) if seeker.params().view.rear_view_enabled => Some(other),
                _ => None,
            };
            (Ok(respond(service.policy.as_ref(), seen.as_ref())), view_request)
        } else {
            (Ok(VisionResponse::fallback("No target assigned. Scanning...")), None)
        };

        link.pending.push_back(PendingCapture {
            token,
            ready_at: clock.0 + service.latency,
            result,
            view_request,
        });
    }
}

impl VisionService {
    fn perturb(&self, mut detection: Detection, rng: &mut impl Rng) -> Detection {
        if let (Some(noise), Some(d)) = (&self.distance_noise, detection.distance.as_mut()) {
            *d = (*d + noise.sample(rng)).max(0.0);
        }
        if let (Some(noise), Some(a)) = (&self.angle_noise, detection.angle.as_mut()) {
            *a += noise.sample(rng);
        }
        detection
    }
}
