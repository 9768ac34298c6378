// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The spin animation: an ease-out tween from 0° to a randomly chosen stop angle
//! plus a fixed number of full rotations. The tween itself runs in a Tokio task and
//! reports back through the [SpinProgress] seam, so the session state machine never
//! owns a timer.

use std::time::Duration;

use tokio::sync::mpsc::Sender;

use super::wheel::{Segment, WheelHandle, indicated_index_for, normalize_angle};
use crate::{CommonResult, throws};

/// How long one spin takes, end to end.
pub const SPIN_DURATION: Duration = Duration::from_secs(5);

/// Complete turns the wheel makes before it eases into the stop angle.
pub const SPIN_FULL_ROTATIONS: u32 = 8;

/// Roughly 30 fps. Terminal cells are chunky, so there is nothing to gain from going
/// faster than this.
pub const SPIN_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Whether a spin is currently in flight. There are deliberately no other states:
/// a wheel is either animating or it is at rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning,
}

impl SpinState {
    #[must_use]
    pub fn is_spinning(&self) -> bool { matches!(self, SpinState::Spinning) }
}

/// Tuning knobs for one spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinProfile {
    pub duration: Duration,
    pub full_rotations: u32,
}

impl Default for SpinProfile {
    fn default() -> Self {
        Self {
            duration: SPIN_DURATION,
            full_rotations: SPIN_FULL_ROTATIONS,
        }
    }
}

/// Everything a spin task needs, resolved up front when the spin is accepted.
///
/// The landed segment is decided here, at plan time, from the target angle. The
/// animation that follows is pure presentation, which means a slow or dropped frame
/// can never change the result.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinPlan {
    /// Generation of the wheel this plan was made against. Stale completions are
    /// detected by comparing this against the session's current generation.
    pub generation: u64,
    /// Total clockwise rotation at the end of the spin: the full rotations plus the
    /// stop angle.
    pub target_angle: f64,
    /// The segment that will sit under the pointer when the wheel stops.
    pub landed: Segment,
    pub profile: SpinProfile,
}

impl SpinPlan {
    /// Plan a spin of `wheel` that comes to rest at `stop_angle` (normalized into
    /// `[0, 360)`).
    #[must_use]
    pub fn new(wheel: &WheelHandle, stop_angle: f64, profile: SpinProfile) -> Self {
        let stop_angle = normalize_angle(stop_angle);
        let target_angle = f64::from(profile.full_rotations) * 360.0 + stop_angle;
        let landed_index = indicated_index_for(target_angle, wheel.segment_count());
        let landed = wheel.segments()[landed_index].clone();
        Self {
            generation: wheel.generation(),
            target_angle,
            landed,
            profile,
        }
    }
}

/// Cubic ease-out: fast start, gentle landing. Input is clamped into `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Rotation angle `elapsed` into a spin that ends at `target_angle` after
/// `duration`. Once `elapsed` reaches `duration` this is exactly `target_angle`.
#[must_use]
pub fn angle_at(target_angle: f64, duration: Duration, elapsed: Duration) -> f64 {
    if duration.is_zero() || elapsed >= duration {
        return target_angle;
    }
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    target_angle * ease_out_cubic(t)
}

/// How the spin task reports back: one call per animation frame with the new
/// rotation, and exactly one completion call when the spin runs its full duration.
/// A spin that is killed early (because the wheel was rebuilt mid spin) never
/// completes.
///
/// The completion carries the final rotation angle so that the wheel can be snapped
/// to its exact resting position even if intermediate frames were dropped.
pub trait SpinProgress: Send + 'static {
    fn on_frame(&mut self, generation: u64, rotation_angle: f64);
    fn on_complete(&mut self, generation: u64, rotation_angle: f64, landed: Segment);
}

pub mod spin_task {
    use super::*;

    /// Spawn the Tokio task that drives one spin to completion, and return the
    /// channel that kills it early.
    pub fn start_spin_task<ProgressT: SpinProgress>(
        plan: SpinPlan,
        mut progress: ProgressT,
    ) -> Sender<()> {
        let (kill_channel_sender, mut kill_channel_receiver) =
            tokio::sync::mpsc::channel::<()>(1);
        let kill_channel_sender_clone = kill_channel_sender.clone();

        tokio::spawn(async move {
            let started_at = tokio::time::Instant::now();

            // Use an tokio::time::interval instead of tokio::time::sleep because we
            // need to be able to re-use it, and call tick on it repeatedly.
            let mut interval = tokio::time::interval(SPIN_FRAME_INTERVAL);

            loop {
                tokio::select! {
                    // Stop the spin without firing the completion callback.
                    // This branch is cancel safe because recv is cancel safe.
                    _ = kill_channel_receiver.recv() => {
                        break;
                    }

                    // Advance the animation by one frame.
                    // This branch is cancel safe because tick is cancel safe.
                    _ = interval.tick() => {
                        let elapsed = started_at.elapsed();
                        if elapsed >= plan.profile.duration {
                            progress.on_complete(
                                plan.generation,
                                plan.target_angle,
                                plan.landed.clone(),
                            );
                            break;
                        }
                        progress.on_frame(
                            plan.generation,
                            angle_at(plan.target_angle, plan.profile.duration, elapsed),
                        );
                    }
                }
            }
        });

        kill_channel_sender_clone
    }
}

/// This is a simple animator that can be used to run a single spin task. Animators
/// can be re-used (stopped, and restarted repeatedly).
/// - Once a task is started it can be stopped, but another task can't be started.
/// - After a task is stopped, another one can be started again.
#[derive(Debug, Default)]
pub struct SpinAnimator {
    /// This is the channel that will be used to kill the spin task.
    /// - [None] means that the spin task is not running.
    /// - When a spin task is started, this will have a [Some] value in it.
    ///
    /// The [SpinAnimator::stop] function uses this channel to kill the spin task.
    pub kill_channel: Option<Sender<()>>,
}

impl SpinAnimator {
    /// Starts a spin task if one isn't already running. Killing the task through
    /// [SpinAnimator::stop] suppresses its completion callback, which is exactly
    /// what a forced teardown needs.
    pub fn start<ProgressT: SpinProgress>(
        &mut self,
        plan: SpinPlan,
        progress: ProgressT,
    ) {
        if self.is_spin_task_started() {
            return;
        }
        self.kill_channel = Some(spin_task::start_spin_task(plan, progress));
    }

    #[must_use]
    pub fn is_spin_task_started(&self) -> bool { self.kill_channel.is_some() }

    /// # Errors
    ///
    /// Returns an error if the spin task cannot be stopped.
    pub fn stop(&mut self) -> CommonResult<()> {
        throws!({
            if let Some(kill_channel) = &self.kill_channel {
                let kill_channel_clone = kill_channel.clone();
                tokio::spawn(async move {
                    // We don't care about the result of this operation.
                    kill_channel_clone.send(()).await.ok();
                });
                self.kill_channel = None;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use tokio::{sync::mpsc,
                time::{Duration as TokioDuration, timeout}};

    use super::*;
    use crate::assert_eq2;

    #[test_case(0.0, 0.0; "start")]
    #[test_case(0.5, 0.875; "halfway")]
    #[test_case(1.0, 1.0; "end")]
    #[test_case(-1.0, 0.0; "clamped below")]
    #[test_case(2.0, 1.0; "clamped above")]
    fn ease_out_cubic_endpoints(t: f64, expected: f64) {
        assert_eq2!(ease_out_cubic(t), expected);
    }

    #[test]
    fn ease_out_cubic_is_monotonic() {
        let mut previous = ease_out_cubic(0.0);
        for step in 1..=100 {
            let t = f64::from(step) / 100.0;
            let current = ease_out_cubic(t);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn angle_at_never_overshoots_target() {
        let target_angle = 2925.0;
        let duration = Duration::from_secs(5);

        assert_eq2!(angle_at(target_angle, duration, Duration::ZERO), 0.0);
        assert_eq2!(angle_at(target_angle, duration, duration), target_angle);
        assert_eq2!(
            angle_at(target_angle, duration, Duration::from_secs(60)),
            target_angle
        );

        let mut previous = 0.0;
        for millis in (0..=5000).step_by(50) {
            let angle = angle_at(target_angle, duration, Duration::from_millis(millis));
            assert!(angle >= previous);
            assert!(angle <= target_angle);
            previous = angle;
        }
    }

    #[test]
    fn angle_at_with_zero_duration_snaps_to_target() {
        assert_eq2!(angle_at(100.0, Duration::ZERO, Duration::ZERO), 100.0);
    }

    #[test]
    fn spin_plan_resolves_landed_segment_up_front() {
        let labels = ["a", "b", "c", "d"].map(String::from);
        let wheel = WheelHandle::new(labels, 3).unwrap();

        // 8 full turns plus 45° leaves the pointer in the last quarter.
        let plan = SpinPlan::new(&wheel, 45.0, SpinProfile::default());
        assert_eq2!(plan.generation, 3);
        assert_eq2!(plan.target_angle, 8.0 * 360.0 + 45.0);
        assert_eq2!(plan.landed.label, "d");

        // The stop angle is normalized before it is baked into the target.
        let plan = SpinPlan::new(&wheel, 360.0 + 45.0, SpinProfile::default());
        assert_eq2!(plan.target_angle, 8.0 * 360.0 + 45.0);
    }

    /// Test double that forwards every callback into a channel the test can drain.
    #[derive(Debug)]
    enum ProgressEvent {
        Frame(f64),
        Complete(f64, Segment),
    }

    struct ChannelProgress {
        sender: mpsc::Sender<ProgressEvent>,
    }

    impl SpinProgress for ChannelProgress {
        fn on_frame(&mut self, _generation: u64, rotation_angle: f64) {
            self.sender.try_send(ProgressEvent::Frame(rotation_angle)).ok();
        }

        fn on_complete(&mut self, _generation: u64, rotation_angle: f64, landed: Segment) {
            self.sender
                .try_send(ProgressEvent::Complete(rotation_angle, landed))
                .ok();
        }
    }

    #[tokio::test]
    async fn spin_task_runs_to_completion() {
        let labels = ["a", "b", "c", "d"].map(String::from);
        let wheel = WheelHandle::new(labels, 1).unwrap();
        let profile = SpinProfile {
            duration: Duration::from_millis(100),
            full_rotations: 2,
        };
        let plan = SpinPlan::new(&wheel, 45.0, profile);
        let expected_landed = plan.landed.clone();
        let target_angle = plan.target_angle;

        let (sender, mut receiver) = mpsc::channel::<ProgressEvent>(1_000);
        let _kill_channel = spin_task::start_spin_task(plan, ChannelProgress { sender });

        let mut last_frame = 0.0;
        let mut completed = None;
        while let Ok(Some(event)) =
            timeout(TokioDuration::from_secs(5), receiver.recv()).await
        {
            match event {
                ProgressEvent::Frame(rotation_angle) => {
                    assert!(rotation_angle >= last_frame);
                    assert!(rotation_angle < target_angle);
                    last_frame = rotation_angle;
                }
                ProgressEvent::Complete(rotation_angle, landed) => {
                    assert_eq2!(rotation_angle, target_angle);
                    completed = Some(landed);
                    break;
                }
            }
        }

        assert_eq2!(completed, Some(expected_landed));
    }

    #[tokio::test]
    async fn killed_spin_never_completes() {
        let labels = ["a", "b"].map(String::from);
        let wheel = WheelHandle::new(labels, 1).unwrap();
        let profile = SpinProfile {
            duration: Duration::from_millis(300),
            full_rotations: 1,
        };
        let plan = SpinPlan::new(&wheel, 10.0, profile);

        let (sender, mut receiver) = mpsc::channel::<ProgressEvent>(1_000);
        let kill_channel = spin_task::start_spin_task(plan, ChannelProgress { sender });
        kill_channel.send(()).await.unwrap();

        // Drain everything the task produced. The spin must die without a
        // completion event.
        let mut saw_complete = false;
        while let Ok(Some(event)) =
            timeout(TokioDuration::from_millis(600), receiver.recv()).await
        {
            if matches!(event, ProgressEvent::Complete(..)) {
                saw_complete = true;
            }
        }
        assert!(!saw_complete);
    }

    #[tokio::test]
    async fn animator_stop_clears_the_kill_channel() {
        let labels = ["a", "b"].map(String::from);
        let wheel = WheelHandle::new(labels, 1).unwrap();
        let plan = SpinPlan::new(&wheel, 0.0, SpinProfile::default());

        let (sender, _receiver) = mpsc::channel::<ProgressEvent>(1_000);
        let mut animator = SpinAnimator::default();
        assert!(!animator.is_spin_task_started());

        animator.start(plan, ChannelProgress { sender });
        assert!(animator.is_spin_task_started());

        animator.stop().unwrap();
        assert!(!animator.is_spin_task_started());
    }
}
