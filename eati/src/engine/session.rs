// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One session of the picker, owned by the main event loop. This struct is the
//! single place where candidates, the wheel, the spin state, and the announced
//! result are allowed to change, so every invariant between them is enforced here:
//!
//! - The wheel only exists while at least one candidate is active.
//! - Rebuilding the wheel tears down any in-flight spin, and bumps the generation so
//!   that frames and completions from the torn down spin are dropped on arrival.
//! - The announced result always comes from the segment the pointer rests on.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rand::Rng;

use super::{CandidateRoster, Segment, SpinPlan, SpinProfile, SpinState, WheelHandle};

/// What the result line announces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing has happened yet this session.
    #[default]
    Pending,
    /// The last rebuild left no active candidates to spin for.
    NoCandidates,
    /// A spin landed on this candidate.
    Picked(String),
}

/// Answer to a spin request. Only [SpinGate::Accepted] changes the session. The two
/// rejections are surfaced to the user as status warnings, and leave every bit of
/// state untouched.
#[derive(Debug)]
pub enum SpinGate {
    Accepted(SpinPlan),
    /// There is no wheel, either because nothing has loaded yet or because every
    /// candidate is excluded.
    NotInitialized,
    /// A spin is already in flight.
    AlreadySpinning,
}

#[derive(Debug, Default)]
pub struct PickerSession {
    roster: CandidateRoster,
    wheel: Option<WheelHandle>,
    spin_state: SpinState,
    outcome: Outcome,
    /// Bumped on every wheel rebuild. Spin signals stamped with an older generation
    /// belong to a torn down wheel and are dropped.
    generation: u64,
}

impl PickerSession {
    #[must_use]
    pub fn roster(&self) -> &CandidateRoster { &self.roster }

    #[must_use]
    pub fn wheel(&self) -> Option<&WheelHandle> { self.wheel.as_ref() }

    #[must_use]
    pub fn spin_state(&self) -> SpinState { self.spin_state }

    #[must_use]
    pub fn is_spinning(&self) -> bool { self.spin_state.is_spinning() }

    #[must_use]
    pub fn outcome(&self) -> &Outcome { &self.outcome }

    #[must_use]
    pub fn generation(&self) -> u64 { self.generation }
}

mod lifecycle {
    use super::*;

    impl PickerSession {
        /// Install the roster loaded from the sheet and build the first wheel.
        pub fn apply_roster(&mut self, roster: CandidateRoster) {
            // % is Display, ? is Debug.
            tracing::info!(
                message = "Loaded candidates into session",
                count = %roster.len()
            );
            self.roster = roster;
            self.rebuild_wheel();
        }

        /// Include or exclude one candidate by its sheet position, then rebuild.
        /// Positions outside the roster are ignored without a rebuild.
        pub fn toggle_candidate(&mut self, index: usize, included: bool) {
            if index >= self.roster.len() {
                // % is Display, ? is Debug.
                tracing::warn!(
                    message = "Ignoring toggle for unknown candidate position",
                    index = %index,
                    roster_len = %self.roster.len()
                );
                return;
            }
            self.roster.toggle(index, included);
            self.rebuild_wheel();
        }

        /// Throw away the current wheel and build a fresh one from the active
        /// candidates. Always resets the rotation to the home position. The result
        /// line is only touched when there is nothing left to build a wheel from.
        pub(super) fn rebuild_wheel(&mut self) {
            self.generation += 1;

            if self.spin_state.is_spinning() {
                // The in-flight spin belongs to the wheel being torn down. Its
                // completion must never fire against the replacement.
                self.spin_state = SpinState::Idle;
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "Tore down wheel mid spin",
                    generation = %self.generation
                );
            }

            let labels: Vec<String> = self
                .roster
                .active()
                .map(|(_, label)| label.to_string())
                .collect();
            self.wheel = WheelHandle::new(labels, self.generation);

            if self.wheel.is_none() {
                self.outcome = Outcome::NoCandidates;
            }

            // % is Display, ? is Debug.
            tracing::debug!(
                message = "Rebuilt wheel",
                generation = %self.generation,
                segment_count = %self.wheel.as_ref().map_or(0, WheelHandle::segment_count)
            );
        }
    }
}

mod spin_control {
    use super::*;

    impl PickerSession {
        /// Ask for a spin with a random stop angle. See [Self::request_spin_at].
        pub fn request_spin(&mut self, rng: &mut impl Rng) -> SpinGate {
            let stop_angle = rng.random_range(0.0..360.0);
            self.request_spin_at(stop_angle)
        }

        /// Ask for a spin that comes to rest at `stop_angle`. On acceptance the
        /// wheel snaps back to its home position, the landed segment is resolved
        /// into the returned plan, and the session transitions to
        /// [SpinState::Spinning]. The caller is responsible for actually running
        /// the plan.
        pub fn request_spin_at(&mut self, stop_angle: f64) -> SpinGate {
            let Some(wheel) = &mut self.wheel else {
                return SpinGate::NotInitialized;
            };
            if self.spin_state.is_spinning() {
                return SpinGate::AlreadySpinning;
            }

            // A fresh spin always starts from the home position.
            wheel.rotation_angle = 0.0;

            let plan = SpinPlan::new(wheel, stop_angle, SpinProfile::default());
            self.spin_state = SpinState::Spinning;

            // % is Display, ? is Debug.
            tracing::info!(
                message = "Spin accepted",
                generation = %plan.generation,
                target_angle = %plan.target_angle,
                landed = %plan.landed.label
            );

            SpinGate::Accepted(plan)
        }

        /// Apply one animation frame. Frames stamped with a stale generation, or
        /// arriving while no spin is in flight, are dropped.
        pub fn apply_spin_frame(&mut self, generation: u64, rotation_angle: f64) {
            if generation != self.generation || !self.spin_state.is_spinning() {
                // % is Display, ? is Debug.
                tracing::trace!(
                    message = "Dropping stale spin frame",
                    frame_generation = %generation,
                    session_generation = %self.generation
                );
                return;
            }
            if let Some(wheel) = &mut self.wheel {
                wheel.rotation_angle = rotation_angle;
            }
        }

        /// Finish a spin: snap the wheel to its resting angle, announce the landed
        /// candidate, and return to [SpinState::Idle]. Stale completions are
        /// dropped and `false` is returned.
        pub fn complete_spin(
            &mut self,
            generation: u64,
            rotation_angle: f64,
            landed: Segment,
        ) -> bool {
            if generation != self.generation || !self.spin_state.is_spinning() {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "Dropping stale spin completion",
                    completion_generation = %generation,
                    session_generation = %self.generation,
                    landed = %landed.label
                );
                return false;
            }

            if let Some(wheel) = &mut self.wheel {
                wheel.rotation_angle = rotation_angle;
            }
            self.spin_state = SpinState::Idle;

            // % is Display, ? is Debug.
            tracing::info!(message = "Spin landed", landed = %landed.label);
            self.outcome = Outcome::Picked(landed.label);

            true
        }
    }
}

/// Efficient Display implementation for telemetry logging. Called on every render,
/// so it avoids walking the roster.
mod impl_display {
    use super::{Display, FmtResult, Formatter, PickerSession};

    impl Display for PickerSession {
        fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
            write!(
                f,
                "Session[candidates={}, active={}, spin={:?}, generation={}]",
                self.roster.len(),
                self.roster.active_count(),
                self.spin_state,
                self.generation
            )
        }
    }
}
