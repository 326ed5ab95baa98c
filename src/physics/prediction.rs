//! Side-effect-free trajectory preview for candidate launches

use crate::physics::field::GravityField;
use crate::physics::math::{Scalar, Vector};
use crate::physics::particle::Particle;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Sampled preview path: one `(x, y)` pair per iteration, in step order.
///
/// The first sample is the launch position itself; the arrays always have
/// exactly the requested iteration count (the preview runs to completion
/// even when the path leaves the simulation region).
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedPath {
    xs: Vec<Scalar>,
    ys: Vec<Scalar>,
}

impl PredictedPath {
    pub fn xs(&self) -> &[Scalar] {
        &self.xs
    }

    pub fn ys(&self) -> &[Scalar] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Sample positions in step order, for polyline rendering.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Vector> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| Vector::new(x, y))
    }
}

/// Ticket returned by [`PredictionSlot::begin`]; carries the begin-order
/// sequence used to decide which completion wins the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionTicket(u64);

struct SlotState {
    latest_sequence: u64,
    path: Option<Arc<PredictedPath>>,
}

/// Single-slot, last-begun-wins hand-off cell for completed predictions.
///
/// Overlapping predictions race only at publication: the slot installs a
/// result atomically (readers always see a whole path, never a torn pair)
/// and discards any completion whose ticket is older than one already
/// published. Superseded in-flight work is never cancelled, merely ignored.
pub struct PredictionSlot {
    next_sequence: AtomicU64,
    state: Mutex<SlotState>,
}

impl PredictionSlot {
    pub fn new() -> Self {
        Self {
            next_sequence: AtomicU64::new(1),
            state: Mutex::new(SlotState {
                latest_sequence: 0,
                path: None,
            }),
        }
    }

    /// Reserve the next sequence number before starting a prediction.
    pub fn begin(&self) -> PredictionTicket {
        PredictionTicket(self.next_sequence.fetch_add(1, Ordering::Relaxed))
    }

    /// Install a completed path. Returns false (and drops the path) when a
    /// prediction begun later has already published.
    pub fn publish(&self, ticket: PredictionTicket, path: PredictedPath) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket.0 < state.latest_sequence {
            log::trace!("discarding stale prediction (ticket {})", ticket.0);
            return false;
        }
        state.latest_sequence = ticket.0;
        state.path = Some(Arc::new(path));
        true
    }

    /// The most recent completed prediction, if any.
    pub fn latest(&self) -> Option<Arc<PredictedPath>> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .path
            .clone()
    }
}

impl Default for PredictionSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulates a throwaway particle against a field snapshot and publishes
/// the sampled path through its [`PredictionSlot`].
pub struct TrajectoryPredictor {
    game_speed: Scalar,
    slot: PredictionSlot,
}

impl TrajectoryPredictor {
    pub fn new(game_speed: Scalar) -> Self {
        Self {
            game_speed,
            slot: PredictionSlot::new(),
        }
    }

    /// Pure preview: a probe particle is integrated with exactly the live
    /// update recipe, recording its position before each step. No history,
    /// no bounds check, no shared state; identical inputs yield bit-identical
    /// output.
    pub fn predict(
        &self,
        position: Vector,
        velocity: Vector,
        field: &GravityField,
        iterations: usize,
    ) -> PredictedPath {
        let mut probe = Particle::probe(position, velocity);
        let mut xs = Vec::with_capacity(iterations);
        let mut ys = Vec::with_capacity(iterations);

        for _ in 0..iterations {
            xs.push(probe.position().x);
            ys.push(probe.position().y);
            probe.integrate(field, self.game_speed);
        }

        PredictedPath { xs, ys }
    }

    /// Compute a prediction and hand it off through the slot. Safe to call
    /// from any number of overlapping tasks; the path begun last wins.
    pub fn run(
        &self,
        position: Vector,
        velocity: Vector,
        field: &GravityField,
        iterations: usize,
    ) -> bool {
        let ticket = self.slot.begin();
        let path = self.predict(position, velocity, field, iterations);
        self.slot.publish(ticket, path)
    }

    pub fn latest(&self) -> Option<Arc<PredictedPath>> {
        self.slot.latest()
    }

    pub fn slot(&self) -> &PredictionSlot {
        &self.slot
    }
}
