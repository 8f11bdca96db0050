//! Time-march schedule.
//!
//! A [`TimeSolver`] is either disabled, holding a placeholder schedule, or
//! enabled, holding an ascending schedule of absolute times generated from
//! its input parameters and a current step index into it.

use std::fmt;

use rhea_codec::{CodecError, Decoder, Encoder};
use tracing::debug;

/// Number of steps in the default and placeholder schedules.
pub const DEFAULT_STEP_COUNT: usize = 10;
/// Default start time.
pub const DEFAULT_START_TIME: f64 = 0.0;
/// Default step size.
pub const DEFAULT_STEP_SIZE: f64 = 1.0;
/// Default output frequency, in steps.
pub const DEFAULT_OUTPUT_FREQUENCY: u32 = 1;

/// Implicit/explicit blend of a time-march step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarchApproximation {
    /// Crank-Nicolson, coefficient 0.5.
    #[default]
    Central,
    /// Fully implicit, coefficient 0.0.
    Backward,
    /// Fully explicit, coefficient 1.0.
    Forward,
}

impl MarchApproximation {
    /// Every approximation, in tag order.
    pub const ALL: [MarchApproximation; 3] = [
        MarchApproximation::Central,
        MarchApproximation::Backward,
        MarchApproximation::Forward,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Central => "Central difference (accurate)",
            Self::Backward => "Backward difference (stable)",
            Self::Forward => "Forward difference (fast)",
        }
    }

    /// Blending coefficient.
    pub fn coefficient(self) -> f64 {
        match self {
            Self::Central => 0.5,
            Self::Backward => 0.0,
            Self::Forward => 1.0,
        }
    }

    /// Codec tag.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Approximation for a codec tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(usize::from(tag)).copied()
    }
}

impl fmt::Display for MarchApproximation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Time-march schedule and stepping state.
///
/// Step accessors (`time`, `current_time`, `set_current_step`, ...) panic
/// when the index is outside the schedule; that is a caller bug, not bad
/// input.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSolver {
    enabled: bool,
    approximation: MarchApproximation,
    times: Vec<f64>,
    input_start_time: f64,
    input_step_size: f64,
    input_step_count: usize,
    current_step: usize,
    output_frequency: u32,
    computed_time: f64,
}

impl Default for TimeSolver {
    fn default() -> Self {
        Self {
            enabled: false,
            approximation: MarchApproximation::Central,
            times: placeholder(),
            input_start_time: DEFAULT_START_TIME,
            input_step_size: DEFAULT_STEP_SIZE,
            input_step_count: DEFAULT_STEP_COUNT,
            current_step: 0,
            output_frequency: DEFAULT_OUTPUT_FREQUENCY,
            computed_time: 0.0,
        }
    }
}

fn placeholder() -> Vec<f64> {
    vec![DEFAULT_START_TIME + DEFAULT_STEP_SIZE; DEFAULT_STEP_COUNT]
}

/// `count` times continuing from `start`: `start + (i + 1) * step`.
pub fn generate_times(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + (i + 1) as f64 * step).collect()
}

impl TimeSolver {
    /// A disabled solver with the default schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether time marching is active.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable time marching. Call [`harmonize`](Self::harmonize)
    /// afterwards to rebuild the schedule.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// March approximation.
    pub fn approximation(&self) -> MarchApproximation {
        self.approximation
    }

    /// Set the march approximation.
    pub fn set_approximation(&mut self, approximation: MarchApproximation) {
        self.approximation = approximation;
    }

    /// Blending coefficient of the current approximation.
    pub fn coefficient(&self) -> f64 {
        self.approximation.coefficient()
    }

    /// The schedule, ascending.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Replace the schedule. The times are sorted ascending.
    pub fn set_times(&mut self, mut times: Vec<f64>) {
        times.sort_by(f64::total_cmp);
        self.times = times;
    }

    /// Discard the schedule from `start_step` on and append `count` steps of
    /// `step_size` continuing from the last retained time (or from the input
    /// start time when nothing is retained).
    pub fn add_times(&mut self, start_step: usize, count: usize, step_size: f64) {
        self.times.truncate(start_step);
        let from = self.times.last().copied().unwrap_or(self.input_start_time);
        self.times.extend(generate_times(count, from, step_size));
    }

    /// Number of scheduled steps.
    pub fn step_count(&self) -> usize {
        self.times.len()
    }

    /// Requested start time.
    pub fn input_start_time(&self) -> f64 {
        self.input_start_time
    }

    /// Set the requested start time.
    pub fn set_input_start_time(&mut self, t: f64) {
        self.input_start_time = t;
    }

    /// Requested step size.
    pub fn input_step_size(&self) -> f64 {
        self.input_step_size
    }

    /// Set the requested step size.
    pub fn set_input_step_size(&mut self, dt: f64) {
        self.input_step_size = dt;
    }

    /// Requested number of steps.
    pub fn input_step_count(&self) -> usize {
        self.input_step_count
    }

    /// Set the requested number of steps.
    pub fn set_input_step_count(&mut self, n: usize) {
        self.input_step_count = n;
    }

    /// Index of the current step.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Set the current step.
    ///
    /// # Panics
    ///
    /// Panics if `step >= step_count()`.
    pub fn set_current_step(&mut self, step: usize) {
        self.check_step(step);
        self.current_step = step;
    }

    /// Output frequency, in steps.
    pub fn output_frequency(&self) -> u32 {
        self.output_frequency
    }

    /// Set the output frequency.
    pub fn set_output_frequency(&mut self, frequency: u32) {
        self.output_frequency = frequency;
    }

    /// Last time the outer solver reported as computed.
    pub fn computed_time(&self) -> f64 {
        self.computed_time
    }

    /// Record the last computed time.
    pub fn set_computed_time(&mut self, t: f64) {
        self.computed_time = t;
    }

    /// Move to the next step and return its index, or `None` once the
    /// schedule is exhausted. The current step is left unchanged at the end.
    pub fn advance(&mut self) -> Option<usize> {
        if self.current_step + 1 >= self.times.len() {
            return None;
        }
        self.current_step += 1;
        Some(self.current_step)
    }

    /// Time at `step`. Panics if out of range.
    pub fn time(&self, step: usize) -> f64 {
        self.check_step(step);
        self.times[step]
    }

    /// First scheduled time.
    pub fn first_time(&self) -> f64 {
        self.time(0)
    }

    /// Last scheduled time.
    pub fn last_time(&self) -> f64 {
        self.time(self.times.len().saturating_sub(1))
    }

    /// Whether `t` lies within the schedule, bounds included.
    pub fn has_time(&self, t: f64) -> bool {
        !self.times.is_empty() && t >= self.first_time() && t <= self.last_time()
    }

    /// Time at the current step.
    pub fn current_time(&self) -> f64 {
        self.time(self.current_step)
    }

    /// Time before the current step. At step 0 this is one input step
    /// before the first scheduled time.
    pub fn previous_time(&self) -> f64 {
        match self.current_step {
            0 => self.time(0) - self.input_step_size,
            step => self.time(step - 1),
        }
    }

    /// Length of the current step, `0.0` when disabled.
    pub fn current_step_size(&self) -> f64 {
        if self.enabled {
            self.current_time() - self.previous_time()
        } else {
            0.0
        }
    }

    /// Bring the schedule in line with the input parameters.
    ///
    /// Disabled: reset to the placeholder schedule at step 0.
    /// Enabled, `restart == false`: regenerate the whole schedule from the
    /// start time, and reset the current step and computed time.
    /// Enabled, `restart == true`: keep the history up to the current step
    /// and replace the tail with `input_step_count` fresh steps.
    pub fn harmonize(&mut self, restart: bool) {
        if !self.enabled {
            self.times = placeholder();
            self.current_step = 0;
            return;
        }
        if restart {
            if self.times.is_empty() {
                self.current_step = 0;
            } else if self.current_step >= self.times.len() {
                self.current_step = self.times.len() - 1;
            }
            let keep = if self.times.is_empty() { 0 } else { self.current_step + 1 };
            self.add_times(keep, self.input_step_count, self.input_step_size);
        } else {
            self.current_step = 0;
            self.computed_time = 0.0;
            self.set_times(generate_times(
                self.input_step_count,
                self.input_start_time,
                self.input_step_size,
            ));
        }
        debug!(
            restart,
            steps = self.times.len(),
            current_step = self.current_step,
            "time schedule regenerated"
        );
    }

    fn check_step(&self, step: usize) {
        assert!(
            step < self.times.len(),
            "time step {step} out of range (schedule has {} steps)",
            self.times.len()
        );
    }

    pub(crate) fn encode(&self, enc: &mut dyn Encoder) -> Result<(), CodecError> {
        enc.write_bool(self.enabled)?;
        enc.write_u8(self.approximation.tag())?;
        enc.write_len(self.times.len())?;
        for t in &self.times {
            enc.write_f64(*t)?;
        }
        enc.write_f64(self.input_start_time)?;
        enc.write_f64(self.input_step_size)?;
        enc.write_len(self.input_step_count)?;
        enc.write_len(self.current_step)?;
        enc.write_u32(self.output_frequency)?;
        enc.write_f64(self.computed_time)
    }

    pub(crate) fn decode(dec: &mut dyn Decoder) -> Result<Self, CodecError> {
        let enabled = dec.read_bool()?;
        let tag = dec.read_u8()?;
        let approximation = MarchApproximation::from_tag(tag).ok_or_else(|| CodecError::Malformed {
            detail: format!("invalid march approximation {tag}"),
        })?;
        let n = dec.read_len()?;
        let times = (0..n).map(|_| dec.read_f64()).collect::<Result<Vec<_>, _>>()?;
        let input_start_time = dec.read_f64()?;
        let input_step_size = dec.read_f64()?;
        let input_step_count = dec.read_len()?;
        let current_step = dec.read_len()?;
        if current_step >= times.len().max(1) {
            return Err(CodecError::Malformed {
                detail: format!("current time step {current_step} outside schedule of {n}"),
            });
        }
        let output_frequency = dec.read_u32()?;
        let computed_time = dec.read_f64()?;
        let mut solver = Self {
            enabled,
            approximation,
            times: Vec::new(),
            input_start_time,
            input_step_size,
            input_step_count,
            current_step,
            output_frequency,
            computed_time,
        };
        solver.set_times(times);
        Ok(solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn enabled(start: f64, count: usize, step: f64) -> TimeSolver {
        let mut s = TimeSolver::new();
        s.set_enabled(true);
        s.set_input_start_time(start);
        s.set_input_step_count(count);
        s.set_input_step_size(step);
        s.harmonize(false);
        s
    }

    #[test]
    fn coefficients() {
        assert_eq!(MarchApproximation::Central.coefficient(), 0.5);
        assert_eq!(MarchApproximation::Backward.coefficient(), 0.0);
        assert_eq!(MarchApproximation::Forward.coefficient(), 1.0);
        assert_eq!(MarchApproximation::Backward.name(), "Backward difference (stable)");
    }

    #[test]
    fn harmonize_generates_schedule() {
        let mut s = enabled(0.0, 3, 1.0);
        s.set_computed_time(7.0);
        s.harmonize(false);
        assert_eq!(s.times(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.current_step(), 0);
        assert_eq!(s.computed_time(), 0.0);
    }

    #[test]
    fn advance_walks_then_ends() {
        let mut s = enabled(0.0, 4, 0.5);
        assert_eq!(s.advance(), Some(1));
        assert_eq!(s.advance(), Some(2));
        assert_eq!(s.advance(), Some(3));
        assert_eq!(s.advance(), None);
        assert_eq!(s.current_step(), 3);
        assert_eq!(s.advance(), None);
    }

    #[test]
    fn restart_keeps_history_and_replaces_tail() {
        let mut s = enabled(0.0, 5, 1.0);
        s.set_current_step(1);
        s.set_input_step_count(2);
        s.set_input_step_size(0.5);
        s.harmonize(true);
        assert_eq!(s.times(), &[1.0, 2.0, 2.5, 3.0]);
        assert_eq!(s.current_step(), 1);
    }

    #[test]
    fn disabled_harmonize_resets_placeholder() {
        let mut s = enabled(0.0, 3, 1.0);
        s.set_current_step(2);
        s.set_enabled(false);
        s.harmonize(true);
        assert_eq!(s.step_count(), DEFAULT_STEP_COUNT);
        assert_eq!(s.current_step(), 0);
        assert_eq!(s.current_step_size(), 0.0);
    }

    #[test]
    fn step_size_and_previous_time() {
        let mut s = enabled(10.0, 3, 2.0);
        assert_eq!(s.current_time(), 12.0);
        assert_eq!(s.previous_time(), 10.0);
        assert_eq!(s.current_step_size(), 2.0);
        s.advance();
        assert_eq!(s.previous_time(), 12.0);
        assert_eq!(s.current_step_size(), 2.0);
    }

    #[test]
    fn has_time_is_inclusive() {
        let s = enabled(0.0, 3, 1.0);
        assert!(s.has_time(1.0));
        assert!(s.has_time(3.0));
        assert!(!s.has_time(0.5));
        assert!(!s.has_time(3.5));
    }

    #[test]
    fn set_times_sorts() {
        let mut s = TimeSolver::new();
        s.set_times(vec![3.0, 1.0, 2.0]);
        assert_eq!(s.times(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.first_time(), 1.0);
        assert_eq!(s.last_time(), 3.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_current_step_out_of_range_panics() {
        let mut s = enabled(0.0, 3, 1.0);
        s.set_current_step(3);
    }

    proptest! {
        #[test]
        fn advance_never_skips(count in 1usize..64) {
            let mut s = enabled(0.0, count, 1.0);
            let mut seen = Vec::new();
            while let Some(step) = s.advance() {
                seen.push(step);
            }
            prop_assert_eq!(seen, (1..count).collect::<Vec<_>>());
        }

        #[test]
        fn generated_schedule_is_ascending(
            start in -1e3f64..1e3,
            count in 0usize..64,
            step in 1e-3f64..10.0,
        ) {
            let times = generate_times(count, start, step);
            prop_assert_eq!(times.len(), count);
            prop_assert!(times.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
