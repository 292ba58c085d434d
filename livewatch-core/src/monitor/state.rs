//! Debounced live/offline state for a single monitored user.
//!
//! Raw probe results are noisy. Going live needs [`LIVE_CONFIRMATIONS`] positive probes in a
//! row; going offline needs [`OFFLINE_CONFIRMATIONS`] negative probes in a row. At most one
//! of the two streak counters is non-zero at any time.

/// Consecutive "live" probes needed before an offline user is confirmed live.
pub const LIVE_CONFIRMATIONS: u32 = 2;

/// Consecutive "not live" probes needed before a live user is confirmed offline.
pub const OFFLINE_CONFIRMATIONS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    WentLive,
    WentOffline,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    live_streak: u32,
    offline_streak: u32,
    confirmed_live: bool,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_streak(&self) -> u32 {
        self.live_streak
    }

    pub fn offline_streak(&self) -> u32 {
        self.offline_streak
    }

    pub fn is_confirmed_live(&self) -> bool {
        self.confirmed_live
    }

    /// Feeds one raw probe result and returns the confirmed transition it caused, if any.
    ///
    /// The live threshold is checked with `>=`. While offline the live streak can never pass
    /// the threshold without triggering, so this behaves exactly like an `==` check.
    pub fn observe(&mut self, is_live: bool) -> Option<Transition> {
        if is_live {
            self.live_streak = self.live_streak.saturating_add(1);
            self.offline_streak = 0;
        } else {
            self.offline_streak = self.offline_streak.saturating_add(1);
            self.live_streak = 0;
        }

        if !self.confirmed_live && self.live_streak >= LIVE_CONFIRMATIONS {
            self.confirmed_live = true;
            Some(Transition::WentLive)
        } else if self.confirmed_live && self.offline_streak >= OFFLINE_CONFIRMATIONS {
            self.confirmed_live = false;
            Some(Transition::WentOffline)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(observations: &[bool]) -> (MonitorState, Vec<Option<Transition>>) {
        let mut state = MonitorState::new();
        let transitions = observations.iter().map(|&o| state.observe(o)).collect();
        (state, transitions)
    }

    #[test]
    fn starts_offline_with_empty_streaks() {
        let state = MonitorState::new();
        assert!(!state.is_confirmed_live());
        assert_eq!(state.live_streak(), 0);
        assert_eq!(state.offline_streak(), 0);
    }

    #[test]
    fn single_live_probe_is_not_trusted() {
        let (state, transitions) = feed(&[true]);
        assert!(!state.is_confirmed_live());
        assert_eq!(transitions, vec![None]);
    }

    #[test]
    fn goes_live_on_second_consecutive_probe() {
        let (state, transitions) = feed(&[false, true, true]);
        assert!(state.is_confirmed_live());
        assert_eq!(transitions, vec![None, None, Some(Transition::WentLive)]);
    }

    #[test]
    fn offline_probe_resets_live_streak() {
        let (state, transitions) = feed(&[true, false, true, true]);
        assert!(state.is_confirmed_live());
        assert_eq!(transitions, vec![None, None, None, Some(Transition::WentLive)]);
    }

    #[test]
    fn two_offline_probes_keep_live() {
        let (state, transitions) = feed(&[true, true, false, false, true]);
        assert!(state.is_confirmed_live());
        assert_eq!(state.offline_streak(), 0);
        assert_eq!(transitions.iter().flatten().count(), 1);
    }

    #[test]
    fn three_offline_probes_go_offline() {
        let (state, transitions) = feed(&[true, true, false, false, false]);
        assert!(!state.is_confirmed_live());
        assert_eq!(transitions[4], Some(Transition::WentOffline));
    }

    #[test]
    fn long_live_run_fires_once() {
        let (state, transitions) = feed(&[true; 50]);
        assert!(state.is_confirmed_live());
        let went_live = transitions.iter().filter(|t| **t == Some(Transition::WentLive)).count();
        assert_eq!(went_live, 1);
        assert_eq!(state.live_streak(), 50);
    }

    #[test]
    fn offline_streak_while_offline_is_silent() {
        let (state, transitions) = feed(&[false; 10]);
        assert!(!state.is_confirmed_live());
        assert!(transitions.iter().all(Option::is_none));
    }

    #[test]
    fn rearms_after_going_offline() {
        let (state, transitions) = feed(&[true, true, false, false, false, true, true]);
        assert!(state.is_confirmed_live());
        let flat: Vec<Transition> = transitions.into_iter().flatten().collect();
        assert_eq!(
            flat,
            vec![Transition::WentLive, Transition::WentOffline, Transition::WentLive]
        );
    }

    #[test]
    fn at_most_one_streak_is_nonzero() {
        let pattern = [true, false, false, true, true, true, false, true, false, false, false];
        let mut state = MonitorState::new();
        for obs in pattern {
            state.observe(obs);
            assert!(state.live_streak() == 0 || state.offline_streak() == 0);
        }
    }

    #[test]
    fn flapping_never_confirms() {
        let (state, transitions) = feed(&[true, false, true, false, true, false]);
        assert!(!state.is_confirmed_live());
        assert!(transitions.iter().all(Option::is_none));
    }
}
