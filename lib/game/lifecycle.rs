use crate::game::Tempo;
use derive_more::Display;

/// An event driving the piece lifecycle.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Event {
    #[display(fmt = "move")]
    Move,
    #[display(fmt = "jump")]
    Jump,
    #[display(fmt = "arrived")]
    Arrived,
    #[display(fmt = "rest done")]
    RestDone,
}

/// A piece's discrete lifecycle phase.
///
/// The resting variants record when the rest began; [`Event::RestDone`] is
/// self-fired by the timer, never injected externally.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Lifecycle {
    #[display(fmt = "idle")]
    Idle,
    #[display(fmt = "moving")]
    Moving,
    #[display(fmt = "jumping")]
    Jumping,
    #[display(fmt = "resting short")]
    RestingShort { since: u64 },
    #[display(fmt = "resting long")]
    RestingLong { since: u64 },
}

impl Lifecycle {
    /// The next phase, if `(self, event)` is a legal transition.
    pub fn transition(self, event: Event, now: u64) -> Option<Lifecycle> {
        use {Event::*, Lifecycle::*};
        match (self, event) {
            (Idle, Move) => Some(Moving),
            (Idle, Jump) => Some(Jumping),
            (Moving, Arrived) => Some(RestingLong { since: now }),
            (Jumping, Arrived) => Some(RestingShort { since: now }),
            (RestingShort { .. } | RestingLong { .. }, RestDone) => Some(Idle),
            _ => None,
        }
    }

    /// When the ongoing rest began, if this is a resting phase.
    #[inline(always)]
    pub fn resting_since(&self) -> Option<u64> {
        match *self {
            Lifecycle::RestingShort { since } | Lifecycle::RestingLong { since } => Some(since),
            _ => None,
        }
    }

    /// The required rest duration of this phase, if it is a resting phase.
    #[inline(always)]
    pub fn rest_required_ms(&self, tempo: &Tempo) -> Option<u64> {
        match self {
            Lifecycle::RestingShort { .. } => Some(tempo.rest_short_ms),
            Lifecycle::RestingLong { .. } => Some(tempo.rest_long_ms),
            _ => None,
        }
    }

    /// Whether a move or jump command at `now` must be rejected.
    ///
    /// Pieces already in motion always reject; resting pieces reject until
    /// the cooldown elapses.
    #[inline(always)]
    pub fn rejects_motion(&self, now: u64, tempo: &Tempo) -> bool {
        match *self {
            Lifecycle::Idle => false,
            Lifecycle::Moving | Lifecycle::Jumping => true,
            Lifecycle::RestingShort { since } => now.saturating_sub(since) < tempo.rest_short_ms,
            Lifecycle::RestingLong { since } => now.saturating_sub(since) < tempo.rest_long_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn only_idle_pieces_start_moving_or_jumping(s: Lifecycle, now: u64) {
        assert_eq!(s.transition(Event::Move, now).is_some(), s == Lifecycle::Idle);
        assert_eq!(s.transition(Event::Jump, now).is_some(), s == Lifecycle::Idle);
    }

    #[proptest]
    fn arrival_starts_the_matching_rest(now: u64) {
        assert_eq!(
            Lifecycle::Moving.transition(Event::Arrived, now),
            Some(Lifecycle::RestingLong { since: now })
        );

        assert_eq!(
            Lifecycle::Jumping.transition(Event::Arrived, now),
            Some(Lifecycle::RestingShort { since: now })
        );
    }

    #[proptest]
    fn rest_done_returns_to_idle(since: u64, now: u64) {
        assert_eq!(
            Lifecycle::RestingShort { since }.transition(Event::RestDone, now),
            Some(Lifecycle::Idle)
        );

        assert_eq!(
            Lifecycle::RestingLong { since }.transition(Event::RestDone, now),
            Some(Lifecycle::Idle)
        );
    }

    #[proptest]
    fn resting_rejects_motion_until_the_required_duration_elapses(
        t: Tempo,
        #[strategy(0u64..1 << 40)] since: u64,
        #[strategy(0u64..120_000)] elapsed: u64,
    ) {
        let s = Lifecycle::RestingLong { since };
        assert_eq!(
            s.rejects_motion(since + elapsed, &t),
            elapsed < t.rest_long_ms
        );

        let s = Lifecycle::RestingShort { since };
        assert_eq!(
            s.rejects_motion(since + elapsed, &t),
            elapsed < t.rest_short_ms
        );
    }

    #[proptest]
    fn idle_never_rejects_motion(t: Tempo, now: u64) {
        assert!(!Lifecycle::Idle.rejects_motion(now, &t));
    }

    #[proptest]
    fn phases_in_motion_always_reject_further_motion(t: Tempo, now: u64) {
        assert!(Lifecycle::Moving.rejects_motion(now, &t));
        assert!(Lifecycle::Jumping.rejects_motion(now, &t));
    }
}
