// src/engine/gate.rs

use crate::model::ad::Ad;

/// Gate lifecycle: Idle until a gated action fires, then Counting while the
/// wait runs, then Skippable once it elapses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Idle,
    Counting { remaining: u32 },
    Skippable,
}

/// What the host must do after an event. Every `StartTimer` is paired with a
/// `CancelTimer` on expiry or teardown; stale ticks can never fire the gated
/// callback on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEffect {
    /// Start a 1000 ms repeating timer feeding [`CountdownGate::tick`].
    StartTimer,
    CancelTimer,
    /// Show the non-interactive "please wait N seconds" indicator.
    ShowWait(u32),
    /// Show the "skip & continue" control.
    ShowSkip,
    /// Run the original gated action's callback.
    RunAction,
    /// Tear the gate UI down (close the modal).
    Close,
}

/// Countdown gate in front of a gated action (download, next episode,
/// popunder trigger). One instance per action site.
#[derive(Debug, Default)]
pub struct CountdownGate {
    state: GateState,
}

impl CountdownGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Idle,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// The gated action fired. `ad` is the resolver's pick for the action's
    /// slot; with no matching ad the gate is bypassed and the action runs
    /// immediately (ads off never introduces an artificial delay).
    ///
    /// Re-triggering while the gate is already open is ignored.
    pub fn trigger(&mut self, ad: Option<&Ad>) -> Vec<GateEffect> {
        if self.state != GateState::Idle {
            return Vec::new();
        }
        let Some(ad) = ad else {
            return vec![GateEffect::RunAction];
        };
        if ad.countdown_seconds == 0 {
            self.state = GateState::Skippable;
            return vec![GateEffect::ShowSkip];
        }
        self.state = GateState::Counting {
            remaining: ad.countdown_seconds,
        };
        vec![GateEffect::StartTimer, GateEffect::ShowWait(ad.countdown_seconds)]
    }

    /// One 1000 ms timer tick. Only updates the display until the counter
    /// reaches zero; never runs the callback.
    pub fn tick(&mut self) -> Vec<GateEffect> {
        let GateState::Counting { remaining } = self.state else {
            return Vec::new();
        };
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.state = GateState::Skippable;
            vec![GateEffect::CancelTimer, GateEffect::ShowSkip]
        } else {
            self.state = GateState::Counting { remaining };
            vec![GateEffect::ShowWait(remaining)]
        }
    }

    /// The user activated "skip & continue". Only honored once skippable.
    pub fn skip(&mut self) -> Vec<GateEffect> {
        if self.state != GateState::Skippable {
            return Vec::new();
        }
        self.state = GateState::Idle;
        vec![GateEffect::RunAction, GateEffect::Close]
    }

    /// Explicit close: aborts without running the gated action.
    pub fn close(&mut self) -> Vec<GateEffect> {
        match self.state {
            GateState::Idle => Vec::new(),
            GateState::Counting { .. } => {
                self.state = GateState::Idle;
                vec![GateEffect::CancelTimer, GateEffect::Close]
            }
            GateState::Skippable => {
                self.state = GateState::Idle;
                vec![GateEffect::Close]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ad::test_support::ad;
    use crate::model::ad::PlacementSlot;

    fn gated_ad(countdown: u32) -> Ad {
        let mut a = ad("g", PlacementSlot::ActionDownload);
        a.countdown_seconds = countdown;
        a
    }

    #[test]
    fn no_matching_ad_bypasses_the_gate() {
        let mut gate = CountdownGate::new();
        assert_eq!(gate.trigger(None), vec![GateEffect::RunAction]);
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn zero_countdown_is_immediately_skippable() {
        let mut gate = CountdownGate::new();
        let effects = gate.trigger(Some(&gated_ad(0)));
        assert_eq!(effects, vec![GateEffect::ShowSkip]);
        assert!(!effects.contains(&GateEffect::StartTimer));
        assert_eq!(gate.state(), GateState::Skippable);
    }

    #[test]
    fn five_second_gate_needs_five_discrete_ticks() {
        let mut gate = CountdownGate::new();
        assert_eq!(
            gate.trigger(Some(&gated_ad(5))),
            vec![GateEffect::StartTimer, GateEffect::ShowWait(5)]
        );

        for expected in [4, 3, 2, 1] {
            let effects = gate.tick();
            assert_eq!(effects, vec![GateEffect::ShowWait(expected)]);
            assert_eq!(gate.state(), GateState::Counting { remaining: expected });
        }

        let effects = gate.tick();
        assert_eq!(effects, vec![GateEffect::CancelTimer, GateEffect::ShowSkip]);
        assert_eq!(gate.state(), GateState::Skippable);
    }

    #[test]
    fn skip_runs_the_action_and_closes() {
        let mut gate = CountdownGate::new();
        gate.trigger(Some(&gated_ad(0)));
        assert_eq!(gate.skip(), vec![GateEffect::RunAction, GateEffect::Close]);
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn skip_while_counting_is_not_honored() {
        let mut gate = CountdownGate::new();
        gate.trigger(Some(&gated_ad(3)));
        assert!(gate.skip().is_empty());
        assert_eq!(gate.state(), GateState::Counting { remaining: 3 });
    }

    #[test]
    fn close_aborts_without_running_the_action() {
        let mut gate = CountdownGate::new();
        gate.trigger(Some(&gated_ad(3)));
        let effects = gate.close();
        assert_eq!(effects, vec![GateEffect::CancelTimer, GateEffect::Close]);
        assert!(!effects.contains(&GateEffect::RunAction));
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn retrigger_while_open_is_ignored() {
        let mut gate = CountdownGate::new();
        gate.trigger(Some(&gated_ad(3)));
        // Rapid double-click on the same action site.
        assert!(gate.trigger(Some(&gated_ad(3))).is_empty());
        assert_eq!(gate.state(), GateState::Counting { remaining: 3 });

        gate.tick();
        gate.tick();
        gate.tick();
        assert!(gate.trigger(None).is_empty());
        assert_eq!(gate.state(), GateState::Skippable);
    }
}
