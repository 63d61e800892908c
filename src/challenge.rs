//! Interruption challenge: a timed click-counting mini-game
//!
//! The engine owns the only deadline in the application. The deadline is
//! a plain `Instant` checked by [`InterruptionChallenge::tick`], so both the
//! click handler and the timeout read the same live counter. Winning clears
//! the deadline, which means a later tick can never report a loss.

use std::time::{Duration, Instant};

use crate::notify::Notifier;

/// Challenge state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengePhase {
    Idle,
    Active,
    Won,
    Lost,
}

/// Clicks needed and time allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeRules {
    pub target_clicks: u32,
    pub window: Duration,
}

impl Default for ChallengeRules {
    fn default() -> Self {
        Self {
            target_clicks: 15,
            window: Duration::from_secs(5),
        }
    }
}

/// What `start` did with the previous challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// An active challenge was replaced; its deadline no longer exists
    Superseded,
}

#[derive(Debug, Clone)]
pub struct InterruptionChallenge {
    rules: ChallengeRules,
    phase: ChallengePhase,
    clicks: u32,
    deadline: Option<Instant>,
}

impl Default for InterruptionChallenge {
    fn default() -> Self {
        Self::new(ChallengeRules::default())
    }
}

impl InterruptionChallenge {
    pub fn new(rules: ChallengeRules) -> Self {
        Self {
            rules,
            phase: ChallengePhase::Idle,
            clicks: 0,
            deadline: None,
        }
    }

    pub fn rules(&self) -> ChallengeRules {
        self.rules
    }

    /// New rules apply from the next start
    pub fn set_rules(&mut self, rules: ChallengeRules) {
        self.rules = rules;
    }

    pub fn phase(&self) -> ChallengePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == ChallengePhase::Active
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline fires, zero when not armed
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline
            .map(|d| d.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    /// Reset the counter, arm the deadline and tell the user what to do
    pub fn start(&mut self, now: Instant, notifier: &mut impl Notifier) -> StartOutcome {
        let outcome = if self.is_active() {
            StartOutcome::Superseded
        } else {
            StartOutcome::Started
        };

        self.phase = ChallengePhase::Active;
        self.clicks = 0;
        self.deadline = Some(now + self.rules.window);

        notifier.info(
            "⚡ Interruption!",
            &format!(
                "Click {} times in {} seconds!",
                self.rules.target_clicks,
                self.rules.window.as_secs()
            ),
        );
        outcome
    }

    /// Count one click. Clicks outside an active challenge, or arriving
    /// after the deadline has passed, do nothing.
    pub fn click(&mut self, now: Instant, notifier: &mut impl Notifier) -> ChallengePhase {
        if !self.is_active() {
            return self.phase;
        }
        if self.deadline.is_some_and(|d| now >= d) {
            // The timeout wins a tie with a late click
            return self.tick(now, notifier);
        }

        self.clicks += 1;
        if self.clicks >= self.rules.target_clicks {
            self.deadline = None;
            self.phase = ChallengePhase::Won;
            notifier.success("✅ Success!", "Interruption fixed!");
        }
        self.phase
    }

    /// Fire the deadline if it has passed
    pub fn tick(&mut self, now: Instant, notifier: &mut impl Notifier) -> ChallengePhase {
        let Some(deadline) = self.deadline else {
            return self.phase;
        };
        if now < deadline {
            return self.phase;
        }

        self.deadline = None;
        if self.is_active() && self.clicks < self.rules.target_clicks {
            self.phase = ChallengePhase::Lost;
            notifier.error(
                "❌ Interruption!",
                &format!(
                    "You did not click {} times in {} seconds",
                    self.rules.target_clicks,
                    self.rules.window.as_secs()
                ),
            );
        }
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeKind;
    use crate::notify::Notice;

    fn click_n(c: &mut InterruptionChallenge, n: u32, now: Instant, notices: &mut Vec<Notice>) {
        for _ in 0..n {
            c.click(now, notices);
        }
    }

    #[test]
    fn test_start_arms_deadline_and_announces() {
        let mut c = InterruptionChallenge::default();
        let mut notices: Vec<Notice> = Vec::new();
        let t0 = Instant::now();

        assert_eq!(c.start(t0, &mut notices), StartOutcome::Started);
        assert!(c.is_active());
        assert_eq!(c.clicks(), 0);
        assert_eq!(c.deadline(), Some(t0 + Duration::from_secs(5)));
        assert_eq!(c.remaining(t0 + Duration::from_secs(2)), Duration::from_secs(3));
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Info);
        assert_eq!(notices[0].detail, "Click 15 times in 5 seconds!");
    }

    #[test]
    fn test_fifteen_clicks_win_and_cancel_deadline() {
        let mut c = InterruptionChallenge::default();
        let mut notices: Vec<Notice> = Vec::new();
        let t0 = Instant::now();
        c.start(t0, &mut notices);

        click_n(&mut c, 14, t0 + Duration::from_secs(1), &mut notices);
        assert!(c.is_active());
        assert_eq!(c.clicks(), 14);

        let phase = c.click(t0 + Duration::from_secs(2), &mut notices);
        assert_eq!(phase, ChallengePhase::Won);
        assert_eq!(c.deadline(), None);
        assert_eq!(notices.last().map(|n| n.kind), Some(NoticeKind::Success));

        // The old deadline passing must not produce a loss
        let before = notices.len();
        assert_eq!(c.tick(t0 + Duration::from_secs(6), &mut notices), ChallengePhase::Won);
        assert_eq!(notices.len(), before);
    }

    #[test]
    fn test_timeout_reads_live_counter() {
        let mut c = InterruptionChallenge::default();
        let mut notices: Vec<Notice> = Vec::new();
        let t0 = Instant::now();
        c.start(t0, &mut notices);

        click_n(&mut c, 10, t0 + Duration::from_secs(1), &mut notices);
        assert_eq!(c.tick(t0 + Duration::from_millis(4999), &mut notices), ChallengePhase::Active);
        assert_eq!(c.tick(t0 + Duration::from_secs(5), &mut notices), ChallengePhase::Lost);
        assert_eq!(c.clicks(), 10);
        assert_eq!(notices.last().map(|n| n.kind), Some(NoticeKind::Error));

        // Fires once
        let before = notices.len();
        c.tick(t0 + Duration::from_secs(9), &mut notices);
        assert_eq!(notices.len(), before);
    }

    #[test]
    fn test_clicks_while_idle_are_ignored() {
        let mut c = InterruptionChallenge::default();
        let mut notices: Vec<Notice> = Vec::new();
        assert_eq!(c.click(Instant::now(), &mut notices), ChallengePhase::Idle);
        assert_eq!(c.clicks(), 0);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_late_click_does_not_count() {
        let mut c = InterruptionChallenge::default();
        let mut notices: Vec<Notice> = Vec::new();
        let t0 = Instant::now();
        c.start(t0, &mut notices);
        click_n(&mut c, 14, t0, &mut notices);

        let phase = c.click(t0 + Duration::from_secs(5), &mut notices);
        assert_eq!(phase, ChallengePhase::Lost);
        assert_eq!(c.clicks(), 14);

        // Terminal: more clicks change nothing
        c.click(t0 + Duration::from_secs(6), &mut notices);
        assert_eq!(c.clicks(), 14);
    }

    #[test]
    fn test_second_start_supersedes_first() {
        let mut c = InterruptionChallenge::default();
        let mut notices: Vec<Notice> = Vec::new();
        let t0 = Instant::now();
        c.start(t0, &mut notices);
        click_n(&mut c, 5, t0, &mut notices);

        let t1 = t0 + Duration::from_secs(3);
        assert_eq!(c.start(t1, &mut notices), StartOutcome::Superseded);
        assert_eq!(c.clicks(), 0);
        assert_eq!(c.deadline(), Some(t1 + Duration::from_secs(5)));

        // The first deadline is gone
        assert_eq!(c.tick(t0 + Duration::from_secs(5), &mut notices), ChallengePhase::Active);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ChallengeRules { target_clicks: 3, window: Duration::from_secs(2) };
        let mut c = InterruptionChallenge::new(rules);
        let mut notices: Vec<Notice> = Vec::new();
        let t0 = Instant::now();
        c.start(t0, &mut notices);
        assert_eq!(notices[0].detail, "Click 3 times in 2 seconds!");
        click_n(&mut c, 3, t0, &mut notices);
        assert_eq!(c.phase(), ChallengePhase::Won);
    }
}
