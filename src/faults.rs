//! Fault scanner: decides which glitches a screening will show

use std::time::Duration;

use crate::models::{FaultChannel, FaultCodeSet, SENTINEL};
use crate::notify::Notifier;

/// How long the gray frame stays on screen
pub const GRAY_FRAME_DURATION: Duration = Duration::from_secs(3);

const FIX_HINT: &str = "Fix the code in the editor";

/// Result of scanning one movie's codes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// Active warning-only channels, in `FaultChannel::PASSIVE` order
    pub passive: Vec<FaultChannel>,
    /// The interruption channel is active and a challenge must start
    pub interruption: bool,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.passive.is_empty() && !self.interruption
    }

    pub fn has(&self, channel: FaultChannel) -> bool {
        match channel {
            FaultChannel::Interruption => self.interruption,
            _ => self.passive.contains(&channel),
        }
    }
}

pub fn scan(codes: &FaultCodeSet) -> ScanReport {
    ScanReport {
        passive: FaultChannel::PASSIVE
            .iter()
            .copied()
            .filter(|&c| codes.is_active(c))
            .collect(),
        interruption: codes.is_active(FaultChannel::Interruption),
    }
}

/// Raise one warning per active passive channel
pub fn announce(report: &ScanReport, notifier: &mut impl Notifier) {
    for channel in &report.passive {
        notifier.warning(channel.warning_title(), FIX_HINT);
    }
}

/// Seconds into the screening at which the gray frame appears: the index
/// of the first sentinel in the gray-frame code.
pub fn gray_frame_start(codes: &FaultCodeSet) -> Option<Duration> {
    codes
        .gray_frame
        .chars()
        .position(|c| c == SENTINEL)
        .map(|i| Duration::from_secs(i as u64))
}

/// Whether the gray frame covers the screen `elapsed` into the screening
pub fn gray_frame_visible(codes: &FaultCodeSet, elapsed: Duration) -> bool {
    match gray_frame_start(codes) {
        Some(start) => elapsed >= start && elapsed < start + GRAY_FRAME_DURATION,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeKind;
    use crate::notify::Notice;

    fn codes_with(channel: FaultChannel, code: &str) -> FaultCodeSet {
        let mut codes = FaultCodeSet::baseline();
        *codes.get_mut(channel) = code.to_string();
        codes
    }

    #[test]
    fn test_baseline_is_clean() {
        let report = scan(&FaultCodeSet::baseline());
        assert!(report.is_clean());
    }

    #[test]
    fn test_sentinel_anywhere_activates_channel() {
        for code in ["2111111111", "1111211111", "1111111112", "22"] {
            let report = scan(&codes_with(FaultChannel::BlackScreen, code));
            assert_eq!(report.passive, vec![FaultChannel::BlackScreen], "code {}", code);
        }
    }

    #[test]
    fn test_other_digits_are_not_faults() {
        let report = scan(&codes_with(FaultChannel::HalfGray, "1345678901"));
        assert!(report.is_clean());
        let report = scan(&codes_with(FaultChannel::HalfGray, ""));
        assert!(report.is_clean());
    }

    #[test]
    fn test_interruption_is_not_passive() {
        let report = scan(&codes_with(FaultChannel::Interruption, "1111211111"));
        assert!(report.interruption);
        assert!(report.passive.is_empty());

        let mut notices: Vec<Notice> = Vec::new();
        announce(&report, &mut notices);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_every_active_passive_channel_warns_once() {
        let mut codes = FaultCodeSet::baseline();
        codes.gray_frame = "2111111111".to_string();
        codes.half_gray = "1211111111".to_string();
        codes.black_screen = "1121111111".to_string();
        codes.permanent_interruption = "1112111111".to_string();
        codes.interruption = "1111211111".to_string();

        let report = scan(&codes);
        assert_eq!(report.passive.len(), 4);
        assert!(report.interruption);

        let mut notices: Vec<Notice> = Vec::new();
        announce(&report, &mut notices);
        assert_eq!(notices.len(), 4);
        assert!(notices.iter().all(|n| n.kind == NoticeKind::Warning));
        assert!(notices.iter().any(|n| n.title == "⚠️ Permanent interruption detected!"));
    }

    #[test]
    fn test_gray_frame_window() {
        let codes = codes_with(FaultChannel::GrayFrame, "1111211111");
        assert_eq!(gray_frame_start(&codes), Some(Duration::from_secs(4)));
        assert!(!gray_frame_visible(&codes, Duration::from_millis(3999)));
        assert!(gray_frame_visible(&codes, Duration::from_secs(4)));
        assert!(gray_frame_visible(&codes, Duration::from_millis(6999)));
        assert!(!gray_frame_visible(&codes, Duration::from_secs(7)));

        assert_eq!(gray_frame_start(&FaultCodeSet::baseline()), None);
    }
}
