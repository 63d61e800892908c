//! Tests for the play flow and the session-level notices

use super::*;
use crate::models::{FaultChannel, NoticeKind};
use crate::notify::Notice;
use std::path::PathBuf;

fn session() -> Session {
    Session::new(&AppConfig::default(), &mut Vec::<Notice>::new())
}

fn rich_session() -> Session {
    let mut s = session();
    s.ledger.deposit(100);
    s
}

#[test]
fn test_coin_notice_every_fifty_clicks() {
    let mut s = session();
    let mut notices: Vec<Notice> = Vec::new();
    for _ in 0..49 {
        s.click_coin(&mut notices);
    }
    assert!(notices.is_empty());
    s.click_coin(&mut notices);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].detail, "+1 coin!");
    assert_eq!(s.ledger.coins(), 11);
}

#[test]
fn test_purchase_failure_reports_shortfall() {
    let mut s = session();
    let mut notices: Vec<Notice> = Vec::new();

    // 10 coins, Ocean Mystery costs 8, Dragon Legend 10
    s.purchase(2, &mut notices).unwrap();
    let err = s.purchase(4, &mut notices).unwrap_err();
    assert_eq!(err, ShopError::InsufficientFunds { shortfall: 8 });
    assert_eq!(notices[1].kind, NoticeKind::Error);
    assert_eq!(notices[1].title, "❌ Not enough coins");
    assert_eq!(notices[1].detail, "You need 8 more coins");
    assert_eq!(s.ledger.coins(), 2);
}

#[test]
fn test_play_requires_ownership() {
    let mut s = session();
    let mut notices: Vec<Notice> = Vec::new();
    let now = Instant::now();

    assert_eq!(s.play(1, now, &mut notices).unwrap_err(), ShopError::NotOwned);
    assert_eq!(s.play(77, now, &mut notices).unwrap_err(), ShopError::UnknownMovie(77));
    assert!(s.screening().is_none());
    assert!(notices.iter().all(|n| n.kind == NoticeKind::Error));
}

#[test]
fn test_play_passive_fault_warns_without_challenge() {
    let mut s = session();
    let mut notices: Vec<Notice> = Vec::new();
    s.purchase(3, &mut notices).unwrap();
    notices.clear();

    let outcome = s.play(3, Instant::now(), &mut notices).unwrap();
    assert_eq!(outcome.report.passive, vec![FaultChannel::BlackScreen]);
    assert!(!outcome.report.interruption);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "⚠️ Black screen!");
    assert!(!s.challenge.is_active());
    assert_eq!(s.screening_movie().map(|m| m.id), Some(3));
}

#[test]
fn test_play_interruption_runs_challenge() {
    let mut s = rich_session();
    let mut notices: Vec<Notice> = Vec::new();
    s.purchase(4, &mut notices).unwrap();
    notices.clear();

    let t0 = Instant::now();
    let outcome = s.play(4, t0, &mut notices).unwrap();
    assert!(outcome.report.interruption);
    assert!(!outcome.superseded);
    assert!(s.challenge.is_active());
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "⚡ Interruption!");

    for _ in 0..15 {
        s.challenge_click(t0 + Duration::from_secs(1), &mut notices);
    }
    assert_eq!(s.challenge.phase(), ChallengePhase::Won);

    let count = notices.len();
    assert_eq!(s.tick(t0 + Duration::from_secs(10), &mut notices), ChallengePhase::Won);
    assert_eq!(notices.len(), count);
}

#[test]
fn test_play_interruption_lost_on_timeout() {
    let mut s = rich_session();
    let mut notices: Vec<Notice> = Vec::new();
    s.purchase(4, &mut notices).unwrap();

    let t0 = Instant::now();
    s.play(4, t0, &mut notices).unwrap();
    for _ in 0..7 {
        s.challenge_click(t0 + Duration::from_secs(2), &mut notices);
    }
    assert_eq!(s.tick(t0 + Duration::from_secs(5), &mut notices), ChallengePhase::Lost);
    assert_eq!(notices.last().unwrap().kind, NoticeKind::Error);
    // Losing has no cost
    assert_eq!(s.ledger.coins(), 100);
    assert!(s.screening().is_some());
}

#[test]
fn test_fixed_codes_play_clean() {
    let mut s = rich_session();
    let mut notices: Vec<Notice> = Vec::new();
    s.purchase(4, &mut notices).unwrap();

    let mut draft = s.open_editor(4).unwrap();
    assert_eq!(draft.codes.interruption, "1111211111");
    draft.codes.interruption = "1111111111".to_string();
    s.save_codes(&draft, &mut notices).unwrap();
    assert_eq!(notices.last().unwrap().title, "💾 Saved");

    notices.clear();
    let outcome = s.play(4, Instant::now(), &mut notices).unwrap();
    assert!(outcome.report.is_clean());
    assert!(notices.is_empty());
    assert!(!s.challenge.is_active());
}

#[test]
fn test_replaying_supersedes_running_challenge() {
    let mut s = rich_session();
    let mut notices: Vec<Notice> = Vec::new();
    s.purchase(4, &mut notices).unwrap();

    let t0 = Instant::now();
    s.play(4, t0, &mut notices).unwrap();
    let outcome = s.play(4, t0 + Duration::from_secs(2), &mut notices).unwrap();
    assert!(outcome.superseded);
    assert_eq!(s.challenge.deadline(), Some(t0 + Duration::from_secs(7)));
}

#[test]
fn test_closing_screening_keeps_challenge_deadline() {
    let mut s = rich_session();
    let mut notices: Vec<Notice> = Vec::new();
    s.purchase(4, &mut notices).unwrap();

    let t0 = Instant::now();
    s.play(4, t0, &mut notices).unwrap();
    s.challenge_click(t0 + Duration::from_secs(1), &mut notices);
    s.close_screening();
    assert!(s.screening().is_none());
    assert!(s.challenge.is_active());

    notices.clear();
    assert_eq!(s.tick(t0 + Duration::from_secs(6), &mut notices), ChallengePhase::Lost);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(notices[0].title, "❌ Interruption!");

    // The deadline fires once
    assert_eq!(s.tick(t0 + Duration::from_secs(9), &mut notices), ChallengePhase::Lost);
    assert_eq!(notices.len(), 1);
}

#[test]
fn test_clean_screening_leaves_running_challenge_armed() {
    let mut s = rich_session();
    let mut notices: Vec<Notice> = Vec::new();
    s.purchase(4, &mut notices).unwrap();
    s.purchase(1, &mut notices).unwrap();
    let mut draft = s.open_editor(1).unwrap();
    draft.codes = FaultCodeSet::baseline();
    s.save_codes(&draft, &mut notices).unwrap();

    let t0 = Instant::now();
    s.play(4, t0, &mut notices).unwrap();
    let outcome = s.play(1, t0 + Duration::from_secs(1), &mut notices).unwrap();
    assert!(outcome.report.is_clean());
    assert!(!outcome.superseded);
    assert_eq!(s.challenge.deadline(), Some(t0 + Duration::from_secs(5)));

    notices.clear();
    assert_eq!(s.tick(t0 + Duration::from_secs(6), &mut notices), ChallengePhase::Lost);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
}

#[test]
fn test_upload_flow_resets_form() {
    let mut s = session();
    let mut notices: Vec<Notice> = Vec::new();
    let mut form = UploadForm::default();
    form.title = "Holiday".to_string();

    let err = s.upload(&mut form, &mut notices).unwrap_err();
    assert_eq!(err.to_string(), "Choose a video file");
    assert_eq!(form.title, "Holiday");

    form.choose_video(VideoResource::from_path(PathBuf::from("/v/holiday.mp4")), &mut notices);
    assert_eq!(notices.last().unwrap().detail, "holiday.mp4");

    let id = s.upload(&mut form, &mut notices).unwrap();
    assert_eq!(notices.last().unwrap().detail, "Movie \"Holiday\" added to the shop!");
    assert!(form.title.is_empty());
    assert!(form.video.is_none());
    assert_eq!(form.price, DEFAULT_UPLOAD_PRICE);

    // Own uploads can be watched without buying them
    let outcome = s.play(id, Instant::now(), &mut notices).unwrap();
    assert!(outcome.report.is_clean());
}

#[test]
fn test_invalid_file_discards_selection() {
    let mut notices: Vec<Notice> = Vec::new();
    let mut form = UploadForm::default();
    form.choose_video(VideoResource::from_path(PathBuf::from("/v/a.mkv")), &mut notices);
    assert!(form.video.is_some());

    form.choose_video(VideoResource::from_path(PathBuf::from("/v/a.pdf")), &mut notices);
    assert!(form.video.is_none());
    assert_eq!(notices.last().unwrap().detail, "Please choose a video file");
}

#[test]
fn test_delete_closes_its_screening() {
    let mut s = session();
    let mut notices: Vec<Notice> = Vec::new();
    let mut form = UploadForm::default();
    form.title = "Mine".to_string();
    form.choose_video(VideoResource::from_path(PathBuf::from("/v/mine.mp4")), &mut notices);
    let id = s.upload(&mut form, &mut notices).unwrap();
    s.play(id, Instant::now(), &mut notices).unwrap();

    notices.clear();
    s.delete(id, &mut notices);
    assert!(s.screening().is_none());
    assert_eq!(notices.len(), 1);
    assert_eq!(s.ledger.movies().len(), 4);

    s.delete(id, &mut notices);
    assert_eq!(notices.len(), 1);
    assert_eq!(s.ledger.movies().len(), 4);
}
