//! One player session: wallet, catalog, the screening in progress and the
//! interruption challenge, with every mutation reported to a notifier.

use std::time::{Duration, Instant};

use crate::challenge::{ChallengePhase, InterruptionChallenge, StartOutcome};
use crate::config::AppConfig;
use crate::error::ShopError;
use crate::faults::{self, ScanReport};
use crate::ledger::{Ledger, UploadRequest, DEFAULT_AVATAR};
use crate::models::{FaultCodeSet, Movie};
use crate::notify::Notifier;
use crate::video::VideoResource;

/// Default price offered in the upload form
pub const DEFAULT_UPLOAD_PRICE: u32 = 5;

/// The movie currently on screen
#[derive(Debug, Clone)]
pub struct Screening {
    pub movie_id: u64,
    pub started_at: Instant,
    pub report: ScanReport,
}

impl Screening {
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}

/// Result of starting playback
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOutcome {
    pub report: ScanReport,
    /// A running challenge was replaced by this screening's
    pub superseded: bool,
}

/// Code editor draft for one movie
#[derive(Debug, Clone)]
pub struct CodeDraft {
    pub movie_id: u64,
    pub codes: FaultCodeSet,
}

/// Upload dialog fields
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub title: String,
    pub avatar: String,
    pub price: u32,
    pub video: Option<VideoResource>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            price: DEFAULT_UPLOAD_PRICE,
            video: None,
        }
    }
}

impl UploadForm {
    /// Take the outcome of the file picker. A rejected file also clears
    /// any earlier selection.
    pub fn choose_video(
        &mut self,
        picked: Result<VideoResource, ShopError>,
        notifier: &mut impl Notifier,
    ) {
        match picked {
            Ok(video) => {
                notifier.success("✅ Video selected", &video.file_name);
                self.video = Some(video);
            }
            Err(e) => {
                self.video = None;
                notifier.error(e.title(), &e.to_string());
            }
        }
    }

    pub fn to_request(&self) -> UploadRequest {
        UploadRequest {
            title: self.title.clone(),
            avatar: self.avatar.clone(),
            price: self.price,
            video: self.video.clone(),
        }
    }
}

pub struct Session {
    pub ledger: Ledger,
    pub challenge: InterruptionChallenge,
    screening: Option<Screening>,
}

impl Session {
    pub fn new(config: &AppConfig, notifier: &mut impl Notifier) -> Self {
        Self {
            ledger: Ledger::with_seed_catalog(config.starting_coins, config.clicks_per_coin(), notifier),
            challenge: InterruptionChallenge::new(config.challenge_rules()),
            screening: None,
        }
    }

    pub fn screening(&self) -> Option<&Screening> {
        self.screening.as_ref()
    }

    pub fn screening_movie(&self) -> Option<&Movie> {
        self.screening
            .as_ref()
            .and_then(|s| self.ledger.movie(s.movie_id))
    }

    fn report_error(e: &ShopError, notifier: &mut impl Notifier) {
        match e {
            ShopError::AlreadyPurchased => notifier.warning(e.title(), &e.to_string()),
            _ => notifier.error(e.title(), &e.to_string()),
        }
    }

    /// Click on the coin
    pub fn click_coin(&mut self, notifier: &mut impl Notifier) {
        if self.ledger.register_click() {
            notifier.success("🎉 Earned!", "+1 coin!");
        }
    }

    pub fn purchase(&mut self, id: u64, notifier: &mut impl Notifier) -> Result<(), ShopError> {
        match self.ledger.purchase(id) {
            Ok(movie) => {
                let detail = format!("Movie \"{}\" is yours now!", movie.title);
                notifier.success("✅ Purchased!", &detail);
                Ok(())
            }
            Err(e) => {
                Self::report_error(&e, notifier);
                Err(e)
            }
        }
    }

    /// Start a code editing draft from the movie's current codes
    pub fn open_editor(&self, id: u64) -> Option<CodeDraft> {
        self.ledger.movie(id).map(|m| CodeDraft {
            movie_id: id,
            codes: m.codes.clone(),
        })
    }

    pub fn save_codes(&mut self, draft: &CodeDraft, notifier: &mut impl Notifier) -> Result<(), ShopError> {
        match self.ledger.edit_codes(draft.movie_id, draft.codes.clone()) {
            Ok(()) => {
                notifier.success("💾 Saved", "Codes updated");
                Ok(())
            }
            Err(e) => {
                Self::report_error(&e, notifier);
                Err(e)
            }
        }
    }

    /// Add the form's movie to the shop and reset the form
    pub fn upload(&mut self, form: &mut UploadForm, notifier: &mut impl Notifier) -> Result<u64, ShopError> {
        match self.ledger.upload(form.to_request()) {
            Ok(id) => {
                let title = self.ledger.movie(id).map(|m| m.title.clone()).unwrap_or_default();
                notifier.success("🎉 Success!", &format!("Movie \"{}\" added to the shop!", title));
                *form = UploadForm::default();
                Ok(id)
            }
            Err(e) => {
                Self::report_error(&e, notifier);
                Err(e)
            }
        }
    }

    /// Remove a movie; an unknown id does nothing
    pub fn delete(&mut self, id: u64, notifier: &mut impl Notifier) {
        if self.ledger.delete(id).is_none() {
            return;
        }
        if self.screening.as_ref().is_some_and(|s| s.movie_id == id) {
            self.close_screening();
        }
        notifier.info("🗑️ Deleted", "Movie deleted");
    }

    /// Open the screening: scan the codes, warn about passive faults and
    /// start the challenge when the interruption code is faulty.
    pub fn play(&mut self, id: u64, now: Instant, notifier: &mut impl Notifier) -> Result<PlayOutcome, ShopError> {
        let movie = match self.ledger.movie(id) {
            Some(m) if m.is_watchable() => m,
            Some(_) => {
                let e = ShopError::NotOwned;
                Self::report_error(&e, notifier);
                return Err(e);
            }
            None => {
                let e = ShopError::UnknownMovie(id);
                Self::report_error(&e, notifier);
                return Err(e);
            }
        };

        let report = faults::scan(&movie.codes);
        faults::announce(&report, notifier);

        // A challenge left running by another screening keeps its deadline
        let superseded = report.interruption
            && self.challenge.start(now, notifier) == StartOutcome::Superseded;

        self.screening = Some(Screening {
            movie_id: id,
            started_at: now,
            report: report.clone(),
        });
        Ok(PlayOutcome { report, superseded })
    }

    /// Click on the challenge button
    pub fn challenge_click(&mut self, now: Instant, notifier: &mut impl Notifier) -> ChallengePhase {
        self.challenge.click(now, notifier)
    }

    /// Advance timers; call on every frame
    pub fn tick(&mut self, now: Instant, notifier: &mut impl Notifier) -> ChallengePhase {
        self.challenge.tick(now, notifier)
    }

    /// Close the screening. A running challenge stays armed and still
    /// reports a loss when its deadline passes.
    pub fn close_screening(&mut self) {
        self.screening = None;
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
