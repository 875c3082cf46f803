//! Application state with explicit persistence after every mutation.
//!
//! The tracker owns the three persisted records (profile, weight log, theme)
//! and writes each one back through its [`KeyValueStore`] as soon as it
//! changes. Estimates are computed on request and never stored.

use crate::store::{KeyValueStore, DARK_MODE_KEY, PROFILE_KEY, WEIGHT_LOG_KEY};
use crate::{estimator, EstimateResult, LogEntry, Profile, Result, Theme, WeightLog};
use chrono::NaiveDate;

pub struct Tracker<S: KeyValueStore> {
    store: S,
    profile: Profile,
    log: WeightLog,
    theme: Theme,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Load all records from `store`, falling back to defaults
    pub fn open(store: S) -> Result<Self> {
        let profile = store.load(PROFILE_KEY, Profile::default())?;
        let log = store.load(WEIGHT_LOG_KEY, WeightLog::new())?;
        let dark = store.load(DARK_MODE_KEY, false)?;

        tracing::debug!(
            "Opened tracker: {} log entries, {} theme",
            log.len(),
            if dark { "dark" } else { "light" }
        );

        Ok(Self {
            store,
            profile,
            log,
            theme: Theme::from_dark_flag(dark),
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Edit the profile, then persist it as the last-used input
    pub fn update_profile<F>(&mut self, f: F) -> Result<&Profile>
    where
        F: FnOnce(&mut Profile),
    {
        f(&mut self.profile);
        self.store.save(PROFILE_KEY, &self.profile)?;
        Ok(&self.profile)
    }

    /// Targets for the current profile
    pub fn estimate(&self) -> Result<EstimateResult> {
        estimator::estimate(&self.profile)
    }

    pub fn log(&self) -> &WeightLog {
        &self.log
    }

    /// Add a weight for today and persist the log
    pub fn add_log(&mut self, weight: f64, notes: Option<&str>) -> Result<LogEntry> {
        let entry = self.log.append(weight, notes)?;
        self.store.save(WEIGHT_LOG_KEY, &self.log)?;
        Ok(entry)
    }

    /// Add a weight for a given date and persist the log
    pub fn add_log_on(
        &mut self,
        date: NaiveDate,
        weight: f64,
        notes: Option<&str>,
    ) -> Result<LogEntry> {
        let entry = self.log.append_on(date, weight, notes)?;
        self.store.save(WEIGHT_LOG_KEY, &self.log)?;
        Ok(entry)
    }

    /// Delete by display position; nothing is written when the index is invalid
    pub fn delete_log(&mut self, index: usize) -> Result<LogEntry> {
        let removed = self.log.remove(index)?;
        self.store.save(WEIGHT_LOG_KEY, &self.log)?;
        Ok(removed)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme> {
        self.theme = theme;
        self.store.save(DARK_MODE_KEY, &theme.is_dark())?;
        Ok(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.set_theme(self.theme.toggled())
    }

    /// Hand back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }
}
