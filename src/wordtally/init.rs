use crate::api::{TallyApi, TallyPaths};
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::{Backend, TallyConfig};
use crate::controller::{LoadReport, Tracker};
use crate::error::{Result, TallyError};
use crate::store::fs::FileStore;
use crate::store::settings::SettingsStore;
use crate::store::Store;
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the data directory.
pub const HOME_ENV: &str = "WORDTALLY_HOME";

/// Pins the calendar day (`YYYY-MM-DD`) instead of reading the system clock.
pub const TODAY_ENV: &str = "WORDTALLY_TODAY";

pub type DynApi = TallyApi<Box<dyn Store>, Box<dyn Clock>>;

pub struct TallyContext {
    pub api: DynApi,
    pub config: TallyConfig,
    pub load_report: LoadReport,
}

/// `$WORDTALLY_HOME`, or the platform config directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "wordtally", "wordtally")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| TallyError::Config("Could not determine config dir".to_string()))
}

pub fn build_store(backend: Backend, data_dir: &Path) -> Box<dyn Store> {
    match backend {
        Backend::File => Box::new(FileStore::new(data_dir)),
        Backend::Settings => Box::new(SettingsStore::new(data_dir)),
    }
}

pub fn build_clock(pinned_day: Option<&str>) -> Result<Box<dyn Clock>> {
    match pinned_day {
        Some(day) => Ok(Box::new(FixedClock::from_day(day)?)),
        None => Ok(Box::new(SystemClock)),
    }
}

/// Resolve directories and the clock from the environment and build the API.
pub fn initialize() -> Result<TallyContext> {
    let data_dir = data_dir()?;
    let pinned_day = env::var(TODAY_ENV).ok();
    initialize_in(&data_dir, pinned_day.as_deref())
}

pub fn initialize_in(data_dir: &Path, pinned_day: Option<&str>) -> Result<TallyContext> {
    let config = TallyConfig::load(data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "could not read config, using defaults");
        TallyConfig::default()
    });

    let store = build_store(config.backend, data_dir);
    let clock = build_clock(pinned_day)?;
    debug!(data_dir = %data_dir.display(), backend = %config.backend, "initializing");

    let (tracker, load_report) = Tracker::load(store, clock)?;
    let api = TallyApi::new(tracker, TallyPaths::new(data_dir));

    Ok(TallyContext {
        api,
        config,
        load_report,
    })
}
