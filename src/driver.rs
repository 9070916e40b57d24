//! Scripted front end for the PrimeTime store.
//!
//! Each [`Command`] stands for one button press on one of the app screens. The
//! driver talks to the store only through scoped child stores, the way each
//! screen would, and prints what that screen would show.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::app::primes::{is_prime, ordinal, PrimeLookup};
use crate::app::{
    app_reducer, AppAction, AppState, CounterAction, CounterState, FavoritePrimesAction,
    PrimeModalAction, PrimeModalState,
};
use crate::config::{Config, LoggingConfig, TransitionLog};
use crate::mvi::{BoxReducer, JsonLinesSink, ReducerExt, Store, Subscription, TracingSink};

/// One scripted user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Increment,
    Decrement,
    Save,
    Remove,
    Delete(Vec<usize>),
    NthPrime,
    Dismiss,
    State,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error(
        "unknown command '{0}' (expected incr, decr, save, remove, delete:<i>[,<j>...], nth, dismiss or state)"
    )]
    Unknown(String),

    #[error("'delete:' needs at least one index")]
    MissingIndices,

    #[error("invalid index '{0}' in delete command")]
    InvalidIndex(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s {
            "incr" => Command::Increment,
            "decr" => Command::Decrement,
            "save" => Command::Save,
            "remove" => Command::Remove,
            "nth" => Command::NthPrime,
            "dismiss" => Command::Dismiss,
            "state" => Command::State,
            other => {
                let Some(indices) = other.strip_prefix("delete:") else {
                    return Err(CommandError::Unknown(other.to_string()));
                };
                if indices.trim().is_empty() {
                    return Err(CommandError::MissingIndices);
                }
                let indices = indices
                    .split(',')
                    .map(|index| {
                        index
                            .trim()
                            .parse::<usize>()
                            .map_err(|_| CommandError::InvalidIndex(index.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Command::Delete(indices)
            }
        };
        Ok(command)
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode state: {0}")]
    Json(#[from] serde_json::Error),

    #[error("nth-prime lookup task failed: {0}")]
    Lookup(#[from] tokio::task::JoinError),
}

/// The root reducer wrapped in the transition logging `config` asks for.
pub fn build_reducer(config: &LoggingConfig) -> io::Result<BoxReducer<AppState, AppAction>> {
    let reducer = app_reducer();
    let reducer = match config.transitions {
        TransitionLog::Off => reducer.boxed(),
        TransitionLog::Tracing => reducer.logging(TracingSink).boxed(),
        TransitionLog::Json => match &config.json_path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                reducer.logging(JsonLinesSink::new(file)).boxed()
            }
            None => reducer.logging(JsonLinesSink::new(io::stderr())).boxed(),
        },
    };
    Ok(reducer)
}

/// Root store seeded from `config`.
pub fn build_store(config: &Config) -> io::Result<Store<AppState, AppAction>> {
    let reducer = build_reducer(&config.logging)?;
    Ok(Store::new(
        AppState::with_count(config.app.initial_count),
        reducer,
    ))
}

pub struct Driver<W> {
    store: Store<AppState, AppAction>,
    counter: Store<CounterState, AppAction>,
    prime_modal: Store<PrimeModalState, AppAction>,
    favorites: Store<Vec<i64>, FavoritePrimesAction>,
    lookup: Arc<dyn PrimeLookup>,
    out: W,
    renders: Arc<AtomicUsize>,
    _subscriptions: Vec<Subscription>,
}

impl<W: Write> Driver<W> {
    pub fn new(store: Store<AppState, AppAction>, lookup: Arc<dyn PrimeLookup>, out: W) -> Self {
        let counter = store.scope(AppState::counter);
        let prime_modal = store.scope(AppState::prime_modal);
        let favorites = store.scope_with(
            |state: &AppState| state.favorite_primes.clone(),
            AppAction::FavoritePrimes,
        );

        let renders = Arc::new(AtomicUsize::new(0));
        let rendered = Arc::clone(&renders);
        let root = store.subscribe(move |state: &AppState| {
            let frame = rendered.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::debug!(
                frame,
                count = state.count,
                favorites = state.favorite_primes.len(),
                activity = state.activity_feed.len(),
                "render"
            );
        });
        let favorites_view = favorites.subscribe(|primes: &Vec<i64>| {
            tracing::trace!(?primes, "favorites view updated");
        });

        Self {
            store,
            counter,
            prime_modal,
            favorites,
            lookup,
            out,
            renders,
            _subscriptions: vec![root, favorites_view],
        }
    }

    pub fn store(&self) -> &Store<AppState, AppAction> {
        &self.store
    }

    /// Number of root notifications observed so far.
    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::Relaxed)
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute `commands` in order.
    pub async fn run(&mut self, commands: &[Command]) -> Result<(), DriverError> {
        for command in commands {
            tracing::debug!(?command, "executing command");
            self.execute(command).await?;
        }
        Ok(())
    }

    async fn execute(&mut self, command: &Command) -> Result<(), DriverError> {
        match command {
            Command::Increment => {
                self.counter.send(AppAction::Counter(CounterAction::Increment));
                self.print_count()?;
            }
            Command::Decrement => {
                self.counter.send(AppAction::Counter(CounterAction::Decrement));
                self.print_count()?;
            }
            Command::Save => self.save()?,
            Command::Remove => self.remove()?,
            Command::Delete(indices) => {
                self.favorites
                    .send(FavoritePrimesAction::DeleteFavoritePrimes(indices.clone()));
                let primes = self.favorites.value();
                writeln!(self.out, "favorite primes: {primes:?}")?;
            }
            Command::NthPrime => self.nth_prime().await?,
            Command::Dismiss => {
                self.counter
                    .send(AppAction::Counter(CounterAction::AlertDismissed));
            }
            Command::State => self.print_state()?,
        }
        Ok(())
    }

    fn print_count(&mut self) -> Result<(), DriverError> {
        let count = self.counter.with_value(|counter| counter.count);
        writeln!(self.out, "count: {count}")?;
        Ok(())
    }

    fn save(&mut self) -> Result<(), DriverError> {
        let modal = self.prime_modal.value();
        if !is_prime(modal.count) {
            writeln!(self.out, "{} is not prime :(", modal.count)?;
        } else if modal.is_favorite() {
            writeln!(self.out, "{} is already a favorite prime", modal.count)?;
        } else {
            self.prime_modal
                .send(AppAction::PrimeModal(PrimeModalAction::SaveFavoritePrime));
            writeln!(self.out, "saved {} to favorite primes", modal.count)?;
        }
        Ok(())
    }

    fn remove(&mut self) -> Result<(), DriverError> {
        let modal = self.prime_modal.value();
        if modal.is_favorite() {
            self.prime_modal
                .send(AppAction::PrimeModal(PrimeModalAction::RemoveFavoritePrime));
            writeln!(self.out, "removed {} from favorite primes", modal.count)?;
        } else {
            writeln!(self.out, "{} is not a favorite prime", modal.count)?;
        }
        Ok(())
    }

    /// Request the nth prime, run the lookup off the dispatch path and feed
    /// the answer back as a second action.
    async fn nth_prime(&mut self) -> Result<(), DriverError> {
        let counter = self.counter.value();
        if !counter.can_request_nth_prime() {
            writeln!(self.out, "an nth-prime lookup is already in flight")?;
            return Ok(());
        }

        let n = counter.count;
        self.counter
            .send(AppAction::Counter(CounterAction::NthPrimeRequested));

        let lookup = Arc::clone(&self.lookup);
        let answer = tokio::task::spawn_blocking(move || lookup.nth_prime(n)).await?;
        let prime = match answer {
            Ok(prime) => Some(prime),
            Err(err) => {
                tracing::warn!(n, error = %err, "nth-prime lookup failed");
                writeln!(self.out, "lookup failed: {err}")?;
                None
            }
        };
        self.counter
            .send(AppAction::Counter(CounterAction::NthPrimeResponse(prime)));

        if let Some(prime) = self.counter.with_value(|counter| counter.alert_nth_prime) {
            writeln!(self.out, "The {} prime is {prime}", ordinal(n))?;
        }
        Ok(())
    }

    /// Write the full state as pretty JSON.
    pub fn print_state(&mut self) -> Result<(), DriverError> {
        let json = self
            .store
            .with_value(|state| serde_json::to_string_pretty(state))?;
        writeln!(self.out, "{json}")?;
        Ok(())
    }
}
