// autocomplete.rs
use crate::geocoding::geocoder::Geocoder;
use crate::geocoding::validate::is_valid_address;
use crate::geocoding::AddressSuggestion;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Quiet period before a suggestion lookup fires.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Cancellable timer: scheduling cancels whatever was pending,
/// so only the most recently scheduled callback ever runs.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn schedule<F>(&self, f: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;

        thread::spawn(move || {
            thread::sleep(delay);
            if generation.load(Ordering::SeqCst) == ticket {
                f();
            }
        })
    }

    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct SuggestionSlot {
    ticket: u64,
    query: String,
    suggestions: Vec<AddressSuggestion>,
}

/// Search-as-you-type on top of [`Geocoder::suggest`].
///
/// Lookups are debounced. Every lookup that actually starts takes a ticket,
/// and a lookup finishing after a newer one has started is dropped.
/// In-flight requests are left to finish.
pub struct AddressAutocomplete {
    geocoder: Arc<Geocoder>,
    debouncer: Debouncer,
    started: Arc<AtomicU64>,
    slot: Arc<Mutex<SuggestionSlot>>,
}

impl AddressAutocomplete {
    pub fn new(geocoder: Arc<Geocoder>) -> Self {
        Self::with_delay(geocoder, DEBOUNCE_DELAY)
    }

    pub fn with_delay(geocoder: Arc<Geocoder>, delay: Duration) -> Self {
        Self {
            geocoder,
            debouncer: Debouncer::new(delay),
            started: Arc::new(AtomicU64::new(0)),
            slot: Arc::new(Mutex::new(SuggestionSlot::default())),
        }
    }

    /// Feed the current input value. Returns the timer thread when a lookup
    /// was scheduled.
    pub fn on_input(&self, text: &str) -> Option<JoinHandle<()>> {
        let query = text.trim().to_string();

        if !is_valid_address(&query) {
            self.debouncer.cancel();
            // Anything still in flight is now stale.
            let ticket = self.started.fetch_add(1, Ordering::SeqCst) + 1;
            if let Ok(mut slot) = self.slot.lock() {
                *slot = SuggestionSlot {
                    ticket,
                    query,
                    suggestions: Vec::new(),
                };
            }
            return None;
        }

        let geocoder = Arc::clone(&self.geocoder);
        let started = Arc::clone(&self.started);
        let slot = Arc::clone(&self.slot);

        Some(self.debouncer.schedule(move || {
            let ticket = started.fetch_add(1, Ordering::SeqCst) + 1;
            let suggestions = geocoder.suggest(&query);

            if started.load(Ordering::SeqCst) != ticket {
                debug!(query = %query, "discarding superseded suggestions");
                return;
            }

            if let Ok(mut slot) = slot.lock() {
                if ticket > slot.ticket {
                    *slot = SuggestionSlot {
                        ticket,
                        query,
                        suggestions,
                    };
                }
            }
        }))
    }

    pub fn suggestions(&self) -> Vec<AddressSuggestion> {
        self.slot
            .lock()
            .map(|s| s.suggestions.clone())
            .unwrap_or_default()
    }

    /// Query the current suggestions were produced for.
    pub fn current_query(&self) -> String {
        self.slot.lock().map(|s| s.query.clone()).unwrap_or_default()
    }
}
