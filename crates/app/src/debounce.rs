//! Debounced search-as-you-type.
//!
//! Each keystroke cancels the pending timer task and schedules a new one.
//! When a timer fires the normalized term is published; pages react to the
//! term, not to the raw input.

use dioxus::prelude::*;
use shared_types::{search_term, ConsoleSettings};

/// Wait `ms` milliseconds without blocking the UI thread.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    use wasm_bindgen::JsValue;

    let timeout = ms.min(i32::MAX as u64) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window()
            .map(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
                    .is_ok()
            })
            .unwrap_or(false);
        if !scheduled {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// State of one debounced search box.
#[derive(Clone, Copy, PartialEq)]
pub struct DebouncedSearch {
    /// Raw text of the input.
    pub input: Signal<String>,
    /// Settled term, `None` when the box is empty.
    pub term: Signal<Option<String>>,
    /// True between a keystroke and the moment its term is published.
    pub pending: Signal<bool>,
    task: Signal<Option<Task>>,
    delay_ms: u64,
}

impl DebouncedSearch {
    pub fn on_input(mut self, value: String) {
        self.input.set(value.clone());
        if let Some(previous) = self.task.write().take() {
            previous.cancel();
        }

        // Clearing the box applies immediately.
        if search_term(&value).is_none() {
            self.pending.set(false);
            self.term.set(None);
            return;
        }

        self.pending.set(true);
        let delay = self.delay_ms;
        let task = spawn(async move {
            sleep_ms(delay).await;
            self.term.set(search_term(&value));
            self.pending.set(false);
            self.task.set(None);
        });
        self.task.set(Some(task));
    }

    pub fn clear(mut self) {
        if let Some(previous) = self.task.write().take() {
            previous.cancel();
        }
        self.input.set(String::new());
        self.term.set(None);
        self.pending.set(false);
    }
}

/// Debounced search state using the configured delay.
pub fn use_debounced_search() -> DebouncedSearch {
    let settings = use_context::<ConsoleSettings>();
    let input = use_signal(String::new);
    let term = use_signal(|| None::<String>);
    let pending = use_signal(|| false);
    let task = use_signal(|| None::<Task>);

    DebouncedSearch {
        input,
        term,
        pending,
        task,
        delay_ms: settings.debounce_ms,
    }
}
