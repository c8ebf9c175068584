use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::error::VitrineError;

/// Resolution state of an [`AssetHandle`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Still loading.
    Pending,
    /// Loaded successfully.
    Loaded,
    /// The loader reported a failure.
    Failed,
    /// Cancelled before it resolved.
    Cancelled,
}

enum Settled<T> {
    Pending,
    Loaded(Rc<T>),
    Failed(String),
    Cancelled,
}

struct Slot<T> {
    url: String,
    state: Settled<T>,
    waker: Option<Waker>,
    progress: Option<(u64, u64)>,
}

/// A single-resolution slot for an asynchronously loaded asset.
///
/// Loaders keep one clone and settle it exactly once with
/// [`resolve`](Self::resolve) or [`fail`](Self::fail); consumers poll
/// [`get`](Self::get) or `.await` the handle. Any settle after the first is
/// ignored.
///
/// Handles are single-threaded (`Rc`), matching the UI event loop they are
/// settled from.
pub struct AssetHandle<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("AssetHandle")
            .field("url", &slot.url)
            .field("status", &self.status())
            .finish()
    }
}

impl<T> AssetHandle<T> {
    /// A pending handle for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                url: url.into(),
                state: Settled::Pending,
                waker: None,
                progress: None,
            })),
        }
    }

    /// A handle that is already loaded.
    #[must_use]
    pub fn ready(url: impl Into<String>, value: T) -> Self {
        let handle = Self::new(url);
        handle.resolve(value);
        handle
    }

    /// URL this handle was created for.
    #[must_use]
    pub fn url(&self) -> String {
        self.slot.borrow().url.clone()
    }

    /// Current resolution state.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        match self.slot.borrow().state {
            Settled::Pending => LoadStatus::Pending,
            Settled::Loaded(_) => LoadStatus::Loaded,
            Settled::Failed(_) => LoadStatus::Failed,
            Settled::Cancelled => LoadStatus::Cancelled,
        }
    }

    /// The loaded asset, if the handle resolved successfully.
    #[must_use]
    pub fn get(&self) -> Option<Rc<T>> {
        match &self.slot.borrow().state {
            Settled::Loaded(value) => Some(Rc::clone(value)),
            _ => None,
        }
    }

    /// The failure description, if the load failed.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match &self.slot.borrow().state {
            Settled::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Settle successfully.
    pub fn resolve(&self, value: T) {
        if self.settle(Settled::Loaded(Rc::new(value))) {
            log::info!("loaded {}", self.url());
        }
    }

    /// Settle with a failure. The asset never becomes available.
    pub fn fail(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let url = self.url();
        if self.settle(Settled::Failed(reason.clone())) {
            log::error!("failed to load {url}: {reason}");
        }
    }

    /// Give up on a pending load. Later settles are ignored.
    pub fn cancel(&self) {
        if self.settle(Settled::Cancelled) {
            log::debug!("cancelled load of {}", self.url());
        }
    }

    /// Report download progress as `loaded` of `total` bytes. Ignored once
    /// the handle has settled.
    pub fn progress(&self, loaded: u64, total: u64) {
        let mut slot = self.slot.borrow_mut();
        if !matches!(slot.state, Settled::Pending) {
            return;
        }
        slot.progress = Some((loaded, total));
        if total > 0 {
            let percent = loaded as f64 / total as f64 * 100.0;
            log::info!("loading {}: {percent:.0}%", slot.url);
        } else {
            log::info!("loading {}: {loaded} bytes", slot.url);
        }
    }

    /// Last reported progress as `(loaded, total)` bytes.
    #[must_use]
    pub fn last_progress(&self) -> Option<(u64, u64)> {
        self.slot.borrow().progress
    }

    fn settle(&self, next: Settled<T>) -> bool {
        let waker = {
            let mut slot = self.slot.borrow_mut();
            if !matches!(slot.state, Settled::Pending) {
                log::warn!("ignoring repeat resolution of {}", slot.url);
                return false;
            }
            slot.state = next;
            slot.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        true
    }
}

impl<T> Future for AssetHandle<T> {
    type Output = Result<Rc<T>, VitrineError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        if matches!(slot.state, Settled::Pending) {
            slot.waker = Some(cx.waker().clone());
            return Poll::Pending;
        }
        match &slot.state {
            Settled::Pending => Poll::Pending,
            Settled::Loaded(value) => Poll::Ready(Ok(Rc::clone(value))),
            Settled::Failed(reason) => {
                Poll::Ready(Err(VitrineError::AssetLoad(reason.clone())))
            }
            Settled::Cancelled => Poll::Ready(Err(VitrineError::AssetCancelled)),
        }
    }
}
