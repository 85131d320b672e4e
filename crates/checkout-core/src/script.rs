//! # External Script Loader
//!
//! Lazy loading of third-party scripts (payment gateway clients, 3-D Secure,
//! device data collectors) into the host page.
//!
//! Each library key moves through three states:
//!
//! ```text
//! Unrequested ──load()──► Loading ──fetch ok + export found──► Loaded
//!      ▲                     │
//!      └──── fetch failed ───┘
//! ```
//!
//! While a key is `Loading`, later callers join the same in-flight fetch.
//! Once `Loaded`, the cached handle is returned without fetching again or
//! reading the host window. Failures are handed to every joined caller and
//! are not cached, so the next call starts a fresh fetch.

use crate::error::LoadFailure;
use async_trait::async_trait;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::cell::RefCell;
use std::collections::hash_map::{Entry, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;
use tracing::{debug, info, instrument, trace, warn};

/// Capability that fetches and executes a script by URL.
#[async_trait(?Send)]
pub trait ScriptLoader {
    async fn load_script(&self, url: &str) -> Result<(), LoadFailure>;
}

/// The host global object that loaded scripts attach their exports to.
pub trait HostWindow {
    /// Handle type of an attached export
    type Export: Clone + 'static;

    /// Read `namespace.name` from the global object
    fn export(&self, namespace: &str, name: &str) -> Option<Self::Export>;
}

/// Observable state of a library key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unrequested,
    Loading,
    Loaded,
}

type SharedLoad<H> = Shared<LocalBoxFuture<'static, Result<H, LoadFailure>>>;

enum Slot<H> {
    Loading(SharedLoad<H>),
    Loaded(H),
}

/// Per-key memoisation of script loads.
pub struct ScriptCache<K, H> {
    slots: RefCell<HashMap<K, Slot<H>>>,
}

impl<K, H> Default for ScriptCache<K, H> {
    fn default() -> Self {
        Self {
            slots: RefCell::new(HashMap::new()),
        }
    }
}

impl<K, H> ScriptCache<K, H>
where
    K: Copy + Eq + Hash + Debug,
    H: Clone + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `key`
    pub fn state(&self, key: K) -> LoadState {
        match self.slots.borrow().get(&key) {
            None => LoadState::Unrequested,
            Some(Slot::Loading(_)) => LoadState::Loading,
            Some(Slot::Loaded(_)) => LoadState::Loaded,
        }
    }

    /// Return the handle for `key`, starting `load` only if no load for the
    /// key is cached or in flight.
    pub async fn get_or_load<F>(&self, key: K, load: F) -> Result<H, LoadFailure>
    where
        F: FnOnce() -> LocalBoxFuture<'static, Result<H, LoadFailure>>,
    {
        let pending = {
            let mut slots = self.slots.borrow_mut();
            match slots.entry(key) {
                Entry::Occupied(entry) => match entry.get() {
                    Slot::Loaded(handle) => {
                        trace!(?key, "script cache hit");
                        return Ok(handle.clone());
                    }
                    Slot::Loading(pending) => {
                        debug!(?key, "joining in-flight script load");
                        pending.clone()
                    }
                },
                Entry::Vacant(entry) => {
                    debug!(?key, "starting script load");
                    let pending = load().shared();
                    entry.insert(Slot::Loading(pending.clone()));
                    pending
                }
            }
        };

        let result = pending.clone().await;

        // The first caller to observe the result settles the slot; joiners
        // find it already settled.
        let mut slots = self.slots.borrow_mut();
        let unsettled = matches!(
            slots.get(&key),
            Some(Slot::Loading(current)) if current.ptr_eq(&pending)
        );
        if unsettled {
            match &result {
                Ok(handle) => {
                    slots.insert(key, Slot::Loaded(handle.clone()));
                }
                Err(err) => {
                    warn!(?key, error = %err, "script load failed, next call will retry");
                    slots.remove(&key);
                }
            }
        }

        result
    }
}

/// Where a library's script lives and where its export appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    /// Script URL
    pub url: String,
    /// Global namespace the script attaches to (e.g. `braintree`)
    pub namespace: String,
    /// Property under the namespace holding the export (e.g. `client`)
    pub export: String,
}

impl ScriptSource {
    pub fn new(
        url: impl Into<String>,
        namespace: impl Into<String>,
        export: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            namespace: namespace.into(),
            export: export.into(),
        }
    }

    /// Dotted path of the export, e.g. `braintree.client`
    pub fn export_path(&self) -> String {
        format!("{}.{}", self.namespace, self.export)
    }
}

/// Fetches library scripts through a [`ScriptLoader`] and reads their exports
/// from a [`HostWindow`], at most once per key.
pub struct ExternalScriptLoader<K, W: HostWindow> {
    script_loader: Rc<dyn ScriptLoader>,
    window: Rc<W>,
    cache: ScriptCache<K, W::Export>,
}

impl<K, W> ExternalScriptLoader<K, W>
where
    K: Copy + Eq + Hash + Debug,
    W: HostWindow + 'static,
{
    pub fn new(script_loader: Rc<dyn ScriptLoader>, window: Rc<W>) -> Self {
        Self {
            script_loader,
            window,
            cache: ScriptCache::new(),
        }
    }

    /// Current state of `key`
    pub fn state(&self, key: K) -> LoadState {
        self.cache.state(key)
    }

    /// Load the library identified by `key` from `source`.
    #[instrument(skip(self, source), fields(url = %source.url))]
    pub async fn load(&self, key: K, source: ScriptSource) -> Result<W::Export, LoadFailure> {
        let script_loader = Rc::clone(&self.script_loader);
        let window = Rc::clone(&self.window);

        self.cache
            .get_or_load(key, move || {
                async move {
                    script_loader.load_script(&source.url).await?;

                    let export = window
                        .export(&source.namespace, &source.export)
                        .ok_or_else(|| LoadFailure::MissingExport {
                            url: source.url.clone(),
                            path: source.export_path(),
                        })?;

                    info!("Loaded {} from {}", source.export_path(), source.url);
                    Ok::<_, LoadFailure>(export)
                }
                .boxed_local()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeWindow {
        exports: RefCell<HashMap<String, Rc<String>>>,
    }

    impl HostWindow for FakeWindow {
        type Export = Rc<String>;

        fn export(&self, namespace: &str, name: &str) -> Option<Rc<String>> {
            self.exports
                .borrow()
                .get(&format!("{namespace}.{name}"))
                .cloned()
        }
    }

    struct StubLoader {
        window: Rc<FakeWindow>,
        calls: RefCell<Vec<String>>,
        failures: Cell<usize>,
        attach: bool,
    }

    impl StubLoader {
        fn new(window: Rc<FakeWindow>) -> Self {
            Self {
                window,
                calls: RefCell::new(Vec::new()),
                failures: Cell::new(0),
                attach: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl ScriptLoader for StubLoader {
        async fn load_script(&self, url: &str) -> Result<(), LoadFailure> {
            self.calls.borrow_mut().push(url.to_string());
            tokio::task::yield_now().await;

            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(LoadFailure::script(url, "network error"));
            }
            if self.attach {
                self.window
                    .exports
                    .borrow_mut()
                    .insert("vendor.client".into(), Rc::new(format!("factory from {url}")));
            }
            Ok(())
        }
    }

    const URL: &str = "//cdn.example/1.0.0/js/client.min.js";

    fn source() -> ScriptSource {
        ScriptSource::new(URL, "vendor", "client")
    }

    fn setup(stub: impl FnOnce(&mut StubLoader)) -> (Rc<StubLoader>, ExternalScriptLoader<&'static str, FakeWindow>) {
        let window = Rc::new(FakeWindow::default());
        let mut loader = StubLoader::new(Rc::clone(&window));
        stub(&mut loader);
        let loader = Rc::new(loader);
        let external = ExternalScriptLoader::new(loader.clone(), window);
        (loader, external)
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_fetch() {
        let (stub, loader) = setup(|_| {});

        let (a, b, c) = futures::join!(
            loader.load("client", source()),
            loader.load("client", source()),
            loader.load("client", source()),
        );

        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
        assert_eq!(stub.call_count(), 1);
        assert!(Rc::ptr_eq(&a, &b));
        assert!(Rc::ptr_eq(&b, &c));
        assert_eq!(loader.state("client"), LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_loaded_handle_is_cached() {
        let (stub, loader) = setup(|_| {});

        let first = loader.load("client", source()).await.unwrap();
        // Replacing the global export must not affect the cached handle
        stub.window
            .exports
            .borrow_mut()
            .insert("vendor.client".into(), Rc::new("replaced".into()));
        let second = loader.load("client", source()).await.unwrap();

        assert_eq!(stub.call_count(), 1);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failure_reaches_every_joined_caller() {
        let (stub, loader) = setup(|s| s.failures.set(1));

        let (a, b) = futures::join!(
            loader.load("client", source()),
            loader.load("client", source()),
        );

        let expected = LoadFailure::script(URL, "network error");
        assert_eq!(a.unwrap_err(), expected);
        assert_eq!(b.unwrap_err(), expected);
        assert_eq!(stub.call_count(), 1);
        assert_eq!(loader.state("client"), LoadState::Unrequested);
    }

    #[tokio::test]
    async fn test_failed_load_can_be_retried() {
        let (stub, loader) = setup(|s| s.failures.set(1));

        assert!(loader.load("client", source()).await.is_err());
        let handle = loader.load("client", source()).await.unwrap();

        assert_eq!(stub.call_count(), 2);
        assert_eq!(*handle, format!("factory from {URL}"));
        assert_eq!(loader.state("client"), LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_missing_export_is_a_load_failure() {
        let (stub, loader) = setup(|s| s.attach = false);

        let err = loader.load("client", source()).await.unwrap_err();

        assert_eq!(
            err,
            LoadFailure::MissingExport {
                url: URL.into(),
                path: "vendor.client".into(),
            }
        );
        assert_eq!(stub.call_count(), 1);
        assert_eq!(loader.state("client"), LoadState::Unrequested);
    }

    #[tokio::test]
    async fn test_keys_are_cached_independently() {
        let (stub, loader) = setup(|_| {});

        loader.load("client", source()).await.unwrap();
        loader.load("other", source()).await.unwrap();
        loader.load("client", source()).await.unwrap();

        assert_eq!(stub.call_count(), 2);
        assert_eq!(loader.state("other"), LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_cache_reports_loading_state() {
        let cache: ScriptCache<u8, u32> = ScriptCache::new();
        assert_eq!(cache.state(1), LoadState::Unrequested);

        let load = cache.get_or_load(1, || {
            async {
                tokio::task::yield_now().await;
                Ok::<u32, LoadFailure>(7)
            }
            .boxed_local()
        });
        futures::pin_mut!(load);
        assert!(futures::poll!(load.as_mut()).is_pending());
        assert_eq!(cache.state(1), LoadState::Loading);

        assert_eq!(load.await, Ok(7));
        assert_eq!(cache.state(1), LoadState::Loaded);
    }
}
