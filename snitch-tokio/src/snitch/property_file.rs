use derivative::Derivative;
use std::net::IpAddr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::*;

use crate::error::Result;
use crate::lifecycle::IoLifecycle;
use crate::snitch::endpoint_info::{EndpointInfoResolver, ResolverState};
use crate::snitch::property_file_loader::PropertyFileLoader;
use crate::snitch::Snitch;
use crate::BoxFuture;

/// Snitch which reads the topology of the local node from a `cassandra-rackdc.properties` file.
/// Other nodes are resolved with [`EndpointInfoResolver`].
///
/// The file must be loaded, by [`start()`](Self::start) or
/// [`load_property_file()`](Self::load_property_file), before query results are meaningful for the
/// local node. When a reload interval is configured, the file is periodically checked for changes
/// in the background. Datacenter and rack of a running node are never changed by a reload, since
/// that would silently misplace data; only `prefer_local` is picked up.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct PropertyFileSnitch {
    resolver: Arc<EndpointInfoResolver>,
    loader: Arc<PropertyFileLoader>,
    lifecycle: IoLifecycle,
    reload_interval: Option<Duration>,
    #[derivative(Debug = "ignore")]
    watcher: Mutex<Option<Watcher>>,
    ready: AtomicBool,
}

struct Watcher {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl PropertyFileSnitch {
    pub(crate) fn new(
        resolver: EndpointInfoResolver,
        loader: PropertyFileLoader,
        reload_interval: Option<Duration>,
    ) -> Self {
        PropertyFileSnitch {
            resolver: Arc::new(resolver),
            loader: Arc::new(loader),
            lifecycle: IoLifecycle::new(),
            reload_interval,
            watcher: Default::default(),
            ready: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn resolver(&self) -> &EndpointInfoResolver {
        &self.resolver
    }

    #[inline]
    pub fn property_file_path(&self) -> &Path {
        self.loader.path()
    }

    /// Has the property file been successfully loaded.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    #[inline]
    pub async fn datacenter(&self, endpoint: IpAddr) -> String {
        self.resolver.datacenter(endpoint).await
    }

    #[inline]
    pub async fn rack(&self, endpoint: IpAddr) -> String {
        self.resolver.rack(endpoint).await
    }

    /// Loads the property file and applies declared topology to the local node.
    pub async fn load_property_file(&self) -> Result<()> {
        let properties = self.loader.load().await?;
        self.resolver.apply_properties(&properties);

        info!(
            path = %self.loader.path().display(),
            dc = %properties.datacenter(),
            rack = properties.rack(),
            prefer_local = properties.prefer_local(),
            "Loaded topology of the local node."
        );

        self.ready.store(true, Ordering::Release);
        Ok(())
    }

    /// Re-reads the property file and applies changes which are safe for a running node. Returns
    /// `true` if anything was applied. If the file was never loaded, this is equivalent to
    /// [`Self::load_property_file`].
    pub async fn reload_property_file(&self) -> Result<bool> {
        if !self.is_ready() {
            return self.load_property_file().await.map(|_| true);
        }

        reload(&self.loader, &self.resolver).await
    }

    /// Loads the property file and starts background I/O. Can be called again after
    /// [`stop()`](Self::stop).
    pub async fn start(&self) -> Result<()> {
        self.reset_lifecycle();
        self.load_property_file().await?;
        self.start_watcher().await;
        Ok(())
    }

    /// Stops background I/O and waits for it to finish.
    pub async fn stop(&self) {
        self.stop_watcher().await;
        self.lifecycle.mark_stopped();
    }

    /// Stops background I/O, keeping the snitch usable for queries. Queries are answered after
    /// [`stop()`](Self::stop) as well, so both only differ in intent.
    #[inline]
    pub async fn pause_io(&self) {
        self.stop().await
    }

    /// Restarts background I/O stopped by [`Self::pause_io`].
    pub async fn resume_io(&self) {
        self.reset_lifecycle();

        if self.is_ready() {
            self.start_watcher().await;
        }
    }

    /// Rearms the I/O stopped signal, so start/stop sequences can be repeated.
    #[inline]
    pub fn reset_lifecycle(&self) {
        self.lifecycle.reset();
    }

    #[inline]
    pub fn is_io_stopped(&self) -> bool {
        self.lifecycle.is_stopped()
    }

    /// Waits until background I/O is stopped.
    pub async fn wait_io_stopped(&self) {
        self.lifecycle.wait_stopped().await
    }

    async fn start_watcher(&self) {
        let reload_interval = match self.reload_interval {
            Some(reload_interval) if !reload_interval.is_zero() => reload_interval,
            _ => return,
        };

        let mut watcher = self.watcher.lock().await;
        if watcher.is_some() {
            return;
        }

        debug!(?reload_interval, "Starting property file watcher.");

        let (shutdown, shutdown_receiver) = oneshot::channel();
        let handle = tokio::spawn(watch_property_file(
            self.loader.clone(),
            self.resolver.clone(),
            reload_interval,
            shutdown_receiver,
        ));

        *watcher = Some(Watcher { shutdown, handle });
    }

    async fn stop_watcher(&self) {
        let watcher = self.watcher.lock().await.take();
        if let Some(Watcher { shutdown, handle }) = watcher {
            // the watcher might have already finished on its own
            let _ = shutdown.send(());

            if let Err(error) = handle.await {
                warn!(%error, "Property file watcher failed.");
            }
        }
    }
}

impl Snitch for PropertyFileSnitch {
    fn name(&self) -> &'static str {
        "PropertyFileSnitch"
    }

    fn datacenter(&self, endpoint: IpAddr) -> BoxFuture<String> {
        Box::pin(self.resolver.datacenter(endpoint))
    }

    fn rack(&self, endpoint: IpAddr) -> BoxFuture<String> {
        Box::pin(self.resolver.rack(endpoint))
    }

    fn set_my_datacenter(&self, datacenter: String) {
        self.resolver.set_my_datacenter(datacenter);
    }

    fn set_my_rack(&self, rack: String) {
        self.resolver.set_my_rack(rack);
    }

    fn set_prefer_local(&self, prefer_local: bool) {
        self.resolver.set_prefer_local(prefer_local);
    }

    fn prefer_local(&self) -> bool {
        self.resolver.prefer_local()
    }

    fn start(&self) -> BoxFuture<Result<()>> {
        Box::pin(PropertyFileSnitch::start(self))
    }

    fn stop(&self) -> BoxFuture<()> {
        Box::pin(PropertyFileSnitch::stop(self))
    }
}

async fn reload(loader: &PropertyFileLoader, resolver: &EndpointInfoResolver) -> Result<bool> {
    let properties = match loader.load_if_changed().await? {
        Some(properties) => properties,
        None => return Ok(false),
    };

    let declared = ResolverState::from(&properties);

    // compare with the declaration in effect, not with overrides set at configuration time
    if let Some(loaded) = loader.properties() {
        let loaded = ResolverState::from(loaded.as_ref());
        if declared.my_dc != loaded.my_dc || declared.my_rack != loaded.my_rack {
            error!(
                path = %loader.path().display(),
                current_dc = %loaded.my_dc,
                current_rack = %loaded.my_rack,
                dc = %declared.my_dc,
                rack = %declared.my_rack,
                "Datacenter and rack of a running node cannot be changed. Ignoring new values."
            );
        }
    }

    if declared.prefer_local == resolver.prefer_local() {
        return Ok(false);
    }

    info!(prefer_local = declared.prefer_local, "Applying reloaded prefer_local.");
    resolver.set_prefer_local(declared.prefer_local);

    Ok(true)
}

async fn watch_property_file(
    loader: Arc<PropertyFileLoader>,
    resolver: Arc<EndpointInfoResolver>,
    reload_interval: Duration,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut ticker = interval_at(Instant::now() + reload_interval, reload_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                if let Err(error) = reload(&loader, &resolver).await {
                    error!(%error, "Error reloading property file. Keeping previous topology.");
                }
            }
        }
    }

    debug!("Property file watcher stopped.");
}
