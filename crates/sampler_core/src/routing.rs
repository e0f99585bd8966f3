//! Pluggable route fetchers: trait abstraction for directions providers.
//!
//! Implementations, selectable via [`RouteProviderKind`]:
//!
//! - **`GoogleDirectionsClient`** (feature `google`): Google Directions API.
//! - **`OsrmRouteClient`** (feature `osrm`): a local/remote OSRM HTTP endpoint.
//! - **`StaticRouteFetcher`**: fixed in-memory routes, for tests and offline runs.
//!
//! Every fetcher returns the concatenated step geometry of the first route's
//! first leg. A provider answer without routes, legs or steps is an empty
//! [`Polyline`], not an error.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;

use log::{debug, warn};
use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::geo::{GeoPoint, Polyline};

#[cfg(feature = "google")]
pub mod google;
#[cfg(feature = "osrm")]
pub mod osrm;

#[cfg(feature = "google")]
pub use google::GoogleDirectionsClient;
#[cfg(feature = "osrm")]
pub use osrm::OsrmRouteClient;

/// Trait for directions providers. Implementations must be `Send + Sync` so a
/// single fetcher can serve concurrent requests.
pub trait RouteFetcher: Send + Sync {
    /// Fetch the raw vertices of the driving route from `origin` to `destination`.
    fn fetch_route_vertices(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Polyline, FetchError>;
}

/// A fixed origin/destination → polyline entry for [`StaticRouteFetcher`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticRoute {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub vertices: Vec<GeoPoint>,
}

/// Which directions provider to use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteProviderKind {
    /// Google Directions API.
    #[cfg(feature = "google")]
    Google {
        api_key: String,
        #[serde(default = "google::default_endpoint")]
        endpoint: String,
    },
    /// OSRM HTTP endpoint (e.g. `"http://localhost:5000"`).
    #[cfg(feature = "osrm")]
    Osrm { endpoint: String },
    /// Routes listed inline, no network access.
    Static { routes: Vec<StaticRoute> },
}

#[cfg(feature = "osrm")]
impl Default for RouteProviderKind {
    fn default() -> Self {
        RouteProviderKind::Osrm {
            endpoint: osrm::DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[cfg(not(feature = "osrm"))]
impl Default for RouteProviderKind {
    fn default() -> Self {
        RouteProviderKind::Static { routes: Vec::new() }
    }
}

/// Transport settings shared by the HTTP fetchers.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSettings {
    pub request_timeout: Duration,
    pub cache_capacity: usize,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            cache_capacity: 256,
        }
    }
}

// ---------------------------------------------------------------------------
// Static fetcher
// ---------------------------------------------------------------------------

/// In-memory route table keyed by exact origin/destination coordinates.
#[derive(Debug, Default)]
pub struct StaticRouteFetcher {
    table: HashMap<((u64, u64), (u64, u64)), Polyline>,
}

impl StaticRouteFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_routes(routes: impl IntoIterator<Item = StaticRoute>) -> Self {
        let mut fetcher = Self::new();
        for route in routes {
            fetcher.insert(route.origin, route.destination, route.vertices.into());
        }
        fetcher
    }

    pub fn insert(&mut self, origin: GeoPoint, destination: GeoPoint, vertices: Polyline) {
        self.table.insert((origin.key(), destination.key()), vertices);
    }

    pub fn with_route(mut self, origin: GeoPoint, destination: GeoPoint, vertices: Polyline) -> Self {
        self.insert(origin, destination, vertices);
        self
    }
}

impl RouteFetcher for StaticRouteFetcher {
    fn fetch_route_vertices(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Polyline, FetchError> {
        self.table
            .get(&(origin.key(), destination.key()))
            .cloned()
            .ok_or_else(|| FetchError::Api(format!("no route from {origin} to {destination}")))
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

type RouteKey = ((u64, u64), (u64, u64));

/// LRU-cached wrapper around any [`RouteFetcher`].
///
/// The cache key is directional. Failures are not cached.
pub struct CachedRouteFetcher {
    inner: Box<dyn RouteFetcher>,
    cache: Mutex<LruCache<RouteKey, Polyline>>,
}

impl CachedRouteFetcher {
    pub fn new(inner: Box<dyn RouteFetcher>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached routes.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl RouteFetcher for CachedRouteFetcher {
    fn fetch_route_vertices(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Polyline, FetchError> {
        let key = (origin.key(), destination.key());

        match self.cache.lock() {
            Ok(mut cache) => {
                if let Some(cached) = cache.get(&key) {
                    debug!("route cache hit {origin} -> {destination}");
                    return Ok(cached.clone());
                }
            }
            Err(_) => {
                warn!("route cache lock poisoned, fetching without cache");
                return self.inner.fetch_route_vertices(origin, destination);
            }
        }

        let route = self.inner.fetch_route_vertices(origin, destination)?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, route.clone());
        }

        Ok(route)
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Construct a boxed [`RouteFetcher`] from a [`RouteProviderKind`] descriptor.
///
/// HTTP providers are wrapped in a [`CachedRouteFetcher`]; the static table is
/// returned as is.
pub fn build_route_fetcher(
    kind: &RouteProviderKind,
    settings: &RouteSettings,
) -> Result<Box<dyn RouteFetcher>, FetchError> {
    let fetcher: Box<dyn RouteFetcher> = match kind {
        #[cfg(feature = "google")]
        RouteProviderKind::Google { api_key, endpoint } => {
            let inner = GoogleDirectionsClient::new(endpoint, api_key, settings.request_timeout)?;
            Box::new(CachedRouteFetcher::new(
                Box::new(inner),
                settings.cache_capacity,
            ))
        }

        #[cfg(feature = "osrm")]
        RouteProviderKind::Osrm { endpoint } => {
            let inner = OsrmRouteClient::new(endpoint, settings.request_timeout)?;
            Box::new(CachedRouteFetcher::new(
                Box::new(inner),
                settings.cache_capacity,
            ))
        }

        RouteProviderKind::Static { routes } => {
            Box::new(StaticRouteFetcher::from_routes(routes.iter().cloned()))
        }
    };
    Ok(fetcher)
}

/// Concatenate decoded step geometries into one polyline.
#[cfg(any(feature = "osrm", feature = "google"))]
pub(crate) fn decode_steps<'a>(
    encoded_steps: impl IntoIterator<Item = &'a str>,
) -> Result<Polyline, FetchError> {
    let mut vertices = Polyline::default();
    for encoded in encoded_steps {
        vertices.extend(crate::polyline::decode(encoded)?.into());
    }
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingFetcher {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl RouteFetcher for CountingFetcher {
        fn fetch_route_vertices(
            &self,
            origin: GeoPoint,
            destination: GeoPoint,
        ) -> Result<Polyline, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(FetchError::Api("OVER_QUERY_LIMIT".to_string()))
            } else {
                Ok(Polyline::new(vec![origin, destination]))
            }
        }
    }

    fn a() -> GeoPoint {
        GeoPoint::new(26.8323, 80.9214)
    }

    fn b() -> GeoPoint {
        GeoPoint::new(26.8426, 80.9228)
    }

    #[test]
    fn static_fetcher_returns_registered_route() {
        let fetcher =
            StaticRouteFetcher::new().with_route(a(), b(), Polyline::new(vec![a(), b()]));
        let route = fetcher.fetch_route_vertices(a(), b()).expect("route");
        assert_eq!(route.points(), &[a(), b()]);
    }

    #[test]
    fn static_fetcher_is_directional() {
        let fetcher =
            StaticRouteFetcher::new().with_route(a(), b(), Polyline::new(vec![a(), b()]));
        assert!(matches!(
            fetcher.fetch_route_vertices(b(), a()),
            Err(FetchError::Api(_))
        ));
    }

    #[test]
    fn cache_serves_repeat_requests() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = CachedRouteFetcher::new(
            Box::new(CountingFetcher {
                calls: calls.clone(),
                fail: false,
            }),
            4,
        );

        cached.fetch_route_vertices(a(), b()).unwrap();
        cached.fetch_route_vertices(a(), b()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.cached_len(), 1);

        cached.fetch_route_vertices(b(), a()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cache_does_not_store_failures() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = CachedRouteFetcher::new(
            Box::new(CountingFetcher {
                calls: calls.clone(),
                fail: true,
            }),
            4,
        );

        assert!(cached.fetch_route_vertices(a(), b()).is_err());
        assert!(cached.fetch_route_vertices(a(), b()).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cached_len(), 0);
    }

    #[test]
    fn zero_capacity_still_caches_one_route() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = CachedRouteFetcher::new(
            Box::new(CountingFetcher {
                calls: calls.clone(),
                fail: false,
            }),
            0,
        );
        cached.fetch_route_vertices(a(), b()).unwrap();
        cached.fetch_route_vertices(a(), b()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn factory_builds_static_fetcher() {
        let kind = RouteProviderKind::Static {
            routes: vec![StaticRoute {
                origin: a(),
                destination: b(),
                vertices: vec![a(), b()],
            }],
        };
        let fetcher = build_route_fetcher(&kind, &RouteSettings::default()).expect("fetcher");
        assert_eq!(fetcher.fetch_route_vertices(a(), b()).unwrap().len(), 2);
    }

    #[cfg(feature = "osrm")]
    #[test]
    fn provider_kind_round_trips_through_json() {
        let kind = RouteProviderKind::Osrm {
            endpoint: "http://localhost:5000".to_string(),
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"kind":"osrm","endpoint":"http://localhost:5000"}"#);
        let back: RouteProviderKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
