use futures::future::ready;
use std::net::IpAddr;
use tracing::*;

use crate::error::Result;
use crate::snitch::Snitch;
use crate::BoxFuture;

const DEFAULT_DC: &str = "datacenter1";
const DEFAULT_RACK: &str = "rack1";

/// A snitch which places every node in `datacenter1`, `rack1`. Suitable only for single datacenter
/// deployments.
#[derive(Default, Copy, Clone, Debug, PartialEq, Ord, PartialOrd, Eq, Hash)]
pub struct SimpleSnitch;

impl Snitch for SimpleSnitch {
    fn name(&self) -> &'static str {
        "SimpleSnitch"
    }

    fn datacenter(&self, _endpoint: IpAddr) -> BoxFuture<String> {
        Box::pin(ready(DEFAULT_DC.to_string()))
    }

    fn rack(&self, _endpoint: IpAddr) -> BoxFuture<String> {
        Box::pin(ready(DEFAULT_RACK.to_string()))
    }

    fn set_my_datacenter(&self, datacenter: String) {
        debug!(%datacenter, "SimpleSnitch ignores datacenter changes.");
    }

    fn set_my_rack(&self, rack: String) {
        debug!(%rack, "SimpleSnitch ignores rack changes.");
    }

    fn set_prefer_local(&self, _prefer_local: bool) {}

    fn prefer_local(&self) -> bool {
        false
    }

    fn start(&self) -> BoxFuture<Result<()>> {
        Box::pin(ready(Ok(())))
    }

    fn stop(&self) -> BoxFuture<()> {
        Box::pin(ready(()))
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use crate::snitch::{SimpleSnitch, Snitch};

    #[tokio::test]
    async fn should_place_everything_in_single_rack() {
        let snitch = SimpleSnitch;
        snitch.start().await.unwrap();
        snitch.set_my_datacenter("east".into());
        snitch.set_prefer_local(true);

        for endpoint in [
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)),
        ] {
            assert_eq!(snitch.datacenter(endpoint).await, "datacenter1");
            assert_eq!(snitch.rack(endpoint).await, "rack1");
        }

        assert!(!snitch.prefer_local());
        snitch.stop().await;
    }
}
