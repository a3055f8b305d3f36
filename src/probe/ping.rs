//! ICMP echo prober built on `surge-ping`.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use surge_ping::{Client, Config as IcmpConfig, PingIdentifier, PingSequence, ICMP};
use tokio::runtime::Runtime;
use tracing::debug;

use super::Prober;

const PAYLOAD: [u8; 32] = [0; 32];

/// Probes targets with ICMP echo requests.
///
/// Owns its own tokio runtime; each round pings all targets concurrently,
/// every probe bounded by the configured timeout, and blocks until the whole
/// round has completed or timed out.
///
/// ICMP sockets need raw-socket (or unprivileged-ICMP) permission. When
/// socket creation fails the prober still constructs and every probe reports
/// the `0` sentinel, per the error taxonomy: probe errors are absorbed, not
/// surfaced.
pub struct PingProber {
    runtime: Runtime,
    client_v4: Option<Client>,
    client_v6: Option<Client>,
    timeout: Duration,
    sequence: u16,
}

impl PingProber {
    pub fn new(timeout: Duration) -> Result<Self> {
        let runtime = Runtime::new().context("failed to start probe runtime")?;

        // Socket setup registers with the runtime's reactor
        let (client_v4, client_v6) = runtime.block_on(async {
            (
                Client::new(&IcmpConfig::default()),
                Client::new(&IcmpConfig::builder().kind(ICMP::V6).build()),
            )
        });
        if let Err(ref err) = client_v4 {
            debug!(error = %err, "ICMPv4 socket unavailable");
        }
        if let Err(ref err) = client_v6 {
            debug!(error = %err, "ICMPv6 socket unavailable");
        }

        Ok(Self {
            runtime,
            client_v4: client_v4.ok(),
            client_v6: client_v6.ok(),
            timeout,
            sequence: 0,
        })
    }
}

impl Prober for PingProber {
    fn probe_round(&mut self, addresses: &[String]) -> Vec<u64> {
        let sequence = PingSequence(self.sequence);
        self.sequence = self.sequence.wrapping_add(1);

        self.runtime.block_on(async {
            let handles: Vec<_> = addresses
                .iter()
                .map(|address| {
                    let address = address.clone();
                    let client_v4 = self.client_v4.clone();
                    let client_v6 = self.client_v6.clone();
                    let timeout = self.timeout;
                    tokio::spawn(async move {
                        probe_one(client_v4, client_v6, &address, timeout, sequence).await
                    })
                })
                .collect();

            let mut samples = Vec::with_capacity(handles.len());
            for handle in handles {
                samples.push(handle.await.unwrap_or(0));
            }
            samples
        })
    }

    fn description(&self) -> &str {
        "icmp echo"
    }
}

/// One best-effort echo request. Any failure maps to the `0` sentinel.
async fn probe_one(
    client_v4: Option<Client>,
    client_v6: Option<Client>,
    address: &str,
    timeout: Duration,
    sequence: PingSequence,
) -> u64 {
    let Some(ip) = resolve(address).await else {
        debug!(address, "address resolution failed");
        return 0;
    };

    let client = match ip {
        IpAddr::V4(_) => client_v4,
        IpAddr::V6(_) => client_v6,
    };
    let Some(client) = client else {
        debug!(address, "no ICMP socket for address family");
        return 0;
    };

    let mut pinger = client.pinger(ip, PingIdentifier(rand::random())).await;
    pinger.timeout(timeout);

    match pinger.ping(sequence, &PAYLOAD).await {
        Ok((_reply, rtt)) => rtt.as_millis() as u64,
        Err(err) => {
            debug!(address, error = %err, "probe failed");
            0
        }
    }
}

/// IP literal fast path, DNS lookup otherwise.
async fn resolve(address: &str) -> Option<IpAddr> {
    if let Ok(ip) = address.parse() {
        return Some(ip);
    }
    tokio::net::lookup_host((address, 0))
        .await
        .ok()?
        .next()
        .map(|sock| sock.ip())
}
