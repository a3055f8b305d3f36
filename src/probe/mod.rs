//! Latency probing.
//!
//! A probe round measures every enabled target once. The [`Prober`] trait is
//! the seam between the event loop and the network: a round's results come
//! back together, so the loop can apply them to the sample store atomically
//! and a frame never shows a partially applied round.

mod ping;

pub use ping::PingProber;

/// Round-trip latency measurement over a set of targets.
///
/// Implementations must be infallible from the caller's point of view:
/// timeouts, unreachable hosts, and transport errors map to the `0`
/// sentinel, indistinguishable from a genuine zero-latency reply.
pub trait Prober: Send {
    /// Probe every address once, returning one millisecond sample per
    /// address in the same order.
    fn probe_round(&mut self, addresses: &[String]) -> Vec<u64>;

    /// Human-readable description of the probe transport.
    ///
    /// Used for diagnostics.
    fn description(&self) -> &str;
}

/// Replays pre-scripted rounds; rounds past the script end return all zeros.
#[cfg(test)]
pub(crate) struct ScriptedProber {
    rounds: Vec<Vec<u64>>,
    next: usize,
}

#[cfg(test)]
impl ScriptedProber {
    pub(crate) fn new(rounds: Vec<Vec<u64>>) -> Self {
        Self { rounds, next: 0 }
    }
}

#[cfg(test)]
impl Prober for ScriptedProber {
    fn probe_round(&mut self, addresses: &[String]) -> Vec<u64> {
        let round = self.rounds.get(self.next).cloned().unwrap_or_default();
        self.next += 1;
        addresses
            .iter()
            .enumerate()
            .map(|(i, _)| round.get(i).copied().unwrap_or(0))
            .collect()
    }

    fn description(&self) -> &str {
        "scripted"
    }
}
