use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::Context;

use crate::infrastructure::memory_store::FaultPolicy;

/// Runtime configuration, read from the environment (optionally via a
/// `.env` file loaded by the binaries).
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub latency: Duration,
    pub faults: FaultPolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .context("invalid BIND_ADDR")?;
        let latency_ms = match std::env::var("LATENCY_MS") {
            Ok(v) => v.parse().context("invalid LATENCY_MS")?,
            Err(_) => 150,
        };
        let faults = match std::env::var("FAULT_EVERY") {
            Ok(v) => fault_policy(v.parse().context("invalid FAULT_EVERY")?),
            Err(_) => FaultPolicy::Never,
        };
        Ok(Self { bind_addr, latency: Duration::from_millis(latency_ms), faults })
    }
}

fn fault_policy(every: u32) -> FaultPolicy {
    match NonZeroU32::new(every) {
        None => FaultPolicy::Never,
        Some(n) if n.get() == 1 => FaultPolicy::Always,
        Some(n) => FaultPolicy::EveryNth(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_policy_mapping() {
        assert_eq!(fault_policy(0), FaultPolicy::Never);
        assert_eq!(fault_policy(1), FaultPolicy::Always);
        assert_eq!(fault_policy(5), FaultPolicy::EveryNth(NonZeroU32::new(5).unwrap()));
    }
}
