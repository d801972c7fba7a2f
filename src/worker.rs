use log::info;
use std::time::Duration;
use tokio::{select, time::sleep};
use tokio_util::sync::CancellationToken;

use crate::config::Endpoint;
use crate::probe::{PROBE_TIMEOUT, Prober};
use crate::stats::StatsTracker;

/// Pause between monitoring cycles.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(15);

/// Continuously probes the configured endpoints and reports cumulative
/// per-domain availability.
///
/// This function runs until cancelled, probing every endpoint once per
/// cycle and logging a cumulative summary after each cycle.
///
/// # Behavior
///
/// - Probes endpoints strictly one at a time, in configured order; a
///   cycle always covers the full list regardless of failures
/// - Folds every probe outcome into the per-domain stats
/// - After each cycle, logs one cumulative line per domain seen so far
/// - Sleeps for the check interval before the next cycle; the sleep is
///   interrupted by cancellation
pub async fn monitor(endpoints: Vec<Endpoint>, prober: Prober, token: CancellationToken) {
    info!("Starting endpoint monitoring...");
    info!("Check interval: {} seconds", CHECK_INTERVAL.as_secs());
    info!("Probe timeout: {} ms", PROBE_TIMEOUT.as_millis());
    info!("Monitoring {} endpoints", endpoints.len());

    let mut stats = StatsTracker::new();

    loop {
        // Check if we should shutdown before starting a new cycle
        if token.is_cancelled() {
            info!("Shutdown requested, stopping monitor");
            break;
        }

        run_cycle(&endpoints, &prober, &mut stats).await;

        for (domain, domain_stats) in stats.report() {
            info!(
                "[CUMULATIVE] {domain} - Availability: {}/{} ({:.2}%)",
                domain_stats.available,
                domain_stats.total,
                domain_stats.percentage()
            );
        }

        // Interruptible sleep
        select! {
            () = sleep(CHECK_INTERVAL) => {},
            () = token.cancelled() => {
                info!("Shutdown requested during sleep");
                break;
            }
        }
    }

    info!("Endpoint monitoring stopped gracefully");
}

/// One full pass over the endpoint list, recording every outcome.
async fn run_cycle(endpoints: &[Endpoint], prober: &Prober, stats: &mut StatsTracker) {
    for endpoint in endpoints {
        let result = prober.probe(endpoint).await;
        stats.record(&result.domain, result.available);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint(url: &str) -> Endpoint {
        Endpoint {
            name: None,
            url: url.to_owned(),
            method: "GET".to_owned(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_cycle_covers_every_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/up"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        // Two endpoints sharing one domain, one up and one down
        let endpoints = vec![
            endpoint(&format!("{}/up", server.uri())),
            endpoint(&format!("{}/down", server.uri())),
        ];

        let prober = Prober::new().unwrap();
        let mut stats = StatsTracker::new();
        run_cycle(&endpoints, &prober, &mut stats).await;

        let report: Vec<_> = stats.report().collect();
        assert_eq!(report.len(), 1);
        let (domain, domain_stats) = report[0];
        assert_eq!(domain, "127.0.0.1");
        assert_eq!(domain_stats.total, 2);
        assert_eq!(domain_stats.available, 1);
        assert!((domain_stats.percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_cycle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let endpoints = vec![
            endpoint("http://127.0.0.1:1/unreachable"),
            endpoint(&server.uri()),
        ];

        let prober = Prober::new().unwrap();
        let mut stats = StatsTracker::new();
        run_cycle(&endpoints, &prober, &mut stats).await;

        // The later endpoint was still probed after the failure
        let totals: u64 = stats.report().map(|(_, s)| s.total).sum();
        assert_eq!(totals, 2);
    }

    #[tokio::test]
    async fn test_monitor_stops_on_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let prober = Prober::new().unwrap();
        let endpoints = vec![endpoint("https://good.example/")];

        tokio::time::timeout(Duration::from_secs(1), monitor(endpoints, prober, token))
            .await
            .expect("monitor should stop promptly once cancelled");
    }
}
