//! Deployment smoke test: polls the static frontend and the BFF health
//! endpoint with bounded retries. Not part of the runtime pipeline.

use rentacar_store::app_config::ProbeConfig;
use std::time::Duration;
use tracing::{error, info, warn};

pub const ATTEMPTS: u32 = 6;
pub const RETRY_DELAY: Duration = Duration::from_secs(5);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Both targets answered healthily.
pub const EXIT_HEALTHY: i32 = 0;
/// One or both targets stayed unhealthy after all attempts.
pub const EXIT_UNHEALTHY: i32 = 1;
/// Target hostnames are not configured; no network call was made.
pub const EXIT_MISCONFIGURED: i32 = 2;

/// The two URLs the probe hits, derived from configured hostnames.
pub struct ProbeTargets {
    pub frontend_url: String,
    pub bff_url: String,
}

impl ProbeTargets {
    pub fn from_config(probe: &ProbeConfig) -> Option<Self> {
        let frontend = probe.frontend_host.as_deref()?;
        let bff = probe.bff_host.as_deref()?;
        Some(Self {
            frontend_url: format!("https://{}/", frontend),
            bff_url: format!("https://{}/api/health", bff),
        })
    }
}

/// Redirects are not followed: a 3xx answer already counts as healthy.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

/// Poll one URL until it answers with a status in [200, 400), giving up
/// after `attempts` tries with a fixed delay between them.
pub async fn check_url(
    client: &reqwest::Client,
    url: &str,
    attempts: u32,
    delay: Duration,
) -> bool {
    for attempt in 1..=attempts {
        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if (200..400).contains(&status) {
                    return true;
                }
                warn!("Check {} returned status {}", url, status);
            }
            Err(e) => warn!("Attempt {} failed for {}: {}", attempt, url, e),
        }
        if attempt < attempts {
            tokio::time::sleep(delay).await;
        }
    }
    false
}

/// Check both targets and map the aggregate result to an exit code.
pub async fn run(
    client: &reqwest::Client,
    targets: &ProbeTargets,
    attempts: u32,
    delay: Duration,
) -> i32 {
    info!("Checking frontend: {}", targets.frontend_url);
    let frontend_ok = check_url(client, &targets.frontend_url, attempts, delay).await;

    info!("Checking BFF service: {}", targets.bff_url);
    let bff_ok = check_url(client, &targets.bff_url, attempts, delay).await;

    if frontend_ok && bff_ok {
        info!("All services healthy");
        return EXIT_HEALTHY;
    }

    if !frontend_ok {
        error!("Frontend failed");
    }
    if !bff_ok {
        error!("BFF failed");
    }
    EXIT_UNHEALTHY
}
