//! Requests-per-minute ceiling for agent executions.

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

const WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct Window {
    started: Instant,
    used: u32,
}

/// Fixed-window limiter: at most `max_rpm` executions start per minute.
#[derive(Debug)]
pub struct RpmController {
    max_rpm: u32,
    window: Mutex<Window>,
}

impl RpmController {
    pub fn new(max_rpm: u32) -> Self {
        Self {
            max_rpm,
            window: Mutex::new(Window {
                started: Instant::now(),
                used: 0,
            }),
        }
    }

    pub fn max_rpm(&self) -> u32 {
        self.max_rpm
    }

    /// Wait until an execution slot is free in the current window, then take it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut window = self.window.lock().await;
                let now = Instant::now();
                if now.duration_since(window.started) >= WINDOW {
                    window.started = now;
                    window.used = 0;
                }
                if window.used < self.max_rpm {
                    window.used += 1;
                    return;
                }
                WINDOW.saturating_sub(now.duration_since(window.started))
            };

            tracing::info!(
                max_rpm = self.max_rpm,
                wait_secs = wait.as_secs(),
                "max RPM reached, waiting for next minute"
            );
            sleep(wait).await;
        }
    }
}
